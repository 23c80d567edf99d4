//! Typed outgoing edges and their composition rules.

use serde::{Deserialize, Serialize};

use crate::types::ObjectId;

/// The predicate on an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Predicate {
    /// `source SubClassOf target`.
    SubClassOf,
    /// `source` is an instance of class `target`.
    InstanceOf,
    /// `source SubClassOf (property some target)` or a property assertion.
    Some(ObjectId),
}

impl Predicate {
    /// Subclass and instance-of steps are both "is_a" steps.
    pub fn is_subsumption(&self) -> bool {
        matches!(self, Self::SubClassOf | Self::InstanceOf)
    }

    /// The property of an existential edge.
    pub fn property(&self) -> Option<ObjectId> {
        match self {
            Self::Some(p) => Some(*p),
            _ => None,
        }
    }

    /// Compose two consecutive steps of a path.
    ///
    /// An is_a step is absorbed by its neighbour; a property composes with
    /// itself only when it is transitive. `None` means the path does not
    /// entail an edge.
    pub fn compose(self, next: Predicate, is_transitive: impl Fn(ObjectId) -> bool) -> Option<Predicate> {
        match (self, next) {
            (a, b) if a.is_subsumption() && b.is_subsumption() => {
                // instance-of followed by subclass is still instance-of.
                if a == Predicate::InstanceOf || b == Predicate::InstanceOf {
                    Some(Predicate::InstanceOf)
                } else {
                    Some(Predicate::SubClassOf)
                }
            }
            (a, Predicate::Some(p)) if a.is_subsumption() => Some(Predicate::Some(p)),
            (Predicate::Some(p), b) if b.is_subsumption() => Some(Predicate::Some(p)),
            (Predicate::Some(p), Predicate::Some(q)) if p == q && is_transitive(p) => {
                Some(Predicate::Some(p))
            }
            _ => None,
        }
    }
}

/// A directed, typed edge from `source` to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: ObjectId,
    pub target: ObjectId,
    pub predicate: Predicate,
    /// Number of asserted edges composed into this one (1 for direct edges).
    pub distance: u32,
}

impl Edge {
    pub fn direct(source: ObjectId, predicate: Predicate, target: ObjectId) -> Self {
        Self {
            source,
            target,
            predicate,
            distance: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IriInterner;

    #[test]
    fn subsumption_absorbs_into_property() {
        let interner = IriInterner::new();
        let part_of = interner.intern("http://example.org/part_of");
        let composed = Predicate::SubClassOf.compose(Predicate::Some(part_of), |_| false);
        assert_eq!(composed, Some(Predicate::Some(part_of)));
        let composed = Predicate::Some(part_of).compose(Predicate::SubClassOf, |_| false);
        assert_eq!(composed, Some(Predicate::Some(part_of)));
    }

    #[test]
    fn non_transitive_property_does_not_chain() {
        let interner = IriInterner::new();
        let p = interner.intern("http://example.org/has_phenotype");
        assert_eq!(Predicate::Some(p).compose(Predicate::Some(p), |_| false), None);
        assert_eq!(
            Predicate::Some(p).compose(Predicate::Some(p), |_| true),
            Some(Predicate::Some(p))
        );
    }

    #[test]
    fn different_properties_do_not_chain() {
        let interner = IriInterner::new();
        let p = interner.intern("http://example.org/p");
        let q = interner.intern("http://example.org/q");
        assert_eq!(Predicate::Some(p).compose(Predicate::Some(q), |_| true), None);
    }

    #[test]
    fn instance_of_survives_subclass_steps() {
        assert_eq!(
            Predicate::InstanceOf.compose(Predicate::SubClassOf, |_| false),
            Some(Predicate::InstanceOf)
        );
    }
}
