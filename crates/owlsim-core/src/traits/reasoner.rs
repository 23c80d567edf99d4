//! Reasoner capability. DL classification is delegated; the core only queries.

use crate::errors::ReasonerError;
use crate::types::{ObjectId, SmallVec2};

/// A set of mutually equivalent classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquivalenceNode {
    pub members: SmallVec2<ObjectId>,
}

impl EquivalenceNode {
    pub fn singleton(id: ObjectId) -> Self {
        let mut members = SmallVec2::new();
        members.push(id);
        Self { members }
    }

    /// Smallest member; stable across calls.
    pub fn representative(&self) -> Option<ObjectId> {
        self.members.iter().min().copied()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.members.contains(&id)
    }
}

pub trait Reasoner: Send + Sync {
    /// Classify the ontology. Blocking and uninterruptible; wrap it with a
    /// timeout at the call site when needed.
    fn precompute_inferences(&self) -> Result<(), ReasonerError>;

    fn super_classes(&self, class: ObjectId, direct: bool) -> Vec<EquivalenceNode>;

    fn sub_classes(&self, class: ObjectId, direct: bool) -> Vec<EquivalenceNode>;

    fn equivalent_classes(&self, class: ObjectId) -> EquivalenceNode;

    /// Reflexive entailed subsumption.
    fn entails_subclass(&self, sub: ObjectId, sup: ObjectId) -> bool {
        if sub == sup || self.equivalent_classes(sub).contains(sup) {
            return true;
        }
        self.super_classes(sub, false)
            .iter()
            .any(|node| node.contains(sup))
    }
}
