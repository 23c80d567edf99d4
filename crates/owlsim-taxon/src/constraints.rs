//! Per-class taxon constraint checks.

use std::fmt;
use std::sync::Arc;

use owlsim_core::config::TaxonConfig;
use owlsim_core::constants::{NEVER_IN_TAXON_LABEL, ONLY_IN_TAXON_LABEL};
use owlsim_core::errors::TaxonError;
use owlsim_core::model::Predicate;
use owlsim_core::traits::OntologyGraph;
use owlsim_core::types::{iri_from_identifier, FxHashSet, ObjectId};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonRelation {
    OnlyIn,
    NeverIn,
}

impl fmt::Display for TaxonRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnlyIn => f.write_str(ONLY_IN_TAXON_LABEL),
            Self::NeverIn => f.write_str(NEVER_IN_TAXON_LABEL),
        }
    }
}

/// `source <relation> taxon`, asserted on `source` and inherited by every
/// class whose edge closure reaches `source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TaxonConstraint {
    pub source: ObjectId,
    pub relation: TaxonRelation,
    pub taxon: ObjectId,
}

/// Taxon constraint engine over an ontology graph.
///
/// Constraint relations are recognized by id (configurable, `RO:0002160` and
/// `RO:0002161` by default) or by a label normalizing to `only_in_taxon` /
/// `never_in_taxon`.
pub struct TaxonConstraints {
    graph: Arc<dyn OntologyGraph>,
    only_in: Option<ObjectId>,
    never_in: Option<ObjectId>,
    allow_ancestor_taxa: bool,
}

/// `"only in taxon"`, `"only-in-taxon"` and `"Only_In_Taxon"` all become
/// `only_in_taxon`.
fn normalize_label(label: &str) -> String {
    label
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

impl TaxonConstraints {
    pub fn new<G: OntologyGraph + 'static>(graph: Arc<G>, config: &TaxonConfig) -> Self {
        let graph: Arc<dyn OntologyGraph> = graph;
        let only_in = graph.object_by_iri(&iri_from_identifier(config.effective_only_in_taxon_id()));
        let never_in = graph.object_by_iri(&iri_from_identifier(config.effective_never_in_taxon_id()));
        debug!(
            only_in_declared = only_in.is_some(),
            never_in_declared = never_in.is_some(),
            "taxon relations resolved"
        );
        Self {
            graph,
            only_in,
            never_in,
            allow_ancestor_taxa: config.effective_allow_ancestor_taxa(),
        }
    }

    pub fn graph(&self) -> &dyn OntologyGraph {
        self.graph.as_ref()
    }

    /// Classify a property as a taxon relation, if it is one.
    pub fn relation_of(&self, property: ObjectId) -> Option<TaxonRelation> {
        if Some(property) == self.only_in {
            return Some(TaxonRelation::OnlyIn);
        }
        if Some(property) == self.never_in {
            return Some(TaxonRelation::NeverIn);
        }
        let label = normalize_label(&self.graph.label(property)?);
        if label == ONLY_IN_TAXON_LABEL {
            Some(TaxonRelation::OnlyIn)
        } else if label == NEVER_IN_TAXON_LABEL {
            Some(TaxonRelation::NeverIn)
        } else {
            None
        }
    }

    /// Resolve a class IRI or CURIE.
    pub fn class(&self, iri_or_curie: &str) -> Result<ObjectId, TaxonError> {
        self.lookup(iri_or_curie)
            .ok_or_else(|| TaxonError::UnknownClass {
                iri: iri_or_curie.to_string(),
            })
    }

    /// Resolve a taxon IRI or CURIE.
    pub fn taxon(&self, iri_or_curie: &str) -> Result<ObjectId, TaxonError> {
        self.lookup(iri_or_curie)
            .ok_or_else(|| TaxonError::UnknownTaxon {
                iri: iri_or_curie.to_string(),
            })
    }

    fn lookup(&self, iri_or_curie: &str) -> Option<ObjectId> {
        self.graph
            .object_by_iri(&iri_from_identifier(iri_or_curie))
            .or_else(|| self.graph.class_by_identifier(iri_or_curie))
            .filter(|id| self.is_class_like(*id))
    }

    fn is_class_like(&self, id: ObjectId) -> bool {
        self.graph.kind(id).is_some_and(|k| k.is_class_like())
    }

    pub(crate) fn check_class(&self, class: ObjectId) -> Result<(), TaxonError> {
        if self.is_class_like(class) {
            Ok(())
        } else {
            Err(TaxonError::UnknownClass {
                iri: self.graph.iri(class).unwrap_or_else(|| format!("{class:?}")),
            })
        }
    }

    pub(crate) fn check_taxon(&self, taxon: ObjectId) -> Result<(), TaxonError> {
        if self.is_class_like(taxon) {
            Ok(())
        } else {
            Err(TaxonError::UnknownTaxon {
                iri: self.graph.iri(taxon).unwrap_or_else(|| format!("{taxon:?}")),
            })
        }
    }

    /// The class itself followed by every target of its edge closure.
    fn reachable(&self, class: ObjectId) -> Vec<ObjectId> {
        let mut seen = FxHashSet::default();
        let mut out = vec![class];
        seen.insert(class);
        for edge in self.graph.outgoing_edges_closure(class) {
            if seen.insert(edge.target) {
                out.push(edge.target);
            }
        }
        out
    }

    /// Constraints asserted directly on `source`.
    fn direct_constraints(&self, source: ObjectId) -> impl Iterator<Item = TaxonConstraint> + '_ {
        self.graph
            .outgoing_edges(source)
            .into_iter()
            .filter_map(move |edge| match edge.predicate {
                Predicate::Some(p) => self.relation_of(p).map(|relation| TaxonConstraint {
                    source,
                    relation,
                    taxon: edge.target,
                }),
                _ => None,
            })
    }

    /// Every constraint that applies to `class`, sorted.
    pub fn constraints_of(&self, class: ObjectId) -> Result<Vec<TaxonConstraint>, TaxonError> {
        self.check_class(class)?;
        let mut out: Vec<TaxonConstraint> = self
            .reachable(class)
            .into_iter()
            .flat_map(|target| self.direct_constraints(target))
            .collect();
        out.sort_unstable();
        out.dedup();
        Ok(out)
    }

    /// Whether `taxon` passes a single constraint.
    pub fn satisfies(&self, constraint: &TaxonConstraint, taxon: ObjectId) -> bool {
        let within = self.graph.is_subsumed_by(taxon, constraint.taxon);
        match constraint.relation {
            TaxonRelation::OnlyIn => {
                within || (self.allow_ancestor_taxa && self.graph.is_subsumed_by(constraint.taxon, taxon))
            }
            TaxonRelation::NeverIn => !within,
        }
    }

    /// The first constraint `taxon` violates, stopping at the first one found.
    pub fn violation(&self, class: ObjectId, taxon: ObjectId) -> Result<Option<TaxonConstraint>, TaxonError> {
        self.check_class(class)?;
        self.check_taxon(taxon)?;
        for target in self.reachable(class) {
            if let Some(c) = self.direct_constraints(target).find(|c| !self.satisfies(c, taxon)) {
                debug!(constraint = %c.relation, "taxon constraint violated");
                return Ok(Some(c));
            }
        }
        Ok(None)
    }

    pub fn is_applicable(&self, class: ObjectId, taxon: ObjectId) -> Result<bool, TaxonError> {
        Ok(self.violation(class, taxon)?.is_none())
    }

    /// [`Self::is_applicable`] by IRI or CURIE.
    pub fn is_applicable_iri(&self, class: &str, taxon: &str) -> Result<bool, TaxonError> {
        self.is_applicable(self.class(class)?, self.taxon(taxon)?)
    }

    /// Named classes that may not occur in `taxon`, sorted by id.
    pub fn invalid_classes(&self, taxon: ObjectId) -> Result<Vec<ObjectId>, TaxonError> {
        self.check_taxon(taxon)?;
        let mut invalid: Vec<ObjectId> = self
            .graph
            .classes()
            .into_par_iter()
            .filter(|c| matches!(self.violation(*c, taxon), Ok(Some(_))))
            .collect();
        invalid.sort_unstable();
        info!(invalid = invalid.len(), "invalid classes computed");
        Ok(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_normalize_to_relation_names() {
        assert_eq!(normalize_label("only in taxon"), "only_in_taxon");
        assert_eq!(normalize_label(" Never-In-Taxon "), "never_in_taxon");
        assert_eq!(normalize_label("part of"), "part_of");
    }

    #[test]
    fn relations_display_as_labels() {
        assert_eq!(TaxonRelation::OnlyIn.to_string(), "only_in_taxon");
        assert_eq!(TaxonRelation::NeverIn.to_string(), "never_in_taxon");
    }
}
