//! Prediction of genus-differentia defined classes.
//!
//! A defined class `G and (p some F)` is predicted for a bioentity when some
//! existing annotation is an `is_a` descendant of each genus and, for each
//! differentia, some annotation reaches `F` (or a descendant) over `p` in its
//! edge closure. Differentia over regulation relations are not evaluated:
//! satisfying them needs the regulation chain axioms this predictor does
//! not model, so those definitions resolve to [`Resolution::Unresolvable`].

use std::sync::Arc;

use owlsim_core::model::{LogicalDefinition, Predicate};
use owlsim_core::traits::OntologyGraph;
use owlsim_core::types::{iri_from_identifier, FxHashSet, ObjectId};
use tracing::debug;

use crate::annotation::Prediction;
use crate::predictor::AnnotationPredictor;

/// `regulates`, `negatively regulates`, `positively regulates`.
const REGULATION_RELATIONS: [&str; 3] = ["RO:0002211", "RO:0002212", "RO:0002213"];

/// Outcome of evaluating one logical definition against a set of annotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The annotations that satisfy the definition; empty when it is not
    /// satisfied.
    Resolved(Vec<ObjectId>),
    /// The definition uses constructs this predictor cannot evaluate.
    Unresolvable(String),
}

impl Resolution {
    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Resolved(witnesses) if !witnesses.is_empty())
    }
}

pub struct CompositionalClassPredictor {
    graph: Arc<dyn OntologyGraph>,
    definitions: Vec<(ObjectId, LogicalDefinition)>,
    unsupported: FxHashSet<ObjectId>,
}

impl CompositionalClassPredictor {
    /// `definitions` are the genus-differentia classes to consider.
    pub fn new<G: OntologyGraph + 'static>(graph: Arc<G>, definitions: Vec<(ObjectId, LogicalDefinition)>) -> Self {
        let graph: Arc<dyn OntologyGraph> = graph;
        let unsupported = REGULATION_RELATIONS
            .iter()
            .filter_map(|r| graph.object_by_iri(&iri_from_identifier(r)))
            .collect();
        let definitions: Vec<_> = definitions
            .into_iter()
            .filter(|(_, def)| !def.differentia.is_empty())
            .collect();
        debug!(definitions = definitions.len(), "compositional predictor ready");
        Self {
            graph,
            definitions,
            unsupported,
        }
    }

    /// Consider every class of `graph` with a logical definition.
    pub fn from_graph<G: OntologyGraph + 'static>(graph: Arc<G>) -> Self {
        let definitions = graph
            .classes()
            .into_iter()
            .filter_map(|c| graph.logical_definition(c).map(|d| (c, d)))
            .collect();
        Self::new(graph, definitions)
    }

    pub fn definitions(&self) -> &[(ObjectId, LogicalDefinition)] {
        &self.definitions
    }

    fn is_unsupported(&self, property: ObjectId) -> bool {
        self.unsupported.contains(&property)
            || self
                .graph
                .label(property)
                .is_some_and(|l| l.to_ascii_lowercase().contains("regulates"))
    }

    fn isa_subsumed(&self, sub: ObjectId, sup: ObjectId) -> bool {
        sub == sup
            || self
                .graph
                .outgoing_edges_closure(sub)
                .iter()
                .any(|e| e.predicate.is_subsumption() && e.target == sup)
    }

    fn reaches(&self, class: ObjectId, property: ObjectId, filler: ObjectId) -> bool {
        self.graph
            .outgoing_edges_closure(class)
            .iter()
            .any(|e| e.predicate == Predicate::Some(property) && self.isa_subsumed(e.target, filler))
    }

    /// Evaluate `definition` against `annotations`.
    pub fn resolve(&self, definition: &LogicalDefinition, annotations: &[ObjectId]) -> Resolution {
        if let Some(r) = definition
            .differentia
            .iter()
            .find(|r| self.is_unsupported(r.property))
        {
            let property = self.graph.identifier(r.property).unwrap_or_default();
            return Resolution::Unresolvable(format!("differentia over unsupported relation {property}"));
        }

        let mut witnesses = Vec::new();
        for genus in &definition.genus {
            match annotations.iter().find(|a| self.isa_subsumed(**a, *genus)) {
                Some(a) => witnesses.push(*a),
                None => return Resolution::Resolved(Vec::new()),
            }
        }
        for r in &definition.differentia {
            match annotations
                .iter()
                .find(|a| self.reaches(**a, r.property, r.filler))
            {
                Some(a) => witnesses.push(*a),
                None => return Resolution::Resolved(Vec::new()),
            }
        }
        witnesses.sort_unstable();
        witnesses.dedup();
        Resolution::Resolved(witnesses)
    }

    /// Evaluate every definition, in definition order.
    pub fn resolve_all(&self, annotations: &[ObjectId]) -> Vec<(ObjectId, Resolution)> {
        self.definitions
            .iter()
            .map(|(class, def)| (*class, self.resolve(def, annotations)))
            .collect()
    }
}

impl AnnotationPredictor for CompositionalClassPredictor {
    fn name(&self) -> &'static str {
        "compositional"
    }

    fn graph(&self) -> &dyn OntologyGraph {
        self.graph.as_ref()
    }

    fn predict_for_bioentity(&self, bioentity: &str, existing: &[ObjectId]) -> Vec<Prediction> {
        let mut predicted = Vec::new();
        for (class, resolution) in self.resolve_all(existing) {
            match resolution {
                Resolution::Unresolvable(reason) => {
                    debug!(bioentity, class = ?class, %reason, "definition not evaluated");
                }
                r if r.is_satisfied() && existing.binary_search(&class).is_err() => predicted.push(class),
                _ => {}
            }
        }
        predicted.sort_unstable();
        predicted.dedup();
        predicted
            .into_iter()
            .map(|c| Prediction::new(self.graph.as_ref(), bioentity, c, self.name()))
            .collect()
    }
}
