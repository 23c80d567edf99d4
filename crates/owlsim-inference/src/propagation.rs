//! Propagation over relations such as `part_of`.

use std::sync::Arc;

use owlsim_core::model::{ObjectKind, Predicate};
use owlsim_core::traits::OntologyGraph;
use owlsim_core::types::{iri_from_identifier, FxHashSet, ObjectId};
use tracing::{debug, warn};

use crate::annotation::Prediction;
use crate::predictor::AnnotationPredictor;

/// `part_of`.
pub const PART_OF: &str = "BFO:0000050";

/// Predicts an annotation to every class an existing annotation reaches
/// through a propagating relation in its edge closure: a bioentity located
/// in the nuclear envelope is located in the nucleus.
pub struct PropagationPredictor {
    graph: Arc<dyn OntologyGraph>,
    properties: FxHashSet<ObjectId>,
}

impl PropagationPredictor {
    /// Propagate over `part_of`.
    pub fn new<G: OntologyGraph + 'static>(graph: Arc<G>) -> Self {
        Self::with_properties(graph, &[PART_OF])
    }

    /// Propagate over the given relations. Relations the ontology does not
    /// declare are logged and ignored.
    pub fn with_properties<G: OntologyGraph + 'static>(graph: Arc<G>, properties: &[&str]) -> Self {
        let graph: Arc<dyn OntologyGraph> = graph;
        let mut resolved = FxHashSet::default();
        for p in properties {
            match graph
                .object_by_iri(&iri_from_identifier(p))
                .filter(|id| graph.kind(*id) == Some(ObjectKind::Property))
            {
                Some(id) => {
                    resolved.insert(id);
                }
                None => warn!(property = %p, "propagating relation not declared"),
            }
        }
        debug!(relations = resolved.len(), "propagation predictor ready");
        Self {
            graph,
            properties: resolved,
        }
    }

    pub fn properties(&self) -> &FxHashSet<ObjectId> {
        &self.properties
    }

    fn propagates(&self, predicate: Predicate) -> bool {
        predicate
            .property()
            .is_some_and(|p| self.properties.contains(&p))
    }
}

impl AnnotationPredictor for PropagationPredictor {
    fn name(&self) -> &'static str {
        "propagation"
    }

    fn graph(&self) -> &dyn OntologyGraph {
        self.graph.as_ref()
    }

    fn predict_for_bioentity(&self, bioentity: &str, existing: &[ObjectId]) -> Vec<Prediction> {
        let mut targets: Vec<ObjectId> = existing
            .iter()
            .flat_map(|c| self.graph.outgoing_edges_closure(*c))
            .filter(|e| self.propagates(e.predicate))
            .map(|e| e.target)
            .filter(|t| self.graph.kind(*t).is_some_and(|k| k.is_class_like()))
            .filter(|t| existing.binary_search(t).is_err())
            .collect();
        targets.sort_unstable();
        targets.dedup();
        targets
            .into_iter()
            .map(|t| Prediction::new(self.graph.as_ref(), bioentity, t, self.name()))
            .collect()
    }
}
