//! Annotation and prediction records.

use std::collections::BTreeMap;

use owlsim_core::errors::{BatchResult, InferenceError};
use owlsim_core::traits::OntologyGraph;
use owlsim_core::types::{iri_from_identifier, ObjectId};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// `bioentity` annotated to `class` (an IRI or CURIE).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneAnnotation {
    pub bioentity: String,
    pub class: String,
    /// Evidence code, or the predictor name for predicted annotations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

impl GeneAnnotation {
    pub fn new(bioentity: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            bioentity: bioentity.into(),
            class: class.into(),
            evidence: None,
        }
    }

    pub fn with_evidence(mut self, evidence: impl Into<String>) -> Self {
        self.evidence = Some(evidence.into());
        self
    }
}

/// A candidate annotation plus its redundancy flags.
///
/// Flags stay false until the redundancy pass runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub annotation: GeneAnnotation,
    #[serde(skip)]
    pub class: ObjectId,
    /// An existing annotation of the bioentity is subsumed by the predicted class.
    pub is_redundant_with_existing_annotations: bool,
    /// Another prediction for the bioentity is strictly more specific.
    pub is_redundant_with_other_predictions: bool,
}

impl Prediction {
    pub fn new(graph: &dyn OntologyGraph, bioentity: &str, class: ObjectId, source: &str) -> Self {
        let iri = graph.iri(class).unwrap_or_default();
        Self {
            annotation: GeneAnnotation::new(bioentity, iri).with_evidence(source),
            class,
            is_redundant_with_existing_annotations: false,
            is_redundant_with_other_predictions: false,
        }
    }

    pub fn is_redundant(&self) -> bool {
        self.is_redundant_with_existing_annotations || self.is_redundant_with_other_predictions
    }
}

/// Resolve a class IRI or CURIE to a class-like object.
pub(crate) fn resolve_class(graph: &dyn OntologyGraph, iri_or_curie: &str) -> Option<ObjectId> {
    graph
        .object_by_iri(&iri_from_identifier(iri_or_curie))
        .or_else(|| graph.class_by_identifier(iri_or_curie))
        .filter(|id| graph.kind(*id).is_some_and(|k| k.is_class_like()))
}

/// Group annotations by bioentity (sorted), resolving each class. Unknown
/// classes are skipped into the manifest; each bioentity's classes are
/// sorted and deduplicated.
pub fn group_by_bioentity(
    graph: &dyn OntologyGraph,
    annotations: &[GeneAnnotation],
) -> BatchResult<BTreeMap<String, Vec<ObjectId>>> {
    let mut result: BatchResult<BTreeMap<String, Vec<ObjectId>>> = BatchResult::default();
    for a in annotations {
        match resolve_class(graph, &a.class) {
            Some(id) => result.data.entry(a.bioentity.clone()).or_default().push(id),
            None => {
                warn!(bioentity = %a.bioentity, class = %a.class, "skipping annotation to unknown class");
                result.add_error(InferenceError::UnknownClass { iri: a.class.clone() });
            }
        }
    }
    for classes in result.data.values_mut() {
        classes.sort_unstable();
        classes.dedup();
    }
    result
}
