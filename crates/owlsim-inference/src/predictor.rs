//! The predictor capability.

use owlsim_core::errors::BatchResult;
use owlsim_core::traits::OntologyGraph;
use owlsim_core::types::ObjectId;
use tracing::debug;

use crate::annotation::{group_by_bioentity, GeneAnnotation, Prediction};

/// Proposes new annotations for a bioentity from its existing ones.
pub trait AnnotationPredictor: Send + Sync {
    /// Name recorded as the evidence of every prediction.
    fn name(&self) -> &'static str;

    fn graph(&self) -> &dyn OntologyGraph;

    /// Candidate predictions for one bioentity. `existing` is sorted and
    /// deduplicated. Implementations never return a class in `existing`.
    fn predict_for_bioentity(&self, bioentity: &str, existing: &[ObjectId]) -> Vec<Prediction>;

    /// Unfiltered predictions for every bioentity in `annotations`, in
    /// bioentity order. Annotations to unknown classes are skipped into the
    /// manifest.
    fn predict(&self, annotations: &[GeneAnnotation]) -> BatchResult<Vec<Prediction>> {
        let grouped = group_by_bioentity(self.graph(), annotations);
        let mut result = BatchResult::new(Vec::new());
        let grouped = result.absorb(grouped);
        for (bioentity, existing) in &grouped {
            let predictions = self.predict_for_bioentity(bioentity, existing);
            debug!(bioentity = %bioentity, predicted = predictions.len(), predictor = self.name(), "bioentity predicted");
            result.data.extend(predictions);
        }
        result
    }
}
