//! Predict then filter, once per bioentity.

use owlsim_core::errors::BatchResult;
use owlsim_core::tracing::fields;
use rayon::prelude::*;
use tracing::info;

use crate::annotation::{group_by_bioentity, GeneAnnotation, Prediction};
use crate::predictor::AnnotationPredictor;
use crate::redundancy::RedundancyFilter;

pub struct InferencePipeline<P: AnnotationPredictor> {
    predictor: P,
    filter: RedundancyFilter,
}

impl<P: AnnotationPredictor> InferencePipeline<P> {
    pub fn new(predictor: P, filter: RedundancyFilter) -> Self {
        Self { predictor, filter }
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Predictions for every bioentity in `annotations`, in bioentity order,
    /// after a single redundancy pass. Bioentities run in parallel.
    pub fn run(&self, annotations: &[GeneAnnotation]) -> BatchResult<Vec<Prediction>> {
        let mut result = BatchResult::new(Vec::new());
        let grouped = result.absorb(group_by_bioentity(self.predictor.graph(), annotations));
        let groups: Vec<_> = grouped.into_iter().collect();

        let per_bioentity: Vec<Vec<Prediction>> = groups
            .par_iter()
            .map(|(bioentity, existing)| {
                let candidates = self.predictor.predict_for_bioentity(bioentity, existing);
                self.filter.apply(existing, candidates)
            })
            .collect();
        result.data = per_bioentity.into_iter().flatten().collect();

        info!(
            predictor = self.predictor.name(),
            bioentities = groups.len(),
            predictions = result.data.len(),
            { fields::SKIPPED } = result.error_count(),
            "annotation inference finished"
        );
        result
    }
}
