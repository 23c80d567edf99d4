//! The redundancy pass over one bioentity's predictions.

use std::sync::Arc;

use owlsim_core::traits::Reasoner;
use owlsim_core::types::ObjectId;
use serde::{Deserialize, Serialize};

use crate::annotation::Prediction;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RedundancyMode {
    /// Discard predictions with either flag set.
    #[default]
    Drop,
    /// Keep every prediction with its flags set.
    Flag,
}

/// Flags predictions subsumed by what the bioentity already has or by a
/// more specific prediction. Subsumption is the reasoner's.
pub struct RedundancyFilter {
    reasoner: Arc<dyn Reasoner>,
    mode: RedundancyMode,
}

impl RedundancyFilter {
    pub fn new<R: Reasoner + 'static>(reasoner: Arc<R>, mode: RedundancyMode) -> Self {
        Self { reasoner, mode }
    }

    pub fn mode(&self) -> RedundancyMode {
        self.mode
    }

    fn strictly_below(&self, sub: ObjectId, sup: ObjectId) -> bool {
        sub != sup && self.reasoner.entails_subclass(sub, sup) && !self.reasoner.entails_subclass(sup, sub)
    }

    /// Set both flags on every prediction, then drop or keep per the mode.
    pub fn apply(&self, existing: &[ObjectId], mut predictions: Vec<Prediction>) -> Vec<Prediction> {
        let classes: Vec<ObjectId> = predictions.iter().map(|p| p.class).collect();
        for p in &mut predictions {
            p.is_redundant_with_existing_annotations = existing
                .iter()
                .any(|e| self.reasoner.entails_subclass(*e, p.class));
            p.is_redundant_with_other_predictions = classes
                .iter()
                .any(|other| self.strictly_below(*other, p.class));
        }
        if self.mode == RedundancyMode::Drop {
            predictions.retain(|p| !p.is_redundant());
        }
        predictions
    }
}
