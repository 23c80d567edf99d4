//! Reasoner errors. Fatal for the batch that depends on classification.

use super::error_code::{self, OwlSimErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ReasonerError {
    #[error("Classification did not finish within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Classification failed: {reason}")]
    ClassificationFailed { reason: String },

    #[error("Reasoner unavailable: {reason}")]
    Unavailable { reason: String },
}

impl OwlSimErrorCode for ReasonerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => error_code::REASONER_TIMEOUT,
            _ => error_code::REASONER_ERROR,
        }
    }
}
