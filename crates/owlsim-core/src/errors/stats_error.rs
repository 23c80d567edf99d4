//! Reference statistics errors.

use super::error_code::{self, OwlSimErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Queried reference entity is not in the precomputed population.
    #[error("Reference entity not found: {iri}")]
    ReferenceNotFound { iri: String },

    #[error("Category not precomputed: {iri}")]
    UnknownCategory { iri: String },

    #[error("Reference population is empty")]
    EmptyPopulation,

    #[error("Insufficient data: need at least {needed} values, got {actual}")]
    InsufficientData { needed: usize, actual: usize },

    #[error("Distribution error: {message}")]
    Distribution { message: String },
}

impl OwlSimErrorCode for StatsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ReferenceNotFound { .. } => error_code::REFERENCE_NOT_FOUND,
            _ => error_code::STATS_ERROR,
        }
    }
}
