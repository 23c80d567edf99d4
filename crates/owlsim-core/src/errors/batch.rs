//! Aggregate error type and non-fatal error collection for batch jobs.

use super::error_code::{self, OwlSimErrorCode};
use super::{
    ConfigError, GraphError, InferenceError, ReasonerError, SimError, StatsError, TaxonError,
};
use crate::types::FxHashMap;

/// Any owlsim error. Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum OwlSimError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Similarity error: {0}")]
    Sim(#[from] SimError),

    #[error("Taxon error: {0}")]
    Taxon(#[from] TaxonError),

    #[error("Statistics error: {0}")]
    Stats(#[from] StatsError),

    #[error("Reasoner error: {0}")]
    Reasoner(#[from] ReasonerError),

    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Batch cancelled")]
    Cancelled,
}

impl OwlSimErrorCode for OwlSimError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Graph(e) => e.error_code(),
            Self::Sim(e) => e.error_code(),
            Self::Taxon(e) => e.error_code(),
            Self::Stats(e) => e.error_code(),
            Self::Reasoner(e) => e.error_code(),
            Self::Inference(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}

/// Result of a batch job that accumulates non-fatal errors.
/// Partial results are returned alongside a manifest of skipped inputs.
#[derive(Debug, Default)]
pub struct BatchResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the run.
    pub errors: Vec<OwlSimError>,
    /// True when the job stopped early on a cancellation request.
    pub cancelled: bool,
}

impl<T: Default> BatchResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
            cancelled: false,
        }
    }

    /// Add a non-fatal error to the manifest.
    pub fn add_error(&mut self, error: impl Into<OwlSimError>) {
        self.errors.push(error.into());
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Error counts keyed by error code, for aggregate reporting.
    pub fn error_summary(&self) -> FxHashMap<&'static str, usize> {
        let mut summary = FxHashMap::default();
        for e in &self.errors {
            *summary.entry(e.error_code()).or_insert(0) += 1;
        }
        summary
    }

    /// Move the manifest of `other` into this result.
    pub fn absorb<U: Default>(&mut self, other: BatchResult<U>) -> U {
        self.errors.extend(other.errors);
        self.cancelled |= other.cancelled;
        other.data
    }
}
