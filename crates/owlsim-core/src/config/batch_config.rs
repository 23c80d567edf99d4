//! Batch (all-pairs) configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BatchConfig {
    /// Worker threads (0 = rayon default).
    pub threads: Option<usize>,
    /// Pairs scoring below this are not reported. Default: 0.0.
    pub min_score: Option<f64>,
    /// Compare each unordered pair once. Default: true.
    pub symmetric: Option<bool>,
}

impl BatchConfig {
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    pub fn effective_min_score(&self) -> f64 {
        self.min_score.unwrap_or(0.0)
    }

    pub fn effective_symmetric(&self) -> bool {
        self.symmetric.unwrap_or(true)
    }
}
