//! Reference statistics configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StatsConfig {
    /// Number of IC histogram bins. Default: 10.
    pub histogram_bins: Option<usize>,
    /// Top-level categories (IRIs or CURIEs) for per-branch statistics.
    #[serde(default)]
    pub top_level_categories: Vec<String>,
}

impl StatsConfig {
    pub fn effective_histogram_bins(&self) -> usize {
        self.histogram_bins
            .unwrap_or(constants::DEFAULT_HISTOGRAM_BINS)
    }
}
