//! Search/ranking configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// Query attributes with IC at or below this are ignored. Default: 2.5.
    pub min_ic: Option<f64>,
    /// Maximum number of hits. Default: 300.
    pub max_hits: Option<usize>,
    /// Attribute labels never used for matching.
    #[serde(default)]
    pub excluded_labels: Vec<String>,
    /// Name of an ontology subset whose members are never used for matching.
    pub exclusion_subset: Option<String>,
}

impl SearchConfig {
    pub fn effective_min_ic(&self) -> f64 {
        self.min_ic.unwrap_or(constants::DEFAULT_MIN_IC)
    }

    pub fn effective_max_hits(&self) -> usize {
        self.max_hits.unwrap_or(constants::DEFAULT_MAX_HITS)
    }
}
