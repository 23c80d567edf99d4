//! Similarity engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SimConfig {
    /// Property linking entities to attributes (IRI or CURIE), e.g. has_phenotype.
    /// When unset, entities are characterized by their class assertions only.
    pub comparison_property: Option<String>,
    /// Algorithm name used when none is requested. Default: "jaccard".
    pub default_algorithm: Option<String>,
    /// Jaccard threshold of the combined metric. Default: 0.2.
    pub jaccard_threshold: Option<f64>,
    /// Tolerance for maximum-IC ties. Default: 1e-9.
    pub ic_tie_epsilon: Option<f64>,
    /// Minimum reflexive subsumers for an LCS member to join a synthesized class. Default: 2.
    pub lcs_min_subsumers: Option<usize>,
    /// Capacity of each session cache. Default: 100000.
    pub cache_capacity: Option<u64>,
}

impl SimConfig {
    pub fn effective_default_algorithm(&self) -> &str {
        self.default_algorithm
            .as_deref()
            .unwrap_or(constants::DEFAULT_ALGORITHM)
    }

    pub fn effective_jaccard_threshold(&self) -> f64 {
        self.jaccard_threshold
            .unwrap_or(constants::DEFAULT_JACCARD_THRESHOLD)
    }

    pub fn effective_ic_tie_epsilon(&self) -> f64 {
        self.ic_tie_epsilon
            .unwrap_or(constants::DEFAULT_IC_TIE_EPSILON)
    }

    pub fn effective_lcs_min_subsumers(&self) -> usize {
        self.lcs_min_subsumers
            .unwrap_or(constants::DEFAULT_LCS_MIN_SUBSUMERS)
    }

    pub fn effective_cache_capacity(&self) -> u64 {
        self.cache_capacity
            .unwrap_or(constants::DEFAULT_CACHE_CAPACITY)
    }
}
