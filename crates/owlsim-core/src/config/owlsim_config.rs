//! Top-level owlsim configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{BatchConfig, ReasonerConfig, SearchConfig, SimConfig, StatsConfig, TaxonConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`OWLSIM_*`)
/// 3. Project config (`owlsim.toml` in the project root)
/// 4. User config (`~/.owlsim/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OwlSimConfig {
    pub sim: SimConfig,
    pub search: SearchConfig,
    pub taxon: TaxonConfig,
    pub stats: StatsConfig,
    pub batch: BatchConfig,
    pub reasoner: ReasonerConfig,
}

/// Programmatic overrides, typically from a command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub comparison_property: Option<String>,
    pub algorithm: Option<String>,
    pub min_ic: Option<f64>,
    pub max_hits: Option<usize>,
    pub threads: Option<usize>,
}

impl OwlSimConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join("owlsim.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): explicit overrides
        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &OwlSimConfig) -> Result<(), ConfigError> {
        if let Some(threshold) = config.sim.jaccard_threshold {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::ValidationFailed {
                    field: "sim.jaccard_threshold".to_string(),
                    message: "must be between 0.0 and 1.0".to_string(),
                });
            }
        }
        if let Some(eps) = config.sim.ic_tie_epsilon {
            if !(eps >= 0.0 && eps.is_finite()) {
                return Err(ConfigError::ValidationFailed {
                    field: "sim.ic_tie_epsilon".to_string(),
                    message: "must be a finite non-negative number".to_string(),
                });
            }
        }
        if config.sim.cache_capacity == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "sim.cache_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(min_ic) = config.search.min_ic {
            if min_ic < 0.0 || !min_ic.is_finite() {
                return Err(ConfigError::ValidationFailed {
                    field: "search.min_ic".to_string(),
                    message: "must be a finite non-negative number".to_string(),
                });
            }
        }
        if config.search.max_hits == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "search.max_hits".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.stats.histogram_bins == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "stats.histogram_bins".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.reasoner.timeout_secs == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "reasoner.timeout_secs".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.owlsim/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        home_dir().map(|h| h.join(".owlsim").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut OwlSimConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: OwlSimConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins only where it has a value.
    fn merge(base: &mut OwlSimConfig, other: &OwlSimConfig) {
        // Sim
        if other.sim.comparison_property.is_some() {
            base.sim.comparison_property = other.sim.comparison_property.clone();
        }
        if other.sim.default_algorithm.is_some() {
            base.sim.default_algorithm = other.sim.default_algorithm.clone();
        }
        if other.sim.jaccard_threshold.is_some() {
            base.sim.jaccard_threshold = other.sim.jaccard_threshold;
        }
        if other.sim.ic_tie_epsilon.is_some() {
            base.sim.ic_tie_epsilon = other.sim.ic_tie_epsilon;
        }
        if other.sim.lcs_min_subsumers.is_some() {
            base.sim.lcs_min_subsumers = other.sim.lcs_min_subsumers;
        }
        if other.sim.cache_capacity.is_some() {
            base.sim.cache_capacity = other.sim.cache_capacity;
        }

        // Search
        if other.search.min_ic.is_some() {
            base.search.min_ic = other.search.min_ic;
        }
        if other.search.max_hits.is_some() {
            base.search.max_hits = other.search.max_hits;
        }
        if !other.search.excluded_labels.is_empty() {
            base.search.excluded_labels = other.search.excluded_labels.clone();
        }
        if other.search.exclusion_subset.is_some() {
            base.search.exclusion_subset = other.search.exclusion_subset.clone();
        }

        // Taxon
        if other.taxon.only_in_taxon_id.is_some() {
            base.taxon.only_in_taxon_id = other.taxon.only_in_taxon_id.clone();
        }
        if other.taxon.never_in_taxon_id.is_some() {
            base.taxon.never_in_taxon_id = other.taxon.never_in_taxon_id.clone();
        }
        if other.taxon.allow_ancestor_taxa.is_some() {
            base.taxon.allow_ancestor_taxa = other.taxon.allow_ancestor_taxa;
        }

        // Stats
        if other.stats.histogram_bins.is_some() {
            base.stats.histogram_bins = other.stats.histogram_bins;
        }
        if !other.stats.top_level_categories.is_empty() {
            base.stats.top_level_categories = other.stats.top_level_categories.clone();
        }

        // Batch
        if other.batch.threads.is_some() {
            base.batch.threads = other.batch.threads;
        }
        if other.batch.min_score.is_some() {
            base.batch.min_score = other.batch.min_score;
        }
        if other.batch.symmetric.is_some() {
            base.batch.symmetric = other.batch.symmetric;
        }

        // Reasoner
        if other.reasoner.timeout_secs.is_some() {
            base.reasoner.timeout_secs = other.reasoner.timeout_secs;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `OWLSIM_SEARCH_MIN_IC`, `OWLSIM_BATCH_THREADS`, etc.
    fn apply_env_overrides(config: &mut OwlSimConfig) {
        if let Ok(val) = std::env::var("OWLSIM_SIM_COMPARISON_PROPERTY") {
            config.sim.comparison_property = Some(val);
        }
        if let Ok(val) = std::env::var("OWLSIM_SIM_DEFAULT_ALGORITHM") {
            config.sim.default_algorithm = Some(val);
        }
        if let Ok(val) = std::env::var("OWLSIM_SIM_JACCARD_THRESHOLD") {
            if let Ok(v) = val.parse::<f64>() {
                config.sim.jaccard_threshold = Some(v);
            }
        }
        if let Ok(val) = std::env::var("OWLSIM_SEARCH_MIN_IC") {
            if let Ok(v) = val.parse::<f64>() {
                config.search.min_ic = Some(v);
            }
        }
        if let Ok(val) = std::env::var("OWLSIM_SEARCH_MAX_HITS") {
            if let Ok(v) = val.parse::<usize>() {
                config.search.max_hits = Some(v);
            }
        }
        if let Ok(val) = std::env::var("OWLSIM_STATS_HISTOGRAM_BINS") {
            if let Ok(v) = val.parse::<usize>() {
                config.stats.histogram_bins = Some(v);
            }
        }
        if let Ok(val) = std::env::var("OWLSIM_BATCH_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.batch.threads = Some(v);
            }
        }
        if let Ok(val) = std::env::var("OWLSIM_REASONER_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.reasoner.timeout_secs = Some(v);
            }
        }
    }

    /// Apply explicit overrides (highest priority).
    fn apply_overrides(config: &mut OwlSimConfig, overrides: &ConfigOverrides) {
        if let Some(ref v) = overrides.comparison_property {
            config.sim.comparison_property = Some(v.clone());
        }
        if let Some(ref v) = overrides.algorithm {
            config.sim.default_algorithm = Some(v.clone());
        }
        if let Some(v) = overrides.min_ic {
            config.search.min_ic = Some(v);
        }
        if let Some(v) = overrides.max_hits {
            config.search.max_hits = Some(v);
        }
        if let Some(v) = overrides.threads {
            config.batch.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
