//! Tests for the owlsim configuration system.

use std::sync::Mutex;

use owlsim_core::config::{ConfigOverrides, OwlSimConfig};
use owlsim_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

fn clear_owlsim_env_vars() {
    for key in [
        "OWLSIM_SIM_COMPARISON_PROPERTY",
        "OWLSIM_SIM_DEFAULT_ALGORITHM",
        "OWLSIM_SIM_JACCARD_THRESHOLD",
        "OWLSIM_SEARCH_MIN_IC",
        "OWLSIM_SEARCH_MAX_HITS",
        "OWLSIM_STATS_HISTOGRAM_BINS",
        "OWLSIM_BATCH_THREADS",
        "OWLSIM_REASONER_TIMEOUT_SECS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_match_constants() {
    let config = OwlSimConfig::default();
    assert_eq!(config.search.effective_min_ic(), 2.5);
    assert_eq!(config.search.effective_max_hits(), 300);
    assert_eq!(config.sim.effective_jaccard_threshold(), 0.2);
    assert_eq!(config.sim.effective_default_algorithm(), "jaccard");
    assert_eq!(config.taxon.effective_only_in_taxon_id(), "RO:0002160");
    assert_eq!(config.taxon.effective_never_in_taxon_id(), "RO:0002161");
    assert!(config.taxon.effective_allow_ancestor_taxa());
    assert_eq!(config.stats.effective_histogram_bins(), 10);
}

#[test]
fn layered_resolution_overrides_beat_env_beat_project() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_owlsim_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("owlsim.toml"),
        r#"
[search]
min_ic = 3.0
max_hits = 50

[sim]
comparison_property = "RO:0002200"
"#,
    )
    .unwrap();

    std::env::set_var("OWLSIM_SEARCH_MAX_HITS", "75");

    let overrides = ConfigOverrides {
        min_ic: Some(4.5),
        ..Default::default()
    };
    let config = OwlSimConfig::load(dir.path(), Some(&overrides)).unwrap();

    assert_eq!(config.search.min_ic, Some(4.5));
    assert_eq!(config.search.max_hits, Some(75));
    assert_eq!(config.sim.comparison_property.as_deref(), Some("RO:0002200"));

    clear_owlsim_env_vars();
}

#[test]
fn missing_project_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_owlsim_env_vars();

    let dir = tempdir();
    let config = OwlSimConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.search.effective_max_hits(), 300);
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_owlsim_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("owlsim.toml"), "[search\nmin_ic = ").unwrap();
    let err = OwlSimConfig::load(dir.path(), None).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn out_of_range_threshold_fails_validation() {
    let err = OwlSimConfig::from_toml("[sim]\njaccard_threshold = 1.5\n").unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "sim.jaccard_threshold"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn zero_max_hits_fails_validation() {
    assert!(OwlSimConfig::from_toml("[search]\nmax_hits = 0\n").is_err());
}

#[test]
fn toml_round_trip_preserves_values() {
    let mut config = OwlSimConfig::default();
    config.search.excluded_labels = vec!["phenotypic abnormality".to_string()];
    config.stats.top_level_categories = vec!["HP:0000707".to_string()];
    config.reasoner.timeout_secs = Some(30);

    let text = config.to_toml().unwrap();
    let parsed = OwlSimConfig::from_toml(&text).unwrap();
    assert_eq!(parsed.search.excluded_labels, config.search.excluded_labels);
    assert_eq!(parsed.stats.top_level_categories, config.stats.top_level_categories);
    assert_eq!(parsed.reasoner.effective_timeout().as_secs(), 30);
}

#[test]
fn unknown_keys_are_ignored() {
    let config = OwlSimConfig::from_toml("[search]\nmax_hits = 10\nfuture_knob = true\n").unwrap();
    assert_eq!(config.search.effective_max_hits(), 10);
}
