//! Structured span field names shared across owlsim subsystems.

/// Batch: number of pairs scored.
pub const PAIRS_COMPARED: &str = "pairs_compared";

/// Batch: number of inputs skipped (unknown attributes, missing IC).
pub const SKIPPED: &str = "skipped";

/// Session: closure cache entry count.
pub const CLOSURE_CACHE_ENTRIES: &str = "closure_cache_entries";

/// Session: number of synthesized LCS classes.
pub const SYNTHESIZED_CLASSES: &str = "synthesized_classes";

/// IC model: corpus size.
pub const CORPUS_SIZE: &str = "corpus_size";

/// Taxon matrix: build time in milliseconds.
pub const MATRIX_BUILD_TIME: &str = "matrix_build_time";

/// Reference statistics: build time in milliseconds.
pub const STATS_BUILD_TIME: &str = "stats_build_time";
