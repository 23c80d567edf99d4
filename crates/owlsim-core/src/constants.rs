//! Shared constants for the owlsim engine.

/// owlsim version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---- Similarity ----

/// Minimum IC (bits) for a query attribute to count during search.
pub const DEFAULT_MIN_IC: f64 = 2.5;

/// Maximum number of hits returned by a search.
pub const DEFAULT_MAX_HITS: usize = 300;

/// Jaccard score below which the combined metric runs the conjunctive stage.
pub const DEFAULT_JACCARD_THRESHOLD: f64 = 0.2;

/// Tolerance used when detecting maximum-IC ties.
pub const DEFAULT_IC_TIE_EPSILON: f64 = 1e-9;

/// Minimum reflexive subsumer count for an LCS member to be kept when
/// synthesizing an intersection class.
pub const DEFAULT_LCS_MIN_SUBSUMERS: usize = 2;

/// Default capacity of each session cache (entries).
pub const DEFAULT_CACHE_CAPACITY: u64 = 100_000;

/// Default algorithm used when none is configured.
pub const DEFAULT_ALGORITHM: &str = "jaccard";

// ---- Taxon constraints ----

/// Relation id for `only_in_taxon`.
pub const ONLY_IN_TAXON_ID: &str = "RO:0002160";

/// Relation id for `never_in_taxon`.
pub const NEVER_IN_TAXON_ID: &str = "RO:0002161";

/// Relation label for `only_in_taxon`.
pub const ONLY_IN_TAXON_LABEL: &str = "only_in_taxon";

/// Relation label for `never_in_taxon`.
pub const NEVER_IN_TAXON_LABEL: &str = "never_in_taxon";

// ---- Statistics ----

/// Default number of histogram bins for IC distributions.
pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

// ---- Reasoner ----

/// Default timeout for reasoner classification in seconds.
pub const DEFAULT_REASONER_TIMEOUT_SECS: u64 = 600;

// ---- IRIs ----

/// OBO PURL prefix used to derive short identifiers (`GO:0005634`).
pub const OBO_PREFIX: &str = "http://purl.obolibrary.org/obo/";

/// Namespace for classes synthesized by the LCS engine.
pub const SYNTHESIZED_CLASS_PREFIX: &str = "http://owlsim.org/lcs/";

/// Namespace for match individuals emitted by the OWL renderer.
pub const MATCH_INDIVIDUAL_PREFIX: &str = "http://owlsim.org/match/";

/// The top class.
pub const OWL_THING: &str = "http://www.w3.org/2002/07/owl#Thing";
