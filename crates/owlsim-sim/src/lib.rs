//! # owlsim-sim
//!
//! Semantic similarity over an ontology graph.
//!
//! A [`SimSession`] owns the memoization caches (closures, IC values, LCS
//! sets, pair scores) and the registry of synthesized LCS classes. The IC
//! model, LCS engine and scoring algorithms are implemented as methods on the
//! session; [`SearchEngine`] ranks candidates by attribute overlap and
//! [`AllPairsRunner`] runs cancellable all-pairs batches.

pub mod algorithm;
pub mod batch;
pub mod bma;
pub mod ic;
pub mod lcs;
pub mod render;
pub mod search;
pub mod session;
pub mod similarity;

pub use algorithm::{BmaMode, Metric, SimAlgorithm};
pub use batch::{AllPairsOutput, AllPairsRunner};
pub use render::{OwlAxiomRenderer, PairScoreRenderer, PairScores, TabRenderer};
pub use search::{SearchEngine, SearchHit};
pub use session::{SimOntology, SimSession};
pub use similarity::{BestMatch, Similarity, Witness};
