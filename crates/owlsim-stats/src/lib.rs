//! # owlsim-stats
//!
//! Statistics of information content over a reference population.
//!
//! [`ReferenceStats`] summarizes the IC of every reference entity's
//! attributes (overall and per top-level category). A candidate attribute
//! set is then compared against one reference entity through its relative
//! variance, one-sample t-test, one-way ANOVA and two-sample
//! Kolmogorov-Smirnov p-values, or binned into an IC [`Histogram`].

pub mod histogram;
pub mod reference;
pub mod significance;
pub mod summary;

pub use histogram::Histogram;
pub use reference::{EntityProfile, ReferenceStats};
pub use summary::SummaryStats;
