//! Reasoner implementations over [`crate::OntologyStore`].

pub mod structural;
pub mod timed;

pub use structural::StructuralReasoner;
pub use timed::TimedReasoner;
