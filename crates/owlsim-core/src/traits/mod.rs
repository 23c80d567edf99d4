//! Capability traits consumed by the similarity core.
//! The ontology graph and reasoner are external collaborators; the core only
//! relies on these contracts.

pub mod cancellation;
pub mod ontology;
pub mod reasoner;

pub use cancellation::{Cancellable, CancellationToken};
pub use ontology::{OntologyGraph, OntologyWriter};
pub use reasoner::{EquivalenceNode, Reasoner};
