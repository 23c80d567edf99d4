//! # owlsim-graph
//!
//! In-memory implementation of the ontology capabilities consumed by the
//! similarity core: a `petgraph` store of typed edges with closure over
//! composable predicates, a JSON document loader, a structural reasoner, and
//! a timeout wrapper for blocking classification.

pub mod builder;
pub mod closure;
pub mod document;
pub mod reasoner;
pub mod store;

pub use builder::OntologyBuilder;
pub use document::OntologyDocument;
pub use reasoner::{StructuralReasoner, TimedReasoner};
pub use store::OntologyStore;
