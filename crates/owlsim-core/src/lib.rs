//! # owlsim-core
//!
//! Foundation crate for the owlsim similarity engine.
//! Defines the ontology model, the capability traits consumed by the engine
//! (graph, writer, reasoner, cancellation), errors, config, tracing, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod model;
pub mod tracing;
pub mod traits;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::OwlSimConfig;
pub use errors::{BatchResult, OwlSimError};
pub use model::{Edge, LogicalDefinition, ObjectKind, Predicate, Restriction};
pub use traits::{OntologyGraph, OntologyWriter, Reasoner};
pub use types::{FxHashMap, FxHashSet, IriInterner, ObjectId};
