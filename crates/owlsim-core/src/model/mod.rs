//! Ontology model: object kinds, typed edges, and logical definitions.

pub mod definition;
pub mod edge;
pub mod object;

pub use definition::{LogicalDefinition, Restriction};
pub use edge::{Edge, Predicate};
pub use object::ObjectKind;
