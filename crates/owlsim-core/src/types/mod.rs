//! Data structures and IRI interning for owlsim.
//! FxHashMap, SmallVec, lasso-based interning, Spur-based ID types.

pub mod collections;
pub mod identifiers;
pub mod interning;

pub use collections::{FxHashMap, FxHashSet, SmallVec2, SmallVec4};
pub use identifiers::{ObjectId, PairKey};
pub use interning::{identifier_from_iri, iri_from_identifier, IriInterner};
