//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::BTreeMap;

/// SmallVec for LCS member lists and definition operands (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;

/// SmallVec for equivalence nodes (usually a single class).
pub type SmallVec2<T> = SmallVec<[T; 2]>;
