//! Spur-based ID type for interned ontology IRIs, plus the canonical pair key.
//!
//! An `ObjectId` is only meaningful relative to the interner (and therefore the
//! ontology store) that produced it.

use lasso::Spur;
use serde::{Deserialize, Serialize};

/// Interned IRI of a class, individual, property, or synthesized class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub Spur);

impl ObjectId {
    /// Create a new ID from a `Spur`.
    pub fn new(spur: Spur) -> Self {
        Self(spur)
    }

    /// Get the inner `Spur`.
    pub fn inner(self) -> Spur {
        self.0
    }
}

impl From<Spur> for ObjectId {
    fn from(spur: Spur) -> Self {
        Self(spur)
    }
}

impl From<ObjectId> for Spur {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

/// Unordered pair key: `PairKey::new(a, b) == PairKey::new(b, a)`.
///
/// Used to memoize symmetric per-pair results such as LCS sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    pub low: ObjectId,
    pub high: ObjectId,
}

impl PairKey {
    pub fn new(a: ObjectId, b: ObjectId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// True when both sides are the same object.
    pub fn is_reflexive(&self) -> bool {
        self.low == self.high
    }
}
