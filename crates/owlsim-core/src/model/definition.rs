//! Logical (genus-differentia) class definitions.

use serde::{Deserialize, Serialize};

use crate::types::{ObjectId, SmallVec4};

/// An existential restriction `property some filler`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Restriction {
    pub property: ObjectId,
    pub filler: ObjectId,
}

/// `C EquivalentTo genus_1 and ... and (p_1 some f_1) and ...`.
///
/// Synthesized LCS classes are definitions with genus operands only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogicalDefinition {
    pub genus: SmallVec4<ObjectId>,
    pub differentia: SmallVec4<Restriction>,
}

impl LogicalDefinition {
    /// A pure intersection of named classes. Operands are sorted and deduplicated.
    pub fn intersection_of(operands: &[ObjectId]) -> Self {
        let mut genus: SmallVec4<ObjectId> = operands.iter().copied().collect();
        genus.sort_unstable();
        genus.dedup();
        Self {
            genus,
            differentia: SmallVec4::new(),
        }
    }

    /// True when the definition has no differentia.
    pub fn is_pure_intersection(&self) -> bool {
        self.differentia.is_empty()
    }

    /// Sorted copy used to compare definitions structurally.
    pub fn canonical(&self) -> Self {
        let mut genus = self.genus.clone();
        genus.sort_unstable();
        genus.dedup();
        let mut differentia = self.differentia.clone();
        differentia.sort_unstable();
        differentia.dedup();
        Self { genus, differentia }
    }
}
