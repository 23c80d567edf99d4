//! Kinds of ontology objects.

use serde::{Deserialize, Serialize};

/// What an `ObjectId` denotes in the source ontology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// A named class.
    Class,
    /// A named individual (gene, organism, disease).
    Individual,
    /// An object property used on existential edges.
    Property,
    /// A named class declared by the LCS engine as the intersection of its operands.
    Intersection,
}

impl ObjectKind {
    /// Classes and synthesized intersections both behave as classes.
    pub fn is_class_like(&self) -> bool {
        matches!(self, Self::Class | Self::Intersection)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Individual => "individual",
            Self::Property => "property",
            Self::Intersection => "intersection",
        }
    }
}
