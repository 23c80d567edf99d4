//! Similarity engine errors.

use super::error_code::{self, OwlSimErrorCode};
use super::GraphError;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// Attribute not in the ontology signature (retired or obsolete term).
    #[error("Unknown attribute: {iri}")]
    UnknownAttribute { iri: String },

    #[error("Unknown comparison property: {iri}")]
    UnknownProperty { iri: String },

    #[error("Unknown similarity algorithm: {name}")]
    UnknownAlgorithm { name: String },

    #[error("Entity {iri} has no attributes")]
    NoAttributes { iri: String },

    #[error("Failed to synthesize LCS class for {operands:?}: {source}")]
    Synthesis {
        operands: Vec<String>,
        #[source]
        source: GraphError,
    },

    #[error("Render failed: {message}")]
    Render { message: String },
}

impl OwlSimErrorCode for SimError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAttribute { .. } => error_code::UNKNOWN_ATTRIBUTE,
            Self::UnknownAlgorithm { .. } => error_code::UNKNOWN_ALGORITHM,
            Self::Render { .. } => error_code::IO_ERROR,
            _ => error_code::SIM_ERROR,
        }
    }
}
