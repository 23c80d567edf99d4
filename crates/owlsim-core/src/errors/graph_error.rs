//! Ontology graph errors.

use super::error_code::{self, OwlSimErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Unknown object: {iri}")]
    UnknownObject { iri: String },

    #[error("Unknown identifier: {identifier}")]
    UnknownIdentifier { identifier: String },

    #[error("{iri} is declared as a {existing}, cannot redeclare as a {requested}")]
    KindConflict {
        iri: String,
        existing: &'static str,
        requested: &'static str,
    },

    #[error("Invalid ontology document: {message}")]
    InvalidDocument { message: String },

    #[error("Failed to read {path}: {message}")]
    Io { path: String, message: String },

    #[error("Ontology store lock poisoned")]
    LockPoisoned,
}

impl OwlSimErrorCode for GraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownObject { .. } | Self::UnknownIdentifier { .. } => {
                error_code::UNKNOWN_OBJECT
            }
            Self::Io { .. } => error_code::IO_ERROR,
            _ => error_code::GRAPH_ERROR,
        }
    }
}
