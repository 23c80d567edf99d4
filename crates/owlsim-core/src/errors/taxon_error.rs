//! Taxon constraint errors.

use super::error_code::{self, OwlSimErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum TaxonError {
    #[error("Unknown class: {iri}")]
    UnknownClass { iri: String },

    #[error("Unknown taxon: {iri}")]
    UnknownTaxon { iri: String },

    #[error("Malformed matrix at line {line}: {message}")]
    MalformedMatrix { line: usize, message: String },

    #[error("Matrix I/O failed: {message}")]
    Io { message: String },
}

impl OwlSimErrorCode for TaxonError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedMatrix { .. } => error_code::MATRIX_FORMAT,
            Self::Io { .. } => error_code::IO_ERROR,
            _ => error_code::TAXON_ERROR,
        }
    }
}

impl From<std::io::Error> for TaxonError {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            message: e.to_string(),
        }
    }
}
