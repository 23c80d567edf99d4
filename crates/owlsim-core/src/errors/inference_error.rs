//! Annotation inference errors.

use super::error_code::{self, OwlSimErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("Unknown annotation class: {iri}")]
    UnknownClass { iri: String },

    #[error("Unknown bioentity: {id}")]
    UnknownBioentity { id: String },
}

impl OwlSimErrorCode for InferenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownClass { .. } => error_code::UNKNOWN_ATTRIBUTE,
            Self::UnknownBioentity { .. } => error_code::INFERENCE_ERROR,
        }
    }
}
