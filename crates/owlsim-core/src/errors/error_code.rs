//! OwlSimErrorCode trait: stable error codes for callers and batch manifests.

/// Every error enum implements this to provide a structured error code string.
pub trait OwlSimErrorCode {
    /// Returns the error code string (e.g., "UNKNOWN_ATTRIBUTE").
    fn error_code(&self) -> &'static str;

    /// Returns `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const GRAPH_ERROR: &str = "GRAPH_ERROR";
pub const UNKNOWN_OBJECT: &str = "UNKNOWN_OBJECT";
pub const UNKNOWN_ATTRIBUTE: &str = "UNKNOWN_ATTRIBUTE";
pub const UNKNOWN_ALGORITHM: &str = "UNKNOWN_ALGORITHM";
pub const SIM_ERROR: &str = "SIM_ERROR";
pub const TAXON_ERROR: &str = "TAXON_ERROR";
pub const MATRIX_FORMAT: &str = "MATRIX_FORMAT";
pub const REFERENCE_NOT_FOUND: &str = "REFERENCE_NOT_FOUND";
pub const STATS_ERROR: &str = "STATS_ERROR";
pub const REASONER_TIMEOUT: &str = "REASONER_TIMEOUT";
pub const REASONER_ERROR: &str = "REASONER_ERROR";
pub const INFERENCE_ERROR: &str = "INFERENCE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const CANCELLED: &str = "CANCELLED";
