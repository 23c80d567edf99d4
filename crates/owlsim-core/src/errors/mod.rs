//! Error handling for owlsim.
//! One error enum per subsystem, `thiserror` only.

pub mod batch;
pub mod config_error;
pub mod error_code;
pub mod graph_error;
pub mod inference_error;
pub mod reasoner_error;
pub mod sim_error;
pub mod stats_error;
pub mod taxon_error;

pub use batch::{BatchResult, OwlSimError};
pub use config_error::ConfigError;
pub use error_code::OwlSimErrorCode;
pub use graph_error::GraphError;
pub use inference_error::InferenceError;
pub use reasoner_error::ReasonerError;
pub use sim_error::SimError;
pub use stats_error::StatsError;
pub use taxon_error::TaxonError;
