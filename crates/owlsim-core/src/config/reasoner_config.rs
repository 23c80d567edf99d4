//! Reasoner invocation configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReasonerConfig {
    /// Classification timeout in seconds. Default: 600.
    pub timeout_secs: Option<u64>,
}

impl ReasonerConfig {
    pub fn effective_timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .unwrap_or(constants::DEFAULT_REASONER_TIMEOUT_SECS),
        )
    }
}
