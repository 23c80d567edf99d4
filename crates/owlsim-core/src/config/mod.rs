//! Configuration system for owlsim.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod batch_config;
pub mod owlsim_config;
pub mod reasoner_config;
pub mod search_config;
pub mod sim_config;
pub mod stats_config;
pub mod taxon_config;

pub use batch_config::BatchConfig;
pub use owlsim_config::{ConfigOverrides, OwlSimConfig};
pub use reasoner_config::ReasonerConfig;
pub use search_config::SearchConfig;
pub use sim_config::SimConfig;
pub use stats_config::StatsConfig;
pub use taxon_config::TaxonConfig;
