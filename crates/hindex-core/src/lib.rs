//! Core domain types and configuration for the Humanity Index.
//!
//! Everything the scoring engine, the GDELT source, the CLI, and the server
//! share lives here: headline and event value objects, the engine tunables
//! loaded from `settings.yaml`, the source-reliability table loaded from
//! `sources.yaml`, and the process-level configuration read from env vars.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod reliability;
pub mod settings;
pub mod types;

pub use config::{load_app_config, load_app_config_from_env, AppConfig};
pub use error::ConfigError;
pub use reliability::{load_sources, ReliabilityMap, SourceEntry};
pub use settings::{load_settings, EngineConfig, HistoryConfig};
pub use types::{
    BiasBin, Component, HeadlineRecord, IndexPoint, ReliabilityEntry, ScoredEvent,
};
