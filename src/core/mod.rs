// src/core/mod.rs
//! Configuration and backend access

pub mod config_manager;
pub mod service_client;

pub use config_manager::{ApiConfig, ConfigManager, LoggingConfig};
pub use service_client::{ApplyToJobRequest, BoardClient, CandidateLookup};
