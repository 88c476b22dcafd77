//! # track-core
//!
//! Shared foundation for slurmtrack: the typed metrics data model, the
//! daemon configuration, and the common error type.
//!
//! This crate has no knowledge of how metrics are gathered or served; it
//! only defines the values that flow between the collectors and the HTTP
//! layer.

pub mod config;
pub mod error;
pub mod types;

// Re-export main types
pub use config::{LoggingConfig, MonitoringConfig, SecurityConfig, ServerConfig, TrackerConfig};
pub use error::{Error, Result};
pub use types::{GpuRecord, JobRecord, Snapshot, SystemStats};
