//! # track-collect
//!
//! Metrics collection pipeline for slurmtrack.
//!
//! This crate provides:
//! - Defensive invocation of external tools (`squeue`, `nvidia-smi`)
//! - Parsing of their delimited text output into typed rows
//! - Three collectors that normalize raw rows into the data model
//! - An aggregator that merges all collectors into one [`Snapshot`]
//!
//! Collectors degrade to an empty result on any failure of their source:
//! a transiently unreachable scheduler or an absent GPU tool must never
//! blank the whole snapshot. The host-resource collector is the exception;
//! OS counters are assumed always available and it has no failure path.
//!
//! [`Snapshot`]: track_core::Snapshot

use thiserror::Error;

pub mod aggregate;
pub mod command;
pub mod gpu;
pub mod host;
pub mod slurm;
pub mod table;

// Canned runners and tool output samples for tests
#[cfg(test)]
pub(crate) mod mock;

// Re-export main types
pub use aggregate::Aggregator;
pub use command::{CommandRunner, ShellRunner};
pub use gpu::GpuCollector;
pub use host::HostCollector;
pub use slurm::SlurmCollector;
pub use table::{Header, Row};

/// Result type for collection operations
pub type Result<T> = std::result::Result<T, CollectError>;

/// Errors that can occur in the collection pipeline
#[derive(Debug, Error)]
pub enum CollectError {
    /// External tool exited non-zero or could not be spawned
    #[error("command `{command}` failed: {stderr}")]
    Command { command: String, stderr: String },

    /// Tabular text did not match the expected column count or header
    #[error("malformed tabular output: {0}")]
    Parse(String),

    /// A field could not be normalized to the required numeric type
    #[error("invalid value: {0}")]
    Value(String),
}

impl CollectError {
    /// Create a parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a value error
    pub fn value(msg: impl Into<String>) -> Self {
        Self::Value(msg.into())
    }

    /// Check if this error came from the external tool itself rather than
    /// from its output
    pub fn is_command_failure(&self) -> bool {
        matches!(self, CollectError::Command { .. })
    }
}
