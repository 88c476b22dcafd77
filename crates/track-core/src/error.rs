//! Error handling for slurmtrack
//!
//! Provides the error and result types shared by the configuration layer
//! and the daemon. The collection pipeline carries its own error taxonomy
//! in `track-collect`.

/// Result type alias for slurmtrack operations
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for slurmtrack
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    InvalidConfiguration(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::InvalidConfiguration(_) => "configuration",
            Error::Io(_) => "io",
            Error::Yaml(_) => "yaml",
        }
    }
}
