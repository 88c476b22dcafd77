//! # track-agent
//!
//! The slurmtrack daemon (trackd).
//!
//! Wires the collection pipeline from `track-collect` to a small HTTP
//! surface: the JSON metrics API, a health probe, and a self-refreshing
//! dashboard page. Also owns logging initialization and the command-line
//! entry point.

pub mod page;
pub mod server;

// Re-export commonly used types
pub use server::DashboardServer;

// Error handling
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Core error: {0}")]
    Core(#[from] track_core::Error),
}

pub type Result<T> = std::result::Result<T, AgentError>;

/// Initialize logging from the daemon configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_logging(config: &track_core::LoggingConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match config.format.as_str() {
        "json" => subscriber.json().init(),
        _ => subscriber.init(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AgentError::Config("bad port".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad port");
    }

    #[test]
    fn test_core_error_conversion() {
        let err: AgentError = track_core::Error::config("bad host").into();
        assert!(matches!(err, AgentError::Core(_)));
    }
}
