//! Configuration for the slurmtrack daemon
//!
//! One [`TrackerConfig`] is loaded at process start and passed by reference
//! into the server and the aggregator; nothing reads configuration from
//! ambient global state.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

/// Complete configuration for the slurmtrack daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// API access configuration
    pub security: SecurityConfig,

    /// Metrics collection configuration
    pub monitoring: MonitoringConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address for the HTTP server
    pub host: String,

    /// Bind port for the HTTP server
    pub port: u16,
}

/// API access configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Shared-secret API key required on `/api` routes.
    ///
    /// When unset, the API is open; the dashboard itself never needs a key.
    pub api_key: Option<String>,
}

/// Metrics collection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Refresh cadence of the dashboard page in seconds.
    ///
    /// The collection core is stateless and does not self-schedule; this
    /// value only drives how often the presentation layer re-polls.
    pub poll_interval_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl TrackerConfig {
    /// Load configuration from a YAML file and validate it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Write this configuration to a YAML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::config("server.port must be non-zero"));
        }
        self.server.host.parse::<IpAddr>().map_err(|_| {
            Error::config(format!(
                "server.host is not a valid IP address: {}",
                self.server.host
            ))
        })?;
        if self.monitoring.poll_interval_seconds == 0 {
            return Err(Error::config(
                "monitoring.poll_interval_seconds must be at least 1",
            ));
        }
        if let Some(key) = &self.security.api_key {
            if key.is_empty() {
                return Err(Error::config(
                    "security.api_key must not be empty; omit the key to disable authentication",
                ));
            }
        }
        match self.logging.format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(Error::config(format!(
                    "logging.format must be \"text\" or \"json\", got \"{other}\""
                )));
            }
        }
        Ok(())
    }

    /// Get the bind address for the HTTP server
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.server.host.parse().map_err(|_| {
            Error::config(format!(
                "server.host is not a valid IP address: {}",
                self.server.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            security: SecurityConfig::default(),
            monitoring: MonitoringConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self { api_key: None }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            poll_interval_seconds: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}
