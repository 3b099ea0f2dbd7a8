//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load TOML configuration files
//! for the Pulse binaries.
//!
//! # Usage
//!
//! ```rust,no_run
//! use pulse_common::config::{ChannelConfig, ConfigError, ConfigLoader};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = ChannelConfig::load(Path::new("pulse.toml"))?;
//!     config.validate()?;
//!     println!("Channel: {}", config.channel);
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::consts::{DEFAULT_CHANNEL_NAME, DEFAULT_CONSUMER_PERIOD_MS, DEFAULT_PRODUCER_PERIOD_MS};

/// Error type for configuration loading operations.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// The `tracing` env-filter directive equivalent of this level.
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Configuration for one sample channel and the loops driving it.
///
/// # TOML Example
///
/// ```toml
/// channel = "samples"
/// log_level = "debug"
///
/// [cadence]
/// producer_period_ms = 100
/// consumer_period_ms = 20
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Channel name; all OS-visible names are derived from it.
    #[serde(default = "default_channel_name")]
    pub channel: String,

    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Cycle periods for the producer and consumer loops.
    #[serde(default)]
    pub cadence: Cadence,
}

/// Cycle periods for the demonstration loops, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cadence {
    /// Producer write period.
    #[serde(default = "default_producer_period_ms")]
    pub producer_period_ms: u64,

    /// Consumer poll period.
    #[serde(default = "default_consumer_period_ms")]
    pub consumer_period_ms: u64,
}

fn default_channel_name() -> String {
    DEFAULT_CHANNEL_NAME.to_string()
}

fn default_producer_period_ms() -> u64 {
    DEFAULT_PRODUCER_PERIOD_MS
}

fn default_consumer_period_ms() -> u64 {
    DEFAULT_CONSUMER_PERIOD_MS
}

impl Default for Cadence {
    fn default() -> Self {
        Self {
            producer_period_ms: DEFAULT_PRODUCER_PERIOD_MS,
            consumer_period_ms: DEFAULT_CONSUMER_PERIOD_MS,
        }
    }
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            channel: default_channel_name(),
            log_level: LogLevel::default(),
            cadence: Cadence::default(),
        }
    }
}

impl ChannelConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if:
    /// - `channel` is empty or contains a path separator
    /// - either cadence period is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel.is_empty() {
            return Err(ConfigError::ValidationError(
                "channel cannot be empty".to_string(),
            ));
        }
        if self.channel.contains('/') {
            return Err(ConfigError::ValidationError(format!(
                "channel '{}' must not contain '/'",
                self.channel
            )));
        }
        if self.cadence.producer_period_ms == 0 || self.cadence.consumer_period_ms == 0 {
            return Err(ConfigError::ValidationError(
                "cadence periods must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn log_level_default() {
        assert_eq!(LogLevel::default(), LogLevel::Info);
    }

    #[test]
    fn defaults_validate() {
        let config = ChannelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.channel, "samples");
        assert_eq!(config.cadence.producer_period_ms, 100);
        assert_eq!(config.cadence.consumer_period_ms, 20);
    }

    #[test]
    fn load_from_toml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "channel = \"bench\"\nlog_level = \"debug\"\n\n[cadence]\nproducer_period_ms = 50\nconsumer_period_ms = 10"
        )
        .unwrap();

        let config = ChannelConfig::load(file.path()).unwrap();
        assert_eq!(config.channel, "bench");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.cadence.producer_period_ms, 50);
        assert_eq!(config.cadence.consumer_period_ms, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "channel = \"partial\"").unwrap();

        let config = ChannelConfig::load(file.path()).unwrap();
        assert_eq!(config.channel, "partial");
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.cadence.consumer_period_ms, 20);
    }

    #[test]
    fn missing_file_is_not_found() {
        let result = ChannelConfig::load(Path::new("/nonexistent/pulse.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound)));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "channel = [not toml").unwrap();

        let result = ChannelConfig::load(file.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn validation_rejects_bad_names() {
        let mut config = ChannelConfig::default();
        config.channel = String::new();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        config.channel = "a/b".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn validation_rejects_zero_cadence() {
        let mut config = ChannelConfig::default();
        config.cadence.producer_period_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
