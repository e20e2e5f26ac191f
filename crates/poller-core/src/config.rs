//! Poller configuration.
//!
//! Loads the query-layer settings from a TOML file. Default location:
//! /etc/poller/poller.toml
//!
//! ```toml
//! protocol_version = 2
//! retry_count = 1
//! timeout_secs = 1
//! translation_path = "/etc/poller/translation.json"
//! ```

use crate::error::{PollerError, PollerResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Default configuration file location.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/poller/poller.toml";

/// Upper bound accepted for `retry_count`.
const MAX_RETRY_COUNT: u32 = 10;

/// SNMP protocol version, written as `1`, `2` or `3` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SnmpVersion {
    V1,
    #[default]
    V2c,
    V3,
}

impl TryFrom<u8> for SnmpVersion {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(SnmpVersion::V1),
            2 => Ok(SnmpVersion::V2c),
            3 => Ok(SnmpVersion::V3),
            other => Err(format!("unsupported SNMP version {}", other)),
        }
    }
}

impl From<SnmpVersion> for u8 {
    fn from(version: SnmpVersion) -> Self {
        match version {
            SnmpVersion::V1 => 1,
            SnmpVersion::V2c => 2,
            SnmpVersion::V3 => 3,
        }
    }
}

/// Settings handed to the query layer, plus the dataset override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollerConfig {
    /// SNMP protocol version
    #[serde(default)]
    pub protocol_version: SnmpVersion,

    /// Retries per request
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Replaces the bundled translation dataset when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_path: Option<PathBuf>,
}

fn default_retry_count() -> u32 {
    1
}

fn default_timeout_secs() -> u64 {
    1
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            protocol_version: SnmpVersion::default(),
            retry_count: default_retry_count(),
            timeout_secs: default_timeout_secs(),
            translation_path: None,
        }
    }
}

impl PollerConfig {
    /// Load configuration from file, falling back to defaults if file not found
    pub fn load_or_default(path: impl AsRef<Path>) -> PollerResult<Self> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => {
                let config = toml::from_str(&content).map_err(|e| {
                    PollerError::configuration(format!(
                        "Failed to parse config file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("Config file {} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(PollerError::Io(e)),
        }
    }

    /// Load from default location or defaults
    pub fn load() -> PollerResult<Self> {
        Self::load_or_default(DEFAULT_CONFIG_PATH)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> PollerResult<()> {
        if self.timeout_secs == 0 {
            return Err(PollerError::configuration("timeout_secs must be > 0"));
        }

        if self.retry_count > MAX_RETRY_COUNT {
            return Err(PollerError::configuration(format!(
                "retry_count must be <= {}",
                MAX_RETRY_COUNT
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = PollerConfig::default();
        assert_eq!(config.protocol_version, SnmpVersion::V2c);
        assert_eq!(config.retry_count, 1);
        assert_eq!(config.timeout(), Duration::from_secs(1));
        assert!(config.translation_path.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(PollerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = PollerConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_retry_bound() {
        let config = PollerConfig {
            retry_count: 11,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_deserialization() {
        let toml_str = r#"
protocol_version = 3
timeout_secs = 5
"#;
        let config: PollerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.protocol_version, SnmpVersion::V3);
        assert_eq!(config.timeout_secs, 5);
        // Unspecified values should use defaults
        assert_eq!(config.retry_count, 1);
    }

    #[test]
    fn test_toml_rejects_unknown_version() {
        assert!(toml::from_str::<PollerConfig>("protocol_version = 4").is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string(&PollerConfig::default()).unwrap();
        assert!(toml_str.contains("protocol_version = 2"));
        assert!(!toml_str.contains("translation_path"));
    }

    #[test]
    fn test_load_nonexistent_file_defaults() {
        let config = PollerConfig::load_or_default("/nonexistent/poller.toml").unwrap();
        assert_eq!(config, PollerConfig::default());
    }
}
