//! Error types for the poller core.
//!
//! Only loading steps can fail: the translation dataset, the configuration file
//! and captured snapshots. Identity resolution and interface aggregation never
//! return errors; missing or malformed data degrades to absent fields instead.

use std::io;
use thiserror::Error;

/// Result type alias for poller operations.
pub type PollerResult<T> = Result<T, PollerError>;

/// Errors that can occur while loading poller inputs.
#[derive(Debug, Error)]
pub enum PollerError {
    /// Configuration file could not be parsed or failed validation.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Translation dataset is malformed.
    #[error("Invalid translation dataset {source_name}: {message}")]
    Dataset {
        /// Where the dataset came from (file path or `bundled`).
        source_name: String,
        /// What was wrong with it.
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PollerError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates a dataset validation error.
    pub fn dataset(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dataset {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
