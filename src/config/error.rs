//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

use crate::transport::HttpError;

/// Error type for configuration operations.
///
/// Every variant is fatal: the process reports it and exits before
/// scheduling the first reconcile pass.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to parse a JSON configuration.
    #[error("Failed to parse JSON config: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid duration value.
    #[error("Invalid duration for {field}: {reason}")]
    InvalidDuration {
        /// Name of the field
        field: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// A host entry is incomplete.
    #[error("Invalid host entry #{index}: {reason}")]
    InvalidHost {
        /// Zero-based position in the host list
        index: usize,
        /// Reason for invalidity
        reason: String,
    },

    /// The User-Agent cannot be sent as a header value.
    #[error("Invalid user agent '{value}': {reason}")]
    InvalidUserAgent {
        /// The rejected value
        value: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Invalid URL provided.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },

    /// The HTTP transport could not be created.
    #[error("Failed to set up HTTP transport: {0}")]
    Transport(#[source] HttpError),
}

/// Well-known field names for `MissingRequired` errors.
pub mod field {
    /// The configuration file path.
    pub const CONFIG: &str = "config";
    /// The host list.
    pub const HOSTS: &str = "hosts";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
