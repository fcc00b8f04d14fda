//! Configuration file parsing.
//!
//! The file is TOML unless its extension is `.json`.

use std::path::Path;

use serde::Deserialize;

use super::{ConfigError, Host};

/// Root structure of the configuration file.
///
/// Scalar fields are optional so that defaults and CLI overrides can be
/// applied during validation.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Seconds between reconcile passes
    pub interval: Option<u64>,

    /// IP-echo service URL
    pub ip_url: Option<String>,

    /// User-Agent header sent to the provider
    pub user_agent: Option<String>,

    /// Hosts to keep updated, in order
    #[serde(default)]
    pub hosts: Vec<Host>,
}

impl FileConfig {
    /// Loads configuration from a file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse(&content)
        }
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid.
    pub fn parse_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# ddns-sync configuration file

# Seconds between reconcile passes (default: 300)
interval = 300

# Service that echoes the caller's public IP (plain text or {"ip": "..."})
# ip_url = "https://ifconfig.me/ip"

# User-Agent sent to the DDNS provider; must not be empty
# user_agent = "ddns-sync/0.1.0"

# One [[hosts]] table per DDNS record. Use the generated credentials
# shown by the provider for that record.
[[hosts]]
host = "home.example.com"
user = "generated-user"
password = "generated-password"

# [[hosts]]
# host = "vpn.example.com"
# user = "another-user"
# password = "another-password"
"#
    .to_string()
}
