//! Validated configuration after merging CLI and file sources.
//!
//! All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use http::HeaderValue;
use url::Url;

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, field};
use super::file::FileConfig;
use super::host::Host;

const CONFIG_HINT: &str = "Use --config to point at a configuration file";

/// Fully validated configuration ready for use by the application.
///
/// Immutable for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    /// Delay between the end of one reconcile pass and the start of the next
    pub interval: Duration,

    /// Hosts to update, in configuration order
    pub hosts: Vec<Host>,

    /// IP-echo service URL
    pub ip_url: Url,

    /// User-Agent header value
    pub user_agent: HeaderValue,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hosts = self
            .hosts
            .iter()
            .map(|h| h.hostname.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        write!(
            f,
            "Config {{ interval: {}s, hosts: [{}], ip_url: {}, user_agent: {} }}",
            self.interval.as_secs(),
            hosts,
            self.ip_url,
            self.user_agent.to_str().unwrap_or("<binary>"),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and an optional file config.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The interval is zero
    /// - No host is configured, or a host lacks a hostname, user or password
    /// - The IP-echo URL is invalid
    /// - The User-Agent is empty or not a valid header value
    pub fn from_raw(cli: &Cli, file: Option<&FileConfig>) -> Result<Self, ConfigError> {
        let interval = Self::resolve_interval(cli, file)?;
        let hosts = Self::resolve_hosts(file)?;
        let ip_url = Self::resolve_ip_url(cli, file)?;
        let user_agent = Self::resolve_user_agent(file)?;

        Ok(Self {
            interval,
            hosts,
            ip_url,
            user_agent,
            verbose: cli.verbose,
        })
    }

    /// Loads the file named by `--config` and validates the merged result.
    ///
    /// # Errors
    ///
    /// Returns an error if `--config` is absent, the file cannot be read or
    /// parsed, or the merged configuration is invalid.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let Some(path) = &cli.config else {
            return Err(ConfigError::missing(field::CONFIG, CONFIG_HINT));
        };

        let file = FileConfig::load(path)?;
        Self::from_raw(cli, Some(&file))
    }

    fn resolve_interval(cli: &Cli, file: Option<&FileConfig>) -> Result<Duration, ConfigError> {
        // Priority: CLI explicit > file > default
        let seconds = cli
            .interval
            .or_else(|| file.and_then(|f| f.interval))
            .unwrap_or(defaults::INTERVAL_SECS);

        if seconds == 0 {
            return Err(ConfigError::InvalidDuration {
                field: "interval",
                reason: "must be greater than 0".to_string(),
            });
        }

        Ok(Duration::from_secs(seconds))
    }

    fn resolve_hosts(file: Option<&FileConfig>) -> Result<Vec<Host>, ConfigError> {
        let hosts = file.map(|f| f.hosts.clone()).unwrap_or_default();

        if hosts.is_empty() {
            return Err(ConfigError::missing(
                field::HOSTS,
                "Add at least one [[hosts]] entry to the config file",
            ));
        }

        for (index, host) in hosts.iter().enumerate() {
            if let Some(reason) = host.incomplete_reason() {
                return Err(ConfigError::InvalidHost {
                    index,
                    reason: reason.to_string(),
                });
            }
        }

        Ok(hosts)
    }

    fn resolve_ip_url(cli: &Cli, file: Option<&FileConfig>) -> Result<Url, ConfigError> {
        let url_str = cli
            .ip_url
            .as_deref()
            .or_else(|| file.and_then(|f| f.ip_url.as_deref()))
            .unwrap_or(defaults::IP_URL);

        parse_url(url_str)
    }

    fn resolve_user_agent(file: Option<&FileConfig>) -> Result<HeaderValue, ConfigError> {
        let value = file
            .and_then(|f| f.user_agent.as_deref())
            .unwrap_or(defaults::USER_AGENT);

        parse_user_agent(value)
    }
}

/// Parses a URL, mapping failures to [`ConfigError::InvalidUrl`].
pub fn parse_url(url_str: &str) -> Result<Url, ConfigError> {
    Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
        url: url_str.to_string(),
        reason: e.to_string(),
    })
}

/// Validates a User-Agent value. The provider answers `badagent` when it is missing.
pub fn parse_user_agent(value: &str) -> Result<HeaderValue, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidUserAgent {
            value: value.to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    HeaderValue::from_str(value).map_err(|e| ConfigError::InvalidUserAgent {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::file::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
