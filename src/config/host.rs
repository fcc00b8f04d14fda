//! DDNS host credentials.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A DDNS record to keep in sync, with the credentials the provider issued for it.
///
/// Identity is the hostname, but hosts are never deduplicated: two entries
/// with the same hostname are updated independently.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Host {
    /// Fully-qualified hostname of the record
    #[serde(rename = "host")]
    pub hostname: String,

    /// Provider-generated username
    pub user: String,

    /// Provider-generated password
    pub password: String,
}

impl Host {
    /// Creates a host entry.
    pub fn new(
        hostname: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            hostname: hostname.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Returns a description of the first missing credential, if any.
    pub(crate) fn incomplete_reason(&self) -> Option<&'static str> {
        if self.hostname.trim().is_empty() {
            Some("host is empty")
        } else if self.user.is_empty() {
            Some("user is empty")
        } else if self.password.is_empty() {
            Some("password is empty")
        } else {
            None
        }
    }
}

// Credentials must not leak into logs.
impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("hostname", &self.hostname)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hostname)
    }
}
