//! Mapping of provider responses to semantic outcomes.

use std::fmt;

use http::StatusCode;

/// Result of one host update, as far as the provider is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The record already held the address (`nochg`).
    Unchanged,
    /// The record was changed to the address (`good`).
    Updated,
    /// The update did not succeed.
    Failed {
        /// Status line or raw provider body explaining the failure
        detail: String,
    },
}

impl Outcome {
    /// Creates a failed outcome.
    pub fn failed(detail: impl Into<String>) -> Self {
        Self::Failed {
            detail: detail.into(),
        }
    }

    /// Returns true for [`Outcome::Failed`].
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => f.write_str("nochange"),
            Self::Updated => f.write_str("good"),
            Self::Failed { detail } => write!(f, "failed: {detail}"),
        }
    }
}

/// Classifies a provider response.
///
/// Any status of 300 or above fails regardless of the body. Otherwise the
/// body is searched, case-sensitively, for `good` and then `nochg`; anything
/// else fails with the raw body as detail.
///
/// # Example
///
/// ```
/// use ddns_sync::provider::{Outcome, classify};
/// use http::StatusCode;
///
/// assert_eq!(classify(StatusCode::OK, b"good 1.2.3.4"), Outcome::Updated);
/// assert_eq!(
///     classify(StatusCode::FOUND, b"good"),
///     Outcome::failed("http status 302"),
/// );
/// ```
#[must_use]
pub fn classify(status: StatusCode, body: &[u8]) -> Outcome {
    if status.as_u16() >= 300 {
        return Outcome::failed(format!("http status {}", status.as_u16()));
    }

    let body = String::from_utf8_lossy(body);

    if body.contains("good") {
        Outcome::Updated
    } else if body.contains("nochg") {
        Outcome::Unchanged
    } else {
        Outcome::failed(body)
    }
}

/// Known dyndns2 response codes.
///
/// Only used to explain failures; [`classify`] alone decides the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderCode {
    /// Update applied.
    Good,
    /// Address already set.
    NoChange,
    /// Hostname does not exist or has no dynamic DNS enabled.
    NoHost,
    /// Wrong username/password for the host.
    BadAuth,
    /// Hostname is not fully qualified.
    NotFqdn,
    /// Missing or rejected User-Agent.
    BadAgent,
    /// Updates blocked for abuse.
    Abuse,
    /// Provider-side error (`911`).
    ServerError,
    /// Too many hosts in one request.
    NumHost,
    /// Provider DNS error.
    DnsError,
}

impl ProviderCode {
    /// Recognises the code at the start of a response body.
    #[must_use]
    pub fn from_body(body: &str) -> Option<Self> {
        let token = body.split_whitespace().next()?;

        let code = match token {
            "good" => Self::Good,
            "nochg" => Self::NoChange,
            "nohost" => Self::NoHost,
            "badauth" => Self::BadAuth,
            "notfqdn" => Self::NotFqdn,
            "badagent" => Self::BadAgent,
            "abuse" => Self::Abuse,
            "911" => Self::ServerError,
            "numhost" => Self::NumHost,
            "dnserr" => Self::DnsError,
            _ => return None,
        };

        Some(code)
    }

    /// Human-readable explanation of the code.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Good => "The update was successful",
            Self::NoChange => "The supplied IP address is already set for this host",
            Self::NoHost => "The hostname does not exist or does not have Dynamic DNS enabled",
            Self::BadAuth => "The username/password combination is not valid for the host",
            Self::NotFqdn => "The supplied hostname is not a fully-qualified domain name",
            Self::BadAgent => "The request was rejected because of a missing or bad user agent",
            Self::Abuse => "Dynamic DNS access for the hostname has been blocked due to abuse",
            Self::ServerError => "An error happened on the provider's end, wait before retrying",
            Self::NumHost => "Too many hosts were specified in one update",
            Self::DnsError => "The provider reported a DNS error",
        }
    }
}
