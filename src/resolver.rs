//! Public IP discovery through an IP-echo service.
//!
//! The resolver has no knowledge of hosts or credentials; it answers one
//! question per call: what address does the outside world see?

use std::net::IpAddr;

use http::header::USER_AGENT;
use http::{HeaderValue, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{Instrument, Span};
use url::Url;

use crate::transport::{HttpClient, HttpError, HttpRequest};

/// Error type for public IP lookups.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The request did not produce a response.
    #[error("IP lookup request failed: {0}")]
    Http(#[from] HttpError),

    /// The echo service answered with a non-2xx status.
    #[error("IP lookup failed with status code {}", .0.as_u16())]
    Status(StatusCode),

    /// The response body did not contain an IP address.
    #[error("IP lookup returned an invalid address: {body:?}")]
    InvalidAddress {
        /// Response body, trimmed
        body: String,
    },
}

/// Oracle for the caller's current public address.
///
/// One network call per invocation and no retry: a failed lookup is retried
/// on the next reconcile pass.
pub trait IpResolver: Send + Sync {
    /// Looks up the public IP address.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] on transport failure, a non-2xx status,
    /// or a body that does not hold an IP address.
    fn resolve(
        &self,
        span: &Span,
    ) -> impl std::future::Future<Output = Result<IpAddr, ResolveError>> + Send;
}

/// JSON form returned by some echo services, e.g. `{"ip": "203.0.113.7", ...}`.
#[derive(Deserialize)]
struct EchoBody {
    ip: String,
}

/// [`IpResolver`] backed by an HTTP IP-echo service.
///
/// Accepts either a bare address (surrounding whitespace is trimmed) or a
/// JSON object with an `ip` field.
#[derive(Debug, Clone)]
pub struct EchoResolver<H> {
    client: H,
    url: Url,
    user_agent: HeaderValue,
}

impl<H> EchoResolver<H> {
    /// Creates a resolver querying `url` through `client`.
    #[must_use]
    pub const fn new(client: H, url: Url, user_agent: HeaderValue) -> Self {
        Self {
            client,
            url,
            user_agent,
        }
    }

    /// Returns the echo service URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

/// Extracts the address from an echo service response body.
fn parse_echo_body(body: &str) -> Result<IpAddr, ResolveError> {
    let trimmed = body.trim();

    let candidate = if trimmed.starts_with('{') {
        serde_json::from_str::<EchoBody>(trimmed)
            .map(|echo| echo.ip)
            .map_err(|_| ResolveError::InvalidAddress {
                body: trimmed.to_string(),
            })?
    } else {
        trimmed.to_string()
    };

    candidate
        .trim()
        .parse()
        .map_err(|_| ResolveError::InvalidAddress {
            body: trimmed.to_string(),
        })
}

impl<H: HttpClient> IpResolver for EchoResolver<H> {
    async fn resolve(&self, span: &Span) -> Result<IpAddr, ResolveError> {
        let request =
            HttpRequest::get(self.url.clone()).with_header(USER_AGENT, self.user_agent.clone());

        let response = self
            .client
            .request(request)
            .instrument(span.clone())
            .await?;

        if !response.is_success() {
            return Err(ResolveError::Status(response.status));
        }

        parse_echo_body(&response.body_text())
    }
}
