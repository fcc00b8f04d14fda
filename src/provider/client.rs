//! Per-host update requests.

use std::net::IpAddr;

use data_encoding::BASE64;
use http::HeaderValue;
use http::header::{AUTHORIZATION, USER_AGENT};
use tracing::{Instrument, Span};
use url::Url;

use crate::config::Host;
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Issues the provider's update request for one host.
///
/// Implementations return the raw response; classification is done by
/// [`classify`](super::classify). One call is made per host per reconcile
/// pass, and calls for different hosts run concurrently on the same value.
pub trait UpdateClient: Send + Sync {
    /// Asks the provider to point `host` at `ip`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when no response was received, including when
    /// the per-request timeout elapses.
    fn update(
        &self,
        span: &Span,
        host: &Host,
        ip: IpAddr,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// dyndns2 update client.
///
/// Sends `GET <endpoint>?hostname=<host>&myip=<ip>` with HTTP Basic
/// authentication and a User-Agent header. The provider answers `badagent`
/// when the User-Agent is missing, so one is always set.
#[derive(Debug, Clone)]
pub struct DynDnsClient<H> {
    client: H,
    endpoint: Url,
    user_agent: HeaderValue,
}

impl<H> DynDnsClient<H> {
    /// Creates an update client for `endpoint`.
    #[must_use]
    pub const fn new(client: H, endpoint: Url, user_agent: HeaderValue) -> Self {
        Self {
            client,
            endpoint,
            user_agent,
        }
    }

    /// Returns the update endpoint.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Builds the update request for `host`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidHeader`] if the credentials cannot be
    /// encoded as a header value.
    pub fn build_request(&self, host: &Host, ip: IpAddr) -> Result<HttpRequest, HttpError> {
        Ok(HttpRequest::get(self.endpoint.clone())
            .with_query("hostname", &host.hostname)
            .with_query("myip", &ip.to_string())
            .with_header(AUTHORIZATION, basic_auth(host)?)
            .with_header(USER_AGENT, self.user_agent.clone()))
    }
}

/// Encodes `user:password` as a Basic authorization header value.
fn basic_auth(host: &Host) -> Result<HeaderValue, HttpError> {
    let credentials = format!("{}:{}", host.user, host.password);
    let encoded = BASE64.encode(credentials.as_bytes());

    let mut value = HeaderValue::from_str(&format!("Basic {encoded}"))
        .map_err(|e| HttpError::InvalidHeader(e.to_string()))?;
    value.set_sensitive(true);

    Ok(value)
}

impl<H: HttpClient> UpdateClient for DynDnsClient<H> {
    async fn update(
        &self,
        span: &Span,
        host: &Host,
        ip: IpAddr,
    ) -> Result<HttpResponse, HttpError> {
        let request = self.build_request(host, ip)?;

        self.client.request(request).instrument(span.clone()).await
    }
}
