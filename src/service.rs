//! Wiring of configuration into a running sync service.
//!
//! [`Service`] owns a [`Scheduler`] built from an [`EchoResolver`] and a
//! [`DynDnsClient`] that share one HTTP client.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::Span;
use url::Url;

use crate::config::{ConfigError, Host, ValidatedConfig, defaults, parse_url};
use crate::engine::{Reconciler, TickResult};
use crate::provider::DynDnsClient;
use crate::resolver::EchoResolver;
use crate::scheduler::{Cancelled, Scheduler};
use crate::telemetry::{Telemetry, TracingTelemetry};
use crate::transport::{HttpClient, ReqwestClient};

/// A configured DDNS sync loop.
///
/// # Type Parameters
///
/// - `H`: The [`HttpClient`] shared by IP lookup and record updates
/// - `T`: The [`Telemetry`] sink, [`TracingTelemetry`] by default
pub struct Service<H, T = TracingTelemetry> {
    scheduler: Scheduler<EchoResolver<H>, DynDnsClient<H>, T>,
}

impl Service<ReqwestClient> {
    /// Builds a service using a `reqwest` client with the default request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Transport`] if the HTTP client cannot be created.
    pub fn from_config(config: ValidatedConfig) -> Result<Self, ConfigError> {
        let timeout = defaults::request_timeout();
        let client = ReqwestClient::with_timeout(timeout).map_err(ConfigError::Transport)?;

        Self::builder(config, client).build()
    }
}

impl<H: Clone> Service<H> {
    /// Starts building a service around `client`.
    pub const fn builder(config: ValidatedConfig, client: H) -> ServiceBuilder<H> {
        ServiceBuilder {
            config,
            client,
            telemetry: TracingTelemetry,
            update_endpoint: None,
        }
    }
}

impl<H, T> Service<H, T> {
    /// Returns the hosts kept in sync, in configuration order.
    #[must_use]
    pub fn hosts(&self) -> &[Host] {
        self.scheduler.reconciler().hosts()
    }

    /// Returns the delay between passes.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.scheduler.interval()
    }

    /// Returns the provider update endpoint.
    #[must_use]
    pub fn update_endpoint(&self) -> &Url {
        self.scheduler.reconciler().updater().endpoint()
    }

    /// Returns the IP-echo URL.
    #[must_use]
    pub fn ip_url(&self) -> &Url {
        self.scheduler.reconciler().resolver().url()
    }
}

impl<H, T> Service<H, T>
where
    H: HttpClient + 'static,
    T: Telemetry + 'static,
{
    /// Runs passes until `cancel` fires. See [`Scheduler::run`].
    pub async fn run(&self, cancel: &CancellationToken) -> Cancelled {
        self.scheduler.run(cancel).await
    }

    /// Runs a single pass, reporting its error like the loop does.
    pub async fn execute(&self, parent: &Span) -> TickResult {
        self.scheduler.tick(parent).await
    }
}

/// Builder for [`Service`].
pub struct ServiceBuilder<H, T = TracingTelemetry> {
    config: ValidatedConfig,
    client: H,
    telemetry: T,
    update_endpoint: Option<Url>,
}

impl<H: Clone, T> ServiceBuilder<H, T> {
    /// Replaces the telemetry sink.
    pub fn with_telemetry<T2>(self, telemetry: T2) -> ServiceBuilder<H, T2> {
        ServiceBuilder {
            config: self.config,
            client: self.client,
            telemetry,
            update_endpoint: self.update_endpoint,
        }
    }

    /// Sends updates to `endpoint` instead of the provider default.
    #[must_use]
    pub fn with_update_endpoint(mut self, endpoint: Url) -> Self {
        self.update_endpoint = Some(endpoint);
        self
    }

    /// Builds the service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDuration`] if the configured interval is zero.
    pub fn build(self) -> Result<Service<H, T>, ConfigError> {
        let endpoint = match self.update_endpoint {
            Some(endpoint) => endpoint,
            None => parse_url(defaults::UPDATE_URL)?,
        };

        let ValidatedConfig {
            interval,
            hosts,
            ip_url,
            user_agent,
            ..
        } = self.config;

        let resolver = EchoResolver::new(self.client.clone(), ip_url, user_agent.clone());
        let updater = DynDnsClient::new(self.client, endpoint, user_agent);
        let reconciler = Reconciler::new(resolver, updater, self.telemetry, hosts);

        Ok(Service {
            scheduler: Scheduler::new(reconciler, interval)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Cli, FileConfig};
    use crate::engine::HostOutcome;
    use crate::provider::Outcome;
    use crate::test_support::{MockClient, RecordingTelemetry};
    use crate::transport::HttpResponse;
    use http::StatusCode;
    use http::header::USER_AGENT;
    use std::sync::Arc;

    const CONFIG: &str = r#"
        interval = 60
        ip_url = "https://echo.example/ip"
        user_agent = "ddns-sync-test/1.0"

        [[hosts]]
        host = "a.example.com"
        user = "ua"
        password = "pa"

        [[hosts]]
        host = "b.example.com"
        user = "ub"
        password = "pb"
    "#;

    fn config() -> ValidatedConfig {
        let cli = Cli::parse_from_iter(["ddns-sync"]);
        let file = FileConfig::parse(CONFIG).unwrap();
        ValidatedConfig::from_raw(&cli, Some(&file)).unwrap()
    }

    /// Echoes an address for the IP URL; answers `good` everywhere else.
    fn provider() -> Arc<MockClient> {
        Arc::new(MockClient::from_fn(|request| {
            let body = if request.url.host_str() == Some("echo.example") {
                "192.0.2.10\n"
            } else {
                "good 192.0.2.10"
            };
            Ok(HttpResponse::new(StatusCode::OK, body.as_bytes().to_vec()))
        }))
    }

    #[test]
    fn build_uses_provider_endpoint_by_default() {
        let service = Service::builder(config(), provider()).build().unwrap();

        assert_eq!(service.update_endpoint().as_str(), defaults::UPDATE_URL);
        assert_eq!(service.ip_url().as_str(), "https://echo.example/ip");
        assert_eq!(service.interval(), Duration::from_secs(60));
    }

    #[test]
    fn hosts_keep_configuration_order() {
        let service = Service::builder(config(), provider()).build().unwrap();

        let names: Vec<_> = service
            .hosts()
            .iter()
            .map(|h| h.hostname.as_str())
            .collect();
        assert_eq!(names, ["a.example.com", "b.example.com"]);
    }

    #[tokio::test]
    async fn execute_resolves_then_updates_every_host() {
        let client = provider();
        let service = Service::builder(config(), Arc::clone(&client))
            .with_update_endpoint(Url::parse("https://dyn.example/nic/update").unwrap())
            .with_telemetry(RecordingTelemetry::new())
            .build()
            .unwrap();

        let result = service.execute(&Span::none()).await;

        assert!(result.is_success());
        assert_eq!(result.ip, Some("192.0.2.10".parse().unwrap()));
        let updated = |o: &HostOutcome| o.outcome == Outcome::Updated;
        assert!(result.outcomes.iter().all(updated));

        let requests = client.captured_requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0].url.host_str(), Some("echo.example"));

        let mut updated: Vec<_> = requests[1..]
            .iter()
            .map(|r| r.query("hostname").unwrap())
            .collect();
        updated.sort();
        assert_eq!(updated, ["a.example.com", "b.example.com"]);

        for request in &requests {
            assert_eq!(request.headers[USER_AGENT], "ddns-sync-test/1.0");
        }
        for request in &requests[1..] {
            assert_eq!(request.url.host_str(), Some("dyn.example"));
            assert_eq!(request.query("myip").as_deref(), Some("192.0.2.10"));
        }
    }

    #[tokio::test]
    async fn execute_reports_failures_through_telemetry() {
        let client = Arc::new(MockClient::from_fn(|request| {
            let body = if request.url.host_str() == Some("echo.example") {
                "192.0.2.10"
            } else {
                "badauth"
            };
            Ok(HttpResponse::new(StatusCode::OK, body.as_bytes().to_vec()))
        }));
        let service = Service::builder(config(), client)
            .with_telemetry(RecordingTelemetry::new())
            .build()
            .unwrap();

        let result = service.execute(&Span::none()).await;

        assert_eq!(result.failures().count(), 2);
        let telemetry = service.scheduler.reconciler().telemetry();
        let messages: Vec<_> = telemetry.errors().into_iter().map(|e| e.msg).collect();
        assert_eq!(messages.len(), 3);
        assert_eq!(
            messages.last().map(String::as_str),
            Some("Failed to ping DNS service")
        );
    }
}
