//! The reconcile pass itself.

use std::net::IpAddr;
use std::sync::Arc;

use http::StatusCode;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::Span;

use super::{HostUpdateError, TickError};
use crate::config::Host;
use crate::provider::{Outcome, ProviderCode, UpdateClient, classify};
use crate::resolver::{IpResolver, ResolveError};
use crate::telemetry::{Counter, Fields, Histogram, SpanKind, Telemetry};

/// Result of updating one host during a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostOutcome {
    /// The host that was updated
    pub host: Host,
    /// Response status, if a response was received
    pub status: Option<StatusCode>,
    /// Classified result
    pub outcome: Outcome,
}

/// Everything a pass learned.
#[derive(Debug)]
pub struct TickResult {
    /// Resolved public IP; `None` if resolution failed
    pub ip: Option<IpAddr>,
    /// Per-host results in configuration order; empty if resolution failed
    pub outcomes: Vec<HostOutcome>,
    /// Pass-level error, if any
    pub error: Option<TickError>,
}

impl TickResult {
    const fn aborted(error: ResolveError) -> Self {
        Self {
            ip: None,
            outcomes: Vec::new(),
            error: Some(TickError::IpResolution(error)),
        }
    }

    /// Returns true if the IP was resolved and every host succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Iterates over the hosts whose update failed.
    pub fn failures(&self) -> impl Iterator<Item = &HostOutcome> {
        self.outcomes.iter().filter(|o| o.outcome.is_failure())
    }
}

/// Runs reconcile passes against a fixed host list.
///
/// # Type Parameters
///
/// - `R`: The [`IpResolver`] used once per pass
/// - `U`: The [`UpdateClient`] shared by all per-host tasks
/// - `T`: The [`Telemetry`] sink receiving reports
pub struct Reconciler<R, U, T> {
    resolver: Arc<R>,
    updater: Arc<U>,
    telemetry: Arc<T>,
    hosts: Arc<[Host]>,
}

impl<R, U, T> Reconciler<R, U, T> {
    /// Creates an engine for `hosts`, kept in the given order.
    pub fn new(resolver: R, updater: U, telemetry: T, hosts: Vec<Host>) -> Self {
        Self {
            resolver: Arc::new(resolver),
            updater: Arc::new(updater),
            telemetry: Arc::new(telemetry),
            hosts: hosts.into(),
        }
    }

    /// Returns the configured hosts.
    #[must_use]
    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    /// Returns the IP resolver.
    #[must_use]
    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Returns the update client.
    #[must_use]
    pub fn updater(&self) -> &U {
        &self.updater
    }

    /// Returns the telemetry sink.
    #[must_use]
    pub fn telemetry(&self) -> &T {
        &self.telemetry
    }
}

impl<R, U, T> Reconciler<R, U, T>
where
    R: IpResolver + 'static,
    U: UpdateClient + 'static,
    T: Telemetry + 'static,
{
    /// Runs one pass.
    ///
    /// The pass opens a span under `parent`, counts itself, and records its
    /// latency. It always runs to completion; each request is bounded by the
    /// transport's own timeout.
    pub async fn execute(&self, parent: &Span) -> TickResult {
        let span = self.telemetry.start_span(parent, SpanKind::Tick, None);
        let started = Instant::now();
        self.telemetry.add(Counter::Operations, 1);

        let result = self.reconcile(&span).await;

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        self.telemetry.record(Histogram::LatencyMs, elapsed_ms);
        if result.error.is_some() {
            self.telemetry.add(Counter::Errors, 1);
        }

        result
    }

    async fn reconcile(&self, span: &Span) -> TickResult {
        let resolve_span = self.telemetry.start_span(span, SpanKind::Resolve, None);
        let ip = match self.resolver.resolve(&resolve_span).await {
            Ok(ip) => ip,
            Err(e) => return TickResult::aborted(e),
        };

        self.telemetry.info(
            span,
            "Resolved public IP address",
            &Fields::new().with("ip", ip).with("hosts", self.hosts.len()),
        );

        let outcomes = self.update_all(span, ip).await;

        let failed = outcomes.iter().filter(|o| o.outcome.is_failure()).count();
        let error = (failed > 0).then(|| TickError::HostUpdates {
            failed,
            total: outcomes.len(),
        });

        TickResult {
            ip: Some(ip),
            outcomes,
            error,
        }
    }

    /// Launches one task per host and waits for all of them.
    async fn update_all(&self, span: &Span, ip: IpAddr) -> Vec<HostOutcome> {
        let handles: Vec<JoinHandle<HostOutcome>> = self
            .hosts
            .iter()
            .map(|host| {
                let updater = Arc::clone(&self.updater);
                let telemetry = Arc::clone(&self.telemetry);
                let hostname = Some(host.hostname.as_str());
                let host_span = telemetry.start_span(span, SpanKind::HostUpdate, hostname);
                let host = host.clone();

                tokio::spawn(async move {
                    update_host(&*updater, &*telemetry, &host_span, host, ip).await
                })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(handles.len());
        for (handle, host) in handles.into_iter().zip(self.hosts.iter()) {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    let error = HostUpdateError::Aborted {
                        hostname: host.hostname.clone(),
                        reason: join_error.to_string(),
                    };
                    self.telemetry.error(
                        span,
                        &error.to_string(),
                        &Fields::new().with("hostname", &host.hostname),
                    );

                    HostOutcome {
                        host: host.clone(),
                        status: None,
                        outcome: Outcome::failed(join_error.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        outcomes
    }
}

/// Updates a single host and reports the result.
async fn update_host<U, T>(
    updater: &U,
    telemetry: &T,
    span: &Span,
    host: Host,
    ip: IpAddr,
) -> HostOutcome
where
    U: UpdateClient,
    T: Telemetry,
{
    let fields = Fields::new()
        .with("hostname", &host.hostname)
        .with("ip", ip);

    let response = match updater.update(span, &host, ip).await {
        Ok(response) => response,
        Err(source) => {
            let outcome = Outcome::failed(source.to_string());
            let error = HostUpdateError::Transport {
                hostname: host.hostname.clone(),
                source,
            };
            telemetry.error(span, &error.to_string(), &fields);

            return HostOutcome {
                host,
                status: None,
                outcome,
            };
        }
    };

    let status = response.status;
    let outcome = classify(status, &response.body);
    let fields = fields.with("statusCode", status.as_u16());

    match &outcome {
        Outcome::Updated => {
            telemetry.info(span, "Updated DNS record", &fields.with("change", "good"));
        }
        Outcome::Unchanged => {
            telemetry.info(
                span,
                "DNS record already up to date",
                &fields.with("change", "nochange"),
            );
        }
        Outcome::Failed { detail } => {
            let error = HostUpdateError::Rejected {
                hostname: host.hostname.clone(),
                status,
                detail: detail.clone(),
            };
            let fields = match ProviderCode::from_body(detail) {
                Some(code) if !matches!(code, ProviderCode::Good | ProviderCode::NoChange) => {
                    fields.with("hint", code.description())
                }
                _ => fields,
            };
            telemetry.error(span, &error.to_string(), &fields);
        }
    }

    HostOutcome {
        host,
        status: Some(status),
        outcome,
    }
}
