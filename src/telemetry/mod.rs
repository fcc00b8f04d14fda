//! Telemetry sink used by the reconcile engine and scheduler.
//!
//! The engine never reaches for a global logger, tracer or meter. Everything it
//! reports goes through a [`Telemetry`] value injected at construction, and the
//! current span is passed explicitly as a `&tracing::Span` so that the
//! resolve → fan-out → update chain stays correlated.
//!
//! [`TracingTelemetry`] is the production sink: events go to `tracing`,
//! counters and histograms to the `metrics` facade.

mod fields;
mod tracing_sink;

pub use fields::Fields;
pub use tracing_sink::TracingTelemetry;

use tracing::Span;

/// Spans opened by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// One reconcile pass.
    Tick,
    /// The public IP lookup inside a pass.
    Resolve,
    /// A single host update inside a pass.
    HostUpdate,
}

impl SpanKind {
    /// Span name as it appears in trace output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tick => "execution",
            Self::Resolve => "resolve",
            Self::HostUpdate => "update",
        }
    }
}

/// Monotonic counters reported per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    /// Number of reconcile passes started.
    Operations,
    /// Number of reconcile passes that ended with an error.
    Errors,
}

impl Counter {
    /// Metric name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Operations => "ddns_sync.operation_count",
            Self::Errors => "ddns_sync.operation_errors",
        }
    }
}

/// Distributions reported per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Histogram {
    /// Wall-clock duration of a reconcile pass, in milliseconds.
    LatencyMs,
}

impl Histogram {
    /// Metric name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LatencyMs => "ddns_sync.operation_latency_ms",
        }
    }
}

/// Receiver for structured events, spans and metrics.
///
/// # Design
///
/// Implementations are shared between the scheduler and every per-host
/// update task of a pass, so they must be usable concurrently through `&self`.
pub trait Telemetry: Send + Sync {
    /// Reports an informational event inside `span`.
    fn info(&self, span: &Span, msg: &str, fields: &Fields);

    /// Reports a failure inside `span`.
    fn error(&self, span: &Span, msg: &str, fields: &Fields);

    /// Opens a child span of `parent`.
    ///
    /// `hostname` is recorded on [`SpanKind::HostUpdate`] spans and ignored
    /// by the other kinds.
    fn start_span(&self, parent: &Span, kind: SpanKind, hostname: Option<&str>) -> Span;

    /// Increments a counter by `n`.
    fn add(&self, counter: Counter, n: u64);

    /// Records one sample into a histogram.
    fn record(&self, histogram: Histogram, value: f64);
}
