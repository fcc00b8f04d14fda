//! Production telemetry sink backed by `tracing` and `metrics`.

use tracing::Span;

use super::{Counter, Fields, Histogram, SpanKind, Telemetry};

/// Sends events to the installed `tracing` subscriber and metrics to the
/// installed `metrics` recorder.
///
/// With no subscriber or recorder installed every call is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

// One tracing field per entry of `Fields::KEYS`; absent keys are not recorded.
macro_rules! emit {
    ($level:ident, $span:expr, $msg:expr, $fields:expr) => {
        tracing::$level!(
            parent: $span,
            hostname = $fields.get("hostname"),
            ip = $fields.get("ip"),
            hosts = $fields.get("hosts"),
            statusCode = $fields.get("statusCode"),
            change = $fields.get("change"),
            hint = $fields.get("hint"),
            error = $fields.get("error"),
            "{}",
            $msg
        )
    };
}

impl Telemetry for TracingTelemetry {
    fn info(&self, span: &Span, msg: &str, fields: &Fields) {
        emit!(info, span, msg, fields);
    }

    fn error(&self, span: &Span, msg: &str, fields: &Fields) {
        emit!(error, span, msg, fields);
    }

    fn start_span(&self, parent: &Span, kind: SpanKind, hostname: Option<&str>) -> Span {
        // span names must be literals
        match kind {
            SpanKind::Tick => tracing::info_span!(parent: parent, "execution"),
            SpanKind::Resolve => tracing::debug_span!(parent: parent, "resolve"),
            SpanKind::HostUpdate => tracing::info_span!(parent: parent, "update", hostname),
        }
    }

    fn add(&self, counter: Counter, n: u64) {
        metrics::counter!(counter.name()).increment(n);
    }

    fn record(&self, histogram: Histogram, value: f64) {
        metrics::histogram!(histogram.name()).record(value);
    }
}
