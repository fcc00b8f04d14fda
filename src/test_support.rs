//! Shared test doubles for the transport, resolver, provider and telemetry seams.

use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use http::StatusCode;
use tracing::Span;

use crate::config::Host;
use crate::provider::UpdateClient;
use crate::resolver::{IpResolver, ResolveError};
use crate::telemetry::{Counter, Fields, Histogram, SpanKind, Telemetry};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

type Responder = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync>;

/// HTTP client returning canned responses and capturing every request.
pub struct MockClient {
    responder: Responder,
    requests: Mutex<Vec<HttpRequest>>,
    calls: AtomicUsize,
}

impl MockClient {
    /// Replies with `results` in order; panics when they run out.
    pub fn new(results: Vec<Result<HttpResponse, HttpError>>) -> Self {
        let queue = Mutex::new(VecDeque::from(results));
        Self::from_fn(move |_| {
            queue
                .lock()
                .unwrap()
                .pop_front()
                .expect("MockClient ran out of responses")
        })
    }

    /// Replies by calling `f` for every request.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, HttpError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(f),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always replies with `status` and `body`.
    pub fn with_status_body(status: StatusCode, body: &str) -> Self {
        let body = body.as_bytes().to_vec();
        Self::from_fn(move |_| Ok(HttpResponse::new(status, body.clone())))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn respond(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = (self.responder)(&request);
        self.requests.lock().unwrap().push(request);
        result
    }
}

impl HttpClient for MockClient {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.respond(request)
    }
}

impl HttpClient for Arc<MockClient> {
    async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.respond(request)
    }
}

/// Resolver returning a fixed address or a fixed failure.
pub struct MockResolver {
    ip: Option<IpAddr>,
    calls: AtomicUsize,
}

impl MockResolver {
    pub fn ok(ip: IpAddr) -> Self {
        Self {
            ip: Some(ip),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every lookup with a 502 status.
    pub fn failing() -> Self {
        Self {
            ip: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IpResolver for MockResolver {
    async fn resolve(&self, _span: &Span) -> Result<IpAddr, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let status = StatusCode::BAD_GATEWAY;
        self.ip.ok_or(ResolveError::Status(status))
    }
}

/// Canned reply for one hostname.
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Body(StatusCode, &'static str),
    Timeout,
    Panic,
}

/// Update client with per-hostname replies and concurrency tracking.
///
/// Hosts without a configured reply get `200 good`.
#[derive(Default)]
pub struct MockUpdater {
    replies: HashMap<String, Reply>,
    delay: Duration,
    seen: Mutex<Vec<(String, IpAddr)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockUpdater {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, hostname: &str, reply: Reply) -> Self {
        self.replies.insert(hostname.to_string(), reply);
        self
    }

    /// Sleeps for `delay` inside every update.
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    /// Hostnames updated so far, sorted.
    pub fn hostnames(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .seen
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        names
    }

    /// Addresses sent so far, in call order.
    pub fn ips(&self) -> Vec<IpAddr> {
        let seen = self.seen.lock().unwrap();
        seen.iter().map(|(_, ip)| *ip).collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl UpdateClient for MockUpdater {
    async fn update(
        &self,
        _span: &Span,
        host: &Host,
        ip: IpAddr,
    ) -> Result<HttpResponse, HttpError> {
        self.seen.lock().unwrap().push((host.hostname.clone(), ip));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let reply = self
            .replies
            .get(&host.hostname)
            .copied()
            .unwrap_or(Reply::Body(StatusCode::OK, "good"));

        match reply {
            Reply::Body(status, body) => Ok(HttpResponse::new(status, body.as_bytes().to_vec())),
            Reply::Timeout => Err(HttpError::Timeout),
            Reply::Panic => panic!("update for {} blew up", host.hostname),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub level: Level,
    pub msg: String,
    pub fields: Fields,
}

/// Telemetry sink that records everything it is given.
#[derive(Default)]
pub struct RecordingTelemetry {
    events: Mutex<Vec<Event>>,
    spans: Mutex<Vec<(SpanKind, Option<String>)>>,
    counters: Mutex<Vec<(Counter, u64)>>,
    samples: Mutex<Vec<(Histogram, f64)>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<Event> {
        self.events_at(Level::Error)
    }

    pub fn infos(&self) -> Vec<Event> {
        self.events_at(Level::Info)
    }

    fn events_at(&self, level: Level) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }

    pub fn spans(&self) -> Vec<SpanKind> {
        let spans = self.spans.lock().unwrap();
        spans.iter().map(|(kind, _)| *kind).collect()
    }

    /// Hostnames recorded on host update spans, sorted.
    pub fn span_hostnames(&self) -> Vec<String> {
        let spans = self.spans.lock().unwrap();
        let mut names: Vec<_> = spans
            .iter()
            .filter(|(kind, _)| *kind == SpanKind::HostUpdate)
            .filter_map(|(_, hostname)| hostname.clone())
            .collect();
        names.sort();
        names
    }

    /// Sum of all increments of `counter`.
    pub fn counter(&self, counter: Counter) -> u64 {
        self.counters
            .lock()
            .unwrap()
            .iter()
            .filter(|(c, _)| *c == counter)
            .map(|(_, n)| n)
            .sum()
    }

    pub fn samples(&self, histogram: Histogram) -> Vec<f64> {
        self.samples
            .lock()
            .unwrap()
            .iter()
            .filter(|(h, _)| *h == histogram)
            .map(|(_, v)| *v)
            .collect()
    }

    fn push(&self, level: Level, msg: &str, fields: &Fields) {
        self.events.lock().unwrap().push(Event {
            level,
            msg: msg.to_string(),
            fields: fields.clone(),
        });
    }
}

impl Telemetry for RecordingTelemetry {
    fn info(&self, _span: &Span, msg: &str, fields: &Fields) {
        self.push(Level::Info, msg, fields);
    }

    fn error(&self, _span: &Span, msg: &str, fields: &Fields) {
        self.push(Level::Error, msg, fields);
    }

    fn start_span(&self, _parent: &Span, kind: SpanKind, hostname: Option<&str>) -> Span {
        let hostname = hostname.map(str::to_string);
        self.spans.lock().unwrap().push((kind, hostname));
        Span::none()
    }

    fn add(&self, counter: Counter, n: u64) {
        self.counters.lock().unwrap().push((counter, n));
    }

    fn record(&self, histogram: Histogram, value: f64) {
        self.samples.lock().unwrap().push((histogram, value));
    }
}
