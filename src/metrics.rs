//! Process-wide request metrics.
//!
//! All collectors live in a dedicated [`prometheus::Registry`] owned by
//! [`Metrics`], which is created once at startup and shared through
//! `AppState`. The collectors themselves are atomic, so concurrent request
//! tasks update them without further locking.

use std::time::Duration;

use axum::http::{Method, StatusCode};
use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::config::{METRICS_NAMESPACE, NAME_LENGTH_BUCKETS, REQUEST_DURATION_BUCKETS};

/// Content type of the text exposition format
pub const EXPOSITION_CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// Status classes tracked by the error counter.
const ERROR_CLASSES: [&str; 2] = ["4xx", "5xx"];

/// Request counters, latency histogram and in-flight gauge.
pub struct Metrics {
    registry: Registry,
    requests_total: IntCounterVec,
    errors_total: IntCounterVec,
    request_duration: HistogramVec,
    in_flight: IntGauge,
    name_length: Histogram,
}

impl Metrics {
    /// Create and register every collector.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests_total = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP requests handled")
                .namespace(METRICS_NAMESPACE),
            &["method", "route", "status"],
        )?;
        let errors_total = IntCounterVec::new(
            Opts::new(
                "http_errors_total",
                "Total HTTP responses with a 4xx or 5xx status",
            )
            .namespace(METRICS_NAMESPACE),
            &["class"],
        )?;
        let request_duration = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request latency in seconds",
            )
            .namespace(METRICS_NAMESPACE)
            .buckets(REQUEST_DURATION_BUCKETS.to_vec()),
            &["route"],
        )?;
        let in_flight = IntGauge::with_opts(
            Opts::new(
                "http_requests_in_flight",
                "HTTP requests currently being handled",
            )
            .namespace(METRICS_NAMESPACE),
        )?;
        let name_length = Histogram::with_opts(
            HistogramOpts::new(
                "analyzed_name_length",
                "Length in characters of successfully analyzed names",
            )
            .namespace(METRICS_NAMESPACE)
            .buckets(NAME_LENGTH_BUCKETS.to_vec()),
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(errors_total.clone()))?;
        registry.register(Box::new(request_duration.clone()))?;
        registry.register(Box::new(in_flight.clone()))?;
        registry.register(Box::new(name_length.clone()))?;

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        // Expose both error classes from the first scrape, even at zero
        for class in ERROR_CLASSES {
            errors_total.with_label_values(&[class]);
        }

        Ok(Self {
            registry,
            requests_total,
            errors_total,
            request_duration,
            in_flight,
            name_length,
        })
    }

    /// Mark a request as in flight until the returned guard is dropped.
    pub fn track_in_flight(&self) -> InFlightGuard<'_> {
        self.in_flight.inc();
        InFlightGuard(&self.in_flight)
    }

    /// Record a completed request.
    pub fn observe_request(
        &self,
        method: &Method,
        route: &str,
        status: StatusCode,
        elapsed: Duration,
    ) {
        self.requests_total
            .with_label_values(&[method.as_str(), route, status.as_str()])
            .inc();
        self.request_duration
            .with_label_values(&[route])
            .observe(elapsed.as_secs_f64());
        if let Some(class) = error_class(status) {
            self.errors_total.with_label_values(&[class]).inc();
        }
    }

    /// Record the length of a name that passed validation.
    pub fn observe_name_length(&self, length: usize) {
        self.name_length.observe(length as f64);
    }

    /// Encode every registered collector in the text exposition format.
    pub fn render(&self) -> Result<Vec<u8>, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buf)?;
        Ok(buf)
    }
}

/// Decrements the in-flight gauge on drop, including on panic unwind.
pub struct InFlightGuard<'a>(&'a IntGauge);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.dec();
    }
}

/// Error class label for a status, if it counts as an error.
pub fn error_class(status: StatusCode) -> Option<&'static str> {
    if status.is_client_error() {
        Some(ERROR_CLASSES[0])
    } else if status.is_server_error() {
        Some(ERROR_CLASSES[1])
    } else {
        None
    }
}
