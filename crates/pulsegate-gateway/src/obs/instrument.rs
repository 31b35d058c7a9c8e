//! HTTP request instrumentation middleware.
//!
//! Wraps the whole router: counts completed requests by path/method/status,
//! times every request into a latency histogram, and tracks in-flight load
//! in a gauge. The exposition path is served uninstrumented so scrapes do
//! not skew their own numbers. The middleware is a pure observer: it returns
//! exactly what the inner handler returns.

use std::time::Instant;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use pulsegate_core::error::Result;
use pulsegate_core::metrics::{
    CounterHandle, GaugeHandle, HistogramHandle, MetricRegistry, DEFAULT_BUCKETS,
};

use crate::app_state::AppState;

/// Handles for the fixed HTTP metric schema.
#[derive(Clone)]
pub struct HttpMetrics {
    requests_total: CounterHandle,
    request_duration: HistogramHandle,
    in_progress: GaugeHandle,
}

impl HttpMetrics {
    /// Register the HTTP families. Called once at startup; a duplicate
    /// registration surfaces as a config error.
    pub fn register(registry: &MetricRegistry) -> Result<Self> {
        Ok(Self {
            requests_total: registry.register_counter(
                "http_requests_total",
                "Total HTTP requests",
                &["path", "method", "status"],
            )?,
            request_duration: registry.register_histogram(
                "http_request_duration_seconds",
                "HTTP request latency in seconds",
                &["path", "method"],
                &DEFAULT_BUCKETS,
            )?,
            in_progress: registry.register_gauge(
                "http_requests_in_progress",
                "Number of HTTP requests in progress",
            )?,
        })
    }

    /// Start tracking one request: bumps the in-progress gauge and captures
    /// the start instant. The returned guard releases both in `Drop`.
    pub fn begin(&self, path: &str, method: &str) -> InFlight {
        self.in_progress.inc();
        InFlight {
            metrics: self.clone(),
            path: path.to_string(),
            method: method.to_string(),
            start: Instant::now(),
        }
    }
}

/// In-flight request guard.
///
/// Dropping the guard decrements the in-progress gauge and observes elapsed
/// time, whether the request completed, panicked, or was cancelled
/// mid-await. Only `complete` bumps the request counter: a request that
/// never produced a status code is not counted.
pub struct InFlight {
    metrics: HttpMetrics,
    path: String,
    method: String,
    start: Instant,
}

impl InFlight {
    /// Record a normally completed response.
    pub fn complete(self, status: u16) {
        self.metrics
            .requests_total
            .inc(&[&self.path, &self.method, &status.to_string()]);
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.metrics.in_progress.dec();
        self.metrics
            .request_duration
            .observe(&[&self.path, &self.method], self.start.elapsed().as_secs_f64());
    }
}

/// Axum middleware: instrument every request except the exposition path.
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if req.uri().path() == state.metrics_path() {
        return next.run(req).await;
    }

    let path = req.uri().path().to_string();
    let method = req.method().as_str().to_string();

    let flight = state.http_metrics().begin(&path, &method);
    let response = next.run(req).await;
    flight.complete(response.status().as_u16());
    response
}
