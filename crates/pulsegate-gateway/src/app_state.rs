//! Shared application state for the PulseGate gateway.
//!
//! Holds the startup config, build identity, the metric registry, and the
//! HTTP metric handles. Startup errors are explicit (Result instead of
//! panic) so `main` can fail fast on a bad config or a duplicate metric
//! registration.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pulsegate_core::error::Result;
use pulsegate_core::metrics::MetricRegistry;

use crate::build_info::BuildInfo;
use crate::config::GatewayConfig;
use crate::obs::instrument::HttpMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    build: BuildInfo,
    registry: Arc<MetricRegistry>,
    http: HttpMetrics,
    draining: AtomicBool,
}

impl AppState {
    /// Build application state, registering the HTTP metric families.
    pub fn new(cfg: GatewayConfig, build: BuildInfo) -> Result<Self> {
        let registry = Arc::new(MetricRegistry::new());
        let http = HttpMetrics::register(&registry)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                build,
                registry,
                http,
                draining: AtomicBool::new(false),
            }),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn build(&self) -> &BuildInfo {
        &self.inner.build
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.inner.registry
    }

    pub fn http_metrics(&self) -> &HttpMetrics {
        &self.inner.http
    }

    pub fn metrics_path(&self) -> &str {
        &self.inner.cfg.observability.metrics_path
    }

    /// Mark draining state (set once the shutdown signal arrives).
    pub fn set_draining(&self) {
        self.inner.draining.store(true, Ordering::Relaxed);
    }

    /// Return whether draining is active.
    pub fn is_draining(&self) -> bool {
        self.inner.draining.load(Ordering::Relaxed)
    }
}
