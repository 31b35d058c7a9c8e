//! In-process metrics (registry + Prometheus text exposition).
//!
//! The registry owns all metric families and their live series; the gateway
//! updates it through cheap cloneable handles and the `/metrics` handler
//! renders a point-in-time snapshot. Series cells are atomics behind
//! `DashMap`, so updates from concurrent in-flight requests never serialize
//! on a process-wide lock.

pub mod exposition;
pub mod registry;

pub use exposition::{render, TEXT_FORMAT_CONTENT_TYPE};
pub use registry::{
    CounterHandle, FamilySnapshot, GaugeHandle, HistogramHandle, MetricKind, MetricRegistry,
    SeriesSnapshot, SeriesValue, Snapshot, DEFAULT_BUCKETS,
};
