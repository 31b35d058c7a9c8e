//! Request-level observability.
//!
//! The instrument middleware wraps every route and feeds the shared
//! `MetricRegistry`; the `/metrics` handler in `ops` renders a snapshot on
//! each scrape.

pub mod instrument;
