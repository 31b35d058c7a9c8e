//! PulseGate core: metric registry, snapshot model, and exposition format.
//!
//! This crate holds the process-wide metric state and its wire-format
//! serialization, shared by the gateway and by tooling. It intentionally
//! carries no transport or runtime dependencies so it can be reused in
//! multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `PulseGateError`/`Result`; metric
//! updates on the hot path are infallible by construction so observability
//! can never break a served request.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metrics;

/// Shared result type.
pub use error::{PulseGateError, Result};
