//! Shared error type across PulseGate crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, PulseGateError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum PulseGateError {
    /// Invalid configuration: bad config file, duplicate metric name,
    /// malformed bucket boundaries. Fatal at startup.
    #[error("config: {0}")]
    Config(String),
    /// Internal error.
    #[error("internal: {0}")]
    Internal(String),
}
