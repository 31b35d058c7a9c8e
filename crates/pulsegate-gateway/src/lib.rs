//! PulseGate gateway library entry.
//!
//! This crate wires the config loader, the metric registry, the request
//! instrument middleware, and the operational endpoints into an axum
//! service. It is intended to be consumed by the binary (`main.rs`) and by
//! integration tests.

pub mod app_state;
pub mod build_info;
pub mod config;
pub mod obs;
pub mod ops;
pub mod pages;
pub mod router;
