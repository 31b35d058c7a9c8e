//! Axum router wiring.
//!
//! Routes the status page, the operational endpoints, and the configured
//! exposition path, then layers the request instrument over the lot
//! (including the 404 fallback, so unmatched paths are counted too).

use axum::{middleware, routing::get, Router};

use crate::{app_state::AppState, obs, ops, pages};

pub fn build_router(state: AppState) -> Router {
    let metrics_path = state.metrics_path().to_string();

    Router::new()
        .route("/", get(pages::home))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/version", get(ops::version))
        .route(&metrics_path, get(ops::metrics))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            obs::instrument::track_requests,
        ))
        .with_state(state)
}
