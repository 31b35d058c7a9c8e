//! Operational HTTP endpoints.
//!
//! - `/healthz` : liveness (GET and HEAD)
//! - `/readyz`  : readiness (503 when draining)
//! - `/version` : build identity as JSON
//! - metrics    : Prometheus text format at the configured exposition path

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use pulsegate_core::metrics::{render, TEXT_FORMAT_CONTENT_TYPE};

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    }
}

pub async fn version(State(state): State<AppState>) -> impl IntoResponse {
    let app = &state.cfg().app;
    let build = state.build();
    Json(json!({
        "name": app.name,
        "sha": build.sha,
        "build_time": build.build_time,
        "env": app.env,
    }))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = render(&state.registry().snapshot());

    (
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, TEXT_FORMAT_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
