//! PulseGate gateway binary.
//!
//! Startup order: tracing, config, state (metric registration), router,
//! listener. The first SIGINT flips the draining flag (readiness turns 503)
//! and stops accepting; in-flight requests finish before exit.

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use pulsegate_gateway::{app_state, build_info, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("pulsegate.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .expect("server.listen must be a valid SocketAddr");

    let build = build_info::BuildInfo::from_env();
    let state = app_state::AppState::new(cfg, build).expect("state init failed");
    let app = router::build_router(state.clone());

    tracing::info!(%listen, "pulsegate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    let shutdown = async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        state.set_draining();
        tracing::info!("shutdown signal received, draining");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .expect("server failed");
}
