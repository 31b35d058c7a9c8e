//! Static status page.
//!
//! Fixed-response render of app identity and build info with links to the
//! operational endpoints. No state beyond a read of the startup config.

use axum::{extract::State, response::Html};

use crate::app_state::AppState;

pub async fn home(State(state): State<AppState>) -> Html<String> {
    let app = &state.cfg().app;
    let build = state.build();
    let host = std::env::var("HOSTNAME").unwrap_or_else(|_| "unknown".to_string());
    let metrics_path = state.metrics_path();

    Html(format!(
        r#"<!doctype html>
<html><head><meta charset="utf-8"><title>{name} status</title>
<style>
  body{{font-family:ui-sans-serif,system-ui;margin:2rem;line-height:1.5}}
  .grid{{display:grid;grid-template-columns:140px 1fr;gap:.5rem 1rem;max-width:700px}}
  code{{background:#f6f8fa;padding:.2rem .4rem;border-radius:6px}}
  a{{text-decoration:none}}
</style></head>
<body>
  <h1>{name} is running</h1>
  <div class="grid">
    <div>Version</div><div><code>{sha}</code></div>
    <div>Build</div><div>{build_time}</div>
    <div>Env</div><div>{env}</div>
    <div>Host</div><div>{host}</div>
  </div>
  <p style="margin-top:1rem">
    <a href="/healthz">Health</a> · <a href="/readyz">Ready</a> · <a href="/version">Version JSON</a> · <a href="{metrics_path}">Metrics</a>
  </p>
</body></html>"#,
        name = app.name,
        sha = build.sha,
        build_time = build.build_time,
        env = app.env,
        host = host,
        metrics_path = metrics_path,
    ))
}
