//! Exposition format tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pulsegate_core::metrics::{render, MetricRegistry, DEFAULT_BUCKETS};

/// Registry pre-registered with the gateway's HTTP schema, no traffic.
fn http_registry() -> MetricRegistry {
    let registry = MetricRegistry::new();
    registry
        .register_counter(
            "http_requests_total",
            "Total HTTP requests",
            &["path", "method", "status"],
        )
        .unwrap();
    registry
        .register_histogram(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
            &["path", "method"],
            &DEFAULT_BUCKETS,
        )
        .unwrap();
    registry
        .register_gauge(
            "http_requests_in_progress",
            "Number of HTTP requests in progress",
        )
        .unwrap();
    registry
}

#[test]
fn zero_traffic_renders_all_families() {
    let out = render(&http_registry().snapshot());

    assert!(out.contains("# HELP http_requests_total Total HTTP requests\n"));
    assert!(out.contains("# TYPE http_requests_total counter\n"));
    assert!(out.contains("# HELP http_request_duration_seconds HTTP request latency in seconds\n"));
    assert!(out.contains("# TYPE http_request_duration_seconds histogram\n"));
    assert!(out.contains("# HELP http_requests_in_progress Number of HTTP requests in progress\n"));
    assert!(out.contains("# TYPE http_requests_in_progress gauge\n"));

    // the unlabeled gauge always has its zero-valued series
    assert!(out.contains("\nhttp_requests_in_progress 0\n"));
}

#[test]
fn counter_series_render_with_labels() {
    let registry = MetricRegistry::new();
    let requests = registry
        .register_counter(
            "http_requests_total",
            "Total HTTP requests",
            &["path", "method", "status"],
        )
        .unwrap();
    requests.inc(&["/", "GET", "200"]);

    let out = render(&registry.snapshot());
    assert!(out.contains("http_requests_total{path=\"/\",method=\"GET\",status=\"200\"} 1\n"));
}

#[test]
fn histogram_series_render_buckets_sum_count() {
    let registry = MetricRegistry::new();
    let latency = registry
        .register_histogram(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
            &["path", "method"],
            &[0.1, 1.0],
        )
        .unwrap();
    latency.observe(&["/", "GET"], 0.05);

    let out = render(&registry.snapshot());
    assert!(out.contains(
        "http_request_duration_seconds_bucket{path=\"/\",method=\"GET\",le=\"0.1\"} 1\n"
    ));
    assert!(out.contains(
        "http_request_duration_seconds_bucket{path=\"/\",method=\"GET\",le=\"1\"} 1\n"
    ));
    assert!(out.contains(
        "http_request_duration_seconds_bucket{path=\"/\",method=\"GET\",le=\"+Inf\"} 1\n"
    ));
    assert!(out.contains("http_request_duration_seconds_sum{path=\"/\",method=\"GET\"} 0.05\n"));
    assert!(out.contains("http_request_duration_seconds_count{path=\"/\",method=\"GET\"} 1\n"));
}

#[test]
fn label_values_are_escaped() {
    let registry = MetricRegistry::new();
    let requests = registry
        .register_counter("http_requests_total", "Total HTTP requests", &["path"])
        .unwrap();
    requests.inc(&["/a\"b\\c\nd"]);

    let out = render(&registry.snapshot());
    assert!(out.contains(r#"http_requests_total{path="/a\"b\\c\nd"} 1"#));
}

#[test]
fn help_text_is_escaped() {
    let registry = MetricRegistry::new();
    registry
        .register_gauge("odd_gauge", "line one\nline two \\ done")
        .unwrap();

    let out = render(&registry.snapshot());
    assert!(out.contains("# HELP odd_gauge line one\\nline two \\\\ done\n"));
}

#[test]
fn family_lines_stay_contiguous() {
    let registry = MetricRegistry::new();
    let a = registry.register_counter("a_total", "A", &["k"]).unwrap();
    let b = registry.register_counter("b_total", "B", &["k"]).unwrap();

    // interleaved updates must not interleave output lines
    a.inc(&["1"]);
    b.inc(&["1"]);
    a.inc(&["2"]);

    let out = render(&registry.snapshot());
    let first_b = out.find("# HELP b_total").unwrap();
    let last_a = out.rfind("a_total{").unwrap();
    assert!(last_a < first_b);
}
