//! Registry behavior tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::thread;

use pulsegate_core::metrics::{MetricRegistry, SeriesValue, DEFAULT_BUCKETS};

#[test]
fn duplicate_name_is_a_config_error() {
    let registry = MetricRegistry::new();
    registry
        .register_counter("requests_total", "Total requests", &["path"])
        .unwrap();

    let err = registry
        .register_gauge("requests_total", "clashes with the counter")
        .expect_err("must fail");
    assert!(err.to_string().contains("duplicate metric name"));
}

#[test]
fn buckets_must_be_ascending_and_non_empty() {
    let registry = MetricRegistry::new();

    let err = registry
        .register_histogram("latency_seconds", "Latency", &["path"], &[0.5, 0.1])
        .expect_err("must fail");
    assert!(err.to_string().contains("ascending"));

    let err = registry
        .register_histogram("latency_seconds", "Latency", &["path"], &[])
        .expect_err("must fail");
    assert!(err.to_string().contains("empty"));
}

#[test]
fn series_appear_lazily() {
    let registry = MetricRegistry::new();
    let requests = registry
        .register_counter("requests_total", "Total requests", &["path", "method", "status"])
        .unwrap();

    assert!(registry.snapshot().families[0].series.is_empty());

    requests.inc(&["/", "GET", "200"]);
    requests.inc(&["/", "GET", "200"]);
    requests.inc(&["/x", "POST", "500"]);

    let snap = registry.snapshot();
    let family = &snap.families[0];
    assert_eq!(family.series.len(), 2);

    let root = family
        .series
        .iter()
        .find(|s| s.label_values == ["/", "GET", "200"])
        .unwrap();
    assert_eq!(root.value, SeriesValue::Counter(2));
}

#[test]
fn concurrent_increments_are_lossless() {
    let registry = MetricRegistry::new();
    let requests = registry
        .register_counter("requests_total", "Total requests", &["path"])
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let requests = requests.clone();
        handles.push(thread::spawn(move || {
            for _ in 0..1000 {
                requests.inc(&["/"]);
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let snap = registry.snapshot();
    assert_eq!(snap.families[0].series[0].value, SeriesValue::Counter(8000));
}

#[test]
fn gauge_round_trips_to_zero() {
    let registry = MetricRegistry::new();
    let in_progress = registry.register_gauge("in_progress", "In progress").unwrap();

    for _ in 0..5 {
        in_progress.inc();
    }
    for _ in 0..5 {
        in_progress.dec();
    }

    assert_eq!(in_progress.value(), 0);
    let snap = registry.snapshot();
    assert_eq!(snap.families[0].series[0].value, SeriesValue::Gauge(0));
}

#[test]
fn histogram_buckets_are_cumulative() {
    let registry = MetricRegistry::new();
    let latency = registry
        .register_histogram("latency_seconds", "Latency", &[], &[0.1, 0.5, 1.0])
        .unwrap();

    latency.observe(&[], 0.05);
    latency.observe(&[], 0.3);
    latency.observe(&[], 2.0);

    let snap = registry.snapshot();
    match &snap.families[0].series[0].value {
        SeriesValue::Histogram { buckets, sum, count } => {
            assert_eq!(*buckets, vec![(0.1, 1), (0.5, 2), (1.0, 2)]);
            assert_eq!(*count, 3);
            assert!((sum - 2.35).abs() < 1e-9);
        }
        other => panic!("expected histogram, got {other:?}"),
    }
}

#[test]
fn label_arity_mismatch_is_dropped() {
    let registry = MetricRegistry::new();
    let requests = registry
        .register_counter("requests_total", "Total requests", &["path"])
        .unwrap();

    requests.inc(&["/", "extra"]);
    assert!(registry.snapshot().families[0].series.is_empty());
}

#[test]
fn snapshot_is_detached_from_later_updates() {
    let registry = MetricRegistry::new();
    let requests = registry
        .register_counter("requests_total", "Total requests", &["path"])
        .unwrap();

    requests.inc(&["/"]);
    let snap = registry.snapshot();
    requests.inc(&["/"]);

    assert_eq!(snap.families[0].series[0].value, SeriesValue::Counter(1));
    assert_eq!(
        registry.snapshot().families[0].series[0].value,
        SeriesValue::Counter(2)
    );
}

#[test]
fn default_buckets_ascend() {
    assert!(DEFAULT_BUCKETS.windows(2).all(|w| w[0] < w[1]));
}
