//! Metric registry: family definitions and live series values.
//!
//! Families are fixed at registration (name, help, label names, buckets);
//! series are created lazily on the first observation for a new label-value
//! combination and are never removed for the process lifetime. Counters and
//! bucket counts are `AtomicU64`, gauges `AtomicI64`, histogram sums an `f64`
//! bit pattern updated by CAS. All update operations use `Relaxed` ordering;
//! a scrape reads whatever values are current, not a consistent cut.
//!
//! Known limitation: label combinations are unbounded. A hostile `path` space
//! grows series storage without limit; callers own that exposure.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use dashmap::DashMap;

use crate::error::{PulseGateError, Result};

/// Default latency buckets in seconds (Prometheus client-library defaults).
pub const DEFAULT_BUCKETS: [f64; 14] = [
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Metric family kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Histogram,
    Gauge,
}

impl MetricKind {
    /// Keyword used in `# TYPE` exposition lines.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Histogram => "histogram",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// Family identity, fixed at registration.
#[derive(Debug, Clone)]
struct FamilyDesc {
    name: String,
    help: String,
    label_names: Vec<String>,
}

impl FamilyDesc {
    fn new(name: &str, help: &str, label_names: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            help: help.to_string(),
            label_names: label_names.iter().map(|n| n.to_string()).collect(),
        }
    }

    /// Build a series key from label values in label-name order.
    ///
    /// An arity mismatch is an instrumentation fault, not a caller error: the
    /// update is dropped after a warning so the request path stays unharmed.
    fn series_key(&self, label_values: &[&str]) -> Option<Vec<String>> {
        if label_values.len() != self.label_names.len() {
            tracing::warn!(
                metric = %self.name,
                expected = self.label_names.len(),
                got = label_values.len(),
                "label arity mismatch, dropping metric update"
            );
            return None;
        }
        Some(label_values.iter().map(|v| v.to_string()).collect())
    }
}

#[derive(Debug)]
struct CounterFamily {
    desc: FamilyDesc,
    series: DashMap<Vec<String>, AtomicU64>,
}

#[derive(Debug)]
struct GaugeCell {
    desc: FamilyDesc,
    value: AtomicI64,
}

#[derive(Debug)]
struct HistogramCell {
    bucket_counts: Vec<AtomicU64>,
    sum_bits: AtomicU64,
    count: AtomicU64,
}

impl HistogramCell {
    fn new(buckets: usize) -> Self {
        Self {
            bucket_counts: (0..buckets).map(|_| AtomicU64::new(0)).collect(),
            sum_bits: AtomicU64::new(0f64.to_bits()),
            count: AtomicU64::new(0),
        }
    }
}

#[derive(Debug)]
struct HistogramFamily {
    desc: FamilyDesc,
    buckets: Vec<f64>,
    series: DashMap<Vec<String>, HistogramCell>,
}

/// Monotone counter family handle. Cheap to clone; all clones feed the same
/// series map.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    family: Arc<CounterFamily>,
}

impl CounterHandle {
    /// Increment by 1.
    pub fn inc(&self, label_values: &[&str]) {
        self.add(label_values, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, label_values: &[&str], v: u64) {
        let Some(key) = self.family.desc.series_key(label_values) else {
            return;
        };
        self.family
            .series
            .entry(key)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(v, Ordering::Relaxed);
    }
}

/// Unlabeled gauge handle.
#[derive(Debug, Clone)]
pub struct GaugeHandle {
    cell: Arc<GaugeCell>,
}

impl GaugeHandle {
    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1);
    }

    /// Decrement by 1.
    pub fn dec(&self) {
        self.add(-1);
    }

    /// Add an arbitrary signed delta.
    pub fn add(&self, v: i64) {
        self.cell.value.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value.
    pub fn value(&self) -> i64 {
        self.cell.value.load(Ordering::Relaxed)
    }
}

/// Histogram family handle.
#[derive(Debug, Clone)]
pub struct HistogramHandle {
    family: Arc<HistogramFamily>,
}

impl HistogramHandle {
    /// Observe a value, incrementing every cumulative bucket it falls under.
    pub fn observe(&self, label_values: &[&str], v: f64) {
        let Some(key) = self.family.desc.series_key(label_values) else {
            return;
        };
        let cell = self
            .family
            .series
            .entry(key)
            .or_insert_with(|| HistogramCell::new(self.family.buckets.len()));

        for (i, le) in self.family.buckets.iter().enumerate() {
            if v <= *le {
                cell.bucket_counts[i].fetch_add(1, Ordering::Relaxed);
            }
        }
        cell.count.fetch_add(1, Ordering::Relaxed);

        // f64 add on an AtomicU64 bit pattern; retry on concurrent writers.
        let mut cur = cell.sum_bits.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(cur) + v).to_bits();
            match cell
                .sum_bits
                .compare_exchange_weak(cur, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => break,
                Err(actual) => cur = actual,
            }
        }
    }
}

enum Family {
    Counter(Arc<CounterFamily>),
    Histogram(Arc<HistogramFamily>),
    Gauge(Arc<GaugeCell>),
}

impl Family {
    fn name(&self) -> &str {
        match self {
            Family::Counter(f) => &f.desc.name,
            Family::Histogram(f) => &f.desc.name,
            Family::Gauge(c) => &c.desc.name,
        }
    }

    fn snapshot(&self) -> FamilySnapshot {
        match self {
            Family::Counter(f) => FamilySnapshot {
                name: f.desc.name.clone(),
                help: f.desc.help.clone(),
                kind: MetricKind::Counter,
                label_names: f.desc.label_names.clone(),
                series: f
                    .series
                    .iter()
                    .map(|r| SeriesSnapshot {
                        label_values: r.key().clone(),
                        value: SeriesValue::Counter(r.value().load(Ordering::Relaxed)),
                    })
                    .collect(),
            },
            Family::Histogram(f) => FamilySnapshot {
                name: f.desc.name.clone(),
                help: f.desc.help.clone(),
                kind: MetricKind::Histogram,
                label_names: f.desc.label_names.clone(),
                series: f
                    .series
                    .iter()
                    .map(|r| {
                        let cell = r.value();
                        let buckets = f
                            .buckets
                            .iter()
                            .zip(&cell.bucket_counts)
                            .map(|(le, c)| (*le, c.load(Ordering::Relaxed)))
                            .collect();
                        SeriesSnapshot {
                            label_values: r.key().clone(),
                            value: SeriesValue::Histogram {
                                buckets,
                                sum: f64::from_bits(cell.sum_bits.load(Ordering::Relaxed)),
                                count: cell.count.load(Ordering::Relaxed),
                            },
                        }
                    })
                    .collect(),
            },
            Family::Gauge(c) => FamilySnapshot {
                name: c.desc.name.clone(),
                help: c.desc.help.clone(),
                kind: MetricKind::Gauge,
                label_names: Vec::new(),
                series: vec![SeriesSnapshot {
                    label_values: Vec::new(),
                    value: SeriesValue::Gauge(c.value.load(Ordering::Relaxed)),
                }],
            },
        }
    }
}

/// Process-wide metric registry.
///
/// Constructed explicitly at startup and shared via `Arc`; there is no
/// ambient singleton, so tests instantiate isolated registries.
#[derive(Default)]
pub struct MetricRegistry {
    families: RwLock<Vec<Family>>,
}

impl MetricRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a counter family.
    pub fn register_counter(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
    ) -> Result<CounterHandle> {
        let family = Arc::new(CounterFamily {
            desc: FamilyDesc::new(name, help, label_names),
            series: DashMap::new(),
        });
        self.insert(Family::Counter(Arc::clone(&family)))?;
        Ok(CounterHandle { family })
    }

    /// Register a histogram family. Bucket upper bounds must be finite and
    /// strictly ascending; `+Inf` is implicit.
    pub fn register_histogram(
        &self,
        name: &str,
        help: &str,
        label_names: &[&str],
        buckets: &[f64],
    ) -> Result<HistogramHandle> {
        if buckets.is_empty() {
            return Err(PulseGateError::Config(format!(
                "histogram {name}: buckets must not be empty"
            )));
        }
        if buckets.iter().any(|b| !b.is_finite()) {
            return Err(PulseGateError::Config(format!(
                "histogram {name}: buckets must be finite"
            )));
        }
        if !buckets.windows(2).all(|w| w[0] < w[1]) {
            return Err(PulseGateError::Config(format!(
                "histogram {name}: buckets must be strictly ascending"
            )));
        }
        let family = Arc::new(HistogramFamily {
            desc: FamilyDesc::new(name, help, label_names),
            buckets: buckets.to_vec(),
            series: DashMap::new(),
        });
        self.insert(Family::Histogram(Arc::clone(&family)))?;
        Ok(HistogramHandle { family })
    }

    /// Register an unlabeled gauge.
    pub fn register_gauge(&self, name: &str, help: &str) -> Result<GaugeHandle> {
        let cell = Arc::new(GaugeCell {
            desc: FamilyDesc::new(name, help, &[]),
            value: AtomicI64::new(0),
        });
        self.insert(Family::Gauge(Arc::clone(&cell)))?;
        Ok(GaugeHandle { cell })
    }

    /// Copy out all families and series for exposition. O(series); does not
    /// block concurrent updates beyond the atomic reads themselves.
    pub fn snapshot(&self) -> Snapshot {
        let families = match self.families.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        Snapshot {
            families: families.iter().map(Family::snapshot).collect(),
        }
    }

    fn insert(&self, family: Family) -> Result<()> {
        let mut families = match self.families.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if families.iter().any(|f| f.name() == family.name()) {
            return Err(PulseGateError::Config(format!(
                "duplicate metric name: {}",
                family.name()
            )));
        }
        families.push(family);
        Ok(())
    }
}

/// Immutable view of all families and series at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub families: Vec<FamilySnapshot>,
}

#[derive(Debug, Clone)]
pub struct FamilySnapshot {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    /// Label names in registration order; series values align with these.
    pub label_names: Vec<String>,
    pub series: Vec<SeriesSnapshot>,
}

#[derive(Debug, Clone)]
pub struct SeriesSnapshot {
    pub label_values: Vec<String>,
    pub value: SeriesValue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeriesValue {
    Counter(u64),
    Gauge(i64),
    Histogram {
        /// Per-bucket (upper bound, cumulative count).
        buckets: Vec<(f64, u64)>,
        sum: f64,
        count: u64,
    },
}
