//! Prometheus text exposition format (version 0.0.4).
//!
//! Renders a registry snapshot: per family a `# HELP` and `# TYPE` line, then
//! every series line contiguously. Counters and gauges emit one line per
//! series; histograms emit cumulative `_bucket` lines, an implicit `+Inf`
//! bucket, `_sum`, and `_count`.

use std::fmt::Write;

use super::registry::{SeriesValue, Snapshot};

/// Media type of the scrape response.
pub const TEXT_FORMAT_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Escape a label value.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Escape help text (quotes stay literal in `# HELP` lines).
fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn label_str(names: &[String], values: &[String]) -> String {
    names
        .iter()
        .zip(values)
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a snapshot into the text exposition format.
pub fn render(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for family in &snapshot.families {
        let name = &family.name;
        let _ = writeln!(out, "# HELP {} {}", name, escape_help(&family.help));
        let _ = writeln!(out, "# TYPE {} {}", name, family.kind.as_str());

        for series in &family.series {
            let labels = label_str(&family.label_names, &series.label_values);
            match &series.value {
                SeriesValue::Counter(v) => {
                    if labels.is_empty() {
                        let _ = writeln!(out, "{name} {v}");
                    } else {
                        let _ = writeln!(out, "{name}{{{labels}}} {v}");
                    }
                }
                SeriesValue::Gauge(v) => {
                    if labels.is_empty() {
                        let _ = writeln!(out, "{name} {v}");
                    } else {
                        let _ = writeln!(out, "{name}{{{labels}}} {v}");
                    }
                }
                SeriesValue::Histogram { buckets, sum, count } => {
                    let prefix = if labels.is_empty() {
                        String::new()
                    } else {
                        format!("{labels},")
                    };
                    for (le, c) in buckets {
                        let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"{le}\"}} {c}");
                    }
                    let _ = writeln!(out, "{name}_bucket{{{prefix}le=\"+Inf\"}} {count}");
                    if labels.is_empty() {
                        let _ = writeln!(out, "{name}_sum {sum}");
                        let _ = writeln!(out, "{name}_count {count}");
                    } else {
                        let _ = writeln!(out, "{name}_sum{{{labels}}} {sum}");
                        let _ = writeln!(out, "{name}_count{{{labels}}} {count}");
                    }
                }
            }
        }
    }
    out
}
