//! Minimal metrics registry for the service.
//!
//! Labeled counters and gauges backed by `DashMap`, rendered in Prometheus
//! text format. Labels are flattened into sorted key vectors so output order
//! per series is deterministic.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};

type LabelKey = Vec<(String, String)>;

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn series(name: &str, key: &LabelKey) -> String {
    if key.is_empty() {
        return name.to_string();
    }
    let labels = key
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{name}{{{labels}}}")
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value for one label set (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| (series(name, r.key()), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (s, v) in rows {
            let _ = writeln!(out, "{} {}", s, v);
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    pub fn set(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.store(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> Option<i64> {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
    }

    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} gauge", name);
        let mut rows: Vec<(String, i64)> = self
            .map
            .iter()
            .map(|r| (series(name, r.key()), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (s, v) in rows {
            let _ = writeln!(out, "{} {}", s, v);
        }
    }
}

#[derive(Default)]
pub struct ServiceMetrics {
    /// Vote API calls by operation (`list`, `increment`, `delete`).
    pub requests: CounterVec,
    /// Health reports by state and sink outcome.
    pub health_reports: CounterVec,
    /// Load reports by sink outcome.
    pub load_reports: CounterVec,
    /// Last reported load value per metric.
    pub load: GaugeVec,
    draining: AtomicBool,
}

impl ServiceMetrics {
    pub fn set_draining(&self) {
        self.draining.store(true, Ordering::Relaxed);
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Relaxed)
    }

    /// Render all registered metrics plus any extra lines provided by callers.
    pub fn render(&self, extra: &[(&str, u64)]) -> String {
        let mut out = String::new();
        self.requests.render("ballot_requests_total", &mut out);
        self.health_reports.render("ballot_health_reports_total", &mut out);
        self.load_reports.render("ballot_load_reports_total", &mut out);
        self.load.render("ballot_last_load", &mut out);

        let _ = writeln!(
            out,
            "# TYPE ballot_draining gauge\nballot_draining {}",
            if self.is_draining() { 1 } else { 0 }
        );
        for (k, v) in extra {
            let _ = writeln!(out, "{} {}", k, v);
        }
        out
    }
}
