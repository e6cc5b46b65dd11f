//! Load cycle counters.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::renderer::LoadOutcome;

#[derive(Default)]
pub struct Metrics {
    pub loads_started: AtomicU64,
    pub loads_succeeded: AtomicU64,
    pub loads_empty: AtomicU64,
    pub loads_failed: AtomicU64,
    pub loads_stale: AtomicU64,
    pub records_rendered: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_start(&self) {
        self.loads_started.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outcome(&self, outcome: &LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded(n) => {
                self.loads_succeeded.fetch_add(1, Ordering::Relaxed);
                self.records_rendered.fetch_add(*n as u64, Ordering::Relaxed);
            }
            LoadOutcome::Empty => {
                self.loads_empty.fetch_add(1, Ordering::Relaxed);
            }
            LoadOutcome::Failed(_) => {
                self.loads_failed.fetch_add(1, Ordering::Relaxed);
            }
            LoadOutcome::Stale => {
                self.loads_stale.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            loads_started: self.loads_started.load(Ordering::Relaxed),
            loads_succeeded: self.loads_succeeded.load(Ordering::Relaxed),
            loads_empty: self.loads_empty.load(Ordering::Relaxed),
            loads_failed: self.loads_failed.load(Ordering::Relaxed),
            loads_stale: self.loads_stale.load(Ordering::Relaxed),
            records_rendered: self.records_rendered.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub loads_started: u64,
    pub loads_succeeded: u64,
    pub loads_empty: u64,
    pub loads_failed: u64,
    pub loads_stale: u64,
    pub records_rendered: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_metrics_start_at_zero() {
        let s = Metrics::new().snapshot();
        assert_eq!(s.loads_started, 0);
        assert_eq!(s.loads_failed, 0);
        assert_eq!(s.records_rendered, 0);
    }

    #[test]
    fn loaded_outcome_counts_records() {
        let m = Metrics::new();
        m.record_outcome(&LoadOutcome::Loaded(3));
        m.record_outcome(&LoadOutcome::Loaded(2));
        let s = m.snapshot();
        assert_eq!(s.loads_succeeded, 2);
        assert_eq!(s.records_rendered, 5);
    }

    #[test]
    fn each_outcome_has_its_counter() {
        let m = Metrics::new();
        m.record_start();
        m.record_outcome(&LoadOutcome::Empty);
        m.record_outcome(&LoadOutcome::Failed("timeout".into()));
        m.record_outcome(&LoadOutcome::Stale);
        let s = m.snapshot();
        assert_eq!(s.loads_started, 1);
        assert_eq!(s.loads_empty, 1);
        assert_eq!(s.loads_failed, 1);
        assert_eq!(s.loads_stale, 1);
        assert_eq!(s.loads_succeeded, 0);
    }
}
