//! Per-name load statistics.

use std::collections::BTreeMap;
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;

use crate::registry::ResourceName;

#[derive(Debug, Clone, Copy, Default)]
struct LoadRecord {
    attempts: u64,
    total_time: Duration,
    successes: u64,
    failures: u64,
}

/// Accumulated statistics for one name plus derived averages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub attempts: u64,
    pub total_time_ms: f64,
    pub successes: u64,
    pub failures: u64,
    pub average_load_time_ms: f64,
    pub success_rate: f64,
}

impl From<LoadRecord> for MetricsSnapshot {
    fn from(record: LoadRecord) -> Self {
        let total_time_ms = record.total_time.as_secs_f64() * 1000.0;
        let attempts = record.attempts.max(1) as f64;
        Self {
            attempts: record.attempts,
            total_time_ms,
            successes: record.successes,
            failures: record.failures,
            average_load_time_ms: total_time_ms / attempts,
            success_rate: record.successes as f64 / attempts,
        }
    }
}

/// Records the outcome of every load that reached the loader.
///
/// Counters only grow until [`LoadTracker::reset`] is called.
pub struct LoadTracker<K: ResourceName> {
    records: DashMap<K, LoadRecord>,
}

impl<K: ResourceName> LoadTracker<K> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Record one load outcome for `name`.
    pub fn record_load(&self, name: K, elapsed: Duration, success: bool) {
        let mut record = self.records.entry(name).or_default();
        record.attempts += 1;
        record.total_time += elapsed;
        if success {
            record.successes += 1;
        } else {
            record.failures += 1;
        }
    }

    /// Snapshot for one name, `None` if nothing was recorded.
    pub fn get(&self, name: K) -> Option<MetricsSnapshot> {
        self.records.get(&name).map(|r| MetricsSnapshot::from(*r.value()))
    }

    /// Snapshots for every name with at least one record, keyed by name.
    pub fn all(&self) -> BTreeMap<&'static str, MetricsSnapshot> {
        self.records
            .iter()
            .map(|r| (r.key().as_str(), MetricsSnapshot::from(*r.value())))
            .collect()
    }

    pub fn reset(&self) {
        self.records.clear();
    }
}

impl<K: ResourceName> Default for LoadTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}
