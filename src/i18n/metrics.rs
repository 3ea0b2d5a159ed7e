//! Lookup metrics and observability.
//!
//! Counts how lookups resolve so missing translations show up in numbers,
//! not only as raw key paths on screen. One instance is shared (via `Arc`)
//! between a locale store and the localizer built on top of it.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Lookup counters.
#[derive(Debug, Default)]
pub struct LookupMetrics {
    /// Lookups answered from the active locale's tree
    hits: AtomicUsize,

    /// Lookups answered from the default locale's tree after a miss
    fallback_hits: AtomicUsize,

    /// Lookups that ended with the key path being returned
    misses: AtomicUsize,

    /// Locale changes that actually switched the active locale
    locale_changes: AtomicUsize,

    /// Failed reads or writes of persisted preferences
    storage_failures: AtomicUsize,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fallback_hit(&self) {
        self.fallback_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_locale_change(&self) {
        self.locale_changes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_storage_failure(&self) {
        self.storage_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn fallback_hits(&self) -> usize {
        self.fallback_hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn locale_changes(&self) -> usize {
        self.locale_changes.load(Ordering::Relaxed)
    }

    pub fn storage_failures(&self) -> usize {
        self.storage_failures.load(Ordering::Relaxed)
    }

    /// Generate a metrics report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.hits();
        let fallback_hits = self.fallback_hits();
        let misses = self.misses();
        let total = hits + fallback_hits + misses;
        let hit_rate = if total > 0 {
            ((hits + fallback_hits) as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            hits,
            fallback_hits,
            misses,
            hit_rate,
            locale_changes: self.locale_changes(),
            storage_failures: self.storage_failures(),
        }
    }
}

/// Snapshot of the lookup counters.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub hits: usize,
    pub fallback_hits: usize,
    pub misses: usize,

    /// Share of lookups that produced a translation, as a percentage (0-100)
    pub hit_rate: f64,

    pub locale_changes: usize,
    pub storage_failures: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Counter Tests ====================

    #[test]
    fn test_record_hit() {
        let metrics = LookupMetrics::new();
        assert_eq!(metrics.hits(), 0);
        metrics.record_hit();
        metrics.record_hit();
        assert_eq!(metrics.hits(), 2);
    }

    #[test]
    fn test_record_miss() {
        let metrics = LookupMetrics::new();
        metrics.record_miss();
        assert_eq!(metrics.misses(), 1);
    }

    #[test]
    fn test_record_locale_change_and_storage_failure() {
        let metrics = LookupMetrics::new();
        metrics.record_locale_change();
        metrics.record_storage_failure();
        metrics.record_storage_failure();
        assert_eq!(metrics.locale_changes(), 1);
        assert_eq!(metrics.storage_failures(), 2);
    }

    // ==================== Report Tests ====================

    #[test]
    fn test_report_empty() {
        let report = LookupMetrics::new().report();
        assert_eq!(report.hits, 0);
        assert_eq!(report.misses, 0);
        assert_eq!(report.hit_rate, 0.0);
    }

    #[test]
    fn test_report_hit_rate_counts_fallback_hits() {
        let metrics = LookupMetrics::new();

        // 2 hits + 1 fallback hit, 1 miss = 75%
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_fallback_hit();
        metrics.record_miss();

        let report = metrics.report();
        assert_eq!(report.fallback_hits, 1);
        assert_eq!(report.hit_rate, 75.0);
    }

    #[test]
    fn test_report_serializes() {
        let metrics = LookupMetrics::new();
        metrics.record_hit();

        let json = serde_json::to_value(metrics.report()).expect("Should serialize");
        assert_eq!(json["hits"], 1);
        assert_eq!(json["hit_rate"], 100.0);
    }
}
