//! Service metrics: view cache effectiveness and translation provider health.
//!
//! One `FaqMetrics` instance is owned by each `FaqService`, so tests can
//! assert on counters without touching global state.

use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct FaqMetrics {
    /// Reads answered from the view cache
    cache_hits: AtomicUsize,

    /// Reads that had to rebuild the view
    cache_misses: AtomicUsize,

    /// Full scans of the record store
    store_scans: AtomicUsize,

    /// Whole-cache flushes triggered by writes
    invalidations: AtomicUsize,

    /// Calls made to the translation provider
    translation_calls: AtomicUsize,

    /// Translation calls that failed
    translation_failures: AtomicUsize,
}

impl FaqMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_scan(&self) {
        self.store_scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalidation(&self) {
        self.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_translation_call(&self) {
        self.translation_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_translation_failure(&self) {
        self.translation_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Generate a point-in-time report.
    pub fn report(&self) -> MetricsReport {
        let hits = self.cache_hits.load(Ordering::Relaxed);
        let misses = self.cache_misses.load(Ordering::Relaxed);
        let total_cache_queries = hits + misses;
        let cache_hit_rate = if total_cache_queries > 0 {
            (hits as f64 / total_cache_queries as f64) * 100.0
        } else {
            0.0
        };

        let calls = self.translation_calls.load(Ordering::Relaxed);
        let failures = self.translation_failures.load(Ordering::Relaxed);
        let translation_success_rate = if calls > 0 {
            (calls.saturating_sub(failures) as f64 / calls as f64) * 100.0
        } else {
            0.0
        };

        MetricsReport {
            cache_hits: hits,
            cache_misses: misses,
            cache_hit_rate,
            store_scans: self.store_scans.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            translation_calls: calls,
            translation_failures: failures,
            translation_success_rate,
        }
    }
}

/// Metrics report, serialized on the health endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub cache_hits: usize,
    pub cache_misses: usize,

    /// Percentage (0-100)
    pub cache_hit_rate: f64,

    pub store_scans: usize,
    pub invalidations: usize,
    pub translation_calls: usize,
    pub translation_failures: usize,

    /// Percentage (0-100)
    pub translation_success_rate: f64,
}
