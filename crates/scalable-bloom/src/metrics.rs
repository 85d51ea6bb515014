//! Metrics hooks for scalable filter operations
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use scalable_bloom::{Metrics, ScalableFilter};
//!
//! let metrics = Arc::new(Metrics::new());
//! let mut filter = ScalableFilter::new_default(0.1)
//!     .unwrap()
//!     .with_metrics(metrics.clone());
//!
//! filter.feed("Bloom").unwrap();
//! assert!(filter.matches("Bloom"));
//! assert_eq!(metrics.snapshot().elements_inserted, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Metrics collector for filter operations
///
/// Counters are atomic so one collector can be shared by several filters.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Sub-filters created, including the initial one
    pub filters_created: AtomicU64,
    /// Sub-filters added because the active one filled up
    pub growth_events: AtomicU64,
    /// Total feed calls
    pub elements_inserted: AtomicU64,
    /// Total lookups performed
    pub lookups_performed: AtomicU64,
    /// Total positive lookups (matches)
    pub lookups_positive: AtomicU64,
    /// Total bytes allocated for sub-filters
    pub bytes_allocated: AtomicU64,
    /// Cumulative lookup time in nanoseconds
    pub lookup_time_ns: AtomicU64,
    /// Cumulative feed time in nanoseconds
    pub insert_time_ns: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record sub-filter creation
    pub fn record_filter_created(&self, size_bytes: usize, _hash_count: usize) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.bytes_allocated
            .fetch_add(size_bytes as u64, Ordering::Relaxed);
    }

    /// Record a growth step of a scalable filter
    pub fn record_growth(&self, _size_bytes: usize, _target_fpr: f64) {
        self.growth_events.fetch_add(1, Ordering::Relaxed);
    }

    /// Record element insertion
    pub fn record_insert(&self, duration: Duration) {
        self.elements_inserted.fetch_add(1, Ordering::Relaxed);
        self.insert_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
    }

    /// Record lookup operation
    ///
    /// `found` includes false positives.
    pub fn record_lookup(&self, duration: Duration, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        self.lookup_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            growth_events: self.growth_events.load(Ordering::Relaxed),
            elements_inserted: self.elements_inserted.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            bytes_allocated: self.bytes_allocated.load(Ordering::Relaxed),
            avg_lookup_ns: self.avg_lookup_time_ns(),
            avg_insert_ns: self.avg_insert_time_ns(),
        }
    }

    /// Average lookup time in nanoseconds
    pub fn avg_lookup_time_ns(&self) -> u64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        if total > 0 {
            self.lookup_time_ns.load(Ordering::Relaxed) / total
        } else {
            0
        }
    }

    /// Average feed time in nanoseconds
    pub fn avg_insert_time_ns(&self) -> u64 {
        let total = self.elements_inserted.load(Ordering::Relaxed);
        if total > 0 {
            self.insert_time_ns.load(Ordering::Relaxed) / total
        } else {
            0
        }
    }

    /// Ratio of positive lookups to total lookups
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.filters_created.store(0, Ordering::Relaxed);
        self.growth_events.store(0, Ordering::Relaxed);
        self.elements_inserted.store(0, Ordering::Relaxed);
        self.lookups_performed.store(0, Ordering::Relaxed);
        self.lookups_positive.store(0, Ordering::Relaxed);
        self.bytes_allocated.store(0, Ordering::Relaxed);
        self.lookup_time_ns.store(0, Ordering::Relaxed);
        self.insert_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub growth_events: u64,
    pub elements_inserted: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub bytes_allocated: u64,
    pub avg_lookup_ns: u64,
    pub avg_insert_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this trait to forward filter events to an external metrics
/// system.
pub trait MetricsRecorder: Send + Sync {
    /// Record sub-filter creation
    fn record_filter_created(&self, size_bytes: usize, hash_count: usize);

    /// Record a growth step
    fn record_growth(&self, size_bytes: usize, target_fpr: f64);

    /// Record element insertion
    fn record_insert(&self, duration: Duration);

    /// Record lookup operation
    fn record_lookup(&self, duration: Duration, found: bool);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: usize, _: usize) {}
    fn record_growth(&self, _: usize, _: f64) {}
    fn record_insert(&self, _: Duration) {}
    fn record_lookup(&self, _: Duration, _: bool) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, size_bytes: usize, hash_count: usize) {
        Metrics::record_filter_created(self, size_bytes, hash_count);
    }

    fn record_growth(&self, size_bytes: usize, target_fpr: f64) {
        Metrics::record_growth(self, size_bytes, target_fpr);
    }

    fn record_insert(&self, duration: Duration) {
        Metrics::record_insert(self, duration);
    }

    fn record_lookup(&self, duration: Duration, found: bool) {
        Metrics::record_lookup(self, duration, found);
    }
}
