//! Metrics hooks for peer filter handling
//!
//! ## Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use spv_bloom_filter::{Metrics, PeerFilter};
//!
//! let metrics = Arc::new(Metrics::new());
//! let mut peer = PeerFilter::with_metrics(config, metrics.clone())?;
//! peer.load(msg)?;
//!
//! assert_eq!(metrics.snapshot().filters_loaded, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for filter messages and lookups
///
/// Thread-safe; one instance is usually shared by every peer connection.
#[derive(Default)]
pub struct Metrics {
    /// Filters accepted through `filterload`
    pub filters_loaded: AtomicU64,
    /// Filter messages rejected for exceeding limits or arriving out of order
    pub filters_rejected: AtomicU64,
    /// Filters dropped through `filterclear` or replacement
    pub filters_cleared: AtomicU64,
    /// Elements inserted through `filteradd`
    pub elements_added: AtomicU64,
    /// Transactions tested against a loaded filter
    pub lookups_performed: AtomicU64,
    /// Lookups that matched (true or false positives)
    pub lookups_positive: AtomicU64,
    /// Bytes currently held by loaded filters
    pub bytes_loaded: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_filter_loaded(&self, size_bytes: usize) {
        self.filters_loaded.fetch_add(1, Ordering::Relaxed);
        self.bytes_loaded.fetch_add(size_bytes as u64, Ordering::Relaxed);
    }

    pub fn record_filter_rejected(&self) {
        self.filters_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_filter_cleared(&self, size_bytes: usize) {
        self.filters_cleared.fetch_add(1, Ordering::Relaxed);
        // Saturates at zero after a reset.
        let _ = self
            .bytes_loaded
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some(current.saturating_sub(size_bytes as u64))
            });
    }

    pub fn record_element_added(&self) {
        self.elements_added.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_lookup(&self, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_loaded: self.filters_loaded.load(Ordering::Relaxed),
            filters_rejected: self.filters_rejected.load(Ordering::Relaxed),
            filters_cleared: self.filters_cleared.load(Ordering::Relaxed),
            elements_added: self.elements_added.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            bytes_loaded: self.bytes_loaded.load(Ordering::Relaxed),
        }
    }

    /// Ratio of positive lookups to total lookups
    ///
    /// Includes true positives, so it only bounds the false positive rate
    /// from above.
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
        self.filters_loaded.store(0, Ordering::Relaxed);
        self.filters_rejected.store(0, Ordering::Relaxed);
        self.filters_cleared.store(0, Ordering::Relaxed);
        self.elements_added.store(0, Ordering::Relaxed);
        self.lookups_performed.store(0, Ordering::Relaxed);
        self.lookups_positive.store(0, Ordering::Relaxed);
        self.bytes_loaded.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_loaded: u64,
    pub filters_rejected: u64,
    pub filters_cleared: u64,
    pub elements_added: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub bytes_loaded: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this to forward filter events to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_loaded(&self, size_bytes: usize);
    fn record_filter_rejected(&self);
    fn record_filter_cleared(&self, size_bytes: usize);
    fn record_element_added(&self);
    fn record_lookup(&self, found: bool);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_loaded(&self, _: usize) {}
    fn record_filter_rejected(&self) {}
    fn record_filter_cleared(&self, _: usize) {}
    fn record_element_added(&self) {}
    fn record_lookup(&self, _: bool) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_loaded(&self, size_bytes: usize) {
        Metrics::record_filter_loaded(self, size_bytes);
    }

    fn record_filter_rejected(&self) {
        Metrics::record_filter_rejected(self);
    }

    fn record_filter_cleared(&self, size_bytes: usize) {
        Metrics::record_filter_cleared(self, size_bytes);
    }

    fn record_element_added(&self) {
        Metrics::record_element_added(self);
    }

    fn record_lookup(&self, found: bool) {
        Metrics::record_lookup(self, found);
    }
}
