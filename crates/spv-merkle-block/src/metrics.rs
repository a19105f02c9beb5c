//! # Proof Metrics
//!
//! Counters for merkle blocks built and checked.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::ErrorKind;

/// Counters for proof handling.
#[derive(Default)]
pub struct Metrics {
    /// Merkle blocks built for peers
    pub proofs_built: AtomicU64,
    /// Merkle blocks that verified against their header
    pub proofs_verified: AtomicU64,
    /// Rejections over a limit
    pub rejected_limit: AtomicU64,
    /// Rejections for inconsistent encoding
    pub rejected_encoding: AtomicU64,
    /// Rejections for a root mismatch
    pub rejected_verification: AtomicU64,
    /// Matched transactions recovered from verified proofs
    pub matches_recovered: AtomicU64,
}

impl Metrics {
    /// Create a zeroed collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get current metrics snapshot.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            proofs_built: self.proofs_built.load(Ordering::Relaxed),
            proofs_verified: self.proofs_verified.load(Ordering::Relaxed),
            rejected_limit: self.rejected_limit.load(Ordering::Relaxed),
            rejected_encoding: self.rejected_encoding.load(Ordering::Relaxed),
            rejected_verification: self.rejected_verification.load(Ordering::Relaxed),
            matches_recovered: self.matches_recovered.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time metrics snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct MetricsSnapshot {
    pub proofs_built: u64,
    pub proofs_verified: u64,
    pub rejected_limit: u64,
    pub rejected_encoding: u64,
    pub rejected_verification: u64,
    pub matches_recovered: u64,
}

impl MetricsSnapshot {
    /// Total rejections of every kind.
    pub fn proofs_rejected(&self) -> u64 {
        self.rejected_limit + self.rejected_encoding + self.rejected_verification
    }
}

/// Sink for proof events.
pub trait MetricsRecorder: Send + Sync {
    /// A merkle block was built with `matched` transactions.
    fn record_built(&self, matched: usize);
    /// A merkle block verified with `matched` transactions.
    fn record_verified(&self, matched: usize);
    /// A merkle block was rejected.
    fn record_rejected(&self, kind: ErrorKind);
}

/// No-op recorder for when metrics are disabled.
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_built(&self, _: usize) {}
    fn record_verified(&self, _: usize) {}
    fn record_rejected(&self, _: ErrorKind) {}
}

impl MetricsRecorder for Metrics {
    fn record_built(&self, _matched: usize) {
        self.proofs_built.fetch_add(1, Ordering::Relaxed);
    }

    fn record_verified(&self, matched: usize) {
        self.proofs_verified.fetch_add(1, Ordering::Relaxed);
        self.matches_recovered.fetch_add(matched as u64, Ordering::Relaxed);
    }

    fn record_rejected(&self, kind: ErrorKind) {
        let counter = match kind {
            ErrorKind::Limit => &self.rejected_limit,
            ErrorKind::Encoding => &self.rejected_encoding,
            ErrorKind::Verification => &self.rejected_verification,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}
