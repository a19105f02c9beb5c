//! Per-peer filter state
//!
//! A full node keeps one `PeerFilter` per connection and feeds it the
//! peer's `filterload`, `filteradd` and `filterclear` messages in arrival
//! order. Access is exclusive: the connection's processing path owns it.
//! Rejected messages are logged and returned; what happens to the peer is
//! the caller's decision.

use std::sync::Arc;

use shared_types::{Hash256, OutPoint};
use tracing::{debug, trace, warn};

use crate::domain::{BloomFilter, FilterAdd, FilterClear, FilterConfig, FilterLoad};
use crate::error::FilterError;
use crate::metrics::{MetricsRecorder, NoOpMetrics};
use crate::ports::TransactionMatcher;

/// Filter loaded by one remote peer
pub struct PeerFilter {
    config: FilterConfig,
    filter: Option<BloomFilter>,
    metrics: Arc<dyn MetricsRecorder>,
}

impl PeerFilter {
    /// Create state for a new connection; no filter is loaded yet
    ///
    /// # Errors
    /// `InvalidFalsePositiveRate` or `InvalidConfig` if `config` does not validate.
    pub fn new(config: FilterConfig) -> Result<Self, FilterError> {
        Self::with_metrics(config, Arc::new(NoOpMetrics))
    }

    /// Create with a shared metrics recorder; `config` is validated
    pub fn with_metrics(
        config: FilterConfig,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self {
            config,
            filter: None,
            metrics,
        })
    }

    /// Handle `filterload`: validate and replace any existing filter
    ///
    /// On rejection the previously loaded filter, if any, stays in place.
    pub fn load(&mut self, msg: FilterLoad) -> Result<(), FilterError> {
        let filter = BloomFilter::try_from(msg)
            .and_then(|filter| self.config.check_filter(&filter).map(|()| filter))
            .map_err(|e| self.reject("filterload", e))?;

        debug!(
            size_bytes = filter.byte_len(),
            hash_funcs = filter.hash_funcs(),
            update_flag = ?filter.update_flag(),
            "[PeerFilter] Filter loaded"
        );

        self.drop_filter();
        self.metrics.record_filter_loaded(filter.byte_len());
        self.filter = Some(filter);
        Ok(())
    }

    /// Handle `filteradd`: insert one element into the loaded filter
    pub fn add(&mut self, msg: &FilterAdd) -> Result<(), FilterError> {
        if msg.data.len() > self.config.max_filter_add_size {
            let err = FilterError::ElementTooLarge {
                size: msg.data.len(),
                max: self.config.max_filter_add_size,
            };
            return Err(self.reject("filteradd", err));
        }

        match self.filter.as_mut() {
            Some(filter) => {
                filter.insert(&msg.data);
                self.metrics.record_element_added();
                trace!(size = msg.data.len(), "[PeerFilter] Element added");
                Ok(())
            }
            None => Err(self.reject("filteradd", FilterError::NoFilterLoaded)),
        }
    }

    /// Handle `filterclear`: drop the filter and go back to relaying everything
    pub fn clear(&mut self, _msg: FilterClear) {
        if self.drop_filter() {
            debug!("[PeerFilter] Filter cleared");
        }
    }

    /// Whether the peer has a filter loaded
    pub fn is_loaded(&self) -> bool {
        self.filter.is_some()
    }

    /// The loaded filter, if any
    pub fn filter(&self) -> Option<&BloomFilter> {
        self.filter.as_ref()
    }

    /// Limits this peer's messages are checked against
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Test a transaction id; true for every transaction while no filter is loaded
    pub fn matches_txid(&self, txid: &Hash256) -> bool {
        self.lookup(|filter| filter.matches_hash(txid))
    }

    /// Test a serialized outpoint; true while no filter is loaded
    pub fn matches_outpoint(&self, outpoint: &OutPoint) -> bool {
        self.lookup(|filter| filter.matches_outpoint(outpoint))
    }

    fn lookup(&self, test: impl FnOnce(&BloomFilter) -> bool) -> bool {
        match &self.filter {
            Some(filter) => {
                let found = test(filter);
                self.metrics.record_lookup(found);
                found
            }
            None => true,
        }
    }

    fn drop_filter(&mut self) -> bool {
        match self.filter.take() {
            Some(old) => {
                self.metrics.record_filter_cleared(old.byte_len());
                true
            }
            None => false,
        }
    }

    fn reject(&self, command: &'static str, err: FilterError) -> FilterError {
        warn!(command, error = %err, "[PeerFilter] Rejected filter message");
        self.metrics.record_filter_rejected();
        err
    }
}

impl TransactionMatcher for PeerFilter {
    fn matches_txid(&self, txid: &Hash256) -> bool {
        PeerFilter::matches_txid(self, txid)
    }
}
