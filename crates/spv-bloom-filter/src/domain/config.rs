//! Filter configuration and validation
//!
//! The client side uses `false_positive_rate` and `update_flag` to size
//! the filters it sends. The node side uses the size limits to decide
//! which peer filters it accepts; they may be tightened below the
//! protocol ceilings but never raised above them.
//!
//! # Example
//!
//! ```ignore
//! use spv_bloom_filter::domain::FilterConfigBuilder;
//!
//! let config = FilterConfigBuilder::new()
//!     .false_positive_rate(0.0005)
//!     .max_filter_bytes(4_096)
//!     .build()
//!     .expect("Valid config");
//! ```

use serde::{Deserialize, Serialize};

use super::bloom_filter::BloomFilter;
use super::parameters::{MAX_FILTER_ADD_DATA, MAX_FILTER_BYTES, MAX_HASH_FUNCS};
use super::update_flag::BloomUpdateFlag;
use crate::error::FilterError;

/// Bloom filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Target false positive rate for locally built filters, in (0, 1)
    pub false_positive_rate: f64,
    /// Largest peer filter accepted, in bytes
    pub max_filter_bytes: usize,
    /// Largest round count accepted from a peer
    pub max_hash_funcs: u32,
    /// Largest `filteradd` element accepted, in bytes
    pub max_filter_add_size: usize,
    /// Update policy requested for locally built filters
    pub update_flag: BloomUpdateFlag,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            false_positive_rate: 0.0001,
            max_filter_bytes: MAX_FILTER_BYTES,
            max_hash_funcs: MAX_HASH_FUNCS,
            max_filter_add_size: MAX_FILTER_ADD_DATA,
            update_flag: BloomUpdateFlag::All,
        }
    }
}

impl FilterConfig {
    /// Validate against the protocol ceilings
    pub fn validate(&self) -> Result<(), FilterError> {
        if !(self.false_positive_rate > 0.0 && self.false_positive_rate < 1.0) {
            return Err(FilterError::InvalidFalsePositiveRate {
                fpr: self.false_positive_rate,
            });
        }

        if self.max_filter_bytes > MAX_FILTER_BYTES {
            return Err(FilterError::InvalidConfig(format!(
                "max_filter_bytes {} above protocol limit {}",
                self.max_filter_bytes, MAX_FILTER_BYTES
            )));
        }

        if self.max_hash_funcs == 0 || self.max_hash_funcs > MAX_HASH_FUNCS {
            return Err(FilterError::InvalidConfig(format!(
                "max_hash_funcs must be in 1..={}, got {}",
                MAX_HASH_FUNCS, self.max_hash_funcs
            )));
        }

        if self.max_filter_add_size > MAX_FILTER_ADD_DATA {
            return Err(FilterError::InvalidConfig(format!(
                "max_filter_add_size {} above protocol limit {}",
                self.max_filter_add_size, MAX_FILTER_ADD_DATA
            )));
        }

        Ok(())
    }

    /// Check a peer filter against the configured limits
    pub fn check_filter(&self, filter: &BloomFilter) -> Result<(), FilterError> {
        if filter.byte_len() > self.max_filter_bytes {
            return Err(FilterError::FilterTooLarge {
                size: filter.byte_len(),
                max: self.max_filter_bytes,
            });
        }
        if filter.hash_funcs() > self.max_hash_funcs {
            return Err(FilterError::TooManyHashFuncs {
                count: filter.hash_funcs(),
                max: self.max_hash_funcs,
            });
        }
        Ok(())
    }

    /// Build an empty filter for `elements` with this configuration's rate and flag
    pub fn new_filter(&self, elements: u32, tweak: u32) -> Result<BloomFilter, FilterError> {
        BloomFilter::new(elements, self.false_positive_rate, tweak, self.update_flag)
    }
}

/// Builder for FilterConfig with validation
#[derive(Default)]
pub struct FilterConfigBuilder {
    false_positive_rate: Option<f64>,
    max_filter_bytes: Option<usize>,
    max_hash_funcs: Option<u32>,
    max_filter_add_size: Option<usize>,
    update_flag: Option<BloomUpdateFlag>,
}

impl FilterConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target false positive rate (strictly between 0 and 1)
    pub fn false_positive_rate(mut self, fpr: f64) -> Self {
        self.false_positive_rate = Some(fpr);
        self
    }

    pub fn max_filter_bytes(mut self, bytes: usize) -> Self {
        self.max_filter_bytes = Some(bytes);
        self
    }

    pub fn max_hash_funcs(mut self, count: u32) -> Self {
        self.max_hash_funcs = Some(count);
        self
    }

    pub fn max_filter_add_size(mut self, bytes: usize) -> Self {
        self.max_filter_add_size = Some(bytes);
        self
    }

    pub fn update_flag(mut self, flag: BloomUpdateFlag) -> Self {
        self.update_flag = Some(flag);
        self
    }

    /// Build the FilterConfig, validating all parameters
    pub fn build(self) -> Result<FilterConfig, FilterError> {
        let defaults = FilterConfig::default();

        let config = FilterConfig {
            false_positive_rate: self.false_positive_rate.unwrap_or(defaults.false_positive_rate),
            max_filter_bytes: self.max_filter_bytes.unwrap_or(defaults.max_filter_bytes),
            max_hash_funcs: self.max_hash_funcs.unwrap_or(defaults.max_hash_funcs),
            max_filter_add_size: self.max_filter_add_size.unwrap_or(defaults.max_filter_add_size),
            update_flag: self.update_flag.unwrap_or(defaults.update_flag),
        };

        config.validate()?;
        Ok(config)
    }
}
