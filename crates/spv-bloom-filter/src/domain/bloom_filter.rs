//! Connection bloom filter
//!
//! INVARIANTS:
//! - Bit length and round count are fixed at construction and never exceed
//!   `MAX_FILTER_BYTES * 8` bits / `MAX_HASH_FUNCS` rounds.
//! - Bits only ever go from 0 to 1. A filter is discarded as a whole,
//!   never cleared bit by bit.
//! - No false negatives: after `insert(e)`, `matches(e)` is true.

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use shared_types::{Hash256, OutPoint};

use super::hash_functions::compute_hash_positions;
use super::messages::FilterLoad;
use super::parameters::{
    calculate_fpr, calculate_optimal_parameters, MAX_FILTER_BYTES, MAX_HASH_FUNCS,
};
use super::update_flag::BloomUpdateFlag;
use crate::error::FilterError;

/// Probabilistic set of the scripts, outpoints and txids a client watches
///
/// A full node tests every transaction it would relay against the
/// filter. False positives happen at roughly the configured rate, which
/// is what keeps the node from learning exactly which elements the client
/// cares about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FilterLoad", into = "FilterLoad")]
pub struct BloomFilter {
    /// Bit array, least significant bit first within each byte
    bits: BitVec<u8, Lsb0>,
    /// Number of hash rounds (k)
    hash_funcs: u32,
    /// Seed offset, chosen per connection
    tweak: u32,
    /// Update policy read by the node's transaction scanner
    update_flag: BloomUpdateFlag,
}

impl BloomFilter {
    /// Create an empty filter sized for `elements` insertions at `false_positive_rate`
    ///
    /// `elements == 0` is treated as 1. The result always fits within the
    /// protocol ceilings; only a rate outside `(0, 1)` is rejected.
    pub fn new(
        elements: u32,
        false_positive_rate: f64,
        tweak: u32,
        update_flag: BloomUpdateFlag,
    ) -> Result<Self, FilterError> {
        if !(false_positive_rate > 0.0 && false_positive_rate < 1.0) {
            return Err(FilterError::InvalidFalsePositiveRate {
                fpr: false_positive_rate,
            });
        }

        let params = calculate_optimal_parameters(elements, false_positive_rate);
        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; params.size_bytes * 8],
            hash_funcs: params.hash_funcs,
            tweak,
            update_flag,
        })
    }

    /// Rebuild a filter from its wire parts
    ///
    /// Fails with a size-limit error when the bit array or round count is
    /// above the protocol ceilings; such filters are rejected, not resized.
    /// An empty bit array is accepted and matches everything.
    pub fn from_parts(
        data: Vec<u8>,
        hash_funcs: u32,
        tweak: u32,
        update_flag: BloomUpdateFlag,
    ) -> Result<Self, FilterError> {
        if data.len() > MAX_FILTER_BYTES {
            return Err(FilterError::FilterTooLarge {
                size: data.len(),
                max: MAX_FILTER_BYTES,
            });
        }
        if hash_funcs > MAX_HASH_FUNCS {
            return Err(FilterError::TooManyHashFuncs {
                count: hash_funcs,
                max: MAX_HASH_FUNCS,
            });
        }

        Ok(Self {
            bits: BitVec::from_vec(data),
            hash_funcs,
            tweak,
            update_flag,
        })
    }

    /// Insert an element
    ///
    /// After insertion, `matches(element)` is guaranteed to return true.
    pub fn insert(&mut self, element: &[u8]) {
        let bit_len = self.bits.len();
        if bit_len == 0 {
            return;
        }
        for pos in compute_hash_positions(element, self.hash_funcs, bit_len, self.tweak) {
            self.bits.set(pos, true);
        }
    }

    /// Test whether an element may have been inserted
    ///
    /// Returns `false` only if the element was definitely never inserted.
    pub fn matches(&self, element: &[u8]) -> bool {
        let bit_len = self.bits.len();
        if bit_len == 0 {
            return true;
        }
        compute_hash_positions(element, self.hash_funcs, bit_len, self.tweak)
            .all(|pos| self.bits[pos])
    }

    /// Insert a digest (natural byte order)
    pub fn insert_hash(&mut self, hash: &Hash256) {
        self.insert(hash.as_bytes());
    }

    /// Test a digest (natural byte order)
    pub fn matches_hash(&self, hash: &Hash256) -> bool {
        self.matches(hash.as_bytes())
    }

    /// Insert a serialized outpoint
    pub fn insert_outpoint(&mut self, outpoint: &OutPoint) {
        self.insert(&outpoint.to_bytes());
    }

    /// Test a serialized outpoint
    pub fn matches_outpoint(&self, outpoint: &OutPoint) -> bool {
        self.matches(&outpoint.to_bytes())
    }

    /// Number of hash rounds
    pub fn hash_funcs(&self) -> u32 {
        self.hash_funcs
    }

    /// Seed offset
    pub fn tweak(&self) -> u32 {
        self.tweak
    }

    /// Update policy for the node's transaction scanner
    pub fn update_flag(&self) -> BloomUpdateFlag {
        self.update_flag
    }

    /// Size of the bit array in bytes
    pub fn byte_len(&self) -> usize {
        self.bits.as_raw_slice().len()
    }

    /// Size of the bit array in bits
    pub fn bit_len(&self) -> usize {
        self.bits.len()
    }

    /// Raw bit array
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Number of bits set
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// False positive rate once `elements` distinct elements are inserted
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    pub fn estimated_false_positive_rate(&self, elements: usize) -> f64 {
        calculate_fpr(self.bits.len(), elements, self.hash_funcs)
    }

    /// Build the `filterload` message carrying this filter
    pub fn to_filter_load(&self) -> FilterLoad {
        FilterLoad {
            data: self.as_bytes().to_vec(),
            hash_funcs: self.hash_funcs,
            tweak: self.tweak,
            flags: self.update_flag,
        }
    }
}

impl TryFrom<FilterLoad> for BloomFilter {
    type Error = FilterError;

    fn try_from(msg: FilterLoad) -> Result<Self, Self::Error> {
        BloomFilter::from_parts(msg.data, msg.hash_funcs, msg.tweak, msg.flags)
    }
}

impl From<BloomFilter> for FilterLoad {
    fn from(filter: BloomFilter) -> Self {
        FilterLoad {
            hash_funcs: filter.hash_funcs,
            tweak: filter.tweak,
            flags: filter.update_flag,
            data: filter.bits.into_vec(),
        }
    }
}
