//! # Proof Limits
//!
//! Ceilings applied to attacker-supplied partial Merkle trees before any
//! traversal work is spent on them.

use serde::{Deserialize, Serialize};

use crate::domain::ProofError;

/// Largest block payload, in bytes.
pub const MAX_BLOCK_PAYLOAD: u32 = 4_000_000;

/// Smallest possible serialized transaction, in bytes.
pub const MIN_TX_PAYLOAD: u32 = 10;

/// Most transactions a block can hold.
pub const MAX_TX_PER_BLOCK: u32 = MAX_BLOCK_PAYLOAD / MIN_TX_PAYLOAD + 1;

/// Longest flag byte string a merkleblock message may carry.
///
/// Sized for a proof that matches every transaction of the largest block,
/// which spends one flag bit on every node of the tree.
pub const MAX_FLAG_BYTES: usize = tree_node_count(MAX_TX_PER_BLOCK).div_ceil(8);

/// Nodes in the tree over `total` leaves, counting each level's width.
pub const fn tree_node_count(total: u32) -> usize {
    let mut width = total as usize;
    let mut nodes = 0;
    loop {
        nodes += width;
        if width <= 1 {
            return nodes;
        }
        width = width.div_ceil(2);
    }
}

/// Limits for decoding and extracting partial Merkle trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofLimits {
    /// Largest leaf count a proof may claim.
    pub max_transactions: u32,
    /// Largest flag byte string accepted.
    pub max_flag_bytes: usize,
}

impl Default for ProofLimits {
    fn default() -> Self {
        Self {
            max_transactions: MAX_TX_PER_BLOCK,
            max_flag_bytes: MAX_FLAG_BYTES,
        }
    }
}

impl ProofLimits {
    /// Reject zero limits and limits above the protocol ceilings.
    pub fn validate(&self) -> Result<(), ProofError> {
        if self.max_transactions == 0 || self.max_transactions > MAX_TX_PER_BLOCK {
            return Err(ProofError::InvalidLimits(format!(
                "max_transactions must be in 1..={}, got {}",
                MAX_TX_PER_BLOCK, self.max_transactions
            )));
        }
        if self.max_flag_bytes == 0 || self.max_flag_bytes > MAX_FLAG_BYTES {
            return Err(ProofError::InvalidLimits(format!(
                "max_flag_bytes must be in 1..={}, got {}",
                MAX_FLAG_BYTES, self.max_flag_bytes
            )));
        }
        Ok(())
    }
}

/// Builder for [`ProofLimits`].
#[derive(Default)]
pub struct ProofLimitsBuilder {
    max_transactions: Option<u32>,
    max_flag_bytes: Option<usize>,
}

impl ProofLimitsBuilder {
    /// Start from the protocol defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the largest accepted leaf count.
    pub fn max_transactions(mut self, count: u32) -> Self {
        self.max_transactions = Some(count);
        self
    }

    /// Set the largest accepted flag byte string.
    pub fn max_flag_bytes(mut self, bytes: usize) -> Self {
        self.max_flag_bytes = Some(bytes);
        self
    }

    /// Build and validate.
    pub fn build(self) -> Result<ProofLimits, ProofError> {
        let defaults = ProofLimits::default();
        let limits = ProofLimits {
            max_transactions: self.max_transactions.unwrap_or(defaults.max_transactions),
            max_flag_bytes: self.max_flag_bytes.unwrap_or(defaults.max_flag_bytes),
        };
        limits.validate()?;
        Ok(limits)
    }
}
