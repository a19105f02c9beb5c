//! # Partial Merkle Tree Build and Extract
//!
//! Both directions walk the implicit tree in pre-order, one flag bit per
//! visited node:
//!
//! - bit 0: the subtree holds no match; its hash is in `hashes`
//! - bit 1 on an interior node: descend left, then right if a right child exists
//! - bit 1 on a leaf: matched; its hash is in `hashes`
//!
//! A missing right child takes the left child's hash. This makes a tree
//! over `[A, B, C]` and one over `[A, B, C, C]` share a root, which is the
//! historical behavior and is kept.
//!
//! Extraction runs on attacker-supplied data. Counts are checked against
//! the limits before traversal, every visited node consumes a flag bit,
//! and recursion depth is the tree height (at most 32).

use bitvec::prelude::*;
use shared_types::{merkle_node_hash, Hash256};
use tracing::trace;

use super::merkle_root::{calc_tree_height, calc_tree_width};
use crate::config::ProofLimits;
use crate::domain::{MatchedTransaction, PartialMerkleTree, ProofError, VerifiedMatches};

impl PartialMerkleTree {
    /// Build a proof over `txids`, keeping the leaves whose `matches` entry is set
    ///
    /// # Errors
    /// - `LengthMismatch` if the slices differ in length
    /// - `NoTransactions` for an empty block
    /// - `TooManyTransactions` if the count does not fit in a `u32`
    pub fn build(txids: &[Hash256], matches: &[bool]) -> Result<Self, ProofError> {
        if txids.len() != matches.len() {
            return Err(ProofError::LengthMismatch {
                leaves: txids.len(),
                matches: matches.len(),
            });
        }
        if txids.is_empty() {
            return Err(ProofError::NoTransactions);
        }
        let total = u32::try_from(txids.len()).map_err(|_| ProofError::TooManyTransactions {
            count: txids.len() as u64,
            max: u32::MAX,
        })?;

        let mut builder = Builder {
            total,
            txids,
            matches,
            hashes: Vec::new(),
            flags: BitVec::new(),
        };
        builder.traverse(calc_tree_height(total), 0);

        trace!(
            total,
            hashes = builder.hashes.len(),
            flag_bits = builder.flags.len(),
            "Built partial merkle tree"
        );

        Ok(Self {
            total_transactions: total,
            hashes: builder.hashes,
            flags: builder.flags,
        })
    }

    /// Recover the root and the matched transactions
    ///
    /// The caller compares the returned root with the block header.
    pub fn extract_matches(&self, limits: &ProofLimits) -> Result<VerifiedMatches, ProofError> {
        self.check_shape(limits)?;

        let mut extractor = Extractor {
            tree: self,
            bits_used: 0,
            hashes_used: 0,
            matches: Vec::new(),
        };
        let root = extractor.traverse(calc_tree_height(self.total_transactions), 0)?;

        if extractor.hashes_used != self.hashes.len() {
            return Err(ProofError::UnusedHashes {
                used: extractor.hashes_used,
                total: self.hashes.len(),
            });
        }

        let used_bytes = extractor.bits_used.div_ceil(8);
        let total_bytes = self.flags.len().div_ceil(8);
        if used_bytes != total_bytes {
            return Err(ProofError::UnusedFlagBytes {
                used: used_bytes,
                total: total_bytes,
            });
        }
        if self.flags[extractor.bits_used..].any() {
            return Err(ProofError::NonZeroPadding(extractor.bits_used));
        }

        trace!(
            total = self.total_transactions,
            matched = extractor.matches.len(),
            "Extracted partial merkle tree"
        );

        Ok(VerifiedMatches {
            root,
            matches: extractor.matches,
        })
    }

    /// Checks that need no traversal, cheapest first.
    fn check_shape(&self, limits: &ProofLimits) -> Result<(), ProofError> {
        let total = self.total_transactions;
        if total == 0 {
            return Err(ProofError::NoTransactions);
        }
        if total > limits.max_transactions {
            return Err(ProofError::TooManyTransactions {
                count: u64::from(total),
                max: limits.max_transactions,
            });
        }

        let flag_bytes = self.flags.len().div_ceil(8);
        if flag_bytes > limits.max_flag_bytes {
            return Err(ProofError::TooManyFlagBytes {
                count: flag_bytes,
                max: limits.max_flag_bytes,
            });
        }

        if self.hashes.is_empty() {
            return Err(ProofError::NoHashes);
        }
        if self.hashes.len() > total as usize {
            return Err(ProofError::TooManyHashes {
                hashes: self.hashes.len(),
                total,
            });
        }
        if self.flags.len() < self.hashes.len() {
            return Err(ProofError::NotEnoughFlagBits {
                bits: self.flags.len(),
                hashes: self.hashes.len(),
            });
        }
        Ok(())
    }
}

struct Builder<'a> {
    total: u32,
    txids: &'a [Hash256],
    matches: &'a [bool],
    hashes: Vec<Hash256>,
    flags: BitVec<u8, Lsb0>,
}

impl Builder<'_> {
    fn traverse(&mut self, height: u32, pos: u32) {
        let start = (pos as usize) << height;
        let end = ((pos as usize + 1) << height).min(self.total as usize);
        let parent_of_match = self.matches[start..end].iter().any(|&m| m);

        self.flags.push(parent_of_match);

        if height == 0 || !parent_of_match {
            let hash = self.subtree_hash(height, pos);
            self.hashes.push(hash);
            return;
        }

        self.traverse(height - 1, pos * 2);
        if pos * 2 + 1 < calc_tree_width(self.total, height - 1) {
            self.traverse(height - 1, pos * 2 + 1);
        }
    }

    fn subtree_hash(&self, height: u32, pos: u32) -> Hash256 {
        if height == 0 {
            return self.txids[pos as usize];
        }

        let left = self.subtree_hash(height - 1, pos * 2);
        let right = if pos * 2 + 1 < calc_tree_width(self.total, height - 1) {
            self.subtree_hash(height - 1, pos * 2 + 1)
        } else {
            left
        };
        merkle_node_hash(&left, &right)
    }
}

struct Extractor<'a> {
    tree: &'a PartialMerkleTree,
    bits_used: usize,
    hashes_used: usize,
    matches: Vec<MatchedTransaction>,
}

impl Extractor<'_> {
    fn traverse(&mut self, height: u32, pos: u32) -> Result<Hash256, ProofError> {
        let parent_of_match = *self
            .tree
            .flags
            .get(self.bits_used)
            .ok_or(ProofError::FlagBitsExhausted)?;
        self.bits_used += 1;

        if height == 0 || !parent_of_match {
            let hash = *self
                .tree
                .hashes
                .get(self.hashes_used)
                .ok_or(ProofError::HashesExhausted)?;
            self.hashes_used += 1;

            if height == 0 && parent_of_match {
                self.matches.push(MatchedTransaction {
                    position: pos,
                    txid: hash,
                });
            }
            return Ok(hash);
        }

        let left = self.traverse(height - 1, pos * 2)?;
        let right = if pos * 2 + 1 < calc_tree_width(self.tree.total_transactions, height - 1) {
            self.traverse(height - 1, pos * 2 + 1)?
        } else {
            left
        };
        Ok(merkle_node_hash(&left, &right))
    }
}
