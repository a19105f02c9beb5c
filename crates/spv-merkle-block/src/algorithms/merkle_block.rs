//! # Merkle Block Construction and Verification
//!
//! Full-node side: run a peer's matcher over a block's transaction ids and
//! wrap the resulting proof with the header. Client side: extract the proof
//! and check the recovered root against the header.

use std::collections::HashSet;

use shared_types::{BlockHeader, Hash256};
use spv_bloom_filter::{BloomFilter, TransactionMatcher};

use crate::config::ProofLimits;
use crate::domain::{MerkleBlock, PartialMerkleTree, ProofError, VerifiedMatches};

impl MerkleBlock {
    /// Build a merkle block for the transactions `matcher` selects
    ///
    /// Returns the block and the positions of the matched transactions.
    pub fn build<M: TransactionMatcher + ?Sized>(
        header: BlockHeader,
        txids: &[Hash256],
        matcher: &M,
    ) -> Result<(Self, Vec<u32>), ProofError> {
        let matches: Vec<bool> = txids.iter().map(|txid| matcher.matches_txid(txid)).collect();
        let txn = PartialMerkleTree::build(txids, &matches)?;

        let positions = matches
            .iter()
            .enumerate()
            .filter(|(_, matched)| **matched)
            .map(|(i, _)| i as u32)
            .collect();

        Ok((Self { header, txn }, positions))
    }

    /// Build against a peer's bloom filter
    pub fn from_filter(
        header: BlockHeader,
        txids: &[Hash256],
        filter: &BloomFilter,
    ) -> Result<(Self, Vec<u32>), ProofError> {
        Self::build(header, txids, filter)
    }

    /// Build against an exact set of transaction ids
    pub fn from_txids(
        header: BlockHeader,
        txids: &[Hash256],
        wanted: &HashSet<Hash256>,
    ) -> Result<(Self, Vec<u32>), ProofError> {
        Self::build(header, txids, wanted)
    }

    /// Verify against the header under the protocol limits
    pub fn verify(&self) -> Result<VerifiedMatches, ProofError> {
        self.verify_with(&ProofLimits::default())
    }

    /// Verify against the header under `limits`
    ///
    /// # Errors
    /// - Limit or encoding errors from extraction
    /// - `RootMismatch` if the recovered root differs from `header.merkle_root`
    pub fn verify_with(&self, limits: &ProofLimits) -> Result<VerifiedMatches, ProofError> {
        let verified = self.txn.extract_matches(limits)?;
        if verified.root != self.header.merkle_root {
            return Err(ProofError::RootMismatch {
                expected: self.header.merkle_root,
                computed: verified.root,
            });
        }
        Ok(verified)
    }
}
