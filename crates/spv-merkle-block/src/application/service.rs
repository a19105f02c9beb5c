//! # Merkle Block Service
//!
//! Holds the proof limits and a metrics sink, and logs the outcome of each
//! build and verification. Failures are returned unchanged.

use std::sync::Arc;

use shared_types::{BlockHeader, Hash256};
use spv_bloom_filter::TransactionMatcher;
use tracing::{debug, warn};

use crate::config::ProofLimits;
use crate::domain::{MerkleBlock, ProofError, VerifiedMatches};
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Builds merkle blocks for peers and verifies those received from them.
pub struct MerkleBlockService {
    limits: ProofLimits,
    metrics: Arc<dyn MetricsRecorder>,
}

impl MerkleBlockService {
    /// Create a service; `limits` are validated.
    pub fn new(limits: ProofLimits) -> Result<Self, ProofError> {
        Self::with_metrics(limits, Arc::new(NoOpMetrics))
    }

    /// Create a service with a metrics sink.
    pub fn with_metrics(
        limits: ProofLimits,
        metrics: Arc<dyn MetricsRecorder>,
    ) -> Result<Self, ProofError> {
        limits.validate()?;
        Ok(Self { limits, metrics })
    }

    /// Limits applied to received proofs.
    pub fn limits(&self) -> &ProofLimits {
        &self.limits
    }

    /// Build a merkle block for the transactions `matcher` selects.
    pub fn build<M: TransactionMatcher + ?Sized>(
        &self,
        header: BlockHeader,
        txids: &[Hash256],
        matcher: &M,
    ) -> Result<(MerkleBlock, Vec<u32>), ProofError> {
        let (block, positions) = MerkleBlock::build(header, txids, matcher)?;

        debug!(
            block_root = %block.header.merkle_root,
            total = txids.len(),
            matched = positions.len(),
            hashes = block.txn.hashes.len(),
            "[MerkleBlockService] Built merkle block"
        );
        self.metrics.record_built(positions.len());
        Ok((block, positions))
    }

    /// Verify a received merkle block against its header.
    pub fn verify(&self, block: &MerkleBlock) -> Result<VerifiedMatches, ProofError> {
        match block.verify_with(&self.limits) {
            Ok(verified) => {
                debug!(
                    root = %verified.root,
                    matched = verified.matches.len(),
                    "[MerkleBlockService] Merkle block verified"
                );
                self.metrics.record_verified(verified.matches.len());
                Ok(verified)
            }
            Err(e) => {
                warn!(
                    kind = ?e.kind(),
                    error = %e,
                    "[MerkleBlockService] Merkle block rejected"
                );
                self.metrics.record_rejected(e.kind());
                Err(e)
            }
        }
    }

    /// Decode a merkle block body under the configured limits and verify it.
    pub fn decode_and_verify(
        &self,
        bytes: &[u8],
    ) -> Result<(MerkleBlock, VerifiedMatches), ProofError> {
        let block = MerkleBlock::deserialize_with(bytes, &self.limits).map_err(|e| {
            warn!(error = %e, "[MerkleBlockService] Undecodable merkle block");
            self.metrics.record_rejected(e.kind());
            e
        })?;
        let verified = self.verify(&block)?;
        Ok((block, verified))
    }
}
