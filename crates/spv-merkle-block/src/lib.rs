//! # SPV Merkle Block
//!
//! Compact, verifiable proofs that a block contains the transactions a
//! lightweight client's filter selected.
//!
//! ## Flow
//!
//! ```text
//! full node                                   client
//! ---------                                   ------
//! txids + TransactionMatcher
//!   -> PartialMerkleTree::build
//!   -> MerkleBlock { header, txn }  ------->  MerkleBlock::verify
//!                                               -> extract_matches (limits)
//!                                               -> root == header.merkle_root
//!                                               -> VerifiedMatches
//! ```
//!
//! ## Security
//!
//! | Defense | Where |
//! |---------|-------|
//! | Leaf count ceiling (400,001) | `ProofLimits`, checked before traversal |
//! | Hash count and flag length ceilings on decode | `PartialMerkleTree::consensus_decode_with` |
//! | Exact hash consumption, zero flag padding | `PartialMerkleTree::extract_matches` |
//! | Root comparison against the header | `MerkleBlock::verify` |
//!
//! ## Module Structure
//!
//! ```text
//! spv-merkle-block/
//! ├── domain/          # PartialMerkleTree, MerkleBlock, VerifiedMatches, ProofError
//! ├── algorithms/      # Tree shape, full root, build/extract, merkle block build/verify
//! ├── application/     # MerkleBlockService: limits, logging, metrics
//! ├── metrics.rs       # Proof counters
//! └── config.rs        # ProofLimits
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod metrics;

// Re-exports
pub use algorithms::{calc_tree_height, calc_tree_width, merkle_root};
pub use application::MerkleBlockService;
pub use config::{
    ProofLimits, ProofLimitsBuilder, MAX_BLOCK_PAYLOAD, MAX_FLAG_BYTES, MAX_TX_PER_BLOCK,
    MIN_TX_PAYLOAD,
};
pub use domain::{
    ErrorKind, MatchedTransaction, MerkleBlock, PartialMerkleTree, ProofError, VerifiedMatches,
};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
