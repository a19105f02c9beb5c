//! # Domain Errors
//!
//! Error types for partial Merkle tree construction and verification.

use shared_types::{DecodeError, Hash256};
use thiserror::Error;

/// Broad class of a proof failure.
///
/// Every class means "do not trust this block's claimed transaction set";
/// callers may still want to log or score them differently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A count or length exceeds a ceiling; rejected before traversal.
    Limit,
    /// Hash or flag counts disagree with what the traversal consumes.
    Encoding,
    /// Structurally valid proof whose root does not match the header.
    Verification,
}

/// Partial Merkle tree error types.
#[derive(Debug, Error)]
pub enum ProofError {
    /// The tree claims zero leaves.
    #[error("Proof covers no transactions")]
    NoTransactions,

    /// The tree claims more leaves than a block can hold.
    #[error("Too many transactions: {count} > {max}")]
    TooManyTransactions {
        /// Leaf count claimed
        count: u64,
        /// Configured ceiling
        max: u32,
    },

    /// The flag byte string is longer than accepted.
    #[error("Too many flag bytes: {count} > {max}")]
    TooManyFlagBytes {
        /// Flag bytes supplied
        count: usize,
        /// Configured ceiling
        max: usize,
    },

    /// The proof carries no hashes at all.
    #[error("Proof carries no hashes")]
    NoHashes,

    /// More hashes than leaves.
    #[error("More hashes than transactions: {hashes} > {total}")]
    TooManyHashes {
        /// Hashes supplied
        hashes: usize,
        /// Leaf count claimed
        total: u32,
    },

    /// Fewer flag bits than hashes; every hash needs at least one flag bit.
    #[error("Fewer flag bits than hashes: {bits} < {hashes}")]
    NotEnoughFlagBits {
        /// Flag bits supplied
        bits: usize,
        /// Hashes supplied
        hashes: usize,
    },

    /// The traversal needed another flag bit.
    #[error("Ran out of flag bits during traversal")]
    FlagBitsExhausted,

    /// The traversal needed another hash.
    #[error("Ran out of hashes during traversal")]
    HashesExhausted,

    /// Hashes were left over after the traversal.
    #[error("Unused hashes: consumed {used} of {total}")]
    UnusedHashes {
        /// Hashes consumed
        used: usize,
        /// Hashes supplied
        total: usize,
    },

    /// Whole flag bytes were left over after the traversal.
    #[error("Unused flag bytes: consumed {used} of {total}")]
    UnusedFlagBytes {
        /// Flag bytes touched by the traversal
        used: usize,
        /// Flag bytes supplied
        total: usize,
    },

    /// Padding bits after the last consumed flag were not zero.
    #[error("Non-zero padding after flag bit {0}")]
    NonZeroPadding(usize),

    /// Leaf and match vectors of different lengths were given to build.
    #[error("Leaf and match counts differ: {leaves} != {matches}")]
    LengthMismatch {
        /// Leaves given
        leaves: usize,
        /// Match flags given
        matches: usize,
    },

    /// The recovered root does not match the header's Merkle root.
    #[error("Merkle root mismatch: expected {expected}, computed {computed}")]
    RootMismatch {
        /// Root from the block header
        expected: Hash256,
        /// Root recovered from the proof
        computed: Hash256,
    },

    /// Configured limits are out of range.
    #[error("Invalid proof limits: {0}")]
    InvalidLimits(String),

    /// The message could not be decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl ProofError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProofError::NoTransactions
            | ProofError::TooManyTransactions { .. }
            | ProofError::TooManyFlagBytes { .. }
            | ProofError::InvalidLimits(_) => ErrorKind::Limit,
            ProofError::Decode(DecodeError::OversizedLength { .. }) => ErrorKind::Limit,
            ProofError::RootMismatch { .. } => ErrorKind::Verification,
            ProofError::NoHashes
            | ProofError::TooManyHashes { .. }
            | ProofError::NotEnoughFlagBits { .. }
            | ProofError::FlagBitsExhausted
            | ProofError::HashesExhausted
            | ProofError::UnusedHashes { .. }
            | ProofError::UnusedFlagBytes { .. }
            | ProofError::NonZeroPadding(_)
            | ProofError::LengthMismatch { .. }
            | ProofError::Decode(_) => ErrorKind::Encoding,
        }
    }
}
