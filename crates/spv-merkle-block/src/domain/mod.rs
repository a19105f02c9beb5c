//! # Domain Layer
//!
//! Merkle block types and errors. The traversal algorithms that give
//! `PartialMerkleTree` its behavior live in `algorithms`.

pub mod entities;
pub mod errors;

pub use entities::{MatchedTransaction, MerkleBlock, PartialMerkleTree, VerifiedMatches};
pub use errors::{ErrorKind, ProofError};
