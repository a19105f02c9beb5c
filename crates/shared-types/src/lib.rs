//! # Shared Types Crate
//!
//! Value types and wire plumbing shared by the SPV filtering crates.
//!
//! ## Contents
//!
//! - **Entities**: [`Hash256`], [`OutPoint`], [`BlockHeader`]
//! - **Hashing**: [`sha256d`], [`merkle_node_hash`]
//! - **Encoding**: [`Encodable`] / [`Decodable`] and the CompactSize
//!   [`VarInt`] used for every count on the wire
//! - **Errors**: [`DecodeError`]
//!
//! Everything here is deliberately small: the filter and Merkle block
//! crates only need a digest with a canonical byte order, the header's
//! Merkle-root field, and a way to read and write their own message bodies.

pub mod encoding;
pub mod entities;
pub mod errors;
pub mod hashing;

pub use encoding::{
    deserialize, read_var_bytes, serialize, write_var_bytes, Decodable, Encodable, VarInt,
};
pub use entities::{BlockHeader, Hash256, OutPoint, HASH_SIZE, MAX_BLOCK_SIG_LEN, OUTPOINT_SIZE};
pub use errors::DecodeError;
pub use hashing::{merkle_node_hash, sha256d};
