//! Double-SHA256 and the Merkle tree node hash built on it.

use sha2::{Digest, Sha256};

use crate::entities::{Hash256, HASH_SIZE};

/// SHA-256 applied twice.
pub fn sha256d(data: &[u8]) -> Hash256 {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut output = [0u8; HASH_SIZE];
    output.copy_from_slice(&second);
    Hash256::from_bytes(output)
}

/// Hash of an interior Merkle node: `sha256d(left || right)`.
pub fn merkle_node_hash(left: &Hash256, right: &Hash256) -> Hash256 {
    let mut buf = [0u8; HASH_SIZE * 2];
    buf[..HASH_SIZE].copy_from_slice(left.as_bytes());
    buf[HASH_SIZE..].copy_from_slice(right.as_bytes());
    sha256d(&buf)
}
