//! # Tree Shape and Full Merkle Root
//!
//! The tree over `n` leaves is never materialized. Level `h` (leaves are
//! level 0) has `ceil(n / 2^h)` nodes; a node without a right sibling is
//! paired with itself.

use shared_types::{merkle_node_hash, Hash256};

use crate::domain::ProofError;

/// Number of nodes at `height` in a tree over `total` leaves.
pub fn calc_tree_width(total: u32, height: u32) -> u32 {
    let total = u64::from(total);
    ((total + (1u64 << height) - 1) >> height) as u32
}

/// Height of the root in a tree over `total` leaves (0 for a single leaf).
pub fn calc_tree_height(total: u32) -> u32 {
    let mut height = 0;
    while calc_tree_width(total, height) > 1 {
        height += 1;
    }
    height
}

/// Merkle root over every leaf, with the last node of an odd level duplicated.
///
/// # Errors
/// `NoTransactions` for an empty leaf list.
pub fn merkle_root(leaves: &[Hash256]) -> Result<Hash256, ProofError> {
    if leaves.is_empty() {
        return Err(ProofError::NoTransactions);
    }

    let mut level: Vec<Hash256> = leaves.to_vec();

    while level.len() > 1 {
        let mut next_level = Vec::with_capacity(level.len().div_ceil(2));

        for chunk in level.chunks(2) {
            let left = &chunk[0];
            let right = chunk.get(1).unwrap_or(left);
            next_level.push(merkle_node_hash(left, right));
        }

        level = next_level;
    }

    Ok(level[0])
}
