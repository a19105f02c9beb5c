//! Hash rounds for the bloom filter
//!
//! Every round hashes the whole element with 32-bit MurmurHash3 under its
//! own seed. Seeds are spaced by a fixed multiplier and offset by the
//! filter's tweak, so two filters over the same elements light up
//! unrelated bits unless they share a tweak.

use std::io::Cursor;

/// Spacing between the seeds of consecutive hash rounds.
pub const SEED_MULTIPLIER: u32 = 0xFBA4_C795;

/// 32-bit MurmurHash3 (x86 variant) of `data`.
pub fn murmur3_32(data: &[u8], seed: u32) -> u32 {
    let mut cursor = Cursor::new(data);
    // Reading from an in-memory cursor cannot fail.
    murmur3::murmur3_32(&mut cursor, seed).unwrap_or(0)
}

/// Seed for hash round `round` under `tweak`.
pub fn round_seed(round: u32, tweak: u32) -> u32 {
    round.wrapping_mul(SEED_MULTIPLIER).wrapping_add(tweak)
}

/// Bit positions an element maps to, one per round.
///
/// `bit_len` must be non-zero.
pub fn compute_hash_positions(
    element: &[u8],
    hash_funcs: u32,
    bit_len: usize,
    tweak: u32,
) -> impl Iterator<Item = usize> + '_ {
    (0..hash_funcs).map(move |round| murmur3_32(element, round_seed(round, tweak)) as usize % bit_len)
}
