//! Bloom filter sizing
//!
//! Formulas (n = expected elements, p = target false positive rate):
//! - bytes = min(-n * ln(p) / ln(2)^2, MAX_FILTER_BYTES * 8) / 8  -- at least 1
//! - k     = bytes * 8 / n * ln(2)                                -- in [1, MAX_HASH_FUNCS]
//!
//! Both are truncated to integers, which is what peers expect when they
//! recompute a filter's shape from the same inputs.

use std::f64::consts::LN_2;

/// Largest filter a peer may load, in bytes.
pub const MAX_FILTER_BYTES: usize = 36_000;

/// Largest number of hash rounds a peer may request.
pub const MAX_HASH_FUNCS: u32 = 50;

/// Largest single element a `filteradd` message may carry.
pub const MAX_FILTER_ADD_DATA: usize = 520;

const LN2_SQUARED: f64 = LN_2 * LN_2;

/// Bloom filter parameters
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterParams {
    /// Size of the bit array in bytes
    pub size_bytes: usize,
    /// Number of hash rounds
    pub hash_funcs: u32,
    /// False positive rate these parameters give at the expected load
    pub expected_fpr: f64,
}

/// Calculate filter parameters for `elements` insertions at `target_fpr`.
///
/// `elements == 0` is treated as 1. The caller is responsible for
/// checking that `target_fpr` lies in `(0, 1)`.
pub fn calculate_optimal_parameters(elements: u32, target_fpr: f64) -> BloomFilterParams {
    let n = f64::from(elements.max(1));

    let max_bits = (MAX_FILTER_BYTES * 8) as f64;
    let bits = (-n * target_fpr.ln() / LN2_SQUARED).min(max_bits);
    let size_bytes = (bits as usize / 8).clamp(1, MAX_FILTER_BYTES);

    let hash_funcs = ((size_bytes * 8) as f64 / n * LN_2) as u32;
    let hash_funcs = hash_funcs.clamp(1, MAX_HASH_FUNCS);

    BloomFilterParams {
        size_bytes,
        hash_funcs,
        expected_fpr: calculate_fpr(size_bytes * 8, elements.max(1) as usize, hash_funcs),
    }
}

/// False positive rate of an `m`-bit filter holding `n` elements with `k` rounds
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: u32) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -f64::from(k) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
