//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - The bloom filter itself and its update flag
//! - Murmur3 hash rounds
//! - Parameter calculations
//! - Configuration
//! - `filterload` / `filteradd` / `filterclear` message bodies
//!
//! RULES:
//! - No I/O operations beyond in-memory encoding
//! - No async code

pub mod bloom_filter;
pub mod config;
pub mod hash_functions;
pub mod messages;
pub mod parameters;
pub mod update_flag;

pub use bloom_filter::BloomFilter;
pub use config::{FilterConfig, FilterConfigBuilder};
pub use hash_functions::{compute_hash_positions, murmur3_32, SEED_MULTIPLIER};
pub use messages::{FilterAdd, FilterClear, FilterLoad};
pub use parameters::{
    calculate_fpr, calculate_optimal_parameters, BloomFilterParams, MAX_FILTER_ADD_DATA,
    MAX_FILTER_BYTES, MAX_HASH_FUNCS,
};
pub use update_flag::BloomUpdateFlag;
