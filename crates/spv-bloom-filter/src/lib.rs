//! # SPV Bloom Filter
//!
//! Connection bloom filters that let a lightweight client ask a full node
//! for only the transactions it cares about, without saying exactly which.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): pure filter logic, no I/O
//!   - `BloomFilter`: bit array, hash rounds, tweak and update flag
//!   - `FilterLoad` / `FilterAdd` / `FilterClear`: message bodies
//!   - `FilterConfig` / `FilterConfigBuilder`: sizing and acceptance limits
//!
//! - **Ports Layer** (`ports/`): `TransactionMatcher`, the yes/no question
//!   a Merkle block builder asks about each transaction
//!
//! - **Service Layer** (`service/`): `PeerFilter`, one connection's filter
//!   state on the full-node side
//!
//! ## Limits
//!
//! A filter that arrives over the wire is rejected, never resized, when it
//! exceeds 36,000 bytes or 50 hash rounds. `filteradd` elements are capped
//! at 520 bytes.
//!
//! ## Invariants
//!
//! - No false negatives: after `insert(e)`, `matches(e)` is true
//! - Bits only go from 0 to 1; a filter is replaced, never partially reset
//!
//! ## Usage Example
//!
//! ```ignore
//! use spv_bloom_filter::{BloomFilter, BloomUpdateFlag};
//!
//! let mut filter = BloomFilter::new(10, 0.0001, rand::random(), BloomUpdateFlag::All)?;
//! filter.insert_hash(&txid);
//!
//! assert!(filter.matches_hash(&txid));
//! send(filter.to_filter_load());
//! ```

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{
    BloomFilter, BloomUpdateFlag, FilterAdd, FilterClear, FilterConfig, FilterConfigBuilder,
    FilterLoad, MAX_FILTER_ADD_DATA, MAX_FILTER_BYTES, MAX_HASH_FUNCS,
};
pub use error::FilterError;
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
pub use ports::TransactionMatcher;
pub use service::PeerFilter;
