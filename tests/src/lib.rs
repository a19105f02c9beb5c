//! # SPV Filtering Test Suite
//!
//! Cross-crate tests for the bloom filter and merkle block crates.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/      # Full-node to light-client flows
//! │   ├── spv_flow.rs
//! │   └── vectors.rs    # Byte-exact wire vectors
//! │
//! └── exploits/         # Hostile peers
//!     ├── malformed_proofs.rs
//!     └── hostile_filters.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p spv-tests
//! cargo test -p spv-tests exploits::
//!
//! # Benchmarks
//! cargo bench -p spv-tests
//! ```

pub mod exploits;
pub mod fixtures;
pub mod integration;
