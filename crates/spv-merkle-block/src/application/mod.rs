//! # Application Layer
//!
//! Service wrapping build and verify with limits, logging and metrics.

pub mod service;

pub use service::MerkleBlockService;
