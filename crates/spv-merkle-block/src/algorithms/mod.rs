//! # Algorithms
//!
//! - `merkle_root`: tree shape helpers and the unpruned root
//! - `partial_merkle_tree`: proof build and extract
//! - `merkle_block`: building a merkle block from a matcher, verifying one against its header

pub mod merkle_block;
pub mod merkle_root;
pub mod partial_merkle_tree;

pub use merkle_root::{calc_tree_height, calc_tree_width, merkle_root};
