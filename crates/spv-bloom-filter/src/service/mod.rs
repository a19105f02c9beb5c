//! Service Layer
//!
//! Per-connection filter state on the full-node side.

pub mod peer_filter;

pub use peer_filter::PeerFilter;
