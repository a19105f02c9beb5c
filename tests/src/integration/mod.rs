//! # Integration Tests
//!
//! A full node serving a light client: the client loads a filter, the
//! node answers with merkle blocks, the client verifies them.

pub mod vectors;
