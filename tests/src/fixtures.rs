//! Shared block fixtures.

use shared_types::{sha256d, BlockHeader, Hash256};
use spv_merkle_block::{merkle_root, ProofError};

/// Deterministic transaction ids `0..count`.
pub fn txids(count: u32) -> Vec<Hash256> {
    (0..count).map(|i| sha256d(&i.to_le_bytes())).collect()
}

/// A header committing to `txids`.
pub fn header_for(txids: &[Hash256]) -> Result<BlockHeader, ProofError> {
    Ok(BlockHeader {
        version: 1,
        merkle_root: merkle_root(txids)?,
        time: 1_504_695_029,
        bits: 0x1d00_ffff,
        ..Default::default()
    })
}

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
