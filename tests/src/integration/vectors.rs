//! # Wire Vectors
//!
//! Byte-exact merkleblock encoding for a single-transaction block with the
//! extended (stake-carrying) header.

/// Header of a block whose only transaction is its coinbase.
pub const BLOCK3_HEADER_HEX: &str = concat!(
    "01000000",
    "79cda856b143d9db2c1caff01d1aecc8630d30625d10e8b4b8b0000000000000",
    "b50cc069d6a3e33e3ff84a5c41d9d3febe7c770fdcc96b2c3ff60abe184f1963",
    "67291b4d",
    "4c86041b",
    "8fa45d63",
    "e965ffd002cd6ad0e2dc402b8044de833e06b23127ea8c3d80aec91410771495",
    "56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
    "0000000000000000000000000000000000000000000000000000000000000000",
    "ffffffff",
    "00",
);

/// Coinbase txid, display order.
pub const BLOCK3_TXID: &str = "63194f18be0af63f2c6bc9dc0f777cbefed3d9415c4af83f3ee3a3d669c00cb5";

/// Tree section of the expected merkleblock: one transaction, one hash, flags `0x01`.
pub const BLOCK3_TREE_HEX: &str = concat!(
    "01000000",
    "01",
    "b50cc069d6a3e33e3ff84a5c41d9d3febe7c770fdcc96b2c3ff60abe184f1963",
    "01",
    "01",
);

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{deserialize, serialize, BlockHeader, Hash256};
    use spv_bloom_filter::{BloomFilter, BloomUpdateFlag};
    use spv_merkle_block::{MatchedTransaction, MerkleBlock, MerkleBlockService, ProofLimits};

    fn block3() -> (BlockHeader, Hash256) {
        let header: BlockHeader = deserialize(&hex::decode(BLOCK3_HEADER_HEX).unwrap()).unwrap();
        let txid: Hash256 = BLOCK3_TXID.parse().unwrap();
        (header, txid)
    }

    #[test]
    fn test_block3_header_round_trips() {
        let (header, txid) = block3();
        assert_eq!(header.version, 1);
        assert_eq!(header.merkle_root, txid);
        assert!(header.block_sig.is_empty());
        assert_eq!(hex::encode(serialize(&header)), BLOCK3_HEADER_HEX);
    }

    #[test]
    fn test_block3_merkle_block_bytes() {
        let (header, txid) = block3();
        let mut filter = BloomFilter::new(10, 0.000_001, 0, BloomUpdateFlag::All).unwrap();
        filter.insert_hash(&txid);

        let (merkle_block, positions) = MerkleBlock::from_filter(header, &[txid], &filter).unwrap();
        assert_eq!(positions, vec![0]);

        let expected = format!("{BLOCK3_HEADER_HEX}{BLOCK3_TREE_HEX}");
        assert_eq!(hex::encode(serialize(&merkle_block)), expected);
    }

    #[test]
    fn test_block3_client_verification() {
        let bytes = hex::decode(format!("{BLOCK3_HEADER_HEX}{BLOCK3_TREE_HEX}")).unwrap();
        let service = MerkleBlockService::new(ProofLimits::default()).unwrap();

        let (block, verified) = service.decode_and_verify(&bytes).unwrap();
        let (_, txid) = block3();
        assert_eq!(block.txn.total_transactions, 1);
        assert_eq!(verified.root, txid);
        assert_eq!(
            verified.matches,
            vec![MatchedTransaction { position: 0, txid }]
        );
    }
}
