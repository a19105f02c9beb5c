//! # Malformed Merkle Blocks
//!
//! Proofs a malicious full node can send a light client. Each is decoded
//! from raw bytes and pushed through the same path as honest traffic.
//!
//! | Attack | Expected rejection |
//! |--------|--------------------|
//! | Zero or inflated transaction count | Limit |
//! | Oversized hash or flag length prefix | Limit, before allocation |
//! | Surplus or missing hashes | Encoding |
//! | Surplus flag bytes, non-zero padding | Encoding |
//! | Substituted hash | Verification |

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use shared_types::{serialize, BlockHeader, Hash256, VarInt};
    use spv_merkle_block::{
        ErrorKind, MerkleBlock, MerkleBlockService, PartialMerkleTree, ProofError, ProofLimits,
        MAX_FLAG_BYTES, MAX_TX_PER_BLOCK,
    };

    use crate::fixtures::{header_for, txids};

    fn service() -> MerkleBlockService {
        MerkleBlockService::new(ProofLimits::default()).unwrap()
    }

    fn wire(header: &BlockHeader, total: u32, hashes: &[Hash256], flags: &[u8]) -> Vec<u8> {
        serialize(&MerkleBlock {
            header: header.clone(),
            txn: PartialMerkleTree::from_parts(total, hashes.to_vec(), flags.to_vec()),
        })
    }

    /// Honest proof for one match in an eight transaction block.
    fn honest() -> (BlockHeader, MerkleBlock) {
        let block_txids = txids(8);
        let header = header_for(&block_txids).unwrap();
        let wanted: HashSet<Hash256> = [block_txids[2]].into_iter().collect();
        let (block, _) = MerkleBlock::from_txids(header.clone(), &block_txids, &wanted).unwrap();
        (header, block)
    }

    fn reject(bytes: &[u8]) -> ProofError {
        service().decode_and_verify(bytes).unwrap_err()
    }

    // =========================================================================
    // TRANSACTION COUNT
    // =========================================================================

    #[test]
    fn test_zero_transactions() {
        let header = BlockHeader::default();
        let err = reject(&wire(&header, 0, &[Hash256::ZERO], &[0]));
        assert!(matches!(err, ProofError::NoTransactions));
        assert_eq!(err.kind(), ErrorKind::Limit);
    }

    #[test]
    fn test_inflated_transaction_count() {
        let header = BlockHeader::default();
        let err = reject(&wire(&header, u32::MAX, &[Hash256::ZERO], &[0]));
        assert!(matches!(err, ProofError::TooManyTransactions { .. }));
        assert_eq!(err.kind(), ErrorKind::Limit);
    }

    #[test]
    fn test_largest_block_single_hash_is_cheap() {
        // A pruned root needs one hash whatever the block size.
        let root = Hash256::from_bytes([0x77; 32]);
        let header = BlockHeader {
            merkle_root: root,
            ..Default::default()
        };
        let (_, verified) = service()
            .decode_and_verify(&wire(&header, MAX_TX_PER_BLOCK, &[root], &[0]))
            .unwrap();
        assert_eq!(verified.root, root);
        assert!(verified.matches.is_empty());
    }

    // =========================================================================
    // LENGTH PREFIXES
    // =========================================================================

    #[test]
    fn test_hash_count_prefix_over_limit() {
        let mut bytes = serialize(&BlockHeader::default());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&serialize(&VarInt(u64::from(MAX_TX_PER_BLOCK) + 1)));

        let err = reject(&bytes);
        assert!(matches!(err, ProofError::Decode(_)));
        assert_eq!(err.kind(), ErrorKind::Limit);
    }

    #[test]
    fn test_flag_length_prefix_over_limit() {
        let mut bytes = serialize(&BlockHeader::default());
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&serialize(&VarInt(1)));
        bytes.extend_from_slice(&[0x33; 32]);
        bytes.extend_from_slice(&serialize(&VarInt(MAX_FLAG_BYTES as u64 + 1)));

        let err = reject(&bytes);
        assert_eq!(err.kind(), ErrorKind::Limit);
    }

    #[test]
    fn test_truncated_message() {
        let (_, block) = honest();
        let bytes = serialize(&block);
        let err = reject(&bytes[..bytes.len() - 1]);
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    // =========================================================================
    // TRAVERSAL CONSUMPTION
    // =========================================================================

    #[test]
    fn test_surplus_hash() {
        let (header, block) = honest();
        let mut hashes = block.txn.hashes.clone();
        hashes.push(Hash256::from_bytes([0xEE; 32]));

        let err = reject(&wire(&header, 8, &hashes, &block.txn.flag_bytes()));
        assert!(matches!(err, ProofError::UnusedHashes { .. }));
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn test_missing_hash() {
        let (header, block) = honest();
        let hashes = &block.txn.hashes[..block.txn.hashes.len() - 1];

        let err = reject(&wire(&header, 8, hashes, &block.txn.flag_bytes()));
        assert!(matches!(err, ProofError::HashesExhausted));
    }

    #[test]
    fn test_surplus_flag_byte() {
        let (header, block) = honest();
        let mut flags = block.txn.flag_bytes();
        flags.push(0);

        let err = reject(&wire(&header, 8, &block.txn.hashes, &flags));
        assert!(matches!(err, ProofError::UnusedFlagBytes { used: 1, total: 2 }));
    }

    #[test]
    fn test_set_padding_bit() {
        let (header, block) = honest();
        let used_bits = block.txn.flags.len();
        assert!(used_bits < 8);
        let mut flags = block.txn.flag_bytes();
        flags[0] |= 0x80;

        let err = reject(&wire(&header, 8, &block.txn.hashes, &flags));
        assert!(matches!(err, ProofError::NonZeroPadding(n) if n == used_bits));
    }

    #[test]
    fn test_substituted_hash() {
        let (header, block) = honest();
        let mut hashes = block.txn.hashes.clone();
        hashes[0] = Hash256::from_bytes([0xEE; 32]);

        let err = reject(&wire(&header, 8, &hashes, &block.txn.flag_bytes()));
        assert!(matches!(err, ProofError::RootMismatch { .. }));
        assert_eq!(err.kind(), ErrorKind::Verification);
    }

    // =========================================================================
    // DUPLICATED LAST TRANSACTION
    // =========================================================================

    #[test]
    fn test_duplicated_tail_shares_root() {
        // [A, B, C] and [A, B, C, C] hash to the same root. A proof attests
        // inclusion under the header, not the block's transaction count.
        let three = txids(3);
        let mut four = three.clone();
        four.push(three[2]);
        let header = header_for(&three).unwrap();
        assert_eq!(header.merkle_root, header_for(&four).unwrap().merkle_root);

        let wanted: HashSet<Hash256> = [three[2]].into_iter().collect();
        let (honest, _) = MerkleBlock::from_txids(header.clone(), &three, &wanted).unwrap();
        let (padded, _) = MerkleBlock::from_txids(header, &four, &wanted).unwrap();

        let honest = service().verify(&honest).unwrap();
        let padded = service().verify(&padded).unwrap();
        assert_eq!(honest.root, padded.root);
        assert_eq!(honest.matches.len(), 1);
        assert_eq!(padded.matches.len(), 2);
        assert_eq!(padded.matches[0].txid, padded.matches[1].txid);
    }
}
