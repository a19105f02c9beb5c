//! # Domain Entities
//!
//! The partial Merkle tree, the merkleblock envelope around it, and the
//! result of verifying one.
//!
//! Wire layout of the merkleblock body:
//!
//! ```text
//! [block header][u32 total transactions]
//! [varint hash count][count x 32-byte hash, natural byte order]
//! [varint flag byte length][flag bytes, least significant bit first]
//! ```

use std::io::{self, Read, Write};

use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use shared_types::{
    read_var_bytes, write_var_bytes, BlockHeader, Decodable, DecodeError, Encodable, Hash256,
    VarInt,
};

use super::errors::ProofError;
use crate::config::ProofLimits;

/// Pruned encoding of a block's Merkle tree
///
/// The tree's shape is derived from `total_transactions` alone. `flags`
/// is a pre-order traversal script: a set bit on an interior node means
/// "descend", on a leaf it means "matched". `hashes` holds one digest per
/// node where the traversal stops.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PartialMerkleTree {
    /// Transactions in the source block
    pub total_transactions: u32,
    /// Digests in traversal order
    pub hashes: Vec<Hash256>,
    /// Traversal flags; a decoded tree includes the zero padding of its last byte
    pub flags: BitVec<u8, Lsb0>,
}

impl PartialMerkleTree {
    /// Assemble a tree from wire fields
    pub fn from_parts(total_transactions: u32, hashes: Vec<Hash256>, flag_bytes: Vec<u8>) -> Self {
        Self {
            total_transactions,
            hashes,
            flags: BitVec::from_vec(flag_bytes),
        }
    }

    /// Flags packed least significant bit first, zero padded to a byte boundary
    pub fn flag_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.flags.len().div_ceil(8)];
        for idx in self.flags.iter_ones() {
            bytes[idx / 8] |= 1 << (idx % 8);
        }
        bytes
    }

    /// Decode, refusing hash counts and flag lengths above `limits`
    pub fn consensus_decode_with<R: Read + ?Sized>(
        r: &mut R,
        limits: &ProofLimits,
    ) -> Result<Self, DecodeError> {
        let total_transactions = u32::consensus_decode(r)?;

        let VarInt(count) = VarInt::consensus_decode(r)?;
        let max = u64::from(limits.max_transactions);
        if count > max {
            return Err(DecodeError::OversizedLength { length: count, max });
        }
        let mut hashes = Vec::new();
        for _ in 0..count {
            hashes.push(Hash256::consensus_decode(r)?);
        }

        let flag_bytes = read_var_bytes(r, limits.max_flag_bytes as u64)?;
        Ok(Self::from_parts(total_transactions, hashes, flag_bytes))
    }
}

impl Encodable for PartialMerkleTree {
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        let mut len = self.total_transactions.consensus_encode(w)?;
        len += VarInt(self.hashes.len() as u64).consensus_encode(w)?;
        for hash in &self.hashes {
            len += hash.consensus_encode(w)?;
        }
        len += write_var_bytes(w, &self.flag_bytes())?;
        Ok(len)
    }
}

impl Decodable for PartialMerkleTree {
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
        Self::consensus_decode_with(r, &ProofLimits::default())
    }
}

/// A block header plus the partial Merkle tree for the transactions a peer asked about
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MerkleBlock {
    /// Header of the block the proof is for
    pub header: BlockHeader,
    /// Proof over the block's transaction ids
    pub txn: PartialMerkleTree,
}

impl MerkleBlock {
    /// Decode a whole message body under `limits`
    pub fn deserialize_with(bytes: &[u8], limits: &ProofLimits) -> Result<Self, ProofError> {
        let mut cursor = bytes;
        let block = Self::consensus_decode_with(&mut cursor, limits)?;
        if !cursor.is_empty() {
            return Err(DecodeError::TrailingData(cursor.len()).into());
        }
        Ok(block)
    }

    /// Decode from a reader under `limits`
    pub fn consensus_decode_with<R: Read + ?Sized>(
        r: &mut R,
        limits: &ProofLimits,
    ) -> Result<Self, DecodeError> {
        Ok(Self {
            header: BlockHeader::consensus_decode(r)?,
            txn: PartialMerkleTree::consensus_decode_with(r, limits)?,
        })
    }
}

impl Encodable for MerkleBlock {
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        let mut len = self.header.consensus_encode(w)?;
        len += self.txn.consensus_encode(w)?;
        Ok(len)
    }
}

impl Decodable for MerkleBlock {
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
        Self::consensus_decode_with(r, &ProofLimits::default())
    }
}

/// A transaction the proof marks as matched
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchedTransaction {
    /// Index of the transaction within the block
    pub position: u32,
    /// Transaction id
    pub txid: Hash256,
}

/// Outcome of a successful proof verification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedMatches {
    /// Root recovered from the proof; equal to the header's Merkle root
    pub root: Hash256,
    /// Matched transactions in block order
    pub matches: Vec<MatchedTransaction>,
}

impl VerifiedMatches {
    /// Matched transaction ids in block order
    pub fn txids(&self) -> impl Iterator<Item = &Hash256> + '_ {
        self.matches.iter().map(|m| &m.txid)
    }
}
