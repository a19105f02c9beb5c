//! # Core Domain Entities
//!
//! The value types the filtering crates exchange:
//!
//! - [`Hash256`]: the 32-byte digest used for txids, block hashes and Merkle nodes
//! - [`OutPoint`]: reference to one output of a previous transaction
//! - [`BlockHeader`]: the fixed-width header a Merkle block carries

use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::encoding::{read_var_bytes, write_var_bytes, Decodable, Encodable};
use crate::errors::DecodeError;

/// Size of a digest in bytes.
pub const HASH_SIZE: usize = 32;

/// Largest block signature accepted when decoding a header.
pub const MAX_BLOCK_SIG_LEN: u64 = 520;

// =============================================================================
// DIGEST
// =============================================================================

/// A 32-byte double-SHA256 digest.
///
/// Bytes are kept in natural (internal) order, which is the order used on
/// the wire and fed into hashing. `Display` and `FromStr` use the reversed
/// order that block explorers and RPC interfaces show.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hash256([u8; HASH_SIZE]);

impl Hash256 {
    /// The all-zero digest.
    pub const ZERO: Hash256 = Hash256([0u8; HASH_SIZE]);

    /// Wrap bytes that are already in internal order.
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Internal-order bytes.
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Consume into internal-order bytes.
    pub const fn to_bytes(self) -> [u8; HASH_SIZE] {
        self.0
    }

    /// Bytes in display (reversed) order.
    pub fn to_display_bytes(self) -> [u8; HASH_SIZE] {
        let mut bytes = self.0;
        bytes.reverse();
        bytes
    }
}

impl From<[u8; HASH_SIZE]> for Hash256 {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_display_bytes()))
    }
}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", self)
    }
}

impl FromStr for Hash256 {
    type Err = hex::FromHexError;

    /// Parse a digest written in display order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(s, &mut bytes)?;
        bytes.reverse();
        Ok(Self(bytes))
    }
}

impl Serialize for Hash256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

impl Encodable for Hash256 {
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        w.write_all(&self.0)?;
        Ok(HASH_SIZE)
    }
}

impl Decodable for Hash256 {
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
        let mut bytes = [0u8; HASH_SIZE];
        r.read_exact(&mut bytes)?;
        Ok(Self(bytes))
    }
}

// =============================================================================
// OUTPOINT
// =============================================================================

/// Serialized size of an outpoint.
pub const OUTPOINT_SIZE: usize = HASH_SIZE + 4;

/// A reference to a specific output of a previous transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OutPoint {
    /// Transaction containing the output.
    pub txid: Hash256,
    /// Index of the output within that transaction.
    pub vout: u32,
}

impl OutPoint {
    /// Create a new outpoint.
    pub fn new(txid: Hash256, vout: u32) -> Self {
        Self { txid, vout }
    }

    /// Wire form: txid followed by the little-endian index.
    ///
    /// This is the byte string bloom filters insert and test for outpoints.
    pub fn to_bytes(&self) -> [u8; OUTPOINT_SIZE] {
        let mut bytes = [0u8; OUTPOINT_SIZE];
        bytes[..HASH_SIZE].copy_from_slice(self.txid.as_bytes());
        bytes[HASH_SIZE..].copy_from_slice(&self.vout.to_le_bytes());
        bytes
    }
}

impl Encodable for OutPoint {
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        w.write_all(&self.to_bytes())?;
        Ok(OUTPOINT_SIZE)
    }
}

impl Decodable for OutPoint {
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
        let txid = Hash256::consensus_decode(r)?;
        let vout = u32::consensus_decode(r)?;
        Ok(Self { txid, vout })
    }
}

// =============================================================================
// BLOCK HEADER
// =============================================================================

/// The header of a block.
///
/// Carries the proof-of-stake extensions (state and UTXO roots, staked
/// prevout and block signature) after the classic six fields. The filtering
/// crates only read [`BlockHeader::merkle_root`]; the remaining fields are
/// carried so headers round-trip byte for byte.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Block version.
    pub version: i32,
    /// Hash of the previous block.
    pub prev_block: Hash256,
    /// Merkle root over the block's transaction ids.
    pub merkle_root: Hash256,
    /// Block timestamp (seconds since the Unix epoch).
    pub time: u32,
    /// Compact difficulty target.
    pub bits: u32,
    /// Nonce.
    pub nonce: u32,
    /// Root of the contract state trie.
    pub hash_state_root: Hash256,
    /// Root of the UTXO trie.
    pub hash_utxo_root: Hash256,
    /// Output staked to produce this block (null for proof-of-work blocks).
    pub prevout_stake: OutPoint,
    /// Block signature (empty for proof-of-work blocks).
    pub block_sig: Vec<u8>,
}

impl Encodable for BlockHeader {
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        let mut len = self.version.consensus_encode(w)?;
        len += self.prev_block.consensus_encode(w)?;
        len += self.merkle_root.consensus_encode(w)?;
        len += self.time.consensus_encode(w)?;
        len += self.bits.consensus_encode(w)?;
        len += self.nonce.consensus_encode(w)?;
        len += self.hash_state_root.consensus_encode(w)?;
        len += self.hash_utxo_root.consensus_encode(w)?;
        len += self.prevout_stake.consensus_encode(w)?;
        len += write_var_bytes(w, &self.block_sig)?;
        Ok(len)
    }
}

impl Decodable for BlockHeader {
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
        Ok(Self {
            version: i32::consensus_decode(r)?,
            prev_block: Hash256::consensus_decode(r)?,
            merkle_root: Hash256::consensus_decode(r)?,
            time: u32::consensus_decode(r)?,
            bits: u32::consensus_decode(r)?,
            nonce: u32::consensus_decode(r)?,
            hash_state_root: Hash256::consensus_decode(r)?,
            hash_utxo_root: Hash256::consensus_decode(r)?,
            prevout_stake: OutPoint::consensus_decode(r)?,
            block_sig: read_var_bytes(r, MAX_BLOCK_SIG_LEN)?,
        })
    }
}
