//! Filter message bodies
//!
//! Wire layouts (message framing is handled by the caller):
//!
//! ```text
//! filterload   [varint len][filter bytes][u32 hash funcs][u32 tweak][u8 flag]
//! filteradd    [varint len][element]
//! filterclear  (empty)
//! ```

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};
use shared_types::{read_var_bytes, write_var_bytes, Decodable, DecodeError, Encodable};

use super::parameters::{MAX_FILTER_ADD_DATA, MAX_FILTER_BYTES};
use super::update_flag::BloomUpdateFlag;

/// `filterload`: replace the connection's filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterLoad {
    /// Raw bit array, least significant bit first within each byte
    pub data: Vec<u8>,
    /// Number of hash rounds
    pub hash_funcs: u32,
    /// Seed offset
    pub tweak: u32,
    /// Update policy for the node's scanner
    pub flags: BloomUpdateFlag,
}

impl Encodable for FilterLoad {
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        let mut len = write_var_bytes(w, &self.data)?;
        len += self.hash_funcs.consensus_encode(w)?;
        len += self.tweak.consensus_encode(w)?;
        len += self.flags.consensus_encode(w)?;
        Ok(len)
    }
}

impl Decodable for FilterLoad {
    /// Oversized bit arrays are refused before allocation; the round count
    /// is checked when the message is turned into a filter.
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
        Ok(Self {
            data: read_var_bytes(r, MAX_FILTER_BYTES as u64)?,
            hash_funcs: u32::consensus_decode(r)?,
            tweak: u32::consensus_decode(r)?,
            flags: BloomUpdateFlag::consensus_decode(r)?,
        })
    }
}

/// `filteradd`: insert one element into the loaded filter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterAdd {
    /// Element to insert
    pub data: Vec<u8>,
}

impl Encodable for FilterAdd {
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        write_var_bytes(w, &self.data)
    }
}

impl Decodable for FilterAdd {
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
        Ok(Self {
            data: read_var_bytes(r, MAX_FILTER_ADD_DATA as u64)?,
        })
    }
}

/// `filterclear`: drop the connection's filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterClear;

impl Encodable for FilterClear {
    fn consensus_encode<W: Write + ?Sized>(&self, _w: &mut W) -> io::Result<usize> {
        Ok(0)
    }
}

impl Decodable for FilterClear {
    fn consensus_decode<R: Read + ?Sized>(_r: &mut R) -> Result<Self, DecodeError> {
        Ok(FilterClear)
    }
}
