//! Filter update policy
//!
//! The flag tells the node's transaction scanner what to add back into the
//! filter after a match, so that later spends of matched outputs keep
//! matching. The filter's own insert and match operations never read it.

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};
use shared_types::{Decodable, DecodeError, Encodable};

use crate::error::FilterError;

/// What a node inserts into a peer's filter when a transaction matches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum BloomUpdateFlag {
    /// Never update the filter; the client adds outpoints itself.
    #[default]
    None = 0,
    /// Insert the outpoint of every output whose script matched.
    All = 1,
    /// Insert outpoints only for pay-to-pubkey and bare multisig outputs.
    P2PubkeyOnly = 2,
}

impl BloomUpdateFlag {
    /// Wire value of the flag.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for BloomUpdateFlag {
    type Error = FilterError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(BloomUpdateFlag::None),
            1 => Ok(BloomUpdateFlag::All),
            2 => Ok(BloomUpdateFlag::P2PubkeyOnly),
            other => Err(FilterError::UnknownUpdateFlag(other)),
        }
    }
}

impl Encodable for BloomUpdateFlag {
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        self.as_u8().consensus_encode(w)
    }
}

impl Decodable for BloomUpdateFlag {
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
        let value = u8::consensus_decode(r)?;
        BloomUpdateFlag::try_from(value).map_err(|e| DecodeError::InvalidValue(e.to_string()))
    }
}
