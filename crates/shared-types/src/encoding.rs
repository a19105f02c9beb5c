//! # Consensus Encoding
//!
//! Little-endian integers, raw digests and CompactSize-prefixed byte
//! strings: the handful of primitives every message body here is built from.
//!
//! Decoders that allocate take an explicit ceiling so a hostile length
//! prefix is refused before any memory is reserved for it.

use std::io::{self, Read, Write};

use crate::errors::DecodeError;

/// Types with a consensus wire encoding.
pub trait Encodable {
    /// Write `self` to `w`, returning the number of bytes written.
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize>;
}

/// Types that can be read back from their consensus wire encoding.
pub trait Decodable: Sized {
    /// Read a value from `r`.
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError>;
}

/// Encode a value into a fresh buffer.
pub fn serialize<T: Encodable + ?Sized>(value: &T) -> Vec<u8> {
    let mut buf = Vec::new();
    // Writes into a Vec cannot fail.
    let _ = value.consensus_encode(&mut buf);
    buf
}

/// Decode a value that must span the whole of `bytes`.
pub fn deserialize<T: Decodable>(bytes: &[u8]) -> Result<T, DecodeError> {
    let mut cursor = bytes;
    let value = T::consensus_decode(&mut cursor)?;
    if !cursor.is_empty() {
        return Err(DecodeError::TrailingData(cursor.len()));
    }
    Ok(value)
}

macro_rules! impl_int_encodable {
    ($($ty:ty),*) => {$(
        impl Encodable for $ty {
            fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
                let bytes = self.to_le_bytes();
                w.write_all(&bytes)?;
                Ok(bytes.len())
            }
        }

        impl Decodable for $ty {
            fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
                let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                r.read_exact(&mut bytes)?;
                Ok(<$ty>::from_le_bytes(bytes))
            }
        }
    )*};
}

impl_int_encodable!(u8, u16, u32, u64, i32);

/// CompactSize unsigned integer.
///
/// | value            | encoding          |
/// |------------------|-------------------|
/// | `< 0xFD`         | 1 byte            |
/// | `<= 0xFFFF`      | `0xFD` + u16 LE   |
/// | `<= 0xFFFF_FFFF` | `0xFE` + u32 LE   |
/// | otherwise        | `0xFF` + u64 LE   |
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct VarInt(pub u64);

impl VarInt {
    /// Number of bytes the encoding occupies.
    pub fn size(&self) -> usize {
        match self.0 {
            0..=0xFC => 1,
            0xFD..=0xFFFF => 3,
            0x1_0000..=0xFFFF_FFFF => 5,
            _ => 9,
        }
    }
}

impl Encodable for VarInt {
    fn consensus_encode<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<usize> {
        match self.0 {
            0..=0xFC => (self.0 as u8).consensus_encode(w),
            0xFD..=0xFFFF => {
                w.write_all(&[0xFD])?;
                Ok(1 + (self.0 as u16).consensus_encode(w)?)
            }
            0x1_0000..=0xFFFF_FFFF => {
                w.write_all(&[0xFE])?;
                Ok(1 + (self.0 as u32).consensus_encode(w)?)
            }
            _ => {
                w.write_all(&[0xFF])?;
                Ok(1 + self.0.consensus_encode(w)?)
            }
        }
    }
}

impl Decodable for VarInt {
    fn consensus_decode<R: Read + ?Sized>(r: &mut R) -> Result<Self, DecodeError> {
        let prefix = u8::consensus_decode(r)?;
        let (value, min) = match prefix {
            0xFF => (u64::consensus_decode(r)?, 0x1_0000_0000),
            0xFE => (u64::from(u32::consensus_decode(r)?), 0x1_0000),
            0xFD => (u64::from(u16::consensus_decode(r)?), 0xFD),
            n => return Ok(VarInt(u64::from(n))),
        };
        if value < min {
            return Err(DecodeError::NonMinimalVarInt { prefix, value });
        }
        Ok(VarInt(value))
    }
}

/// Write a CompactSize length followed by `bytes`.
pub fn write_var_bytes<W: Write + ?Sized>(w: &mut W, bytes: &[u8]) -> io::Result<usize> {
    let len = VarInt(bytes.len() as u64).consensus_encode(w)?;
    w.write_all(bytes)?;
    Ok(len + bytes.len())
}

/// Read a CompactSize-prefixed byte string no longer than `max`.
pub fn read_var_bytes<R: Read + ?Sized>(r: &mut R, max: u64) -> Result<Vec<u8>, DecodeError> {
    let VarInt(length) = VarInt::consensus_decode(r)?;
    if length > max {
        return Err(DecodeError::OversizedLength { length, max });
    }
    let mut bytes = vec![0u8; length as usize];
    r.read_exact(&mut bytes)?;
    Ok(bytes)
}
