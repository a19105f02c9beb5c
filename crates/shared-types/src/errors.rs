//! # Error Types
//!
//! Errors raised while reading consensus-encoded data.

use std::io;

use thiserror::Error;

/// Errors that can occur when decoding wire data.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The reader ran dry or failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A CompactSize integer used more bytes than its value needs.
    #[error("Non-minimal varint: {value} encoded with prefix {prefix:#04x}")]
    NonMinimalVarInt { prefix: u8, value: u64 },

    /// A length prefix exceeds what the caller is willing to allocate.
    #[error("Length {length} exceeds maximum {max}")]
    OversizedLength { length: u64, max: u64 },

    /// Bytes remained after the value was fully decoded.
    #[error("Trailing data: {0} bytes left after decoding")]
    TrailingData(usize),

    /// A field carried a value outside its domain.
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl DecodeError {
    /// True when the input simply ended early.
    pub fn is_unexpected_eof(&self) -> bool {
        matches!(self, DecodeError::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}
