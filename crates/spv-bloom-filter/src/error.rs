//! Error types for the bloom filter crate

use shared_types::DecodeError;
use thiserror::Error;

/// Errors that can occur while building, loading or updating a filter
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Filter size exceeds maximum: {size} > {max} bytes")]
    FilterTooLarge { size: usize, max: usize },

    #[error("Too many hash functions: {count} > {max}")]
    TooManyHashFuncs { count: u32, max: u32 },

    #[error("Invalid false positive rate: {fpr} (must be strictly between 0 and 1)")]
    InvalidFalsePositiveRate { fpr: f64 },

    #[error("Filter element too large: {size} > {max} bytes")]
    ElementTooLarge { size: usize, max: usize },

    #[error("Unknown bloom update flag: {0}")]
    UnknownUpdateFlag(u8),

    #[error("No filter loaded")]
    NoFilterLoaded,

    #[error("Invalid filter configuration: {0}")]
    InvalidConfig(String),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl FilterError {
    /// True for errors caused by a filter exceeding size or round ceilings.
    pub fn is_size_limit(&self) -> bool {
        matches!(
            self,
            FilterError::FilterTooLarge { .. }
                | FilterError::TooManyHashFuncs { .. }
                | FilterError::ElementTooLarge { .. }
                | FilterError::Decode(DecodeError::OversizedLength { .. })
        )
    }
}
