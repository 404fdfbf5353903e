//! Error types for palette operations

use std::num::ParseIntError;

use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// Invalid hexadecimal character encountered
    #[error("invalid hex character: {0}")]
    InvalidHex(#[from] ParseIntError),
}

/// Error type for palette validation.
///
/// Returned when a palette is empty, holds the same color twice (which would
/// make an index ambiguous), or has more entries than a `u8` index can hold.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PaletteError {
    #[error("palette cannot be empty")]
    EmptyPalette,
    #[error("duplicate color found at index {index}")]
    DuplicateColor {
        /// Index where the duplicate was found
        index: usize,
    },
    #[error("palette has {len} colors, at most 256 are supported")]
    TooManyColors { len: usize },
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
