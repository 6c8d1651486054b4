//! Error types for image I/O.

use std::io;
use thiserror::Error;

/// Image I/O error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Image type this codec does not handle (color-mapped, RLE, ...).
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Truncated or inconsistent file.
    #[error("invalid file: {0}")]
    InvalidFile(String),

    /// Pixel depth other than 24 or 32 bits.
    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(String),

    /// Pixel buffer does not match the declared dimensions.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected size.
        expected: String,
        /// Actual size.
        actual: String,
    },
}

/// Result type for image I/O.
pub type IoResult<T> = Result<T, IoError>;
