//! Error types for weldscan-io

use thiserror::Error;

/// Errors that can occur while decoding input imagery
#[derive(Debug, Error)]
pub enum IoError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] weldscan_core::Error),

    /// Input bytes could not be decoded as an image
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;
