//! Error types for weldscan-detect

use crate::backend::BackendError;
use thiserror::Error;

/// Errors that can occur while running the detection pipeline
#[derive(Debug, Error)]
pub enum DetectError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] weldscan_core::Error),

    /// Contrast-enhancement error
    #[error("filter error: {0}")]
    Filter(#[from] weldscan_filter::FilterError),

    /// Contour / region bucketing error
    #[error("region error: {0}")]
    Region(#[from] weldscan_region::RegionError),

    /// Input decoding error
    #[error("io error: {0}")]
    Io(#[from] weldscan_io::IoError),

    /// Detection backend failure; fatal for the whole request
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Invalid pipeline configuration
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for pipeline operations
pub type DetectResult<T> = Result<T, DetectError>;
