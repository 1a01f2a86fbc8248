//! weldscan-filter - Contrast enhancement for weld X-ray imagery
//!
//! This crate provides the image filtering operations used to prepare
//! detector input:
//!
//! - Homomorphic filtering (frequency-domain illumination/detail separation)
//! - Relief filtering (diagonal-difference gradient accentuation)
//! - CLAHE (clip-limited adaptive histogram equalization)
//! - Grayscale and color erosion (brick structuring element)
//! - The combined 3-channel enhancement stack consumed by the detector
//!
//! The enhancement stack replaces raw RGB as detector input; its filter
//! order, clip limit, and channel order must not change, because the
//! detector's weights were trained on exactly this representation.

pub mod clahe;
pub mod enhance;
mod error;
pub mod homomorphic;
pub mod morph;
pub mod relief;

pub use error::{FilterError, FilterResult};

// Re-export commonly used items
pub use clahe::{DEFAULT_CLIP_LIMIT, DEFAULT_GRID_SIZE, clahe, clahe_with_grid};
pub use enhance::{EnhanceParams, enhance_stack};
pub use homomorphic::{HomomorphicFilter, LowpassShape};
pub use morph::{erode_gray, erode_rgb};
pub use relief::{DEFAULT_RELIEF_BIAS, relief};
