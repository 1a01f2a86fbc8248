//! Weldscan - Weld/pipe X-ray defect detection for Rust
//!
//! # Overview
//!
//! Weldscan turns wide weld-seam radiographs into defect reports:
//!
//! - Contrast enhancement (homomorphic, relief, CLAHE channel stack)
//! - Fixed-size overlapping tiling for wide images
//! - Pluggable detection backend (boxes or instance masks)
//! - Coordinate reconciliation back into the full-image frame
//! - Region aggregation into a per-region defect report
//! - Scan submission orchestration for a web frontend
//!
//! # Example
//!
//! ```
//! use weldscan::GrayImage;
//!
//! // Create a blank 8-bit grayscale image
//! let img = GrayImage::new(640, 480).unwrap();
//! assert_eq!(img.width(), 640);
//! assert_eq!(img.height(), 480);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use weldscan_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use weldscan_detect as detect;
pub use weldscan_filter as filter;
pub use weldscan_io as io;
pub use weldscan_region as region;
pub use weldscan_service as service;
