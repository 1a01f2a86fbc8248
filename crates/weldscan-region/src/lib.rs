//! weldscan-region - Mask contours and region bucketing
//!
//! This crate turns binary instance masks into closed polygons and assigns
//! polygons to fixed-width report regions:
//!
//! - External-contour extraction (component labeling + border following)
//! - Largest-contour selection for mask-to-polygon conversion
//! - Region-index bucketing of polygon vertices

pub mod bucket;
pub mod contour;
mod error;

pub use bucket::{region_width, regions_touched};
pub use contour::{external_contours, largest_external_contour};
pub use error::{RegionError, RegionResult};
