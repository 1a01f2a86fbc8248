//! Coordinate reconciliation
//!
//! Detections and mask contours are produced in tile-local coordinates
//! and must be translated into the full-image frame exactly once. Tiles
//! start at `y = 0`, so reconciliation is a pure x-shift.
//!
//! Overlapping tiles may report the same physical defect twice in the
//! overlap zone; no cross-tile deduplication or non-max suppression is
//! applied. This is accepted, documented behavior (recall-maximizing),
//! not a bug to fix here.

use crate::backend::Detection;
use weldscan_core::Polygon;

/// Shift a tile-local detection into full-image coordinates.
pub fn reconcile_detection(det: &Detection, x_offset: u32) -> Detection {
    Detection {
        class_id: det.class_id,
        confidence: det.confidence,
        bbox: det.bbox.translate(x_offset as f32, 0.0),
    }
}

/// Shift a tile-local polygon into full-image coordinates.
pub fn reconcile_polygon(poly: &Polygon, x_offset: u32) -> Polygon {
    poly.translate(x_offset as f32, 0.0)
}
