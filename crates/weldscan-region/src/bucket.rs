//! Region bucketing
//!
//! The full image width is divided into a fixed number of equal-width
//! vertical slices used only for the human-readable defect summary. A
//! polygon is assigned to every region any of its vertices falls into, so
//! one defect straddling a boundary appears in both neighboring regions.

use crate::{RegionError, RegionResult};
use std::collections::BTreeSet;
use weldscan_core::Polygon;

/// Width of one report region in pixels (floating point, no rounding).
pub fn region_width(image_width: u32, regions: u32) -> f64 {
    f64::from(image_width) / f64::from(regions)
}

/// The set of distinct region indices a polygon's vertices fall into.
///
/// Each vertex maps to `floor(x / region_width)`; indices are clamped into
/// `[0, regions)` so a vertex at exactly the image's right edge stays in
/// the last region. The set is ordered, which keeps downstream report
/// rows deterministic.
///
/// # Errors
///
/// Returns [`RegionError::InvalidParameters`] when `regions` is zero or
/// `region_width` is not positive.
pub fn regions_touched(
    poly: &Polygon,
    region_width: f64,
    regions: u32,
) -> RegionResult<BTreeSet<u32>> {
    if regions == 0 {
        return Err(RegionError::InvalidParameters(
            "region count must be > 0".into(),
        ));
    }
    if region_width <= 0.0 {
        return Err(RegionError::InvalidParameters(
            "region width must be > 0".into(),
        ));
    }
    let mut set = BTreeSet::new();
    for p in poly.points() {
        let idx = (f64::from(p.x) / region_width).floor();
        let idx = if idx < 0.0 { 0 } else { idx as u32 };
        set.insert(idx.min(regions - 1));
    }
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use weldscan_core::Point;

    #[test]
    fn test_region_width() {
        assert_eq!(region_width(3000, 30), 100.0);
    }

    #[test]
    fn test_single_region() {
        let poly = Polygon::new(vec![Point::new(250.0, 10.0)]);
        let set = regions_touched(&poly, 100.0, 30).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_straddling_polygon_counted_in_both() {
        let poly = Polygon::new(vec![Point::new(95.0, 0.0), Point::new(105.0, 0.0)]);
        let set = regions_touched(&poly, 100.0, 30).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_right_edge_clamped() {
        let poly = Polygon::new(vec![Point::new(3000.0, 0.0)]);
        let set = regions_touched(&poly, 100.0, 30).unwrap();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![29]);
    }

    #[test]
    fn test_zero_regions_rejected() {
        let poly = Polygon::new(vec![Point::new(0.0, 0.0)]);
        assert!(regions_touched(&poly, 100.0, 0).is_err());
    }
}
