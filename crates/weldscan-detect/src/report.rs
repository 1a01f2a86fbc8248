//! Output artifact formatting
//!
//! Two artifacts per request:
//!
//! - **Raw predictions**: newline-delimited text, one line per retained
//!   instance in accumulation order. Polygon mode:
//!   `<class_id> x1 y1 x2 y2 ... xn yn`; box mode:
//!   `x1 y1 x2 y2 conf class_id`. Coordinates are formatted to two
//!   decimal places, confidences to four.
//! - **Region report**: CSV with header `region,defect`, one row per
//!   region even when empty; the defect field is the comma-joined sorted
//!   set of unique defect names seen in that region, quoted when it
//!   contains a comma.

use std::collections::{BTreeMap, BTreeSet};
use weldscan_core::{BBox, Polygon};

/// One reconciled box-mode detection.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxRecord {
    pub bbox: BBox,
    pub confidence: f32,
    pub class_id: u32,
}

/// One reconciled polygon-mode instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRecord {
    pub class_id: u32,
    pub polygon: Polygon,
}

/// `x1 y1 x2 y2 conf class_id` line for one box.
pub fn format_box_line(rec: &BoxRecord) -> String {
    format!(
        "{:.2} {:.2} {:.2} {:.2} {:.4} {}",
        rec.bbox.xmin, rec.bbox.ymin, rec.bbox.xmax, rec.bbox.ymax, rec.confidence, rec.class_id
    )
}

/// `<class_id> x1 y1 ... xn yn` line for one polygon.
pub fn format_polygon_line(rec: &PolygonRecord) -> String {
    let mut line = rec.class_id.to_string();
    for p in rec.polygon.points() {
        line.push_str(&format!(" {:.2} {:.2}", p.x, p.y));
    }
    line
}

/// Join prediction lines into the raw artifact. Zero detections yield an
/// empty artifact, which is a valid terminal state.
pub fn raw_predictions(lines: &[String]) -> String {
    lines.join("\n")
}

/// Names-per-region accumulator used while tiles stream through the
/// pipeline.
pub type RegionNames = BTreeMap<u32, BTreeSet<String>>;

/// Render the region report CSV. Every region `0..regions` gets a row;
/// regions without detections have an empty defect field.
pub fn region_report_csv(names: &RegionNames, regions: u32) -> String {
    let mut out = String::from("region,defect\n");
    for region in 0..regions {
        let defect = names
            .get(&region)
            .map(|set| set.iter().cloned().collect::<Vec<_>>().join(","))
            .unwrap_or_default();
        out.push_str(&region.to_string());
        out.push(',');
        out.push_str(&csv_field(&defect));
        out.push('\n');
    }
    out
}

/// Minimal CSV quoting: wrap the field when it contains a comma, quote,
/// or newline, doubling embedded quotes.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weldscan_core::Point;

    #[test]
    fn test_box_line_formatting() {
        let rec = BoxRecord {
            bbox: BBox::new(205.0, 5.5, 210.13, 10.0),
            confidence: 0.87654,
            class_id: 4,
        };
        assert_eq!(format_box_line(&rec), "205.00 5.50 210.13 10.00 0.8765 4");
    }

    #[test]
    fn test_polygon_line_formatting() {
        let rec = PolygonRecord {
            class_id: 0,
            polygon: Polygon::new(vec![Point::new(912.0, 3.0), Point::new(913.5, 4.25)]),
        };
        assert_eq!(format_polygon_line(&rec), "0 912.00 3.00 913.50 4.25");
    }

    #[test]
    fn test_raw_predictions_empty() {
        assert_eq!(raw_predictions(&[]), "");
    }

    #[test]
    fn test_region_report_all_rows_present() {
        let mut names = RegionNames::new();
        names
            .entry(2)
            .or_default()
            .extend(["pore".to_string(), "crack".to_string()]);
        names.entry(5).or_default().insert("crack".to_string());

        let csv = region_report_csv(&names, 6);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 7); // header + 6 regions
        assert_eq!(lines[0], "region,defect");
        assert_eq!(lines[1], "0,");
        // sorted set, comma-joined, quoted because of the embedded comma
        assert_eq!(lines[3], "2,\"crack,pore\"");
        assert_eq!(lines[6], "5,crack");
    }

    #[test]
    fn test_region_report_empty_input() {
        let csv = region_report_csv(&RegionNames::new(), 3);
        assert_eq!(csv, "region,defect\n0,\n1,\n2,\n");
    }
}
