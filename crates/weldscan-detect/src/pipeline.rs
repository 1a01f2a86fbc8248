//! Pipeline orchestration
//!
//! One `Pipeline` owns a validated configuration and an injected
//! detection backend, and turns a source image into the two output
//! artifacts. Tiles are processed strictly sequentially in ascending
//! x-offset order, which makes the raw-predictions artifact
//! deterministic for a deterministic backend; tiles share no mutable
//! state, so nothing here precludes a concurrent scheduler that collects
//! results in tile-index order.

use crate::backend::{DetectionBackend, InferenceMode};
use crate::config::PipelineConfig;
use crate::error::DetectResult;
use crate::labels::defect_label;
use crate::reconcile::{reconcile_detection, reconcile_polygon};
use crate::report::{
    BoxRecord, PolygonRecord, RegionNames, format_box_line, format_polygon_line, raw_predictions,
    region_report_csv,
};
use crate::tile::{tile_count, tiles};
use tracing::{debug, info};
use weldscan_core::{Point, Polygon, RgbImage};
use weldscan_filter::enhance_stack;
use weldscan_region::{largest_external_contour, region_width, regions_touched};

/// Everything a request produces.
#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    /// Reconciled box-mode detections, accumulation order.
    pub boxes: Vec<BoxRecord>,
    /// Reconciled polygon-mode instances, accumulation order.
    pub polygons: Vec<PolygonRecord>,
    /// Raw-predictions artifact (newline-delimited text; may be empty).
    pub raw_predictions: String,
    /// Region-report artifact (CSV with header, one row per region).
    pub region_report: String,
}

/// Tiled-inference pipeline with an injected backend.
pub struct Pipeline<B: DetectionBackend> {
    config: PipelineConfig,
    backend: B,
}

impl<B: DetectionBackend> Pipeline<B> {
    /// Build a pipeline from a validated configuration and a loaded
    /// backend handle.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DetectError::InvalidConfig`] if the configuration
    /// is inconsistent.
    pub fn new(config: PipelineConfig, backend: B) -> DetectResult<Self> {
        config.validate()?;
        Ok(Self { config, backend })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Decode image bytes and run the pipeline.
    ///
    /// # Errors
    ///
    /// Undecodable bytes fail with a decode error before any tile is
    /// processed; no partial output is produced.
    pub fn run_bytes(&self, bytes: &[u8]) -> DetectResult<PipelineOutput> {
        let image = weldscan_io::decode_rgb(bytes)?;
        self.run(&image)
    }

    /// Run the pipeline over a decoded image.
    ///
    /// An image narrower than one tile yields zero tiles and empty
    /// artifacts (the region report still lists every region); this is a
    /// valid terminal state, not an error.
    ///
    /// # Errors
    ///
    /// Propagates enhancement errors and backend failures; a backend
    /// failure aborts the whole request without retry.
    pub fn run(&self, image: &RgbImage) -> DetectResult<PipelineOutput> {
        let cfg = &self.config;
        let expected = tile_count(image.width(), cfg.tile, cfg.stride);
        info!(
            width = image.width(),
            height = image.height(),
            tiles = expected,
            mode = ?cfg.mode,
            "starting tiled inference"
        );

        let rw = region_width(image.width(), cfg.regions);
        let mut boxes = Vec::new();
        let mut polygons: Vec<PolygonRecord> = Vec::new();
        let mut lines = Vec::new();
        let mut names = RegionNames::new();

        for (x0, crop) in tiles(image, cfg.tile, cfg.stride) {
            debug!(x_offset = x0, "processing tile");
            let enhanced = enhance_stack(&crop, &cfg.enhance)?;
            let prediction = self.backend.predict(&enhanced, cfg.mode)?;

            match cfg.mode {
                InferenceMode::Boxes => {
                    for det in &prediction.detections {
                        let det = reconcile_detection(det, x0);
                        let rec = BoxRecord {
                            bbox: det.bbox,
                            confidence: det.confidence,
                            class_id: det.class_id,
                        };
                        record_regions(&mut names, &box_outline(&rec), rw, cfg.regions, rec.class_id)?;
                        lines.push(format_box_line(&rec));
                        boxes.push(rec);
                    }
                }
                InferenceMode::Masks => {
                    for instance in &prediction.masks {
                        let mask = instance.mask.resize_nearest(cfg.tile, cfg.tile)?;
                        // degenerate masks with no contour are dropped,
                        // not reported as errors
                        let Some(contour) = largest_external_contour(&mask) else {
                            debug!(
                                x_offset = x0,
                                class_id = instance.class_id,
                                "empty mask, instance dropped"
                            );
                            continue;
                        };
                        let polygon = reconcile_polygon(&contour, x0);
                        let rec = PolygonRecord {
                            class_id: instance.class_id,
                            polygon,
                        };
                        record_regions(&mut names, &rec.polygon, rw, cfg.regions, rec.class_id)?;
                        lines.push(format_polygon_line(&rec));
                        polygons.push(rec);
                    }
                }
            }
        }

        info!(
            detections = boxes.len() + polygons.len(),
            "tiled inference finished"
        );
        Ok(PipelineOutput {
            boxes,
            polygons,
            raw_predictions: raw_predictions(&lines),
            region_report: region_report_csv(&names, cfg.regions),
        })
    }
}

/// Record one instance's defect name in every region its vertices touch.
fn record_regions(
    names: &mut RegionNames,
    polygon: &Polygon,
    region_width: f64,
    regions: u32,
    class_id: u32,
) -> DetectResult<()> {
    for region in regions_touched(polygon, region_width, regions)? {
        names.entry(region).or_default().insert(defect_label(class_id));
    }
    Ok(())
}

/// Corner outline of a box, so box-mode detections bucket into regions by
/// the same vertex rule polygons use.
fn box_outline(rec: &BoxRecord) -> Polygon {
    Polygon::new(vec![
        Point::new(rec.bbox.xmin, rec.bbox.ymin),
        Point::new(rec.bbox.xmax, rec.bbox.ymin),
        Point::new(rec.bbox.xmax, rec.bbox.ymax),
        Point::new(rec.bbox.xmin, rec.bbox.ymax),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, Detection, MaskInstance, TilePrediction};
    use weldscan_core::{BBox, GrayImage};

    /// Deterministic fake backend: one fixed box and one fixed square
    /// mask per tile.
    struct FakeBackend;

    impl DetectionBackend for FakeBackend {
        fn predict(
            &self,
            _tile: &RgbImage,
            _mode: InferenceMode,
        ) -> Result<TilePrediction, BackendError> {
            let mut mask = vec![0u8; 16];
            // 2x2 block at (1,1) in a 4x4 model-resolution mask
            for (x, y) in [(1u32, 1u32), (2, 1), (1, 2), (2, 2)] {
                mask[(y * 4 + x) as usize] = 1;
            }
            Ok(TilePrediction {
                detections: vec![Detection {
                    class_id: 0,
                    confidence: 0.9,
                    bbox: BBox::new(10.0, 10.0, 50.0, 50.0),
                }],
                masks: vec![MaskInstance {
                    class_id: 4,
                    mask: GrayImage::from_raw(4, 4, mask).unwrap(),
                }],
            })
        }
    }

    struct FailingBackend;

    impl DetectionBackend for FailingBackend {
        fn predict(
            &self,
            _tile: &RgbImage,
            _mode: InferenceMode,
        ) -> Result<TilePrediction, BackendError> {
            Err(BackendError::new("model unavailable"))
        }
    }

    fn small_config(mode: InferenceMode) -> PipelineConfig {
        PipelineConfig {
            tile: 16,
            stride: 12,
            regions: 4,
            mode,
            ..PipelineConfig::default()
        }
    }

    fn flat_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_raw(width, height, vec![128; (width * height * 3) as usize]).unwrap()
    }

    #[test]
    fn test_box_mode_offsets_lines() {
        let pipeline = Pipeline::new(small_config(InferenceMode::Boxes), FakeBackend).unwrap();
        let image = flat_image(40, 16); // offsets 0, 12, 24
        let out = pipeline.run(&image).unwrap();
        assert_eq!(out.boxes.len(), 3);
        let lines: Vec<_> = out.raw_predictions.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "10.00 10.00 50.00 50.00 0.9000 0");
        assert_eq!(lines[1], "22.00 10.00 62.00 50.00 0.9000 0");
        assert_eq!(lines[2], "34.00 10.00 74.00 50.00 0.9000 0");
    }

    #[test]
    fn test_mask_mode_polygons_scaled_and_offset() {
        let pipeline = Pipeline::new(small_config(InferenceMode::Masks), FakeBackend).unwrap();
        let image = flat_image(28, 16); // offsets 0, 12
        let out = pipeline.run(&image).unwrap();
        assert_eq!(out.polygons.len(), 2);
        // 4x4 mask upsampled to 16x16: the 2x2 block becomes 8x8 at (4,4)
        let first = &out.polygons[0];
        assert_eq!(first.class_id, 4);
        assert!(first.polygon.points().iter().all(|p| p.x >= 4.0 && p.x <= 11.0));
        // second tile's polygon is shifted by its offset
        let second = &out.polygons[1];
        assert!(second.polygon.points().iter().all(|p| p.x >= 16.0));
    }

    #[test]
    fn test_no_tiles_valid_empty_output() {
        let pipeline = Pipeline::new(small_config(InferenceMode::Masks), FakeBackend).unwrap();
        let image = flat_image(8, 8); // narrower than one tile
        let out = pipeline.run(&image).unwrap();
        assert!(out.polygons.is_empty());
        assert_eq!(out.raw_predictions, "");
        // region report still lists every region
        assert_eq!(out.region_report.lines().count(), 5);
    }

    #[test]
    fn test_backend_failure_fatal() {
        let pipeline = Pipeline::new(small_config(InferenceMode::Boxes), FailingBackend).unwrap();
        let image = flat_image(40, 16);
        assert!(pipeline.run(&image).is_err());
    }

    #[test]
    fn test_idempotent_output() {
        let pipeline = Pipeline::new(small_config(InferenceMode::Masks), FakeBackend).unwrap();
        let image = flat_image(40, 16);
        let a = pipeline.run(&image).unwrap();
        let b = pipeline.run(&image).unwrap();
        assert_eq!(a.raw_predictions, b.raw_predictions);
        assert_eq!(a.region_report, b.region_report);
    }

    #[test]
    fn test_region_report_names() {
        let pipeline = Pipeline::new(small_config(InferenceMode::Boxes), FakeBackend).unwrap();
        let image = flat_image(40, 16); // region width 10
        let out = pipeline.run(&image).unwrap();
        // first tile's box spans x 10..50 -> touches regions 1..=3 by its corners
        let lines: Vec<_> = out.region_report.lines().collect();
        assert_eq!(lines[0], "region,defect");
        assert!(lines[2].starts_with("1,pore"));
        assert!(lines[4].starts_with("3,pore"));
    }
}
