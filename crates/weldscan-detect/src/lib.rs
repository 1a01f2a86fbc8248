//! weldscan-detect - Tiled-inference defect detection pipeline
//!
//! Orchestrates the full detection flow for a weld/pipe X-ray image:
//!
//! 1. Partition the image into fixed-size overlapping horizontal tiles
//! 2. Run the contrast-enhancement stack on each tile
//! 3. Hand each enhanced tile to the [`DetectionBackend`]
//! 4. Offset tile-local boxes/masks back into full-image coordinates
//! 5. Bucket results into report regions and format the two output
//!    artifacts (raw predictions text, region report CSV)
//!
//! The detection model itself is an external collaborator behind the
//! [`DetectionBackend`] trait: constructed once, injected into the
//! pipeline, and reused across requests. Backend failures are fatal for
//! the request - a missing or corrupt model makes all inference
//! meaningless, so nothing is retried and no partial result is returned.

pub mod backend;
pub mod config;
mod error;
pub mod labels;
pub mod pipeline;
pub mod reconcile;
pub mod report;
pub mod tile;

pub use backend::{
    BackendError, Detection, DetectionBackend, InferenceMode, MaskInstance, TilePrediction,
};
pub use config::PipelineConfig;
pub use error::{DetectError, DetectResult};
pub use labels::defect_label;
pub use pipeline::{Pipeline, PipelineOutput};
pub use report::{BoxRecord, PolygonRecord};
pub use tile::{tile_count, tile_offsets, tiles};
