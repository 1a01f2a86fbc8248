//! Detection backend boundary
//!
//! The pretrained detection/segmentation model is consumed as an opaque
//! black box: preprocessed tile in, per-tile boxes/masks/classes/scores
//! out. The backend applies its own confidence threshold, so the pipeline
//! treats every returned item as already above threshold.
//!
//! Implementations hold the loaded model for the process lifetime and are
//! injected into the pipeline explicitly; nothing here is resolved
//! through global state.

use thiserror::Error;
use weldscan_core::{BBox, GrayImage, RgbImage};

/// Which kind of output the backend is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InferenceMode {
    /// Bounding boxes with confidences.
    Boxes,
    /// Instance segmentation masks.
    #[default]
    Masks,
}

/// One detected instance in tile-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub class_id: u32,
    /// Confidence in `[0, 1]`, already above the backend's threshold.
    pub confidence: f32,
    pub bbox: BBox,
}

/// One segmented instance: a binary mask (nonzero = instance) at model
/// output resolution, which may differ from the tile size.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskInstance {
    pub class_id: u32,
    pub mask: GrayImage,
}

/// Per-tile backend output. Only the field matching the requested
/// [`InferenceMode`] is consumed.
#[derive(Debug, Clone, Default)]
pub struct TilePrediction {
    pub detections: Vec<Detection>,
    pub masks: Vec<MaskInstance>,
}

/// Backend failure. Always fatal for the request: a missing or corrupt
/// model makes every tile's inference meaningless, so the pipeline
/// propagates this without retry.
#[derive(Debug, Error)]
#[error("detection backend failure: {message}")]
pub struct BackendError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Opaque interface to the external detection model.
///
/// The handle is expected to be reentrant: one loaded model serves every
/// tile of every request for the life of the process.
pub trait DetectionBackend {
    /// Run inference on one preprocessed (enhancement-stacked) tile.
    fn predict(&self, tile: &RgbImage, mode: InferenceMode) -> Result<TilePrediction, BackendError>;
}
