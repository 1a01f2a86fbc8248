//! Pipeline configuration
//!
//! All tunables of the tiled-inference pipeline in one place. Defaults
//! reproduce the settings the detector was trained and validated with;
//! the tile size in particular is tied to the physical resolution of the
//! X-ray detector, not a free parameter.

use crate::backend::InferenceMode;
use crate::error::{DetectError, DetectResult};
use weldscan_filter::EnhanceParams;

/// Default tile edge in pixels.
pub const DEFAULT_TILE: u32 = 1140;

/// Default report region count.
pub const DEFAULT_REGIONS: u32 = 30;

/// Default model input resolution hint.
pub const DEFAULT_IMG_SIZE: u32 = 1024;

/// Default backend confidence threshold.
pub const DEFAULT_CONF_THRES: f32 = 0.05;

/// Default stride: 80% of the tile size, floor-divided.
pub fn default_stride(tile: u32) -> u32 {
    tile * 4 / 5
}

/// Configuration of one pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Tile edge; every tile is `tile x tile` pixels.
    pub tile: u32,
    /// Horizontal step between consecutive tile offsets.
    pub stride: u32,
    /// Number of equal-width report regions.
    pub regions: u32,
    /// Model input resolution, forwarded to the backend.
    pub img_size: u32,
    /// Confidence threshold, applied by the backend itself.
    pub conf_thres: f32,
    /// Requested backend output kind.
    pub mode: InferenceMode,
    /// Contrast-enhancement parameters.
    pub enhance: EnhanceParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tile: DEFAULT_TILE,
            stride: default_stride(DEFAULT_TILE),
            regions: DEFAULT_REGIONS,
            img_size: DEFAULT_IMG_SIZE,
            conf_thres: DEFAULT_CONF_THRES,
            mode: InferenceMode::default(),
            enhance: EnhanceParams::default(),
        }
    }
}

impl PipelineConfig {
    /// Check the configuration for internally inconsistent values.
    ///
    /// # Errors
    ///
    /// Returns [`DetectError::InvalidConfig`] for zero tile size, zero
    /// stride, zero region count, or a confidence threshold outside
    /// `[0, 1]`.
    pub fn validate(&self) -> DetectResult<()> {
        if self.tile == 0 {
            return Err(DetectError::InvalidConfig("tile size must be > 0".into()));
        }
        if self.stride == 0 {
            return Err(DetectError::InvalidConfig("stride must be > 0".into()));
        }
        if self.regions == 0 {
            return Err(DetectError::InvalidConfig(
                "region count must be > 0".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.conf_thres) {
            return Err(DetectError::InvalidConfig(format!(
                "confidence threshold {} outside [0, 1]",
                self.conf_thres
            )));
        }
        Ok(())
    }
}
