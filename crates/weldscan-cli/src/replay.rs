//! Recorded-output backend
//!
//! Replays a fixed detection list on every tile, so the tiling,
//! reconciliation, and reporting stages can be exercised end to end
//! without a model runtime. Lines use the box raw-artifact layout:
//! `x1 y1 x2 y2 conf class_id`, tile-local coordinates.

use anyhow::{Context, Result, bail};
use weldscan_core::{BBox, RgbImage};
use weldscan_detect::{BackendError, Detection, DetectionBackend, InferenceMode, TilePrediction};

pub struct ReplayBackend {
    detections: Vec<Detection>,
}

impl ReplayBackend {
    /// Parse recorded predictions from text, one detection per line.
    /// Blank lines and `#` comments are skipped.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut detections = Vec::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            detections.push(parse_line(line).with_context(|| {
                format!("predictions line {}: '{}'", lineno + 1, line)
            })?);
        }
        Ok(Self { detections })
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

fn parse_line(line: &str) -> Result<Detection> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 6 {
        bail!("expected 6 fields, got {}", fields.len());
    }
    let coord = |i: usize| -> Result<f32> {
        fields[i]
            .parse::<f32>()
            .with_context(|| format!("field {} is not a number", i + 1))
    };
    Ok(Detection {
        bbox: BBox::new(coord(0)?, coord(1)?, coord(2)?, coord(3)?),
        confidence: coord(4)?,
        class_id: fields[5]
            .parse::<u32>()
            .context("class id is not an integer")?,
    })
}

impl DetectionBackend for ReplayBackend {
    fn predict(
        &self,
        _tile: &RgbImage,
        _mode: InferenceMode,
    ) -> std::result::Result<TilePrediction, BackendError> {
        Ok(TilePrediction {
            detections: self.detections.clone(),
            masks: Vec::new(),
        })
    }
}
