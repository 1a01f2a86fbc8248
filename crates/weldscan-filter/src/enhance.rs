//! Combined enhancement transform
//!
//! Builds the synthetic 3-channel representation the detection backend was
//! trained on, from a color source tile:
//!
//! 1. Convert to grayscale
//! 2. Erode the color tile with a 3x3 brick (one iteration) and run the
//!    homomorphic filter on channel 0 of the eroded result
//! 3. Run the relief filter on the grayscale image
//! 4. CLAHE both filtered outputs
//! 5. Stack `[gray, clahe(homomorphic), clahe(relief)]`
//!
//! Filter order, clip limit, and stacking order are fixed: changing any of
//! them invalidates the detector's learned weights.

use crate::clahe::{DEFAULT_CLIP_LIMIT, clahe};
use crate::homomorphic::{HomomorphicFilter, LowpassShape};
use crate::morph::erode_rgb;
use crate::relief::{DEFAULT_RELIEF_BIAS, relief};
use crate::FilterResult;
use weldscan_core::RgbImage;

/// Parameters of the enhancement transform.
#[derive(Debug, Clone, Copy)]
pub struct EnhanceParams {
    /// CLAHE contrast clip limit.
    pub clip_limit: f64,
    /// Relief-filter neutral bias.
    pub relief_bias: i32,
    /// Homomorphic spectrum gain (`a`).
    pub homo_gain: f64,
    /// Homomorphic high-frequency boost (`b`).
    pub homo_boost: f64,
    /// Low-pass cutoff radius.
    pub cutoff: f64,
    /// Low-pass order (Butterworth).
    pub order: f64,
    /// Low-pass shape.
    pub shape: LowpassShape,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            clip_limit: DEFAULT_CLIP_LIMIT,
            relief_bias: DEFAULT_RELIEF_BIAS,
            homo_gain: 0.75,
            homo_boost: 1.25,
            cutoff: 30.0,
            order: 2.0,
            shape: LowpassShape::Butterworth,
        }
    }
}

/// Apply the enhancement transform to a color tile.
///
/// # Errors
///
/// Propagates parameter-validation errors from the individual filters;
/// with in-range parameters the transform cannot fail.
pub fn enhance_stack(img: &RgbImage, params: &EnhanceParams) -> FilterResult<RgbImage> {
    let gray = img.to_gray();

    let eroded = erode_rgb(img, 3, 3)?;
    let homo = HomomorphicFilter::new(params.homo_gain, params.homo_boost).apply(
        &eroded.channel(0)?,
        params.cutoff,
        params.order,
        params.shape,
    )?;
    let homo_eq = clahe(&homo, params.clip_limit)?;

    let rel = relief(&gray, params.relief_bias);
    let rel_eq = clahe(&rel, params.clip_limit)?;

    Ok(RgbImage::from_channels([gray, homo_eq, rel_eq])?)
}
