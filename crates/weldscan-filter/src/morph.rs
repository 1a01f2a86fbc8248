//! Morphological erosion
//!
//! Erosion with a brick (rectangular) structuring element computes the
//! minimum pixel value in the neighborhood, which shrinks bright regions
//! and suppresses speckle noise before frequency-domain filtering.
//! Neighbors outside the image are ignored rather than padded, so the
//! border minimum is taken over the in-bounds part of the brick only.

use crate::{FilterError, FilterResult};
use weldscan_core::{GrayImage, RgbImage};

fn check_brick(hsize: u32, vsize: u32) -> FilterResult<(u32, u32)> {
    if hsize == 0 || vsize == 0 || hsize % 2 == 0 || vsize % 2 == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "brick sides must be odd and positive, got {hsize}x{vsize}"
        )));
    }
    Ok((hsize / 2, vsize / 2))
}

/// Erode a grayscale image with an `hsize x vsize` brick.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless both sides are odd
/// and positive.
pub fn erode_gray(img: &GrayImage, hsize: u32, vsize: u32) -> FilterResult<GrayImage> {
    let (half_h, half_v) = check_brick(hsize, vsize)?;
    let w = img.width();
    let h = img.height();
    let mut data = Vec::with_capacity(w as usize * h as usize);
    for y in 0..h {
        let y0 = y.saturating_sub(half_v);
        let y1 = (y + half_v).min(h - 1);
        for x in 0..w {
            let x0 = x.saturating_sub(half_h);
            let x1 = (x + half_h).min(w - 1);
            let mut min = u8::MAX;
            for yy in y0..=y1 {
                let row = img.row(yy);
                for &v in &row[x0 as usize..=x1 as usize] {
                    min = min.min(v);
                }
            }
            data.push(min);
        }
    }
    Ok(GrayImage::from_raw(w, h, data)?)
}

/// Erode a 3-channel image with an `hsize x vsize` brick, each channel
/// independently.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] unless both sides are odd
/// and positive.
pub fn erode_rgb(img: &RgbImage, hsize: u32, vsize: u32) -> FilterResult<RgbImage> {
    check_brick(hsize, vsize)?;
    let eroded = [
        erode_gray(&img.channel(0)?, hsize, vsize)?,
        erode_gray(&img.channel(1)?, hsize, vsize)?,
        erode_gray(&img.channel(2)?, hsize, vsize)?,
    ];
    Ok(RgbImage::from_channels(eroded)?)
}
