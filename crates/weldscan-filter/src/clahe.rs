//! Clip-limited adaptive histogram equalization (CLAHE)
//!
//! Equalization is computed per tile of a fixed grid with a clipped
//! contrast gain, then each output pixel bilinearly interpolates between
//! the lookup tables of its four surrounding tiles. Clipping the
//! per-tile histogram bounds the slope of the mapping and keeps noise in
//! flat areas from being over-amplified.

use crate::{FilterError, FilterResult};
use weldscan_core::GrayImage;

/// Default contrast clip limit used by the enhancement stack.
pub const DEFAULT_CLIP_LIMIT: f64 = 5.0;

/// Default tile grid: 8x8 tiles.
pub const DEFAULT_GRID_SIZE: u32 = 8;

const HIST_BINS: usize = 256;

/// Apply CLAHE with the default 8x8 tile grid.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] for a non-positive clip
/// limit.
pub fn clahe(img: &GrayImage, clip_limit: f64) -> FilterResult<GrayImage> {
    clahe_with_grid(img, clip_limit, DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
}

/// Apply CLAHE on a `grid_w x grid_h` tile grid.
///
/// The image is padded to a tile-grid multiple by edge replication, the
/// padding is dropped from the output. The effective per-tile clip is
/// `max(1, clip_limit * tile_area / 256)` histogram counts; clipped excess
/// is redistributed evenly over all bins.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] for a non-positive clip
/// limit or a zero-sized grid.
pub fn clahe_with_grid(
    img: &GrayImage,
    clip_limit: f64,
    grid_w: u32,
    grid_h: u32,
) -> FilterResult<GrayImage> {
    if clip_limit <= 0.0 {
        return Err(FilterError::InvalidParameters(
            "clip limit must be > 0".into(),
        ));
    }
    if grid_w == 0 || grid_h == 0 {
        return Err(FilterError::InvalidParameters(
            "tile grid must be non-empty".into(),
        ));
    }

    let tile_w = img.width().div_ceil(grid_w);
    let tile_h = img.height().div_ceil(grid_h);
    let padded = pad_replicate(img, tile_w * grid_w, tile_h * grid_h);

    let luts = tile_luts(&padded, clip_limit, grid_w, grid_h, tile_w, tile_h);

    // bilinear interpolation between the four surrounding tile mappings
    let mut data = Vec::with_capacity(img.width() as usize * img.height() as usize);
    let gw = grid_w as usize;
    for y in 0..img.height() {
        let (ty0, ty1, fy) = tile_span(y, tile_h, grid_h);
        for x in 0..img.width() {
            let (tx0, tx1, fx) = tile_span(x, tile_w, grid_w);
            let v = img.pixel(x, y).expect("in bounds") as usize;
            let top = lerp(
                f64::from(luts[ty0 * gw + tx0][v]),
                f64::from(luts[ty0 * gw + tx1][v]),
                fx,
            );
            let bottom = lerp(
                f64::from(luts[ty1 * gw + tx0][v]),
                f64::from(luts[ty1 * gw + tx1][v]),
                fx,
            );
            data.push(lerp(top, bottom, fy).round().clamp(0.0, 255.0) as u8);
        }
    }
    Ok(GrayImage::from_raw(img.width(), img.height(), data)?)
}

/// Per-tile clipped-equalization lookup tables, row-major over the grid.
fn tile_luts(
    padded: &GrayImage,
    clip_limit: f64,
    grid_w: u32,
    grid_h: u32,
    tile_w: u32,
    tile_h: u32,
) -> Vec<[u8; HIST_BINS]> {
    let tile_area = tile_w as u64 * tile_h as u64;
    let clip = ((clip_limit * tile_area as f64 / HIST_BINS as f64) as u64).max(1);
    let scale = 255.0 / tile_area as f64;

    let mut luts = Vec::with_capacity(grid_w as usize * grid_h as usize);
    for ty in 0..grid_h {
        for tx in 0..grid_w {
            let mut hist = [0u64; HIST_BINS];
            for y in ty * tile_h..(ty + 1) * tile_h {
                for &v in &padded.row(y)[(tx * tile_w) as usize..((tx + 1) * tile_w) as usize] {
                    hist[v as usize] += 1;
                }
            }

            let mut excess = 0u64;
            for bin in hist.iter_mut() {
                if *bin > clip {
                    excess += *bin - clip;
                    *bin = clip;
                }
            }
            let per_bin = excess / HIST_BINS as u64;
            let mut leftover = excess % HIST_BINS as u64;
            for bin in hist.iter_mut() {
                *bin += per_bin;
                if leftover > 0 {
                    *bin += 1;
                    leftover -= 1;
                }
            }

            let mut lut = [0u8; HIST_BINS];
            let mut cum = 0u64;
            for (i, &count) in hist.iter().enumerate() {
                cum += count;
                lut[i] = (cum as f64 * scale).round().clamp(0.0, 255.0) as u8;
            }
            luts.push(lut);
        }
    }
    luts
}

/// Neighboring tile indices and interpolation fraction for one axis.
///
/// Measured from tile centers: coordinates left of the first center clamp
/// to the first tile, right of the last center clamp to the last.
fn tile_span(coord: u32, tile_size: u32, grid: u32) -> (usize, usize, f64) {
    let pos = (f64::from(coord) + 0.5) / f64::from(tile_size) - 0.5;
    if pos <= 0.0 {
        return (0, 0, 0.0);
    }
    let i0 = pos.floor() as usize;
    if i0 + 1 >= grid as usize {
        let last = grid as usize - 1;
        return (last, last, 0.0);
    }
    (i0, i0 + 1, pos - i0 as f64)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn pad_replicate(img: &GrayImage, width: u32, height: u32) -> GrayImage {
    if width == img.width() && height == img.height() {
        return img.clone();
    }
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        let sy = y.min(img.height() - 1);
        let row = img.row(sy);
        data.extend_from_slice(row);
        let last = *row.last().expect("non-empty row");
        data.extend(std::iter::repeat_n(last, (width - img.width()) as usize));
    }
    GrayImage::from_raw(width, height, data).expect("padded dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> GrayImage {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| ((x * 5 + y * 3) % 256) as u8))
            .collect();
        GrayImage::from_raw(width, height, data).unwrap()
    }

    #[test]
    fn test_shape_preserved() {
        let img = gradient(50, 30);
        let out = clahe(&img, DEFAULT_CLIP_LIMIT).unwrap();
        assert_eq!(out.width(), 50);
        assert_eq!(out.height(), 30);
    }

    #[test]
    fn test_flat_image_stays_flat() {
        // a constant image has a one-bin histogram; the mapping must not
        // invent contrast
        let img = GrayImage::from_raw(32, 32, vec![100; 32 * 32]).unwrap();
        let out = clahe(&img, DEFAULT_CLIP_LIMIT).unwrap();
        let first = out.pixel(0, 0).unwrap();
        assert!(out.data().iter().all(|&v| v == first));
    }

    #[test]
    fn test_contrast_expanded() {
        // narrow dynamic range should spread out
        let data: Vec<u8> = (0..64 * 64).map(|i| 120 + (i % 16) as u8).collect();
        let img = GrayImage::from_raw(64, 64, data).unwrap();
        let out = clahe(&img, DEFAULT_CLIP_LIMIT).unwrap();
        let (in_min, in_max) = (120u8, 135u8);
        let out_min = *out.data().iter().min().unwrap();
        let out_max = *out.data().iter().max().unwrap();
        assert!(out_max - out_min > in_max - in_min);
    }

    #[test]
    fn test_invalid_parameters() {
        let img = gradient(8, 8);
        assert!(clahe(&img, 0.0).is_err());
        assert!(clahe_with_grid(&img, 5.0, 0, 8).is_err());
    }

    #[test]
    fn test_non_multiple_dimensions_padded() {
        // 13x9 is not a multiple of the 8x8 grid in either axis
        let img = gradient(13, 9);
        let out = clahe(&img, DEFAULT_CLIP_LIMIT).unwrap();
        assert_eq!(out.width(), 13);
        assert_eq!(out.height(), 9);
    }

    #[test]
    fn test_tile_span_clamps() {
        assert_eq!(tile_span(0, 10, 4), (0, 0, 0.0));
        let (i0, i1, f) = tile_span(14, 10, 4);
        assert_eq!((i0, i1), (0, 1));
        assert!((f - 0.95).abs() < 1e-9);
        assert_eq!(tile_span(39, 10, 4), (3, 3, 0.0));
    }
}
