//! Tiling scheduler
//!
//! Partitions a wide image into fixed-size, overlapping horizontal tiles.
//! Only horizontal tiling is performed: source imagery is pipe/weld-seam
//! shaped, wider than tall, with the defect band near the top, so every
//! tile starts at `y = 0`.
//!
//! The last partial strip narrower than one stride is only covered when a
//! full tile still fits inside the image width; there is no padding, and
//! a coverage gap at the far right edge is expected behavior.

use weldscan_core::RgbImage;

/// Tile x-offsets for an image of the given width: `0, stride, ...` while
/// `offset + tile <= width`. Empty when the image is narrower than one
/// tile.
pub fn tile_offsets(image_width: u32, tile: u32, stride: u32) -> Vec<u32> {
    if image_width < tile || tile == 0 || stride == 0 {
        return Vec::new();
    }
    (0..=image_width - tile).step_by(stride as usize).collect()
}

/// Number of tiles the scheduler will produce:
/// `floor((width - tile) / stride) + 1` when `width >= tile`, else 0.
pub fn tile_count(image_width: u32, tile: u32, stride: u32) -> u32 {
    if image_width < tile || tile == 0 || stride == 0 {
        return 0;
    }
    (image_width - tile) / stride + 1
}

/// Iterate `(x_offset, crop)` pairs over the image in offset order.
///
/// Each crop spans columns `x_offset .. x_offset + tile` and rows
/// `0 .. min(tile, height)`. Tiles share no mutable state; their lifetime
/// is one inference call.
pub fn tiles(
    img: &RgbImage,
    tile: u32,
    stride: u32,
) -> impl Iterator<Item = (u32, RgbImage)> + '_ {
    let rows = tile.min(img.height());
    tile_offsets(img.width(), tile, stride)
        .into_iter()
        .map(move |x0| {
            let crop = img
                .crop(x0, 0, tile, rows)
                .expect("offsets are bounded by construction");
            (x0, crop)
        })
}
