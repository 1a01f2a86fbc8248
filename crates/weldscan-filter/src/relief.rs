//! Relief filtering
//!
//! A diagonal second-difference operator that accentuates edge-like
//! gradients: each interior pixel becomes the difference between its
//! upper-left and lower-right neighbors, shifted by a bias so that zero
//! gradient maps to mid-gray.

use weldscan_core::GrayImage;

/// Neutral point for zero gradient.
pub const DEFAULT_RELIEF_BIAS: i32 = 128;

/// Apply the relief filter.
///
/// Interior pixels become
/// `clip(img[i-1, j-1] - img[i+1, j+1] + bias, 0, 255)`.
/// Border rows and columns have no diagonal neighbors and are copied
/// unchanged from the source; images narrower or shorter than three pixels
/// are therefore returned as-is.
pub fn relief(img: &GrayImage, bias: i32) -> GrayImage {
    let w = img.width();
    let h = img.height();
    if w < 3 || h < 3 {
        return img.clone();
    }
    let mut data = img.data().to_vec();
    let stride = w as usize;
    for i in 1..(h - 1) as usize {
        let above = img.row(i as u32 - 1);
        let below = img.row(i as u32 + 1);
        let out_row = &mut data[i * stride..(i + 1) * stride];
        for j in 1..(w - 1) as usize {
            let diff = i32::from(above[j - 1]) - i32::from(below[j + 1]) + bias;
            out_row[j] = diff.clamp(0, 255) as u8;
        }
    }
    GrayImage::from_raw(w, h, data).expect("dimensions unchanged")
}
