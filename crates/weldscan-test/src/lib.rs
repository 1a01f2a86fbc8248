//! weldscan-test - Regression test framework for weldscan
//!
//! This crate provides a regression test framework supporting three
//! modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison (visual inspection)
//!
//! Test imagery is synthesized deterministically instead of loaded from
//! disk, so regression tests need no image fixtures checked into the
//! repository.
//!
//! # Usage
//!
//! ```ignore
//! use weldscan_test::{RegParams, RegTestMode};
//!
//! let mut rp = RegParams::new("relief");
//! rp.compare_values(128.0, mean, 0.5);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use weldscan_core::{GrayImage, RgbImage};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // weldscan-test is at crates/weldscan-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// Deterministic horizontal gradient, `value = (x * 255) / (width - 1)`.
pub fn gradient_gray(width: u32, height: u32) -> GrayImage {
    let mut data = Vec::with_capacity((width * height) as usize);
    for _y in 0..height {
        for x in 0..width {
            let v = if width > 1 {
                (u64::from(x) * 255 / u64::from(width - 1)) as u8
            } else {
                0
            };
            data.push(v);
        }
    }
    GrayImage::from_raw(width, height, data).expect("dimensions match buffer")
}

/// Uniform grayscale image.
pub fn flat_gray(width: u32, height: u32, value: u8) -> GrayImage {
    GrayImage::from_raw(width, height, vec![value; (width * height) as usize])
        .expect("dimensions match buffer")
}

/// Binary mask with a filled axis-aligned rectangle of 1s.
pub fn rect_mask(width: u32, height: u32, x0: u32, y0: u32, w: u32, h: u32) -> GrayImage {
    let mut data = vec![0u8; (width * height) as usize];
    for y in y0..(y0 + h).min(height) {
        for x in x0..(x0 + w).min(width) {
            data[(y * width + x) as usize] = 1;
        }
    }
    GrayImage::from_raw(width, height, data).expect("dimensions match buffer")
}

/// Synthetic weld-seam radiograph: a bright horizontal band over a dark
/// background, with dark square "pores" along the band. Deterministic for
/// a given geometry, so pipeline outputs over it are reproducible.
pub fn weld_sample(width: u32, height: u32) -> RgbImage {
    let band_top = height / 4;
    let band_bottom = 3 * height / 4;
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let in_band = y >= band_top && y < band_bottom;
            let mut v: u8 = if in_band { 190 } else { 40 };
            // pores every 97 px, 5 px square, centered in the band
            if in_band {
                let cx = x % 97;
                let cy = y - band_top;
                let mid = (band_bottom - band_top) / 2;
                if cx < 5 && cy >= mid && cy < mid + 5 {
                    v = 15;
                }
            }
            data.extend_from_slice(&[v, v, v]);
        }
    }
    RgbImage::from_raw(width, height, data).expect("dimensions match buffer")
}
