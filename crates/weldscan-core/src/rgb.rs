//! 3-channel interleaved 8-bit raster
//!
//! `RgbImage` holds decoded source imagery and the synthetic 3-channel
//! enhancement stack fed to the detection backend. Channel order is RGB
//! for decoded images; for the enhancement stack the three planes are
//! `[gray, enhanced-homomorphic, enhanced-relief]` and the RGB naming is
//! purely positional.
//!
//! # Pixel layout
//!
//! Row-major, three bytes per pixel (`c0 c1 c2`), no row padding.

use crate::error::{Error, Result};
use crate::gray::GrayImage;

const CHANNELS: usize = 3;

/// 3-channel interleaved 8-bit image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbImage {
    /// Create a zero-filled image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * CHANNELS],
        })
    }

    /// Wrap an existing interleaved pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions and
    /// [`Error::BufferSize`] if `data.len() != width * height * 3`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Stack three single-channel planes into one interleaved image.
    ///
    /// Plane order becomes channel order: `planes[0]` is channel 0, and so
    /// on. This is the channel-stacking step of the enhancement transform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the planes do not all share
    /// the same dimensions.
    pub fn from_channels(planes: [GrayImage; 3]) -> Result<Self> {
        let (w, h) = (planes[0].width(), planes[0].height());
        for plane in &planes[1..] {
            if plane.width() != w || plane.height() != h {
                return Err(Error::DimensionMismatch {
                    expected: (w, h),
                    actual: (plane.width(), plane.height()),
                });
            }
        }
        let mut data = Vec::with_capacity(w as usize * h as usize * CHANNELS);
        for y in 0..h {
            let rows = [planes[0].row(y), planes[1].row(y), planes[2].row(y)];
            for x in 0..w as usize {
                data.push(rows[0][x]);
                data.push(rows[1][x]);
                data.push(rows[2][x]);
            }
        }
        Self::from_raw(w, h, data)
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Borrow the raw interleaved pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Pixel `(c0, c1, c2)` at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x < self.width && y < self.height {
            let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
            Some((self.data[i], self.data[i + 1], self.data[i + 2]))
        } else {
            None
        }
    }

    /// Extract one channel plane as a grayscale image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `index >= 3`.
    pub fn channel(&self, index: usize) -> Result<GrayImage> {
        if index >= CHANNELS {
            return Err(Error::InvalidParameter(format!(
                "channel index {index} out of range"
            )));
        }
        let data = self
            .data
            .iter()
            .skip(index)
            .step_by(CHANNELS)
            .copied()
            .collect();
        GrayImage::from_raw(self.width, self.height, data)
    }

    /// Convert to grayscale with ITU-R 601 luma weights
    /// (`0.299 R + 0.587 G + 0.114 B`, rounded).
    pub fn to_gray(&self) -> GrayImage {
        let mut data = Vec::with_capacity(self.width as usize * self.height as usize);
        for px in self.data.chunks_exact(CHANNELS) {
            let luma =
                0.299 * f32::from(px[0]) + 0.587 * f32::from(px[1]) + 0.114 * f32::from(px[2]);
            data.push(luma.round().clamp(0.0, 255.0) as u8);
        }
        GrayImage::from_raw(self.width, self.height, data)
            .expect("buffer length follows from dimensions")
    }

    /// Extract a sub-rectangle as a new image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CropOutOfBounds`] if the rectangle does not lie
    /// entirely inside the image, and [`Error::InvalidDimension`] for a
    /// zero-sized rectangle.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if x.checked_add(width).is_none_or(|r| r > self.width)
            || y.checked_add(height).is_none_or(|b| b > self.height)
        {
            return Err(Error::CropOutOfBounds {
                x,
                y,
                width,
                height,
                img_width: self.width,
                img_height: self.height,
            });
        }
        let row_bytes = width as usize * CHANNELS;
        let mut data = Vec::with_capacity(row_bytes * height as usize);
        for row in y..y + height {
            let start = (row as usize * self.width as usize + x as usize) * CHANNELS;
            data.extend_from_slice(&self.data[start..start + row_bytes]);
        }
        Self::from_raw(width, height, data)
    }
}
