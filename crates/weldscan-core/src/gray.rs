//! Single-channel 8-bit raster
//!
//! `GrayImage` is the working type for every filter stage that operates on
//! one channel: grayscale conversion output, filter outputs, and binary
//! instance masks (where any nonzero byte is foreground).
//!
//! # Pixel layout
//!
//! Row-major, one byte per pixel, no row padding.

use crate::error::{Error, Result};

/// Single-channel 8-bit image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl GrayImage {
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
            data: vec![0; width as usize * height as usize],
        })
    }

    /// Wrap an existing row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for zero dimensions and
    /// [`Error::BufferSize`] if `data.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
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

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Borrow the raw pixel buffer.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image and return the raw pixel buffer.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Borrow one row of pixels.
    ///
    /// Panics if `y` is out of range; callers iterate `0..height()`.
    pub fn row(&self, y: u32) -> &[u8] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.data[start..start + w]
    }

    /// Pixel value at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.data[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Unchecked-in-release pixel read used by inner loops whose indices
    /// are bounded by construction.
    #[inline]
    pub(crate) fn at(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height);
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub(crate) fn set(&mut self, x: u32, y: u32, value: u8) {
        debug_assert!(x < self.width && y < self.height);
        self.data[y as usize * self.width as usize + x as usize] = value;
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
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for row in y..y + height {
            let start = row as usize * self.width as usize + x as usize;
            data.extend_from_slice(&self.data[start..start + width as usize]);
        }
        Self::from_raw(width, height, data)
    }

    /// Resample to `width x height` with nearest-neighbor sampling.
    ///
    /// Source coordinates are `floor(dst * src_extent / dst_extent)`, which
    /// preserves hard mask edges (no new intermediate values are invented).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either target dimension is
    /// zero.
    pub fn resize_nearest(&self, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if width == self.width && height == self.height {
            return Ok(self.clone());
        }
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height as u64) as u32;
            let sy = sy.min(self.height - 1);
            let src_row = self.row(sy);
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width as u64) as u32;
                let sx = sx.min(self.width - 1);
                data.push(src_row[sx as usize]);
            }
        }
        Self::from_raw(width, height, data)
    }
}
