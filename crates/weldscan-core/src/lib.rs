//! weldscan-core - Basic data structures for the weldscan pipeline
//!
//! This crate provides the fundamental types used throughout the
//! weldscan defect-detection workspace:
//!
//! - [`GrayImage`] - single-channel 8-bit raster
//! - [`RgbImage`] - 3-channel interleaved 8-bit raster
//! - [`Point`] / [`BBox`] / [`Polygon`] - detection geometry
//!
//! Images are treated as immutable pipeline inputs: transforms return new
//! images rather than mutating in place.

pub mod error;
pub mod geometry;
pub mod gray;
pub mod rgb;

pub use error::{Error, Result};
pub use geometry::{BBox, Point, Polygon};
pub use gray::GrayImage;
pub use rgb::RgbImage;
