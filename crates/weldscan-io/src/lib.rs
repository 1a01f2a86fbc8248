//! weldscan-io - Image decoding
//!
//! Turns uploaded image bytes into the pipeline's raster types. Decoding
//! failures are terminal for a request: an undecodable upload produces no
//! partial output.

mod decode;
mod error;

pub use decode::{content_type_for, decode_rgb};
pub use error::{IoError, IoResult};
