//! Byte-stream decoding

use crate::IoResult;
use weldscan_core::RgbImage;

/// Decode raw image bytes (format sniffed from the content) into a
/// 3-channel raster. Grayscale sources are expanded to three identical
/// channels, matching how the original imagery is consumed downstream.
///
/// # Errors
///
/// Returns [`crate::IoError::Decode`] for undecodable bytes; no partial
/// image is produced.
pub fn decode_rgb(bytes: &[u8]) -> IoResult<RgbImage> {
    let decoded = image::load_from_memory(bytes)?.into_rgb8();
    let (width, height) = decoded.dimensions();
    Ok(RgbImage::from_raw(width, height, decoded.into_raw())?)
}

/// Content type for a stored artifact, derived from its file extension.
/// Unknown extensions fall back to `application/octet-stream`.
pub fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next().map(str::to_ascii_lowercase) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "bmp" => "image/bmp",
        Some(ext) if ext == "tif" || ext == "tiff" => "image/tiff",
        Some(ext) if ext == "csv" => "text/csv",
        Some(ext) if ext == "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_png_roundtrip() {
        // encode a tiny image with the image crate, then decode through the
        // pipeline entry point
        let mut png = Vec::new();
        let src = image::RgbImage::from_fn(4, 2, |x, y| image::Rgb([x as u8, y as u8, 7]));
        src.write_to(
            &mut std::io::Cursor::new(&mut png),
            image::ImageFormat::Png,
        )
        .unwrap();

        let img = decode_rgb(&png).unwrap();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 2);
        assert_eq!(img.pixel(3, 1), Some((3, 1, 7)));
    }

    #[test]
    fn test_undecodable_bytes_fail() {
        assert!(decode_rgb(b"definitely not an image").is_err());
    }

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for("scan.PNG"), "image/png");
        assert_eq!(content_type_for("a/b/report.csv"), "text/csv");
        assert_eq!(content_type_for("weird.bin"), "application/octet-stream");
        assert_eq!(content_type_for("noextension"), "application/octet-stream");
    }
}
