//! Raster and geometry regression test
//!
//! Crop, nearest-neighbor resize, channel extraction, grayscale
//! conversion, and coordinate translation over synthetic imagery.

use weldscan_core::{BBox, GrayImage, Point, Polygon, RgbImage};
use weldscan_test::{RegParams, gradient_gray};

#[test]
fn raster_reg() {
    let mut rp = RegParams::new("raster");

    // --- Test 1: crop geometry ---
    let grad = gradient_gray(256, 32);
    let crop = grad.crop(100, 8, 50, 16).expect("crop");
    rp.compare_values(50.0, crop.width() as f64, 0.0);
    rp.compare_values(16.0, crop.height() as f64, 0.0);
    // crop preserves source pixels
    rp.compare_values(
        grad.pixel(100, 8).unwrap() as f64,
        crop.pixel(0, 0).unwrap() as f64,
        0.0,
    );
    rp.compare_values(
        grad.pixel(149, 23).unwrap() as f64,
        crop.pixel(49, 15).unwrap() as f64,
        0.0,
    );

    // --- Test 2: out-of-bounds crop rejected ---
    rp.compare_values(1.0, grad.crop(250, 0, 50, 8).is_err() as u8 as f64, 0.0);

    // --- Test 3: nearest-neighbor upscale ---
    let small = GrayImage::from_raw(2, 2, vec![10, 20, 30, 40]).expect("from_raw");
    let up = small.resize_nearest(4, 4).expect("resize");
    rp.compare_values(10.0, up.pixel(0, 0).unwrap() as f64, 0.0);
    rp.compare_values(10.0, up.pixel(1, 1).unwrap() as f64, 0.0);
    rp.compare_values(20.0, up.pixel(2, 0).unwrap() as f64, 0.0);
    rp.compare_values(40.0, up.pixel(3, 3).unwrap() as f64, 0.0);

    // --- Test 4: downscale keeps dimensions ---
    let down = grad.resize_nearest(64, 8).expect("resize");
    rp.compare_values(64.0, down.width() as f64, 0.0);
    rp.compare_values(8.0, down.height() as f64, 0.0);

    // --- Test 5: channel round trip through from_channels ---
    let r = gradient_gray(16, 8);
    let g = GrayImage::new(16, 8).expect("new");
    let b = gradient_gray(16, 8);
    let rgb = RgbImage::from_channels([r.clone(), g, b]).expect("from_channels");
    let r_back = rgb.channel(0).expect("channel");
    rp.compare_values(1.0, (r_back.data() == r.data()) as u8 as f64, 0.0);

    // --- Test 6: grayscale conversion weights ---
    let red = RgbImage::from_raw(1, 1, vec![255, 0, 0]).expect("from_raw");
    let gray = red.to_gray();
    rp.compare_values(76.0, gray.pixel(0, 0).unwrap() as f64, 0.0);

    // --- Test 7: translation ---
    let moved = BBox::new(5.0, 5.0, 10.0, 10.0).translate(200.0, 0.0);
    rp.compare_values(205.0, moved.xmin as f64, 0.0);
    rp.compare_values(210.0, moved.xmax as f64, 0.0);
    rp.compare_values(5.0, moved.ymin as f64, 0.0);

    // --- Test 8: shoelace area ---
    let square = Polygon::new(vec![
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 4.0),
        Point::new(0.0, 4.0),
    ]);
    rp.compare_values(16.0, square.area(), 1e-9);

    assert!(rp.cleanup(), "raster regression test failed");
}
