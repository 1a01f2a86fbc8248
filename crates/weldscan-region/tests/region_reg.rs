//! Contour extraction and region bucketing regression test

use weldscan_core::{Point, Polygon};
use weldscan_region::{
    external_contours, largest_external_contour, region_width, regions_touched,
};
use weldscan_test::{RegParams, rect_mask};

#[test]
fn region_reg() {
    let mut rp = RegParams::new("region");

    // --- Test 1: single filled rectangle yields one contour ---
    let mask = rect_mask(40, 40, 10, 10, 12, 8);
    let contours = external_contours(&mask);
    rp.compare_values(1.0, contours.len() as f64, 0.0);
    let outline = &contours[0];
    // boundary vertices stay on the component
    let on_component = outline.points().iter().all(|p| {
        let x = p.x as u32;
        let y = p.y as u32;
        mask.pixel(x, y) == Some(1)
    });
    rp.compare_values(1.0, on_component as u8 as f64, 0.0);

    // --- Test 2: largest contour picked among two components ---
    let mut two = rect_mask(60, 30, 2, 2, 4, 4);
    {
        // paste a bigger second component
        let big = rect_mask(60, 30, 30, 5, 20, 15);
        let mut data = two.data().to_vec();
        for (i, &v) in big.data().iter().enumerate() {
            if v != 0 {
                data[i] = 1;
            }
        }
        two = weldscan_core::GrayImage::from_raw(60, 30, data).expect("from_raw");
    }
    rp.compare_values(2.0, external_contours(&two).len() as f64, 0.0);
    let largest = largest_external_contour(&two).expect("largest");
    let min_x = largest
        .points()
        .iter()
        .map(|p| p.x)
        .fold(f32::INFINITY, f32::min);
    rp.compare_values(30.0, min_x as f64, 0.0);

    // --- Test 3: empty mask has no contours ---
    let empty = rect_mask(10, 10, 0, 0, 0, 0);
    rp.compare_values(0.0, external_contours(&empty).len() as f64, 0.0);
    rp.compare_values(
        1.0,
        largest_external_contour(&empty).is_none() as u8 as f64,
        0.0,
    );

    // --- Test 4: region width for the production geometry ---
    let rw = region_width(3000, 30);
    rp.compare_values(100.0, rw, 0.0);

    // --- Test 5: x = 250 lands in region 2 ---
    let poly = Polygon::new(vec![Point::new(250.0, 5.0), Point::new(255.0, 9.0)]);
    let touched = regions_touched(&poly, rw, 30).expect("regions");
    rp.compare_values(1.0, touched.len() as f64, 0.0);
    rp.compare_values(2.0, *touched.iter().next().unwrap() as f64, 0.0);

    // --- Test 6: straddling vertices touch both regions ---
    let straddle = Polygon::new(vec![Point::new(95.0, 0.0), Point::new(105.0, 0.0)]);
    let touched = regions_touched(&straddle, rw, 30).expect("regions");
    let members: Vec<u32> = touched.into_iter().collect();
    rp.compare_values(2.0, members.len() as f64, 0.0);
    rp.compare_values(0.0, members[0] as f64, 0.0);
    rp.compare_values(1.0, members[1] as f64, 0.0);

    // --- Test 7: right-edge vertex clamps to the last region ---
    let edge = Polygon::new(vec![Point::new(3000.0, 1.0)]);
    let touched = regions_touched(&edge, rw, 30).expect("regions");
    rp.compare_values(29.0, *touched.iter().next().unwrap() as f64, 0.0);

    assert!(rp.cleanup(), "region regression test failed");
}
