//! External contour extraction
//!
//! Converts a binary mask (any nonzero byte is foreground) into one closed
//! polygon per 8-connected component: the outer border only, holes are not
//! traced. Components are found by flood-fill labeling in raster order;
//! each outer border is then walked with Moore neighbor tracing.
//!
//! Tracing is driven by the `(current, backtrack)` pixel pair, which fully
//! determines the walk; the walk is followed until a pair repeats and the
//! repeating cycle is emitted as the contour. This terminates on every
//! mask, including one-pixel-wide diagonals where simpler stopping rules
//! revisit the start pixel early.

use std::collections::HashMap;
use weldscan_core::{GrayImage, Point, Polygon};

/// Clockwise Moore neighborhood in screen coordinates (y grows downward),
/// starting east.
const DIRS: [(i64, i64); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Extract the outer contour of every 8-connected foreground component,
/// in raster order of the components' first pixels.
///
/// Single-pixel components yield a one-vertex polygon. An all-background
/// mask yields an empty list.
pub fn external_contours(mask: &GrayImage) -> Vec<Polygon> {
    let w = mask.width() as i64;
    let h = mask.height() as i64;
    let mut labeled = vec![false; (w * h) as usize];
    let mut contours = Vec::new();

    for y in 0..h {
        for x in 0..w {
            if !is_fg(mask, x, y) || labeled[(y * w + x) as usize] {
                continue;
            }
            flood_mark(mask, &mut labeled, x, y);
            contours.push(trace_outer_border(mask, x, y));
        }
    }
    contours
}

/// Largest-area external contour of a mask, or `None` when the mask has no
/// foreground at all.
///
/// This is the mask-to-polygon conversion rule of the pipeline: one
/// polygon per detected instance, ties and zero-area contours resolved by
/// keeping the first-found maximum.
pub fn largest_external_contour(mask: &GrayImage) -> Option<Polygon> {
    external_contours(mask)
        .into_iter()
        .max_by(|a, b| a.area().total_cmp(&b.area()))
}

#[inline]
fn is_fg(mask: &GrayImage, x: i64, y: i64) -> bool {
    x >= 0
        && y >= 0
        && x < mask.width() as i64
        && y < mask.height() as i64
        && mask.pixel(x as u32, y as u32).is_some_and(|v| v > 0)
}

/// Mark every pixel of the component containing `(sx, sy)`.
fn flood_mark(mask: &GrayImage, labeled: &mut [bool], sx: i64, sy: i64) {
    let w = mask.width() as i64;
    let mut stack = vec![(sx, sy)];
    labeled[(sy * w + sx) as usize] = true;
    while let Some((x, y)) = stack.pop() {
        for (dx, dy) in DIRS {
            let (nx, ny) = (x + dx, y + dy);
            if is_fg(mask, nx, ny) && !labeled[(ny * w + nx) as usize] {
                labeled[(ny * w + nx) as usize] = true;
                stack.push((nx, ny));
            }
        }
    }
}

/// Moore neighbor tracing from the component's raster-first pixel.
///
/// `(sx, sy)` is the topmost-then-leftmost pixel of its component, so its
/// west neighbor is guaranteed background and serves as the initial
/// backtrack pixel.
fn trace_outer_border(mask: &GrayImage, sx: i64, sy: i64) -> Polygon {
    let mut seq: Vec<(i64, i64)> = Vec::new();
    let mut seen: HashMap<((i64, i64), (i64, i64)), usize> = HashMap::new();

    let mut cur = (sx, sy);
    let mut back = (sx - 1, sy);

    loop {
        if let Some(&idx) = seen.get(&(cur, back)) {
            // closed the walk; the repeating cycle is the contour
            seq.drain(..idx);
            break;
        }
        seen.insert((cur, back), seq.len());
        seq.push(cur);

        // index of the backtrack pixel in cur's neighbor ring
        let bidx = DIRS
            .iter()
            .position(|&(dx, dy)| (cur.0 + dx, cur.1 + dy) == back)
            .expect("backtrack is always a Moore neighbor");

        let mut prev_bg = back;
        let mut next = None;
        for step in 1..=8 {
            let (dx, dy) = DIRS[(bidx + step) % 8];
            let p = (cur.0 + dx, cur.1 + dy);
            if is_fg(mask, p.0, p.1) {
                next = Some((p, prev_bg));
                break;
            }
            prev_bg = p;
        }

        match next {
            Some((n, nb)) => {
                cur = n;
                back = nb;
            }
            // isolated pixel
            None => break,
        }
    }

    Polygon::new(
        seq.into_iter()
            .map(|(x, y)| Point::new(x as f32, y as f32))
            .collect(),
    )
}
