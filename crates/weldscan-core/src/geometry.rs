//! Detection geometry
//!
//! Boxes and polygons are created in tile-local coordinates and translated
//! into the full-image frame exactly once during reconciliation, so every
//! type here carries a `translate` that returns a new value.

/// A 2D point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point shifted by `(dx, dy)`.
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned bounding box `(xmin, ymin, xmax, ymax)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BBox {
    pub xmin: f32,
    pub ymin: f32,
    pub xmax: f32,
    pub ymax: f32,
}

impl BBox {
    pub fn new(xmin: f32, ymin: f32, xmax: f32, ymax: f32) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    pub fn width(&self) -> f32 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f32 {
        self.ymax - self.ymin
    }

    /// Box shifted by `(dx, dy)`.
    pub fn translate(self, dx: f32, dy: f32) -> Self {
        Self {
            xmin: self.xmin + dx,
            ymin: self.ymin + dy,
            xmax: self.xmax + dx,
            ymax: self.ymax + dy,
        }
    }
}

/// A closed contour: an ordered vertex sequence with an implicit edge from
/// the last vertex back to the first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Polygon with every vertex shifted by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            points: self.points.iter().map(|p| p.translate(dx, dy)).collect(),
        }
    }

    /// Enclosed area by the shoelace formula.
    ///
    /// Degenerate polygons (fewer than three vertices) have zero area.
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let mut twice_area = 0.0f64;
        for (i, p) in self.points.iter().enumerate() {
            let q = &self.points[(i + 1) % self.points.len()];
            twice_area += f64::from(p.x) * f64::from(q.y) - f64::from(q.x) * f64::from(p.y);
        }
        twice_area.abs() / 2.0
    }
}
