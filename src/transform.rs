//! Coordinate transforms between logical and screen space.

use crate::geom::{Point, ScreenPoint, SurfaceSize};

/// Transform from logical coordinates into screen coordinates.
///
/// The logical origin sits at `center` and one logical unit spans
/// `square_size` pixels on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    center: ScreenPoint,
    square_size: f64,
}

impl Transform {
    /// Create a transform, rejecting non-positive or non-finite scales.
    pub fn new(center: ScreenPoint, square_size: f64) -> Option<Self> {
        if !square_size.is_finite() || square_size <= 0.0 {
            return None;
        }
        if !center.x.is_finite() || !center.y.is_finite() {
            return None;
        }
        Some(Self {
            center,
            square_size,
        })
    }

    /// Screen position of the logical origin.
    pub fn center(&self) -> ScreenPoint {
        self.center
    }

    /// Pixels per logical unit.
    pub fn square_size(&self) -> f64 {
        self.square_size
    }

    /// Map a point into screen space.
    ///
    /// No vertical flip happens here: sampled points already carry a negated y.
    pub fn to_screen(&self, point: Point) -> ScreenPoint {
        ScreenPoint::new(
            self.center.x + point.x * self.square_size,
            self.center.y + point.y * self.square_size,
        )
    }

    /// Map a screen position into logical space, with logical y pointing up.
    pub fn to_logical(&self, point: ScreenPoint) -> Point {
        Point::new(
            (point.x - self.center.x) / self.square_size,
            (self.center.y - point.y) / self.square_size,
        )
    }

    /// Whole-cell extents of the four screen quadrants around the center.
    pub fn quadrants(&self, size: SurfaceSize) -> Quadrants {
        Quadrants::compute(self.center, size, self.square_size)
    }
}

/// Cell counts covering one quadrant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extent {
    /// Horizontal cell count.
    pub width: u32,
    /// Vertical cell count.
    pub height: u32,
}

impl Extent {
    fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Visible cell extents around the center, one per screen quadrant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Quadrants {
    /// Negative x, positive y.
    pub top_left: Extent,
    /// Positive x, positive y.
    pub top_right: Extent,
    /// Negative x, negative y.
    pub bottom_left: Extent,
    /// Positive x, negative y.
    pub bottom_right: Extent,
}

impl Quadrants {
    /// Compute extents for a center on a surface of the given size.
    ///
    /// A quadrant whose half-plane does not intersect the surface gets zero
    /// cells on the corresponding dimension.
    pub fn compute(center: ScreenPoint, size: SurfaceSize, square_size: f64) -> Self {
        let cells = |pixels: f64| -> u32 { (pixels / square_size).ceil().max(0.0) as u32 };

        let left = if center.x > 0.0 { cells(center.x) } else { 0 };
        let right = if center.x < size.width {
            cells(size.width - center.x)
        } else {
            0
        };
        let top = if center.y > 0.0 { cells(center.y) } else { 0 };
        let bottom = if center.y < size.height {
            cells(size.height - center.y)
        } else {
            0
        };

        Self {
            top_left: Extent::new(left, top),
            top_right: Extent::new(right, top),
            bottom_left: Extent::new(left, bottom),
            bottom_right: Extent::new(right, bottom),
        }
    }

    /// Quadrants in drawing order, tagged with their x/y signs.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (Extent, f64, f64)> {
        [
            (self.top_left, -1.0, -1.0),
            (self.top_right, 1.0, -1.0),
            (self.bottom_left, -1.0, 1.0),
            (self.bottom_right, 1.0, 1.0),
        ]
        .into_iter()
    }

    /// Cells left of the center.
    pub fn negative_width(&self) -> u32 {
        self.top_left.width.max(self.bottom_left.width)
    }

    /// Cells right of the center.
    pub fn positive_width(&self) -> u32 {
        self.top_right.width.max(self.bottom_right.width)
    }

    /// Cells above the center.
    pub fn top_height(&self) -> u32 {
        self.top_left.height.max(self.top_right.height)
    }

    /// Cells below the center.
    pub fn bottom_height(&self) -> u32 {
        self.bottom_left.height.max(self.bottom_right.height)
    }
}

/// Pixel offset that keeps the logical point under `pivot` fixed when the
/// scale changes from `old_size` to `new_size`.
pub(crate) fn zoom_correction(
    center: ScreenPoint,
    pivot: ScreenPoint,
    old_size: f64,
    new_size: f64,
) -> (f64, f64) {
    let delta_x = pivot.x - center.x;
    let delta_y = pivot.y - center.y;
    let squares_x = delta_x / old_size;
    let squares_y = delta_y / old_size;
    (delta_x - squares_x * new_size, delta_y - squares_y * new_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let transform = Transform::new(ScreenPoint::new(123.5, 77.25), 37.0).expect("valid");
        for (sx, sy) in [(0.0, 0.0), (800.0, 600.0), (-45.5, 1203.75), (123.5, 77.25)] {
            let screen = ScreenPoint::new(sx, sy);
            let logical = transform.to_logical(screen);
            let flipped = Point::new(logical.x, -logical.y);
            let back = transform.to_screen(flipped);
            assert!((back.x - sx).abs() < 1e-9);
            assert!((back.y - sy).abs() < 1e-9);
        }
    }

    #[test]
    fn to_logical_points_up() {
        let transform = Transform::new(ScreenPoint::new(400.0, 300.0), 42.0).expect("valid");
        let above = transform.to_logical(ScreenPoint::new(400.0, 258.0));
        assert!((above.y - 1.0).abs() < 1e-12);
        assert_eq!(above.x, 0.0);
    }

    #[test]
    fn rejects_bad_scale() {
        assert!(Transform::new(ScreenPoint::new(0.0, 0.0), 0.0).is_none());
        assert!(Transform::new(ScreenPoint::new(0.0, 0.0), f64::NAN).is_none());
    }

    #[test]
    fn quadrants_centered() {
        let q = Quadrants::compute(
            ScreenPoint::new(400.0, 300.0),
            SurfaceSize::new(800.0, 600.0),
            42.0,
        );
        assert_eq!(q.top_left, Extent::new(10, 8));
        assert_eq!(q.bottom_right, Extent::new(10, 8));
        assert_eq!(q.negative_width(), 10);
        assert_eq!(q.top_height(), 8);
    }

    #[test]
    fn quadrants_zero_when_center_off_surface() {
        let q = Quadrants::compute(
            ScreenPoint::new(-50.0, 700.0),
            SurfaceSize::new(800.0, 600.0),
            42.0,
        );
        assert_eq!(q.negative_width(), 0);
        assert_eq!(q.positive_width(), 21);
        assert_eq!(q.bottom_height(), 0);
        assert_eq!(q.top_height(), 17);
    }

    #[test]
    fn zoom_correction_keeps_pivot() {
        let center = ScreenPoint::new(400.0, 300.0);
        let pivot = ScreenPoint::new(610.0, 90.0);
        let before = Transform::new(center, 42.0).expect("valid").to_logical(pivot);
        let (dx, dy) = zoom_correction(center, pivot, 42.0, 60.0);
        let after = Transform::new(center.offset(dx, dy), 60.0)
            .expect("valid")
            .to_logical(pivot);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }
}
