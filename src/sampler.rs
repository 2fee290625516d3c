//! Sampling of expressions over the visible domain.

use crate::expr::Evaluator;
use crate::geom::{Point, ScreenPoint, SurfaceSize};
use crate::grid::GridDensity;
use crate::interval::Interval;
use crate::transform::Quadrants;

/// The part of logical space a sampling pass covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleDomain {
    /// Cells left of the origin.
    pub negative_width: u32,
    /// Cells right of the origin.
    pub positive_width: u32,
    /// Cells above the origin.
    pub top_height: u32,
    /// Cells below the origin.
    pub bottom_height: u32,
    /// Pixels per logical unit.
    pub square_size: f64,
    /// Logical units per drawn grid cell.
    pub units_per_cell: f64,
    /// Samples taken per drawn grid cell.
    pub points_per_square: u32,
    /// Logical x range shown on the surface. Cells outside it are skipped.
    pub visible_x: (f64, f64),
}

impl SampleDomain {
    /// Build the domain for the current view.
    pub fn new(
        quadrants: &Quadrants,
        density: &GridDensity,
        square_size: f64,
        points_per_square: u32,
        visible_x: (f64, f64),
    ) -> Self {
        Self {
            negative_width: quadrants.negative_width(),
            positive_width: quadrants.positive_width(),
            top_height: quadrants.top_height(),
            bottom_height: quadrants.bottom_height(),
            square_size,
            units_per_cell: density.units_per_cell,
            points_per_square: points_per_square.max(1),
            visible_x,
        }
    }

    /// Sample positions in increasing order.
    pub fn xs(&self) -> impl Iterator<Item = f64> {
        let start = -f64::from(self.negative_width);
        let span = f64::from(self.positive_width) - start;
        let units = self.units_per_cell;
        let per_cell = self.points_per_square;
        let step = units / f64::from(per_cell);
        let cells = (span / units).ceil().max(0.0);
        let first = ((self.visible_x.0 - start) / units).floor().max(0.0);
        let last = ((self.visible_x.1 - start) / units).ceil().min(cells);
        (first as u32..last.max(0.0) as u32).flat_map(move |cell| {
            let base = start + f64::from(cell) * units;
            (0..per_cell).map(move |j| base + f64::from(j) * step)
        })
    }

    /// Whether a value lies within the vertical sampling bounds.
    fn accepts(&self, y: f64) -> bool {
        y <= f64::from(self.top_height) * self.square_size
            && y >= -f64::from(self.bottom_height) * self.square_size
    }
}

/// View state a set of samples was computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleKey {
    /// Center at sampling time.
    pub center: ScreenPoint,
    /// Square size at sampling time.
    pub square_size: f64,
    /// Surface size at sampling time.
    pub size: SurfaceSize,
    /// Sampling detail.
    pub points_per_square: u32,
}

/// Sample `expression` across `domain`, keeping x values inside `interval`.
///
/// Samples that fail to evaluate, are not finite, or leave the vertical
/// bounds are dropped. Accepted points carry a negated y so they map straight
/// to screen space. An interval that does not parse yields no points.
pub fn sample_expression<E: Evaluator + ?Sized>(
    evaluator: &E,
    expression: &str,
    interval: &str,
    domain: &SampleDomain,
) -> Vec<Point> {
    let Ok(interval) = Interval::parse(interval) else {
        tracing::trace!(interval, "interval does not parse; nothing to sample");
        return Vec::new();
    };

    let mut points = Vec::new();
    for x in domain.xs() {
        if !interval.contains(x) {
            continue;
        }
        let Ok(y) = evaluator.evaluate(expression, x) else {
            continue;
        };
        if !y.is_finite() || !domain.accepts(y) {
            continue;
        }
        points.push(Point::new(x, -y));
    }
    points
}
