//! Adaptive grid and axis rendering.
//!
//! Grid density follows the zoom level: zoomed out, one drawn cell spans
//! several logical units so the cell count stays bounded; zoomed in, labels
//! switch to half or quarter units and faint sub-cell lines appear.

use crate::geom::{ScreenPoint, ScreenRect, SurfaceSize};
use crate::render::Surface;
use crate::style::Theme;
use crate::transform::{Quadrants, Transform};

const X_LABEL_OFFSET: ScreenPoint = ScreenPoint { x: 5.0, y: 15.0 };
const Y_LABEL_OFFSET: ScreenPoint = ScreenPoint { x: 5.0, y: 15.0 };
const EDGE_LABEL_TOP: f64 = 20.0;
const EDGE_LABEL_BOTTOM: f64 = 10.0;
const EDGE_LABEL_LEFT: f64 = 5.0;
const EDGE_LABEL_RIGHT: f64 = 40.0;
const LABEL_CHAR_WIDTH: f64 = 5.0;

/// Grid layout derived from the current square size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDensity {
    /// `default_square_size / square_size`.
    pub exact_ratio: f64,
    /// `exact_ratio` rounded to the nearest integer; zero when zoomed in past
    /// half the default density.
    pub rounded_ratio: u32,
    /// Logical units covered by one drawn cell (the zoom ratio, at least 1).
    pub units_per_cell: f64,
    /// Pixel size of one drawn cell.
    pub cell_pixels: f64,
    /// Distance between label candidates in logical units.
    pub label_step: f64,
    /// Spacing of sub-cell lines in logical units, when they are drawn.
    pub sub_step: Option<f64>,
}

impl GridDensity {
    /// Compute the grid policy for a square size.
    pub fn from_square_size(square_size: f64, default_square_size: f64) -> Self {
        let exact_ratio = default_square_size / square_size;
        let rounded_ratio = exact_ratio.round().max(0.0) as u32;

        if rounded_ratio == 0 {
            let label_step = if exact_ratio > 0.25 { 0.5 } else { 0.25 };
            return Self {
                exact_ratio,
                rounded_ratio,
                units_per_cell: 1.0,
                cell_pixels: square_size,
                label_step,
                sub_step: (exact_ratio < 0.5).then_some(label_step),
            };
        }

        let units_per_cell = f64::from(rounded_ratio);
        Self {
            exact_ratio,
            rounded_ratio,
            units_per_cell,
            cell_pixels: square_size * units_per_cell,
            label_step: 1.0,
            sub_step: None,
        }
    }

    /// Whether labels are placed at fractional units.
    pub fn shows_decimals(&self) -> bool {
        self.rounded_ratio == 0
    }

    /// Whether a label candidate lines up with the coarse grid.
    pub fn accepts_label(&self, value: f64) -> bool {
        self.shows_decimals() || (value % f64::from(self.rounded_ratio)).abs() == 0.0
    }
}

/// Format an axis label with at most two decimals.
pub fn format_label(value: f64) -> String {
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Stroke every visible grid cell, plus sub-cell lines when zoomed in.
///
/// Cells between a far off-screen center and the surface edge are skipped.
pub(crate) fn draw_grid<S: Surface>(
    surface: &mut S,
    size: SurfaceSize,
    transform: &Transform,
    quadrants: &Quadrants,
    density: &GridDensity,
    theme: &Theme,
) {
    let center = transform.center();
    let cell = density.cell_pixels;
    // `beyond` is how far the center lies past the opposite surface edge.
    let visible = |extent: u32, beyond: f64| {
        let last = (f64::from(extent) / density.units_per_cell).ceil() as u32;
        let first = ((beyond / cell).floor().max(0.0) as u32).saturating_add(1);
        first..=last
    };

    for (extent, sign_x, sign_y) in quadrants.iter() {
        let beyond_x = if sign_x < 0.0 {
            center.x - size.width
        } else {
            -center.x
        };
        let beyond_y = if sign_y < 0.0 {
            center.y - size.height
        } else {
            -center.y
        };
        for i in visible(extent.height, beyond_y) {
            for j in visible(extent.width, beyond_x) {
                let x = if sign_x < 0.0 {
                    center.x - f64::from(j) * cell
                } else {
                    center.x + f64::from(j - 1) * cell
                };
                let y = if sign_y < 0.0 {
                    center.y - f64::from(i) * cell
                } else {
                    center.y + f64::from(i - 1) * cell
                };
                surface.stroke_rect(ScreenRect::from_origin_size(x, y, cell, cell), theme.grid);

                if let Some(step) = density.sub_step {
                    draw_sub_cell(surface, ScreenPoint::new(x, y), cell, step, theme);
                }
            }
        }
    }
}

fn draw_sub_cell<S: Surface>(
    surface: &mut S,
    origin: ScreenPoint,
    cell: f64,
    step: f64,
    theme: &Theme,
) {
    let divisions = (1.0 / step).round() as u32;
    for k in 1..divisions {
        let offset = f64::from(k) * step * cell;
        surface.stroke_path(
            &[
                ScreenPoint::new(origin.x + offset, origin.y),
                ScreenPoint::new(origin.x + offset, origin.y + cell),
            ],
            theme.sub_grid,
        );
        surface.stroke_path(
            &[
                ScreenPoint::new(origin.x, origin.y + offset),
                ScreenPoint::new(origin.x + cell, origin.y + offset),
            ],
            theme.sub_grid,
        );
    }
}

/// Draw both axes through the center and their labels.
///
/// When an axis is scrolled off-screen its labels stick to the nearest edge.
pub(crate) fn draw_axes<S: Surface>(
    surface: &mut S,
    size: SurfaceSize,
    transform: &Transform,
    quadrants: &Quadrants,
    density: &GridDensity,
    theme: &Theme,
) {
    let center = transform.center();
    let square = transform.square_size();

    surface.stroke_path(
        &[
            ScreenPoint::new(0.0, center.y),
            ScreenPoint::new(size.width, center.y),
        ],
        theme.axis,
    );
    surface.stroke_path(
        &[
            ScreenPoint::new(center.x, 0.0),
            ScreenPoint::new(center.x, size.height),
        ],
        theme.axis,
    );

    let x_label_y = if quadrants.top_height() == 0 {
        EDGE_LABEL_TOP
    } else if quadrants.bottom_height() == 0 {
        size.height - EDGE_LABEL_BOTTOM
    } else {
        center.y + X_LABEL_OFFSET.y
    };
    let visible_x = (
        -center.x / square - 1.0,
        (size.width - center.x) / square + 1.0,
    );
    let visible_y = (
        (center.y - size.height) / square - 1.0,
        center.y / square + 1.0,
    );

    for value in label_values(
        quadrants.negative_width(),
        quadrants.positive_width(),
        visible_x,
        density,
    ) {
        let position = ScreenPoint::new(center.x + value * square + X_LABEL_OFFSET.x, x_label_y);
        surface.fill_text(&format_label(value), position, &theme.label);
    }

    for value in label_values(
        quadrants.bottom_height(),
        quadrants.top_height(),
        visible_y,
        density,
    ) {
        if value == 0.0 {
            continue;
        }
        let text = format_label(value);
        let x = if quadrants.negative_width() == 0 {
            EDGE_LABEL_LEFT
        } else if quadrants.positive_width() == 0 {
            size.width - EDGE_LABEL_RIGHT - text.len() as f64 * LABEL_CHAR_WIDTH
        } else {
            center.x + Y_LABEL_OFFSET.x
        };
        let position = ScreenPoint::new(x, center.y - value * square + Y_LABEL_OFFSET.y);
        surface.fill_text(&text, position, &theme.label);
    }
}

/// Label candidates in `[-below, above)` that line up with the grid,
/// limited to the `visible` window of logical values.
fn label_values(
    below: u32,
    above: u32,
    visible: (f64, f64),
    density: &GridDensity,
) -> impl Iterator<Item = f64> {
    let step = density.label_step;
    let start = (-f64::from(below)).max((visible.0 / step).floor() * step);
    let end = f64::from(above).min(visible.1);
    let count = ((end - start) / step).ceil().max(0.0) as u64;
    let density = *density;
    (0..count)
        .map(move |k| start + k as f64 * step)
        .filter(move |value| density.accepts_label(*value))
}
