//! Engine configuration.

use crate::style::Theme;

/// Pixels per logical unit at zoom level 1.
pub const DEFAULT_SQUARE_SIZE: f64 = 42.0;
/// Smallest allowed square size.
pub const ZOOM_MIN: f64 = 10.0;
/// Largest allowed square size.
pub const ZOOM_MAX: f64 = 200.0;
/// Samples per rendered grid cell.
pub const DEFAULT_POINTS_PER_SQUARE: u32 = 15;
/// Upper bound on the sampling detail.
pub const MAX_POINTS_PER_SQUARE: u32 = 1000;

/// Configuration for a [`Graph`](crate::graph::Graph).
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Square size restored by `reset_zoom`; also the grid density reference.
    pub default_square_size: f64,
    /// Lower zoom bound (inclusive).
    pub zoom_min: f64,
    /// Upper zoom bound (inclusive).
    pub zoom_max: f64,
    /// Initial sampling detail.
    pub points_per_square: u32,
    /// Colors and stroke widths.
    pub theme: Theme,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            default_square_size: DEFAULT_SQUARE_SIZE,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            points_per_square: DEFAULT_POINTS_PER_SQUARE,
            theme: Theme::default(),
        }
    }
}
