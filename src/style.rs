//! Visual theme for the grid, axes and value readout overlay.

use crate::render::{Color, LineStyle, TextStyle};

/// Visual theme for graphs.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color used by backends when clearing.
    pub background: Color,
    /// Grid cell outline.
    pub grid: LineStyle,
    /// Sub-unit lines drawn inside cells when zoomed in.
    pub sub_grid: LineStyle,
    /// Axis lines.
    pub axis: LineStyle,
    /// Axis labels.
    pub label: TextStyle,
    /// Stroke width of plotted functions.
    pub function_width: f32,
    /// Crosshair and value readout color.
    pub readout: Color,
}

impl Theme {
    /// Create the default light theme.
    pub fn new() -> Self {
        Self::light()
    }

    /// Light theme.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            grid: LineStyle::new(Color::BLACK, 1.0),
            sub_grid: LineStyle::new(Color::BLACK, 0.2),
            axis: LineStyle::new(Color::from_rgb8(0x66, 0x66, 0x66), 2.0),
            label: TextStyle {
                color: Color::from_rgb8(0x99, 0x99, 0x99),
                size: 12.0,
            },
            function_width: 3.0,
            readout: Color::from_rgb8(0x99, 0x99, 0x99),
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::new(0.08, 0.08, 0.09, 1.0),
            grid: LineStyle::new(Color::new(0.3, 0.3, 0.33, 1.0), 1.0),
            sub_grid: LineStyle::new(Color::new(0.3, 0.3, 0.33, 1.0), 0.2),
            axis: LineStyle::new(Color::new(0.65, 0.65, 0.7, 1.0), 2.0),
            label: TextStyle {
                color: Color::new(0.7, 0.7, 0.75, 1.0),
                size: 12.0,
            },
            function_width: 3.0,
            readout: Color::new(0.85, 0.85, 0.9, 1.0),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
