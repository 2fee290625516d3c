use crate::interaction::{DEFAULT_DRAG_THRESHOLD, DEFAULT_ZOOM_PER_PIXEL};

/// Configuration for the GPUI graph view.
#[derive(Debug, Clone)]
pub struct GraphViewConfig {
    /// Pixel threshold for starting a pan.
    pub drag_threshold_px: f64,
    /// Square-size change per scrolled pixel.
    pub zoom_per_pixel: f64,
    /// Show function values under the cursor.
    pub show_readout: bool,
}

impl Default for GraphViewConfig {
    fn default() -> Self {
        Self {
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD,
            zoom_per_pixel: DEFAULT_ZOOM_PER_PIXEL,
            show_readout: true,
        }
    }
}
