use crate::geom::{ScreenPoint, SurfaceSize};
use crate::interaction::{DragTracker, on_surface};

#[derive(Debug, Clone)]
pub(crate) struct GraphUiState {
    pub(crate) drag: DragTracker,
    /// Window position of the canvas origin from the last frame.
    pub(crate) origin: Option<ScreenPoint>,
    pub(crate) size: SurfaceSize,
    /// Cursor position in canvas coordinates.
    pub(crate) hover: Option<ScreenPoint>,
    pub(crate) readout_drawn: bool,
}

impl GraphUiState {
    pub(crate) fn new(drag_threshold: f64) -> Self {
        Self {
            drag: DragTracker::new(drag_threshold),
            origin: None,
            size: SurfaceSize::new(0.0, 0.0),
            hover: None,
            readout_drawn: false,
        }
    }

    /// Convert a window position into canvas coordinates.
    pub(crate) fn to_local(&self, position: ScreenPoint) -> Option<ScreenPoint> {
        let origin = self.origin?;
        Some(ScreenPoint::new(position.x - origin.x, position.y - origin.y))
    }

    pub(crate) fn update_hover(&mut self, position: ScreenPoint) {
        self.hover = self
            .to_local(position)
            .filter(|local| on_surface(self.size, *local));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_is_local_and_bounded() {
        let mut state = GraphUiState::new(3.0);
        state.update_hover(ScreenPoint::new(10.0, 10.0));
        assert_eq!(state.hover, None);

        state.origin = Some(ScreenPoint::new(100.0, 50.0));
        state.size = SurfaceSize::new(200.0, 100.0);
        state.update_hover(ScreenPoint::new(150.0, 60.0));
        assert_eq!(state.hover, Some(ScreenPoint::new(50.0, 10.0)));
        state.update_hover(ScreenPoint::new(400.0, 60.0));
        assert_eq!(state.hover, None);
    }
}
