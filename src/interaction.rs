//! Interaction helpers for panning and zooming.
//!
//! These helpers are used by render backends to turn pointer input into
//! engine calls with consistent semantics across platforms.

use crate::geom::{ScreenPoint, SurfaceSize};

/// Pointer travel, in pixels, before a press turns into a pan.
pub const DEFAULT_DRAG_THRESHOLD: f64 = 3.0;

/// Square-size change per wheel pixel.
pub const DEFAULT_ZOOM_PER_PIXEL: f64 = 0.05;

/// Progress of a pointer press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragState {
    start: ScreenPoint,
    last: ScreenPoint,
    panning: bool,
}

/// Turns press/move/release sequences into pan deltas.
///
/// Movement below the threshold is ignored so a plain click never nudges the
/// graph. Once exceeded, every move reports the delta since the previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTracker {
    threshold: f64,
    state: Option<DragState>,
}

impl Default for DragTracker {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl DragTracker {
    /// Create a tracker with the given threshold in pixels.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            state: None,
        }
    }

    /// Record a press.
    pub fn press(&mut self, position: ScreenPoint) {
        self.state = Some(DragState {
            start: position,
            last: position,
            panning: false,
        });
    }

    /// Record pointer motion. Returns the pan delta to apply, if any.
    pub fn motion(&mut self, position: ScreenPoint) -> Option<(f64, f64)> {
        let threshold = self.threshold;
        let state = self.state.as_mut()?;
        if !state.panning {
            let travel = (position.x - state.start.x).hypot(position.y - state.start.y);
            if travel < threshold {
                return None;
            }
            state.panning = true;
        }
        let delta = (position.x - state.last.x, position.y - state.last.y);
        state.last = position;
        (delta != (0.0, 0.0)).then_some(delta)
    }

    /// Record a release. Returns true when the press turned into a pan.
    pub fn release(&mut self) -> bool {
        self.state.take().is_some_and(|state| state.panning)
    }

    /// Whether a press is in progress.
    pub fn is_pressed(&self) -> bool {
        self.state.is_some()
    }

    /// Whether the current press is panning.
    pub fn is_panning(&self) -> bool {
        self.state.is_some_and(|state| state.panning)
    }
}

/// Square-size delta for a vertical wheel movement in pixels.
///
/// Scrolling up (negative delta) zooms in.
pub fn wheel_zoom_delta(wheel_pixels: f64, zoom_per_pixel: f64) -> f64 {
    -wheel_pixels * zoom_per_pixel
}

/// Whether a position lies on the surface.
pub(crate) fn on_surface(size: SurfaceSize, position: ScreenPoint) -> bool {
    position.x >= 0.0 && position.y >= 0.0 && position.x <= size.width && position.y <= size.height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_motion_is_not_a_pan() {
        let mut tracker = DragTracker::new(3.0);
        tracker.press(ScreenPoint::new(10.0, 10.0));
        assert_eq!(tracker.motion(ScreenPoint::new(11.0, 11.0)), None);
        assert!(tracker.is_pressed());
        assert!(!tracker.release());
        assert!(!tracker.is_pressed());
    }

    #[test]
    fn pan_reports_incremental_deltas() {
        let mut tracker = DragTracker::new(3.0);
        tracker.press(ScreenPoint::new(10.0, 10.0));
        assert_eq!(tracker.motion(ScreenPoint::new(15.0, 10.0)), Some((5.0, 0.0)));
        assert!(tracker.is_panning());
        assert_eq!(tracker.motion(ScreenPoint::new(15.0, 8.0)), Some((0.0, -2.0)));
        assert_eq!(tracker.motion(ScreenPoint::new(15.0, 8.0)), None);
        assert!(tracker.release());
    }

    #[test]
    fn motion_without_press_is_ignored() {
        let mut tracker = DragTracker::default();
        assert_eq!(tracker.motion(ScreenPoint::new(50.0, 50.0)), None);
    }

    #[test]
    fn wheel_up_zooms_in() {
        assert_eq!(wheel_zoom_delta(-2.0, 0.5), 1.0);
        assert_eq!(wheel_zoom_delta(4.0, 0.5), -2.0);
    }

    #[test]
    fn surface_bounds() {
        let size = SurfaceSize::new(100.0, 50.0);
        assert!(on_surface(size, ScreenPoint::new(0.0, 50.0)));
        assert!(!on_surface(size, ScreenPoint::new(-1.0, 10.0)));
        assert!(!on_surface(size, ScreenPoint::new(10.0, 51.0)));
    }
}
