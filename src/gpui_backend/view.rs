use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use gpui::prelude::*;
use gpui::{
    MouseButton, MouseDownEvent, MouseMoveEvent, MouseUpEvent, Pixels, Point, ScrollWheelEvent,
    Window, canvas, div, px,
};

use crate::geom::{ScreenPoint, SurfaceSize};
use crate::graph::Graph;
use crate::interaction::wheel_zoom_delta;
use crate::render::RenderList;

use super::config::GraphViewConfig;
use super::frame::build_frame;
use super::paint::{paint_frame, to_hsla};
use super::state::GraphUiState;

/// A GPUI view that renders a [`Graph`] with interactive controls.
///
/// The graph is sized to the canvas and initialized on the first frame.
/// Functions are managed through a [`GraphHandle`].
#[derive(Clone)]
pub struct GpuiGraphView {
    graph: Arc<RwLock<Graph<RenderList>>>,
    state: Arc<RwLock<GraphUiState>>,
    config: GraphViewConfig,
}

impl Default for GpuiGraphView {
    fn default() -> Self {
        Self::new()
    }
}

impl GpuiGraphView {
    /// Create a view with an empty graph and the default [`GraphViewConfig`].
    pub fn new() -> Self {
        Self::with_config(GraphViewConfig::default())
    }

    /// Create a view with an empty graph and a custom configuration.
    pub fn with_config(config: GraphViewConfig) -> Self {
        let graph = Graph::new(RenderList::new(SurfaceSize::new(0.0, 0.0)));
        Self::with_graph(graph, config)
    }

    /// Wrap an existing graph.
    pub fn with_graph(graph: Graph<RenderList>, config: GraphViewConfig) -> Self {
        Self {
            graph: Arc::new(RwLock::new(graph)),
            state: Arc::new(RwLock::new(GraphUiState::new(config.drag_threshold_px))),
            config,
        }
    }

    /// Get a handle for mutating the underlying graph.
    pub fn graph_handle(&self) -> GraphHandle {
        GraphHandle {
            graph: Arc::clone(&self.graph),
        }
    }

    fn on_mouse_down(&mut self, ev: &MouseDownEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = write_lock(&self.state);
        let Some(local) = state.to_local(pos) else {
            return;
        };

        if ev.click_count >= 2 {
            state.drag.release();
            if let Err(err) = write_lock(&self.graph).reset_zoom() {
                tracing::debug!(%err, "zoom reset ignored");
            }
        } else {
            state.drag.press(local);
        }
        cx.notify();
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let mut state = write_lock(&self.state);
        state.update_hover(pos);

        if let Some(local) = state.to_local(pos)
            && let Some((dx, dy)) = state.drag.motion(local)
            && let Err(err) = write_lock(&self.graph).move_graph(dx, dy)
        {
            tracing::debug!(%err, "pan ignored");
        }
        cx.notify();
    }

    fn on_mouse_up(&mut self, _ev: &MouseUpEvent, cx: &mut Context<Self>) {
        let mut state = write_lock(&self.state);
        if state.drag.release() {
            tracing::trace!("pan finished");
        }
        cx.notify();
    }

    fn on_scroll(&mut self, ev: &ScrollWheelEvent, _window: &Window, cx: &mut Context<Self>) {
        let pos = screen_point(ev.position);
        let state = read_lock(&self.state);
        let Some(local) = state.to_local(pos) else {
            return;
        };

        let line_height = px(16.0);
        let delta = ev.delta.pixel_delta(line_height);
        let zoom_delta = wheel_zoom_delta(f64::from(f32::from(delta.y)), self.config.zoom_per_pixel);
        if zoom_delta.abs() < f64::EPSILON {
            return;
        }

        // Zoom limits reject out-of-range steps; the wheel simply stops there.
        if let Err(err) = write_lock(&self.graph).zoom_graph(zoom_delta, Some(local)) {
            tracing::trace!(%err, "zoom ignored");
        }
        cx.notify();
    }
}

impl Render for GpuiGraphView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let graph = Arc::clone(&self.graph);
        let state = Arc::clone(&self.state);
        let config = self.config.clone();
        let background = read_lock(&self.graph).config().theme.background;

        div()
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, _window, _| {
                        let mut graph = write_lock(&graph);
                        let mut state = write_lock(&state);
                        build_frame(&mut graph, &mut state, &config, bounds)
                    },
                    move |bounds, frame, window, cx| {
                        paint_frame(&frame, bounds, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_down(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_down(ev, cx);
                }),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
            .on_mouse_up(
                MouseButton::Left,
                cx.listener(|this, ev, _, cx| {
                    this.on_mouse_up(ev, cx);
                }),
            )
            .on_scroll_wheel(cx.listener(|this, ev, window, cx| {
                this.on_scroll(ev, window, cx);
            }))
    }
}

/// A handle for mutating a [`Graph`] held inside a `GpuiGraphView`.
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct GraphHandle {
    graph: Arc<RwLock<Graph<RenderList>>>,
}

impl GraphHandle {
    /// Read the graph state.
    ///
    /// The graph is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&Graph<RenderList>) -> R) -> R {
        let graph = read_lock(&self.graph);
        f(&graph)
    }

    /// Mutate the graph state.
    ///
    /// The graph is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut Graph<RenderList>) -> R) -> R {
        let mut graph = write_lock(&self.graph);
        f(&mut graph)
    }
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f64::from(f32::from(point.x)), f64::from(f32::from(point.y)))
}
