use gpui::{Bounds, Pixels};

use crate::geom::{ScreenPoint, SurfaceSize};
use crate::graph::Graph;
use crate::render::{Color, RenderList};

use super::config::GraphViewConfig;
use super::state::GraphUiState;

#[derive(Debug, Clone)]
pub(crate) struct GraphFrame {
    pub(crate) render: RenderList,
    pub(crate) background: Color,
}

/// Bring the graph in line with the canvas bounds and snapshot its commands.
pub(crate) fn build_frame(
    graph: &mut Graph<RenderList>,
    state: &mut GraphUiState,
    config: &GraphViewConfig,
    bounds: Bounds<Pixels>,
) -> GraphFrame {
    let background = graph.config().theme.background;
    let size = SurfaceSize::new(
        f64::from(f32::from(bounds.size.width)),
        f64::from(f32::from(bounds.size.height)),
    );
    state.origin = Some(ScreenPoint::new(
        f64::from(f32::from(bounds.origin.x)),
        f64::from(f32::from(bounds.origin.y)),
    ));
    state.size = size;

    if !size.is_valid() {
        return GraphFrame {
            render: RenderList::new(size),
            background,
        };
    }

    if graph.center().is_none() {
        if let Err(err) = graph.resize_graph(size.width, size.height) {
            tracing::debug!(%err, "canvas not drawable yet");
        }
        if let Err(err) = graph.initialize() {
            tracing::debug!(%err, "graph initialization failed");
        }
    } else if graph.size() != size {
        if let Err(err) = graph.resize_graph(size.width, size.height) {
            tracing::debug!(%err, "graph resize failed");
        }
    }

    match state.hover.filter(|_| config.show_readout) {
        Some(position) => {
            if let Err(err) = graph.show_function_values_at_position(position.x, position.y) {
                tracing::debug!(%err, "value readout failed");
            }
            state.readout_drawn = true;
        }
        None if state.readout_drawn => {
            if let Err(err) = graph.rerender() {
                tracing::debug!(%err, "rerender failed");
            }
            state.readout_drawn = false;
        }
        None => {}
    }

    GraphFrame {
        render: graph.surface().clone(),
        background,
    }
}
