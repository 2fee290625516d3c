//! GPUI integration for gpui_grapher.
//!
//! This module provides a GPUI view that renders a [`Graph`](crate::graph::Graph)
//! and handles dragging to pan, wheel zoom about the cursor, double-click zoom
//! reset and the hover value readout.

mod config;
mod frame;
mod paint;
mod state;
mod view;

pub use config::GraphViewConfig;
pub use view::{GpuiGraphView, GraphHandle};
