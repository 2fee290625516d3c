//! gpui_grapher is an interactive function plotter built for GPUI.
//! The crate draws user expressions of `x` over an adaptive Cartesian grid
//! that pans and zooms about the cursor.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod expr;
pub mod function;
pub mod geom;
pub mod gpui_backend;
pub mod graph;
pub mod grid;
pub mod interaction;
pub mod interval;
pub mod render;
pub mod sampler;
pub mod style;
pub mod transform;

pub use config::GraphConfig;
pub use error::{GraphError, Result};
pub use expr::{CompiledExpression, EvalError, Evaluator, ExpressionEvaluator};
pub use function::{FunctionId, FunctionList, GraphFunction, PlottedFunction};
pub use geom::{Point, ScreenPoint, ScreenRect, SurfaceSize};
pub use gpui_backend::{GpuiGraphView, GraphHandle, GraphViewConfig};
pub use graph::{Graph, ValueReading};
pub use grid::{GridDensity, format_label};
pub use interaction::{DragTracker, wheel_zoom_delta};
pub use interval::{Bound, Interval, IntervalError, is_in_interval};
pub use render::{
    Color, ColorParseError, LineStyle, RenderCommand, RenderList, Surface, TextStyle,
};
pub use sampler::{SampleDomain, SampleKey, sample_expression};
pub use style::Theme;
pub use transform::{Extent, Quadrants, Transform};
