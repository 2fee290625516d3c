//! The graph engine: view state, scene rendering and value readouts.

use crate::config::{GraphConfig, MAX_POINTS_PER_SQUARE};
use crate::error::{GraphError, Result};
use crate::expr::{Evaluator, ExpressionEvaluator};
use crate::function::{GraphFunction, SampleCache};
use crate::geom::{Point, ScreenPoint, ScreenRect, SurfaceSize};
use crate::grid::{GridDensity, draw_axes, draw_grid};
use crate::interval::is_in_interval;
use crate::render::{Color, LineStyle, Surface, TextStyle, build_polyline};
use crate::sampler::{SampleDomain, SampleKey, sample_expression};
use crate::transform::{Quadrants, Transform, zoom_correction};

const READOUT_LABEL_OFFSET: f64 = 15.0;
const CROSSHAIR_WIDTH: f64 = 1.0;

/// A function value read at the pointer column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueReading {
    /// Index of the function in draw order.
    pub index: usize,
    /// Logical x under the pointer.
    pub x: f64,
    /// Function value at `x`.
    pub y: f64,
}

/// Function plotting engine bound to one drawing surface.
///
/// All mutators redraw whatever they invalidate before returning, so the
/// surface always shows the current state. Failed operations leave the state
/// unchanged.
#[derive(Debug)]
pub struct Graph<S, E = ExpressionEvaluator> {
    surface: S,
    evaluator: E,
    config: GraphConfig,
    size: SurfaceSize,
    square_size: f64,
    center: Option<ScreenPoint>,
    quadrants: Option<Quadrants>,
    points_per_square: u32,
    functions: Vec<GraphFunction>,
    scratch: Vec<ScreenPoint>,
}

impl<S: Surface> Graph<S, ExpressionEvaluator> {
    /// Create a graph using the built-in expression evaluator.
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, ExpressionEvaluator::new(), GraphConfig::default())
    }
}

impl<S: Surface, E: Evaluator> Graph<S, E> {
    /// Create a graph with a custom evaluator.
    pub fn with_evaluator(surface: S, evaluator: E) -> Self {
        Self::with_config(surface, evaluator, GraphConfig::default())
    }

    /// Create a graph with a custom evaluator and configuration.
    pub fn with_config(surface: S, evaluator: E, config: GraphConfig) -> Self {
        let size = surface.size();
        Self {
            surface,
            evaluator,
            square_size: config.default_square_size,
            points_per_square: config.points_per_square.clamp(1, MAX_POINTS_PER_SQUARE),
            config,
            size,
            center: None,
            quadrants: None,
            functions: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Pixels per logical unit.
    pub fn square_size(&self) -> f64 {
        self.square_size
    }

    /// Screen position of the logical origin, once initialized.
    pub fn center(&self) -> Option<ScreenPoint> {
        self.center
    }

    /// Surface dimensions the engine draws for.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Samples per drawn grid cell.
    pub fn points_per_square(&self) -> u32 {
        self.points_per_square
    }

    /// Functions held for redraws, in draw order.
    pub fn functions(&self) -> &[GraphFunction] {
        &self.functions
    }

    /// Quadrant extents from the last grid pass.
    pub fn quadrants(&self) -> Option<Quadrants> {
        self.quadrants
    }

    /// Access the configuration.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Access the surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Access the surface mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Access the evaluator.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Current transform, once initialized.
    pub fn transform(&self) -> Option<Transform> {
        Transform::new(self.center?, self.square_size)
    }

    /// Grid policy for the current square size.
    pub fn density(&self) -> GridDensity {
        GridDensity::from_square_size(self.square_size, self.config.default_square_size)
    }

    /// Convert a screen position into logical coordinates.
    pub fn to_logical(&self, point: ScreenPoint) -> Option<Point> {
        self.transform().map(|transform| transform.to_logical(point))
    }

    /// Place the origin at the surface midpoint (unless already placed) and
    /// draw the grid and axes, plus any functions already held.
    ///
    /// An existing center is kept, so re-initializing after a resize does not
    /// lose the user's pan position.
    pub fn initialize(&mut self) -> Result<()> {
        self.ensure_surface()?;
        if self.center.is_none() {
            let center = self.size.midpoint();
            tracing::debug!(x = center.x, y = center.y, "placing graph origin");
            self.center = Some(center);
        }
        self.rerender()
    }

    /// Forget all functions and start over with a bare grid.
    pub fn clear_graph(&mut self) -> Result<()> {
        self.ensure_surface()?;
        self.functions.clear();
        self.initialize()
    }

    /// Sample a new function, keep it for redraws and draw it on top of the
    /// current scene. Returns the sampled points.
    pub fn draw_graph(
        &mut self,
        expression: impl Into<String>,
        color: Color,
        interval: impl Into<String>,
    ) -> Result<Vec<Point>> {
        let mut function = GraphFunction::new(expression, color, interval);
        let (transform, key) = self.view()?;
        let points = self.sample(function.expression(), function.interval())?;

        let style = LineStyle::new(function.color(), self.config.theme.function_width);
        build_polyline(&points, &transform, &mut self.scratch);
        self.surface.stroke_path(&self.scratch, style);

        function.samples = Some(SampleCache {
            key,
            points: points.clone(),
        });
        self.functions.push(function);
        Ok(points)
    }

    /// Sample an expression over the visible domain without drawing it.
    pub fn sample(&self, expression: &str, interval: &str) -> Result<Vec<Point>> {
        let (transform, _) = self.view()?;
        let quadrants = transform.quadrants(self.size);
        let domain = self.sample_domain(&transform, &quadrants);
        Ok(sample_expression(
            &self.evaluator,
            expression,
            interval,
            &domain,
        ))
    }

    /// Redraw everything: grid, axes and every held function.
    pub fn rerender(&mut self) -> Result<()> {
        let (transform, key) = self.view()?;
        self.surface.clear_rect(self.size.rect());
        let quadrants = self.draw_scene()?;
        let domain = self.sample_domain(&transform, &quadrants);

        let mut resampled = 0usize;
        for function in &mut self.functions {
            let stale = function
                .samples
                .as_ref()
                .is_none_or(|cache| cache.key != key);
            if stale {
                let points = sample_expression(
                    &self.evaluator,
                    function.expression(),
                    function.interval(),
                    &domain,
                );
                function.samples = Some(SampleCache { key, points });
                resampled += 1;
            }
            let Some(cache) = function.samples.as_ref() else {
                continue;
            };
            build_polyline(&cache.points, &transform, &mut self.scratch);
            let style = LineStyle::new(function.color(), self.config.theme.function_width);
            self.surface.stroke_path(&self.scratch, style);
        }
        tracing::trace!(
            functions = self.functions.len(),
            resampled,
            "graph rerendered"
        );
        Ok(())
    }

    /// Pan by a pixel delta.
    pub fn move_graph(&mut self, dx: f64, dy: f64) -> Result<()> {
        if !dx.is_finite() || !dy.is_finite() {
            return Err(GraphError::InvalidPosition { x: dx, y: dy });
        }
        let center = self.center.ok_or(GraphError::NotInitialized)?;
        let moved = finite_point(center.offset(dx, dy))?;
        self.center = Some(moved);
        self.rerender()
    }

    /// Place the origin at a screen position.
    pub fn move_graph_absolute(&mut self, x: f64, y: f64) -> Result<()> {
        let center = finite_point(ScreenPoint::new(x, y))?;
        self.ensure_surface()?;
        self.center = Some(center);
        self.rerender()
    }

    /// Change the square size by `delta`, keeping the logical point under
    /// `pivot` (default: the center) in place.
    ///
    /// Sizes outside the zoom limits are rejected without touching state.
    pub fn zoom_graph(&mut self, delta: f64, pivot: Option<ScreenPoint>) -> Result<()> {
        let center = self.center.ok_or(GraphError::NotInitialized)?;
        let new_size = self.square_size + delta;
        if !(self.config.zoom_min..=self.config.zoom_max).contains(&new_size) {
            tracing::debug!(requested = new_size, "zoom rejected");
            return Err(GraphError::ZoomOutOfRange {
                requested: new_size,
                min: self.config.zoom_min,
                max: self.config.zoom_max,
            });
        }
        let pivot = finite_point(pivot.unwrap_or(center))?;
        let (dx, dy) = zoom_correction(center, pivot, self.square_size, new_size);
        let moved = finite_point(center.offset(dx, dy))?;

        self.square_size = new_size;
        self.center = Some(moved);
        self.rerender()
    }

    /// Restore the default square size. The center stays where it is.
    pub fn reset_zoom(&mut self) -> Result<()> {
        self.square_size = self.config.default_square_size;
        self.rerender()
    }

    /// Adopt new surface dimensions and redraw.
    pub fn resize_graph(&mut self, width: f64, height: f64) -> Result<()> {
        let size = SurfaceSize::new(width, height);
        if !size.is_valid() {
            return Err(GraphError::EmptySurface { width, height });
        }
        tracing::debug!(width, height, "graph resized");
        self.size = size;
        self.surface.resize(size);
        if self.center.is_some() {
            self.rerender()?;
        }
        Ok(())
    }

    /// Change the sampling detail and redraw.
    pub fn set_points_per_square(&mut self, points_per_square: u32) -> Result<()> {
        if !(1..=MAX_POINTS_PER_SQUARE).contains(&points_per_square) {
            return Err(GraphError::InvalidDetail(points_per_square));
        }
        self.points_per_square = points_per_square;
        if self.center.is_some() {
            self.rerender()?;
        }
        Ok(())
    }

    /// Replace the held functions and redraw.
    ///
    /// Functions whose expression and interval match a held one keep its
    /// samples, so recoloring does not trigger a new sampling pass.
    pub fn set_functions(&mut self, functions: impl IntoIterator<Item = GraphFunction>) -> Result<()> {
        let mut previous = std::mem::take(&mut self.functions);
        for mut function in functions {
            if let Some(index) = previous
                .iter()
                .position(|held| held.samples.is_some() && held.same_curve(&function))
            {
                function.samples = previous.swap_remove(index).samples;
            }
            self.functions.push(function);
        }
        if self.center.is_some() {
            self.rerender()?;
        }
        Ok(())
    }

    /// Redraw, then overlay each function's value at the readout column and a
    /// crosshair through the pointer position.
    ///
    /// Functions that cannot be evaluated at the readout column, or whose
    /// interval excludes it, are skipped. Zero is a regular value.
    pub fn show_function_values_at_position(&mut self, x: f64, y: f64) -> Result<Vec<ValueReading>> {
        let (transform, _) = self.view()?;
        let logical_x = transform.to_logical(ScreenPoint::new(x, 0.0)).x;
        self.rerender()?;

        let center = transform.center();
        let style = TextStyle {
            color: self.config.theme.readout,
            size: self.config.theme.label.size,
        };
        let mut readings = Vec::new();
        for (index, function) in self.functions.iter().enumerate() {
            if !is_in_interval(logical_x, function.interval()) {
                continue;
            }
            let Ok(value) = self.evaluator.evaluate(function.expression(), logical_x) else {
                continue;
            };
            if !value.is_finite() {
                continue;
            }
            let position = ScreenPoint::new(
                x + READOUT_LABEL_OFFSET,
                center.y - value * transform.square_size(),
            );
            self.surface
                .fill_text(&format!("{value:.2}"), position, &style);
            readings.push(ValueReading {
                index,
                x: logical_x,
                y: value,
            });
        }

        let crosshair = self.config.theme.readout;
        self.surface.fill_rect(
            ScreenRect::from_origin_size(x, 0.0, CROSSHAIR_WIDTH, self.size.height),
            crosshair,
        );
        self.surface.fill_rect(
            ScreenRect::from_origin_size(0.0, y, self.size.width, CROSSHAIR_WIDTH),
            crosshair,
        );
        Ok(readings)
    }

    fn ensure_surface(&self) -> Result<()> {
        if self.size.is_valid() {
            Ok(())
        } else {
            Err(GraphError::EmptySurface {
                width: self.size.width,
                height: self.size.height,
            })
        }
    }

    fn sample_domain(&self, transform: &Transform, quadrants: &Quadrants) -> SampleDomain {
        let left = transform.to_logical(ScreenPoint::new(0.0, 0.0)).x;
        let right = transform.to_logical(ScreenPoint::new(self.size.width, 0.0)).x;
        SampleDomain::new(
            quadrants,
            &self.density(),
            self.square_size,
            self.points_per_square,
            (left, right),
        )
    }

    fn view(&self) -> Result<(Transform, SampleKey)> {
        self.ensure_surface()?;
        let transform = self.transform().ok_or(GraphError::NotInitialized)?;
        let key = SampleKey {
            center: transform.center(),
            square_size: self.square_size,
            size: self.size,
            points_per_square: self.points_per_square,
        };
        Ok((transform, key))
    }

    fn draw_scene(&mut self) -> Result<Quadrants> {
        let (transform, _) = self.view()?;
        let quadrants = transform.quadrants(self.size);
        self.quadrants = Some(quadrants);
        let density = self.density();
        let theme = &self.config.theme;
        draw_grid(&mut self.surface, self.size, &transform, &quadrants, &density, theme);
        draw_axes(
            &mut self.surface,
            self.size,
            &transform,
            &quadrants,
            &density,
            theme,
        );
        Ok(quadrants)
    }
}

fn finite_point(point: ScreenPoint) -> Result<ScreenPoint> {
    if point.x.is_finite() && point.y.is_finite() {
        Ok(point)
    } else {
        Err(GraphError::InvalidPosition {
            x: point.x,
            y: point.y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::EvalError;
    use crate::render::{RenderCommand, RenderList};

    fn graph() -> Graph<RenderList> {
        let mut graph = Graph::new(RenderList::new(SurfaceSize::new(800.0, 600.0)));
        graph.initialize().expect("initialize");
        graph
    }

    fn red() -> Color {
        Color::parse("#f00").expect("color")
    }

    #[test]
    fn initialize_centers_origin() {
        let graph = graph();
        assert_eq!(graph.center(), Some(ScreenPoint::new(400.0, 300.0)));
        assert_eq!(graph.square_size(), 42.0);
        assert!(!graph.surface().commands().is_empty());
    }

    #[test]
    fn operations_before_initialize_fail() {
        let mut graph = Graph::new(RenderList::new(SurfaceSize::new(800.0, 600.0)));
        assert_eq!(graph.rerender(), Err(GraphError::NotInitialized));
        assert_eq!(graph.move_graph(1.0, 1.0), Err(GraphError::NotInitialized));
        assert_eq!(
            graph.zoom_graph(1.0, None),
            Err(GraphError::NotInitialized)
        );
        assert_eq!(
            graph.draw_graph("x", red(), "R").map(|points| points.len()),
            Err(GraphError::NotInitialized)
        );
        assert!(graph.surface().commands().is_empty());
    }

    #[test]
    fn empty_surface_cannot_initialize() {
        let mut graph = Graph::new(RenderList::new(SurfaceSize::new(0.0, 600.0)));
        assert!(matches!(
            graph.initialize(),
            Err(GraphError::EmptySurface { .. })
        ));
        assert_eq!(graph.center(), None);
    }

    #[test]
    fn initialize_keeps_held_curves() {
        let mut graph = graph();
        graph.draw_graph("x", red(), "R").expect("draw");
        graph.initialize().expect("reinitialize");
        let curves = graph
            .surface()
            .paths()
            .filter(|(_, style)| style.color == red())
            .count();
        assert_eq!(curves, 1);
        assert_eq!(graph.functions().len(), 1);
    }

    #[test]
    fn functions_set_before_initialize_are_drawn() {
        let mut graph = Graph::new(RenderList::new(SurfaceSize::new(800.0, 600.0)));
        graph
            .set_functions([GraphFunction::new("x", red(), "R")])
            .expect("set");
        assert!(graph.surface().commands().is_empty());
        graph.initialize().expect("initialize");
        assert_eq!(
            graph
                .surface()
                .paths()
                .filter(|(_, style)| style.color == red())
                .count(),
            1
        );
    }

    #[test]
    fn draw_graph_samples_identity() {
        let mut graph = graph();
        let points = graph.draw_graph("x", red(), "R").expect("draw");
        assert!(!points.is_empty());
        assert!(points.iter().all(|point| point.y == -point.x));
        assert_eq!(graph.functions().len(), 1);
    }

    #[test]
    fn sampling_is_deterministic() {
        let mut graph = graph();
        let first = graph.draw_graph("x", red(), "R").expect("draw");
        let second = graph.draw_graph("x", red(), "R").expect("draw");
        assert_eq!(first, second);
    }

    #[test]
    fn draw_graph_is_incremental() {
        let mut graph = graph();
        graph.draw_graph("x", red(), "R").expect("draw");
        let before = graph.surface().commands().len();
        graph.draw_graph("x^2", red(), "R").expect("draw");
        let after = graph.surface().commands();
        assert_eq!(after.len(), before + 1);
        assert!(matches!(after.last(), Some(RenderCommand::Path { .. })));
    }

    #[test]
    fn bad_input_renders_nothing() {
        let mut graph = graph();
        assert!(graph.draw_graph("sin(", red(), "R").expect("draw").is_empty());
        assert!(graph.draw_graph("x", red(), "[0;").expect("draw").is_empty());
        assert_eq!(graph.functions().len(), 2);
    }

    #[test]
    fn clear_graph_is_idempotent() {
        let mut graph = graph();
        graph.draw_graph("x", red(), "R").expect("draw");
        graph.clear_graph().expect("clear");
        let first = graph.surface().commands().to_vec();
        assert!(graph.functions().is_empty());
        graph.clear_graph().expect("clear");
        assert!(graph.functions().is_empty());
        assert_eq!(graph.surface().commands(), first.as_slice());
        assert_eq!(graph.surface().paths().filter(|(_, style)| style.width == 3.0).count(), 0);
    }

    #[test]
    fn zoom_bounds_are_enforced() {
        let mut graph = graph();
        assert!(matches!(
            graph.zoom_graph(-33.0, None),
            Err(GraphError::ZoomOutOfRange { .. })
        ));
        assert!(graph.zoom_graph(159.0, None).is_err());
        assert!(graph.zoom_graph(f64::NAN, None).is_err());
        assert_eq!(graph.square_size(), 42.0);
        assert_eq!(graph.center(), Some(ScreenPoint::new(400.0, 300.0)));
        graph.zoom_graph(-32.0, None).expect("lower bound is inclusive");
        assert_eq!(graph.square_size(), 10.0);
        graph.zoom_graph(190.0, None).expect("upper bound is inclusive");
        assert_eq!(graph.square_size(), 200.0);
    }

    #[test]
    fn zoom_keeps_pivot_fixed() {
        let mut graph = graph();
        graph.move_graph(-37.0, 12.5).expect("move");
        for (delta, pivot) in [
            (10.0, ScreenPoint::new(123.0, 456.0)),
            (-25.0, ScreenPoint::new(790.0, 5.0)),
            (7.5, ScreenPoint::new(-40.0, 300.0)),
        ] {
            let before = graph.to_logical(pivot).expect("initialized");
            graph.zoom_graph(delta, Some(pivot)).expect("zoom");
            let after = graph.to_logical(pivot).expect("initialized");
            assert!((before.x - after.x).abs() < 1e-9);
            assert!((before.y - after.y).abs() < 1e-9);
        }
    }

    #[test]
    fn zoom_about_center_keeps_center() {
        let mut graph = graph();
        graph.zoom_graph(20.0, None).expect("zoom");
        assert_eq!(graph.center(), Some(ScreenPoint::new(400.0, 300.0)));
        assert_eq!(graph.square_size(), 62.0);
    }

    #[test]
    fn reset_zoom_keeps_center() {
        let mut graph = graph();
        graph.move_graph(50.0, -20.0).expect("move");
        graph.zoom_graph(30.0, Some(ScreenPoint::new(10.0, 10.0))).expect("zoom");
        let center = graph.center();
        graph.reset_zoom().expect("reset");
        assert_eq!(graph.square_size(), 42.0);
        assert_eq!(graph.center(), center);
    }

    #[test]
    fn move_absolute_and_invalid_moves() {
        let mut graph = graph();
        graph.move_graph_absolute(10.0, 20.0).expect("move");
        assert_eq!(graph.center(), Some(ScreenPoint::new(10.0, 20.0)));
        assert!(matches!(
            graph.move_graph(f64::INFINITY, 0.0),
            Err(GraphError::InvalidPosition { .. })
        ));
        assert_eq!(graph.center(), Some(ScreenPoint::new(10.0, 20.0)));
    }

    #[test]
    fn overflowing_moves_leave_state_unchanged() {
        let mut graph = graph();
        graph.move_graph_absolute(1e308, 300.0).expect("move");
        assert_eq!(
            graph.move_graph(1e308, 0.0),
            Err(GraphError::InvalidPosition {
                x: f64::INFINITY,
                y: 300.0
            })
        );
        assert_eq!(graph.center(), Some(ScreenPoint::new(1e308, 300.0)));

        graph.move_graph_absolute(1.7e308, 300.0).expect("move");
        assert!(matches!(
            graph.zoom_graph(10.0, Some(ScreenPoint::new(0.0, 0.0))),
            Err(GraphError::InvalidPosition { .. })
        ));
        assert_eq!(graph.square_size(), 42.0);
        assert_eq!(graph.center(), Some(ScreenPoint::new(1.7e308, 300.0)));
    }

    #[test]
    fn far_pan_draws_only_the_visible_grid() {
        let mut graph = graph();
        let centered = graph.surface().commands().len();
        graph.draw_graph("x", red(), "R").expect("draw");
        graph.move_graph_absolute(1e6, 300.0).expect("move");
        let far = graph.surface().commands().len();
        assert!(far <= centered + 50, "{far} commands after a far pan");
        assert!(graph.sample("x", "R").expect("sample").is_empty());

        graph.move_graph_absolute(-1e300, 1e300).expect("move");
        assert!(graph.surface().commands().len() <= centered + 50);
    }

    #[test]
    fn resize_preserves_pan_position() {
        let mut graph = graph();
        graph.move_graph(100.0, 0.0).expect("move");
        graph.resize_graph(1024.0, 768.0).expect("resize");
        graph.initialize().expect("reinitialize");
        assert_eq!(graph.center(), Some(ScreenPoint::new(500.0, 300.0)));
        assert_eq!(graph.size(), SurfaceSize::new(1024.0, 768.0));
        assert_eq!(graph.surface().size(), SurfaceSize::new(1024.0, 768.0));
    }

    #[test]
    fn detail_increases_sample_count() {
        let mut graph = graph();
        graph.set_points_per_square(5).expect("detail");
        let coarse = graph.sample("x", "R").expect("sample").len();
        graph.set_points_per_square(20).expect("detail");
        let fine = graph.sample("x", "R").expect("sample").len();
        assert!(fine > coarse);
        assert_eq!(
            graph.set_points_per_square(0),
            Err(GraphError::InvalidDetail(0))
        );
        assert_eq!(graph.points_per_square(), 20);
    }

    #[test]
    fn detail_is_capped() {
        let mut graph = graph();
        assert_eq!(
            graph.set_points_per_square(MAX_POINTS_PER_SQUARE + 1),
            Err(GraphError::InvalidDetail(MAX_POINTS_PER_SQUARE + 1))
        );
        graph
            .set_points_per_square(MAX_POINTS_PER_SQUARE)
            .expect("upper bound is inclusive");
        assert_eq!(graph.points_per_square(), MAX_POINTS_PER_SQUARE);
    }

    #[test]
    fn value_readout_shows_zero() {
        let mut graph = graph();
        graph.draw_graph("x", red(), "R").expect("draw");
        graph.draw_graph("x^2 + 1", red(), "R").expect("draw");
        graph.draw_graph("1/x", red(), "R").expect("draw");
        let readings = graph
            .show_function_values_at_position(400.0, 100.0)
            .expect("readout");
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0], ValueReading { index: 0, x: 0.0, y: 0.0 });
        assert_eq!(readings[1].y, 1.0);
        let texts: Vec<&str> = graph.surface().texts().map(|(text, _)| text).collect();
        assert!(texts.contains(&"0.00"));
        assert!(texts.contains(&"1.00"));
        let crosshair = graph
            .surface()
            .commands()
            .iter()
            .filter(|command| matches!(command, RenderCommand::FillRect { .. }))
            .count();
        assert_eq!(crosshair, 2);
    }

    #[test]
    fn value_readout_respects_interval() {
        let mut graph = graph();
        graph.draw_graph("x", red(), "N").expect("draw");
        let readings = graph
            .show_function_values_at_position(358.0, 0.0)
            .expect("readout");
        assert!(readings.is_empty());
    }

    #[test]
    fn recolor_reuses_samples() {
        let calls = std::cell::Cell::new(0usize);
        let evaluator = |_: &str, x: f64| -> std::result::Result<f64, EvalError> {
            calls.set(calls.get() + 1);
            Ok(x)
        };
        let mut graph = Graph::with_evaluator(
            RenderList::new(SurfaceSize::new(200.0, 100.0)),
            evaluator,
        );
        graph.initialize().expect("initialize");
        graph.draw_graph("x", red(), "R").expect("draw");
        let after_draw = calls.get();
        graph
            .set_functions([GraphFunction::new("x", Color::BLACK, "R")])
            .expect("set");
        assert_eq!(calls.get(), after_draw);
        assert_eq!(graph.functions()[0].color(), Color::BLACK);

        graph.move_graph(5.0, 0.0).expect("move");
        assert!(calls.get() > after_draw);
    }
}
