//! Plotted function records.
//!
//! [`PlottedFunction`] is the UI-side record with a stable id and an enabled
//! flag. The engine only ever holds the [`GraphFunction`] projection of the
//! enabled ones.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;
use crate::expr::Evaluator;
use crate::geom::Point;
use crate::graph::Graph;
use crate::render::{Color, Surface};
use crate::sampler::SampleKey;

static FUNCTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a plotted function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FunctionId(u64);

impl FunctionId {
    fn next() -> Self {
        Self(FUNCTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Numeric value of the id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FunctionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "f{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SampleCache {
    pub(crate) key: SampleKey,
    pub(crate) points: Vec<Point>,
}

/// A function held by the engine.
#[derive(Debug, Clone)]
pub struct GraphFunction {
    expression: String,
    color: Color,
    interval: String,
    pub(crate) samples: Option<SampleCache>,
}

impl GraphFunction {
    /// Create a function projection.
    pub fn new(expression: impl Into<String>, color: Color, interval: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            color,
            interval: interval.into(),
            samples: None,
        }
    }

    /// Access the expression.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Access the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Access the interval string.
    pub fn interval(&self) -> &str {
        &self.interval
    }

    /// Points from the most recent sampling pass, if any.
    pub fn points(&self) -> Option<&[Point]> {
        self.samples.as_ref().map(|cache| cache.points.as_slice())
    }

    /// Whether two projections describe the same curve, ignoring color.
    pub(crate) fn same_curve(&self, other: &GraphFunction) -> bool {
        self.expression == other.expression && self.interval == other.interval
    }
}

/// A user-declared function.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedFunction {
    id: FunctionId,
    /// Expression of `x`.
    pub expression: String,
    /// Stroke color.
    pub color: Color,
    /// Retained but hidden when false.
    pub enabled: bool,
    /// Domain restriction, e.g. `R` or `[0; 1)`.
    pub interval: String,
}

impl PlottedFunction {
    /// Access the function identifier.
    pub fn id(&self) -> FunctionId {
        self.id
    }

    /// Project into the engine's representation.
    pub fn to_graph_function(&self) -> GraphFunction {
        GraphFunction::new(self.expression.clone(), self.color, self.interval.clone())
    }
}

/// Ordered list of user functions.
#[derive(Debug, Clone, Default)]
pub struct FunctionList {
    functions: Vec<PlottedFunction>,
}

impl FunctionList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an enabled function over all reals.
    pub fn add(&mut self, expression: impl Into<String>, color: Color) -> FunctionId {
        self.add_with_interval(expression, color, "R")
    }

    /// Add an enabled function restricted to an interval.
    pub fn add_with_interval(
        &mut self,
        expression: impl Into<String>,
        color: Color,
        interval: impl Into<String>,
    ) -> FunctionId {
        let id = FunctionId::next();
        self.functions.push(PlottedFunction {
            id,
            expression: expression.into(),
            color,
            enabled: true,
            interval: interval.into(),
        });
        id
    }

    /// Look up a function.
    pub fn get(&self, id: FunctionId) -> Option<&PlottedFunction> {
        self.functions.iter().find(|function| function.id == id)
    }

    /// Look up a function for editing in place.
    pub fn get_mut(&mut self, id: FunctionId) -> Option<&mut PlottedFunction> {
        self.functions.iter_mut().find(|function| function.id == id)
    }

    /// Flip the enabled flag. Returns the new state.
    pub fn toggle(&mut self, id: FunctionId) -> Option<bool> {
        let function = self.get_mut(id)?;
        function.enabled = !function.enabled;
        Some(function.enabled)
    }

    /// Remove a function.
    pub fn remove(&mut self, id: FunctionId) -> Option<PlottedFunction> {
        let index = self.functions.iter().position(|function| function.id == id)?;
        Some(self.functions.remove(index))
    }

    /// Iterate over all functions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PlottedFunction> {
        self.functions.iter()
    }

    /// Number of functions, enabled or not.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Engine projections of the enabled functions.
    pub fn projections(&self) -> impl Iterator<Item = GraphFunction> + '_ {
        self.functions
            .iter()
            .filter(|function| function.enabled)
            .map(PlottedFunction::to_graph_function)
    }

    /// Push the enabled functions into a graph and redraw it.
    pub fn sync<S: Surface, E: Evaluator>(&self, graph: &mut Graph<S, E>) -> Result<()> {
        graph.set_functions(self.projections())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_and_are_not_reused() {
        let mut list = FunctionList::new();
        let first = list.add("x", Color::BLACK);
        let second = list.add("x^2", Color::BLACK);
        assert!(second > first);
        list.remove(second);
        let third = list.add("x^3", Color::BLACK);
        assert!(third > second);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn disabled_functions_are_not_projected() {
        let mut list = FunctionList::new();
        let a = list.add("x", Color::BLACK);
        list.add_with_interval("sqrt(x)", Color::WHITE, "W");
        assert_eq!(list.toggle(a), Some(false));
        let projected: Vec<GraphFunction> = list.projections().collect();
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].expression(), "sqrt(x)");
        assert_eq!(projected[0].interval(), "W");
    }

    #[test]
    fn edits_in_place() {
        let mut list = FunctionList::new();
        let id = list.add("x", Color::BLACK);
        if let Some(function) = list.get_mut(id) {
            function.expression = "2x".into();
            function.interval = "[0;1]".into();
        }
        let function = list.get(id).expect("present");
        assert_eq!(function.expression, "2x");
        assert_eq!(function.id(), id);
        assert!(list.remove(id).is_some());
        assert!(list.get(id).is_none());
        assert!(list.is_empty());
    }
}
