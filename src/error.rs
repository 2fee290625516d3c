//! Error types for graph operations.

use thiserror::Error;

/// Result type alias for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors reported by [`Graph`](crate::graph::Graph) operations.
///
/// Every error leaves the engine state untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    /// The center has not been placed yet; call `initialize` first.
    #[error("graph is not initialized")]
    NotInitialized,

    /// The surface has no drawable area.
    #[error("surface has no drawable area ({width}x{height})")]
    EmptySurface { width: f64, height: f64 },

    /// The requested square size lies outside the zoom limits.
    #[error("square size {requested} outside zoom range [{min}, {max}]")]
    ZoomOutOfRange { requested: f64, min: f64, max: f64 },

    /// A pan target or delta that is not a finite number.
    #[error("invalid position ({x}, {y})")]
    InvalidPosition { x: f64, y: f64 },

    /// Sampling detail outside `1..=MAX_POINTS_PER_SQUARE`.
    #[error("invalid sampling detail: {0}")]
    InvalidDetail(u32),
}
