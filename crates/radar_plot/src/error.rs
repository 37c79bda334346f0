//! Error types for the radial plot renderer.

use thiserror::Error;

/// Errors that can occur while building or saving a radial plot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// A polygon was drawn before `draw_axis`.
    #[error("Axes not initialized: call draw_axis before drawing polygons")]
    AxesNotInitialized,

    /// `draw_axis` was called a second time.
    #[error("Axes already initialized with {0} axes")]
    AxesAlreadyInitialized(usize),

    /// Axis definition is unusable.
    #[error("Invalid axes: {0}")]
    InvalidAxes(String),

    /// Number of values does not match the number of axes.
    #[error("Value count mismatch: expected {expected}, got {got}")]
    ValueCountMismatch {
        /// Expected number of values
        expected: usize,
        /// Number of values supplied
        got: usize,
    },

    /// Axis index outside the drawn axes.
    #[error("Axis index {index} out of range for {count} axes")]
    AxisOutOfRange {
        /// Requested axis
        index: usize,
        /// Number of axes
        count: usize,
    },

    /// A polygon value cannot be placed on its axis.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Opacity outside `[0, 1]`.
    #[error("Invalid alpha {0}: must be in [0, 1]")]
    InvalidAlpha(f64),

    /// Polygon with no vertices.
    #[error("Polygon has no vertices")]
    EmptyPolygon,

    /// Style or canvas configuration is unusable.
    #[error("Invalid style: {0}")]
    InvalidStyle(String),

    /// File extension has no backend.
    #[error("Unsupported output format '{0}'. Supported: png, svg (svg for vector output)")]
    UnsupportedFormat(String),

    /// Backend failed while drawing or writing the file.
    #[error("Failed to render {path}: {message}")]
    Render {
        /// Output path
        path: String,
        /// Backend error message
        message: String,
    },
}
