//! Errors raised while drawing or encoding a chart.

use plotline_common::PlotlineError;
use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Rendering failure.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A sample is NaN or infinite.
    #[error("sample at index {index} is not finite ({value})")]
    NonFiniteSample {
        /// Position of the offending sample.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// The plotting backend reported an error.
    #[error("drawing failed: {0}")]
    Draw(String),

    /// The pixel buffer could not be encoded as PNG.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// The canvas does not have the dimensions the style asks for.
    #[error("canvas is {actual:?} but the chart needs {expected:?}")]
    CanvasSize {
        /// Size required by the chart style.
        expected: (u32, u32),
        /// Size of the canvas that was handed in.
        actual: (u32, u32),
    },

    /// The embedded label font could not be registered with the backend.
    #[error("font '{0}' could not be loaded")]
    Font(&'static str),

    /// A style value could not be interpreted.
    #[error("invalid chart style: {0}")]
    InvalidStyle(String),
}

impl RenderError {
    /// Wraps any backend error, keeping only its message.
    pub fn draw<E: std::fmt::Display>(err: E) -> Self {
        Self::Draw(err.to_string())
    }
}

impl From<RenderError> for PlotlineError {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::NonFiniteSample { .. } => Self::validation_field(err.to_string(), "samples"),
            RenderError::Encode(_) => Self::encoding_with_source("chart encoding failed", err),
            other => Self::render_with_source("chart rendering failed", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_maps_to_validation() {
        let err = RenderError::NonFiniteSample {
            index: 3,
            value: f64::NAN,
        };
        assert_eq!(err.to_string(), "sample at index 3 is not finite (NaN)");

        let converted: PlotlineError = err.into();
        assert!(converted.is_client_error());
    }

    #[test]
    fn test_draw_error_maps_to_render() {
        let converted: PlotlineError = RenderError::draw("backend closed").into();
        assert!(matches!(converted, PlotlineError::Render { .. }));
        assert!(!converted.is_client_error());
    }
}
