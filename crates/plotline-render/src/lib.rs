//! # Plotline Render
//!
//! Turns a sequence of numeric samples into a line chart PNG, base64-encoded
//! for inline embedding in HTML.
//!
//! Drawing happens on a [`Canvas`] shared behind a mutex. Every render
//! acquires it through a [`CanvasGuard`], which wipes the surface when it is
//! dropped, so nothing drawn by one call can show up in the next.
//!
//! ```no_run
//! let chart = plotline_render::render(&[1.0, 4.0, 2.0, 12.0, 0.1, 10.0])?;
//! assert_eq!(chart.point_count(), 6);
//! println!("<img src=\"{}\">", chart.data_uri());
//! # Ok::<(), plotline_render::RenderError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod chart;
pub mod error;
pub mod fonts;
pub mod line_chart;
pub mod samples;
pub mod style;
pub mod traits;
pub mod utils;

pub use canvas::*;
pub use chart::*;
pub use error::*;
pub use fonts::*;
pub use line_chart::*;
pub use samples::*;
pub use style::*;
pub use traits::*;
pub use utils::*;

use once_cell::sync::Lazy;

static DEFAULT_RENDERER: Lazy<LineChartRenderer> = Lazy::new(LineChartRenderer::default);

/// The process-wide renderer with the default style and its own canvas.
pub fn default_renderer() -> &'static LineChartRenderer {
    &DEFAULT_RENDERER
}

/// Renders `samples` with the default style.
///
/// Empty input yields an empty chart rather than an error.
pub fn render(samples: &[f64]) -> RenderResult<RenderedChart> {
    DEFAULT_RENDERER.render_values(samples)
}
