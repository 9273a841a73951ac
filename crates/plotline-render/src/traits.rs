//! Chart renderer trait.

use crate::chart::RenderedChart;
use crate::error::RenderResult;
use crate::samples::SampleSequence;
use crate::style::ChartStyle;

/// Trait for renderers that turn samples into an encoded chart.
///
/// Implementations must be safe to call from several threads at once.
pub trait ChartRenderer: Send + Sync {
    /// Renders the samples synchronously.
    fn render(&self, samples: &SampleSequence) -> RenderResult<RenderedChart>;

    /// The style charts are drawn with.
    fn style(&self) -> &ChartStyle;

    /// Gets the name of this chart type.
    fn name(&self) -> &'static str;

    /// Gets the description of this chart type.
    fn description(&self) -> &'static str;

    /// Validates raw values, then renders them.
    fn render_values(&self, values: &[f64]) -> RenderResult<RenderedChart> {
        let samples = SampleSequence::try_from(values)?;
        self.render(&samples)
    }
}
