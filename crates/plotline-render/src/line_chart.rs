//! Line chart renderer.
//!
//! Draws a single series against sample position onto the renderer's
//! [`SharedCanvas`] and encodes the result as PNG. Title and axis captions
//! are always empty; tick labels and the legend caption use the embedded
//! font from [`crate::fonts`].

use crate::canvas::SharedCanvas;
use crate::chart::{encode_png, RenderedChart};
use crate::error::{RenderError, RenderResult};
use crate::samples::SampleSequence;
use crate::fonts::ensure_fonts;
use crate::style::{ChartStyle, FRAME_COLOR, GRID_COLOR, LEGEND_FILL};
use crate::traits::ChartRenderer;
use crate::utils::{calculate_data_ranges, format_scaled_tick, AxisRanges};
use plotline_config::ChartConfig;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{debug, debug_span};

/// Length of the line sample shown in the legend, in pixels.
const LEGEND_SWATCH: i32 = 24;

/// Upper bound for the tick label strip below the plot, in pixels.
const X_LABEL_AREA: u32 = 30;
/// Upper bound for the tick label strip left of the plot, in pixels.
const Y_LABEL_AREA: u32 = 50;

type Root<'b> = DrawingArea<BitMapBackend<'b>, Shift>;
type Chart<'a, 'b> = ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Renders a sample sequence as a single-series line chart.
#[derive(Debug, Clone)]
pub struct LineChartRenderer {
    style: ChartStyle,
    canvas: SharedCanvas,
}

impl LineChartRenderer {
    /// Creates a renderer with its own canvas sized after `style`.
    pub fn new(style: ChartStyle) -> Self {
        let canvas = SharedCanvas::new(style.width, style.height);
        Self { style, canvas }
    }

    /// Creates a renderer drawing on an existing, possibly shared, canvas.
    pub const fn with_canvas(style: ChartStyle, canvas: SharedCanvas) -> Self {
        Self { style, canvas }
    }

    /// Creates a renderer from the chart section of the configuration.
    pub fn from_config(config: &ChartConfig) -> RenderResult<Self> {
        Ok(Self::new(ChartStyle::from_config(config)?))
    }

    /// The canvas this renderer draws on.
    pub const fn canvas(&self) -> &SharedCanvas {
        &self.canvas
    }

    fn draw(&self, root: &Root<'_>, samples: &SampleSequence) -> RenderResult<()> {
        root.fill(&self.style.background).map_err(RenderError::draw)?;

        let ranges = calculate_data_ranges(samples);
        let (x_label_area, y_label_area) = self.label_areas();

        let mut chart = ChartBuilder::on(root)
            .margin(self.style.margin)
            .x_label_area_size(x_label_area)
            .y_label_area_size(y_label_area)
            .build_cartesian_2d(ranges.x.clone(), ranges.y.clone())
            .map_err(RenderError::draw)?;

        Self::draw_mesh(&mut chart, &ranges)?;

        let line_style = self.style.line_color.stroke_width(self.style.line_width);
        chart
            .draw_series(LineSeries::new(
                samples.points().map(|(x, y)| (x, ranges.to_plotted(y))),
                line_style,
            ))
            .map_err(RenderError::draw)?
            .label(self.style.series_label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_SWATCH, y)], line_style));

        if self.style.show_legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(LEGEND_FILL.filled())
                .border_style(FRAME_COLOR)
                .draw()
                .map_err(RenderError::draw)?;
        }

        Ok(())
    }

    /// Sizes of the tick label strips below and left of the plot, never
    /// more than a quarter of the space inside the margins.
    fn label_areas(&self) -> (u32, u32) {
        let inner = |extent: u32| extent.saturating_sub(self.style.margin.saturating_mul(2)) / 4;
        (
            X_LABEL_AREA.min(inner(self.style.height)),
            Y_LABEL_AREA.min(inner(self.style.width)),
        )
    }

    /// Grid, tick labels and a closed frame around the plot area.
    fn draw_mesh(chart: &mut Chart<'_, '_>, ranges: &AxisRanges) -> RenderResult<()> {
        let y_scale = ranges.y_scale;
        let scaled_label = move |plotted: &f64| format_scaled_tick(plotted * y_scale);

        {
            let mut mesh = chart.configure_mesh();
            mesh.bold_line_style(GRID_COLOR)
                .light_line_style(TRANSPARENT)
                .axis_style(FRAME_COLOR);
            if ranges.is_scaled() {
                mesh.y_label_formatter(&scaled_label);
            }
            mesh.draw().map_err(RenderError::draw)?;
        }

        chart
            .plotting_area()
            .draw(&Rectangle::new(
                [(ranges.x.start, ranges.y.start), (ranges.x.end, ranges.y.end)],
                FRAME_COLOR.stroke_width(1),
            ))
            .map_err(RenderError::draw)?;
        Ok(())
    }
}

impl Default for LineChartRenderer {
    fn default() -> Self {
        Self::new(ChartStyle::default())
    }
}

impl ChartRenderer for LineChartRenderer {
    fn render(&self, samples: &SampleSequence) -> RenderResult<RenderedChart> {
        let _span = debug_span!("render_line_chart", points = samples.len()).entered();
        ensure_fonts()?;

        let mut canvas = self.canvas.acquire();
        let size = canvas.size();
        if size != self.style.size() {
            return Err(RenderError::CanvasSize {
                expected: self.style.size(),
                actual: size,
            });
        }

        {
            let root = BitMapBackend::with_buffer(canvas.pixels_mut(), size).into_drawing_area();
            self.draw(&root, samples)?;
            root.present().map_err(RenderError::draw)?;
        }
        canvas.record_series();

        let png = encode_png(canvas.pixels(), size.0, size.1)?;
        debug!(bytes = png.len(), "chart encoded");

        Ok(RenderedChart::from_png(png, size, samples.len()))
    }

    fn style(&self) -> &ChartStyle {
        &self.style
    }

    fn name(&self) -> &'static str {
        "line_chart"
    }

    fn description(&self) -> &'static str {
        "Single line series plotted against sample position"
    }
}
