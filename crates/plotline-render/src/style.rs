//! Chart styling and colour parsing.

use crate::error::{RenderError, RenderResult};
use plotline_config::ChartConfig;
use plotters::style::RGBColor;

/// Grid line colour.
pub const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);
/// Plot frame and legend border colour.
pub const FRAME_COLOR: RGBColor = RGBColor(0, 0, 0);
/// Legend box fill.
pub const LEGEND_FILL: RGBColor = RGBColor(255, 255, 255);

/// Everything the line chart renderer needs to know about appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
    /// Figure background.
    pub background: RGBColor,
    /// Series line colour.
    pub line_color: RGBColor,
    /// Series stroke width in pixels.
    pub line_width: u32,
    /// Legend caption.
    pub series_label: String,
    /// Whether to draw the legend.
    pub show_legend: bool,
    /// Outer margin around the plot area in pixels.
    pub margin: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let config = ChartConfig::default();
        Self {
            width: config.width,
            height: config.height,
            background: RGBColor(255, 255, 255),
            line_color: RGBColor(0, 0, 255),
            line_width: config.line_width,
            series_label: config.series_label,
            show_legend: config.show_legend,
            margin: config.margin,
        }
    }
}

impl ChartStyle {
    /// Builds a style from the chart section of the configuration.
    pub fn from_config(config: &ChartConfig) -> RenderResult<Self> {
        let color = |field: &str, value: &str| {
            parse_hex_color(value).ok_or_else(|| {
                RenderError::InvalidStyle(format!("{field}: '{value}' is not a #rrggbb colour"))
            })
        };

        if config.width == 0 || config.height == 0 {
            return Err(RenderError::InvalidStyle(format!(
                "figure size {}x{} has no area",
                config.width, config.height
            )));
        }

        Ok(Self {
            width: config.width,
            height: config.height,
            background: color("background", &config.background)?,
            line_color: color("line_color", &config.line_color)?,
            line_width: config.line_width.max(1),
            series_label: config.series_label.clone(),
            show_legend: config.show_legend,
            margin: config.margin,
        })
    }

    /// `(width, height)` of the figure.
    pub const fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Parses a `#rrggbb` colour string.
pub fn parse_hex_color(color_str: &str) -> Option<RGBColor> {
    let hex = color_str.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
