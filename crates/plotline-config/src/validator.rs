//! Runtime validation of a loaded configuration.

use crate::schema::{ChartConfig, Config, LoggingSettings, ServerConfig};
use plotline_common::{LogFormat, PlotlineError, Result};
use std::net::SocketAddr;

/// Smallest accepted figure edge in pixels.
pub const MIN_FIGURE_EDGE: u32 = 16;
/// Largest accepted figure edge in pixels.
pub const MAX_FIGURE_EDGE: u32 = 8192;
/// Largest accepted stroke width in pixels.
pub const MAX_LINE_WIDTH: u32 = 20;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        Self::validate_chart(&config.chart)?;
        Self::validate_server(&config.server)?;
        Self::validate_logging(&config.logging)
    }

    fn validate_chart(chart: &ChartConfig) -> Result<()> {
        for (field, value) in [("chart.width", chart.width), ("chart.height", chart.height)] {
            if !(MIN_FIGURE_EDGE..=MAX_FIGURE_EDGE).contains(&value) {
                return Err(PlotlineError::validation_field(
                    format!("{value} is outside {MIN_FIGURE_EDGE}..={MAX_FIGURE_EDGE} pixels"),
                    field,
                ));
            }
        }

        if 2 * chart.margin >= chart.width.min(chart.height) {
            return Err(PlotlineError::validation_field(
                "margin leaves no room for the plot area",
                "chart.margin",
            ));
        }

        if chart.line_width == 0 || chart.line_width > MAX_LINE_WIDTH {
            return Err(PlotlineError::validation_field(
                format!("line width must be within 1..={MAX_LINE_WIDTH}"),
                "chart.line_width",
            ));
        }

        for (field, value) in [
            ("chart.background", &chart.background),
            ("chart.line_color", &chart.line_color),
        ] {
            if !is_hex_color(value) {
                return Err(PlotlineError::validation_field(
                    format!("'{value}' is not a #rrggbb colour"),
                    field,
                ));
            }
        }

        Ok(())
    }

    fn validate_server(server: &ServerConfig) -> Result<()> {
        server.bind_address.parse::<SocketAddr>().map_err(|_| {
            PlotlineError::validation_field(
                format!("'{}' is not a socket address", server.bind_address),
                "server.bind_address",
            )
        })?;

        if let Some(index) = server.default_samples.iter().position(|v| !v.is_finite()) {
            return Err(PlotlineError::validation_field(
                format!("sample at index {index} is not finite"),
                "server.default_samples",
            ));
        }

        Ok(())
    }

    fn validate_logging(logging: &LoggingSettings) -> Result<()> {
        if logging.level.trim().is_empty() {
            return Err(PlotlineError::validation_field(
                "log level cannot be empty",
                "logging.level",
            ));
        }
        logging.format.parse::<LogFormat>()?;
        Ok(())
    }
}

/// Returns true for `#rrggbb` strings.
pub fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
