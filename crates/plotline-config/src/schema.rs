//! Configuration schema definitions using serde.

use plotline_common::{LogFormat, LoggingConfig, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Plotline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Chart rendering configuration.
    pub chart: ChartConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Figure width in pixels.
    pub width: u32,
    /// Figure height in pixels.
    pub height: u32,
    /// Background colour, `#rrggbb`.
    pub background: String,
    /// Series line colour, `#rrggbb`.
    pub line_color: String,
    /// Series stroke width in pixels.
    pub line_width: u32,
    /// Text shown next to the legend swatch.
    pub series_label: String,
    /// Whether to draw the legend.
    pub show_legend: bool,
    /// Outer margin around the plot area in pixels.
    pub margin: u32,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_address: String,
    /// Samples plotted on the index page.
    pub default_samples: Vec<f64>,
}

/// Logging configuration as it appears in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level filter directive.
    pub level: String,
    /// One of `pretty`, `compact`, `json`.
    pub format: String,
    /// Optional log file; stdout when absent.
    pub file_path: Option<PathBuf>,
    /// Whether to log span open/close events.
    pub include_spans: bool,
}

impl LoggingSettings {
    /// Converts the file representation into the logging bootstrap config.
    pub fn to_logging_config(&self) -> Result<LoggingConfig> {
        let format: LogFormat = self.format.parse()?;
        Ok(LoggingConfig {
            level: self.level.clone(),
            format,
            file_path: self.file_path.clone(),
            include_spans: self.include_spans,
            ..LoggingConfig::default()
        })
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        crate::validator::ConfigValidator::validate(self)
    }
}
