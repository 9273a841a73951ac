//! Default values for every configuration section.

use crate::schema::*;

/// Default figure width in pixels.
pub const DEFAULT_WIDTH: u32 = 640;
/// Default figure height in pixels.
pub const DEFAULT_HEIGHT: u32 = 480;
/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";

/// Samples plotted on the index page when none are configured.
pub fn default_samples() -> Vec<f64> {
    vec![1.0, 4.0, 2.0, 12.0, 0.1, 10.0]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chart: ChartConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: "#ffffff".to_string(),
            line_color: "#0000ff".to_string(),
            line_width: 1,
            series_label: "something".to_string(),
            show_legend: true,
            margin: 10,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            default_samples: default_samples(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file_path: None,
            include_spans: false,
        }
    }
}
