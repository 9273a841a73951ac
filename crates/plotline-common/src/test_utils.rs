//! Test utilities and shared test helpers for Plotline.
//!
//! This module provides common testing utilities, fixtures, and helper functions
//! that can be used across all crates in the workspace for unit and integration testing.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Sample sequences used across render and server tests.
pub mod sample_fixtures {
    /// The series shown on the index page.
    pub fn reference_samples() -> Vec<f64> {
        vec![1.0, 4.0, 2.0, 12.0, 0.1, 10.0]
    }

    /// A series with large alternating spikes, easy to tell apart from others.
    pub fn distinctive_samples() -> Vec<f64> {
        (0..40)
            .map(|i| if i % 2 == 0 { -500.0 } else { 500.0 + f64::from(i) })
            .collect()
    }

    /// A monotonically increasing series of `count` samples.
    pub fn ramp(count: usize) -> Vec<f64> {
        (0..count).map(|i| i as f64 * 1.5).collect()
    }

    /// A flat series, every sample equal to `value`.
    pub fn constant(count: usize, value: f64) -> Vec<f64> {
        vec![value; count]
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
chart:
  width: 320
  height: 240
"#
    }

    /// Create a full test configuration as YAML string.
    pub fn full_config_yaml() -> &'static str {
        concat!(
            "chart:\n",
            "  width: 800\n",
            "  height: 600\n",
            "  background: \"#ffffff\"\n",
            "  line_color: \"#ff7f0e\"\n",
            "  line_width: 2\n",
            "  series_label: \"requests\"\n",
            "  show_legend: true\n",
            "  margin: 12\n",
            "\n",
            "server:\n",
            "  bind_address: \"127.0.0.1:8080\"\n",
            "  default_samples: [3.0, 1.0, 4.0, 1.0, 5.0]\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: \"json\"\n",
            "  include_spans: true\n",
        )
    }

    /// Create a full test configuration as TOML string.
    pub fn full_config_toml() -> &'static str {
        r##"
[chart]
width = 1024
height = 768
line_color = "#2ca02c"

[server]
bind_address = "0.0.0.0:9000"
default_samples = [2.0, 7.0, 1.0]

[logging]
level = "warn"
format = "compact"
"##
    }
}

/// Property-based testing utilities using proptest.
#[cfg(any(test, feature = "proptest"))]
pub mod property_testing {
    use proptest::prelude::*;

    /// Strategy for generating finite sample sequences of up to `max_len` values.
    pub fn finite_samples_strategy(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        prop::collection::vec(-1.0e6f64..1.0e6f64, 0..=max_len)
    }
}
