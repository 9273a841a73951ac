//! Axis range computation.

use crate::samples::SampleSequence;
use std::ops::Range;

/// Fraction of the data span added on each side of an axis.
pub const AXIS_PADDING: f64 = 0.05;

/// Largest sample magnitude plotted as is. Beyond it values are divided by
/// the series magnitude so the padded range stays finite.
pub const MAX_UNSCALED_MAGNITUDE: f64 = 1.0e300;

/// Plotting ranges of both axes.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisRanges {
    /// Horizontal range, sample positions.
    pub x: Range<f64>,
    /// Vertical range, in plotted units (sample values divided by `y_scale`).
    pub y: Range<f64>,
    /// Divisor applied to sample values before plotting, `1.0` unless the
    /// series exceeds [`MAX_UNSCALED_MAGNITUDE`].
    pub y_scale: f64,
}

impl AxisRanges {
    /// Whether sample values are rescaled before plotting.
    pub fn is_scaled(&self) -> bool {
        self.y_scale > 1.0
    }

    /// Maps a sample value onto the vertical axis.
    pub fn to_plotted(&self, value: f64) -> f64 {
        value / self.y_scale
    }

    /// Maps a vertical axis position back to a sample value.
    pub fn to_sample(&self, plotted: f64) -> f64 {
        plotted * self.y_scale
    }
}

fn padded(lo: f64, hi: f64) -> Range<f64> {
    let magnitude = lo.abs().max(hi.abs()).max(1.0);
    // Halved before subtracting so opposite-signed extremes cannot overflow.
    let half_span = hi / 2.0 - lo / 2.0;

    if half_span <= f64::EPSILON * magnitude {
        let pad = (magnitude * AXIS_PADDING).max(0.5);
        return (lo - pad)..(hi + pad);
    }
    let pad = half_span * (2.0 * AXIS_PADDING);
    (lo - pad)..(hi + pad)
}

/// Calculates the plotting ranges for a sample sequence.
///
/// x covers `0..=len-1` (at least `0..=1`), y covers the sample values.
/// Both get [`AXIS_PADDING`] on each side; a flat or empty series is widened
/// relative to its magnitude so neither axis has a zero span.
#[allow(clippy::cast_precision_loss)]
pub fn calculate_data_ranges(samples: &SampleSequence) -> AxisRanges {
    let last_index = samples.len().saturating_sub(1).max(1) as f64;
    let (y_min, y_max) = samples.min_max().unwrap_or((0.0, 1.0));

    let magnitude = y_min.abs().max(y_max.abs());
    let y_scale = if magnitude > MAX_UNSCALED_MAGNITUDE { magnitude } else { 1.0 };

    AxisRanges {
        x: padded(0.0, last_index),
        y: padded(y_min / y_scale, y_max / y_scale),
        y_scale,
    }
}

/// Tick label for a rescaled vertical axis.
pub fn format_scaled_tick(value: f64) -> String {
    format!("{value:.2e}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotline_common::test_utils::assert_approx_eq;

    fn seq(values: &[f64]) -> SampleSequence {
        SampleSequence::try_from(values).unwrap()
    }

    fn span(range: &Range<f64>) -> f64 {
        range.end - range.start
    }

    #[test]
    fn test_empty_samples_use_unit_range() {
        let ranges = calculate_data_ranges(&SampleSequence::empty());
        assert_approx_eq(ranges.x.start, -0.05, 1e-12);
        assert_approx_eq(ranges.x.end, 1.05, 1e-12);
        assert_approx_eq(ranges.y.start, -0.05, 1e-12);
        assert_approx_eq(ranges.y.end, 1.05, 1e-12);
        assert!(!ranges.is_scaled());
    }

    #[test]
    fn test_ranges_are_padded() {
        let ranges = calculate_data_ranges(&seq(&[1.0, 4.0, 2.0, 12.0, 0.1, 10.0]));
        assert!(ranges.x.start < 0.0);
        assert!(ranges.x.end > 5.0);
        assert!(ranges.y.start < 0.1);
        assert!(ranges.y.end > 12.0);
        assert_approx_eq(ranges.x.end, 5.25, 1e-12);
        assert_approx_eq(ranges.y.end, 12.0 + 11.9 * AXIS_PADDING, 1e-12);
    }

    #[test]
    fn test_flat_series_gets_nonzero_span() {
        let ranges = calculate_data_ranges(&seq(&[3.0, 3.0, 3.0]));
        assert_approx_eq(ranges.y.start, 2.5, 1e-12);
        assert_approx_eq(ranges.y.end, 3.5, 1e-12);
    }

    #[test]
    fn test_single_point() {
        let ranges = calculate_data_ranges(&seq(&[-7.0]));
        assert!(ranges.x.end > ranges.x.start);
        assert!(ranges.y.start < -7.0 && ranges.y.end > -7.0);
    }

    #[test]
    fn test_extreme_opposite_values_keep_finite_span() {
        let ranges = calculate_data_ranges(&seq(&[1e308, -1e308, 0.0]));

        assert!(ranges.is_scaled());
        assert!(ranges.y.start.is_finite() && ranges.y.end.is_finite());
        assert!(span(&ranges.y).is_finite() && span(&ranges.y) > 0.0);
        assert!(ranges.y.start < ranges.to_plotted(-1e308));
        assert!(ranges.y.end > ranges.to_plotted(1e308));
        assert_approx_eq(ranges.to_sample(ranges.to_plotted(1e308)) / 1e308, 1.0, 1e-12);
    }

    #[test]
    fn test_large_flat_series_is_centred() {
        let ranges = calculate_data_ranges(&seq(&[1e20; 3]));

        assert!(!ranges.is_scaled());
        assert!(span(&ranges.y) > 0.0);
        assert!(ranges.y.start < 1e20 && ranges.y.end > 1e20);
        let middle = ranges.y.start / 2.0 + ranges.y.end / 2.0;
        assert_approx_eq(middle / 1e20, 1.0, 1e-9);
        assert_approx_eq(span(&ranges.y) / 1e20, 2.0 * AXIS_PADDING, 1e-9);
    }

    #[test]
    fn test_values_below_scaling_threshold_are_plotted_as_is() {
        let ranges = calculate_data_ranges(&seq(&[-1e200, 1e200]));
        assert!(!ranges.is_scaled());
        assert!(span(&ranges.y).is_finite());
        assert_eq!(ranges.to_plotted(1e200), 1e200);
    }

    #[test]
    fn test_format_scaled_tick() {
        assert_eq!(format_scaled_tick(1.5e308), "1.50e308");
        assert_eq!(format_scaled_tick(0.0), "0.00e0");
    }
}
