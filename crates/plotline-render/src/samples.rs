//! The ordered numeric input of a chart.

use crate::error::{RenderError, RenderResult};

/// An ordered list of finite samples. The x value of each sample is its
/// zero-based position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSequence {
    values: Vec<f64>,
}

impl SampleSequence {
    /// Builds a sequence, rejecting NaN and infinite values.
    pub fn new(values: Vec<f64>) -> RenderResult<Self> {
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(RenderError::NonFiniteSample { index, value });
        }
        Ok(Self { values })
    }

    /// A sequence without samples.
    pub const fn empty() -> Self {
        Self { values: Vec::new() }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The raw values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over the values.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.values.iter()
    }

    /// `(index, value)` pairs in plotting coordinates.
    #[allow(clippy::cast_precision_loss)]
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().enumerate().map(|(i, &v)| (i as f64, v))
    }

    /// Smallest and largest value, `None` when empty.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl TryFrom<Vec<f64>> for SampleSequence {
    type Error = RenderError;

    fn try_from(values: Vec<f64>) -> RenderResult<Self> {
        Self::new(values)
    }
}

impl TryFrom<&[f64]> for SampleSequence {
    type Error = RenderError;

    fn try_from(values: &[f64]) -> RenderResult<Self> {
        Self::new(values.to_vec())
    }
}

impl<'a> IntoIterator for &'a SampleSequence {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
