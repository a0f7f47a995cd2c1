//! Descriptive Statistics over Nullable Series

use crate::config::StdDevKind;
use serde::{Deserialize, Serialize};

/// Whether an entry is absent or not-a-number
pub fn is_missing(value: Option<f64>) -> bool {
    value.map_or(true, f64::is_nan)
}

/// Present, non-NaN entries in their original order
pub fn valid_values(series: &[Option<f64>]) -> Vec<f64> {
    series
        .iter()
        .copied()
        .filter(|v| !is_missing(*v))
        .flatten()
        .collect()
}

/// Arithmetic mean, accumulated incrementally so large values do not overflow
pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mean = values
        .iter()
        .enumerate()
        .fold(0.0, |m, (k, v)| m + (v - m) / (k + 1) as f64);
    Some(mean)
}

/// Median of a sorted copy; even counts average the two middle values
pub(crate) fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Standard deviation around `mean`
///
/// The sample estimator needs at least two values and reports `0.0` below that.
pub(crate) fn std_dev(values: &[f64], mean: f64, kind: StdDevKind) -> f64 {
    let m2: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    let denominator = match kind {
        StdDevKind::Population => values.len(),
        StdDevKind::Sample => values.len().saturating_sub(1),
    };
    if denominator == 0 {
        return 0.0;
    }
    (m2 / denominator as f64).sqrt()
}

/// Summary statistics for a nullable series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Number of valid entries
    pub count: usize,
    /// Number of missing entries
    pub missing: usize,
    /// Mean value
    pub mean: Option<f64>,
    /// Median value
    pub median: Option<f64>,
    /// Population standard deviation
    pub std_dev: Option<f64>,
    /// Minimum value
    pub min: Option<f64>,
    /// Maximum value
    pub max: Option<f64>,
}

impl SeriesStats {
    /// Compute statistics over the valid entries of a series
    pub fn compute(series: &[Option<f64>]) -> Self {
        let values = valid_values(series);
        let missing = series.len() - values.len();

        let Some(mean) = mean(&values) else {
            return Self {
                missing,
                ..Self::default()
            };
        };

        let min = values.iter().copied().fold(f64::MAX, f64::min);
        let max = values.iter().copied().fold(f64::MIN, f64::max);

        Self {
            count: values.len(),
            missing,
            mean: Some(mean),
            median: median(&values),
            std_dev: Some(std_dev(&values, mean, StdDevKind::Population)),
            min: Some(min),
            max: Some(max),
        }
    }
}
