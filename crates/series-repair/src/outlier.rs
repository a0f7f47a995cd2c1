//! Outlier Reporting

use crate::config::{RepairConfig, StdDevKind};
use crate::statistics::{self, is_missing, valid_values};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A value far from the series mean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    /// Position in the input series
    pub index: usize,
    /// The flagged value
    pub value: f64,
}

/// Flags values more than `outlier_multiple` standard deviations from the mean
///
/// Reporting only; nothing is removed or replaced.
#[derive(Debug, Clone, Default)]
pub struct OutlierAnalyzer {
    config: RepairConfig,
}

impl OutlierAnalyzer {
    /// Create a new analyzer with given config
    pub fn new(config: RepairConfig) -> Self {
        Self { config }
    }

    /// Override the standard deviation estimator
    pub fn with_std_dev(mut self, kind: StdDevKind) -> Self {
        self.config.std_dev = kind;
        self
    }

    /// Outliers among the valid entries, in input order
    pub fn detect(&self, series: &[Option<f64>]) -> Vec<Outlier> {
        let values = valid_values(series);
        let Some(mean) = statistics::mean(&values) else {
            return Vec::new();
        };

        let sigma = statistics::std_dev(&values, mean, self.config.std_dev);
        if sigma == 0.0 {
            debug!(count = values.len(), "Zero spread; no outliers");
            return Vec::new();
        }

        let threshold = self.config.outlier_multiple * sigma;
        let outliers: Vec<Outlier> = series
            .iter()
            .enumerate()
            .filter(|(_, v)| !is_missing(**v))
            .filter_map(|(index, v)| v.map(|value| Outlier { index, value }))
            .filter(|o| (o.value - mean).abs() > threshold)
            .collect();

        debug!(mean, sigma, threshold, found = outliers.len(), "Outlier scan complete");
        outliers
    }

    /// Outliers in a series without absent entries; `NaN` is still skipped
    pub fn detect_values(&self, values: &[f64]) -> Vec<Outlier> {
        let series: Vec<Option<f64>> = values.iter().copied().map(Some).collect();
        self.detect(&series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spiked_series() -> Vec<f64> {
        let mut values = vec![10.0; 19];
        values.insert(7, 100.0);
        values
    }

    #[test]
    fn test_zero_variance_has_no_outliers() {
        let analyzer = OutlierAnalyzer::default();
        assert!(analyzer.detect_values(&[10.0, 10.0, 10.0, 10.0]).is_empty());
        assert!(analyzer
            .clone()
            .with_std_dev(StdDevKind::Sample)
            .detect_values(&[10.0, 10.0, 10.0, 10.0])
            .is_empty());
    }

    #[test]
    fn test_detects_spike() {
        let outliers = OutlierAnalyzer::default().detect_values(&spiked_series());
        assert_eq!(outliers, vec![Outlier { index: 7, value: 100.0 }]);
    }

    #[test]
    fn test_sample_estimator_detects_spike() {
        let analyzer = OutlierAnalyzer::default().with_std_dev(StdDevKind::Sample);
        let outliers = analyzer.detect_values(&spiked_series());
        assert_eq!(outliers.len(), 1);
        assert_eq!(outliers[0].index, 7);
    }

    #[test]
    fn test_small_series_cannot_exceed_three_sigma() {
        // With n = 4 the largest possible z-score is 1.5
        let outliers = OutlierAnalyzer::default().detect_values(&[1.0, 1.0, 1.0, 1000.0]);
        assert!(outliers.is_empty());
    }

    #[test]
    fn test_lower_multiple_flags_more() {
        let analyzer = OutlierAnalyzer::new(RepairConfig {
            outlier_multiple: 1.0,
            ..Default::default()
        });
        let outliers = analyzer.detect_values(&[1.0, 1.0, 1.0, 1000.0]);
        assert_eq!(outliers, vec![Outlier { index: 3, value: 1000.0 }]);
    }

    #[test]
    fn test_missing_entries_ignored_but_indices_kept() {
        let mut series: Vec<Option<f64>> = spiked_series().into_iter().map(Some).collect();
        series.insert(0, None);
        series.insert(3, Some(f64::NAN));

        let outliers = OutlierAnalyzer::default().detect(&series);
        assert_eq!(outliers, vec![Outlier { index: 9, value: 100.0 }]);
    }

    #[test]
    fn test_empty_and_single() {
        let analyzer = OutlierAnalyzer::default();
        assert!(analyzer.detect(&[]).is_empty());
        assert!(analyzer.detect(&[None]).is_empty());
        assert!(analyzer.detect_values(&[42.0]).is_empty());
    }
}
