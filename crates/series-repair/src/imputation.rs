//! Missing Value Imputation

use crate::config::RepairConfig;
use crate::statistics::{self, is_missing, valid_values};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// How missing entries are repaired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputationStrategy {
    /// Fill with the configured constant
    FillDefault,
    /// Fill with the mean of valid entries
    FillMean,
    /// Fill with the median of valid entries
    FillMedian,
    /// Drop missing entries
    Remove,
}

/// Computes a fill value from the valid entries
type FillFn = fn(&[f64], &RepairConfig) -> f64;

fn fill_default(_valid: &[f64], config: &RepairConfig) -> f64 {
    config.default_fill
}

fn fill_mean(valid: &[f64], config: &RepairConfig) -> f64 {
    statistics::mean(valid).unwrap_or(config.default_fill)
}

fn fill_median(valid: &[f64], config: &RepairConfig) -> f64 {
    statistics::median(valid).unwrap_or(config.default_fill)
}

impl ImputationStrategy {
    /// Every strategy
    pub const ALL: [ImputationStrategy; 4] = [
        ImputationStrategy::FillDefault,
        ImputationStrategy::FillMean,
        ImputationStrategy::FillMedian,
        ImputationStrategy::Remove,
    ];

    /// Fill handler for this strategy, `None` when entries are dropped instead
    fn fill_fn(self) -> Option<FillFn> {
        let handler: FillFn = match self {
            ImputationStrategy::FillDefault => fill_default,
            ImputationStrategy::FillMean => fill_mean,
            ImputationStrategy::FillMedian => fill_median,
            ImputationStrategy::Remove => return None,
        };
        Some(handler)
    }

    /// Short name used in configuration and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ImputationStrategy::FillDefault => "default",
            ImputationStrategy::FillMean => "mean",
            ImputationStrategy::FillMedian => "median",
            ImputationStrategy::Remove => "remove",
        }
    }
}

impl fmt::Display for ImputationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown strategy name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown imputation strategy: {0}")]
pub struct ParseStrategyError(pub String);

impl FromStr for ImputationStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" | "fill_default" => Ok(ImputationStrategy::FillDefault),
            "mean" | "fill_mean" => Ok(ImputationStrategy::FillMean),
            "median" | "fill_median" => Ok(ImputationStrategy::FillMedian),
            "remove" => Ok(ImputationStrategy::Remove),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

/// Result of an imputation with bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImputationReport {
    /// Repaired series
    pub values: Vec<f64>,
    /// Number of entries replaced by the fill value
    pub filled: usize,
    /// Number of entries dropped
    pub removed: usize,
    /// Fill value used, if any entry could have been filled
    pub fill_value: Option<f64>,
}

/// Repairs missing entries in numeric series
#[derive(Debug, Clone, Default)]
pub struct MissingValueHandler {
    config: RepairConfig,
}

impl MissingValueHandler {
    /// Create a new handler with given config
    pub fn new(config: RepairConfig) -> Self {
        Self { config }
    }

    /// Replace or drop missing entries
    ///
    /// Returns an empty series when no entry is valid, whatever the strategy.
    pub fn impute_missing(&self, series: &[Option<f64>], strategy: ImputationStrategy) -> Vec<f64> {
        self.impute_report(series, strategy).values
    }

    /// Same as [`impute_missing`](Self::impute_missing) with fill counts
    pub fn impute_report(&self, series: &[Option<f64>], strategy: ImputationStrategy) -> ImputationReport {
        let valid = valid_values(series);
        let missing = series.len() - valid.len();

        if valid.is_empty() {
            debug!(len = series.len(), %strategy, "No valid entries; returning empty series");
            return ImputationReport {
                values: Vec::new(),
                filled: 0,
                removed: series.len(),
                fill_value: None,
            };
        }

        let Some(fill) = strategy.fill_fn() else {
            debug!(removed = missing, "Dropped missing entries");
            return ImputationReport {
                values: valid,
                filled: 0,
                removed: missing,
                fill_value: None,
            };
        };

        let fill_value = fill(&valid, &self.config);
        let values = series
            .iter()
            .map(|v| match v {
                Some(x) if !is_missing(*v) => *x,
                _ => fill_value,
            })
            .collect();

        debug!(filled = missing, fill_value, %strategy, "Imputed missing entries");

        ImputationReport {
            values,
            filled: missing,
            removed: 0,
            fill_value: Some(fill_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn handler() -> MissingValueHandler {
        MissingValueHandler::default()
    }

    #[test]
    fn test_fill_mean() {
        let out = handler().impute_missing(&[Some(1.0), None, Some(3.0)], ImputationStrategy::FillMean);
        assert_eq!(out, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_fill_median() {
        let out = handler().impute_missing(&[Some(1.0), None, Some(3.0)], ImputationStrategy::FillMedian);
        assert_eq!(out, vec![1.0, 2.0, 3.0]);

        let out = handler().impute_missing(
            &[Some(10.0), None, Some(1.0), Some(2.0), Some(f64::NAN)],
            ImputationStrategy::FillMedian,
        );
        assert_eq!(out, vec![10.0, 2.0, 1.0, 2.0, 2.0]);
    }

    #[test]
    fn test_remove() {
        let out = handler().impute_missing(&[Some(1.0), None, Some(3.0)], ImputationStrategy::Remove);
        assert_eq!(out, vec![1.0, 3.0]);
    }

    #[test]
    fn test_fill_default_uses_config() {
        let out = handler().impute_missing(&[None, Some(5.0)], ImputationStrategy::FillDefault);
        assert_eq!(out, vec![0.0, 5.0]);

        let config = RepairConfig {
            default_fill: -1.0,
            ..Default::default()
        };
        let out = MissingValueHandler::new(config)
            .impute_missing(&[None, Some(5.0)], ImputationStrategy::FillDefault);
        assert_eq!(out, vec![-1.0, 5.0]);
    }

    #[test]
    fn test_nan_is_missing() {
        let out = handler().impute_missing(&[Some(2.0), Some(f64::NAN), Some(4.0)], ImputationStrategy::FillMean);
        assert_eq!(out, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_fill_mean_large_values() {
        let out = handler().impute_missing(&[Some(f64::MAX), None, Some(f64::MAX)], ImputationStrategy::FillMean);
        assert_eq!(out, vec![f64::MAX, f64::MAX, f64::MAX]);
    }

    #[test]
    fn test_empty_and_all_missing() {
        for strategy in ImputationStrategy::ALL {
            assert!(handler().impute_missing(&[], strategy).is_empty());
            assert!(handler().impute_missing(&[None, None], strategy).is_empty());
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let series = vec![Some(1.0), None];
        let _ = handler().impute_missing(&series, ImputationStrategy::FillMean);
        assert_eq!(series, vec![Some(1.0), None]);
    }

    #[test]
    fn test_report_counts() {
        let series = [Some(1.0), None, Some(f64::NAN), Some(3.0)];

        let report = handler().impute_report(&series, ImputationStrategy::FillMean);
        assert_eq!(report.filled, 2);
        assert_eq!(report.removed, 0);
        assert_eq!(report.fill_value, Some(2.0));

        let report = handler().impute_report(&series, ImputationStrategy::Remove);
        assert_eq!(report.filled, 0);
        assert_eq!(report.removed, 2);
        assert_eq!(report.fill_value, None);
    }

    #[test]
    fn test_strategy_from_str() {
        assert_eq!("mean".parse::<ImputationStrategy>(), Ok(ImputationStrategy::FillMean));
        assert_eq!("FILL_MEDIAN".parse::<ImputationStrategy>(), Ok(ImputationStrategy::FillMedian));
        assert_eq!("remove".parse::<ImputationStrategy>(), Ok(ImputationStrategy::Remove));
        assert!("mode".parse::<ImputationStrategy>().is_err());
        for strategy in ImputationStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<ImputationStrategy>(), Ok(strategy));
        }
    }

    fn nullable_series() -> impl Strategy<Value = Vec<Option<f64>>> {
        prop::collection::vec(prop::option::of(-1.0e6..1.0e6f64), 0..40)
    }

    proptest! {
        #[test]
        fn fill_preserves_length_and_valid_entries(series in nullable_series()) {
            let valid_count = series.iter().filter(|v| v.is_some()).count();
            for strategy in [ImputationStrategy::FillDefault, ImputationStrategy::FillMean, ImputationStrategy::FillMedian] {
                let out = handler().impute_missing(&series, strategy);
                if valid_count == 0 {
                    prop_assert!(out.is_empty());
                } else {
                    prop_assert_eq!(out.len(), series.len());
                    for (original, repaired) in series.iter().zip(&out) {
                        if let Some(x) = original {
                            prop_assert_eq!(x, repaired);
                        }
                    }
                }
            }
        }

        #[test]
        fn remove_keeps_valid_subsequence(series in nullable_series()) {
            let out = handler().impute_missing(&series, ImputationStrategy::Remove);
            let expected: Vec<f64> = series.iter().flatten().copied().collect();
            prop_assert_eq!(out, expected);
        }
    }
}
