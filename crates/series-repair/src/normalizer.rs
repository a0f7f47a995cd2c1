//! Series Rescaling and Rounding

use crate::config::{RepairConfig, StdDevKind};
use crate::statistics::{self, valid_values};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Normalization method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationMethod {
    /// Min-max normalization to [0, 1]
    #[default]
    MinMax,
    /// Z-score normalization using the population standard deviation
    ZScore,
    /// No normalization
    None,
}

/// Round half away from zero to `scale` decimal places
///
/// Ties are decided on the shortest decimal form of `value`, so `1.005`
/// rounds to `1.01`. Values too large to carry `scale` decimals come back
/// unchanged.
pub fn round_to_scale(value: f64, scale: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let rounded = Decimal::from_str(&value.to_string())
        .ok()
        .map(|d| d.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_string().parse::<f64>().ok());
    if let Some(rounded) = rounded {
        return rounded;
    }

    // Outside Decimal's range
    let factor = 10f64.powi(i32::try_from(scale).unwrap_or(i32::MAX));
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= 2f64.powi(52) {
        return value;
    }
    scaled.round() / factor
}

/// Round every entry of a series
pub fn round_series(values: &[f64], scale: u32) -> Vec<f64> {
    values.iter().map(|&v| round_to_scale(v, scale)).collect()
}

/// Batch normalizer for complete or nullable series
///
/// Missing entries are left out of the statistics and come back as `NaN`.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    method: NormalizationMethod,
    config: RepairConfig,
}

impl Normalizer {
    /// Create a new normalizer
    pub fn new(method: NormalizationMethod, config: RepairConfig) -> Self {
        Self { method, config }
    }

    /// Rescale a series
    pub fn normalize(&self, series: &[Option<f64>]) -> Vec<f64> {
        let values = valid_values(series);
        let rescale: Box<dyn Fn(f64) -> f64> = match self.method {
            NormalizationMethod::MinMax => {
                let min = values.iter().copied().fold(f64::MAX, f64::min);
                let max = values.iter().copied().fold(f64::MIN, f64::max);
                let range = max - min;
                if range > 0.0 {
                    Box::new(move |v| (v - min) / range)
                } else {
                    Box::new(|_| 0.0)
                }
            }
            NormalizationMethod::ZScore => {
                let mean = statistics::mean(&values).unwrap_or(0.0);
                let std_dev = statistics::std_dev(&values, mean, StdDevKind::Population);
                if std_dev > 0.0 {
                    Box::new(move |v| (v - mean) / std_dev)
                } else {
                    Box::new(|_| 0.0)
                }
            }
            NormalizationMethod::None => Box::new(|v| v),
        };

        series
            .iter()
            .map(|v| match v {
                Some(x) if !x.is_nan() => rescale(*x),
                _ => f64::NAN,
            })
            .collect()
    }

    /// Rescale, then round to the configured scale
    pub fn normalize_rounded(&self, series: &[Option<f64>]) -> Vec<f64> {
        round_series(&self.normalize(series), self.config.scale)
    }
}
