//! Series repair configuration

use serde::{Deserialize, Serialize};

/// Largest rounding scale an `f64` can meaningfully carry
pub const MAX_SCALE: u32 = 15;

/// Standard deviation estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StdDevKind {
    /// Divide by `n`
    #[default]
    Population,
    /// Divide by `n - 1` (Bessel's correction)
    Sample,
}

/// Series repair configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepairConfig {
    /// Decimal places kept when rounding
    pub scale: u32,

    /// Constant used by the fill-default strategy
    pub default_fill: f64,

    /// Distance from the mean, in standard deviations, beyond which a value is an outlier
    pub outlier_multiple: f64,

    /// Estimator used for outlier detection
    pub std_dev: StdDevKind,
}

impl Default for RepairConfig {
    fn default() -> Self {
        Self {
            scale: 2,
            default_fill: 0.0,
            outlier_multiple: 3.0,
            std_dev: StdDevKind::Population,
        }
    }
}

impl RepairConfig {
    /// Flag more values as outliers
    pub fn strict() -> Self {
        Self {
            outlier_multiple: 2.0,
            std_dev: StdDevKind::Sample,
            ..Default::default()
        }
    }

    /// Flag only extreme values
    pub fn lenient() -> Self {
        Self {
            outlier_multiple: 4.0,
            ..Default::default()
        }
    }
}
