//! Numeric Series Repair
//!
//! Fills or drops missing entries in numeric series, reports statistical
//! outliers, and rescales complete series. Inputs are never mutated.

mod config;
mod imputation;
mod normalizer;
mod outlier;
mod statistics;

pub use config::{RepairConfig, StdDevKind, MAX_SCALE};
pub use imputation::{ImputationReport, ImputationStrategy, MissingValueHandler, ParseStrategyError};
pub use normalizer::{round_series, round_to_scale, NormalizationMethod, Normalizer};
pub use outlier::{Outlier, OutlierAnalyzer};
pub use statistics::{is_missing, valid_values, SeriesStats};
