//! Record Validator for Domain Rules

use crate::error::RejectReason;
use crate::record::Record;
use serde::{Deserialize, Serialize};

/// Validation configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Youngest accepted age (inclusive)
    pub min_age: u32,
    /// Oldest accepted age (inclusive)
    pub max_age: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_age: 20,
            max_age: 35,
        }
    }
}

impl ValidationConfig {
    /// Narrower working-age window
    pub fn strict() -> Self {
        Self {
            min_age: 25,
            max_age: 30,
        }
    }

    /// Any adult age
    pub fn lenient() -> Self {
        Self {
            min_age: 18,
            max_age: 120,
        }
    }
}

/// Validator for parsed or hand-built records
#[derive(Debug, Clone, Default)]
pub struct RecordValidator {
    config: ValidationConfig,
}

impl RecordValidator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Check a record against the domain rules
    pub fn validate(&self, record: &Record) -> Result<(), RejectReason> {
        if record.name.is_empty() {
            return Err(RejectReason::EmptyName);
        }
        if record.city.is_empty() {
            return Err(RejectReason::EmptyCity);
        }
        self.validate_age(record.age)
    }

    /// Check an age against the configured inclusive range
    pub fn validate_age(&self, age: u32) -> Result<(), RejectReason> {
        if age < self.config.min_age || age > self.config.max_age {
            Err(RejectReason::AgeOutOfRange)
        } else {
            Ok(())
        }
    }
}
