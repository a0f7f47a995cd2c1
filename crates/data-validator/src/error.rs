//! Rejection Reasons

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a raw line or record was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Line did not split into exactly three fields
    #[error("expected 3 comma-separated fields")]
    MalformedShape,

    /// Age field is not a plain decimal number
    #[error("age is not a non-negative integer")]
    NonNumericAge,

    /// City field is empty
    #[error("city is empty")]
    EmptyCity,

    /// Name field is empty
    #[error("name is empty")]
    EmptyName,

    /// Age outside the accepted range
    #[error("age is outside the accepted range")]
    AgeOutOfRange,
}

impl RejectReason {
    /// Every reason, in declaration order
    pub const ALL: [RejectReason; 5] = [
        RejectReason::MalformedShape,
        RejectReason::NonNumericAge,
        RejectReason::EmptyCity,
        RejectReason::EmptyName,
        RejectReason::AgeOutOfRange,
    ];

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::MalformedShape => "malformed_shape",
            RejectReason::NonNumericAge => "non_numeric_age",
            RejectReason::EmptyCity => "empty_city",
            RejectReason::EmptyName => "empty_name",
            RejectReason::AgeOutOfRange => "age_out_of_range",
        }
    }
}
