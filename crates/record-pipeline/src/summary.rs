//! Batch Summary Statistics

use data_validator::{CanonicalRecord, RejectReason};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Counts and age range for one processed batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Lines received
    pub total: usize,
    /// Lines that became canonical records
    pub accepted_count: usize,
    /// Lines dropped
    pub rejected_count: usize,
    /// Rejections per reason
    pub rejections_by_reason: BTreeMap<RejectReason, usize>,
    /// Youngest accepted age
    pub min_age: Option<u32>,
    /// Oldest accepted age
    pub max_age: Option<u32>,
}

impl PipelineSummary {
    /// Build a summary from age-sorted accepted records and rejection reasons
    pub(crate) fn from_sorted(
        total: usize,
        sorted: &[CanonicalRecord],
        reasons: impl IntoIterator<Item = RejectReason>,
    ) -> Self {
        let mut rejections_by_reason = BTreeMap::new();
        for reason in reasons {
            *rejections_by_reason.entry(reason).or_insert(0) += 1;
        }
        let rejected_count = rejections_by_reason.values().sum();

        Self {
            total,
            accepted_count: sorted.len(),
            rejected_count,
            rejections_by_reason,
            min_age: sorted.first().map(|r| r.age),
            max_age: sorted.last().map(|r| r.age),
        }
    }

    /// Rejections recorded for one reason
    pub fn rejected_for(&self, reason: RejectReason) -> usize {
        self.rejections_by_reason.get(&reason).copied().unwrap_or(0)
    }
}

impl fmt::Display for PipelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={} accepted={} rejected={}",
            self.total, self.accepted_count, self.rejected_count
        )?;
        if let (Some(min), Some(max)) = (self.min_age, self.max_age) {
            write!(f, " age_range={}..={}", min, max)?;
        }
        Ok(())
    }
}
