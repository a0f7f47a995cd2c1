//! Structured Batch Events

use data_validator::RejectReason;
use serde::{Deserialize, Serialize};

/// Something that happened while processing a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// A line passed every stage
    Accepted { line_number: usize, age: u32 },
    /// A line was dropped
    Rejected {
        line_number: usize,
        raw: String,
        reason: RejectReason,
    },
    /// Accepted lines were ordered by age
    Sorted { count: usize },
    /// The batch finished
    Completed {
        total: usize,
        accepted: usize,
        rejected: usize,
    },
}

/// Ordered collection of batch events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    events: Vec<PipelineEvent>,
}

impl EventLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event
    pub fn push(&mut self, event: PipelineEvent) {
        self.events.push(event);
    }

    /// Events in the order they were recorded
    pub fn iter(&self) -> impl Iterator<Item = &PipelineEvent> {
        self.events.iter()
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Rejection events only
    pub fn rejections(&self) -> impl Iterator<Item = &PipelineEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, PipelineEvent::Rejected { .. }))
    }
}

impl IntoIterator for EventLog {
    type Item = PipelineEvent;
    type IntoIter = std::vec::IntoIter<PipelineEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_filter() {
        let mut log = EventLog::new();
        log.push(PipelineEvent::Accepted { line_number: 1, age: 25 });
        log.push(PipelineEvent::Rejected {
            line_number: 2,
            raw: "x".to_string(),
            reason: RejectReason::MalformedShape,
        });
        log.push(PipelineEvent::Sorted { count: 1 });

        assert_eq!(log.len(), 3);
        assert_eq!(log.rejections().count(), 1);
    }

    #[test]
    fn test_event_json_shape() {
        let event = PipelineEvent::Rejected {
            line_number: 4,
            raw: "D,40,W".to_string(),
            reason: RejectReason::AgeOutOfRange,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "rejected");
        assert_eq!(json["reason"], "age_out_of_range");
        assert_eq!(json["line_number"], 4);
    }
}
