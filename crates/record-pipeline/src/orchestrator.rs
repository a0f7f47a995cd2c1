//! Batch Orchestrator

use crate::error::PipelineError;
use crate::events::{EventLog, PipelineEvent};
use crate::io::{SinkWriter, SourceLoader};
use crate::summary::PipelineSummary;
use data_validator::{
    CanonicalRecord, RecordParser, RecordTransformer, RecordValidator, RejectReason,
    ValidationConfig,
};
use metrics::counter;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A line that did not survive the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedLine {
    /// 1-based position in the batch
    pub line_number: usize,
    /// The line as received
    pub raw: String,
    /// Why it was dropped
    pub reason: RejectReason,
}

/// Result of processing one batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Canonical strings ordered by age, ties in input order
    pub accepted: Vec<String>,
    /// Dropped lines in input order
    pub rejected: Vec<RejectedLine>,
    /// Batch statistics
    pub summary: PipelineSummary,
    /// Structured record of what happened
    pub events: EventLog,
}

/// Runs parse, validate, and render over a batch and orders the survivors
///
/// Holds only configuration, so one orchestrator can serve any number of
/// independent batches.
#[derive(Debug, Clone, Default)]
pub struct PipelineOrchestrator {
    validator: RecordValidator,
}

impl PipelineOrchestrator {
    /// Create a new orchestrator with given validation config
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            validator: RecordValidator::new(config),
        }
    }

    /// Process a batch of raw lines
    ///
    /// Per-line failures are collected, never raised; an empty batch yields an
    /// empty output.
    pub fn process<I, S>(&self, lines: I) -> PipelineOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut events = EventLog::new();
        let mut accepted: Vec<CanonicalRecord> = Vec::new();
        let mut rejected: Vec<RejectedLine> = Vec::new();
        let mut total = 0;

        for (index, line) in lines.into_iter().enumerate() {
            let raw = line.as_ref();
            let line_number = index + 1;
            total += 1;

            match self.process_line(raw) {
                Ok(canonical) => {
                    debug!(line_number, age = canonical.age, "Accepted line");
                    events.push(PipelineEvent::Accepted {
                        line_number,
                        age: canonical.age,
                    });
                    accepted.push(canonical);
                }
                Err(reason) => {
                    warn!(line_number, raw, %reason, "Rejected line");
                    counter!("records_rejected_total", "reason" => reason.code()).increment(1);
                    events.push(PipelineEvent::Rejected {
                        line_number,
                        raw: raw.to_string(),
                        reason,
                    });
                    rejected.push(RejectedLine {
                        line_number,
                        raw: raw.to_string(),
                        reason,
                    });
                }
            }
        }

        // Stable: equal ages keep input order
        accepted.sort_by_key(|record| record.age);
        events.push(PipelineEvent::Sorted {
            count: accepted.len(),
        });

        let summary =
            PipelineSummary::from_sorted(total, &accepted, rejected.iter().map(|r| r.reason));

        counter!("records_accepted_total").increment(summary.accepted_count as u64);
        counter!("batches_processed_total").increment(1);

        events.push(PipelineEvent::Completed {
            total: summary.total,
            accepted: summary.accepted_count,
            rejected: summary.rejected_count,
        });

        info!(
            total = summary.total,
            accepted = summary.accepted_count,
            rejected = summary.rejected_count,
            min_age = ?summary.min_age,
            max_age = ?summary.max_age,
            "Batch processed"
        );

        PipelineOutput {
            accepted: accepted
                .into_iter()
                .map(CanonicalRecord::into_text)
                .collect(),
            rejected,
            summary,
            events,
        }
    }

    /// Load a batch, process it, and hand the accepted lines to a sink
    pub fn run<L, W>(&self, source: &mut L, sink: &mut W) -> Result<PipelineOutput, PipelineError>
    where
        L: SourceLoader + ?Sized,
        W: SinkWriter + ?Sized,
    {
        let lines = source.load()?;
        debug!(count = lines.len(), "Loaded source lines");

        let output = self.process(&lines);
        sink.write(&output.accepted)?;

        Ok(output)
    }

    fn process_line(&self, raw: &str) -> Result<CanonicalRecord, RejectReason> {
        let record = RecordParser::parse(raw)?;
        self.validator.validate(&record)?;
        Ok(RecordTransformer::transform(&record))
    }
}
