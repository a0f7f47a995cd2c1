//! Record Cleaning Pipeline
//!
//! Sequences parsing, validation, and canonical rendering over a batch of
//! raw lines, then orders the survivors by age and summarises the batch.

mod error;
mod events;
mod io;
mod orchestrator;
mod summary;

pub use error::PipelineError;
pub use events::{EventLog, PipelineEvent};
pub use io::{LineSink, LineSource, MemorySink, SinkWriter, SourceLoader};
pub use orchestrator::{PipelineOrchestrator, PipelineOutput, RejectedLine};
pub use summary::PipelineSummary;

pub use data_validator::{RejectReason, ValidationConfig};
