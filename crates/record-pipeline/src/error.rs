//! Pipeline Error Types

use thiserror::Error;

/// Errors raised by the collaborators around a batch
///
/// Bad lines are never errors; they become rejections.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Reading raw lines failed
    #[error("Failed to load source lines")]
    Source(#[source] std::io::Error),

    /// Writing accepted lines failed
    #[error("Failed to write output lines")]
    Sink(#[source] std::io::Error),
}
