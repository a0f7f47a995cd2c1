//! Source and Sink Collaborators

use crate::error::PipelineError;
use std::io::{BufRead, Write};
use tracing::debug;

/// Supplies an ordered batch of raw lines
pub trait SourceLoader {
    /// Load every line of the batch
    fn load(&mut self) -> Result<Vec<String>, PipelineError>;
}

/// Persists or displays accepted canonical lines
pub trait SinkWriter {
    /// Write the ordered lines
    fn write(&mut self, lines: &[String]) -> Result<(), PipelineError>;
}

/// In-memory batch; loading drains it
impl SourceLoader for Vec<String> {
    fn load(&mut self) -> Result<Vec<String>, PipelineError> {
        Ok(std::mem::take(self))
    }
}

/// Reads newline-terminated lines from any buffered reader
pub struct LineSource<R> {
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> SourceLoader for LineSource<R> {
    fn load(&mut self) -> Result<Vec<String>, PipelineError> {
        let mut lines = Vec::new();
        for line in (&mut self.reader).lines() {
            let mut line = line.map_err(PipelineError::Source)?;
            // Tolerate CRLF input
            if line.ends_with('\r') {
                line.pop();
            }
            lines.push(line);
        }
        debug!(count = lines.len(), "Read source lines");
        Ok(lines)
    }
}

/// Writes one line per canonical string
pub struct LineSink<W> {
    writer: W,
}

impl<W: Write> LineSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the wrapped writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SinkWriter for LineSink<W> {
    fn write(&mut self, lines: &[String]) -> Result<(), PipelineError> {
        for line in lines {
            writeln!(self.writer, "{}", line).map_err(PipelineError::Sink)?;
        }
        self.writer.flush().map_err(PipelineError::Sink)
    }
}

/// Collects written lines in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Vec<String>,
}

impl MemorySink {
    /// Lines written so far
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl SinkWriter for MemorySink {
    fn write(&mut self, lines: &[String]) -> Result<(), PipelineError> {
        self.lines.extend_from_slice(lines);
        Ok(())
    }
}
