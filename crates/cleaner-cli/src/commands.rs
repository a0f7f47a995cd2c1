//! Subcommand implementations

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use anyhow::Context;
use record_pipeline::{
    LineSink, LineSource, PipelineOrchestrator, PipelineOutput, PipelineSummary, SinkWriter,
    SourceLoader,
};
use serde::Serialize;
use series_repair::{
    ImputationReport, MissingValueHandler, Normalizer, Outlier, OutlierAnalyzer, SeriesStats,
};
use thiserror::Error;
use tracing::info;

use crate::cli::{Command, ImputeArgs, NormalizeArgs, ProcessArgs, SeriesArgs};
use crate::settings::Settings;

/// A series token that is neither a number nor a missing marker
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value at position {position}: {token:?}")]
pub struct ParseSeriesError {
    pub position: usize,
    pub token: String,
}

/// Parse `1, ,3,null,NaN` into a nullable series
pub fn parse_series(text: &str) -> Result<Vec<Option<f64>>, ParseSeriesError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .enumerate()
        .map(|(position, token)| {
            let token = token.trim();
            if token.is_empty() || token.eq_ignore_ascii_case("null") || token.eq_ignore_ascii_case("nan") {
                return Ok(None);
            }
            token.parse::<f64>().map(Some).map_err(|_| ParseSeriesError {
                position,
                token: token.to_string(),
            })
        })
        .collect()
}

/// Outlier command output
#[derive(Debug, Serialize)]
pub struct OutlierReport {
    pub stats: SeriesStats,
    pub outliers: Vec<Outlier>,
}

/// Dispatch a parsed subcommand
pub fn run(command: Command, settings: &Settings) -> anyhow::Result<()> {
    match command {
        Command::Process(args) => process(&args, settings).map(|_| ()),
        Command::Impute(args) => print_json(&impute(&args, settings)?),
        Command::Outliers(args) => print_json(&outliers(&args, settings)?),
        Command::Normalize(args) => print_json(&normalize(&args, settings)?),
    }
}

/// Run the record pipeline from a file or stdin to a file or stdout
pub fn process(args: &ProcessArgs, settings: &Settings) -> anyhow::Result<PipelineOutput> {
    let mut source: Box<dyn SourceLoader> = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            Box::new(LineSource::new(BufReader::new(file)))
        }
        None => Box::new(LineSource::new(io::stdin().lock())),
    };

    let mut sink: Box<dyn SinkWriter> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?;
            Box::new(LineSink::new(BufWriter::new(file)))
        }
        None => Box::new(LineSink::new(io::stdout().lock())),
    };

    let orchestrator = PipelineOrchestrator::new(settings.validation.clone());
    let output = orchestrator.run(source.as_mut(), sink.as_mut())?;

    if let Some(path) = &args.report {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report {}", path.display()))?;
        write_report(BufWriter::new(file), &output)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        info!(path = %path.display(), "Wrote batch report");
    }

    // Keep stdout clean when it carries the accepted lines
    if args.output.is_some() {
        write_summary(&mut io::stdout().lock(), &output.summary, args.summary_json)?;
    } else {
        write_summary(&mut io::stderr().lock(), &output.summary, args.summary_json)?;
    }

    Ok(output)
}

/// Serialize a batch report and flush it
pub fn write_report<W: Write>(mut writer: W, output: &PipelineOutput) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, output)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Print a batch summary as one text line or as JSON
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &PipelineSummary,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, summary)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", summary)?;
    }
    out.flush()?;
    Ok(())
}

/// Repair missing entries
pub fn impute(args: &ImputeArgs, settings: &Settings) -> anyhow::Result<ImputationReport> {
    let series = parse_series(&args.series.values)?;
    let handler = MissingValueHandler::new(settings.repair.clone());
    Ok(handler.impute_report(&series, args.strategy.into()))
}

/// Report outliers and descriptive statistics
pub fn outliers(args: &SeriesArgs, settings: &Settings) -> anyhow::Result<OutlierReport> {
    let series = parse_series(&args.values)?;
    let analyzer = OutlierAnalyzer::new(settings.repair.clone());
    Ok(OutlierReport {
        stats: SeriesStats::compute(&series),
        outliers: analyzer.detect(&series),
    })
}

/// Rescale and round
pub fn normalize(args: &NormalizeArgs, settings: &Settings) -> anyhow::Result<Vec<f64>> {
    let series = parse_series(&args.series.values)?;
    let normalizer = Normalizer::new(args.method.into(), settings.repair.clone());
    Ok(normalizer.normalize_rounded(&series))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
