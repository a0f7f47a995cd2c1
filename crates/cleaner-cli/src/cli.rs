//! CLI argument definitions

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use series_repair::{ImputationStrategy, NormalizationMethod};

#[derive(Parser)]
#[command(
    name = "record-cleaner",
    version,
    about = "Clean person records and repair numeric series"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file (TOML), defaults to ./record-cleaner.toml when present
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log output format (pretty for humans, json for machines)
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate, render, and sort a batch of `name,age,city` lines
    Process(ProcessArgs),

    /// Fill or drop missing entries in a numeric series
    Impute(ImputeArgs),

    /// Report values far from the series mean
    Outliers(SeriesArgs),

    /// Rescale a numeric series and round to the configured scale
    Normalize(NormalizeArgs),
}

#[derive(Args)]
pub struct ProcessArgs {
    /// Input file with one record per line (stdin when omitted)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Write accepted lines here instead of stdout
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the batch summary as JSON instead of a one-line text summary
    #[arg(long = "summary-json")]
    pub summary_json: bool,

    /// Write a JSON report with summary, rejections, and events
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Args)]
pub struct SeriesArgs {
    /// Comma-separated values; empty, `null`, or `NaN` entries are missing
    #[arg(value_name = "VALUES", allow_hyphen_values = true)]
    pub values: String,
}

#[derive(Args)]
pub struct ImputeArgs {
    /// Repair strategy
    #[arg(long = "strategy", short = 's', value_enum, default_value = "mean")]
    pub strategy: StrategyArg,

    #[command(flatten)]
    pub series: SeriesArgs,
}

#[derive(Args)]
pub struct NormalizeArgs {
    /// Rescaling method
    #[arg(long = "method", short = 'm', value_enum, default_value = "min-max")]
    pub method: MethodArg,

    #[command(flatten)]
    pub series: SeriesArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum StrategyArg {
    Default,
    Mean,
    Median,
    Remove,
}

impl From<StrategyArg> for ImputationStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Default => ImputationStrategy::FillDefault,
            StrategyArg::Mean => ImputationStrategy::FillMean,
            StrategyArg::Median => ImputationStrategy::FillMedian,
            StrategyArg::Remove => ImputationStrategy::Remove,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MethodArg {
    MinMax,
    ZScore,
    None,
}

impl From<MethodArg> for NormalizationMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::MinMax => NormalizationMethod::MinMax,
            MethodArg::ZScore => NormalizationMethod::ZScore,
            MethodArg::None => NormalizationMethod::None,
        }
    }
}
