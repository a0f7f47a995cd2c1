//! Logging initialisation

use crate::cli::LogFormatArg;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Crates whose events follow the verbosity flag
const WORKSPACE_TARGETS: [&str; 4] = [
    "cleaner_cli",
    "record_pipeline",
    "data_validator",
    "series_repair",
];

/// Map `-v` occurrences to a level
pub fn level_for(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Build an `EnvFilter` from the given level, respecting `RUST_LOG` env var
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        // External crates stay at warn
        let mut directives = String::from("warn");
        for target in WORKSPACE_TARGETS {
            directives.push_str(&format!(",{}={}", target, level));
        }
        EnvFilter::new(directives)
    })
}

/// Initialize logging to stderr so stdout carries only command output
pub fn init_logging(format: LogFormatArg, verbose: u8) -> anyhow::Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(level_for(verbose)))
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = match format {
        LogFormatArg::Pretty => builder.try_init(),
        LogFormatArg::Json => builder.json().try_init(),
    };
    result.map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0), Level::INFO);
        assert_eq!(level_for(1), Level::DEBUG);
        assert_eq!(level_for(5), Level::TRACE);
    }
}
