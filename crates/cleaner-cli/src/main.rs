//! Record Cleaner - Main Entry Point

use clap::Parser;
use cleaner_cli::{cli::Cli, commands, logging::init_logging, settings::Settings};
use tracing::{debug, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose)?;

    info!("=== Record Cleaner v{} ===", env!("CARGO_PKG_VERSION"));

    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "Loaded settings");

    commands::run(cli.command, &settings)
}
