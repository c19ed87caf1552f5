//! usability-survey - Nielsen heuristic usability report from survey responses

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize tracing; stdout is reserved for the report itself
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(input = %cli.csv_path.display(), "usability-survey starting...");

    let config = cli.config();
    cli::run(&config)?;

    Ok(())
}
