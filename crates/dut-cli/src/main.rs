use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dut_cli::commands::{analyze, calc};
use dut_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Logs go to stderr so reports on stdout stay machine-readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let mut stdout = io::stdout().lock();
    match &cli.command {
        Some(Commands::Analyze { path, year, json }) => {
            let year = config.resolve_year(*year);
            analyze::run(&mut stdout, path, year, *json || config.json)?;
        }
        Some(Commands::Diff { start, stop, year }) => {
            calc::diff(&mut stdout, start, stop, config.resolve_year(*year))?;
        }
        Some(Commands::Add { a, b }) => calc::add(&mut stdout, a, b)?,
        Some(Commands::Days { duration }) => calc::days(&mut stdout, duration)?,
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
