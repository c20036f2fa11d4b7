//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Device state log analyzer.
///
/// Reconstructs device on-time, error occurrences and an interval audit
/// trail from `dut: Device State:` log lines.
#[derive(Debug, Parser)]
#[command(name = "dut", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Analyze a device log and report on-time, errors and intervals.
    Analyze {
        /// Log file to read, or `-` for stdin.
        path: PathBuf,

        /// Calendar year of the log's timestamps (defaults to config, then the current year).
        #[arg(long)]
        year: Option<i32>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Time between two calendar timestamps (e.g. "Jul 23 10:00:00:000").
    Diff {
        start: String,
        stop: String,

        /// Calendar year of both timestamps.
        #[arg(long)]
        year: Option<i32>,
    },

    /// Sum of two hh:mm:ss:fff durations.
    Add { a: String, b: String },

    /// Convert an hh:mm:ss:fff duration to days.
    Days { duration: String },
}
