//! Analyze command for device state logs.
//!
//! Reads a log file (or stdin), runs it through a fresh state machine and
//! prints either a human-readable report or JSON.

use std::fmt::Write as _;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use dut_core::{RunResult, process_lines};
use serde::Serialize;

/// JSON shape of an analysis.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    year: i32,
    total_on_days: f64,
    #[serde(flatten)]
    result: &'a RunResult,
}

/// Runs the analyze command, writing the report to `writer`.
///
/// A log without a single device state event is reported as an error.
pub fn run<W: Write>(writer: &mut W, path: &Path, year: i32, json: bool) -> Result<()> {
    let bytes = read_input(path)?;
    let text = String::from_utf8_lossy(&bytes);
    let result = process_lines(text.lines(), year);
    tracing::debug!(
        events = result.events,
        intervals = result.intervals.len(),
        errors = result.error_timestamps.len(),
        "processed log"
    );

    if result.events == 0 {
        bail!("no device state events found in {}", source_label(path));
    }

    if json {
        let report = JsonReport {
            year,
            total_on_days: result.total_on_duration.as_days(),
            result: &result,
        };
        serde_json::to_writer_pretty(&mut *writer, &report)?;
        writeln!(writer)?;
    } else {
        write!(writer, "{}", format_report(&source_label(path), year, &result))?;
    }

    Ok(())
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read log from stdin")?;
        return Ok(bytes);
    }
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn source_label(path: &Path) -> String {
    if path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

/// Formats the human-readable report output.
pub fn format_report(source: &str, year: i32, result: &RunResult) -> String {
    let mut output = String::new();

    writeln!(output, "DEVICE LOG: {source} ({year})").unwrap();
    writeln!(output, "Events:        {}", result.events).unwrap();
    writeln!(
        output,
        "Total on time: {} ({:.6} days)",
        result.total_on_duration,
        result.total_on_duration.as_days()
    )
    .unwrap();

    writeln!(output).unwrap();
    writeln!(output, "INTERVALS").unwrap();
    writeln!(output, "─────────").unwrap();
    if result.intervals.is_empty() {
        writeln!(output, "(none)").unwrap();
    }
    for interval in &result.intervals {
        let elapsed = interval
            .elapsed
            .map_or_else(|| "unmeasured".to_string(), |e| e.to_string());
        let marker = if interval.error { "  ERR" } else { "" };
        writeln!(
            output,
            "  {} → {}  {elapsed}{marker}",
            interval.start, interval.stop
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "ERRORS").unwrap();
    writeln!(output, "──────").unwrap();
    if result.error_timestamps.is_empty() {
        writeln!(output, "(none)").unwrap();
    }
    for timestamp in &result.error_timestamps {
        writeln!(output, "  {timestamp}").unwrap();
    }

    if let Some(start) = &result.dangling_start {
        writeln!(output).unwrap();
        writeln!(
            output,
            "Note: device still on since {start}; open interval not counted."
        )
        .unwrap();
    }

    output
}
