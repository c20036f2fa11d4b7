//! One-off timestamp and duration arithmetic.

use std::io::Write;

use anyhow::{Context, Result};
use dut_core::{elapsed_between, parse_calendar, to_days};

/// Prints the elapsed time from `start` to `stop`.
pub fn diff<W: Write>(writer: &mut W, start: &str, stop: &str, year: i32) -> Result<()> {
    let start_at = parse_calendar(start, year)
        .with_context(|| format!("invalid timestamp '{start}', expected e.g. 'Jul 23 10:00:00:000'"))?;
    let stop_at = parse_calendar(stop, year)
        .with_context(|| format!("invalid timestamp '{stop}', expected e.g. 'Jul 23 10:00:00:000'"))?;
    let elapsed = elapsed_between(start_at, stop_at)
        .with_context(|| format!("'{stop}' is earlier than '{start}'"))?;

    writeln!(writer, "{elapsed}")?;
    Ok(())
}

/// Prints the sum of two durations.
pub fn add<W: Write>(writer: &mut W, a: &str, b: &str) -> Result<()> {
    let sum = dut_core::add(a, b)
        .with_context(|| format!("cannot add '{a}' and '{b}', expected hh:mm:ss:fff durations"))?;

    writeln!(writer, "{sum}")?;
    Ok(())
}

/// Prints a duration as fractional days.
pub fn days<W: Write>(writer: &mut W, duration: &str) -> Result<()> {
    let days = to_days(duration)
        .with_context(|| format!("invalid duration '{duration}', expected hh:mm:ss:fff"))?;

    writeln!(writer, "{days:.6}")?;
    Ok(())
}
