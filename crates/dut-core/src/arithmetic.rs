//! Differences between calendar timestamps and sums of elapsed durations.
//!
//! The text-level `subtract`/`add` operate on log text directly and propagate
//! parse failures as `None`. The typed helpers do the actual work.

use chrono::NaiveDateTime;

use crate::codec::{Elapsed, parse_calendar, parse_elapsed};

/// Time from `start` to `stop`.
///
/// A `stop` earlier than `start` has no representation as an elapsed
/// duration and yields `None`. Calendar timestamps carry no year, so a pair
/// spanning New Year also lands here.
pub fn elapsed_between(start: NaiveDateTime, stop: NaiveDateTime) -> Option<Elapsed> {
    Elapsed::from_delta(stop - start)
}

/// `stop - start` for two calendar timestamp texts, both read in `year`.
pub fn subtract(stop: &str, start: &str, year: i32) -> Option<String> {
    subtract_elapsed(stop, start, year).map(String::from)
}

/// Typed form of [`subtract`].
pub fn subtract_elapsed(stop: &str, start: &str, year: i32) -> Option<Elapsed> {
    let stop = parse_calendar(stop, year)?;
    let start = parse_calendar(start, year)?;
    elapsed_between(start, stop)
}

/// Exact sum of two `hh:mm:ss:fff` texts.
pub fn add(a: &str, b: &str) -> Option<String> {
    let a = parse_elapsed(a)?;
    let b = parse_elapsed(b)?;
    a.checked_add(b).map(String::from)
}
