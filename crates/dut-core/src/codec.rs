//! The two timestamp text shapes used in device logs.
//!
//! - Calendar timestamps, `"Mon DD HH:MM:SS:mmm"`, as written at the start of
//!   each log line. They carry no year, so one is always supplied by the caller.
//! - Elapsed durations, `"hh:mm:ss:fff"`, where `hh` counts total hours and may
//!   exceed 24 (or 99).
//!
//! Every parser here returns `None` on malformed input instead of erroring.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Month abbreviations, indexed by `month - 1`.
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Parses a decimal field of ASCII digits whose length falls within `width`.
///
/// Signs, whitespace and empty fields are rejected, which `str::parse` alone
/// would not guarantee.
fn numeric<T: FromStr>(field: &str, width: RangeInclusive<usize>) -> Option<T> {
    if !width.contains(&field.len()) || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parses a calendar timestamp such as `"Jul 23 10:00:05:500"` in `year`.
///
/// The day may be one or two digits and may be preceded by extra whitespace
/// (`"Jul  3 ..."`). Returns `None` for unknown month abbreviations,
/// non-numeric fields, or dates that do not exist in `year`.
pub fn parse_calendar(text: &str, year: i32) -> Option<NaiveDateTime> {
    let mut parts = text.split_whitespace();
    let (month, day, clock) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let month = MONTHS.iter().position(|m| *m == month)?;
    let day: u32 = numeric(day, 1..=2)?;

    let mut clock = clock.split(':');
    let hour: u32 = numeric(clock.next()?, 1..=2)?;
    let minute: u32 = numeric(clock.next()?, 2..=2)?;
    let second: u32 = numeric(clock.next()?, 2..=2)?;
    let milli: u32 = numeric(clock.next()?, 3..=3)?;
    if clock.next().is_some() {
        return None;
    }

    let month = u32::try_from(month).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_milli_opt(hour, minute, second, milli)
}

/// An elapsed span of time with millisecond precision.
///
/// Stored as an integer millisecond count so accumulation is exact. The text
/// form is `hh:mm:ss:fff` with hours uncapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Elapsed(u64);

impl Elapsed {
    /// `00:00:00:000`.
    pub const ZERO: Self = Self(0);

    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Builds a duration from its text fields, enforcing minutes and seconds
    /// below 60 and milliseconds below 1000.
    pub fn from_parts(hours: u64, minutes: u64, seconds: u64, millis: u64) -> Option<Self> {
        if minutes >= 60 || seconds >= 60 || millis >= MS_PER_SECOND {
            return None;
        }
        hours
            .checked_mul(MS_PER_HOUR)?
            .checked_add(minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis)
            .map(Self)
    }

    /// Converts a non-negative chrono delta. Negative deltas yield `None`.
    pub fn from_delta(delta: TimeDelta) -> Option<Self> {
        u64::try_from(delta.num_milliseconds()).ok().map(Self)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Total elapsed hours.
    pub const fn hours(self) -> u64 {
        self.0 / MS_PER_HOUR
    }

    pub const fn minutes(self) -> u64 {
        self.0 % MS_PER_HOUR / MS_PER_MINUTE
    }

    pub const fn seconds(self) -> u64 {
        self.0 % MS_PER_MINUTE / MS_PER_SECOND
    }

    pub const fn millis(self) -> u64 {
        self.0 % MS_PER_SECOND
    }

    /// Exact sum; `None` only if the millisecond count overflows.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

/// Parses `"hh:mm:ss:fff"`. Hours need at least two digits but are otherwise
/// unbounded; minutes and seconds are two digits, milliseconds three.
pub fn parse_elapsed(text: &str) -> Option<Elapsed> {
    let mut fields = text.split(':');
    let hours: u64 = numeric(fields.next()?, 2..=20)?;
    let minutes: u64 = numeric(fields.next()?, 2..=2)?;
    let seconds: u64 = numeric(fields.next()?, 2..=2)?;
    let millis: u64 = numeric(fields.next()?, 3..=3)?;
    if fields.next().is_some() {
        return None;
    }
    Elapsed::from_parts(hours, minutes, seconds, millis)
}

/// Renders `hh:mm:ss:fff`, padding hours to two digits without truncating.
pub fn format_elapsed(elapsed: Elapsed) -> String {
    elapsed.to_string()
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:03}",
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.millis()
        )
    }
}

/// Error for text that is not a valid `hh:mm:ss:fff` duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid elapsed duration: {0}")]
pub struct InvalidElapsed(String);

impl FromStr for Elapsed {
    type Err = InvalidElapsed;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_elapsed(s).ok_or_else(|| InvalidElapsed(s.to_string()))
    }
}

impl TryFrom<String> for Elapsed {
    type Error = InvalidElapsed;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Elapsed> for String {
    fn from(elapsed: Elapsed) -> Self {
        elapsed.to_string()
    }
}
