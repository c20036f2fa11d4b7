//! Pulls device state events out of raw log lines.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::state::DeviceState;

/// `<Mon DD HH:MM:SS:mmm> [<anything>] dut: Device State: <ON|OFF|ERR>`
static DEVICE_STATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"([A-Za-z]{3}\s+\d{1,2}\s+\d{1,2}:\d{2}:\d{2}:\d{3})\s+\[.*\] dut: Device State: (ON|OFF|ERR)\b",
    )
    .unwrap()
});

/// One device state report, in file order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEvent {
    /// The calendar timestamp exactly as written in the log.
    pub timestamp: String,
    pub state: DeviceState,
}

/// Matches `line` against the device state pattern.
///
/// Lines that don't match are not an error; they are simply not events. The
/// timestamp is returned as text and only interpreted once an interval closes.
pub fn extract(line: &str) -> Option<LogEvent> {
    let caps = DEVICE_STATE_RE.captures(line)?;
    let state = caps[2].parse().ok()?;
    Some(LogEvent {
        timestamp: caps[1].to_string(),
        state,
    })
}
