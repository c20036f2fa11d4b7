//! ON/OFF/ERR state machine over device state events.
//!
//! # Transitions
//!
//! 1. `ON` while off starts an interval at the event's timestamp.
//! 2. `ON` while on is ignored; the first `ON` keeps the start time.
//! 3. `OFF`/`ERR` while on closes the interval, records it and adds its
//!    duration to the total.
//! 4. `OFF`/`ERR` while off closes nothing.
//! 5. Every `ERR` is recorded as an error, whatever the device state.
//!
//! An interval still open at end of input is dropped; its start is only
//! reported through [`RunResult::dangling_start`].

use serde::Serialize;

use crate::arithmetic::subtract_elapsed;
use crate::codec::Elapsed;
use crate::extract::{LogEvent, extract};
use crate::state::DeviceState;

/// Audit entry for one ON → OFF/ERR transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntervalRecord {
    pub start: String,
    pub stop: String,
    /// `None` if the pair could not be measured (unparseable or reversed).
    pub elapsed: Option<Elapsed>,
    /// Whether the interval was closed by `ERR` rather than `OFF`.
    pub error: bool,
}

/// Everything computed from one log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    /// Sum of all measurable interval durations.
    pub total_on_duration: Elapsed,
    /// Timestamp of every `ERR` event, in file order.
    pub error_timestamps: Vec<String>,
    pub intervals: Vec<IntervalRecord>,
    /// Number of device state events seen.
    pub events: usize,
    /// Start of an ON interval left open at end of input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dangling_start: Option<String>,
}

/// Accumulates one run. Build a fresh machine for every log.
#[derive(Debug, Clone)]
pub struct LogStateMachine {
    year: i32,
    pending_start: Option<String>,
    total_on_duration: Elapsed,
    error_timestamps: Vec<String>,
    intervals: Vec<IntervalRecord>,
    events: usize,
}

impl LogStateMachine {
    /// Creates a machine that reads calendar timestamps in `year`.
    pub const fn new(year: i32) -> Self {
        Self {
            year,
            pending_start: None,
            total_on_duration: Elapsed::ZERO,
            error_timestamps: Vec::new(),
            intervals: Vec::new(),
            events: 0,
        }
    }

    /// Whether an ON interval is currently open.
    pub const fn is_on(&self) -> bool {
        self.pending_start.is_some()
    }

    /// Applies one event.
    pub fn feed(&mut self, event: LogEvent) {
        self.events += 1;
        let LogEvent { timestamp, state } = event;

        if state == DeviceState::Error {
            self.error_timestamps.push(timestamp.clone());
        }

        match (state, self.pending_start.take()) {
            (DeviceState::On, None) => {
                tracing::debug!(%timestamp, "device on");
                self.pending_start = Some(timestamp);
            }
            (DeviceState::On, Some(start)) => {
                tracing::debug!(%timestamp, %start, "device already on, ignoring");
                self.pending_start = Some(start);
            }
            (state, Some(start)) => self.close(start, timestamp, state),
            (state, None) => {
                tracing::debug!(%timestamp, %state, "device already off");
            }
        }
    }

    fn close(&mut self, start: String, stop: String, state: DeviceState) {
        let elapsed = subtract_elapsed(&stop, &start, self.year);
        match elapsed {
            Some(elapsed) => match self.total_on_duration.checked_add(elapsed) {
                Some(total) => self.total_on_duration = total,
                None => tracing::warn!(%start, %stop, "on-time total overflowed, interval not counted"),
            },
            None => tracing::warn!(%start, %stop, "interval cannot be measured, not counted"),
        }
        tracing::debug!(%start, %stop, %state, ?elapsed, "device off");

        self.intervals.push(IntervalRecord {
            start,
            stop,
            elapsed,
            error: state == DeviceState::Error,
        });
    }

    /// Ends the run and hands the accumulated outputs to the caller.
    pub fn finish(self) -> RunResult {
        if let Some(start) = &self.pending_start {
            tracing::warn!(%start, "log ended with device on, open interval dropped");
        }
        RunResult {
            total_on_duration: self.total_on_duration,
            error_timestamps: self.error_timestamps,
            intervals: self.intervals,
            events: self.events,
            dangling_start: self.pending_start,
        }
    }
}

/// Runs a fresh state machine over raw log lines, skipping non-matching ones.
pub fn process_lines<I>(lines: I, year: i32) -> RunResult
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut machine = LogStateMachine::new(year);
    for event in lines.into_iter().filter_map(|line| extract(line.as_ref())) {
        machine.feed(event);
    }
    machine.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2023;

    fn line(ts: &str, state: &str) -> String {
        format!("{ts} [x] dut: Device State: {state}")
    }

    #[test]
    fn single_on_off_interval() {
        let result = process_lines(
            [
                "Jul 23 10:00:00:000 [x] dut: Device State: ON",
                "Jul 23 10:00:05:500 [x] dut: Device State: OFF",
            ],
            YEAR,
        );

        assert_eq!(result.total_on_duration.to_string(), "00:00:05:500");
        assert!(result.error_timestamps.is_empty());
        assert_eq!(
            result.intervals,
            vec![IntervalRecord {
                start: "Jul 23 10:00:00:000".to_string(),
                stop: "Jul 23 10:00:05:500".to_string(),
                elapsed: Some(Elapsed::from_millis(5_500)),
                error: false,
            }]
        );
        assert_eq!(result.events, 2);
        assert_eq!(result.dangling_start, None);
    }

    #[test]
    fn repeated_on_keeps_first_start() {
        let result = process_lines(
            [
                line("Jul 23 10:00:00:000", "ON"),
                line("Jul 23 10:00:03:000", "ON"),
                line("Jul 23 10:00:10:000", "OFF"),
            ],
            YEAR,
        );

        assert_eq!(result.intervals.len(), 1);
        assert_eq!(result.intervals[0].start, "Jul 23 10:00:00:000");
        assert_eq!(result.total_on_duration.to_string(), "00:00:10:000");
    }

    #[test]
    fn err_while_off_is_recorded_without_interval() {
        let result = process_lines([line("Jul 23 10:00:00:000", "ERR")], YEAR);

        assert_eq!(result.error_timestamps, vec!["Jul 23 10:00:00:000"]);
        assert!(result.intervals.is_empty());
        assert_eq!(result.total_on_duration, Elapsed::ZERO);
    }

    // The error flag compares against the canonical `ERR` token, so an
    // interval closed by ERR is flagged and one closed by OFF is not.
    #[test]
    fn interval_closed_by_err_sets_error_flag() {
        let result = process_lines(
            [
                line("Jul 23 10:00:00:000", "ON"),
                line("Jul 23 10:00:01:000", "ERR"),
                line("Jul 23 10:00:02:000", "ON"),
                line("Jul 23 10:00:04:000", "OFF"),
            ],
            YEAR,
        );

        let flags: Vec<bool> = result.intervals.iter().map(|i| i.error).collect();
        assert_eq!(flags, vec![true, false]);
        assert_eq!(result.error_timestamps, vec!["Jul 23 10:00:01:000"]);
        assert_eq!(result.total_on_duration.to_string(), "00:00:03:000");
    }

    #[test]
    fn every_err_line_is_recorded_once() {
        let result = process_lines(
            [
                line("Jul 23 10:00:00:000", "ERR"),
                line("Jul 23 10:00:01:000", "ON"),
                line("Jul 23 10:00:02:000", "ERR"),
                line("Jul 23 10:00:03:000", "ERR"),
                line("Jul 23 10:00:04:000", "OFF"),
                line("Jul 23 10:00:05:000", "ERR"),
            ],
            YEAR,
        );

        assert_eq!(
            result.error_timestamps,
            vec![
                "Jul 23 10:00:00:000",
                "Jul 23 10:00:02:000",
                "Jul 23 10:00:03:000",
                "Jul 23 10:00:05:000",
            ]
        );
        assert_eq!(result.intervals.len(), 1);
    }

    #[test]
    fn off_while_off_is_ignored() {
        let result = process_lines(
            [
                line("Jul 23 10:00:00:000", "OFF"),
                line("Jul 23 10:00:01:000", "OFF"),
            ],
            YEAR,
        );

        assert!(result.intervals.is_empty());
        assert!(result.error_timestamps.is_empty());
        assert_eq!(result.events, 2);
    }

    #[test]
    fn dangling_on_is_dropped() {
        let result = process_lines(
            [
                line("Jul 23 10:00:00:000", "ON"),
                line("Jul 23 10:00:01:000", "OFF"),
                line("Jul 23 10:00:02:000", "ON"),
            ],
            YEAR,
        );

        assert_eq!(result.intervals.len(), 1);
        assert_eq!(result.total_on_duration.to_string(), "00:00:01:000");
        assert_eq!(result.dangling_start.as_deref(), Some("Jul 23 10:00:02:000"));
    }

    #[test]
    fn intervals_accumulate_across_midnight() {
        let result = process_lines(
            [
                line("Jul 23 23:00:00:000", "ON"),
                line("Jul 24 01:00:00:250", "OFF"),
                line("Jul 24 02:00:00:000", "ON"),
                line("Jul 25 02:00:00:000", "OFF"),
            ],
            YEAR,
        );

        assert_eq!(result.total_on_duration.to_string(), "26:00:00:250");
    }

    #[test]
    fn reversed_interval_is_recorded_but_not_counted() {
        let result = process_lines(
            [
                line("Jul 23 10:00:05:000", "ON"),
                line("Jul 23 10:00:00:000", "OFF"),
                line("Jul 23 11:00:00:000", "ON"),
                line("Jul 23 11:00:02:000", "OFF"),
            ],
            YEAR,
        );

        assert_eq!(result.intervals.len(), 2);
        assert_eq!(result.intervals[0].elapsed, None);
        assert_eq!(result.total_on_duration.to_string(), "00:00:02:000");
    }

    #[test]
    fn unmeasurable_timestamp_closes_interval() {
        let mut machine = LogStateMachine::new(YEAR);
        machine.feed(LogEvent {
            timestamp: "Foo 23 10:00:00:000".to_string(),
            state: DeviceState::On,
        });
        assert!(machine.is_on());
        machine.feed(LogEvent {
            timestamp: "Jul 23 10:00:01:000".to_string(),
            state: DeviceState::Off,
        });
        assert!(!machine.is_on());

        let result = machine.finish();
        assert_eq!(result.intervals[0].elapsed, None);
        assert_eq!(result.total_on_duration, Elapsed::ZERO);
    }

    #[test]
    fn malformed_lines_do_not_affect_result() {
        let clean = process_lines(
            [line("Jul 23 10:00:00:000", "ON"), line("Jul 23 10:00:01:000", "OFF")],
            YEAR,
        );
        let noisy = process_lines(
            [
                line("Jul 23 10:00:00:000", "ON"),
                line("Jul 23 10:00:00:500", "BOOT"),
                "kernel: something unrelated".to_string(),
                line("Jul 23 10:00:01:000", "OFF"),
                line("Jul 23 10:00:02:000", "err"),
            ],
            YEAR,
        );

        assert_eq!(clean, noisy);
    }

    #[test]
    fn empty_input_yields_zero() {
        let result = process_lines(Vec::<String>::new(), YEAR);
        assert_eq!(result.total_on_duration.to_string(), "00:00:00:000");
        assert_eq!(result.events, 0);
        assert!(result.intervals.is_empty());
    }

    #[test]
    fn result_serializes_durations_as_text() {
        let result = process_lines(
            [line("Jul 23 10:00:00:000", "ON"), line("Jul 23 10:00:05:500", "ERR")],
            YEAR,
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["total_on_duration"], "00:00:05:500");
        assert_eq!(json["intervals"][0]["elapsed"], "00:00:05:500");
        assert_eq!(json["intervals"][0]["error"], true);
        assert!(json.get("dangling_start").is_none());
    }
}
