//! Core domain logic for device state log analysis.
//!
//! This crate contains the fundamental types and logic for:
//! - Codec: the calendar timestamp and elapsed duration text shapes
//! - Arithmetic: timestamp differences and exact duration sums
//! - Extraction: turning raw log lines into device state events
//! - State machine: on-time, error list and interval audit for one log
//! - Days: fractional day counts for reporting

pub mod arithmetic;
pub mod codec;
mod days;
pub mod extract;
mod machine;
mod state;

pub use arithmetic::{add, elapsed_between, subtract};
pub use codec::{Elapsed, InvalidElapsed, format_elapsed, parse_calendar, parse_elapsed};
pub use days::to_days;
pub use extract::{LogEvent, extract};
pub use machine::{IntervalRecord, LogStateMachine, RunResult, process_lines};
pub use state::{DeviceState, UnknownDeviceState};
