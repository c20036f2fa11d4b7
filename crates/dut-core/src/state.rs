//! Device state tokens as the single source of truth for state strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// State reported by a `dut: Device State:` log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceState {
    On,
    Off,
    #[serde(rename = "ERR")]
    Error,
}

impl DeviceState {
    /// The canonical token as it appears in the log.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Error => "ERR",
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceState {
    type Err = UnknownDeviceState;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ON" => Ok(Self::On),
            "OFF" => Ok(Self::Off),
            "ERR" => Ok(Self::Error),
            _ => Err(UnknownDeviceState(s.to_string())),
        }
    }
}

/// Error type for unknown device state tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown device state: {0}")]
pub struct UnknownDeviceState(String);
