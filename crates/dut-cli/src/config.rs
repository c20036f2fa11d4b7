//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Calendar year assumed for year-less log timestamps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Emit JSON reports by default.
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (DUT_*)
        figment = figment.merge(Env::prefixed("DUT_"));

        figment.extract()
    }

    /// Picks the year to read timestamps in: flag, then config, then today.
    pub fn resolve_year(&self, flag: Option<i32>) -> i32 {
        flag.or(self.year).unwrap_or_else(|| Local::now().year())
    }
}

/// Returns the platform-specific config directory for dut.
///
/// On Linux: `~/.config/dut`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("dut"))
}
