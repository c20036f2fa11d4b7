//! Device state log analyzer CLI library.
//!
//! This crate provides the command-line shell around `dut-core`.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands};
pub use config::Config;
