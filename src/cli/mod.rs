//! CLI command handlers

pub mod commands;

pub use commands::{detail, locations, low_traffic, report, show_config, usage, volte};
