//! CLI library components for the TBX to spreadsheet converter.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod prompt;
