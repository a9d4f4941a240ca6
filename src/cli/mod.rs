//! Command-line interface handlers

pub mod commands;

pub use commands::{AppState, CliResult};
