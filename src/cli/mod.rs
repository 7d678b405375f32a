//! CLI module for medida
//!
//! This module contains all CLI command handlers and utilities.

mod commands;
mod error;
mod logging;

pub use commands::run_command;
pub use logging::{init_tracing, LogLevel};

// Re-export Cli from config for convenience
pub use crate::config::Cli;
