//! CLI command implementations

mod compare;
mod ingest;
mod input;
mod output;
mod query;


use medida_common::Result;

use crate::cli::LogLevel;
use crate::config::{load_config, Cli, Command, EngineConfig};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<()> {
    let log_level = LogLevel::from_flags(cli.quiet, cli.verbose);

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Command::Ingest(args) => ingest::run_ingest(args, &config, log_level),
        Command::Query(args) => query::run_query(args, &config, log_level),
        Command::Compare(args) => compare::run_compare(args, &config, log_level),
    }
}
