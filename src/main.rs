//! Medida CLI
//!
//! Validate, deduplicate and compare benchmark rows exported from result tables.
//!
//! # Usage
//!
//! ```bash
//! # Validate rows and show per-row outcomes
//! medida ingest results.json
//!
//! # Fail the run if any row is rejected
//! medida ingest results.json --strict --format json
//!
//! # List INT8 records on SPR and summarize accuracy ratios
//! medida query results.json -w "technique=int8,processor=SPR" --summarize accuracy
//!
//! # Compare two record sets by subject
//! medida compare results.json -l "variant=static" -r "variant=dynamic" -t 1%
//! ```

use clap::Parser;
use medida::cli::{init_tracing, run_command, Cli, LogLevel};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(LogLevel::from_flags(cli.quiet, cli.verbose));

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error [{}]: {e}", e.code());
            ExitCode::FAILURE
        }
    }
}
