//! Core CLI types - Cli, Command, and argument structs

use clap::{Args, Parser, Subcommand};
use medida_common::OutputFormat;
use std::path::PathBuf;

use super::filter::parse_filter;
use crate::compare::Tolerance;
use crate::ingest::DuplicatePolicy;
use crate::store::RecordFilter;

/// Medida: benchmark record aggregation & validation
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "medida")]
#[command(author = "PAIML")]
#[command(version)]
#[command(
    about = "Ingest, validate, deduplicate and compare model optimization benchmark results"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Engine configuration file (YAML)
    #[arg(short, long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Validate benchmark rows and report per-row outcomes
    Ingest(IngestArgs),

    /// Ingest rows, then list the records a filter matches
    Query(QueryArgs),

    /// Ingest rows, then compare two filtered record sets by subject
    Compare(CompareArgs),
}

/// Input files shared by every command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct SourceArgs {
    /// Benchmark row files (JSON)
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Duplicate handling (reject, skip, supersede); overrides the config
    #[arg(short, long)]
    pub policy: Option<DuplicatePolicy>,
}

/// Arguments for the ingest command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct IngestArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Exit with an error if any row is rejected
    #[arg(long)]
    pub strict: bool,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the query command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct QueryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Filter expression, e.g. "technique=int8,processor=SPR,metric=accuracy"
    #[arg(short = 'w', long = "filter", value_parser = parse_filter, default_value = "")]
    pub filter: RecordFilter,

    /// Summarize optimized/baseline ratios of this metric
    #[arg(short, long, value_name = "METRIC")]
    pub summarize: Option<String>,

    /// Acceptance criterion for the summary (1%, 0.01, abs:0.5)
    #[arg(short, long)]
    pub tolerance: Option<Tolerance>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the compare command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct CompareArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Left-hand filter expression
    #[arg(short, long, value_parser = parse_filter)]
    pub left: RecordFilter,

    /// Right-hand filter expression
    #[arg(short, long, value_parser = parse_filter)]
    pub right: RecordFilter,

    /// Acceptance criterion for right/left ratios (1%, 0.01, abs:0.5)
    #[arg(short, long)]
    pub tolerance: Option<Tolerance>,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
