//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! medida ingest rows.json
//! medida ingest rows.json --policy supersede --format json
//! medida query rows.json --filter "technique=int8,processor=SPR" --summarize accuracy
//! medida compare rows.json --left "processor=ICX" --right "processor=SPR"
//! ```

mod core;
mod filter;

#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod tests;

pub use self::core::{parse_args, Cli, Command, CompareArgs, IngestArgs, QueryArgs, SourceArgs};
pub use filter::parse_filter;
