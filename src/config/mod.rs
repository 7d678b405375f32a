//! Engine configuration
//!
//! YAML configuration for the metric registry, validation tolerances and
//! ingestion policy, plus the command-line argument types.
//!
//! ```yaml
//! metrics:
//!   bleu: { polarity: higher, scale: absolute }
//! unit_rules:
//!   accuracy: percent
//! validation:
//!   scale_tolerance: 0.5
//! ingest:
//!   duplicate_policy: skip
//! ```

pub mod cli;
mod error;
mod loader;
mod schema;
pub mod validate;

pub use cli::{parse_args, Cli, Command, CompareArgs, IngestArgs, QueryArgs};
pub use error::{ConfigError, Result};
pub use loader::{load_config, parse_config};
pub use schema::{CompareSettings, EngineConfig, IngestSettings, ValidationSettings};
pub use validate::validate_config;
