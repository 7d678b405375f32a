//! Crate-level error type

use thiserror::Error;

use crate::compare::CompareError;
use crate::config::ConfigError;
use crate::record::ValidationError;
use crate::store::StoreError;

/// Any error produced by the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;
