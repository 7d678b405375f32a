//! Store error types

use thiserror::Error;

use super::record::RecordId;
use crate::record::RecordKey;

/// Store errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("Duplicate record: {key} is already active as {existing}")]
    DuplicateRecord { key: RecordKey, existing: RecordId },

    #[error("Record not found: {0}")]
    RecordNotFound(RecordId),

    #[error("Record {id} was already superseded by {by}")]
    AlreadySuperseded { id: RecordId, by: RecordId },

    #[error("Store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
