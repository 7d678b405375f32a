//! Stored record handles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::record::BenchmarkRecord;

/// Store-assigned record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec-{}", self.0)
    }
}

impl std::str::FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("rec-").unwrap_or(s);
        digits
            .parse::<u64>()
            .map(RecordId)
            .map_err(|_| format!("Invalid record id: {s}. Expected rec-<n>"))
    }
}

/// Which records a lookup may return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Only records that have not been superseded
    #[default]
    Active,
    /// Every record ever accepted
    History,
}

/// A record as held by the store
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredRecord {
    pub id: RecordId,
    pub record: Arc<BenchmarkRecord>,
    pub inserted_at: DateTime<Utc>,
    pub superseded_by: Option<RecordId>,
}

impl StoredRecord {
    pub fn is_active(&self) -> bool {
        self.superseded_by.is_none()
    }

    pub fn in_scope(&self, scope: Scope) -> bool {
        match scope {
            Scope::Active => self.is_active(),
            Scope::History => true,
        }
    }
}

/// Audit entry for a supersede
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupersedeEvent {
    /// Record taken out of the active set
    pub old: RecordId,
    /// Record that replaced it
    pub new: RecordId,
    /// Timestamp
    pub at: DateTime<Utc>,
    /// Reason for the correction
    pub reason: Option<String>,
}
