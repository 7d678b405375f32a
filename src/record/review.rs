//! Review flags attached to accepted records

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason an accepted record needs a human to look at it
///
/// Flags never block ingestion; the validator records them instead of
/// guessing when the source row is ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "flag", rename_all = "snake_case")]
pub enum ReviewFlag {
    /// Unmarked values sat on both sides of the fraction/percent boundary
    AmbiguousScale { metric: String },
    /// Reported delta matches a percentage-point difference, not a ratio
    DeltaSemantics { metric: String },
    /// Reported delta matches no interpretation of the measured values
    ReportedDeltaMismatch { metric: String },
}

impl ReviewFlag {
    pub fn metric(&self) -> &str {
        match self {
            ReviewFlag::AmbiguousScale { metric }
            | ReviewFlag::DeltaSemantics { metric }
            | ReviewFlag::ReportedDeltaMismatch { metric } => metric,
        }
    }
}

impl fmt::Display for ReviewFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewFlag::AmbiguousScale { metric } => {
                write!(f, "{metric}: fraction/percent scale inferred from magnitude")
            }
            ReviewFlag::DeltaSemantics { metric } => {
                write!(f, "{metric}: reported delta reads as percentage points, not a ratio")
            }
            ReviewFlag::ReportedDeltaMismatch { metric } => {
                write!(f, "{metric}: reported delta disagrees with measured values")
            }
        }
    }
}
