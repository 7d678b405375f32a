//! Comparison error types

use thiserror::Error;

use crate::store::StoreError;

/// Comparison errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompareError {
    #[error("No polarity registered for metric: {0}")]
    UnknownMetricPolarity(String),

    #[error("Metric {metric} not reported on both sides for {subject}")]
    MetricNotFound { metric: String, subject: String },

    #[error("Baseline of {metric} is zero for {subject}; ratio undefined")]
    ZeroBaseline { metric: String, subject: String },

    #[error("Record for {0} is pending; no measured values to compare")]
    PendingRecord(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CompareError {
    pub fn kind(&self) -> &'static str {
        match self {
            CompareError::UnknownMetricPolarity(_) => "unknown_metric_polarity",
            CompareError::MetricNotFound { .. } => "metric_not_found",
            CompareError::ZeroBaseline { .. } => "zero_baseline",
            CompareError::PendingRecord(_) => "pending_record",
            CompareError::Store(_) => "store",
        }
    }
}

/// Result type for comparison operations
pub type Result<T> = std::result::Result<T, CompareError>;
