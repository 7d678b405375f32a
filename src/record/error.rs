//! Validation error types
//!
//! Every way a raw candidate can fail to become a canonical record.

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Unknown technique family: {0} (must be one of: quantization, pruning, distillation)")]
    UnknownTechnique(String),

    #[error("Malformed value for {field}: {value:?}")]
    MalformedValue { field: String, value: String },

    #[error("Non-finite value for {field}: {value}")]
    NonFiniteValue { field: String, value: f64 },

    #[error("Metric {0} appears more than once on the same side")]
    DuplicateMetric(String),

    #[error("Unit mismatch for {metric}: {detail}")]
    UnitMismatch { metric: String, detail: String },
}

impl ValidationError {
    /// Short machine-readable kind, used in batch reports
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingField(_) => "missing_field",
            ValidationError::UnknownTechnique(_) => "unknown_technique",
            ValidationError::MalformedValue { .. } => "malformed_value",
            ValidationError::NonFiniteValue { .. } => "non_finite_value",
            ValidationError::DuplicateMetric(_) => "duplicate_metric",
            ValidationError::UnitMismatch { .. } => "unit_mismatch",
        }
    }
}

/// Result alias for validation
pub type Result<T> = std::result::Result<T, ValidationError>;
