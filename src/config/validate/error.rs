//! Validation error types
//!
//! Defines all validation error variants for engine configuration.

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid scale tolerance: {0} (must be > 0.0 and < 1.0)")]
    InvalidScaleTolerance(f64),

    #[error("Invalid {field}: {value} (must be finite and >= 0.0)")]
    InvalidReportedTolerance { field: &'static str, value: f64 },

    #[error("Metric names cannot be empty")]
    EmptyMetricName,

    #[error("Unit rule for {0} conflicts with its absolute scale")]
    UnitRuleOnAbsoluteMetric(String),

    #[error("Unit rule for unknown metric: {0}")]
    UnitRuleOnUnknownMetric(String),

    #[error("Invalid comparison tolerance: {0} (must be finite and >= 0.0)")]
    InvalidTolerance(f64),
}

impl ValidationError {
    /// Config field the error points at
    pub fn field(&self) -> String {
        match self {
            ValidationError::InvalidScaleTolerance(_) => "validation.scale_tolerance".into(),
            ValidationError::InvalidReportedTolerance { field, .. } => format!("validation.{field}"),
            ValidationError::EmptyMetricName => "metrics".into(),
            ValidationError::UnitRuleOnAbsoluteMetric(metric)
            | ValidationError::UnitRuleOnUnknownMetric(metric) => format!("unit_rules.{metric}"),
            ValidationError::InvalidTolerance(_) => "compare.tolerance".into(),
        }
    }

    /// How to fix it
    pub fn suggestion(&self) -> &'static str {
        match self {
            ValidationError::InvalidScaleTolerance(_) => "Use a value like 0.5",
            ValidationError::InvalidReportedTolerance { .. } => "Use a small value like 0.0001",
            ValidationError::EmptyMetricName => "Remove the blank entry under 'metrics:'",
            ValidationError::UnitRuleOnAbsoluteMetric(_) => {
                "Register the metric with 'scale: percentage' or drop the unit rule"
            }
            ValidationError::UnitRuleOnUnknownMetric(_) => {
                "Register the metric under 'metrics:' with 'scale: percentage'"
            }
            ValidationError::InvalidTolerance(_) => "Use a value like { type: relative, value: 0.01 }",
        }
    }
}
