//! Configuration validation logic

use super::error::ValidationError;
use crate::compare::Tolerance;
use crate::config::schema::EngineConfig;
use crate::metric::{canonical_metric_name, MetricScale};

/// Validate an engine configuration
///
/// Checks:
/// - Tolerances are finite and in range
/// - Metric names are non-empty
/// - Unit rules only target registered percentage-scale metrics
pub fn validate_config(config: &EngineConfig) -> Result<(), ValidationError> {
    let validation = &config.validation;

    let scale = validation.scale_tolerance;
    if !scale.is_finite() || scale <= 0.0 || scale >= 1.0 {
        return Err(ValidationError::InvalidScaleTolerance(scale));
    }

    for (field, value) in [
        ("reported_abs_tolerance", validation.reported_abs_tolerance),
        ("reported_rel_tolerance", validation.reported_rel_tolerance),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidReportedTolerance { field, value });
        }
    }

    if config.metrics.keys().chain(config.unit_rules.keys()).any(|name| name.trim().is_empty()) {
        return Err(ValidationError::EmptyMetricName);
    }

    let registry = config.registry();
    for name in config.unit_rules.keys() {
        let metric = canonical_metric_name(name);
        if !registry.contains(&metric) {
            return Err(ValidationError::UnitRuleOnUnknownMetric(metric));
        }
        if registry.scale(&metric) == MetricScale::Absolute {
            return Err(ValidationError::UnitRuleOnAbsoluteMetric(metric));
        }
    }

    if let Some(tolerance) = config.compare.tolerance {
        let value = match tolerance {
            Tolerance::Relative(v) | Tolerance::Absolute(v) => v,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidTolerance(value));
        }
    }

    Ok(())
}
