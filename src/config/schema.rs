//! Engine configuration schema

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::compare::{ComparisonEngine, Tolerance};
use crate::ingest::DuplicatePolicy;
use crate::metric::{canonical_metric_name, MetricRegistry, MetricSpec};
use crate::record::{UnitRule, ValidationPolicy, Validator};

/// Top-level engine configuration (YAML)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Metric registry entries; extend or override the built-ins
    pub metrics: BTreeMap<String, MetricSpec>,

    /// Interpretation of unmarked percentage-metric values
    pub unit_rules: BTreeMap<String, UnitRule>,

    /// Validator tolerances
    pub validation: ValidationSettings,

    /// Batch ingestion settings
    pub ingest: IngestSettings,

    /// Comparison settings
    pub compare: CompareSettings,
}

/// Validator tolerances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationSettings {
    pub scale_tolerance: f64,
    pub reported_abs_tolerance: f64,
    pub reported_rel_tolerance: f64,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        let policy = ValidationPolicy::default();
        Self {
            scale_tolerance: policy.scale_tolerance,
            reported_abs_tolerance: policy.reported_abs_tolerance,
            reported_rel_tolerance: policy.reported_rel_tolerance,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestSettings {
    pub duplicate_policy: DuplicatePolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareSettings {
    /// Acceptance criterion applied to ratios in reports
    pub tolerance: Option<Tolerance>,
}

impl EngineConfig {
    /// Built-in registry with this config's entries applied
    pub fn registry(&self) -> MetricRegistry {
        let mut registry = MetricRegistry::default();
        for (name, spec) in &self.metrics {
            registry.register(name, *spec);
        }
        registry
    }

    pub fn policy(&self) -> ValidationPolicy {
        ValidationPolicy {
            scale_tolerance: self.validation.scale_tolerance,
            reported_abs_tolerance: self.validation.reported_abs_tolerance,
            reported_rel_tolerance: self.validation.reported_rel_tolerance,
            unit_rules: self
                .unit_rules
                .iter()
                .map(|(name, rule)| (canonical_metric_name(name), *rule))
                .collect(),
        }
    }

    pub fn validator(&self) -> Validator {
        Validator::new(self.registry(), self.policy())
    }

    pub fn engine(&self) -> ComparisonEngine {
        ComparisonEngine::new(self.registry())
    }
}
