//! Record validation logic
//!
//! Turns a [`RawCandidate`] into a canonical [`BenchmarkRecord`].

use super::candidate::{CandidateValue, RawCandidate};
use super::error::{Result, ValidationError};
use super::review::ReviewFlag;
use super::types::{
    non_blank, BenchmarkRecord, HardwareContext, MetricSet, RecordStatus, TechniqueFamily,
};
use super::value::{parse_value, MetricUnit, MetricValue};
use crate::metric::{canonical_metric_name, MetricRegistry, MetricScale};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Registered interpretation for unmarked values of one metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitRule {
    /// Unmarked values are raw percentages
    Percent,
    /// Unmarked values are already fractions
    Fraction,
}

impl UnitRule {
    fn unit(self) -> MetricUnit {
        match self {
            UnitRule::Percent => MetricUnit::Percent,
            UnitRule::Fraction => MetricUnit::Fraction,
        }
    }
}

/// Tolerances and conversion rules applied during validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Max relative disagreement for unmarked values straddling the
    /// fraction/percent boundary to be read as one scale
    pub scale_tolerance: f64,
    /// Absolute tolerance when matching a reported delta
    pub reported_abs_tolerance: f64,
    /// Relative tolerance when matching a reported delta
    pub reported_rel_tolerance: f64,
    /// Per-metric interpretation of unmarked values
    pub unit_rules: BTreeMap<String, UnitRule>,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            scale_tolerance: 0.5,
            reported_abs_tolerance: 1e-4,
            reported_rel_tolerance: 0.01,
            unit_rules: BTreeMap::new(),
        }
    }
}

impl ValidationPolicy {
    /// Register a unit rule for a metric
    pub fn with_unit_rule(mut self, metric: &str, rule: UnitRule) -> Self {
        self.unit_rules.insert(canonical_metric_name(metric), rule);
        self
    }
}

/// How a reported delta relates to the measured pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Agreement {
    Consistent,
    PercentagePoints,
    Mismatch,
}

/// Schema validator
#[derive(Debug, Clone, Default)]
pub struct Validator {
    registry: MetricRegistry,
    policy: ValidationPolicy,
}

/// Validate with the built-in metric registry and default policy
pub fn validate(raw: &RawCandidate) -> Result<BenchmarkRecord> {
    Validator::default().validate(raw)
}

impl Validator {
    pub fn new(registry: MetricRegistry, policy: ValidationPolicy) -> Self {
        Self { registry, policy }
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Validate a candidate
    ///
    /// Checks:
    /// - subject and technique family are present and recognizable
    /// - every metric cell parses to a finite number
    /// - measured candidates share a metric between baseline and optimized
    /// - percentage units are consistent, then converted to fractions
    pub fn validate(&self, raw: &RawCandidate) -> Result<BenchmarkRecord> {
        let subject =
            non_blank(raw.subject.as_deref()).ok_or(ValidationError::MissingField("subject"))?;

        let family_text = non_blank(raw.technique_family.as_deref())
            .ok_or(ValidationError::MissingField("technique_family"))?;
        let technique_family = TechniqueFamily::parse(&family_text)
            .ok_or(ValidationError::UnknownTechnique(family_text))?;

        let baseline = parse_side("baseline", &raw.baseline)?;
        let optimized = parse_side("optimized", &raw.optimized)?;

        let has_pair = baseline.keys().any(|name| optimized.contains_key(name));
        if !raw.pending && !has_pair {
            return Err(ValidationError::MissingField("metric pair"));
        }

        let mut review_flags = raw.review_flags.clone();
        let (baseline_metric, optimized_metric) =
            self.normalize_metrics(&baseline, &optimized, &mut review_flags)?;

        let reported = parse_side("reported", &raw.reported)?;
        let reported =
            self.normalize_reported(reported, &baseline_metric, &optimized_metric, &mut review_flags);

        Ok(BenchmarkRecord {
            subject,
            technique_family,
            variant: non_blank(raw.variant.as_deref()).unwrap_or_default(),
            baseline_metric,
            optimized_metric,
            hardware_context: HardwareContext::from_parts(
                raw.processor.as_deref(),
                raw.execution_provider.as_deref(),
            ),
            source_framework: non_blank(raw.source_framework.as_deref()),
            status: if raw.pending { RecordStatus::Pending } else { RecordStatus::Measured },
            reported,
            review_flags,
        })
    }

    fn normalize_metrics(
        &self,
        baseline: &BTreeMap<String, MetricValue>,
        optimized: &BTreeMap<String, MetricValue>,
        flags: &mut BTreeSet<ReviewFlag>,
    ) -> Result<(MetricSet, MetricSet)> {
        let mut baseline_out = MetricSet::new();
        let mut optimized_out = MetricSet::new();

        let names: BTreeSet<&String> = baseline.keys().chain(optimized.keys()).collect();
        for name in names {
            let (b, o) = match self.registry.scale(name) {
                MetricScale::Absolute => (
                    baseline.get(name).map(|v| absolute_value(name, v)).transpose()?,
                    optimized.get(name).map(|v| absolute_value(name, v)).transpose()?,
                ),
                MetricScale::Percentage => match (baseline.get(name), optimized.get(name)) {
                    (Some(b), Some(o)) => {
                        let (b, o) = self.percentage_pair(name, b, o, flags)?;
                        (Some(b), Some(o))
                    }
                    (b, o) => (
                        b.map(|v| self.percentage_value(name, v)).transpose()?,
                        o.map(|v| self.percentage_value(name, v)).transpose()?,
                    ),
                },
            };
            if let Some(b) = b {
                baseline_out.insert(name.clone(), b);
            }
            if let Some(o) = o {
                optimized_out.insert(name.clone(), o);
            }
        }

        Ok((baseline_out, optimized_out))
    }

    /// Marker on the cell wins, then the registered rule
    fn explicit_unit(&self, metric: &str, value: &MetricValue) -> Option<MetricUnit> {
        value.unit.or_else(|| self.policy.unit_rules.get(metric).map(|rule| rule.unit()))
    }

    fn percentage_value(&self, metric: &str, value: &MetricValue) -> Result<f64> {
        let unit = self.explicit_unit(metric, value).unwrap_or_else(|| infer_unit(value.value));
        to_fraction(metric, value.value, unit)
    }

    fn percentage_pair(
        &self,
        metric: &str,
        baseline: &MetricValue,
        optimized: &MetricValue,
        flags: &mut BTreeSet<ReviewFlag>,
    ) -> Result<(f64, f64)> {
        let (b_unit, o_unit) =
            match (self.explicit_unit(metric, baseline), self.explicit_unit(metric, optimized)) {
                (Some(b), Some(o)) => (b, o),
                (Some(b), None) => (b, infer_unit(optimized.value)),
                (None, Some(o)) => (infer_unit(baseline.value), o),
                (None, None) => {
                    let b = infer_unit(baseline.value);
                    let o = infer_unit(optimized.value);
                    if b == o {
                        (b, o)
                    } else if self.same_scale(baseline.value, optimized.value) {
                        flags.insert(ReviewFlag::AmbiguousScale { metric: metric.to_string() });
                        (MetricUnit::Percent, MetricUnit::Percent)
                    } else {
                        return Err(ValidationError::UnitMismatch {
                            metric: metric.to_string(),
                            detail: format!(
                                "baseline {} reads as a fraction and optimized {} as a percentage (or vice versa)",
                                baseline.value, optimized.value
                            ),
                        });
                    }
                }
            };

        Ok((
            to_fraction(metric, baseline.value, b_unit)?,
            to_fraction(metric, optimized.value, o_unit)?,
        ))
    }

    fn same_scale(&self, a: f64, b: f64) -> bool {
        let scale = a.abs().max(b.abs());
        scale == 0.0 || (a - b).abs() / scale <= self.policy.scale_tolerance
    }

    fn normalize_reported(
        &self,
        reported: BTreeMap<String, MetricValue>,
        baseline: &MetricSet,
        optimized: &MetricSet,
        flags: &mut BTreeSet<ReviewFlag>,
    ) -> MetricSet {
        let mut out = MetricSet::new();

        for (metric, value) in reported {
            let readings = match value.unit {
                Some(MetricUnit::Percent) => vec![value.value / 100.0],
                Some(MetricUnit::Fraction | MetricUnit::Ratio) => vec![value.value],
                None => vec![value.value, value.value / 100.0],
            };

            let stored = match (baseline.get(&metric), optimized.get(&metric)) {
                (Some(&b), Some(&o)) => {
                    let (stored, agreement) = self.match_reported(b, o, &readings);
                    match agreement {
                        Agreement::Consistent => {}
                        Agreement::PercentagePoints => {
                            flags.insert(ReviewFlag::DeltaSemantics { metric: metric.clone() });
                        }
                        Agreement::Mismatch => {
                            flags.insert(ReviewFlag::ReportedDeltaMismatch {
                                metric: metric.clone(),
                            });
                        }
                    }
                    stored
                }
                _ => readings[0],
            };
            out.insert(metric, stored);
        }

        out
    }

    /// Best agreement over all readings of a reported value
    fn match_reported(&self, baseline: f64, optimized: f64, readings: &[f64]) -> (f64, Agreement) {
        let mut best = (readings[0], Agreement::Mismatch);

        for &reading in readings {
            let agreement = if baseline != 0.0
                && (self.close(reading, (optimized - baseline) / baseline)
                    || self.close(reading, optimized / baseline))
            {
                Agreement::Consistent
            } else if self.close(reading, optimized - baseline) {
                Agreement::PercentagePoints
            } else {
                Agreement::Mismatch
            };

            if agreement < best.1 {
                best = (reading, agreement);
            }
        }

        best
    }

    fn close(&self, actual: f64, expected: f64) -> bool {
        (actual - expected).abs()
            <= self.policy.reported_abs_tolerance
                + self.policy.reported_rel_tolerance * expected.abs()
    }
}

fn parse_side(
    side: &str,
    cells: &BTreeMap<String, CandidateValue>,
) -> Result<BTreeMap<String, MetricValue>> {
    let mut parsed = BTreeMap::new();

    for (raw_name, cell) in cells {
        let name = canonical_metric_name(raw_name);
        let field = format!("{side}.{name}");

        let value = match parse_value(&cell.raw) {
            Ok(Some(value)) => value,
            Ok(None) => continue,
            Err(text) => return Err(ValidationError::MalformedValue { field, value: text }),
        };
        if !value.value.is_finite() {
            return Err(ValidationError::NonFiniteValue { field, value: value.value });
        }

        let unit = value.unit.or(cell.unit);
        if parsed.insert(name.clone(), MetricValue::new(value.value, unit)).is_some() {
            return Err(ValidationError::DuplicateMetric(name));
        }
    }

    Ok(parsed)
}

fn infer_unit(value: f64) -> MetricUnit {
    if value.abs() > 1.0 {
        MetricUnit::Percent
    } else {
        MetricUnit::Fraction
    }
}

fn to_fraction(metric: &str, value: f64, unit: MetricUnit) -> Result<f64> {
    match unit {
        MetricUnit::Percent => Ok(value / 100.0),
        MetricUnit::Fraction => Ok(value),
        MetricUnit::Ratio => Err(ValidationError::UnitMismatch {
            metric: metric.to_string(),
            detail: format!("ratio marker on measured value {value}x"),
        }),
    }
}

fn absolute_value(metric: &str, value: &MetricValue) -> Result<f64> {
    match value.unit {
        Some(MetricUnit::Percent) => Err(ValidationError::UnitMismatch {
            metric: metric.to_string(),
            detail: format!("percentage marker on absolute metric value {}%", value.value),
        }),
        Some(MetricUnit::Ratio) => Err(ValidationError::UnitMismatch {
            metric: metric.to_string(),
            detail: format!("ratio marker on measured value {}x", value.value),
        }),
        _ => Ok(value.value),
    }
}
