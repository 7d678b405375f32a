//! Raw candidates produced by the normalizer

use super::review::ReviewFlag;
use super::types::{BenchmarkRecord, RecordStatus};
use super::value::{MetricUnit, RawValue};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// What a normalized row stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateRole {
    /// A baseline/optimized comparison
    #[default]
    Measurement,
    /// A baseline-only row in a long-layout table; its metrics are carried
    /// into the following rows of the same subject group
    BaselineReference,
}

/// A cell value plus an optional explicit unit hint
///
/// Unit hints come from the column header (`"Accuracy (%)"`) or from a
/// canonical record being re-validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateValue {
    pub raw: RawValue,
    pub unit: Option<MetricUnit>,
}

impl CandidateValue {
    pub fn new(raw: impl Into<RawValue>) -> Self {
        Self { raw: raw.into(), unit: None }
    }

    pub fn with_unit(raw: impl Into<RawValue>, unit: MetricUnit) -> Self {
        Self { raw: raw.into(), unit: Some(unit) }
    }
}

/// Uncommitted record fields, exactly as the normalizer found them
///
/// Nothing here is checked; [`Validator`](super::Validator) decides whether the
/// candidate becomes a [`BenchmarkRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCandidate {
    pub subject: Option<String>,
    pub technique_family: Option<String>,
    pub variant: Option<String>,
    pub processor: Option<String>,
    pub execution_provider: Option<String>,
    pub source_framework: Option<String>,
    pub baseline: BTreeMap<String, CandidateValue>,
    pub optimized: BTreeMap<String, CandidateValue>,
    pub reported: BTreeMap<String, CandidateValue>,
    pub pending: bool,
    pub role: CandidateRole,
    pub review_flags: BTreeSet<ReviewFlag>,
    /// Position of the source row, for batch reports
    pub row_index: Option<usize>,
}

impl RawCandidate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn technique(mut self, technique: &str) -> Self {
        self.technique_family = Some(technique.to_string());
        self
    }

    pub fn variant(mut self, variant: &str) -> Self {
        self.variant = Some(variant.to_string());
        self
    }

    pub fn processor(mut self, processor: &str) -> Self {
        self.processor = Some(processor.to_string());
        self
    }

    pub fn execution_provider(mut self, provider: &str) -> Self {
        self.execution_provider = Some(provider.to_string());
        self
    }

    pub fn framework(mut self, framework: &str) -> Self {
        self.source_framework = Some(framework.to_string());
        self
    }

    pub fn baseline(mut self, metric: &str, value: impl Into<RawValue>) -> Self {
        self.baseline.insert(metric.to_string(), CandidateValue::new(value));
        self
    }

    pub fn optimized(mut self, metric: &str, value: impl Into<RawValue>) -> Self {
        self.optimized.insert(metric.to_string(), CandidateValue::new(value));
        self
    }

    pub fn reported(mut self, metric: &str, value: impl Into<RawValue>) -> Self {
        self.reported.insert(metric.to_string(), CandidateValue::new(value));
        self
    }

    pub fn pending(mut self) -> Self {
        self.pending = true;
        self
    }

    pub fn at_row(mut self, row_index: usize) -> Self {
        self.row_index = Some(row_index);
        self
    }

    pub fn is_baseline_reference(&self) -> bool {
        self.role == CandidateRole::BaselineReference
    }
}

impl From<&BenchmarkRecord> for RawCandidate {
    /// Canonical candidate: every value is marked as a fraction so
    /// re-validation never rescales it, and prior review flags carry forward.
    fn from(record: &BenchmarkRecord) -> Self {
        let canonical = |set: &BTreeMap<String, f64>| {
            set.iter()
                .map(|(name, value)| {
                    (name.clone(), CandidateValue::with_unit(*value, MetricUnit::Fraction))
                })
                .collect::<BTreeMap<_, _>>()
        };
        let hardware = record.hardware_context.as_ref();

        Self {
            subject: Some(record.subject.clone()),
            technique_family: Some(record.technique_family.as_str().to_string()),
            variant: Some(record.variant.clone()),
            processor: hardware.and_then(|hw| hw.processor.clone()),
            execution_provider: hardware.and_then(|hw| hw.execution_provider.clone()),
            source_framework: record.source_framework.clone(),
            baseline: canonical(&record.baseline_metric),
            optimized: canonical(&record.optimized_metric),
            reported: canonical(&record.reported),
            pending: record.status == RecordStatus::Pending,
            role: CandidateRole::Measurement,
            review_flags: record.review_flags.clone(),
            row_index: None,
        }
    }
}
