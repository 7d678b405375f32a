//! Canonical record types

use super::review::ReviewFlag;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Metric name → value, ordered by name
pub type MetricSet = BTreeMap<String, f64>;

/// Model compression technique family
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechniqueFamily {
    Quantization,
    Pruning,
    Distillation,
}

impl TechniqueFamily {
    /// Recognize a technique family from free-form source text.
    ///
    /// Accepts family names as well as the technique labels source tables
    /// use in their place (`INT8`, `WOQ`, `SmoothQuant`, `sparsity`, `KD`).
    pub fn parse(text: &str) -> Option<Self> {
        let lowered = text.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        if lowered.contains("distil") || lowered == "kd" {
            return Some(TechniqueFamily::Distillation);
        }
        if lowered.contains("prun") || lowered.contains("spars") {
            return Some(TechniqueFamily::Pruning);
        }
        const QUANT_LABELS: &[&str] =
            &["ptq", "qat", "woq", "sq", "gptq", "awq", "rtn", "int8", "int4", "fp8", "teq"];
        if lowered.contains("quant") || QUANT_LABELS.contains(&lowered.as_str()) {
            return Some(TechniqueFamily::Quantization);
        }
        None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TechniqueFamily::Quantization => "quantization",
            TechniqueFamily::Pruning => "pruning",
            TechniqueFamily::Distillation => "distillation",
        }
    }
}

impl fmt::Display for TechniqueFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TechniqueFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("Unknown technique family: {s}. Valid families: quantization, pruning, distillation")
        })
    }
}

/// Hardware the measurement ran on
///
/// An absent context means the default/unspecified hardware.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HardwareContext {
    /// Processor family (e.g. "SPR", "ICX", "A100")
    pub processor: Option<String>,
    /// Execution provider (e.g. "CPUExecutionProvider")
    pub execution_provider: Option<String>,
}

impl HardwareContext {
    /// Build a context, returning `None` when both parts are blank
    pub fn from_parts(processor: Option<&str>, execution_provider: Option<&str>) -> Option<Self> {
        let processor = non_blank(processor);
        let execution_provider = non_blank(execution_provider);
        if processor.is_none() && execution_provider.is_none() {
            None
        } else {
            Some(Self { processor, execution_provider })
        }
    }

    /// Context with only a processor family
    pub fn processor(processor: &str) -> Option<Self> {
        Self::from_parts(Some(processor), None)
    }
}

impl fmt::Display for HardwareContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.processor, &self.execution_provider) {
            (Some(p), Some(ep)) => write!(f, "{p}/{ep}"),
            (Some(p), None) => write!(f, "{p}"),
            (None, Some(ep)) => write!(f, "{ep}"),
            (None, None) => write!(f, "default"),
        }
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(ToString::to_string)
}

/// Publication status of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Numbers were measured and published
    #[default]
    Measured,
    /// Work in progress; metrics may be incomplete
    Pending,
}

/// Identity of a record: at most one active record per key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub subject: String,
    pub technique_family: TechniqueFamily,
    pub variant: String,
    pub hardware_context: Option<HardwareContext>,
}

impl RecordKey {
    pub fn new(
        subject: impl Into<String>,
        technique_family: TechniqueFamily,
        variant: impl Into<String>,
        hardware_context: Option<HardwareContext>,
    ) -> Self {
        Self {
            subject: subject.into(),
            technique_family,
            variant: variant.into(),
            hardware_context,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}", self.subject, self.technique_family)?;
        if !self.variant.is_empty() {
            write!(f, " {}", self.variant)?;
        }
        match &self.hardware_context {
            Some(hw) => write!(f, " @ {hw}]"),
            None => write!(f, "]"),
        }
    }
}

/// One canonical benchmark observation
///
/// Only the validator constructs records, so every instance satisfies the
/// schema invariants. There is no mutable access; corrections are new records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRecord {
    pub(super) subject: String,
    pub(super) technique_family: TechniqueFamily,
    pub(super) variant: String,
    pub(super) baseline_metric: MetricSet,
    pub(super) optimized_metric: MetricSet,
    pub(super) hardware_context: Option<HardwareContext>,
    pub(super) source_framework: Option<String>,
    pub(super) status: RecordStatus,
    pub(super) reported: MetricSet,
    pub(super) review_flags: BTreeSet<ReviewFlag>,
}

impl BenchmarkRecord {
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn technique_family(&self) -> TechniqueFamily {
        self.technique_family
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    pub fn baseline_metric(&self) -> &MetricSet {
        &self.baseline_metric
    }

    pub fn optimized_metric(&self) -> &MetricSet {
        &self.optimized_metric
    }

    pub fn hardware_context(&self) -> Option<&HardwareContext> {
        self.hardware_context.as_ref()
    }

    pub fn source_framework(&self) -> Option<&str> {
        self.source_framework.as_deref()
    }

    pub fn status(&self) -> RecordStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == RecordStatus::Pending
    }

    /// Deltas the source reported, in canonical units
    pub fn reported(&self) -> &MetricSet {
        &self.reported
    }

    pub fn review_flags(&self) -> &BTreeSet<ReviewFlag> {
        &self.review_flags
    }

    pub fn needs_review(&self) -> bool {
        !self.review_flags.is_empty()
    }

    /// Metric names present on both sides
    pub fn common_metrics(&self) -> impl Iterator<Item = &str> {
        self.baseline_metric
            .keys()
            .filter(|name| self.optimized_metric.contains_key(*name))
            .map(String::as_str)
    }

    /// Baseline and optimized values of one metric
    pub fn metric_pair(&self, name: &str) -> Option<(f64, f64)> {
        Some((*self.baseline_metric.get(name)?, *self.optimized_metric.get(name)?))
    }

    /// Deduplication key
    pub fn key(&self) -> RecordKey {
        RecordKey {
            subject: self.subject.clone(),
            technique_family: self.technique_family,
            variant: self.variant.clone(),
            hardware_context: self.hardware_context.clone(),
        }
    }
}
