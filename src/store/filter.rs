//! Record filters

use serde::{Deserialize, Serialize};

use super::record::Scope;
use crate::record::{BenchmarkRecord, HardwareContext, RecordStatus, TechniqueFamily};

/// Hardware constraint of a filter
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HardwareSelector {
    /// No constraint
    #[default]
    Any,
    /// Only records without a hardware context
    Default,
    /// Exactly this context
    Exact(HardwareContext),
    /// Contexts carrying every part set here; unset parts match anything
    Partial(HardwareContext),
}

impl HardwareSelector {
    pub fn matches(&self, hardware: Option<&HardwareContext>) -> bool {
        match self {
            HardwareSelector::Any => true,
            HardwareSelector::Default => hardware.is_none(),
            HardwareSelector::Exact(expected) => hardware == Some(expected),
            HardwareSelector::Partial(wanted) => hardware.is_some_and(|hw| {
                part_matches(wanted.processor.as_deref(), hw.processor.as_deref())
                    && part_matches(wanted.execution_provider.as_deref(), hw.execution_provider.as_deref())
            }),
        }
    }

    /// The context an index lookup should use, when the selector pins one
    pub(crate) fn pinned(&self) -> Option<Option<&HardwareContext>> {
        match self {
            HardwareSelector::Any | HardwareSelector::Partial(_) => None,
            HardwareSelector::Default => Some(None),
            HardwareSelector::Exact(hw) => Some(Some(hw)),
        }
    }
}

fn part_matches(wanted: Option<&str>, actual: Option<&str>) -> bool {
    wanted.is_none_or(|w| actual.is_some_and(|a| a.eq_ignore_ascii_case(w)))
}

/// Conjunction of predicates over records
///
/// Every `None` field matches all records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    pub subject: Option<String>,
    pub technique_family: Option<TechniqueFamily>,
    pub variant: Option<String>,
    pub hardware: HardwareSelector,
    pub source_framework: Option<String>,
    pub status: Option<RecordStatus>,
    /// Only records reporting this metric on both sides
    pub metric: Option<String>,
    pub scope: Scope,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(mut self, subject: &str) -> Self {
        self.subject = Some(subject.to_string());
        self
    }

    pub fn technique(mut self, family: TechniqueFamily) -> Self {
        self.technique_family = Some(family);
        self
    }

    pub fn variant(mut self, variant: &str) -> Self {
        self.variant = Some(variant.to_string());
        self
    }

    pub fn hardware(mut self, hardware: HardwareSelector) -> Self {
        self.hardware = hardware;
        self
    }

    pub fn framework(mut self, framework: &str) -> Self {
        self.source_framework = Some(framework.to_string());
        self
    }

    pub fn status(mut self, status: RecordStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn metric(mut self, metric: &str) -> Self {
        self.metric = Some(crate::metric::canonical_metric_name(metric));
        self
    }

    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Predicate check, ignoring scope
    pub fn matches(&self, record: &BenchmarkRecord) -> bool {
        self.subject.as_deref().is_none_or(|s| record.subject() == s)
            && self.technique_family.is_none_or(|f| record.technique_family() == f)
            && self.variant.as_deref().is_none_or(|v| record.variant() == v)
            && self.hardware.matches(record.hardware_context())
            && self
                .source_framework
                .as_deref()
                .is_none_or(|fw| record.source_framework().is_some_and(|r| r.eq_ignore_ascii_case(fw)))
            && self.status.is_none_or(|s| record.status() == s)
            && self.metric.as_deref().is_none_or(|m| record.metric_pair(m).is_some())
    }
}
