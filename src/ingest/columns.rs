//! Column mapping
//!
//! A [`ColumnMap`] tells the normalizer what each source column means. Maps
//! are either spelled out by the caller or inferred from header names.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::metric::{canonical_metric_name, MetricRegistry};
use crate::record::{MetricUnit, RawValue};

/// One source row: column name -> cell
pub type RawRow = BTreeMap<String, RawValue>;

/// Meaning of a source column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Field {
    Subject,
    TechniqueFamily,
    Variant,
    Processor,
    ExecutionProvider,
    SourceFramework,
    Status,
    /// Baseline value of a metric (wide layout)
    Baseline(String),
    /// Optimized value of a metric (wide layout)
    Optimized(String),
    /// Delta or ratio the source reported
    Reported(String),
    /// Metric value whose side depends on the row's variant (long layout)
    Value(String),
    Ignore,
}

impl Field {
    pub fn metric(&self) -> Option<&str> {
        match self {
            Field::Baseline(m) | Field::Optimized(m) | Field::Reported(m) | Field::Value(m) => {
                Some(m)
            }
            _ => None,
        }
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    /// Parse `subject`, `variant`, ... or `baseline:<metric>`, `value:<metric>`, ...
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if let Some((role, metric)) = lowered.split_once(':') {
            let metric = canonical_metric_name(metric);
            if metric.is_empty() {
                return Err(format!("Missing metric name in column field: {s}"));
            }
            return match role.trim() {
                "baseline" => Ok(Field::Baseline(metric)),
                "optimized" => Ok(Field::Optimized(metric)),
                "reported" => Ok(Field::Reported(metric)),
                "value" => Ok(Field::Value(metric)),
                other => Err(format!(
                    "Unknown metric role: {other}. Valid roles: baseline, optimized, reported, value"
                )),
            };
        }

        match lowered.as_str() {
            "subject" | "model" => Ok(Field::Subject),
            "technique_family" | "technique" | "family" => Ok(Field::TechniqueFamily),
            "variant" => Ok(Field::Variant),
            "processor" => Ok(Field::Processor),
            "execution_provider" | "provider" => Ok(Field::ExecutionProvider),
            "source_framework" | "framework" => Ok(Field::SourceFramework),
            "status" => Ok(Field::Status),
            "ignore" => Ok(Field::Ignore),
            _ => Err(format!("Unknown column field: {s}")),
        }
    }
}

impl TryFrom<String> for Field {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Field> for String {
    fn from(field: Field) -> Self {
        field.to_string()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Subject => write!(f, "subject"),
            Field::TechniqueFamily => write!(f, "technique_family"),
            Field::Variant => write!(f, "variant"),
            Field::Processor => write!(f, "processor"),
            Field::ExecutionProvider => write!(f, "execution_provider"),
            Field::SourceFramework => write!(f, "source_framework"),
            Field::Status => write!(f, "status"),
            Field::Baseline(m) => write!(f, "baseline:{m}"),
            Field::Optimized(m) => write!(f, "optimized:{m}"),
            Field::Reported(m) => write!(f, "reported:{m}"),
            Field::Value(m) => write!(f, "value:{m}"),
            Field::Ignore => write!(f, "ignore"),
        }
    }
}

/// Values applied to every row of a table unless a column overrides them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableDefaults {
    pub technique_family: Option<String>,
    pub variant: Option<String>,
    pub processor: Option<String>,
    pub execution_provider: Option<String>,
    pub source_framework: Option<String>,
}

/// Variants treated as the reference side in long-layout tables
pub const DEFAULT_BASELINE_VARIANTS: &[&str] = &["fp32", "bf16", "fp16", "baseline", "dense"];

const SUBJECT_WORDS: &[&str] = &["model", "models", "subject", "network", "topology", "name"];
const FAMILY_WORDS: &[&str] = &["technique", "family", "method", "approach"];
const VARIANT_WORDS: &[&str] =
    &["variant", "config", "configuration", "recipe", "scheme", "precision", "dtype", "mode"];
const PROCESSOR_WORDS: &[&str] = &["processor", "cpu", "hardware", "platform", "device"];
const PROVIDER_WORDS: &[&str] = &["provider", "ep"];
const FRAMEWORK_WORDS: &[&str] = &["framework", "backend"];
const STATUS_WORDS: &[&str] = &["status", "state"];

const BASELINE_TAGS: &[&str] =
    &["fp32", "bf16", "fp16", "baseline", "dense", "teacher", "base", "original", "reference"];
const OPTIMIZED_TAGS: &[&str] = &[
    "int8", "int4", "woq", "gptq", "rtn", "awq", "sq", "pruned", "sparse", "student",
    "optimized", "quantized", "tuned",
];
const REPORTED_TAGS: &[&str] =
    &["ratio", "drop", "delta", "change", "diff", "difference", "gain", "speedup"];

/// How the columns of one table map onto record fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub columns: BTreeMap<String, Field>,
    /// Explicit unit per column, e.g. from an `Accuracy (%)` header
    pub units: BTreeMap<String, MetricUnit>,
    pub defaults: TableDefaults,
    /// Lower-cased variant labels that mark baseline rows in long layout
    pub baseline_variants: BTreeSet<String>,
}

impl ColumnMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a column explicitly
    pub fn with_column(mut self, column: &str, field: Field) -> Self {
        self.columns.insert(column.to_string(), field);
        self
    }

    pub fn with_unit(mut self, column: &str, unit: MetricUnit) -> Self {
        self.units.insert(column.to_string(), unit);
        self
    }

    pub fn with_defaults(mut self, defaults: TableDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_baseline_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.baseline_variants =
            variants.into_iter().map(|v| v.as_ref().trim().to_lowercase()).collect();
        self
    }

    /// Field for a column; unmapped columns are ignored
    pub fn field(&self, column: &str) -> &Field {
        self.columns.get(column).unwrap_or(&Field::Ignore)
    }

    pub fn unit(&self, column: &str) -> Option<MetricUnit> {
        self.units.get(column).copied()
    }

    /// One row per variant, with `value:<metric>` columns
    pub fn is_long_layout(&self) -> bool {
        self.columns.values().any(|f| matches!(f, Field::Value(_)))
    }

    pub fn is_baseline_variant(&self, variant: &str) -> bool {
        self.baseline_variants.contains(&variant.trim().to_lowercase())
    }

    /// Infer a map from header names with the built-in metric registry
    pub fn infer<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::infer_with(columns, &MetricRegistry::default())
    }

    /// Infer a map from header names
    ///
    /// Headers naming a side (`FP32 Accuracy`, `INT8 Accuracy`) or a delta
    /// (`Accuracy Ratio`) map to that role for any metric. Untagged headers
    /// become long-layout [`Field::Value`] columns only for metrics the
    /// registry knows; everything else is ignored.
    pub fn infer_with<I, S>(columns: I, registry: &MetricRegistry) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::new();

        for column in columns {
            let column = column.as_ref();
            let (field, unit) = infer_field(column, registry);
            if let Some(unit) = unit {
                map.units.insert(column.to_string(), unit);
            }
            map.columns.insert(column.to_string(), field);
        }

        if map.is_long_layout() {
            map = map.with_baseline_variants(DEFAULT_BASELINE_VARIANTS);
        }

        map
    }
}

fn infer_field(header: &str, registry: &MetricRegistry) -> (Field, Option<MetricUnit>) {
    let lowered = header.to_lowercase();
    let unit = lowered.contains('%').then_some(MetricUnit::Percent);

    let tokens: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric() && c != '@')
        .filter(|t| !t.is_empty())
        .collect();
    let Some(first) = tokens.first() else {
        return (Field::Ignore, None);
    };

    let has = |words: &[&str]| tokens.iter().any(|t| words.contains(t));
    let context = if has(PROVIDER_WORDS) {
        Some(Field::ExecutionProvider)
    } else if has(PROCESSOR_WORDS) {
        Some(Field::Processor)
    } else if has(FRAMEWORK_WORDS) {
        Some(Field::SourceFramework)
    } else if has(FAMILY_WORDS) {
        Some(Field::TechniqueFamily)
    } else if has(VARIANT_WORDS) {
        Some(Field::Variant)
    } else if has(STATUS_WORDS) {
        Some(Field::Status)
    } else if SUBJECT_WORDS.contains(first) {
        Some(Field::Subject)
    } else {
        None
    };
    if let Some(field) = context {
        return (field, None);
    }

    let is_tag = |t: &&str| {
        BASELINE_TAGS.contains(t) || OPTIMIZED_TAGS.contains(t) || REPORTED_TAGS.contains(t)
    };
    let metric_tokens: Vec<&str> = tokens.iter().copied().filter(|t| !is_tag(t)).collect();
    if metric_tokens.is_empty() {
        return (Field::Ignore, None);
    }
    let metric = canonical_metric_name(&metric_tokens.join("_"));

    let field = if has(REPORTED_TAGS) {
        Field::Reported(metric)
    } else if has(BASELINE_TAGS) {
        Field::Baseline(metric)
    } else if has(OPTIMIZED_TAGS) {
        Field::Optimized(metric)
    } else if registry.contains(&metric) {
        Field::Value(metric)
    } else {
        return (Field::Ignore, None);
    };

    (field, unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_wide_table() {
        let map = ColumnMap::infer([
            "Model",
            "Framework",
            "FP32 Accuracy",
            "INT8 Accuracy",
            "Accuracy Ratio",
            "Perf Ratio",
            "Notes",
        ]);

        assert_eq!(map.field("Model"), &Field::Subject);
        assert_eq!(map.field("Framework"), &Field::SourceFramework);
        assert_eq!(map.field("FP32 Accuracy"), &Field::Baseline("accuracy".into()));
        assert_eq!(map.field("INT8 Accuracy"), &Field::Optimized("accuracy".into()));
        assert_eq!(map.field("Accuracy Ratio"), &Field::Reported("accuracy".into()));
        assert_eq!(map.field("Perf Ratio"), &Field::Reported("throughput".into()));
        assert_eq!(map.field("Notes"), &Field::Ignore);
        assert!(map.baseline_variants.is_empty());
    }

    #[test]
    fn test_infer_long_table() {
        let map = ColumnMap::infer(["Model", "Precision", "Accuracy (%)", "Throughput"]);

        assert_eq!(map.field("Precision"), &Field::Variant);
        assert_eq!(map.field("Accuracy (%)"), &Field::Value("accuracy".into()));
        assert_eq!(map.unit("Accuracy (%)"), Some(MetricUnit::Percent));
        assert_eq!(map.field("Throughput"), &Field::Value("throughput".into()));
        assert!(map.is_baseline_variant("FP32"));
        assert!(!map.is_baseline_variant("INT8"));
    }

    #[test]
    fn test_infer_hardware_columns() {
        let map = ColumnMap::infer(["CPU", "Execution Provider", "Technique"]);

        assert_eq!(map.field("CPU"), &Field::Processor);
        assert_eq!(map.field("Execution Provider"), &Field::ExecutionProvider);
        assert_eq!(map.field("Technique"), &Field::TechniqueFamily);
    }

    #[test]
    fn test_unmapped_column_is_ignored() {
        assert_eq!(ColumnMap::new().field("anything"), &Field::Ignore);
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("baseline:Acc".parse::<Field>(), Ok(Field::Baseline("accuracy".into())));
        assert_eq!("value: perf".parse::<Field>(), Ok(Field::Value("throughput".into())));
        assert_eq!("Model".parse::<Field>(), Ok(Field::Subject));
        assert!("sideways:accuracy".parse::<Field>().is_err());
        assert!("baseline:".parse::<Field>().is_err());
        assert!("bogus".parse::<Field>().is_err());
    }

    #[test]
    fn test_column_map_from_json() {
        let json = r#"{
            "columns": {"Model": "subject", "Top-1": "optimized:top1", "Ref": "baseline:top1"},
            "defaults": {"technique_family": "pruning"}
        }"#;
        let map: ColumnMap = serde_json::from_str(json).unwrap();

        assert_eq!(map.field("Top-1"), &Field::Optimized("top1".into()));
        assert_eq!(map.defaults.technique_family.as_deref(), Some("pruning"));
    }
}
