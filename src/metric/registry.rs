//! Metric polarity registry

use super::names::canonical_metric_name;
use super::polarity::{MetricScale, MetricSpec, Polarity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metric name → polarity/scale table
///
/// Every metric used in a ratio computation must resolve through the
/// registry. Lookups canonicalize the name first, so `"Acc"` and
/// `"accuracy"` share one entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRegistry {
    entries: BTreeMap<String, MetricSpec>,
}

impl Default for MetricRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("accuracy", MetricSpec::higher_percentage());
        registry.register("f1", MetricSpec::higher_percentage());
        registry.register("exact_match", MetricSpec::higher_percentage());
        registry.register("top1", MetricSpec::higher_percentage());
        registry.register("top5", MetricSpec::higher_percentage());
        registry.register("throughput", MetricSpec::higher_absolute());
        registry.register("perplexity", MetricSpec::lower_absolute());
        registry.register("latency", MetricSpec::lower_absolute());
        registry.register("wer", MetricSpec::new(Polarity::LowerIsBetter, MetricScale::Percentage));
        registry
    }
}

impl MetricRegistry {
    /// Registry with the built-in metric table
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with no entries
    pub fn empty() -> Self {
        Self { entries: BTreeMap::new() }
    }

    /// Add or override a metric entry
    pub fn register(&mut self, name: &str, spec: MetricSpec) {
        self.entries.insert(canonical_metric_name(name), spec);
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_metric(mut self, name: &str, spec: MetricSpec) -> Self {
        self.register(name, spec);
        self
    }

    pub fn get(&self, name: &str) -> Option<&MetricSpec> {
        self.entries.get(&canonical_metric_name(name))
    }

    /// Registered polarity, if any
    pub fn polarity(&self, name: &str) -> Option<Polarity> {
        self.get(name).map(|spec| spec.polarity)
    }

    /// Scale of a metric; unregistered metrics are absolute
    pub fn scale(&self, name: &str) -> MetricScale {
        self.get(name).map_or(MetricScale::Absolute, |spec| spec.scale)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricSpec)> {
        self.entries.iter().map(|(name, spec)| (name.as_str(), spec))
    }
}
