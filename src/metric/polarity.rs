//! Metric direction and scale

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which direction of change counts as an improvement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Accuracy, F1, throughput
    #[serde(alias = "higher", alias = "higher-better")]
    HigherIsBetter,
    /// Perplexity, latency, error rates
    #[serde(alias = "lower", alias = "lower-better")]
    LowerIsBetter,
}

impl Polarity {
    /// Whether higher values are better
    pub fn higher_is_better(&self) -> bool {
        matches!(self, Polarity::HigherIsBetter)
    }

    /// Whether moving from `baseline` to `optimized` is an improvement
    pub fn is_improvement(&self, baseline: f64, optimized: f64) -> bool {
        match self {
            Polarity::HigherIsBetter => optimized > baseline,
            Polarity::LowerIsBetter => optimized < baseline,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Polarity::HigherIsBetter => "higher-better",
            Polarity::LowerIsBetter => "lower-better",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How values of a metric are expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricScale {
    /// Percentage-typed; stored as a fraction in canonical records
    #[serde(alias = "percent")]
    Percentage,
    /// Absolute quantity (tokens/s, ms, perplexity); never rescaled
    #[default]
    Absolute,
}

/// Registry entry for one metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub polarity: Polarity,
    #[serde(default)]
    pub scale: MetricScale,
}

impl MetricSpec {
    pub fn new(polarity: Polarity, scale: MetricScale) -> Self {
        Self { polarity, scale }
    }

    /// Higher-is-better percentage metric
    pub fn higher_percentage() -> Self {
        Self::new(Polarity::HigherIsBetter, MetricScale::Percentage)
    }

    /// Higher-is-better absolute metric
    pub fn higher_absolute() -> Self {
        Self::new(Polarity::HigherIsBetter, MetricScale::Absolute)
    }

    /// Lower-is-better absolute metric
    pub fn lower_absolute() -> Self {
        Self::new(Polarity::LowerIsBetter, MetricScale::Absolute)
    }
}
