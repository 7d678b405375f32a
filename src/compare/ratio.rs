//! Direction-aware ratios

use serde::Serialize;

use super::criterion::Tolerance;
use super::error::{CompareError, Result};
use crate::metric::{canonical_metric_name, MetricRegistry, Polarity};
use crate::record::BenchmarkRecord;

/// `to / from` for one metric, tagged with the metric's polarity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioResult {
    /// Reference value (baseline, or the left side of a comparison)
    pub from: f64,
    /// Compared value (optimized, or the right side)
    pub to: f64,
    pub ratio: f64,
    pub polarity: Polarity,
}

impl RatioResult {
    /// Build a ratio; `from` must be non-zero
    pub(crate) fn new(from: f64, to: f64, polarity: Polarity) -> Self {
        Self { from, to, ratio: to / from, polarity }
    }

    /// `ratio - 1`; -0.0087 is a 0.87% decrease
    pub fn relative_change(&self) -> f64 {
        self.ratio - 1.0
    }

    /// Whether the change moves in the metric's good direction
    pub fn is_improvement(&self) -> bool {
        self.polarity.is_improvement(self.from, self.to)
    }

    /// Loss in the metric's bad direction (negative for gains)
    pub fn loss(&self) -> f64 {
        match self.polarity {
            Polarity::HigherIsBetter => self.from - self.to,
            Polarity::LowerIsBetter => self.to - self.from,
        }
    }

    /// Whether the loss stays inside `tolerance`
    pub fn within(&self, tolerance: Tolerance) -> bool {
        tolerance.accepts(self.loss(), self.from)
    }
}

/// Ratio of optimized to baseline for one metric of a record
pub fn compute_ratio(record: &BenchmarkRecord, metric: &str) -> Result<RatioResult> {
    ratio_with(&MetricRegistry::default(), record, metric)
}

pub(crate) fn ratio_with(
    registry: &MetricRegistry,
    record: &BenchmarkRecord,
    metric: &str,
) -> Result<RatioResult> {
    let metric = canonical_metric_name(metric);
    if record.is_pending() {
        return Err(CompareError::PendingRecord(record.subject().to_string()));
    }
    let polarity = registry
        .polarity(&metric)
        .ok_or_else(|| CompareError::UnknownMetricPolarity(metric.clone()))?;
    let (baseline, optimized) = record.metric_pair(&metric).ok_or_else(|| {
        CompareError::MetricNotFound { metric: metric.clone(), subject: record.subject().to_string() }
    })?;
    if baseline == 0.0 {
        return Err(CompareError::ZeroBaseline { metric, subject: record.subject().to_string() });
    }

    Ok(RatioResult::new(baseline, optimized, polarity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{validate, RawCandidate};
    use approx::assert_relative_eq;

    fn record(metric: &str, baseline: f64, optimized: f64) -> BenchmarkRecord {
        validate(
            &RawCandidate::new()
                .subject("ResNet50")
                .technique("int8")
                .baseline(metric, baseline)
                .optimized(metric, optimized),
        )
        .unwrap()
    }

    #[test]
    fn test_accuracy_ratio() {
        let result = compute_ratio(&record("accuracy", 76.87, 76.2), "Accuracy").unwrap();

        assert_relative_eq!(result.ratio, 0.762 / 0.7687, epsilon = 1e-12);
        assert_relative_eq!(result.relative_change(), -0.0087160, epsilon = 1e-6);
        assert!(!result.is_improvement());
        assert!(result.within(Tolerance::Relative(0.01)));
        assert!(!result.within(Tolerance::Relative(0.005)));
    }

    #[test]
    fn test_lower_is_better() {
        let result = compute_ratio(&record("latency", 20.0, 8.0), "latency").unwrap();

        assert_relative_eq!(result.ratio, 0.4);
        assert!(result.is_improvement());
        assert!(result.within(Tolerance::Absolute(0.0)));
    }

    #[test]
    fn test_throughput_speedup() {
        let result = compute_ratio(&record("perf", 1254.3, 4410.0), "throughput").unwrap();

        assert!(result.ratio > 3.5);
        assert!(result.is_improvement());
    }

    #[test]
    fn test_unknown_polarity() {
        let err = compute_ratio(&record("bleu", 30.0, 29.5), "bleu").unwrap_err();
        assert_eq!(err, CompareError::UnknownMetricPolarity("bleu".into()));
    }

    #[test]
    fn test_registered_polarity() {
        let registry = MetricRegistry::default()
            .with_metric("bleu", crate::metric::MetricSpec::higher_absolute());
        let result = ratio_with(&registry, &record("bleu", 30.0, 29.5), "bleu").unwrap();
        assert!(!result.is_improvement());
    }

    #[test]
    fn test_metric_not_found() {
        let err = compute_ratio(&record("accuracy", 76.87, 76.2), "f1").unwrap_err();
        assert_eq!(err.kind(), "metric_not_found");
    }

    #[test]
    fn test_zero_baseline() {
        let err = compute_ratio(&record("latency", 0.0, 8.0), "latency").unwrap_err();
        assert_eq!(err.kind(), "zero_baseline");
    }

    #[test]
    fn test_pending_record() {
        let pending =
            validate(&RawCandidate::new().subject("GPT-J").technique("int8").pending()).unwrap();
        let err = compute_ratio(&pending, "accuracy").unwrap_err();
        assert_eq!(err, CompareError::PendingRecord("GPT-J".into()));
    }
}
