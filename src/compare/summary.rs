//! Ratio statistics summary

use serde::Serialize;

use super::criterion::Tolerance;
use super::error::Result;
use super::ratio::RatioResult;

/// Ratio statistics for one metric over a set of records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RatioSummary {
    /// Metric name
    pub metric: String,
    /// Number of ratios computed
    pub count: usize,
    /// Minimum ratio
    pub min: f64,
    /// Maximum ratio
    pub max: f64,
    /// Average ratio
    pub mean: f64,
    /// Ratios moving in the metric's good direction
    pub improvements: usize,
    /// Records whose ratio could not be computed
    pub failures: usize,
    #[serde(skip)]
    ratios: Vec<RatioResult>,
}

impl RatioSummary {
    pub fn new(metric: &str) -> Self {
        Self { metric: metric.to_string(), ..Self::default() }
    }

    /// Fold one ratio attempt into the summary
    pub fn add(&mut self, ratio: Result<RatioResult>) {
        let Ok(ratio) = ratio else {
            self.failures += 1;
            return;
        };

        if self.count == 0 {
            self.min = ratio.ratio;
            self.max = ratio.ratio;
        } else {
            self.min = self.min.min(ratio.ratio);
            self.max = self.max.max(ratio.ratio);
        }
        self.mean = (self.mean * self.count as f64 + ratio.ratio) / (self.count + 1) as f64;
        self.count += 1;
        if ratio.is_improvement() {
            self.improvements += 1;
        }
        self.ratios.push(ratio);
    }

    /// Regressions are every computed ratio that did not improve
    pub fn regressions(&self) -> usize {
        self.count - self.improvements
    }

    /// How many computed ratios stay inside a tolerance
    pub fn passing(&self, tolerance: Tolerance) -> usize {
        self.ratios.iter().filter(|r| r.within(tolerance)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::CompareError;
    use crate::metric::Polarity;
    use approx::assert_relative_eq;

    #[test]
    fn test_summary_statistics() {
        let mut summary = RatioSummary::new("accuracy");
        summary.add(Ok(RatioResult::new(0.80, 0.78, Polarity::HigherIsBetter)));
        summary.add(Ok(RatioResult::new(0.50, 0.55, Polarity::HigherIsBetter)));
        summary.add(Err(CompareError::PendingRecord("GPT-J".into())));

        assert_eq!(summary.count, 2);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.improvements, 1);
        assert_eq!(summary.regressions(), 1);
        assert_relative_eq!(summary.min, 0.975, epsilon = 1e-12);
        assert_relative_eq!(summary.max, 1.1, epsilon = 1e-12);
        assert_relative_eq!(summary.mean, (0.975 + 1.1) / 2.0, epsilon = 1e-12);
        assert_eq!(summary.passing(Tolerance::Relative(0.01)), 1);
        assert_eq!(summary.passing(Tolerance::Relative(0.05)), 2);
    }

    #[test]
    fn test_empty_summary() {
        let summary = RatioSummary::new("f1");
        assert_eq!(summary.count, 0);
        assert_eq!(summary.mean, 0.0);
    }
}
