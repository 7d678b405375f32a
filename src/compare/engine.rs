//! Cross-filter comparison
//!
//! Joins the active records of two filters on subject and reports per-metric
//! ratios (right / left) for every pairing.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::error::{CompareError, Result};
use super::ratio::{ratio_with, RatioResult};
use super::summary::RatioSummary;
use crate::metric::{canonical_metric_name, MetricRegistry};
use crate::record::{BenchmarkRecord, RecordKey};
use crate::store::{Query, RecordFilter, RecordId, RecordStore, Scope, StoredRecord};

/// Which filter a record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Why a record produced no pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Subject matched on only one side
    NoCommonSubject,
    /// Record is pending; it has nothing to compare
    PendingRecord,
    /// Paired records share no optimized metric
    NoCommonMetric,
    /// Record matched both filters and has no other partner
    SameRecord,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::NoCommonSubject => "subject only on one side",
            SkipReason::PendingRecord => "record is pending",
            SkipReason::NoCommonMetric => "no shared metric",
            SkipReason::SameRecord => "matched by both filters, nothing to pair with",
        };
        f.write_str(text)
    }
}

/// A record left out of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedPair {
    pub subject: String,
    pub side: Side,
    pub record: RecordId,
    pub reason: SkipReason,
}

/// A metric of a pair that could not be turned into a ratio
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricIssue {
    pub metric: String,
    pub kind: String,
    pub message: String,
}

/// One left/right pairing for a subject
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonPair {
    pub subject: String,
    pub left: RecordId,
    pub right: RecordId,
    pub left_key: RecordKey,
    pub right_key: RecordKey,
    /// right / left, per shared optimized metric
    pub ratios: BTreeMap<String, RatioResult>,
    pub issues: Vec<MetricIssue>,
}

/// Result of comparing two filters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonReport {
    /// Ordered by subject, then left id, then right id
    pub pairs: Vec<ComparisonPair>,
    pub skipped: Vec<SkippedPair>,
}

impl ComparisonReport {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    fn skip(&mut self, subject: &str, side: Side, entry: &StoredRecord, reason: SkipReason) {
        self.skipped.push(SkippedPair {
            subject: subject.to_string(),
            side,
            record: entry.id,
            reason,
        });
    }

    /// Subjects with at least one pair
    pub fn subjects(&self) -> BTreeSet<&str> {
        self.pairs.iter().map(|p| p.subject.as_str()).collect()
    }
}

/// Query and comparison engine
#[derive(Debug, Clone, Default)]
pub struct ComparisonEngine {
    registry: MetricRegistry,
}

impl ComparisonEngine {
    pub fn new(registry: MetricRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &MetricRegistry {
        &self.registry
    }

    /// Ratio of optimized to baseline for one metric of a record
    pub fn compute_ratio(&self, record: &BenchmarkRecord, metric: &str) -> Result<RatioResult> {
        ratio_with(&self.registry, record, metric)
    }

    /// Compare the active records matched by two filters
    ///
    /// Subjects present on one side only, and pending records, end up in
    /// [`ComparisonReport::skipped`]. A subject with several records on a
    /// side is paired with every record of the other side.
    pub fn compare(
        &self,
        store: &dyn RecordStore,
        left: &RecordFilter,
        right: &RecordFilter,
    ) -> Result<ComparisonReport> {
        let left = by_subject(store, left)?;
        let right = by_subject(store, right)?;
        let subjects: BTreeSet<&String> = left.keys().chain(right.keys()).collect();

        let mut report = ComparisonReport::default();
        for subject in subjects {
            let lhs = left.get(subject).map(Vec::as_slice).unwrap_or_default();
            let rhs = right.get(subject).map(Vec::as_slice).unwrap_or_default();
            self.compare_subject(subject, lhs, rhs, &mut report);
        }

        tracing::debug!(
            pairs = report.pairs.len(),
            skipped = report.skipped.len(),
            "comparison finished"
        );
        Ok(report)
    }

    fn compare_subject(
        &self,
        subject: &str,
        left: &[StoredRecord],
        right: &[StoredRecord],
        report: &mut ComparisonReport,
    ) {
        let (left_measured, left_pending): (Vec<_>, Vec<_>) =
            left.iter().partition(|e| !e.record.is_pending());
        let (right_measured, right_pending): (Vec<_>, Vec<_>) =
            right.iter().partition(|e| !e.record.is_pending());

        for entry in left_pending {
            report.skip(subject, Side::Left, entry, SkipReason::PendingRecord);
        }
        for entry in right_pending {
            report.skip(subject, Side::Right, entry, SkipReason::PendingRecord);
        }

        if left_measured.is_empty() || right_measured.is_empty() {
            for entry in left_measured {
                report.skip(subject, Side::Left, entry, SkipReason::NoCommonSubject);
            }
            for entry in right_measured {
                report.skip(subject, Side::Right, entry, SkipReason::NoCommonSubject);
            }
            return;
        }

        // Ids that ended up in a pair or a skip entry on either side
        let mut seen = BTreeSet::new();
        for l in &left_measured {
            for r in &right_measured {
                if l.id == r.id {
                    continue;
                }
                match self.pair(subject, l, r) {
                    Some(pair) => report.pairs.push(pair),
                    None => {
                        report.skip(subject, Side::Left, l, SkipReason::NoCommonMetric);
                        report.skip(subject, Side::Right, r, SkipReason::NoCommonMetric);
                    }
                }
                seen.insert(l.id);
                seen.insert(r.id);
            }
        }

        for entry in left_measured.iter().filter(|e| !seen.contains(&e.id)) {
            report.skip(subject, Side::Left, entry, SkipReason::SameRecord);
        }
        for entry in right_measured.iter().filter(|e| !seen.contains(&e.id)) {
            report.skip(subject, Side::Right, entry, SkipReason::SameRecord);
        }
    }

    fn pair(&self, subject: &str, left: &StoredRecord, right: &StoredRecord) -> Option<ComparisonPair> {
        let lhs = left.record.optimized_metric();
        let rhs = right.record.optimized_metric();
        let shared: Vec<&String> = lhs.keys().filter(|m| rhs.contains_key(*m)).collect();
        if shared.is_empty() {
            return None;
        }

        let mut ratios = BTreeMap::new();
        let mut issues = Vec::new();
        for metric in shared {
            match self.cross_ratio(subject, metric, lhs[metric], rhs[metric]) {
                Ok(ratio) => {
                    ratios.insert(metric.clone(), ratio);
                }
                Err(e) => issues.push(MetricIssue {
                    metric: metric.clone(),
                    kind: e.kind().to_string(),
                    message: e.to_string(),
                }),
            }
        }

        Some(ComparisonPair {
            subject: subject.to_string(),
            left: left.id,
            right: right.id,
            left_key: left.record.key(),
            right_key: right.record.key(),
            ratios,
            issues,
        })
    }

    fn cross_ratio(&self, subject: &str, metric: &str, left: f64, right: f64) -> Result<RatioResult> {
        let polarity = self
            .registry
            .polarity(metric)
            .ok_or_else(|| CompareError::UnknownMetricPolarity(metric.to_string()))?;
        if left == 0.0 {
            return Err(CompareError::ZeroBaseline {
                metric: metric.to_string(),
                subject: subject.to_string(),
            });
        }
        Ok(RatioResult::new(left, right, polarity))
    }

    /// Aggregate optimized/baseline ratios of one metric over records
    pub fn summarize<'r, I>(&self, records: I, metric: &str) -> RatioSummary
    where
        I: IntoIterator<Item = &'r BenchmarkRecord>,
    {
        let metric = canonical_metric_name(metric);
        let mut summary = RatioSummary::new(&metric);
        for record in records {
            summary.add(self.compute_ratio(record, &metric));
        }
        summary
    }

    /// Summarize the records a query matches
    pub fn summarize_query(&self, query: &Query<'_>, metric: &str) -> Result<RatioSummary> {
        let entries: Vec<StoredRecord> = query.iter()?.collect();
        Ok(self.summarize(entries.iter().map(|e| e.record.as_ref()), metric))
    }
}

fn by_subject(
    store: &dyn RecordStore,
    filter: &RecordFilter,
) -> Result<BTreeMap<String, Vec<StoredRecord>>> {
    let filter = filter.clone().scope(Scope::Active);
    let mut grouped: BTreeMap<String, Vec<StoredRecord>> = BTreeMap::new();
    for entry in Query::new(store, filter).iter()? {
        grouped.entry(entry.record.subject().to_string()).or_default().push(entry);
    }
    Ok(grouped)
}
