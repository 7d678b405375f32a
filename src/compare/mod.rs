//! Query and comparison engine
//!
//! Computes direction-aware ratios from stored records. A ratio is always
//! `optimized / baseline` within a record, or `right / left` across two
//! filters, and carries the metric's polarity so callers never have to guess
//! whether a drop is good news.

mod criterion;
mod engine;
mod error;
mod ratio;
mod summary;

pub use criterion::Tolerance;
pub use engine::{
    ComparisonEngine, ComparisonPair, ComparisonReport, MetricIssue, Side, SkipReason, SkippedPair,
};
pub use error::{CompareError, Result};
pub use ratio::{compute_ratio, RatioResult};
pub use summary::RatioSummary;
