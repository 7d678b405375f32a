//! Metric registry
//!
//! Every metric name that flows through the engine resolves here: the
//! registry declares whether higher or lower values are better and whether
//! the metric is a percentage (stored as a fraction) or an absolute quantity.
//!
//! # Components
//!
//! - [`names`] - Canonical metric names and alias resolution
//! - [`polarity`] - Metric direction and scale
//! - [`registry`] - Name → spec table with built-in defaults

mod names;
mod polarity;
mod registry;

pub use names::canonical_metric_name;
pub use polarity::{MetricScale, MetricSpec, Polarity};
pub use registry::MetricRegistry;
