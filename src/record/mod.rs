//! Benchmark record schema and validator
//!
//! A [`BenchmarkRecord`] is one canonical comparison row: a subject measured
//! before and after an optimization technique. Records can only be produced by
//! [`Validator::validate`], which enforces the schema invariants on ingest:
//!
//! - subject and technique family are present
//! - measured records share at least one metric between baseline and optimized
//! - every number is finite
//! - percentage metrics are stored as fractions, never mixed
//!
//! Validation is pure. Feeding a canonical record back through the validator
//! (via [`RawCandidate::from`]) yields the same record.

mod candidate;
mod error;
mod review;
mod types;
mod validator;
mod value;

#[cfg(test)]
mod proptests;

pub use candidate::{CandidateRole, CandidateValue, RawCandidate};
pub use error::{Result, ValidationError};
pub use review::ReviewFlag;
pub use types::{
    BenchmarkRecord, HardwareContext, MetricSet, RecordKey, RecordStatus, TechniqueFamily,
};
pub use validator::{validate, UnitRule, ValidationPolicy, Validator};
pub use value::{MetricUnit, MetricValue, RawValue};
