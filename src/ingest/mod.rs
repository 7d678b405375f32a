//! Ingestion normalizer
//!
//! Turns heterogeneous source rows into [`RawCandidate`](crate::record::RawCandidate)s
//! and drives them through validation into a store.
//!
//! Two table layouts are understood:
//! - wide: one row per comparison, with `FP32 Accuracy` / `INT8 Accuracy` style columns
//! - long: one row per variant, where baseline variants (`FP32`, `BF16`) supply
//!   the baseline of the rows that follow them

mod batch;
mod columns;
mod normalizer;
mod table;


pub use batch::{BatchCounts, BatchIngestor, BatchReport, DuplicatePolicy, RowOutcome, RowResult};
pub use columns::{ColumnMap, Field, RawRow, TableDefaults, DEFAULT_BASELINE_VARIANTS};
pub use normalizer::{normalize, Normalizer};
pub use table::{TableInput, TableSection};
