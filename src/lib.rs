//! Medida: benchmark record aggregation and validation for model optimization results.
//!
//! Medida collects the before/after numbers that compression techniques
//! (quantization, pruning, distillation) report for a model, turns
//! heterogeneous result tables into canonical records, and answers
//! direction-aware questions about them.
//!
//! # Quick Start
//!
//! ```
//! use medida::compare::ComparisonEngine;
//! use medida::record::{validate, RawCandidate};
//! use medida::store::{InMemoryStore, RecordFilter, RecordStore};
//!
//! let store = InMemoryStore::new();
//! let record = validate(
//!     &RawCandidate::new()
//!         .subject("ResNet50")
//!         .technique("int8")
//!         .baseline("accuracy", 76.87)
//!         .optimized("accuracy", 76.2),
//! )
//! .unwrap();
//! store.insert(record).unwrap();
//!
//! let engine = ComparisonEngine::default();
//! let summary = engine
//!     .summarize_query(&store.query(RecordFilter::new()), "accuracy")
//!     .unwrap();
//! assert_eq!(summary.count, 1);
//! assert!(summary.mean < 1.0);
//! ```
//!
//! # Modules
//!
//! - [`metric`]: Metric registry (polarity, scale, canonical names)
//! - [`record`]: Canonical record schema and the validator
//! - [`ingest`]: Row normalization and batch ingestion
//! - [`store`]: Aggregation store with supersede history
//! - [`compare`]: Ratio computation, comparison and summaries
//! - [`config`]: YAML engine configuration and CLI arguments
//! - [`cli`]: Command handlers for the `medida` binary

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod ingest;
pub mod metric;
pub mod record;
pub mod store;

pub use error::{Error, Result};
