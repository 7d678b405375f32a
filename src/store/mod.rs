//! Aggregation store
//!
//! Holds validated [`BenchmarkRecord`](crate::record::BenchmarkRecord)s, at
//! most one active record per [`RecordKey`](crate::record::RecordKey).
//! Records are never deleted: a correction supersedes the active record and
//! leaves an audit entry behind.
//!
//! # Example
//!
//! ```
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
//! let query = store.query(RecordFilter::new().subject("ResNet50"));
//! assert_eq!(query.count().unwrap(), 1);
//! ```

mod error;
mod filter;
mod memory;
mod query;
mod record;
mod traits;

pub use error::{Result, StoreError};
pub use filter::{HardwareSelector, RecordFilter};
pub use memory::InMemoryStore;
pub use query::{Query, QueryIter};
pub use record::{RecordId, Scope, StoredRecord, SupersedeEvent};
pub use traits::RecordStore;
