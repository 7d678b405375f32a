//! Record store trait definition

use std::sync::Arc;

use super::error::Result;
use super::filter::RecordFilter;
use super::query::Query;
use super::record::{RecordId, Scope, StoredRecord, SupersedeEvent};
use crate::record::{BenchmarkRecord, RecordKey};

/// Aggregation store trait
///
/// Implementations are shared between threads; every method takes `&self`.
pub trait RecordStore: Send + Sync {
    /// Insert a new record; fails if its key is already active
    fn insert(&self, record: BenchmarkRecord) -> Result<RecordId>;

    /// Replace an active record with a corrected one, atomically
    fn supersede(
        &self,
        old: RecordId,
        record: BenchmarkRecord,
        reason: Option<&str>,
    ) -> Result<RecordId>;

    /// Active record for a key
    fn get(&self, key: &RecordKey) -> Result<Option<Arc<BenchmarkRecord>>>;

    /// Id of the active record for a key
    fn active_id(&self, key: &RecordKey) -> Result<Option<RecordId>>;

    /// Look up a record by id
    fn find(&self, id: RecordId, scope: Scope) -> Result<Option<StoredRecord>>;

    /// Matching records, copied out under a single read lock
    fn snapshot(&self, filter: &RecordFilter) -> Result<Vec<StoredRecord>>;

    /// Supersede events touching a record, oldest first
    fn history(&self, id: RecordId) -> Result<Vec<SupersedeEvent>>;

    /// Every record ever accepted
    fn len(&self) -> Result<usize>;

    /// Records not superseded
    fn active_len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Lazy query over the store
    fn query(&self, filter: RecordFilter) -> Query<'_>
    where
        Self: Sized,
    {
        Query::new(self, filter)
    }
}
