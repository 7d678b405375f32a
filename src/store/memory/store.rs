//! Thread-safe in-memory store

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::state::StoreState;
use crate::record::{BenchmarkRecord, RecordKey};
use crate::store::error::{Result, StoreError};
use crate::store::filter::RecordFilter;
use crate::store::record::{RecordId, Scope, StoredRecord, SupersedeEvent};
use crate::store::traits::RecordStore;

/// In-memory aggregation store
///
/// Writers are serialized by the write lock; readers share the read lock and
/// copy out `Arc` handles, so a query never observes a half-applied write.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub(super) state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>> {
        self.state
            .read()
            .map_err(|e| StoreError::LockPoisoned(format!("Failed to acquire read lock: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>> {
        self.state
            .write()
            .map_err(|e| StoreError::LockPoisoned(format!("Failed to acquire write lock: {e}")))
    }
}

impl RecordStore for InMemoryStore {
    fn insert(&self, record: BenchmarkRecord) -> Result<RecordId> {
        let id = self.write()?.insert(record)?;
        tracing::debug!(%id, "record inserted");
        Ok(id)
    }

    fn supersede(
        &self,
        old: RecordId,
        record: BenchmarkRecord,
        reason: Option<&str>,
    ) -> Result<RecordId> {
        let new = self.write()?.supersede(old, record, reason)?;
        tracing::debug!(%old, %new, "record superseded");
        Ok(new)
    }

    fn get(&self, key: &RecordKey) -> Result<Option<Arc<BenchmarkRecord>>> {
        Ok(self.read()?.get(key))
    }

    fn active_id(&self, key: &RecordKey) -> Result<Option<RecordId>> {
        Ok(self.read()?.active_id(key))
    }

    fn find(&self, id: RecordId, scope: Scope) -> Result<Option<StoredRecord>> {
        Ok(self.read()?.find(id).filter(|entry| entry.in_scope(scope)).cloned())
    }

    fn snapshot(&self, filter: &RecordFilter) -> Result<Vec<StoredRecord>> {
        Ok(self.read()?.select(filter))
    }

    fn history(&self, id: RecordId) -> Result<Vec<SupersedeEvent>> {
        Ok(self.read()?.history(id))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    fn active_len(&self) -> Result<usize> {
        Ok(self.read()?.active_len())
    }
}
