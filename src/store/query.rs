//! Lazy, restartable queries

use super::error::Result;
use super::filter::RecordFilter;
use super::record::StoredRecord;
use super::traits::RecordStore;

/// A filter bound to a store
///
/// Nothing is read until [`Query::iter`]. Each call takes a fresh snapshot,
/// so the query can be restarted and sees writes committed in between.
pub struct Query<'a> {
    store: &'a dyn RecordStore,
    filter: RecordFilter,
}

impl<'a> Query<'a> {
    pub fn new(store: &'a dyn RecordStore, filter: RecordFilter) -> Self {
        Self { store, filter }
    }

    pub fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    /// Iterate over a snapshot of the matching records
    pub fn iter(&self) -> Result<QueryIter> {
        Ok(QueryIter { inner: self.store.snapshot(&self.filter)?.into_iter() })
    }

    /// Number of matching records right now
    pub fn count(&self) -> Result<usize> {
        Ok(self.iter()?.len())
    }
}

/// Iterator over one query snapshot, ordered by record id
pub struct QueryIter {
    inner: std::vec::IntoIter<StoredRecord>,
}

impl Iterator for QueryIter {
    type Item = StoredRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for QueryIter {}
