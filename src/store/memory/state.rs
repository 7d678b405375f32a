//! Lock-protected store state and its indexes

use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use crate::record::{BenchmarkRecord, HardwareContext, RecordKey, TechniqueFamily};
use crate::store::error::{Result, StoreError};
use crate::store::filter::RecordFilter;
use crate::store::record::{RecordId, StoredRecord, SupersedeEvent};

type FamilyHardware = (TechniqueFamily, Option<HardwareContext>);

/// Everything behind the store's lock
///
/// Indexes cover every record ever accepted; scope is applied afterwards.
#[derive(Debug, Default)]
pub(super) struct StoreState {
    next_id: u64,
    records: BTreeMap<RecordId, StoredRecord>,
    /// Active key -> id
    active: HashMap<RecordKey, RecordId>,
    by_subject: HashMap<String, BTreeSet<RecordId>>,
    by_family_hardware: HashMap<FamilyHardware, BTreeSet<RecordId>>,
    events: Vec<SupersedeEvent>,
}

impl StoreState {
    pub(super) fn insert(&mut self, record: BenchmarkRecord) -> Result<RecordId> {
        let key = record.key();
        if let Some(&existing) = self.active.get(&key) {
            return Err(StoreError::DuplicateRecord { key, existing });
        }
        Ok(self.commit(key, record))
    }

    pub(super) fn supersede(
        &mut self,
        old: RecordId,
        record: BenchmarkRecord,
        reason: Option<&str>,
    ) -> Result<RecordId> {
        let old_entry = self.records.get(&old).ok_or(StoreError::RecordNotFound(old))?;
        if let Some(by) = old_entry.superseded_by {
            return Err(StoreError::AlreadySuperseded { id: old, by });
        }

        let old_key = old_entry.record.key();
        let key = record.key();
        if let Some(&existing) = self.active.get(&key) {
            if existing != old {
                return Err(StoreError::DuplicateRecord { key, existing });
            }
        }

        // All checks passed; nothing below can fail.
        self.active.remove(&old_key);
        let new = self.commit(key, record);
        if let Some(entry) = self.records.get_mut(&old) {
            entry.superseded_by = Some(new);
        }
        self.events.push(SupersedeEvent {
            old,
            new,
            at: Utc::now(),
            reason: reason.map(ToString::to_string),
        });

        Ok(new)
    }

    fn commit(&mut self, key: RecordKey, record: BenchmarkRecord) -> RecordId {
        self.next_id += 1;
        let id = RecordId(self.next_id);

        self.by_subject.entry(key.subject.clone()).or_default().insert(id);
        self.by_family_hardware
            .entry((key.technique_family, key.hardware_context.clone()))
            .or_default()
            .insert(id);
        self.active.insert(key, id);
        self.records.insert(
            id,
            StoredRecord {
                id,
                record: Arc::new(record),
                inserted_at: Utc::now(),
                superseded_by: None,
            },
        );

        id
    }

    pub(super) fn active_id(&self, key: &RecordKey) -> Option<RecordId> {
        self.active.get(key).copied()
    }

    pub(super) fn get(&self, key: &RecordKey) -> Option<Arc<BenchmarkRecord>> {
        let id = self.active.get(key)?;
        self.records.get(id).map(|entry| Arc::clone(&entry.record))
    }

    pub(super) fn find(&self, id: RecordId) -> Option<&StoredRecord> {
        self.records.get(&id)
    }

    /// Ids worth checking for a filter, narrowed by the best index available
    fn candidates(&self, filter: &RecordFilter) -> Option<&BTreeSet<RecordId>> {
        if let Some(subject) = &filter.subject {
            return Some(self.by_subject.get(subject).unwrap_or(&EMPTY));
        }
        if let (Some(family), Some(hardware)) = (filter.technique_family, filter.hardware.pinned())
        {
            return Some(
                self.by_family_hardware
                    .get(&(family, hardware.cloned()))
                    .unwrap_or(&EMPTY),
            );
        }
        None
    }

    pub(super) fn select(&self, filter: &RecordFilter) -> Vec<StoredRecord> {
        let keep = |entry: &&StoredRecord| {
            entry.in_scope(filter.scope) && filter.matches(&entry.record)
        };

        match self.candidates(filter) {
            Some(ids) => ids
                .iter()
                .filter_map(|id| self.records.get(id))
                .filter(keep)
                .cloned()
                .collect(),
            None => self.records.values().filter(keep).cloned().collect(),
        }
    }

    pub(super) fn history(&self, id: RecordId) -> Vec<SupersedeEvent> {
        self.events.iter().filter(|e| e.old == id || e.new == id).cloned().collect()
    }

    pub(super) fn len(&self) -> usize {
        self.records.len()
    }

    pub(super) fn active_len(&self) -> usize {
        self.active.len()
    }
}

static EMPTY: BTreeSet<RecordId> = BTreeSet::new();
