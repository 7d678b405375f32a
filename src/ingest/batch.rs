//! Batch ingestion
//!
//! Runs normalize, validate and insert for each row independently. A failing
//! row is reported and never rolls back the rows before it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::columns::{ColumnMap, RawRow};
use super::normalizer::Normalizer;
use super::table::TableInput;
use crate::record::{RawCandidate, Validator};
use crate::store::{RecordId, RecordStore, StoreError};

/// What to do when a row's key is already active in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Reject the row with `DuplicateRecord`
    #[default]
    Reject,
    /// Keep the active record, skip the row
    Skip,
    /// Replace the active record
    Supersede,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicatePolicy::Reject => "reject",
            DuplicatePolicy::Skip => "skip",
            DuplicatePolicy::Supersede => "supersede",
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(DuplicatePolicy::Reject),
            "skip" => Ok(DuplicatePolicy::Skip),
            "supersede" | "replace" => Ok(DuplicatePolicy::Supersede),
            _ => Err(format!(
                "Unknown duplicate policy: {s}. Valid policies: reject, skip, supersede"
            )),
        }
    }
}

/// Result of ingesting one row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RowResult {
    Inserted { id: RecordId },
    Superseded { old: RecordId, new: RecordId },
    Skipped { reason: String, existing: Option<RecordId> },
    Rejected { kind: String, reason: String },
}

/// One row's outcome with its position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowOutcome {
    pub row: usize,
    pub section: Option<String>,
    pub subject: Option<String>,
    pub result: RowResult,
}

/// Outcome counts of a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchCounts {
    pub inserted: usize,
    pub superseded: usize,
    pub skipped: usize,
    pub rejected: usize,
}

impl BatchCounts {
    pub fn total(&self) -> usize {
        self.inserted + self.superseded + self.skipped + self.rejected
    }
}

/// Per-row outcomes of a batch
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<RowOutcome>,
    pub counts: BatchCounts,
}

impl BatchReport {
    fn push(&mut self, outcome: RowOutcome) {
        match outcome.result {
            RowResult::Inserted { .. } => self.counts.inserted += 1,
            RowResult::Superseded { .. } => self.counts.superseded += 1,
            RowResult::Skipped { .. } => self.counts.skipped += 1,
            RowResult::Rejected { .. } => self.counts.rejected += 1,
        }
        self.outcomes.push(outcome);
    }

    /// Rejected rows with their reasons
    pub fn rejected(&self) -> impl Iterator<Item = &RowOutcome> {
        self.outcomes.iter().filter(|o| matches!(o.result, RowResult::Rejected { .. }))
    }

    pub fn has_rejections(&self) -> bool {
        self.counts.rejected > 0
    }
}

/// Drives rows from a source into a store
pub struct BatchIngestor<'a> {
    store: &'a dyn RecordStore,
    validator: &'a Validator,
    policy: DuplicatePolicy,
    normalizer: Normalizer,
    section: Option<String>,
    report: BatchReport,
}

impl<'a> BatchIngestor<'a> {
    pub fn new(store: &'a dyn RecordStore, validator: &'a Validator) -> Self {
        Self {
            store,
            validator,
            policy: DuplicatePolicy::default(),
            normalizer: Normalizer::new(),
            section: None,
            report: BatchReport::default(),
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start a new table section
    pub fn begin_section(&mut self, name: Option<&str>) {
        self.normalizer.begin_section();
        self.section = name.map(ToString::to_string);
    }

    /// Ingest every row under one column map
    pub fn ingest_rows<'r, I>(&mut self, rows: I, map: &ColumnMap)
    where
        I: IntoIterator<Item = &'r RawRow>,
    {
        for row in rows {
            self.ingest_row(row, map);
        }
    }

    /// Ingest every section of a document; each section starts fresh
    pub fn ingest_table(&mut self, input: &TableInput) {
        for section in &input.sections {
            let map = section.column_map(self.validator.registry());
            self.begin_section(section.name.as_deref());
            self.ingest_rows(&section.rows, &map);
        }
    }

    /// Normalize, validate and store one row
    pub fn ingest_row(&mut self, row: &RawRow, map: &ColumnMap) -> RowResult {
        let candidate = self.normalizer.normalize(row, map);
        self.ingest_candidate(candidate)
    }

    /// Validate and store an already normalized candidate
    pub fn ingest_candidate(&mut self, candidate: RawCandidate) -> RowResult {
        let row = candidate.row_index.unwrap_or(self.report.outcomes.len());
        let subject = candidate.subject.clone();
        let result = self.store_candidate(&candidate);

        if let RowResult::Rejected { reason, .. } = &result {
            tracing::warn!(
                row,
                section = self.section.as_deref().unwrap_or(""),
                subject = subject.as_deref().unwrap_or(""),
                %reason,
                "row rejected"
            );
        }

        self.report.push(RowOutcome {
            row,
            section: self.section.clone(),
            subject,
            result: result.clone(),
        });
        result
    }

    fn store_candidate(&self, candidate: &RawCandidate) -> RowResult {
        if candidate.is_baseline_reference() {
            return RowResult::Skipped { reason: "baseline reference row".into(), existing: None };
        }

        let record = match self.validator.validate(candidate) {
            Ok(record) => record,
            Err(e) => return RowResult::Rejected { kind: e.kind().into(), reason: e.to_string() },
        };

        let existing = match self.store.insert(record.clone()) {
            Ok(id) => return RowResult::Inserted { id },
            Err(StoreError::DuplicateRecord { existing, .. }) => existing,
            Err(e) => return rejected_by_store(&e),
        };

        let identical = match self.store.get(&record.key()) {
            Ok(active) => active.is_some_and(|active| *active == record),
            Err(e) => return rejected_by_store(&e),
        };

        match self.policy {
            DuplicatePolicy::Reject => RowResult::Rejected {
                kind: "duplicate_record".into(),
                reason: format!("{} is already active as {existing}", record.key()),
            },
            DuplicatePolicy::Skip | DuplicatePolicy::Supersede if identical => RowResult::Skipped {
                reason: "identical record already active".into(),
                existing: Some(existing),
            },
            DuplicatePolicy::Skip => {
                RowResult::Skipped { reason: "key already active".into(), existing: Some(existing) }
            }
            DuplicatePolicy::Supersede => {
                let key = record.key();
                match self.store.supersede(existing, record, Some("re-ingested")) {
                    Ok(new) => {
                        tracing::warn!(%key, old = %existing, %new, "active record superseded");
                        RowResult::Superseded { old: existing, new }
                    }
                    Err(e) => rejected_by_store(&e),
                }
            }
        }
    }

    pub fn report(&self) -> &BatchReport {
        &self.report
    }

    /// Finish the batch and hand back its report
    pub fn finish(self) -> BatchReport {
        let counts = self.report.counts;
        tracing::info!(
            inserted = counts.inserted,
            superseded = counts.superseded,
            skipped = counts.skipped,
            rejected = counts.rejected,
            policy = %self.policy,
            "batch ingested"
        );
        self.report
    }
}

fn rejected_by_store(error: &StoreError) -> RowResult {
    let kind = match error {
        StoreError::DuplicateRecord { .. } => "duplicate_record",
        StoreError::RecordNotFound(_) => "record_not_found",
        StoreError::AlreadySuperseded { .. } => "already_superseded",
        StoreError::LockPoisoned(_) => "lock_poisoned",
    };
    RowResult::Rejected { kind: kind.into(), reason: error.to_string() }
}
