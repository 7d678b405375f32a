//! Row normalizer
//!
//! Maps raw rows onto [`RawCandidate`]s. The normalizer never rejects a row;
//! judging the candidate is the validator's job.

use std::collections::BTreeMap;

use super::columns::{ColumnMap, Field, RawRow};
use crate::record::{CandidateRole, CandidateValue, RawCandidate, RawValue};

const PENDING_STATUS: &[&str] = &["pending", "wip", "tbd", "todo", "in progress", "coming soon"];

/// Stateful normalizer for the rows of one table
///
/// Source tables often print the subject once and leave it blank on the
/// following rows. A row without a subject inherits the most recent subject
/// of the same section; [`Normalizer::begin_section`] forgets it.
#[derive(Debug, Default)]
pub struct Normalizer {
    current_subject: Option<String>,
    /// Baseline metrics of the current subject group (long layout)
    group_baseline: Option<(String, BTreeMap<String, CandidateValue>)>,
    /// Rows normalized in the current section
    rows_seen: usize,
}

/// Normalize a single row with no grouping context
pub fn normalize(row: &RawRow, map: &ColumnMap) -> RawCandidate {
    Normalizer::new().normalize(row, map)
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new table section; grouping state and row numbering restart
    pub fn begin_section(&mut self) {
        self.current_subject = None;
        self.group_baseline = None;
        self.rows_seen = 0;
    }

    /// Rows normalized so far in the current section
    pub fn rows_seen(&self) -> usize {
        self.rows_seen
    }

    pub fn normalize(&mut self, row: &RawRow, map: &ColumnMap) -> RawCandidate {
        let defaults = &map.defaults;
        let mut candidate = RawCandidate {
            technique_family: defaults.technique_family.clone(),
            variant: defaults.variant.clone(),
            processor: defaults.processor.clone(),
            execution_provider: defaults.execution_provider.clone(),
            source_framework: defaults.source_framework.clone(),
            row_index: Some(self.rows_seen),
            ..RawCandidate::default()
        };
        self.rows_seen += 1;

        let mut values = BTreeMap::new();
        for (column, cell) in row {
            if cell.is_blank() {
                continue;
            }
            let field = map.field(column);

            if let Some(metric) = field.metric() {
                if cell.is_placeholder() {
                    candidate.pending = true;
                    continue;
                }
                let value = CandidateValue { raw: cell.clone(), unit: map.unit(column) };
                let side = match field {
                    Field::Baseline(_) => &mut candidate.baseline,
                    Field::Optimized(_) => &mut candidate.optimized,
                    Field::Reported(_) => &mut candidate.reported,
                    _ => &mut values,
                };
                side.insert(metric.to_string(), value);
                continue;
            }

            let text = cell.to_text();
            match field {
                Field::Subject => candidate.subject = Some(text),
                Field::TechniqueFamily => candidate.technique_family = Some(text),
                Field::Variant => candidate.variant = Some(text),
                Field::Processor => candidate.processor = Some(text),
                Field::ExecutionProvider => candidate.execution_provider = Some(text),
                Field::SourceFramework => candidate.source_framework = Some(text),
                Field::Status => {
                    if cell.is_placeholder() || PENDING_STATUS.contains(&text.to_lowercase().as_str())
                    {
                        candidate.pending = true;
                    }
                }
                _ => {}
            }
        }

        self.group_subject(&mut candidate);
        if map.is_long_layout() {
            self.apply_long_layout(&mut candidate, values, map);
        }

        tracing::debug!(
            row = candidate.row_index.unwrap_or_default(),
            subject = candidate.subject.as_deref().unwrap_or(""),
            pending = candidate.pending,
            "row normalized"
        );
        candidate
    }

    fn group_subject(&mut self, candidate: &mut RawCandidate) {
        match &candidate.subject {
            Some(subject) => {
                if self.current_subject.as_ref() != Some(subject) {
                    self.group_baseline = None;
                }
                self.current_subject = Some(subject.clone());
            }
            None => candidate.subject = self.current_subject.clone(),
        }
    }

    fn apply_long_layout(
        &mut self,
        candidate: &mut RawCandidate,
        values: BTreeMap<String, CandidateValue>,
        map: &ColumnMap,
    ) {
        let is_baseline = candidate.variant.as_deref().is_some_and(|v| map.is_baseline_variant(v));

        if is_baseline {
            candidate.role = CandidateRole::BaselineReference;
            // A placeholder baseline row keeps the group's earlier baseline.
            if let (Some(subject), false) = (&candidate.subject, values.is_empty()) {
                self.group_baseline = Some((subject.clone(), values.clone()));
            }
            candidate.baseline = values;
            return;
        }

        candidate.optimized.extend(values);
        if let Some((subject, baseline)) = &self.group_baseline {
            if candidate.subject.as_ref() == Some(subject) {
                for (metric, value) in baseline {
                    candidate.baseline.entry(metric.clone()).or_insert_with(|| value.clone());
                }
            }
        }
    }
}
