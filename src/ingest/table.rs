//! Table input documents

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::columns::{ColumnMap, Field, RawRow, TableDefaults, DEFAULT_BASELINE_VARIANTS};
use crate::metric::MetricRegistry;
use crate::record::MetricUnit;

/// One section of a source table
///
/// Without `columns`, the map is inferred from the headers seen in `rows`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableSection {
    pub name: Option<String>,
    pub columns: Option<BTreeMap<String, Field>>,
    pub units: BTreeMap<String, MetricUnit>,
    pub defaults: TableDefaults,
    pub baseline_variants: Option<Vec<String>>,
    pub rows: Vec<RawRow>,
}

impl TableSection {
    pub fn headers(&self) -> BTreeSet<&str> {
        self.rows.iter().flat_map(|row| row.keys().map(String::as_str)).collect()
    }

    /// Column map for this section
    pub fn column_map(&self, registry: &MetricRegistry) -> ColumnMap {
        let mut map = match &self.columns {
            Some(columns) => ColumnMap { columns: columns.clone(), ..ColumnMap::default() },
            None => ColumnMap::infer_with(self.headers(), registry),
        };

        map.units.extend(self.units.iter().map(|(column, unit)| (column.clone(), *unit)));
        map.defaults = self.defaults.clone();
        match &self.baseline_variants {
            Some(variants) => map = map.with_baseline_variants(variants),
            None if map.is_long_layout() && map.baseline_variants.is_empty() => {
                map = map.with_baseline_variants(DEFAULT_BASELINE_VARIANTS);
            }
            None => {}
        }
        map
    }
}

/// A whole input document: sections of rows
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableInput {
    pub sections: Vec<TableSection>,
}

impl TableInput {
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|s| s.rows.len()).sum()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TableDocument {
    Sections { sections: Vec<TableSection> },
    Rows(Vec<RawRow>),
}

impl<'de> Deserialize<'de> for TableInput {
    /// Accepts `{"sections": [...]}` or a bare array of rows
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match TableDocument::deserialize(deserializer)? {
            TableDocument::Sections { sections } => TableInput { sections },
            TableDocument::Rows(rows) => {
                TableInput { sections: vec![TableSection { rows, ..TableSection::default() }] }
            }
        })
    }
}
