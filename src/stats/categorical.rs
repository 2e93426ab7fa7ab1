use std::collections::HashMap;

use serde::{Serialize, Serializer};

use super::ColumnMap;
use crate::data::model::{Cell, Dataset};
use crate::error::CensusError;

/// Key used for null or absent cells.
pub const MISSING_KEY: &str = "Missing";
/// Label suffix values for a null cell and for a row without the label key.
pub const NULL_LABEL: &str = "null";
pub const ABSENT_LABEL: &str = "undefined";

// ---------------------------------------------------------------------------
// FrequencyTable – key → count in first-seen order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    pub fn increment(&mut self, key: String) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, 1));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<usize> {
        self.index.get(key).map(|&i| self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, n)| (k.as_str(), *n))
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, n)| (k, n)))
    }
}

pub type CategoricalSummary = ColumnMap<FrequencyTable>;

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Text form of a cell for use as a category key.
fn category_key(cell: Option<&Cell>) -> String {
    match cell {
        None | Some(Cell::Null) => MISSING_KEY.to_string(),
        Some(cell) => cell.to_string(),
    }
}

/// Text form of a label cell; null prints as `null`, an absent key as
/// `undefined`.
fn label_value(cell: Option<&Cell>) -> String {
    match cell {
        None => ABSENT_LABEL.to_string(),
        Some(Cell::Null) => NULL_LABEL.to_string(),
        Some(cell) => cell.to_string(),
    }
}

/// Frequency counts for each selected column.
///
/// With a `label` column every key becomes `"{value} | {label}:{label value}"`,
/// turning the plain counts into a cross-tabulation against the label.
pub fn categorical_stats(
    dataset: &Dataset,
    columns: &[String],
    label: Option<&str>,
) -> Result<CategoricalSummary, CensusError> {
    if columns.is_empty() {
        return Err(CensusError::EmptySelection);
    }
    let mut out = CategoricalSummary::default();
    for col in columns {
        let mut counts = FrequencyTable::default();
        for rec in &dataset.records {
            let mut key = category_key(rec.get(col));
            if let Some(label) = label {
                key = format!("{key} | {label}:{}", label_value(rec.get(label)));
            }
            counts.increment(key);
        }
        out.push(col.clone(), counts);
    }
    Ok(out)
}

/// Whether a cell contributes to the default bar charts: missing cells,
/// numeric zero and `false` are left out.
fn is_countable(cell: &Cell) -> bool {
    match cell {
        Cell::Integer(i) => *i != 0,
        Cell::Float(v) => *v != 0.0 && !v.is_nan(),
        Cell::Bool(b) => *b,
        Cell::String(s) => !s.is_empty(),
        Cell::Null => false,
    }
}

/// Plain counts of the non-empty, non-zero values of one column.
pub fn value_counts(dataset: &Dataset, column: &str) -> FrequencyTable {
    let mut counts = FrequencyTable::default();
    for cell in dataset.column(column) {
        if let Some(cell) = cell.filter(|c| is_countable(c)) {
            counts.increment(cell.to_string());
        }
    }
    counts
}
