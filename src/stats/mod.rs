/// Statistics core: pure functions over an in-memory [`Dataset`].
///
/// Every report is recomputed from scratch on request and keeps a
/// deterministic order (column discovery order, first-seen category order,
/// ascending buckets), so re-running on the same dataset serializes
/// byte-identically.
///
/// [`Dataset`]: crate::data::model::Dataset

pub mod categorical;
pub mod columns;
pub mod histogram;
pub mod missing;
pub mod numeric;
pub mod summary;

use serde::ser::{Serialize, Serializer};

pub use categorical::{CategoricalSummary, FrequencyTable, categorical_stats, value_counts};
pub use columns::{categorical_columns, numeric_columns};
pub use histogram::{Bucket, Histogram, histogram};
pub use missing::{MissingEntry, MissingReport, missing_report};
pub use numeric::{NumericStats, NumericSummary, numeric_stats};
pub use summary::Summary;

// ---------------------------------------------------------------------------
// ColumnMap – column name → report, in insertion order
// ---------------------------------------------------------------------------

/// An insertion-ordered map from column name to a per-column report.
/// Serializes as a JSON object with keys in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for ColumnMap<V> {
    fn default() -> Self {
        ColumnMap {
            entries: Vec::new(),
        }
    }
}

impl<V> ColumnMap<V> {
    pub fn push(&mut self, column: impl Into<String>, value: V) {
        self.entries.push((column.into(), value));
    }

    pub fn get(&self, column: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Serialize> Serialize for ColumnMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(c, v)| (c, v)))
    }
}

/// Round to two decimal places.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_map_keeps_insertion_order_in_json() {
        let mut map = ColumnMap::default();
        map.push("zeta", 1);
        map.push("alpha", 2);
        assert_eq!(serde_json::to_string(&map).unwrap(), r#"{"zeta":1,"alpha":2}"#);
        assert_eq!(map.get("alpha"), Some(&2));
        assert_eq!(map.columns().collect::<Vec<_>>(), vec!["zeta", "alpha"]);
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(33.333), 33.33);
        assert_eq!(round2(66.666), 66.67);
        assert_eq!(round2(100.0), 100.0);
    }
}
