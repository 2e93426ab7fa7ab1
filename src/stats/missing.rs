use serde::Serialize;

use super::round2;
use crate::data::model::{Dataset, is_missing};

/// Share of missing cells in one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntry {
    pub column: String,
    /// Percentage of rows, rounded to two decimals.
    pub percentage: f64,
}

pub type MissingReport = Vec<MissingEntry>;

/// Missing-value percentage for every column, in column order.
///
/// A cell is missing when its key is absent, it is null, empty text or NaN.
/// An empty dataset yields an empty report.
pub fn missing_report(dataset: &Dataset) -> MissingReport {
    let total = dataset.len();
    if total == 0 {
        return Vec::new();
    }
    dataset
        .columns
        .iter()
        .map(|col| {
            let missing = dataset.column(col).filter(|c| is_missing(*c)).count();
            MissingEntry {
                column: col.clone(),
                percentage: round2(missing as f64 / total as f64 * 100.0),
            }
        })
        .collect()
}
