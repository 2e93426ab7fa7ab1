use serde::{Serialize, Serializer};

use super::ColumnMap;
use super::columns::numeric_columns;
use crate::data::model::Dataset;

/// Descriptive statistics of one numeric column.
///
/// `std` is the population standard deviation. Quartiles use the
/// nearest-rank, zero-indexed definition `sorted[floor(p * (n - 1))]`
/// without interpolation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericStats {
    pub count: usize,
    #[serde(serialize_with = "fixed2")]
    pub mean: f64,
    #[serde(serialize_with = "fixed2")]
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

pub type NumericSummary = ColumnMap<NumericStats>;

/// Mean and std are reported as fixed two-decimal text.
fn fixed2<S: Serializer>(v: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{v:.2}"))
}

impl NumericStats {
    /// Describe a set of values. `None` when there is nothing to describe.
    pub fn describe(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let pct = |p: f64| sorted[(p * (n - 1) as f64).floor() as usize];

        Some(NumericStats {
            count: n,
            mean,
            std: variance.sqrt(),
            min: sorted[0],
            q1: pct(0.25),
            median: pct(0.5),
            q3: pct(0.75),
            max: sorted[n - 1],
        })
    }
}

/// Statistics for every numeric column. Columns without a single numeric
/// value are left out.
pub fn numeric_stats(dataset: &Dataset) -> NumericSummary {
    let mut out = NumericSummary::default();
    for col in numeric_columns(dataset) {
        let values = dataset.numeric_values(&col);
        match NumericStats::describe(&values) {
            Some(stats) => out.push(col, stats),
            None => log::debug!("Skipping numeric column {col}: no valid values"),
        }
    }
    out
}
