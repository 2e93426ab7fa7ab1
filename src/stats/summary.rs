use anyhow::{Context, Result};
use serde::Serialize;

use super::{CategoricalSummary, Histogram, MissingReport, NumericSummary};
use crate::error::CensusError;

/// Everything computed for the current dataset so far; exported as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<MissingReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorical: Option<CategoricalSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub histograms: Vec<Histogram>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.numeric.is_none()
            && self.missing.is_none()
            && self.categorical.is_none()
            && self.histograms.is_empty()
    }

    /// Store a histogram, replacing an earlier one for the same column.
    pub fn record_histogram(&mut self, histogram: Histogram) {
        match self
            .histograms
            .iter_mut()
            .find(|h| h.column == histogram.column)
        {
            Some(slot) => *slot = histogram,
            None => self.histograms.push(histogram),
        }
    }

    /// Pretty-printed JSON (two-space indentation).
    pub fn to_json_pretty(&self) -> Result<String> {
        if self.is_empty() {
            return Err(CensusError::EmptySummary.into());
        }
        serde_json::to_string_pretty(self).context("serializing summary")
    }
}
