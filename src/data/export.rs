use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Dataset;
use crate::error::CensusError;
use crate::stats::Summary;

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Serialize the dataset as CSV, using its column list as the header.
/// Null and absent cells become empty fields.
pub fn write_csv<W: Write>(dataset: &Dataset, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer
        .write_record(&dataset.columns)
        .context("writing CSV header")?;
    for (row_no, rec) in dataset.records.iter().enumerate() {
        let fields = dataset
            .columns
            .iter()
            .map(|col| rec.get(col).map(|c| c.to_string()).unwrap_or_default());
        writer
            .write_record(fields)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    writer.flush().context("flushing CSV output")?;
    Ok(())
}

pub fn to_csv_string(dataset: &Dataset) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(dataset, &mut buf)?;
    String::from_utf8(buf).context("CSV output is not UTF-8")
}

/// Write the dataset to `path` as CSV.
pub fn export_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    if dataset.is_empty() {
        return Err(CensusError::EmptyDataset.into());
    }
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_csv(dataset, file)?;
    log::info!("Exported {} rows to {}", dataset.len(), path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// JSON summary export
// ---------------------------------------------------------------------------

/// Write the summary to `path` as pretty JSON.
pub fn export_summary(summary: &Summary, path: &Path) -> Result<()> {
    let json = summary.to_json_pretty()?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Exported summary to {}", path.display());
    Ok(())
}
