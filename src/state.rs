use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};

use crate::config::AppConfig;
use crate::data::export;
use crate::data::loader::spawn_load;
use crate::data::merge::{SourceTags, merge};
use crate::data::model::{Dataset, Preview};
use crate::error::CensusError;
use crate::stats::{
    self, CategoricalSummary, FrequencyTable, Histogram, MissingReport, NumericSummary, Summary,
};

// ---------------------------------------------------------------------------
// Background loads
// ---------------------------------------------------------------------------

/// What a finished load does with its dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadTarget {
    /// Replace the current dataset.
    Primary,
    /// Append to the current dataset.
    Merge,
}

struct PendingLoad {
    target: LoadTarget,
    name: String,
    rx: Receiver<anyhow::Result<Dataset>>,
}

// ---------------------------------------------------------------------------
// Derived reports
// ---------------------------------------------------------------------------

/// Reports derived from the current dataset, recomputed on every change.
#[derive(Debug, Clone, Default)]
pub struct Reports {
    pub missing: MissingReport,
    pub numeric: NumericSummary,
    /// Value counts for the configured bar-chart columns.
    pub bars: Vec<(String, FrequencyTable)>,
    pub histograms: Vec<Histogram>,
    /// Only present after the user ran the categorical analysis.
    pub categorical: Option<CategoricalSummary>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full session state, independent of rendering.
pub struct AppState {
    pub config: AppConfig,

    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<Dataset>,

    /// File name of the first loaded file; used as its source tag.
    pub source_name: Option<String>,

    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,

    /// Categorical columns ticked for analysis.
    pub selected_categories: BTreeSet<String>,

    pub reports: Reports,

    /// Everything exportable as JSON.
    pub summary: Summary,

    pub preview: Preview,

    /// Whether merges stamp each row with its source file.
    pub tag_sources: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
    pub status_is_error: bool,

    /// Whether a file loading operation is in progress.
    pub loading: bool,

    pending: Option<PendingLoad>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            preview: Preview::First(config.preview_rows),
            config,
            dataset: None,
            source_name: None,
            numeric_columns: Vec::new(),
            categorical_columns: Vec::new(),
            selected_categories: BTreeSet::new(),
            reports: Reports::default(),
            summary: Summary::default(),
            tag_sources: false,
            status_message: None,
            status_is_error: false,
            loading: false,
            pending: None,
        }
    }

    /// Rows and columns of the current dataset.
    pub fn shape(&self) -> Option<(usize, usize)> {
        self.dataset.as_ref().map(|ds| (ds.len(), ds.columns.len()))
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_is_error = false;
    }

    pub fn report_error(&mut self, err: impl fmt::Display) {
        let msg = format!("{err:#}");
        log::error!("{msg}");
        self.status_message = Some(msg);
        self.status_is_error = true;
    }

    // -- Loading --------------------------------------------------------------

    /// Start parsing `path` in the background. `notify` runs on the worker
    /// thread once the result is ready.
    pub fn request_load<F>(
        &mut self,
        path: PathBuf,
        target: LoadTarget,
        notify: F,
    ) -> Result<(), CensusError>
    where
        F: FnOnce() + Send + 'static,
    {
        if self.pending.is_some() {
            return Err(CensusError::LoadInProgress);
        }
        if target == LoadTarget::Merge && self.dataset.is_none() {
            return Err(CensusError::NoDataset);
        }
        let name = file_label(&path);
        log::info!("Loading {} ({target:?})", path.display());
        self.pending = Some(PendingLoad {
            target,
            name,
            rx: spawn_load(path, notify),
        });
        self.loading = true;
        self.set_status("Loading…");
        Ok(())
    }

    /// Pick up a finished background load, if any. Returns true when state
    /// changed.
    pub fn poll_pending(&mut self) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };
        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(anyhow::anyhow!("loader thread exited")),
        };
        if let Some(pending) = self.pending.take() {
            self.apply_loaded(pending.target, pending.name, result);
        }
        true
    }

    /// Install the outcome of a load.
    pub fn apply_loaded(&mut self, target: LoadTarget, name: String, result: anyhow::Result<Dataset>) {
        self.loading = false;
        let outcome = match result {
            Ok(dataset) => match target {
                LoadTarget::Primary => self.set_dataset(dataset, name),
                LoadTarget::Merge => self.merge_dataset(dataset, name),
            },
            Err(e) => {
                self.report_error(format!("Failed to load {name}: {e:#}"));
                return;
            }
        };
        if let Err(e) = outcome {
            self.report_error(e);
        }
    }

    /// Ingest a newly loaded dataset and compute the default reports.
    pub fn set_dataset(&mut self, dataset: Dataset, name: String) -> Result<(), CensusError> {
        if dataset.is_empty() {
            return Err(CensusError::EmptyDataset);
        }
        log::info!(
            "Loaded {} rows with columns {:?} from {name}",
            dataset.len(),
            dataset.columns
        );
        self.set_status(format!("Loaded ✔ {name}"));
        self.dataset = Some(dataset);
        self.source_name = Some(name);
        self.preview = Preview::First(self.config.preview_rows);
        self.summary = Summary::default();
        self.refresh_reports();
        Ok(())
    }

    /// Append `right` to the current dataset, tagging sources when enabled.
    pub fn merge_dataset(&mut self, right: Dataset, right_name: String) -> Result<(), CensusError> {
        let left = self.dataset.as_ref().ok_or(CensusError::NoDataset)?;
        let tags = self.tag_sources.then(|| SourceTags {
            column: self.config.source_column.clone(),
            left: self.source_name.clone().unwrap_or_default(),
            right: right_name.clone(),
        });
        let merged = merge(left, &right, tags.as_ref());
        log::info!("Merged {right_name}: {} rows", merged.len());
        self.set_status(format!("Merged ✔ — {} rows", merged.len()));
        self.dataset = Some(merged);
        self.refresh_reports();
        Ok(())
    }

    /// Recompute every derived report from the current dataset. The
    /// categorical analysis is dropped since its selection may no longer
    /// apply.
    fn refresh_reports(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        self.numeric_columns = stats::numeric_columns(ds);
        self.categorical_columns = stats::categorical_columns(ds);
        self.selected_categories
            .retain(|c| self.categorical_columns.contains(c));

        let bars = self
            .config
            .bar_columns
            .iter()
            .filter(|c| ds.has_column(c))
            .map(|c| (c.clone(), stats::value_counts(ds, c)))
            .filter(|(_, counts)| !counts.is_empty())
            .collect();
        let histograms: Vec<Histogram> = self
            .config
            .histogram_columns
            .iter()
            .filter_map(|c| stats::histogram(ds, c))
            .collect();

        self.reports = Reports {
            missing: stats::missing_report(ds),
            numeric: stats::numeric_stats(ds),
            bars,
            histograms: histograms.clone(),
            categorical: None,
        };
        log::debug!(
            "Reports: {} numeric columns, {} bar charts, {} histograms",
            self.reports.numeric.len(),
            self.reports.bars.len(),
            self.reports.histograms.len()
        );

        self.summary.numeric = Some(self.reports.numeric.clone());
        self.summary.missing = Some(self.reports.missing.clone());
        self.summary.categorical = None;
        self.summary.histograms = histograms;
    }

    // -- Analysis ---------------------------------------------------------------

    pub fn toggle_category(&mut self, column: &str) {
        if !self.selected_categories.remove(column) {
            self.selected_categories.insert(column.to_string());
        }
    }

    /// The label column used for cross-tabulation, if the dataset has it.
    pub fn active_label(&self) -> Option<&str> {
        let ds = self.dataset.as_ref()?;
        self.config.label_column().filter(|l| ds.has_column(l))
    }

    /// Frequency counts for the selected categorical columns.
    pub fn run_categorical(&mut self) -> Result<(), CensusError> {
        let ds = self.dataset.as_ref().ok_or(CensusError::NoDataset)?;
        let selected: Vec<String> = self
            .categorical_columns
            .iter()
            .filter(|c| self.selected_categories.contains(*c))
            .cloned()
            .collect();
        let result = stats::categorical_stats(ds, &selected, self.active_label())?;
        self.summary.categorical = Some(result.clone());
        self.reports.categorical = Some(result);
        Ok(())
    }

    /// Draw a histogram for any numeric column on demand.
    pub fn show_histogram(&mut self, column: &str) -> bool {
        let Some(hist) = self.dataset.as_ref().and_then(|ds| stats::histogram(ds, column)) else {
            return false;
        };
        match self
            .reports
            .histograms
            .iter_mut()
            .find(|h| h.column == hist.column)
        {
            Some(slot) => *slot = hist.clone(),
            None => self.reports.histograms.push(hist.clone()),
        }
        self.summary.record_histogram(hist);
        true
    }

    // -- Export -----------------------------------------------------------------

    pub fn export_csv(&mut self, path: &Path) -> anyhow::Result<()> {
        let ds = self.dataset.as_ref().ok_or(CensusError::NoDataset)?;
        export::export_csv(ds, path)?;
        self.set_status(format!("Saved {}", path.display()));
        Ok(())
    }

    pub fn export_summary(&mut self, path: &Path) -> anyhow::Result<()> {
        export::export_summary(&self.summary, path)?;
        self.set_status(format!("Saved {}", path.display()));
        Ok(())
    }
}

/// Display name of a file: its file name, or the whole path as a fallback.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
