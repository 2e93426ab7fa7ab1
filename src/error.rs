use thiserror::Error;

/// Precondition failures reported to the user. The operation is aborted and
/// nothing partial is kept.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CensusError {
    #[error("Load a CSV first")]
    NoDataset,

    #[error("The loaded file has no rows")]
    EmptyDataset,

    #[error("Select categorical columns")]
    EmptySelection,

    #[error("Run analysis first")]
    EmptySummary,

    #[error("A file is still loading")]
    LoadInProgress,
}
