use nis_model::ConfigError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Fatal failures of a cleaning pipeline.
///
/// Row-level data-quality problems are not errors: those rows are dropped
/// and logged by the cleaner that found them.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unrecognized time type `{value}` (expected week or month)")]
    UnrecognizedTimeType { value: String },
    #[error("column `{column}`: value `{value}` does not match format `{format}`")]
    UnrecognizedColumnFormat {
        column: String,
        value: String,
        format: String,
    },
    #[error(
        "{} near-duplicate group(s) disagree beyond tolerance {tolerance}: {}",
        groups.len(),
        groups.join("; ")
    )]
    ReconciliationConflict { tolerance: f64, groups: Vec<String> },
    #[error("expected {expected}-fold duplication, found groups of size {found:?}")]
    UnexpectedDuplication { expected: usize, found: Vec<usize> },
    #[error("synonym {synonym} has {uncovered} observation(s) not covered by the majority synonym")]
    SynonymMismatch { synonym: String, uncovered: usize },
    #[error("missing canonical column(s): {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },
    #[error("no cleaning pipeline registered for dataset `{id}`")]
    UnknownDataset { id: String },
    #[error("invalid dataset registry: {reason}")]
    Registry { reason: String },
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, CleanError>;
