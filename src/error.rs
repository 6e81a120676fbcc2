//! Error types for loading and saving schedule data.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for schedule I/O.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Errors raised while reading or writing snapshots, CSV files and settings.
///
/// The timeline layout itself never fails; only the host's data plumbing does.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Filesystem access failed.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Snapshot or settings JSON was malformed.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV reader or writer failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV header lacks a column we cannot do without.
    #[error("CSV is missing required columns. Found headers: {found:?}. Need a column for the task label.")]
    MissingColumns { found: Vec<String> },

    /// Every data row was rejected.
    #[error("No valid tasks found in CSV ({skipped} rows skipped)")]
    NoRows { skipped: usize },

    /// The file had a header but no data rows.
    #[error("CSV file is empty or has no data rows")]
    Empty,
}

impl ScheduleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScheduleError::Io {
            path: path.into(),
            source,
        }
    }
}
