use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing record files.
///
/// Row-level problems never show up here: a short row or a bad value is
/// read as-is and left for validation to reject.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecordsError {
    #[error("cannot open input '{}': {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("malformed csv in '{}': {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("cannot create output directory '{}': {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("cannot write '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("cannot write csv '{}': {source}", .path.display())]
    Write { path: PathBuf, source: csv::Error },

    #[error("cannot write document '{}': {source}", .path.display())]
    Document {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl RecordsError {
    /// True when the input could not be opened at all (absent, unreadable).
    pub fn is_missing_input(&self) -> bool {
        matches!(self, RecordsError::Open { .. })
    }
}
