use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{info, warn};
use validate::Record;

use crate::document::write_document;
use crate::error::RecordsError;
use crate::tabular::{read_records, write_records, WriteOutcome};

/// Where record sets and report documents go.
///
/// `name` is the artifact name, e.g. `validated.csv` or `report.json`.
pub trait RecordSink: Send + Sync {
    /// Write a record set. Empty sets are not written and report
    /// [`WriteOutcome::NothingWritten`]; an artifact left under `name` by an
    /// earlier run is removed.
    fn write_records(&self, name: &str, records: &[Record]) -> Result<WriteOutcome, RecordsError>;

    /// Write one structured document.
    fn write_document(&self, name: &str, doc: &serde_json::Value) -> Result<(), RecordsError>;

    /// Remove the artifact stored under `name`. Returns `true` when one
    /// existed.
    fn clear_artifact(&self, name: &str) -> Result<bool, RecordsError>;
}

/// Reads the full input in one go.
pub trait RecordSource: Send + Sync {
    fn read_records(&self) -> Result<Vec<Record>, RecordsError>;

    /// Human-readable origin for logs.
    fn describe(&self) -> String;
}

/// CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvFileSource {
    fn read_records(&self) -> Result<Vec<Record>, RecordsError> {
        read_records(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Records already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<Record>,
}

impl InMemorySource {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

impl RecordSource for InMemorySource {
    fn read_records(&self) -> Result<Vec<Record>, RecordsError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory ({} records)", self.records.len())
    }
}

/// Writes CSV and JSON files into one directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the output directory if it is absent. Returns `true` when it
    /// had to be created.
    pub fn ensure_dir(&self) -> Result<bool, RecordsError> {
        if self.dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&self.dir).map_err(|source| RecordsError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        info!(dir = %self.dir.display(), "output_dir_created");
        Ok(true)
    }
}

impl RecordSink for DirectorySink {
    fn write_records(&self, name: &str, records: &[Record]) -> Result<WriteOutcome, RecordsError> {
        let path = self.dir.join(name);
        if records.is_empty() {
            warn!(path = %path.display(), "nothing_written_empty_record_set");
            self.clear_artifact(name)?;
            return Ok(WriteOutcome::NothingWritten);
        }

        self.ensure_dir()?;
        let outcome = write_records(&path, records)?;
        info!(path = %path.display(), rows = records.len(), "records_written");
        Ok(outcome)
    }

    fn write_document(&self, name: &str, doc: &serde_json::Value) -> Result<(), RecordsError> {
        let path = self.dir.join(name);
        self.ensure_dir()?;
        write_document(&path, doc)?;
        info!(path = %path.display(), "document_written");
        Ok(())
    }

    fn clear_artifact(&self, name: &str) -> Result<bool, RecordsError> {
        let path = self.dir.join(name);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(path = %path.display(), "stale_artifact_removed");
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(source) => Err(RecordsError::Io { path, source }),
        }
    }
}

/// Keeps everything written to it, keyed by artifact name.
#[derive(Debug, Default)]
pub struct InMemorySink {
    record_sets: RwLock<BTreeMap<String, Vec<Record>>>,
    documents: RwLock<BTreeMap<String, serde_json::Value>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self, name: &str) -> Option<Vec<Record>> {
        self.record_sets
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
    }

    pub fn document(&self, name: &str) -> Option<serde_json::Value> {
        self.documents
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(name)
            .cloned()
    }

    /// Names of everything written so far, record sets and documents.
    pub fn artifact_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .record_sets
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .keys()
            .cloned()
            .collect();
        names.extend(
            self.documents
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .keys()
                .cloned(),
        );
        names.sort();
        names
    }
}

impl RecordSink for InMemorySink {
    fn write_records(&self, name: &str, records: &[Record]) -> Result<WriteOutcome, RecordsError> {
        if records.is_empty() {
            self.clear_artifact(name)?;
            return Ok(WriteOutcome::NothingWritten);
        }
        self.record_sets
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(name.to_string(), records.to_vec());
        Ok(WriteOutcome::Written {
            rows: records.len(),
        })
    }

    fn write_document(&self, name: &str, doc: &serde_json::Value) -> Result<(), RecordsError> {
        self.documents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(name.to_string(), doc.clone());
        Ok(())
    }

    fn clear_artifact(&self, name: &str) -> Result<bool, RecordsError> {
        let records = self
            .record_sets
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(name);
        let document = self
            .documents
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(name);
        Ok(records.is_some() || document.is_some())
    }
}
