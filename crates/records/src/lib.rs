//! Record source and sink for rosterkpi.
//!
//! The pipeline never touches files directly; it talks to a [`RecordSource`]
//! and a [`RecordSink`]. This crate provides the file-backed pair
//! ([`CsvFileSource`], [`DirectorySink`]) and in-memory doubles
//! ([`InMemorySource`], [`InMemorySink`]).
//!
//! ```
//! use records::{InMemorySink, RecordSink, WriteOutcome};
//! use validate::Record;
//!
//! let sink = InMemorySink::new();
//! let rows = vec![Record::from_pairs([("nome", "Ana")])];
//!
//! assert_eq!(
//!     sink.write_records("validated.csv", &rows).unwrap(),
//!     WriteOutcome::Written { rows: 1 }
//! );
//! assert_eq!(
//!     sink.write_records("errors.csv", &[]).unwrap(),
//!     WriteOutcome::NothingWritten
//! );
//! ```
mod document;
mod error;
mod sink;
mod tabular;

pub use crate::document::write_document;
pub use crate::error::RecordsError;
pub use crate::sink::{
    CsvFileSource, DirectorySink, InMemorySink, InMemorySource, RecordSink, RecordSource,
};
pub use crate::tabular::{
    read_records, read_records_from, write_records, write_records_to, WriteOutcome,
};
