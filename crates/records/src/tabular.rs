//! CSV reading and writing.
//!
//! Reading is deliberately lenient: rows shorter than the header simply lack
//! the trailing columns, and cells past the header are dropped. Writing
//! derives the header from the records themselves, so zero records means no
//! header and no file.
use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::debug;
use validate::Record;

use crate::error::RecordsError;

/// What a write call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Header plus `rows` data rows were written.
    Written { rows: usize },
    /// No records were given, so nothing was written.
    NothingWritten,
}

/// Reads every row of a headed CSV file.
pub fn read_records(path: &Path) -> Result<Vec<Record>, RecordsError> {
    let file = File::open(path).map_err(|source| RecordsError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_records_from(file).map_err(|source| RecordsError::Csv {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads every row of headed CSV data from any reader.
pub fn read_records_from<R: io::Read>(reader: R) -> Result<Vec<Record>, csv::Error> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    let mut row = StringRecord::new();
    while reader.read_record(&mut row)? {
        if row.len() > headers.len() {
            debug!(
                line = row.position().map(|p| p.line()),
                extra_cells = row.len() - headers.len(),
                "csv_extra_cells_dropped"
            );
        }
        records.push(headers.iter().zip(row.iter()).collect::<Record>());
    }
    Ok(records)
}

/// Writes records to `path`, replacing any existing file. Nothing is
/// created when `records` is empty.
pub fn write_records(path: &Path, records: &[Record]) -> Result<WriteOutcome, RecordsError> {
    if records.is_empty() {
        return Ok(WriteOutcome::NothingWritten);
    }

    let file = File::create(path).map_err(|source| RecordsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_records_to(file, records).map_err(|source| RecordsError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes records as CSV into any writer.
///
/// The header is the union of all column names in first-appearance order;
/// a record lacking a column gets an empty cell.
pub fn write_records_to<W: io::Write>(
    writer: W,
    records: &[Record],
) -> Result<WriteOutcome, csv::Error> {
    if records.is_empty() {
        return Ok(WriteOutcome::NothingWritten);
    }

    let header = header_of(records);
    let mut writer = WriterBuilder::new().from_writer(writer);
    writer.write_record(&header)?;
    for record in records {
        writer.write_record(header.iter().map(|column| record.get(column).unwrap_or("")))?;
    }
    writer.flush()?;

    Ok(WriteOutcome::Written {
        rows: records.len(),
    })
}

fn header_of(records: &[Record]) -> Vec<&str> {
    let mut header: Vec<&str> = Vec::new();
    for record in records {
        for column in record.field_names() {
            if !header.contains(&column) {
                header.push(column);
            }
        }
    }
    header
}
