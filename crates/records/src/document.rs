use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::RecordsError;

/// Writes `doc` as pretty-printed JSON followed by a newline.
pub fn write_document<T: Serialize + ?Sized>(path: &Path, doc: &T) -> Result<(), RecordsError> {
    let io_error = |source| RecordsError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, doc).map_err(|source| RecordsError::Document {
        path: path.to_path_buf(),
        source,
    })?;
    writer.write_all(b"\n").map_err(io_error)?;
    writer.flush().map_err(io_error)
}
