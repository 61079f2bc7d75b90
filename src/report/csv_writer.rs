//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

fn write_rows<W: Write, T: Serialize>(sink: W, rows: &[T]) -> Result<W> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    writer.into_inner().map_err(|e| e.into_error().into())
}

/// Writes rows to a CSV file.
///
/// # Format
/// - Delimiter: `;`
/// - Header: the row type's field names, written before the first row
/// - Encoding: UTF-8
///
/// An empty slice produces an empty file.
pub fn write_csv<T: Serialize>(rows: &[T], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    write_rows(file, rows)?;
    Ok(())
}

/// Converts rows to a CSV string.
///
/// Same format as [`write_csv`].
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let bytes = write_rows(Vec::new(), rows)?;
    Ok(String::from_utf8(bytes)?)
}
