use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use tracing::{info, warn};

use super::StoreError;
use crate::models::Book;

/// Header row of the CSV report.
pub const CSV_HEADER: [&str; 5] = ["Title", "Author", "Year", "Status", "Borrowed Date"];

/// Write the report for `books` to `path`, overwriting it.
pub fn export_csv(path: &Path, books: &[Book]) -> Result<(), StoreError> {
    let result = File::create(path)
        .map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|file| {
            write_report(file, books).map_err(|source| StoreError::Export {
                path: path.to_path_buf(),
                source,
            })
        });

    match &result {
        Ok(()) => info!(path = %path.display(), count = books.len(), "report exported"),
        Err(err) => warn!(path = %path.display(), error = %err, "report export failed"),
    }
    result
}

/// Emit the header and one row per book in catalog order. Fields containing
/// commas, quotes or line breaks are quoted; a missing borrow date is an empty
/// field.
pub fn write_report<W: Write>(writer: W, books: &[Book]) -> csv::Result<()> {
    let mut out = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .from_writer(writer);

    out.write_record(CSV_HEADER)?;
    for book in books {
        let year = book.year.to_string();
        let borrowed = book.borrowed_date_label().unwrap_or_default();
        out.write_record([
            book.title.as_str(),
            book.author.as_str(),
            year.as_str(),
            book.status().as_str(),
            borrowed.as_str(),
        ])?;
    }
    out.flush()?;
    Ok(())
}
