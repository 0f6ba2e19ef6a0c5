use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{info, warn};

use super::StoreError;
use crate::models::Book;

/// Serialise `books` as an indented JSON array, overwriting `path`.
pub fn save_books(path: &Path, books: &[Book]) -> Result<(), StoreError> {
    let io_err = |source: io::Error| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    let result = File::create(path).map_err(io_err).and_then(|file| {
        let mut writer = BufWriter::new(file);
        write_books(&mut writer, books).map_err(|err| classify(path, err))?;
        writer.flush().map_err(io_err)
    });

    match &result {
        Ok(()) => info!(path = %path.display(), count = books.len(), "library saved"),
        Err(err) => warn!(path = %path.display(), error = %err, "saving library failed"),
    }
    result
}

/// Read the array stored at `path`, preserving order.
pub fn load_books(path: &Path) -> Result<Vec<Book>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no saved library");
            return Err(StoreError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    match read_books(BufReader::new(file)) {
        Ok(books) => {
            info!(path = %path.display(), count = books.len(), "library loaded");
            Ok(books)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "loading library failed");
            Err(classify(path, err))
        }
    }
}

/// Writer-level half of [`save_books`]; two-space indentation.
pub fn write_books<W: Write>(writer: W, books: &[Book]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, books)
}

/// Reader-level half of [`load_books`].
pub fn read_books<R: Read>(reader: R) -> serde_json::Result<Vec<Book>> {
    serde_json::from_reader(reader)
}

/// serde_json reports read/write failures through its own error type; keep
/// those apart from genuinely bad content.
fn classify(path: &Path, err: serde_json::Error) -> StoreError {
    if err.is_io() {
        StoreError::Io {
            path: path.to_path_buf(),
            source: err.into(),
        }
    } else {
        StoreError::Malformed {
            path: path.to_path_buf(),
            source: err,
        }
    }
}
