//! Flat-file persistence split by format: the JSON library file that is read
//! back on startup and the CSV report that is only ever written.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

mod json;
mod report;

pub use json::{load_books, read_books, save_books, write_books};
pub use report::{export_csv, write_report, CSV_HEADER};

/// Default library file, relative to the working directory.
pub const DEFAULT_LIBRARY_FILE: &str = "library.json";
/// Default report file, relative to the working directory.
pub const DEFAULT_EXPORT_FILE: &str = "library.csv";

/// Failures at the file boundary. `NotFound` is the ordinary "nothing saved
/// yet" case and callers are expected to treat it as such.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no saved library at {}", path.display())]
    NotFound { path: PathBuf },
    #[error("{} is not a valid library file", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write report {}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
