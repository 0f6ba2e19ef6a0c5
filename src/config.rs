//! Command-line and environment configuration. Every option has a default so
//! running the binary bare behaves like the classic menu program: data lives
//! in `library.json` and reports go to `library.csv` in the working directory.

use std::path::PathBuf;

use clap::Parser;

use crate::store::{DEFAULT_EXPORT_FILE, DEFAULT_LIBRARY_FILE};

#[derive(Debug, Clone, Parser)]
#[command(name = "library")]
#[command(about = "Personal library catalog: add, borrow, return, save and export books")]
pub struct Config {
    /// JSON file the catalog is saved to and loaded from
    #[arg(long, env = "LIBRARY_FILE", default_value = DEFAULT_LIBRARY_FILE)]
    pub library_file: PathBuf,

    /// CSV file written by the export option
    #[arg(long, env = "LIBRARY_EXPORT", default_value = DEFAULT_EXPORT_FILE)]
    pub export_file: PathBuf,

    /// Start with an empty catalog instead of loading the library file
    #[arg(long)]
    pub no_autoload: bool,

    /// Print status markers without colour
    #[arg(long)]
    pub plain: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_file: PathBuf::from(DEFAULT_LIBRARY_FILE),
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
            no_autoload: false,
            plain: false,
        }
    }
}
