//! Core library surface for the personal library catalog.
//!
//! The binary only parses configuration, sets up logging and hands stdin and
//! stdout to the console loop; everything it drives is re-exported here so
//! tests and other tooling can use the same pieces.
pub mod catalog;
pub mod config;
pub mod models;
pub mod store;
pub mod ui;

/// The in-memory catalog and the outcomes of its position-addressed
/// operations.
pub use catalog::{BorrowOutcome, Catalog, CatalogError, ReturnOutcome};

pub use config::Config;

/// The domain types every other layer manipulates.
pub use models::{Book, BookStatus, Year};

pub use store::StoreError;

/// The interactive application entry point and state container.
pub use ui::{run_app, App, Console, Interrupt};
