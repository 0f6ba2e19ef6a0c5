use std::path::{Path, PathBuf};

use anyhow::Error;

use crate::catalog::{BorrowOutcome, Catalog, ReturnOutcome};
use crate::config::Config;
use crate::models::BookStatus;

use super::forms::BookForm;
use super::helpers::{marked_line, surface_error, ERROR_MARKER, INFO_MARKER};

/// Entries of the numbered main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    ListAll,
    ListAvailable,
    ListBorrowed,
    Borrow,
    Return,
    Save,
    Load,
    Export,
    Exit,
}

impl MenuChoice {
    /// Map a typed selection (surrounding whitespace ignored) to a menu entry.
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim() {
            "1" => MenuChoice::AddBook,
            "2" => MenuChoice::ListAll,
            "3" => MenuChoice::ListAvailable,
            "4" => MenuChoice::ListBorrowed,
            "5" => MenuChoice::Borrow,
            "6" => MenuChoice::Return,
            "7" => MenuChoice::Save,
            "8" => MenuChoice::Load,
            "9" => MenuChoice::Export,
            "0" => MenuChoice::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// One line of feedback for the user, printed with a `✓` or `!` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn info<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Info,
        }
    }

    pub fn error<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            kind: StatusKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }

    /// Marker-prefixed line, coloured when `styled` is set.
    pub fn render(&self, styled: bool) -> String {
        match self.kind {
            StatusKind::Info => marked_line(INFO_MARKER, &self.text, true, styled),
            StatusKind::Error => marked_line(ERROR_MARKER, &self.text, false, styled),
        }
    }
}

/// Application state: the one catalog owned by the process plus the files it
/// is saved to and exported to. Every operation reports back through a
/// [`StatusMessage`]; nothing here aborts the session.
#[derive(Debug)]
pub struct App {
    catalog: Catalog,
    library_file: PathBuf,
    export_file: PathBuf,
}

impl App {
    pub fn new(catalog: Catalog, config: &Config) -> Self {
        Self {
            catalog,
            library_file: config.library_file.clone(),
            export_file: config.export_file.clone(),
        }
    }

    /// Read-only view of the current catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// JSON file used by save and load.
    pub fn library_file(&self) -> &Path {
        &self.library_file
    }

    pub fn add_book(&mut self, form: BookForm) -> StatusMessage {
        let book = form.into_book();
        let message = format!("'{}' added to library.", book.title);
        self.catalog.add(book);
        StatusMessage::info(message)
    }

    /// Lines of a listing. An empty catalog gets a single notice whatever the
    /// filter; otherwise a heading is followed by one row per matching book.
    pub fn listing(&self, status: Option<BookStatus>) -> Vec<String> {
        if self.catalog.is_empty() {
            return vec!["No books in library yet.".to_string()];
        }

        let mut lines = vec![String::new(), "Books in Library:".to_string()];
        lines.extend(
            self.catalog
                .list(status)
                .map(|(position, book)| format!("{position}. {book}")),
        );
        lines
    }

    pub fn borrow(&mut self, position: usize) -> StatusMessage {
        match self.catalog.borrow_at(position) {
            Ok(outcome) => {
                let title = self.title_at(position);
                match outcome {
                    BorrowOutcome::Borrowed => {
                        StatusMessage::info(format!("You borrowed '{title}'."))
                    }
                    BorrowOutcome::AlreadyBorrowed => {
                        StatusMessage::error(format!("'{title}' is already borrowed."))
                    }
                }
            }
            Err(_) => StatusMessage::error("Invalid book number."),
        }
    }

    pub fn return_book(&mut self, position: usize) -> StatusMessage {
        match self.catalog.return_at(position) {
            Ok(outcome) => {
                let title = self.title_at(position);
                match outcome {
                    ReturnOutcome::Returned => {
                        StatusMessage::info(format!("You returned '{title}'."))
                    }
                    ReturnOutcome::NotBorrowed => {
                        StatusMessage::error(format!("'{title}' was not borrowed."))
                    }
                }
            }
            Err(_) => StatusMessage::error("Invalid book number."),
        }
    }

    pub fn save(&self) -> StatusMessage {
        match self.catalog.save(&self.library_file) {
            Ok(()) => StatusMessage::info("Library saved."),
            Err(err) => StatusMessage::error(format!(
                "Error saving library: {}",
                surface_error(&Error::new(err))
            )),
        }
    }

    /// Replace the catalog from the library file. A missing file is reported
    /// as "nothing saved" and leaves the catalog as it was.
    pub fn load(&mut self) -> StatusMessage {
        match self.catalog.load(&self.library_file) {
            Ok(()) => StatusMessage::info("Library loaded."),
            Err(err) if err.is_not_found() => StatusMessage::error("No saved library found."),
            Err(err) => StatusMessage::error(format!(
                "Error loading library: {}",
                surface_error(&Error::new(err))
            )),
        }
    }

    pub fn export(&self) -> StatusMessage {
        match self.catalog.export_csv(&self.export_file) {
            Ok(()) => StatusMessage::info("Exported to CSV."),
            Err(err) => StatusMessage::error(format!(
                "Error exporting CSV: {}",
                surface_error(&Error::new(err))
            )),
        }
    }

    fn title_at(&self, position: usize) -> &str {
        self.catalog
            .get(position)
            .map(|book| book.title.as_str())
            .unwrap_or_default()
    }
}
