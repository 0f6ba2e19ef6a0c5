use anyhow::Error;
use crossterm::style::Stylize;

/// Main menu, printed before every prompt.
pub(crate) const MENU: &str = "
===== LIBRARY MENU =====
1. Add Book
2. List All Books
3. List Available Books
4. List Borrowed Books
5. Borrow Book
6. Return Book
7. Save Library
8. Load Library
9. Export to CSV
0. Exit
========================
";

/// Marker printed in front of successful operations.
pub(crate) const INFO_MARKER: &str = "✓";
/// Marker printed in front of refusals and failures.
pub(crate) const ERROR_MARKER: &str = "!";

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Prefix `text` with its marker, colouring the line when `styled` is set.
pub(crate) fn marked_line(marker: &str, text: &str, success: bool, styled: bool) -> String {
    let line = format!("{marker} {text}");
    match (styled, success) {
        (false, _) => line,
        (true, true) => line.green().to_string(),
        (true, false) => line.red().to_string(),
    }
}
