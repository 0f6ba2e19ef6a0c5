use std::num::{IntErrorKind, ParseIntError};

use crate::models::Book;

/// Raw answers collected by the "Add Book" prompts. Nothing is validated:
/// empty titles, duplicate titles and free-text years are all accepted.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub year: String,
}

impl BookForm {
    /// Labels shown for each prompt, in the order the answers are read.
    pub(crate) const PROMPTS: [&'static str; 3] = ["Title: ", "Author: ", "Year: "];

    /// Build the form from answers given in [`BookForm::PROMPTS`] order.
    pub(crate) fn from_answers([title, author, year]: [String; 3]) -> Self {
        Self {
            title,
            author,
            year,
        }
    }

    /// Turn the answers into a fresh, available book. The year is kept as the
    /// text that was typed.
    pub fn into_book(self) -> Book {
        Book::new(self.title, self.author, self.year)
    }
}

/// Parse a typed book number. Anything that is not an integer is rejected.
/// Zero and negative numbers come back as position 0 and integers too large
/// to represent as `usize::MAX`, so the catalog reports both as out of range.
pub fn parse_position(raw: &str) -> Result<usize, ParseIntError> {
    match raw.trim().parse::<i64>() {
        Ok(number) => Ok(usize::try_from(number).unwrap_or(0)),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Ok(usize::MAX),
            IntErrorKind::NegOverflow => Ok(0),
            _ => Err(err),
        },
    }
}
