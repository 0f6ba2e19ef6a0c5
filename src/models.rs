//! Domain models for the catalog. A `Book` is a plain data holder with the two
//! borrow/return transitions attached; everything else (ordering, persistence,
//! presentation) lives in the other layers. The serialised shape is the flat
//! `{title, author, year, status, borrowed_date}` record kept in
//! `library.json`.

use std::fmt;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Date format used for `borrowed_date` in every external representation.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Two-valued borrow state of a book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum BookStatus {
    /// On the shelf.
    #[default]
    Available,
    /// Lent out; the book carries the date it left.
    Borrowed,
}

impl BookStatus {
    /// Label used in listings, JSON, and CSV.
    pub fn as_str(self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Borrowed => "Borrowed",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Publication year exactly as it was given. Files written by hand may carry a
/// JSON number while the shell always records the typed text, so both shapes
/// are kept verbatim instead of being coerced.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Year {
    /// A JSON number, written back as a number.
    Number(serde_json::Number),
    /// Free text as typed, e.g. `1965` or `c. 1600`.
    Text(String),
}

impl From<&str> for Year {
    fn from(value: &str) -> Self {
        Year::Text(value.to_string())
    }
}

impl From<String> for Year {
    fn from(value: String) -> Self {
        Year::Text(value)
    }
}

impl From<i32> for Year {
    fn from(value: i32) -> Self {
        Year::Number(value.into())
    }
}

impl From<i64> for Year {
    fn from(value: i64) -> Self {
        Year::Number(value.into())
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Number(number) => write!(f, "{number}"),
            Year::Text(text) => f.write_str(text),
        }
    }
}

/// A single catalog entry.
///
/// `status` and `borrowed_date` are private so the pair can only move through
/// [`Book::borrow`] and [`Book::return_book`]: a date is present exactly when
/// the book is borrowed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "BookRecord", into = "BookRecord")]
pub struct Book {
    /// Title shown in listings and the report. Duplicates are allowed.
    pub title: String,
    /// Author as entered; no normalisation.
    pub author: String,
    /// Publication year in whatever shape it arrived.
    pub year: Year,
    /// Current borrow state.
    status: BookStatus,
    /// Day the book went out; `Some` exactly when `status` is `Borrowed`.
    borrowed_date: Option<NaiveDate>,
}

impl Book {
    /// Create an available book. Duplicate titles and free-form years are
    /// accepted as-is.
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: impl Into<Year>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            status: BookStatus::Available,
            borrowed_date: None,
        }
    }

    /// Whether the book is on the shelf or lent out.
    pub fn status(&self) -> BookStatus {
        self.status
    }

    /// Day the book was borrowed, `None` while it is available.
    pub fn borrowed_date(&self) -> Option<NaiveDate> {
        self.borrowed_date
    }

    /// Shorthand for `status() == BookStatus::Borrowed`.
    pub fn is_borrowed(&self) -> bool {
        self.status == BookStatus::Borrowed
    }

    /// Mark the book as borrowed today. Returns `false` without touching the
    /// record when it is already out.
    pub fn borrow(&mut self) -> bool {
        self.borrow_on(Local::now().date_naive())
    }

    /// Same as [`Book::borrow`] with an explicit date.
    pub fn borrow_on(&mut self, date: NaiveDate) -> bool {
        if self.is_borrowed() {
            return false;
        }
        self.status = BookStatus::Borrowed;
        self.borrowed_date = Some(date);
        true
    }

    /// Put the book back on the shelf. Returns `false` when it was not
    /// borrowed.
    pub fn return_book(&mut self) -> bool {
        if !self.is_borrowed() {
            return false;
        }
        self.status = BookStatus::Available;
        self.borrowed_date = None;
        true
    }

    /// `YYYY-MM-DD` rendering of the borrow date, if any.
    pub fn borrowed_date_label(&self) -> Option<String> {
        self.borrowed_date
            .map(|date| date.format(DATE_FORMAT).to_string())
    }
}

impl fmt::Display for Book {
    /// `Title by Author (Year) - Status`, the row format used by listings.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {}",
            self.title, self.author, self.year, self.status
        )
    }
}

/// Flat wire shape of a [`Book`]. Deserialisation goes through here so a
/// missing `borrowed_date` defaults to `None` and the status/date pairing is
/// checked before a `Book` exists.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct BookRecord {
    title: String,
    author: String,
    year: Year,
    status: BookStatus,
    #[serde(default)]
    borrowed_date: Option<NaiveDate>,
}

/// A persisted record whose status and date disagree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidRecord {
    /// `status` is Borrowed but `borrowed_date` is null or absent.
    #[error("'{title}' is marked Borrowed but has no borrowed_date")]
    MissingBorrowDate { title: String },
    /// `status` is Available yet a `borrowed_date` is present.
    #[error("'{title}' is marked Available but has a borrowed_date")]
    UnexpectedBorrowDate { title: String },
}

impl TryFrom<BookRecord> for Book {
    type Error = InvalidRecord;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        match (record.status, record.borrowed_date) {
            (BookStatus::Borrowed, None) => Err(InvalidRecord::MissingBorrowDate {
                title: record.title,
            }),
            (BookStatus::Available, Some(_)) => Err(InvalidRecord::UnexpectedBorrowDate {
                title: record.title,
            }),
            (status, borrowed_date) => Ok(Book {
                title: record.title,
                author: record.author,
                year: record.year,
                status,
                borrowed_date,
            }),
        }
    }
}

impl From<Book> for BookRecord {
    fn from(book: Book) -> Self {
        BookRecord {
            title: book.title,
            author: book.author,
            year: book.year,
            status: book.status,
            borrowed_date: book.borrowed_date,
        }
    }
}
