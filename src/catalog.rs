//! The in-memory catalog: an ordered list of books addressed by 1-based
//! position. Positions are never stored; they are the current index plus one,
//! so the number a user sees in a listing is the number they type back.

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::models::{Book, BookStatus};
use crate::store::{self, StoreError};

/// Errors raised when a position does not resolve to a book.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// `position` was 0 or past the last book.
    #[error("position {position} is out of range (catalog holds {len} books)")]
    OutOfRange { position: usize, len: usize },
}

/// Result of a borrow request that reached a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowOutcome {
    /// The book was available and is now out.
    Borrowed,
    /// The book was already out; nothing changed.
    AlreadyBorrowed,
}

/// Result of a return request that reached a book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// The book was out and is back on the shelf.
    Returned,
    /// The book was not borrowed; nothing changed.
    NotBorrowed,
}

/// Every book known to the process, in insertion order. Created empty, replaced
/// wholesale by [`Catalog::load`] and written out whole by [`Catalog::save`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Backing list; index `i` is position `i + 1`.
    books: Vec<Book>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of books, which is also the highest valid position.
    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Append a book at the end. Duplicates are allowed.
    pub fn add(&mut self, book: Book) {
        debug!(title = %book.title, position = self.books.len() + 1, "adding book");
        self.books.push(book);
    }

    /// Iterate `(position, book)` pairs in insertion order, optionally keeping
    /// only books in `status`. Positions stay catalog positions, so a filtered
    /// listing may skip numbers.
    pub fn list(
        &self,
        status: Option<BookStatus>,
    ) -> impl Iterator<Item = (usize, &Book)> + '_ {
        self.books
            .iter()
            .enumerate()
            .map(|(idx, book)| (idx + 1, book))
            .filter(move |(_, book)| status.map_or(true, |wanted| book.status() == wanted))
    }

    /// Resolve a 1-based position.
    pub fn get(&self, position: usize) -> Result<&Book, CatalogError> {
        let idx = self.index_of(position)?;
        Ok(&self.books[idx])
    }

    /// Borrow the book at `position`, stamping today's date. An already
    /// borrowed book is reported through [`BorrowOutcome::AlreadyBorrowed`]
    /// and left as it was.
    pub fn borrow_at(&mut self, position: usize) -> Result<BorrowOutcome, CatalogError> {
        let idx = self.index_of(position)?;
        let book = &mut self.books[idx];
        if book.borrow() {
            debug!(title = %book.title, position, "book borrowed");
            Ok(BorrowOutcome::Borrowed)
        } else {
            Ok(BorrowOutcome::AlreadyBorrowed)
        }
    }

    /// Return the book at `position`. A book that is on the shelf is reported
    /// through [`ReturnOutcome::NotBorrowed`] and left as it was.
    pub fn return_at(&mut self, position: usize) -> Result<ReturnOutcome, CatalogError> {
        let idx = self.index_of(position)?;
        let book = &mut self.books[idx];
        if book.return_book() {
            debug!(title = %book.title, position, "book returned");
            Ok(ReturnOutcome::Returned)
        } else {
            Ok(ReturnOutcome::NotBorrowed)
        }
    }

    /// Write the whole catalog to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        store::save_books(path, &self.books)
    }

    /// Replace the catalog with the contents of `path`. On any error the
    /// current books are left untouched.
    pub fn load(&mut self, path: &Path) -> Result<(), StoreError> {
        self.books = store::load_books(path)?;
        Ok(())
    }

    /// Write the CSV report to `path`.
    pub fn export_csv(&self, path: &Path) -> Result<(), StoreError> {
        store::export_csv(path, &self.books)
    }

    fn index_of(&self, position: usize) -> Result<usize, CatalogError> {
        if position == 0 || position > self.books.len() {
            return Err(CatalogError::OutOfRange {
                position,
                len: self.books.len(),
            });
        }
        Ok(position - 1)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add(Book::new("Dune", "Herbert", "1965"));
        catalog.add(Book::new("Emma", "Austen", "1815"));
        catalog.add(Book::new("Dune", "Herbert", "1965"));
        catalog
    }

    #[test]
    fn empty_catalog_lists_nothing() {
        let catalog = Catalog::new();
        assert_eq!(catalog.list(None).count(), 0);
    }

    #[test]
    fn add_keeps_insertion_order_and_duplicates() {
        let catalog = sample();
        let titles: Vec<_> = catalog
            .list(None)
            .map(|(pos, book)| (pos, book.title.as_str()))
            .collect();
        assert_eq!(titles, vec![(1, "Dune"), (2, "Emma"), (3, "Dune")]);
    }

    #[test]
    fn filtered_listing_keeps_catalog_positions() {
        let mut catalog = sample();
        catalog.borrow_at(2).unwrap();

        let borrowed: Vec<_> = catalog
            .list(Some(BookStatus::Borrowed))
            .map(|(pos, _)| pos)
            .collect();
        let available: Vec<_> = catalog
            .list(Some(BookStatus::Available))
            .map(|(pos, _)| pos)
            .collect();
        assert_eq!(borrowed, vec![2]);
        assert_eq!(available, vec![1, 3]);
    }

    #[test]
    fn out_of_range_positions_never_mutate() {
        let mut catalog = sample();
        let before = catalog.clone();
        for position in [0, 4, 99] {
            assert_eq!(
                catalog.borrow_at(position),
                Err(CatalogError::OutOfRange { position, len: 3 })
            );
            assert_eq!(
                catalog.return_at(position),
                Err(CatalogError::OutOfRange { position, len: 3 })
            );
        }
        assert_eq!(catalog, before);
    }

    #[test]
    fn borrow_and_return_walkthrough() {
        let mut catalog = Catalog::new();
        catalog.add(Book::new("Dune", "Herbert", 1965));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(1).unwrap().status(), BookStatus::Available);

        assert_eq!(catalog.borrow_at(1), Ok(BorrowOutcome::Borrowed));
        let book = catalog.get(1).unwrap();
        assert_eq!(book.status(), BookStatus::Borrowed);
        assert_eq!(book.borrowed_date(), Some(Local::now().date_naive()));

        let snapshot = catalog.clone();
        assert_eq!(catalog.borrow_at(1), Ok(BorrowOutcome::AlreadyBorrowed));
        assert_eq!(catalog, snapshot);

        assert_eq!(catalog.return_at(1), Ok(ReturnOutcome::Returned));
        let book = catalog.get(1).unwrap();
        assert_eq!(book.status(), BookStatus::Available);
        assert_eq!(book.borrowed_date(), None);

        assert_eq!(catalog.return_at(1), Ok(ReturnOutcome::NotBorrowed));
    }
}
