//! Core domain types for the book-crossing dataset.
//!
//! A book is identified by its ISBN, but recommendations are keyed by title:
//! several editions (ISBNs) of the same title collapse into one matrix row.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user in the ratings table
pub type UserId = u32;

/// ISBN as it appears in the input files.
///
/// Kept as a string: ISBN-10 values may end in `X` and some rows carry
/// leading zeros that must survive the join untouched.
pub type Isbn = String;

// =============================================================================
// Catalog Types
// =============================================================================

/// One row of the book catalog.
///
/// Author, publisher and year are optional because the catalog has gaps;
/// a gap is rendered as "Unknown" and never blocks a recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub isbn: Isbn,
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<u16>,
}

// =============================================================================
// Rating Types
// =============================================================================

/// A single rating as read from the ratings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub isbn: Isbn,
    /// Rating value (0-10 in the book-crossing data, 0 meaning implicit)
    pub rating: f32,
}

/// A rating joined with the metadata of its book.
///
/// Produced by a left join on ISBN: when the ISBN has no catalog entry all
/// metadata fields are `None` and the rating is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRating {
    pub user_id: UserId,
    pub isbn: Isbn,
    pub rating: f32,
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<u16>,
}

impl EnrichedRating {
    /// Join a raw rating with the catalog row it references, if any
    pub fn join(rating: Rating, book: Option<&Book>) -> Self {
        match book {
            Some(book) => Self {
                user_id: rating.user_id,
                isbn: rating.isbn,
                rating: rating.rating,
                title: (!book.title.is_empty()).then(|| book.title.clone()),
                author: book.author.clone(),
                publisher: book.publisher.clone(),
                year: book.year,
            },
            None => Self {
                user_id: rating.user_id,
                isbn: rating.isbn,
                rating: rating.rating,
                title: None,
                author: None,
                publisher: None,
                year: None,
            },
        }
    }
}

// =============================================================================
// DataIndex - The In-Memory Catalog and Ratings Table
// =============================================================================

/// Holds the raw catalog and the enriched ratings.
///
/// Built once at startup and only read afterwards.
#[derive(Debug, Default)]
pub struct DataIndex {
    /// Catalog rows in file order
    pub(crate) books: Vec<Book>,
    /// Ratings in file order, enriched with catalog metadata
    pub(crate) ratings: Vec<EnrichedRating>,

    /// ISBN -> position in `books` (first occurrence wins)
    pub(crate) isbn_index: HashMap<Isbn, usize>,
    /// Title -> position in `books` (first occurrence wins)
    pub(crate) title_index: HashMap<String, usize>,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// All catalog rows in file order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// All ratings, enriched with book metadata, in file order
    pub fn ratings(&self) -> &[EnrichedRating] {
        &self.ratings
    }

    /// Look up a catalog row by ISBN
    pub fn get_book(&self, isbn: &str) -> Option<&Book> {
        self.isbn_index.get(isbn).map(|&idx| &self.books[idx])
    }

    /// First catalog row carrying this title.
    ///
    /// Editions are not disambiguated: whichever row came first in the
    /// catalog file supplies the metadata shown for the title.
    pub fn first_book_with_title(&self, title: &str) -> Option<&Book> {
        self.title_index.get(title).map(|&idx| &self.books[idx])
    }

    /// Insert a catalog row and update the lookup indices
    pub fn insert_book(&mut self, book: Book) {
        let idx = self.books.len();
        self.isbn_index.entry(book.isbn.clone()).or_insert(idx);
        if !book.title.is_empty() {
            self.title_index.entry(book.title.clone()).or_insert(idx);
        }
        self.books.push(book);
    }

    /// Left-join a rating against the catalog and store it.
    ///
    /// A catalog listing the same ISBN twice joins only its first row, so
    /// each input rating yields exactly one enriched rating. A relational
    /// merge would emit one row per duplicate and count that rating twice
    /// in the popularity thresholds.
    pub fn insert_rating(&mut self, rating: Rating) {
        let book = self.isbn_index.get(&rating.isbn).map(|&idx| &self.books[idx]);
        let enriched = EnrichedRating::join(rating, book);
        self.ratings.push(enriched);
    }

    /// Get counts for debugging/validation: (books, ratings, unmatched ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let unmatched = self.ratings.iter().filter(|r| r.title.is_none()).count();
        (self.books.len(), self.ratings.len(), unmatched)
    }
}
