//! Building the DataIndex from the two input files.
//!
//! Loading is the only fallible stage of the whole recommender: once both
//! tables are parsed, the left join on ISBN cannot fail.

use crate::error::Result;
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

impl DataIndex {
    /// Load the book catalog and the ratings table and join them.
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Index the catalog by ISBN and by title
    /// 3. Left-join every rating against the catalog
    pub fn load_from_files(books_path: &Path, ratings_path: &Path) -> Result<Self> {
        info!(
            books = %books_path.display(),
            ratings = %ratings_path.display(),
            "Loading book-crossing dataset"
        );

        let (books, ratings) = rayon::join(
            || parser::parse_books(books_path),
            || parser::parse_ratings(ratings_path),
        );
        let books = books?;
        let ratings = ratings?;

        info!("Parsed {} books and {} ratings", books.len(), ratings.len());

        let index = Self::from_records(books, ratings);

        let (_, _, unmatched) = index.counts();
        info!(
            "Joined ratings against catalog ({} ratings without a titled book)",
            unmatched
        );
        Ok(index)
    }

    /// Build an index from already parsed records.
    ///
    /// All catalog rows are inserted before any rating, so the join sees
    /// the complete catalog regardless of input order.
    pub fn from_records(books: Vec<Book>, ratings: Vec<Rating>) -> Self {
        let mut index = DataIndex::new();
        index.books.reserve(books.len());
        index.ratings.reserve(ratings.len());

        for book in books {
            index.insert_book(book);
        }
        for rating in ratings {
            index.insert_rating(rating);
        }
        index
    }
}
