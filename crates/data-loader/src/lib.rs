//! # Data Loader Crate
//!
//! Loads the book-crossing dataset (a book catalog and a ratings table) and
//! joins every rating with its book's metadata.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Book, Rating, EnrichedRating, DataIndex)
//! - **parser**: Parse the CSV files into Rust structs
//! - **index**: Load both files and build the DataIndex
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("Books.csv"), Path::new("Ratings.csv"))?;
//!
//! let book = index.first_book_with_title("Classical Mythology");
//! let (books, ratings, unmatched) = index.counts();
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    Isbn,
    // Core types
    Book,
    Rating,
    EnrichedRating,
    DataIndex,
};
