//! Query layer of the book recommender.
//!
//! `BookRecommender` is built once from the two input files and then answers
//! "books similar to this title" queries with display-ready `BookCard`s.
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::{BookRecommender, RecommenderConfig, RecommendError};
//!
//! let recommender = BookRecommender::from_files(
//!     Path::new("Books.csv"),
//!     Path::new("Ratings.csv"),
//!     RecommenderConfig::default(),
//! )?;
//!
//! match recommender.recommend("The Da Vinci Code") {
//!     Ok(rec) => println!("{} similar books", rec.recommended.len()),
//!     Err(RecommendError::TitleNotFound { .. }) => println!("Book not found in database!"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

pub mod card;
pub mod config;
pub mod error;
pub mod html;
pub mod recommender;

pub use card::{BookCard, CardTag};
pub use config::RecommenderConfig;
pub use error::RecommendError;
pub use recommender::{BookRecommender, Recommendation};
