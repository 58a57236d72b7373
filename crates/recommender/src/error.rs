//! Errors surfaced to the user by the query layer.

use similarity::SimilarityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    /// The title is not a row of the rating matrix (never rated, or
    /// filtered out as unpopular)
    #[error("Book not found in database!")]
    TitleNotFound { title: String },

    #[error("Similarity search failed: {0}")]
    Similarity(#[from] SimilarityError),
}
