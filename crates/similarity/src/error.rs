//! Error types for the similarity crate.

use thiserror::Error;

/// Errors raised by shape checks on matrices and queries
#[derive(Error, Debug, PartialEq)]
pub enum SimilarityError {
    /// Query vector width differs from the fitted matrix width
    #[error("Query has {found} dimensions but the index was fitted on {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Row index outside the fitted matrix
    #[error("Row {row} out of bounds for index with {rows} rows")]
    RowOutOfBounds { row: usize, rows: usize },

    /// Dense input whose length is not rows * cols
    #[error("Dense buffer of length {len} cannot be shaped as {rows}x{cols}")]
    BadShape { rows: usize, cols: usize, len: usize },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, SimilarityError>;
