//! Error types for the data-loader crate.
//!
//! Every variant is fatal for the caller: the recommender cannot start
//! without a readable catalog and ratings table.

use thiserror::Error;

/// Errors that can occur while loading the book catalog or the ratings table
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected the input (ragged rows, broken quoting, ...)
    #[error("Malformed CSV in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// A column the loader relies on is absent from the header row
    #[error("Missing required column '{column}' in {file}")]
    MissingColumn { file: String, column: String },

    /// Line in data file couldn't be parsed
    ///
    /// `line` is the 1-based line number as reported by the CSV reader,
    /// so the header is line 1.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: u64,
        reason: String,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
