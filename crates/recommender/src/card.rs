//! Display model for one book in a result.
//!
//! A card carries whatever metadata the catalog has; gaps are filled with
//! "Unknown" or a placeholder cover only when rendered.

use data_loader::Book;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cover image service, templated on ISBN
pub const COVER_URL_BASE: &str = "https://covers.openlibrary.org/b/isbn";
/// Shown when there is no ISBN or the cover fails to load
pub const PLACEHOLDER_COVER_URL: &str = "https://via.placeholder.com/100x150?text=No+Cover";
/// Text rendered for missing metadata
pub const UNKNOWN: &str = "Unknown";

/// Why a card is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardTag {
    /// The book the user asked about
    Selection,
    /// A similar book
    Recommended,
}

impl fmt::Display for CardTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardTag::Selection => write!(f, "Your Selection"),
            CardTag::Recommended => write!(f, "Recommended"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookCard {
    pub title: String,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<u16>,
    pub isbn: Option<String>,
    pub tag: CardTag,
    /// Cosine distance to the selected book (recommended cards only)
    pub distance: Option<f64>,
}

impl BookCard {
    /// Card for `title`, with metadata from its catalog row if there is one
    pub fn new(title: &str, book: Option<&Book>, tag: CardTag) -> Self {
        Self {
            title: title.to_string(),
            author: book.and_then(|b| b.author.clone()),
            publisher: book.and_then(|b| b.publisher.clone()),
            year: book.and_then(|b| b.year),
            isbn: book.map(|b| b.isbn.clone()),
            tag,
            distance: None,
        }
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn author_text(&self) -> &str {
        self.author.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn publisher_text(&self) -> &str {
        self.publisher.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn year_text(&self) -> String {
        self.year
            .map(|y| y.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    /// Medium-size cover for the card's ISBN, or the placeholder
    pub fn cover_url(&self) -> String {
        cover_url(self.isbn.as_deref())
    }
}

/// Cover URL for an ISBN; blank or missing ISBNs get the placeholder
pub fn cover_url(isbn: Option<&str>) -> String {
    match isbn.map(str::trim) {
        Some(isbn) if !isbn.is_empty() => format!("{COVER_URL_BASE}/{isbn}-M.jpg"),
        _ => PLACEHOLDER_COVER_URL.to_string(),
    }
}
