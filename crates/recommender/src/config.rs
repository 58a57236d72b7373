//! Recommender configuration.

use serde::{Deserialize, Serialize};

/// Thresholds and sizes used when building and querying the recommender.
///
/// The defaults reproduce the book-crossing demo: titles need more than 50
/// ratings, users more than 50 ratings among those titles, and five books
/// are recommended per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommenderConfig {
    /// A title needs strictly more ratings than this to become a matrix row
    pub min_title_ratings: usize,
    /// A user needs strictly more ratings (among popular titles) than this
    /// to become a matrix column
    pub min_user_ratings: usize,
    /// Number of books recommended per query, not counting the selection
    pub recommendations: usize,
    /// Compute query distances on the rayon pool
    pub parallel: bool,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            min_title_ratings: 50,
            min_user_ratings: 50,
            recommendations: 5,
            parallel: true,
        }
    }
}

impl RecommenderConfig {
    pub fn with_min_title_ratings(mut self, min: usize) -> Self {
        self.min_title_ratings = min;
        self
    }

    pub fn with_min_user_ratings(mut self, min: usize) -> Self {
        self.min_user_ratings = min;
        self
    }

    pub fn with_recommendations(mut self, count: usize) -> Self {
        self.recommendations = count;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
