//! Core traits for the filtering pipeline.
//!
//! This module defines the RatingFilter trait that allows composable
//! filters to be chained over the enriched ratings table.

use data_loader::EnrichedRating;

/// Core trait for filtering ratings.
///
/// ## Design Note
/// - Filters take ownership of the Vec<EnrichedRating> and return the survivors
///   in their original order
/// - A filter sees only what the previous filter let through, so any counting
///   a filter does is relative to its own input
/// - Filtering cannot fail: an empty result is a valid outcome
pub trait RatingFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of ratings.
    fn apply(&self, ratings: Vec<EnrichedRating>) -> Vec<EnrichedRating>;
}
