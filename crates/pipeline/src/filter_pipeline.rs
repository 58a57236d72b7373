//! The FilterPipeline orchestrates multiple filters.
//!
//! Filters run strictly in insertion order. Order is observable: each
//! filter counts over the output of the one before it.

use crate::filters::{ActiveUserFilter, PopularTitleFilter};
use crate::traits::RatingFilter;
use data_loader::EnrichedRating;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(PopularTitleFilter::new(50))
///     .add_filter(ActiveUserFilter::new(50));
///
/// let filtered = pipeline.apply(index.ratings().to_vec());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn RatingFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The standard two-pass sparsity filter: popular titles first, then
    /// active users counted within the popular-title subset.
    pub fn popularity(min_title_ratings: usize, min_user_ratings: usize) -> Self {
        Self::new()
            .add_filter(PopularTitleFilter::new(min_title_ratings))
            .add_filter(ActiveUserFilter::new(min_user_ratings))
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl RatingFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Names of the configured filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Apply all filters in sequence to the ratings.
    pub fn apply(&self, ratings: Vec<EnrichedRating>) -> Vec<EnrichedRating> {
        let mut current = ratings;
        for filter in &self.filters {
            debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
