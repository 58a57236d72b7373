//! Filter to keep only popular titles.
//!
//! Removes ratings of titles that were rated too few times, which bounds the
//! number of matrix rows and drops titles with too little co-rating signal.

use crate::traits::RatingFilter;
use data_loader::EnrichedRating;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Keeps ratings whose title has strictly more than `min_count` ratings.
///
/// ## Algorithm
/// 1. Count rating rows per title over the input
/// 2. Keep titles whose count exceeds `min_count`
/// 3. Keep only rows of those titles
///
/// Rows without a title (ISBN missing from the catalog) are always removed:
/// they cannot be counted towards any title.
pub struct PopularTitleFilter {
    min_count: usize,
}

impl PopularTitleFilter {
    /// Create a new PopularTitleFilter.
    ///
    /// # Arguments
    /// * `min_count` - Titles need more than this many ratings (typically 50)
    pub fn new(min_count: usize) -> Self {
        Self { min_count }
    }
}

/// Number of rating rows per title
pub fn title_counts(ratings: &[EnrichedRating]) -> HashMap<&str, usize> {
    ratings
        .par_iter()
        .fold(HashMap::new, |mut local_counts, rating| {
            if let Some(title) = rating.title.as_deref() {
                *local_counts.entry(title).or_insert(0) += 1;
            }
            local_counts
        })
        .reduce(HashMap::new, |mut acc, local_counts| {
            for (title, count) in local_counts {
                *acc.entry(title).or_insert(0) += count;
            }
            acc
        })
}

impl RatingFilter for PopularTitleFilter {
    fn name(&self) -> &str {
        "PopularTitleFilter"
    }

    fn apply(&self, ratings: Vec<EnrichedRating>) -> Vec<EnrichedRating> {
        let popular: HashSet<String> = title_counts(&ratings)
            .into_iter()
            .filter(|(_, count)| *count > self.min_count)
            .map(|(title, _)| title.to_string())
            .collect();

        ratings
            .into_iter()
            .filter(|rating| {
                rating
                    .title
                    .as_deref()
                    .is_some_and(|title| popular.contains(title))
            })
            .collect()
    }
}
