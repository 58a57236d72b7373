//! Filter to keep only active users.
//!
//! Removes ratings by users who rated too few titles, which bounds the
//! number of matrix columns.

use crate::traits::RatingFilter;
use data_loader::{EnrichedRating, UserId};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

/// Keeps ratings whose user has strictly more than `min_count` ratings
/// *in the filter's input*.
///
/// Placed after `PopularTitleFilter`, activity is therefore measured on
/// popular titles only, not on the user's full history.
pub struct ActiveUserFilter {
    min_count: usize,
}

impl ActiveUserFilter {
    /// Create a new ActiveUserFilter.
    ///
    /// # Arguments
    /// * `min_count` - Users need more than this many ratings (typically 50)
    pub fn new(min_count: usize) -> Self {
        Self { min_count }
    }
}

/// Number of rating rows per user
pub fn user_counts(ratings: &[EnrichedRating]) -> HashMap<UserId, usize> {
    ratings
        .par_iter()
        .fold(HashMap::new, |mut local_counts, rating| {
            *local_counts.entry(rating.user_id).or_insert(0) += 1;
            local_counts
        })
        .reduce(HashMap::new, |mut acc, local_counts| {
            for (user_id, count) in local_counts {
                *acc.entry(user_id).or_insert(0) += count;
            }
            acc
        })
}

impl RatingFilter for ActiveUserFilter {
    fn name(&self) -> &str {
        "ActiveUserFilter"
    }

    fn apply(&self, ratings: Vec<EnrichedRating>) -> Vec<EnrichedRating> {
        let active: HashSet<UserId> = user_counts(&ratings)
            .into_iter()
            .filter(|(_, count)| *count > self.min_count)
            .map(|(user_id, _)| user_id)
            .collect();

        ratings
            .into_iter()
            .filter(|rating| active.contains(&rating.user_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(user_id: UserId, title: &str) -> EnrichedRating {
        EnrichedRating {
            user_id,
            isbn: "000".to_string(),
            rating: 7.0,
            title: Some(title.to_string()),
            author: None,
            publisher: None,
            year: None,
        }
    }

    #[test]
    fn test_active_user_filter() {
        let ratings = vec![
            rating(1, "A"),
            rating(1, "B"),
            rating(1, "C"),
            rating(2, "A"),
            rating(2, "B"),
            rating(3, "A"),
        ];

        let filtered = ActiveUserFilter::new(2).apply(ratings);
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|r| r.user_id == 1));
    }

    #[test]
    fn test_zero_threshold_keeps_everyone() {
        let ratings = vec![rating(1, "A"), rating(2, "B")];
        assert_eq!(ActiveUserFilter::new(0).apply(ratings.clone()), ratings);
    }
}
