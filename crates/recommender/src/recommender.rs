//! # Book Recommender
//!
//! Owns everything the query path needs, built once at startup:
//! 1. Load the catalog and ratings (fatal on failure)
//! 2. Filter to popular titles and active users
//! 3. Pivot into the title x user matrix
//! 4. Fit the cosine k-NN index
//!
//! After construction nothing is mutated; every query only reads.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use data_loader::DataIndex;
use pipeline::{FilterPipeline, RatingMatrix};
use similarity::NearestNeighbors;

use crate::card::{BookCard, CardTag};
use crate::config::RecommenderConfig;
use crate::error::RecommendError;

/// Result of one query: the selected book and its neighbours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub selected: BookCard,
    /// Closest first
    pub recommended: Vec<BookCard>,
}

/// Read-only recommender state
pub struct BookRecommender {
    data_index: DataIndex,
    matrix: RatingMatrix,
    index: NearestNeighbors,
    config: RecommenderConfig,
}

impl BookRecommender {
    /// Load both CSV files and build the recommender
    pub fn from_files(
        books_path: &Path,
        ratings_path: &Path,
        config: RecommenderConfig,
    ) -> Result<Self> {
        let data_index = DataIndex::load_from_files(books_path, ratings_path)
            .context("Failed to load book-crossing dataset")?;
        Ok(Self::from_data(data_index, config))
    }

    /// Build the recommender from an already loaded DataIndex
    pub fn from_data(data_index: DataIndex, config: RecommenderConfig) -> Self {
        let start_time = Instant::now();

        let filtered = FilterPipeline::popularity(config.min_title_ratings, config.min_user_ratings)
            .apply(data_index.ratings().to_vec());
        info!(
            "Kept {} of {} ratings (titles > {}, users > {})",
            filtered.len(),
            data_index.ratings().len(),
            config.min_title_ratings,
            config.min_user_ratings
        );

        let matrix = RatingMatrix::build(&filtered);
        let index = NearestNeighbors::fit(Arc::clone(matrix.sparse())).with_parallel(config.parallel);

        info!(
            "Recommender ready: {} titles, {} users in {:.2?}",
            matrix.n_rows(),
            matrix.n_cols(),
            start_time.elapsed()
        );

        Self {
            data_index,
            matrix,
            index,
            config,
        }
    }

    /// Selectable titles, sorted
    pub fn titles(&self) -> &[String] {
        self.matrix.titles()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.matrix.row_of(title).is_some()
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    pub fn data_index(&self) -> &DataIndex {
        &self.data_index
    }

    pub fn matrix(&self) -> &RatingMatrix {
        &self.matrix
    }

    /// Cosine index fitted over the matrix rows
    pub fn index(&self) -> &NearestNeighbors {
        &self.index
    }

    /// Recommend books similar to `title`.
    ///
    /// Unknown titles fail with `TitleNotFound` before any matrix access.
    /// Otherwise the row's `recommendations + 1` nearest rows are fetched
    /// and the first one, the title itself, is dropped.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str) -> Result<Recommendation, RecommendError> {
        let row = self
            .matrix
            .row_of(title)
            .ok_or_else(|| RecommendError::TitleNotFound {
                title: title.to_string(),
            })?;

        let neighbors = self
            .index
            .kneighbors_of_row(row, self.config.recommendations + 1)?;
        debug!("Found {} neighbours for row {}", neighbors.len(), row);

        let recommended = neighbors
            .iter()
            .skip(1)
            .filter_map(|neighbor| {
                let title = self.matrix.title_at(neighbor.row)?;
                Some(self.card(title, CardTag::Recommended).with_distance(neighbor.distance))
            })
            .collect();

        Ok(Recommendation {
            selected: self.card(title, CardTag::Selection),
            recommended,
        })
    }

    fn card(&self, title: &str, tag: CardTag) -> BookCard {
        BookCard::new(title, self.data_index.first_book_with_title(title), tag)
    }
}
