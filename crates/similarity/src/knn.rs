//! Brute-force nearest neighbours under cosine distance.
//!
//! ## Algorithm
//! 1. `fit` keeps the CSR matrix and precomputes every row norm
//! 2. A query is expanded to a dense vector
//! 3. Each row's distance is one sparse-dense dot product
//! 4. Rows are sorted by (distance, row index) and the first k returned
//!
//! No approximation structure is built: every query scans all rows, so the
//! result is exact and deterministic.

use crate::cosine;
use crate::error::{Result, SimilarityError};
use crate::sparse::CsrMatrix;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

/// One query result: a fitted row and its distance to the query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub row: usize,
    pub distance: f64,
}

/// Exhaustive cosine k-NN index over the rows of a sparse matrix.
///
/// Immutable after `fit`: there is no insertion or removal.
#[derive(Debug, Clone)]
pub struct NearestNeighbors {
    matrix: Arc<CsrMatrix>,
    norms: Vec<f64>,
    /// Spread distance computation over the rayon pool
    parallel: bool,
}

impl NearestNeighbors {
    /// Fit the index over every row of `matrix`.
    ///
    /// Passing an `Arc` shares the rows with the caller instead of copying.
    pub fn fit(matrix: impl Into<Arc<CsrMatrix>>) -> Self {
        let matrix = matrix.into();
        let norms = matrix.rows().map(|row| row.norm()).collect();
        debug!(
            "Fitted cosine index over {} rows x {} columns ({} non-zero)",
            matrix.n_rows(),
            matrix.n_cols(),
            matrix.nnz()
        );
        Self {
            matrix,
            norms,
            parallel: true,
        }
    }

    /// Configure parallel distance computation (default: true)
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Number of fitted rows
    pub fn len(&self) -> usize {
        self.matrix.n_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of the fitted vectors
    pub fn dim(&self) -> usize {
        self.matrix.n_cols()
    }

    /// The fitted matrix
    pub fn matrix(&self) -> &CsrMatrix {
        &self.matrix
    }

    /// Shared handle to the fitted matrix
    pub fn shared_matrix(&self) -> &Arc<CsrMatrix> {
        &self.matrix
    }

    /// The `k` rows closest to a dense query vector.
    ///
    /// Returns fewer than `k` neighbours when fewer rows are fitted.
    pub fn kneighbors(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if query.len() != self.dim() {
            return Err(SimilarityError::DimensionMismatch {
                expected: self.dim(),
                found: query.len(),
            });
        }
        let mut neighbors = self.distances(query);
        select_nearest(&mut neighbors, k, None);
        Ok(neighbors)
    }

    /// The `k` rows closest to fitted row `row`, the row itself included.
    ///
    /// The row is reported at distance exactly 0 and sorts ahead of any other
    /// row at distance 0, so it is always the first result.
    pub fn kneighbors_of_row(&self, row: usize, k: usize) -> Result<Vec<Neighbor>> {
        let query = self
            .matrix
            .row_dense(row)
            .ok_or(SimilarityError::RowOutOfBounds {
                row,
                rows: self.len(),
            })?;
        let mut neighbors = self.distances(&query);
        neighbors[row].distance = 0.0;
        select_nearest(&mut neighbors, k, Some(row));
        Ok(neighbors)
    }

    /// Distance from `query` to every fitted row, in row order
    fn distances(&self, query: &[f32]) -> Vec<Neighbor> {
        let query_norm = cosine::norm(query);
        let distance_to = |row: usize| {
            let dot = self
                .matrix
                .row(row)
                .map(|r| r.dot_dense(query))
                .unwrap_or(0.0);
            Neighbor {
                row,
                distance: cosine::distance_from_parts(dot, query_norm, self.norms[row]),
            }
        };

        if self.parallel {
            (0..self.len()).into_par_iter().map(distance_to).collect()
        } else {
            (0..self.len()).map(distance_to).collect()
        }
    }
}

/// Sort by distance (ties: `first` wins, then lower row) and keep `k`
fn select_nearest(neighbors: &mut Vec<Neighbor>, k: usize, first: Option<usize>) {
    neighbors.sort_by(|a, b| {
        a.distance
            .total_cmp(&b.distance)
            .then_with(|| match first {
                Some(row) if a.row == row && b.row != row => Ordering::Less,
                Some(row) if b.row == row && a.row != row => Ordering::Greater,
                _ => Ordering::Equal,
            })
            .then_with(|| a.row.cmp(&b.row))
    });
    neighbors.truncate(k);
}
