//! Compressed sparse row (CSR) matrix.
//!
//! Rating matrices are mostly zeros, so rows are stored as (column, value)
//! runs: `indptr[r]..indptr[r + 1]` is the slice of `indices`/`data` that
//! belongs to row `r`. Explicit zeros are never stored.

use crate::error::{Result, SimilarityError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix {
    n_rows: usize,
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f32>,
}

/// Borrowed view of one CSR row
#[derive(Debug, Clone, Copy)]
pub struct SparseRow<'a> {
    pub indices: &'a [usize],
    pub values: &'a [f32],
}

impl SparseRow<'_> {
    /// Number of stored (non-zero) entries
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Iterate over (column, value) pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    /// Euclidean norm of the row
    pub fn norm(&self) -> f64 {
        self.values
            .iter()
            .map(|&v| f64::from(v) * f64::from(v))
            .sum::<f64>()
            .sqrt()
    }

    /// Value at `col`, 0 when the cell is not stored
    pub fn get(&self, col: usize) -> f32 {
        self.indices
            .binary_search(&col)
            .map_or(0.0, |pos| self.values[pos])
    }

    /// Dot product with a dense vector of the full matrix width
    pub fn dot_dense(&self, dense: &[f32]) -> f64 {
        self.iter()
            .map(|(col, v)| f64::from(v) * f64::from(dense[col]))
            .sum()
    }
}

impl CsrMatrix {
    /// An empty matrix with `n_cols` columns and no rows
    pub fn empty(n_cols: usize) -> Self {
        Self {
            n_rows: 0,
            n_cols,
            indptr: vec![0],
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Compress a dense row-major buffer, dropping zero cells
    pub fn from_dense(n_rows: usize, n_cols: usize, values: &[f32]) -> Result<Self> {
        if values.len() != n_rows * n_cols {
            return Err(SimilarityError::BadShape {
                rows: n_rows,
                cols: n_cols,
                len: values.len(),
            });
        }

        let mut matrix = Self::empty(n_cols);
        matrix.indptr.reserve(n_rows);
        // n_cols == 0 makes chunks_exact panic, and every row is empty anyway
        if n_cols == 0 {
            matrix.indptr.extend(std::iter::repeat_n(0, n_rows));
            matrix.n_rows = n_rows;
            return Ok(matrix);
        }
        for row in values.chunks_exact(n_cols) {
            matrix.push_row(row);
        }
        Ok(matrix)
    }

    /// Build from rows of `(column, value)` entries.
    ///
    /// Each row must list its columns in ascending order, all below `n_cols`.
    /// Zero values are skipped.
    pub fn from_sorted_rows<R, E>(n_cols: usize, rows: R) -> Self
    where
        R: IntoIterator<Item = E>,
        E: IntoIterator<Item = (usize, f32)>,
    {
        let mut matrix = Self::empty(n_cols);
        for row in rows {
            let start = matrix.indices.len();
            for (col, value) in row {
                debug_assert!(col < n_cols, "column {col} out of range");
                debug_assert!(
                    matrix.indices.len() == start || matrix.indices[matrix.indices.len() - 1] < col,
                    "columns out of order"
                );
                if value != 0.0 {
                    matrix.indices.push(col);
                    matrix.data.push(value);
                }
            }
            matrix.indptr.push(matrix.indices.len());
            matrix.n_rows += 1;
        }
        matrix
    }

    /// Append one dense row of width `n_cols`
    fn push_row(&mut self, row: &[f32]) {
        for (col, &value) in row.iter().enumerate() {
            if value != 0.0 {
                self.indices.push(col);
                self.data.push(value);
            }
        }
        self.indptr.push(self.indices.len());
        self.n_rows += 1;
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Total number of stored entries
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Borrow row `row`; `None` when out of bounds
    pub fn row(&self, row: usize) -> Option<SparseRow<'_>> {
        if row >= self.n_rows {
            return None;
        }
        let span = self.indptr[row]..self.indptr[row + 1];
        Some(SparseRow {
            indices: &self.indices[span.clone()],
            values: &self.data[span],
        })
    }

    /// Expand row `row` into a dense vector
    pub fn row_dense(&self, row: usize) -> Option<Vec<f32>> {
        let sparse = self.row(row)?;
        let mut dense = vec![0.0; self.n_cols];
        for (col, value) in sparse.iter() {
            dense[col] = value;
        }
        Some(dense)
    }

    /// Iterate over all rows in order
    pub fn rows(&self) -> impl Iterator<Item = SparseRow<'_>> + '_ {
        (0..self.n_rows).filter_map(move |r| self.row(r))
    }
}
