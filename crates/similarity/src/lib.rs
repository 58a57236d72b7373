//! # Similarity Crate
//!
//! Exact nearest-neighbour search over sparse rating vectors.
//!
//! ## Components
//!
//! - **sparse**: CSR matrix storing only non-zero cells
//! - **cosine**: cosine distance with zero-vector handling
//! - **knn**: brute-force k-NN index (`NearestNeighbors`)
//!
//! ## Example Usage
//!
//! ```ignore
//! use similarity::{CsrMatrix, NearestNeighbors};
//!
//! let matrix = CsrMatrix::from_dense(n_rows, n_cols, &values)?;
//! let index = NearestNeighbors::fit(matrix);
//!
//! // Row 3 first (distance 0), then its 5 closest rows
//! let neighbors = index.kneighbors_of_row(3, 6)?;
//! ```

pub mod error;
pub mod sparse;
pub mod cosine;
pub mod knn;

pub use error::{Result, SimilarityError};
pub use sparse::{CsrMatrix, SparseRow};
pub use knn::{NearestNeighbors, Neighbor};
