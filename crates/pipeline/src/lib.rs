//! Data preparation between loading and similarity search.
//!
//! This crate provides:
//! - RatingFilter trait and implementations for sparsity filtering
//! - FilterPipeline for composing filters
//! - RatingMatrix, the title x user grid the similarity index is fitted on
//!
//! ## Architecture
//! The pipeline processes the enriched ratings in stages:
//! 1. PopularTitleFilter keeps titles with enough ratings
//! 2. ActiveUserFilter keeps users with enough ratings among those titles
//! 3. RatingMatrix pivots the survivors into rows (titles) and columns (users)
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, RatingMatrix};
//!
//! let filtered = FilterPipeline::popularity(50, 50).apply(index.ratings().to_vec());
//! let matrix = RatingMatrix::build(&filtered);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod matrix;

// Re-export main types
pub use traits::RatingFilter;
pub use filter_pipeline::FilterPipeline;
pub use matrix::RatingMatrix;
