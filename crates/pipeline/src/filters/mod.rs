//! Filter implementations for the ratings pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod active_users;
pub mod popular_titles;

// Re-export for convenience
pub use active_users::ActiveUserFilter;
pub use popular_titles::PopularTitleFilter;
