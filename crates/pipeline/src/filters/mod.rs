//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod already_reviewed;
pub mod cuisine_preference;
pub mod minimum_stars;

// Re-export for convenience
pub use already_reviewed::AlreadyReviewedFilter;
pub use cuisine_preference::CuisinePreferenceFilter;
pub use minimum_stars::MinimumStarsFilter;
