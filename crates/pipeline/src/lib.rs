//! Pipeline for filtering and scoring of restaurant candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - Scorer for computing the final blended score
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. Filters remove unwanted candidates (already reviewed, wrong cuisine, low quality)
//! 2. Scorer blends source, taste, and popularity signals per survivor
//! 3. The orchestrator ranks by the final score
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, Scorer};
//! use pipeline::filters::*;
//!
//! // Build the filter pipeline
//! let pipeline = FilterPipeline::new()
//!     .add_filter(AlreadyReviewedFilter)
//!     .add_filter(MinimumStarsFilter::new(catalog.clone(), 3.5, 10))
//!     .add_filter(CuisinePreferenceFilter::new(catalog.clone(), 3));
//!
//! // Apply filters
//! let filtered = pipeline.apply(candidates, &profile)?;
//!
//! // Score the survivors
//! let scorer = Scorer::new(catalog.clone());
//! let scored = scorer.score_candidates(filtered, &profile);
//! ```

pub mod filter_pipeline;
pub mod filters;
pub mod scoring;
pub mod traits;

// Re-export main types
pub use filter_pipeline::FilterPipeline;
pub use scoring::{ScoredCandidate, Scorer};
pub use traits::Filter;
