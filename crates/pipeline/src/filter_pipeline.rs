//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use anyhow::Result;
use recs::{Candidate, DinerProfile};
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(AlreadyReviewedFilter)
///     .add_filter(MinimumStarsFilter::new(catalog.clone(), 3.5, 10))
///     .add_filter(CuisinePreferenceFilter::new(catalog.clone(), 3));
///
/// let filtered = pipeline.apply(candidates, &profile)?;
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    ///
    /// # Arguments
    /// * `filter` - Any type implementing the Filter trait
    ///
    /// # Returns
    /// Self for method chaining
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the candidates.
    ///
    /// ## Algorithm
    /// 1. Start with the input candidates
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter
    /// * `profile` - Diner profile for filtering decisions
    ///
    /// # Returns
    /// * `Ok(Vec<Candidate>)` - The filtered candidates after all filters
    /// * `Err` - If any filter fails
    pub fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &DinerProfile,
    ) -> Result<Vec<Candidate>> {
        let mut current = candidates;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, profile)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::AlreadyReviewedFilter;
    use recs::{Candidate, CandidateSource};

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FilterPipeline::new();
        let profile = DinerProfile::new("u1".to_string());

        let candidates = vec![
            Candidate::new("r1".to_string(), CandidateSource::SimilarDiners, 0.9),
            Candidate::new("r2".to_string(), CandidateSource::Discovery, 0.8),
        ];

        let filtered = pipeline.apply(candidates.clone(), &profile).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_single_filter() {
        let mut profile = DinerProfile::new("u1".to_string());
        profile.reviewed.insert("r1".to_string());

        let pipeline = FilterPipeline::new()
            .add_filter(AlreadyReviewedFilter);

        let candidates = vec![
            Candidate::new("r1".to_string(), CandidateSource::SimilarDiners, 0.9),
            Candidate::new("r2".to_string(), CandidateSource::Discovery, 0.8),
        ];

        let filtered = pipeline.apply(candidates, &profile).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].restaurant_id, "r2");
    }
}
