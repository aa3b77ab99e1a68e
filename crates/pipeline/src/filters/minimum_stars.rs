//! Filter to ensure minimum quality threshold.
//!
//! Removes restaurants with low average stars or too few reviews,
//! ensuring we only recommend places with a trustworthy track record.

use crate::traits::Filter;
use anyhow::Result;
use catalog::Catalog;
use recs::{Candidate, DinerProfile};
use std::sync::Arc;

/// Removes candidates below quality thresholds.
///
/// ## Algorithm
/// For each candidate:
/// 1. Get RestaurantStats from the Catalog
/// 2. Check if avg_review_stars >= min_stars
/// 3. Check if review_count >= min_count
/// 4. Keep only if both conditions met
pub struct MinimumStarsFilter {
    catalog: Arc<Catalog>,
    min_stars: f32,
    min_count: u32,
}

impl MinimumStarsFilter {
    /// Create a new MinimumStarsFilter.
    ///
    /// # Arguments
    /// * `catalog` - Shared reference to the Catalog for stats lookups
    /// * `min_stars` - Minimum average stars (typically 3.5)
    /// * `min_count` - Minimum number of reviews (typically 10)
    pub fn new(catalog: Arc<Catalog>, min_stars: f32, min_count: u32) -> Self {
        Self {
            catalog,
            min_stars,
            min_count,
        }
    }
}

impl Filter for MinimumStarsFilter {
    fn name(&self) -> &str {
        "MinimumStarsFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _profile: &DinerProfile,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| {
                if let Some(stats) = self.catalog.get_restaurant_stats(&candidate.restaurant_id) {
                    stats.avg_review_stars >= self.min_stars
                        && stats.review_count >= self.min_count
                } else {
                    false
                }
            })
            .collect();

        Ok(filtered)
    }
}
