//! Filter to keep only restaurants matching the diner's preferred cuisines.
//!
//! This filter helps ensure recommended restaurants align with the diner's
//! demonstrated cuisine preferences.

use crate::traits::Filter;
use anyhow::Result;
use catalog::Catalog;
use recs::{Candidate, DinerProfile};
use std::sync::Arc;

/// Keeps only candidates that match the diner's top N preferred cuisines.
///
/// ## Algorithm
/// 1. Get the diner's top N cuisines from DinerProfile
/// 2. For each candidate, check if the restaurant serves at least one of them
/// 3. Keep restaurants with cuisine overlap
///
/// A diner with no cuisine signal (no tagged reviews yet) passes every
/// candidate through rather than filtering the list to nothing.
pub struct CuisinePreferenceFilter {
    catalog: Arc<Catalog>,
    top_n_cuisines: usize,
}

impl CuisinePreferenceFilter {
    /// Create a new CuisinePreferenceFilter.
    ///
    /// # Arguments
    /// * `catalog` - Shared reference to the Catalog for restaurant lookups
    /// * `top_n_cuisines` - How many top cuisines to consider (typically 3)
    pub fn new(catalog: Arc<Catalog>, top_n_cuisines: usize) -> Self {
        Self {
            catalog,
            top_n_cuisines,
        }
    }
}

impl Filter for CuisinePreferenceFilter {
    fn name(&self) -> &str {
        "CuisinePreferenceFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        profile: &DinerProfile,
    ) -> Result<Vec<Candidate>> {
        // Get the diner's top N cuisines (lowercased tags)
        let top_cuisines = profile.top_cuisines(self.top_n_cuisines);
        if top_cuisines.is_empty() {
            return Ok(candidates);
        }

        // For each candidate, check if restaurant cuisines overlap with top cuisines
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| {
                if let Some(restaurant) = self.catalog.get_restaurant(&candidate.restaurant_id) {
                    // Check for cuisine overlap
                    restaurant
                        .cuisines
                        .iter()
                        .any(|cuisine| top_cuisines.contains(&cuisine.to_lowercase()))
                } else {
                    false // Exclude if restaurant not found
                }
            })
            .collect();
        Ok(filtered)
    }
}
