//! SimilarDiners Source - Collaborative Filtering
//!
//! Generates candidate recommendations based on collaborative filtering:
//! "Diners who liked what you liked also liked these restaurants"
//!
//! ## Algorithm
//! 1. Take the restaurants the diner rated highly (>= 4.0)
//! 2. For each liked restaurant:
//!    - Find other diners who also rated it highly
//!    - These are "similar diners"
//! 3. Look at what those similar diners rated highly
//! 4. Score candidates by the share of similar diners who liked them
//! 5. Return the top candidates

use crate::types::{Candidate, CandidateSource, DinerProfile};
use catalog::{Catalog, RestaurantId, UserId};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument};

/// SimilarDiners generates in-network candidates via collaborative filtering
#[derive(Clone)]
pub struct SimilarDinersSource {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    catalog: Arc<Catalog>,

    /// Minimum stars for a review to count as "liked"
    high_rating_threshold: f32,

    /// Minimum number of shared liked restaurants to consider diners similar
    min_shared_restaurants: usize,
}

impl SimilarDinersSource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            high_rating_threshold: 4.0,
            min_shared_restaurants: 2,
        }
    }

    /// Configure the high rating threshold (default: 4.0)
    pub fn with_high_rating_threshold(mut self, threshold: f32) -> Self {
        self.high_rating_threshold = threshold;
        self
    }

    /// Configure minimum shared restaurants to consider diners similar (default: 2)
    pub fn with_min_shared_restaurants(mut self, min: usize) -> Self {
        self.min_shared_restaurants = min;
        self
    }

    /// Generate candidate recommendations for a diner
    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    pub fn get_candidates(&self, profile: &DinerProfile, limit: usize) -> Vec<Candidate> {
        debug!(
            "Generating SimilarDiners candidates for {} (liked: {})",
            profile.user_id,
            profile.liked.len()
        );

        // Step 1: Find similar diners
        let similar_diners = self.find_similar_diners(profile);
        debug!("Found {} similar diners", similar_diners.len());

        if similar_diners.is_empty() {
            return Vec::new();
        }

        // Step 2: Count how many similar diners liked each unseen restaurant
        let candidate_counts = self.get_candidate_counts(&similar_diners, profile);

        // Step 3: Convert to Candidate structs; the score is the share of
        // similar diners backing the restaurant, so it stays in [0, 1]
        let similar_total = similar_diners.len() as f32;
        let mut candidates: Vec<Candidate> = candidate_counts
            .into_iter()
            .map(|(restaurant_id, count)| {
                let mut candidate = Candidate::new(
                    restaurant_id,
                    CandidateSource::SimilarDiners,
                    count as f32 / similar_total,
                );
                candidate.metadata.similar_diners_count = Some(count);
                candidate
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.base_score
                .total_cmp(&a.base_score)
                .then_with(|| a.restaurant_id.cmp(&b.restaurant_id))
        });
        candidates.truncate(limit);

        debug!("Generated {} SimilarDiners candidates", candidates.len());
        candidates
    }

    /// Find diners similar to the profile's owner
    fn find_similar_diners(&self, profile: &DinerProfile) -> HashSet<UserId> {
        let shared_counts = profile
            .liked
            .par_iter()
            .fold(
                HashMap::new,
                |mut local_counts: HashMap<UserId, u32>, restaurant_id| {
                    let reviews = self.catalog.get_restaurant_reviews(restaurant_id);
                    for review in reviews {
                        if review.user_id != profile.user_id
                            && review.stars >= self.high_rating_threshold
                        {
                            *local_counts.entry(review.user_id.clone()).or_insert(0) += 1;
                        }
                    }
                    local_counts
                },
            )
            .reduce(HashMap::new, |mut acc, local_counts| {
                for (user_id, count) in local_counts {
                    *acc.entry(user_id).or_insert(0) += count;
                }
                acc
            });

        let mut shared_counts_vec: Vec<(UserId, u32)> = shared_counts
            .into_iter()
            .filter(|(_user_id, count)| *count >= self.min_shared_restaurants as u32)
            .collect();

        // Sort by count DESC; ties on the id so truncation is deterministic
        shared_counts_vec.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        // Take the 500 most-overlapping diners
        shared_counts_vec.truncate(500);
        shared_counts_vec.into_iter().map(|(uid, _)| uid).collect()
    }

    /// Count, per unseen restaurant, how many similar diners liked it
    fn get_candidate_counts(
        &self,
        similar_diners: &HashSet<UserId>,
        profile: &DinerProfile,
    ) -> HashMap<RestaurantId, u32> {
        similar_diners
            .par_iter()
            .fold(
                HashMap::new,
                |mut local_counts: HashMap<RestaurantId, u32>, similar_user_id| {
                    let reviews = self.catalog.get_user_reviews(similar_user_id);
                    for review in reviews {
                        if review.stars >= self.high_rating_threshold
                            && !profile.reviewed.contains(&review.restaurant_id)
                        {
                            *local_counts.entry(review.restaurant_id.clone()).or_insert(0) += 1;
                        }
                    }
                    local_counts
                },
            )
            .reduce(HashMap::new, |mut acc, local_counts| {
                for (restaurant_id, count) in local_counts {
                    *acc.entry(restaurant_id).or_insert(0) += count;
                }
                acc
            })
    }
}
