//! Discovery Source - Out-of-Network Exploration
//!
//! Generates candidate recommendations the diner has no review-graph path to:
//! "You haven't been here, but diners rate it well and it fits your tastes"
//!
//! Two strategies, merged into one candidate set:
//! 1. Cuisine-based: well-rated restaurants serving the diner's top cuisines
//! 2. Popularity-based: broadly popular restaurants regardless of cuisine
//!
//! A restaurant surfaced by both keeps one candidate with the averaged score.

use crate::types::{Candidate, CandidateSource, DinerProfile};
use catalog::{Catalog, Restaurant, RestaurantId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Discovery generates out-of-network candidates for exploration
#[derive(Clone)]
pub struct DiscoverySource {
    catalog: Arc<Catalog>,

    /// Quality floor: minimum average review stars to recommend
    min_stars: f32,

    /// Quality floor: minimum number of reviews to trust the average
    min_review_count: u32,
}

impl DiscoverySource {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            min_stars: 3.5,
            min_review_count: 10,
        }
    }

    /// Configure the minimum average stars floor (default: 3.5)
    pub fn with_min_stars(mut self, min: f32) -> Self {
        self.min_stars = min;
        self
    }

    /// Configure the minimum review count floor (default: 10)
    pub fn with_min_review_count(mut self, min: u32) -> Self {
        self.min_review_count = min;
        self
    }

    /// Generate discovery candidates for a diner
    #[instrument(skip(self, profile), fields(user_id = %profile.user_id))]
    pub fn get_candidates(&self, profile: &DinerProfile, limit: usize) -> Vec<Candidate> {
        debug!("Generating Discovery candidates for {}", profile.user_id);

        let cuisine_based = self.get_cuisine_based(profile, limit);
        let popularity_based = self.get_popularity_based(profile, limit);
        debug!(
            "Cuisine-based: {}, popularity-based: {}",
            cuisine_based.len(),
            popularity_based.len()
        );

        // Merge the two strategies. Where both surfaced a restaurant, keep the
        // cuisine candidate but average the scores and flag the popularity hit.
        let mut merged: HashMap<RestaurantId, Candidate> = HashMap::new();
        for candidate in cuisine_based {
            merged.insert(candidate.restaurant_id.clone(), candidate);
        }
        for candidate in popularity_based {
            merged
                .entry(candidate.restaurant_id.clone())
                .and_modify(|existing| {
                    existing.base_score = (existing.base_score + candidate.base_score) / 2.0;
                    existing.metadata.from_popularity = true;
                })
                .or_insert(candidate);
        }

        let mut candidates: Vec<Candidate> = merged.into_values().collect();
        candidates.sort_by(|a, b| {
            b.base_score
                .total_cmp(&a.base_score)
                .then_with(|| a.restaurant_id.cmp(&b.restaurant_id))
        });
        candidates.truncate(limit);

        debug!("Generated {} Discovery candidates", candidates.len());
        candidates
    }

    /// Strategy 1: restaurants serving the diner's favorite cuisines.
    ///
    /// Score combines how good the restaurant is with how much the diner
    /// likes the cuisine: (stars / 5) * (preference / 5), kept in [0, 1].
    fn get_cuisine_based(&self, profile: &DinerProfile, limit: usize) -> Vec<Candidate> {
        let top_cuisines = profile.top_cuisines(3);

        let mut by_id: HashMap<RestaurantId, Candidate> = HashMap::new();
        for cuisine in &top_cuisines {
            let preference = profile
                .cuisine_preferences
                .get(cuisine)
                .copied()
                .unwrap_or(0.0);
            for restaurant in self.catalog.restaurants_with_cuisine(cuisine) {
                if profile.reviewed.contains(&restaurant.id) {
                    continue;
                }
                if !self.passes_quality_floor(restaurant) {
                    continue;
                }

                let score = (restaurant.stars / 5.0) * (preference / 5.0);
                by_id
                    .entry(restaurant.id.clone())
                    .and_modify(|existing| {
                        // Same restaurant through a second favorite cuisine:
                        // keep the stronger score, remember both cuisines
                        if score > existing.base_score {
                            existing.base_score = score;
                        }
                        existing.metadata.matched_cuisines.push(cuisine.clone());
                    })
                    .or_insert_with(|| {
                        let mut candidate = Candidate::new(
                            restaurant.id.clone(),
                            CandidateSource::Discovery,
                            score,
                        );
                        candidate.metadata.matched_cuisines.push(cuisine.clone());
                        candidate
                    });
            }
        }

        let mut candidates: Vec<Candidate> = by_id.into_values().collect();
        candidates.sort_by(|a, b| {
            b.base_score
                .total_cmp(&a.base_score)
                .then_with(|| a.restaurant_id.cmp(&b.restaurant_id))
        });
        candidates.truncate(limit);
        candidates
    }

    /// Strategy 2: broadly popular restaurants, normalized against the most
    /// popular one so the score lands in [0, 1].
    fn get_popularity_based(&self, profile: &DinerProfile, limit: usize) -> Vec<Candidate> {
        let mut scored: Vec<(RestaurantId, f32)> = self
            .catalog
            .all_restaurants()
            .iter()
            .filter(|r| !profile.reviewed.contains(&r.id))
            .filter(|r| self.passes_quality_floor(r))
            .filter_map(|r| {
                self.catalog
                    .get_restaurant_stats(&r.id)
                    .map(|stats| (r.id.clone(), stats.popularity_score))
            })
            .collect();

        let max_popularity = scored
            .iter()
            .map(|(_, p)| *p)
            .fold(0.0_f32, f32::max);
        if max_popularity <= 0.0 {
            return Vec::new();
        }

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(restaurant_id, popularity)| {
                let mut candidate = Candidate::new(
                    restaurant_id,
                    CandidateSource::Discovery,
                    popularity / max_popularity,
                );
                candidate.metadata.from_popularity = true;
                candidate
            })
            .collect()
    }

    /// Quality floor shared by both strategies. Prefers review-derived stats
    /// when reviews exist, otherwise falls back to the catalog fields.
    fn passes_quality_floor(&self, restaurant: &Restaurant) -> bool {
        if let Some(stats) = self.catalog.get_restaurant_stats(&restaurant.id)
            && stats.review_count > 0
        {
            return stats.avg_review_stars >= self.min_stars
                && stats.review_count >= self.min_review_count;
        }
        restaurant.stars >= self.min_stars && restaurant.review_count >= self.min_review_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diner_profile::build_diner_profile;
    use catalog::{Coordinate, Restaurant, Review};

    fn restaurant(id: &str, name: &str, stars: f32, review_count: u32, cuisines: &[&str]) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: name.to_string(),
            coord: Coordinate::new(17.385, 78.4867),
            stars,
            review_count,
            address: String::new(),
            city: Some("Hyderabad".to_string()),
            cuisines: cuisines.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn review(user: &str, restaurant: &str, stars: f32) -> Review {
        Review {
            user_id: user.to_string(),
            restaurant_id: restaurant.to_string(),
            stars,
        }
    }

    fn create_test_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        // r1: reviewed by u1 (biryani, loved)
        catalog.insert_restaurant(restaurant("r1", "Paradise Biryani", 4.5, 900, &["Biryani"]));
        // r2: unseen biryani place, strong ratings
        catalog.insert_restaurant(restaurant("r2", "Bawarchi", 4.4, 700, &["Biryani"]));
        // r3: unseen biryani place, below the stars floor
        catalog.insert_restaurant(restaurant("r3", "Corner Biryani", 3.0, 200, &["Biryani"]));
        // r4: unseen pizza place, popular but off-cuisine
        catalog.insert_restaurant(restaurant("r4", "Little Italy", 4.6, 1200, &["Pizza"]));
        // r5: unseen biryani place, too few reviews to trust
        catalog.insert_restaurant(restaurant("r5", "New Biryani House", 4.8, 3, &["Biryani"]));

        catalog.insert_review(review("u1", "r1", 5.0));
        catalog.compute_restaurant_stats();
        catalog
    }

    fn source_and_profile() -> (DiscoverySource, DinerProfile) {
        let catalog = Arc::new(create_test_catalog());
        let profile = build_diner_profile(&catalog, "u1").unwrap();
        (DiscoverySource::new(catalog), profile)
    }

    #[test]
    fn test_cuisine_based_respects_floors_and_history() {
        let (source, profile) = source_and_profile();
        let candidates = source.get_cuisine_based(&profile, 10);

        let ids: Vec<&str> = candidates.iter().map(|c| c.restaurant_id.as_str()).collect();
        assert!(ids.contains(&"r2"), "good unseen biryani place expected");
        assert!(!ids.contains(&"r1"), "already reviewed");
        assert!(!ids.contains(&"r3"), "below the stars floor");
        assert!(!ids.contains(&"r5"), "too few reviews");

        let r2 = candidates.iter().find(|c| c.restaurant_id == "r2").unwrap();
        assert_eq!(r2.metadata.matched_cuisines, vec!["biryani".to_string()]);
        // (4.4 / 5) * (5.0 / 5) = 0.88
        assert!((r2.base_score - 0.88).abs() < 1e-6);
    }

    #[test]
    fn test_popularity_based_is_normalized() {
        let (source, profile) = source_and_profile();
        let candidates = source.get_popularity_based(&profile, 10);

        assert!(!candidates.is_empty());
        // Most popular unseen restaurant scores exactly 1.0
        assert!((candidates[0].base_score - 1.0).abs() < 1e-6);
        assert_eq!(candidates[0].restaurant_id, "r4");
        for candidate in &candidates {
            assert!(candidate.base_score > 0.0 && candidate.base_score <= 1.0);
            assert!(candidate.metadata.from_popularity);
            assert_ne!(candidate.restaurant_id, "r1");
        }
    }

    #[test]
    fn test_merged_candidates_flag_both_strategies() {
        let (source, profile) = source_and_profile();
        let candidates = source.get_candidates(&profile, 10);

        // r2 is both on-cuisine and popular enough to chart
        let r2 = candidates.iter().find(|c| c.restaurant_id == "r2").unwrap();
        assert!(!r2.metadata.matched_cuisines.is_empty());
        assert!(r2.metadata.from_popularity);
        assert_eq!(r2.source, CandidateSource::Discovery);
    }

    #[test]
    fn test_limit_is_honored() {
        let (source, profile) = source_and_profile();
        let candidates = source.get_candidates(&profile, 1);
        assert_eq!(candidates.len(), 1);
    }
}
