//! Final scoring for filtered candidates.
//!
//! This module blends the source's base score with catalog-wide signals
//! into the single score that drives ranking.

use catalog::{Catalog, Restaurant};
use rayon::prelude::*;
use recs::{Candidate, DinerProfile};
use std::collections::HashSet;
use std::sync::Arc;

/// Weight of the source's own score (collaborative or discovery strength)
const BASE_WEIGHT: f32 = 0.5;

/// Weight of how well the restaurant's cuisines fit the diner's tastes
const CUISINE_WEIGHT: f32 = 0.3;

/// Weight of how broadly popular the restaurant is
const POPULARITY_WEIGHT: f32 = 0.2;

/// A candidate with its final blended score attached.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f32,
}

/// Scores candidates by blending source, taste, and popularity signals.
///
/// ## Algorithm
/// score = 0.5 * base_score
///       + 0.3 * cuisine_affinity (Jaccard vs the diner's top cuisines)
///       + 0.2 * popularity (normalized against the catalog maximum)
///
/// Every component stays in [0, 1] and the weights sum to 1.0, so the
/// final score is in [0, 1] as well.
#[derive(Clone)]
pub struct Scorer {
    catalog: Arc<Catalog>,

    /// Highest popularity score in the catalog, captured once at
    /// construction so per-candidate normalization is a single divide
    max_popularity: f32,
}

impl Scorer {
    /// Create a new Scorer over a loaded catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let max_popularity = catalog
            .all_restaurants()
            .iter()
            .filter_map(|r| catalog.get_restaurant_stats(&r.id))
            .map(|stats| stats.popularity_score)
            .fold(0.0_f32, f32::max);
        Self {
            catalog,
            max_popularity,
        }
    }

    /// Score all candidates in parallel.
    ///
    /// # Arguments
    /// * `candidates` - The filtered candidates to score
    /// * `profile` - Diner profile for personalized signals
    ///
    /// # Returns
    /// Vec of ScoredCandidate, one per candidate, in the same order
    pub fn score_candidates(
        &self,
        candidates: Vec<Candidate>,
        profile: &DinerProfile,
    ) -> Vec<ScoredCandidate> {
        candidates
            .into_par_iter()
            .map(|candidate| self.score_single(candidate, profile))
            .collect()
    }

    /// Score a single candidate.
    ///
    /// This is called in parallel for each candidate.
    fn score_single(&self, candidate: Candidate, profile: &DinerProfile) -> ScoredCandidate {
        // A candidate whose restaurant vanished from the catalog keeps only
        // its base component; filters upstream normally remove these
        let Some(restaurant) = self.catalog.get_restaurant(&candidate.restaurant_id) else {
            let score = BASE_WEIGHT * candidate.base_score;
            return ScoredCandidate { candidate, score };
        };

        let cuisine_affinity = self.cuisine_affinity(restaurant, profile);
        let popularity = self.popularity(&candidate.restaurant_id);

        let score = BASE_WEIGHT * candidate.base_score
            + CUISINE_WEIGHT * cuisine_affinity
            + POPULARITY_WEIGHT * popularity;

        ScoredCandidate { candidate, score }
    }

    /// Cuisine affinity (Jaccard similarity).
    ///
    /// ## Algorithm
    /// Jaccard similarity = |intersection| / |union|
    /// Compare the restaurant's cuisines with the diner's top cuisines
    fn cuisine_affinity(&self, restaurant: &Restaurant, profile: &DinerProfile) -> f32 {
        let top_cuisines: HashSet<String> = profile.top_cuisines(3).into_iter().collect();

        let restaurant_cuisines: HashSet<String> = restaurant
            .cuisines
            .iter()
            .map(|c| c.to_lowercase())
            .collect();

        let intersection = top_cuisines.intersection(&restaurant_cuisines).count() as f32;
        let union = top_cuisines.union(&restaurant_cuisines).count() as f32;
        if union == 0.0 {
            0.0
        } else {
            intersection / union
        }
    }

    /// Popularity normalized to [0, 1] against the catalog maximum.
    fn popularity(&self, restaurant_id: &str) -> f32 {
        if self.max_popularity <= 0.0 {
            return 0.0;
        }
        match self.catalog.get_restaurant_stats(restaurant_id) {
            Some(stats) => (stats.popularity_score / self.max_popularity).clamp(0.0, 1.0),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Coordinate, Restaurant};
    use recs::CandidateSource;

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

    fn create_test_catalog() -> Arc<Catalog> {
        let mut catalog = Catalog::new();
        catalog.insert_restaurant(restaurant("r1", "Bawarchi", 4.5, 900, &["Biryani"]));
        catalog.insert_restaurant(restaurant("r2", "Pasta Palace", 4.5, 900, &["Italian"]));
        catalog.insert_restaurant(restaurant("r3", "Tiny Cafe", 3.0, 5, &["Cafe"]));
        catalog.compute_restaurant_stats();
        Arc::new(catalog)
    }

    fn biryani_profile() -> DinerProfile {
        let mut profile = DinerProfile::new("u1".to_string());
        profile.cuisine_preferences.insert("biryani".to_string(), 5.0);
        profile
    }

    #[test]
    fn test_scores_stay_in_unit_range() {
        let catalog = create_test_catalog();
        let scorer = Scorer::new(catalog);
        let profile = biryani_profile();

        let candidates = vec![
            Candidate::new("r1".to_string(), CandidateSource::SimilarDiners, 1.0),
            Candidate::new("r2".to_string(), CandidateSource::Discovery, 0.4),
            Candidate::new("r3".to_string(), CandidateSource::Discovery, 0.0),
        ];

        let scored = scorer.score_candidates(candidates, &profile);
        assert_eq!(scored.len(), 3);
        for entry in &scored {
            assert!(entry.score >= 0.0 && entry.score <= 1.0);
        }
    }

    #[test]
    fn test_cuisine_affinity_breaks_base_score_ties() {
        let catalog = create_test_catalog();
        let scorer = Scorer::new(catalog);
        let profile = biryani_profile();

        // Same base score and same popularity; only the cuisine differs
        let candidates = vec![
            Candidate::new("r1".to_string(), CandidateSource::Discovery, 0.8),
            Candidate::new("r2".to_string(), CandidateSource::Discovery, 0.8),
        ];

        let scored = scorer.score_candidates(candidates, &profile);
        let r1 = scored.iter().find(|s| s.candidate.restaurant_id == "r1").unwrap();
        let r2 = scored.iter().find(|s| s.candidate.restaurant_id == "r2").unwrap();
        assert!(r1.score > r2.score, "on-cuisine restaurant must score higher");
    }

    #[test]
    fn test_missing_restaurant_keeps_base_component_only() {
        let catalog = create_test_catalog();
        let scorer = Scorer::new(catalog);
        let profile = biryani_profile();

        let candidates = vec![Candidate::new(
            "ghost".to_string(),
            CandidateSource::Discovery,
            0.6,
        )];

        let scored = scorer.score_candidates(candidates, &profile);
        assert!((scored[0].score - 0.3).abs() < 1e-6);
    }
}
