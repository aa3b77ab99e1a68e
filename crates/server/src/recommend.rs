//! # Recommendation Orchestrator
//!
//! This module coordinates the entire recommendation pipeline:
//! 1. Build the diner's profile
//! 2. Generate candidates (SimilarDiners + Discovery in parallel)
//! 3. Merge and deduplicate candidates
//! 4. Apply filters
//! 5. Score the survivors
//! 6. Rank and return the top N recommendations

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tracing::info;

use catalog::{Catalog, Restaurant, RestaurantId};
use pipeline::filters::{AlreadyReviewedFilter, CuisinePreferenceFilter, MinimumStarsFilter};
use pipeline::{FilterPipeline, ScoredCandidate, Scorer};
use recs::diner_profile::build_diner_profile;
use recs::{Candidate, CandidateSource, DinerProfile, DiscoverySource, SimilarDinersSource};

use crate::error::ApiError;

/// How many candidates each source may contribute before merging
const SIMILAR_DINERS_CANDIDATES: usize = 50;
const DISCOVERY_CANDIDATES: usize = 30;

/// Final recommendation returned to the caller
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub restaurant: Restaurant,
    pub score: f32,
    pub source: CandidateSource,
    pub explanation: String,
}

/// Main orchestrator that coordinates the recommendation pipeline
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    catalog: Arc<Catalog>,
    similar_diners: SimilarDinersSource,
    discovery: DiscoverySource,
    filter_pipeline: Arc<FilterPipeline>,
    scorer: Scorer,
}

impl RecommendationOrchestrator {
    /// Create a new orchestrator with all components initialized
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let similar_diners = SimilarDinersSource::new(catalog.clone());
        let discovery = DiscoverySource::new(catalog.clone());
        let filter_pipeline = Arc::new(
            FilterPipeline::new()
                .add_filter(AlreadyReviewedFilter)
                .add_filter(MinimumStarsFilter::new(catalog.clone(), 3.5, 10))
                .add_filter(CuisinePreferenceFilter::new(catalog.clone(), 3)),
        );
        let scorer = Scorer::new(catalog.clone());
        Self {
            catalog,
            similar_diners,
            discovery,
            filter_pipeline,
            scorer,
        }
    }

    /// Main entry point: get recommendations for a diner
    ///
    /// # Arguments
    /// * `user_id` - The diner to generate recommendations for
    /// * `limit` - Number of recommendations to return
    ///
    /// # Returns
    /// Vector of Recommendation sorted by score (highest first)
    pub async fn get_recommendations(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<Recommendation>, ApiError> {
        let start_time = Instant::now();

        // Profile building fails only when the user has no reviews on file
        let profile = build_diner_profile(&self.catalog, user_id).map_err(|_| {
            ApiError::UserNotFound {
                user_id: user_id.to_string(),
            }
        })?;
        info!("Built diner profile for {}", user_id);

        // Generate candidates in parallel
        let (similar_candidates, discovery_candidates) =
            self.generate_candidates_parallel(&profile).await?;
        info!(
            "Generated {} SimilarDiners candidates and {} Discovery candidates",
            similar_candidates.len(),
            discovery_candidates.len()
        );

        // Merge candidates
        let merged = self.merge_candidates(similar_candidates, discovery_candidates);
        info!("Merged candidates, total after deduplication: {}", merged.len());

        // Apply filters
        let filtered = self
            .filter_pipeline
            .apply(merged, &profile)
            .context("Failed to apply filters")?;
        info!("Applied filters, candidates remaining: {}", filtered.len());

        // Score the survivors
        let scored = self.scorer.score_candidates(filtered, &profile);
        info!("Scored {} candidates", scored.len());

        // Rank and select top N
        let recommendations = self.rank_and_select(scored, limit);
        info!(
            "Selected top {} recommendations for {}",
            recommendations.len(),
            user_id
        );

        info!(
            "Total time to get recommendations for {}: {:.2?}",
            user_id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Generate candidates from both sources in parallel
    async fn generate_candidates_parallel(
        &self,
        profile: &DinerProfile,
    ) -> Result<(Vec<Candidate>, Vec<Candidate>), ApiError> {
        // tokio::join! over spawn_blocking keeps the CPU-bound rayon work
        // off the async worker threads
        let (similar_result, discovery_result) = tokio::join!(
            tokio::task::spawn_blocking({
                let source = self.similar_diners.clone();
                let profile = profile.clone();
                move || source.get_candidates(&profile, SIMILAR_DINERS_CANDIDATES)
            }),
            tokio::task::spawn_blocking({
                let source = self.discovery.clone();
                let profile = profile.clone();
                move || source.get_candidates(&profile, DISCOVERY_CANDIDATES)
            })
        );

        let similar_candidates = similar_result.context("SimilarDiners task panicked")?;
        let discovery_candidates = discovery_result.context("Discovery task panicked")?;
        Ok((similar_candidates, discovery_candidates))
    }

    /// Merge candidates from both sources and deduplicate by restaurant id
    fn merge_candidates(
        &self,
        similar_candidates: Vec<Candidate>,
        discovery_candidates: Vec<Candidate>,
    ) -> Vec<Candidate> {
        let mut map: HashMap<RestaurantId, Candidate> = HashMap::new();

        let similar_len = similar_candidates.len();
        let discovery_len = discovery_candidates.len();

        // On a duplicate, the higher base score wins
        for candidate in similar_candidates.into_iter().chain(discovery_candidates) {
            map.entry(candidate.restaurant_id.clone())
                .and_modify(|existing| {
                    if candidate.base_score > existing.base_score {
                        *existing = candidate.clone();
                    }
                })
                .or_insert(candidate);
        }

        let merged: Vec<Candidate> = map.into_values().collect();

        info!(
            "Merged candidates: similar_diners={}, discovery={}, total_after_dedup={}",
            similar_len,
            discovery_len,
            merged.len()
        );

        merged
    }

    /// Rank scored candidates and keep the top N, enriched from the catalog
    fn rank_and_select(&self, scored: Vec<ScoredCandidate>, limit: usize) -> Vec<Recommendation> {
        let mut scored = scored;

        // Sort by score DESC; equal scores fall back to the id so the
        // response order never depends on HashMap iteration
        scored.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.candidate.restaurant_id.cmp(&b.candidate.restaurant_id))
        });
        scored.truncate(limit);

        scored
            .into_iter()
            .filter_map(|entry| {
                let restaurant = self.catalog.get_restaurant(&entry.candidate.restaurant_id)?;
                Some(Recommendation {
                    restaurant: restaurant.clone(),
                    score: entry.score,
                    source: entry.candidate.source,
                    explanation: format!(
                        "Score: {:.2}, Source: {:?}",
                        entry.score, entry.candidate.source
                    ),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Coordinate, Review};
    use recs::CandidateMetadata;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

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

    /// Minimal catalog with enough review volume to clear the quality floors
    fn build_test_catalog() -> Arc<Catalog> {
        let mut catalog = Catalog::new();

        catalog.insert_restaurant(restaurant("r1", "Paradise", 4.5, 900, &["Biryani"]));
        catalog.insert_restaurant(restaurant("r2", "Dosa Hut", 4.0, 300, &["Dosa"]));
        catalog.insert_restaurant(restaurant("r3", "Bawarchi", 4.4, 700, &["Biryani"]));
        catalog.insert_restaurant(restaurant("r4", "Shah Ghouse", 4.3, 600, &["Biryani"]));
        catalog.insert_restaurant(restaurant("r5", "Cafe Niloufer", 4.6, 1000, &["Cafe"]));

        // Background reviewers so every restaurant clears min_review_count
        for (restaurant_id, prefix, stars) in [
            ("r1", "a", 4.5),
            ("r2", "b", 4.2),
            ("r3", "c", 4.4),
            ("r4", "d", 4.3),
            ("r5", "e", 4.6),
        ] {
            for i in 0..15 {
                catalog.insert_review(review(&format!("{}{}", prefix, i), restaurant_id, stars));
            }
        }

        // u1 - target diner: likes biryani, has been to r1 and r2
        catalog.insert_review(review("u1", "r1", 5.0));
        catalog.insert_review(review("u1", "r2", 4.0));

        // u2 - similar diner: shares r1 and r2, also likes r3 and r4
        catalog.insert_review(review("u2", "r1", 5.0));
        catalog.insert_review(review("u2", "r2", 4.5));
        catalog.insert_review(review("u2", "r3", 4.5));
        catalog.insert_review(review("u2", "r4", 4.5));

        // u3 - shares only r1, not similar
        catalog.insert_review(review("u3", "r1", 4.5));

        catalog.compute_restaurant_stats();
        Arc::new(catalog)
    }

    fn candidate(id: &str, source: CandidateSource, base_score: f32) -> Candidate {
        Candidate {
            restaurant_id: id.to_string(),
            source,
            base_score,
            metadata: CandidateMetadata::default(),
        }
    }

    fn scored(id: &str, score: f32) -> ScoredCandidate {
        ScoredCandidate {
            candidate: candidate(id, CandidateSource::SimilarDiners, score),
            score,
        }
    }

    // ============================================================================
    // Unit Tests: merge_candidates
    // ============================================================================

    #[test]
    fn test_merge_candidates_deduplicates_by_restaurant_id() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());

        let similar = vec![
            candidate("r1", CandidateSource::SimilarDiners, 0.8),
            candidate("r2", CandidateSource::SimilarDiners, 0.7),
            candidate("r3", CandidateSource::SimilarDiners, 0.6),
        ];
        let discovery = vec![
            candidate("r1", CandidateSource::Discovery, 0.5), // duplicate, lower score
            candidate("r4", CandidateSource::Discovery, 0.9),
            candidate("r5", CandidateSource::Discovery, 0.4),
        ];

        let merged = orchestrator.merge_candidates(similar, discovery);

        assert_eq!(merged.len(), 5, "Should have 5 unique restaurants after merge");

        let r1 = merged
            .iter()
            .find(|c| c.restaurant_id == "r1")
            .expect("r1 should exist");
        assert_eq!(r1.base_score, 0.8, "Should keep higher score");
        assert_eq!(r1.source, CandidateSource::SimilarDiners);
    }

    #[test]
    fn test_merge_candidates_keeps_highest_score_on_duplicate() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());

        let similar = vec![candidate("r1", CandidateSource::SimilarDiners, 0.3)];
        let discovery = vec![candidate("r1", CandidateSource::Discovery, 0.9)];

        let merged = orchestrator.merge_candidates(similar, discovery);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].base_score, 0.9, "Should keep higher Discovery score");
        assert_eq!(merged[0].source, CandidateSource::Discovery);
    }

    #[test]
    fn test_merge_candidates_handles_empty_inputs() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());

        let merged = orchestrator.merge_candidates(vec![], vec![]);
        assert_eq!(merged.len(), 0, "Empty inputs should return empty result");

        let similar = vec![candidate("r1", CandidateSource::SimilarDiners, 0.5)];
        let merged = orchestrator.merge_candidates(similar, vec![]);
        assert_eq!(merged.len(), 1, "Should handle discovery empty");

        let discovery = vec![candidate("r2", CandidateSource::Discovery, 0.7)];
        let merged = orchestrator.merge_candidates(vec![], discovery);
        assert_eq!(merged.len(), 1, "Should handle similar_diners empty");
    }

    // ============================================================================
    // Unit Tests: rank_and_select
    // ============================================================================

    #[test]
    fn test_rank_and_select_sorts_by_score_descending() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());

        let recommendations = orchestrator.rank_and_select(
            vec![scored("r1", 0.2), scored("r2", 0.9), scored("r3", 0.5)],
            10,
        );

        assert_eq!(recommendations.len(), 3);
        assert_eq!(recommendations[0].restaurant.id, "r2");
        assert_eq!(recommendations[0].score, 0.9);
        assert_eq!(recommendations[1].restaurant.id, "r3");
        assert_eq!(recommendations[2].restaurant.id, "r1");
    }

    #[test]
    fn test_rank_and_select_truncates_to_limit() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());

        let entries: Vec<ScoredCandidate> = (1..=5)
            .map(|i| scored(&format!("r{}", i), i as f32 * 0.1))
            .collect();

        let recommendations = orchestrator.rank_and_select(entries, 3);

        assert_eq!(recommendations.len(), 3, "Should truncate to limit of 3");
        assert_eq!(recommendations[0].restaurant.id, "r5");
        assert_eq!(recommendations[1].restaurant.id, "r4");
        assert_eq!(recommendations[2].restaurant.id, "r3");
    }

    #[test]
    fn test_rank_and_select_breaks_ties_by_id() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());

        let recommendations = orchestrator.rank_and_select(
            vec![scored("r3", 0.5), scored("r1", 0.5), scored("r2", 0.5)],
            10,
        );

        let ids: Vec<&str> = recommendations
            .iter()
            .map(|r| r.restaurant.id.as_str())
            .collect();
        assert_eq!(ids, vec!["r1", "r2", "r3"], "Equal scores must order by id");
    }

    #[test]
    fn test_rank_and_select_enriches_with_catalog_fields() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());

        let recommendations = orchestrator.rank_and_select(vec![scored("r1", 0.8)], 10);

        assert_eq!(recommendations.len(), 1);
        let rec = &recommendations[0];
        assert_eq!(rec.restaurant.name, "Paradise");
        assert_eq!(rec.restaurant.stars, 4.5);
        assert_eq!(rec.score, 0.8);
        assert!(rec.explanation.contains("Score"));
    }

    #[test]
    fn test_rank_and_select_filters_missing_restaurants() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());

        let recommendations = orchestrator.rank_and_select(
            vec![scored("r1", 0.5), scored("ghost", 0.9), scored("r2", 0.3)],
            10,
        );

        assert_eq!(recommendations.len(), 2, "Unknown id should be dropped");
        assert_eq!(recommendations[0].restaurant.id, "r1");
        assert_eq!(recommendations[1].restaurant.id, "r2");
    }

    #[test]
    fn test_rank_and_select_handles_empty_input() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());
        let recommendations = orchestrator.rank_and_select(vec![], 10);
        assert_eq!(recommendations.len(), 0);
    }

    // ============================================================================
    // Integration Tests
    // ============================================================================

    #[tokio::test]
    async fn test_get_recommendations_end_to_end() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());

        let recommendations = orchestrator
            .get_recommendations("u1", 5)
            .await
            .expect("recommendations should succeed");

        // r3 and r4 are liked by the similar diner, on-cuisine, and above
        // the quality floors; r5 is off-cuisine, r1/r2 already reviewed
        let ids: Vec<&str> = recommendations
            .iter()
            .map(|r| r.restaurant.id.as_str())
            .collect();
        assert_eq!(ids, vec!["r3", "r4"]);

        for rec in &recommendations {
            assert!(rec.score > 0.0 && rec.score <= 1.0);
            assert_eq!(rec.source, CandidateSource::SimilarDiners);
        }
    }

    #[tokio::test]
    async fn test_get_recommendations_is_deterministic() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());

        let first = orchestrator.get_recommendations("u1", 5).await.unwrap();
        let second = orchestrator.get_recommendations("u1", 5).await.unwrap();

        let first_ids: Vec<_> = first.iter().map(|r| r.restaurant.id.clone()).collect();
        let second_ids: Vec<_> = second.iter().map(|r| r.restaurant.id.clone()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[tokio::test]
    async fn test_get_recommendations_unknown_user() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());

        let err = orchestrator
            .get_recommendations("nobody", 5)
            .await
            .expect_err("unknown user must fail");
        assert!(matches!(err, ApiError::UserNotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_recommendations_respects_limit() {
        let orchestrator = RecommendationOrchestrator::new(build_test_catalog());

        let recommendations = orchestrator.get_recommendations("u1", 1).await.unwrap();
        assert_eq!(recommendations.len(), 1);
        assert_eq!(recommendations[0].restaurant.id, "r3");
    }
}
