//! Candidate and profile types shared by the recommendation sources.

use catalog::{RestaurantId, UserId};
use std::collections::{HashMap, HashSet};

/// Which source proposed a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Collaborative filtering over diners with overlapping taste
    SimilarDiners,
    /// Discovery through cuisine preferences and popularity
    Discovery,
}

/// Extra signals attached by the source that produced a candidate.
///
/// Kept around so the orchestrator can explain a recommendation.
#[derive(Debug, Clone, Default)]
pub struct CandidateMetadata {
    /// How many similar diners liked this restaurant (SimilarDiners only)
    pub similar_diners_count: Option<u32>,
    /// Cuisine tags that matched the diner's preferences (Discovery only)
    pub matched_cuisines: Vec<String>,
    /// Candidate surfaced by the popularity strategy
    pub from_popularity: bool,
}

/// A restaurant proposed by one of the sources, before filtering and scoring.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub restaurant_id: RestaurantId,
    pub source: CandidateSource,
    /// Source-relative score in [0, 1]; blended into a final score later
    pub base_score: f32,
    pub metadata: CandidateMetadata,
}

impl Candidate {
    pub fn new(restaurant_id: RestaurantId, source: CandidateSource, base_score: f32) -> Self {
        Self {
            restaurant_id,
            source,
            base_score,
            metadata: CandidateMetadata::default(),
        }
    }
}

/// Aggregated view of one diner's review history.
///
/// Built once per request and handed to every source and filter, so the
/// catalog is not re-queried for the same facts over and over.
#[derive(Debug, Clone)]
pub struct DinerProfile {
    pub user_id: UserId,
    /// Every restaurant the diner has reviewed
    ///
    /// Rust concept: HashSet gives O(1) "already reviewed?" checks in the
    /// hot candidate loops
    pub reviewed: HashSet<RestaurantId>,
    /// Restaurants rated at or above the liked threshold
    pub liked: Vec<RestaurantId>,
    /// Average stars the diner gave per cuisine tag
    pub cuisine_preferences: HashMap<String, f32>,
    /// Average stars across all of the diner's reviews
    pub avg_stars: f32,
}

impl DinerProfile {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            reviewed: HashSet::new(),
            liked: Vec::new(),
            cuisine_preferences: HashMap::new(),
            avg_stars: 0.0,
        }
    }

    /// The diner's top N cuisines by average stars given.
    ///
    /// Ties break on the tag name so the answer is stable across runs.
    pub fn top_cuisines(&self, n: usize) -> Vec<String> {
        let mut ranked: Vec<(&String, f32)> = self
            .cuisine_preferences
            .iter()
            .map(|(cuisine, &score)| (cuisine, score))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.into_iter().take(n).map(|(cuisine, _)| cuisine.clone()).collect()
    }
}
