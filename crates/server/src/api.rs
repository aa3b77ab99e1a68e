//! Wire types for the HTTP API.
//!
//! The internal search and recommendation types carry more than the API
//! exposes; this module is the one place where they are flattened into the
//! response shapes and where display rounding happens.

use catalog::Restaurant;
use search::ScoredResult;
use serde::Serialize;

use crate::recommend::Recommendation;

/// Item shape for `/restaurants` responses
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantItem {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub stars: f32,
    pub address: String,
}

/// Item shape for `/search` responses: a restaurant plus its distance
/// from the request origin
#[derive(Debug, Clone, Serialize)]
pub struct SearchItem {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub stars: f32,
    pub address: String,
    pub distance: f64,
}

/// Partitioned body for `/search` responses
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub nearby: Vec<SearchItem>,
    pub others: Vec<SearchItem>,
}

/// Item shape for `/recommend` responses: a restaurant plus its final score
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationItem {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub stars: f32,
    pub address: String,
    pub score: f32,
}

/// Body for `/health`
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub restaurants: usize,
}

impl From<&Restaurant> for RestaurantItem {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            name: restaurant.name.clone(),
            latitude: restaurant.coord.lat,
            longitude: restaurant.coord.lng,
            stars: restaurant.stars,
            address: restaurant.address.clone(),
        }
    }
}

impl From<&ScoredResult> for SearchItem {
    fn from(result: &ScoredResult) -> Self {
        Self {
            name: result.restaurant.name.clone(),
            latitude: result.restaurant.coord.lat,
            longitude: result.restaurant.coord.lng,
            stars: result.restaurant.stars,
            address: result.restaurant.address.clone(),
            // Rounded here and only here; classification and sorting
            // upstream used the unrounded distance
            distance: round2(result.distance_km),
        }
    }
}

impl From<&Recommendation> for RecommendationItem {
    fn from(rec: &Recommendation) -> Self {
        Self {
            name: rec.restaurant.name.clone(),
            latitude: rec.restaurant.coord.lat,
            longitude: rec.restaurant.coord.lng,
            stars: rec.restaurant.stars,
            address: rec.restaurant.address.clone(),
            score: rec.score,
        }
    }
}

/// Round to 2 decimal places for display
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
