//! The search engine: select, classify, rank and cap restaurant results.
//!
//! This is the component the HTTP handlers and the CLI both drive. It is a
//! pure function of (catalog, config, request): no mutable state is touched
//! during a search, so any number of requests can run in parallel against
//! the same `Arc<Catalog>` snapshot.

use crate::config::SearchConfig;
use crate::{geo, matcher};
use catalog::{Catalog, Coordinate, Restaurant};
use rayon::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors a search request can be rejected with
#[derive(Error, Debug)]
pub enum SearchError {
    /// Origin coordinates missing their valid range; a silently defaulted
    /// origin would produce misleading "nearby" results, so reject instead
    #[error("Invalid origin coordinates: lat={lat}, lng={lng}")]
    InvalidOrigin { lat: f64, lng: f64 },
}

/// Which side of the radius a result landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Nearby,
    Other,
}

/// One scored hit. Derived per request and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredResult {
    pub restaurant: Restaurant,
    pub distance_km: f64,
    pub match_score: f32,
    pub band: Band,
}

/// Partitioned output of a coordinate search. Both partitions are always
/// present, each sorted and capped independently.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub nearby: Vec<ScoredResult>,
    pub others: Vec<ScoredResult>,
}

/// Coordinates + optional-text search over a read-only catalog snapshot.
pub struct SearchEngine {
    catalog: Arc<Catalog>,
    config: SearchConfig,
}

impl SearchEngine {
    pub fn new(catalog: Arc<Catalog>, config: SearchConfig) -> Self {
        Self { catalog, config }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Coordinate-based search.
    ///
    /// ## Algorithm
    /// 1. Candidates = the whole catalog (city plays no part in this mode)
    /// 2. With a non-empty query, score each candidate and drop score-0 ones;
    ///    the query is a filter, not just a re-ranker
    /// 3. Classify: distance <= nearby_radius_km goes to "nearby", the rest
    ///    to "others" (boundary inclusive)
    /// 4. Sort each partition by distance ascending, ties by stars
    ///    descending then name ascending
    /// 5. Truncate each partition to max_results when configured
    ///
    /// An empty catalog yields two empty partitions, not an error.
    #[instrument(skip(self, origin), fields(lat = origin.lat, lng = origin.lng, query = %query))]
    pub fn nearby_search(
        &self,
        origin: Coordinate,
        query: &str,
    ) -> Result<SearchOutcome, SearchError> {
        if !origin.is_valid() {
            return Err(SearchError::InvalidOrigin {
                lat: origin.lat,
                lng: origin.lng,
            });
        }

        let filtering = !query.trim().is_empty();

        let hits: Vec<ScoredResult> = self
            .catalog
            .all_restaurants()
            .par_iter()
            .filter_map(|restaurant| {
                let match_score = if filtering {
                    let score = matcher::match_score(restaurant, query);
                    if score == 0.0 {
                        return None;
                    }
                    score
                } else {
                    0.0
                };

                let distance_km = geo::distance_km(origin, restaurant.coord);
                let band = if distance_km <= self.config.nearby_radius_km {
                    Band::Nearby
                } else {
                    Band::Other
                };

                Some(ScoredResult {
                    restaurant: restaurant.clone(),
                    distance_km,
                    match_score,
                    band,
                })
            })
            .collect();

        let (nearby, others): (Vec<_>, Vec<_>) =
            hits.into_iter().partition(|hit| hit.band == Band::Nearby);

        let mut outcome = SearchOutcome { nearby, others };
        sort_partition(&mut outcome.nearby);
        sort_partition(&mut outcome.others);

        if let Some(cap) = self.config.max_results {
            outcome.nearby.truncate(cap);
            outcome.others.truncate(cap);
        }

        debug!(
            nearby = outcome.nearby.len(),
            others = outcome.others.len(),
            filtering,
            "search complete"
        );
        Ok(outcome)
    }

    /// City-based search: every restaurant in the city, in catalog order.
    ///
    /// No origin is available in this mode, so there is no distance to sort
    /// by; the flat list goes straight onto the map. An unknown city is an
    /// empty Vec, never an error.
    #[instrument(skip(self))]
    pub fn city_search(&self, city: &str) -> Vec<Restaurant> {
        let found: Vec<Restaurant> = self
            .catalog
            .restaurants_in_city(city)
            .into_iter()
            .cloned()
            .collect();
        debug!(city, found = found.len(), "city search complete");
        found
    }
}

/// Distance ascending, then stars descending, then name ascending.
///
/// `total_cmp` gives a total order over floats, and the underlying sort is
/// stable, so equal keys keep their catalog order run after run.
fn sort_partition(results: &mut [ScoredResult]) {
    results.sort_by(|a, b| {
        a.distance_km
            .total_cmp(&b.distance_km)
            .then_with(|| b.restaurant.stars.total_cmp(&a.restaurant.stars))
            .then_with(|| a.restaurant.name.cmp(&b.restaurant.name))
    });
}
