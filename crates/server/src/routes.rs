//! HTTP routes and handlers.
//!
//! Three public surfaces share one catalog snapshot: the flat listings
//! endpoint (`/restaurants`), the partitioned text search (`/search`) and
//! the recommendation page (`/recommend`). Handlers stay thin: validate
//! the query parameters, hand the work to the engine or orchestrator,
//! convert to wire types. Every failure flows through `ApiError`, so an
//! error response never carries partial results.

use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Extension, Query};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use catalog::Coordinate;
use search::SearchEngine;

use crate::api::{HealthResponse, RecommendationItem, RestaurantItem, SearchItem, SearchResponse};
use crate::error::ApiError;
use crate::recommend::RecommendationOrchestrator;

/// How many recommendations come back when the caller does not say
const DEFAULT_RECOMMEND_LIMIT: usize = 5;

/// Build the application router with both shared resources layered in.
///
/// CORS is permissive because the map frontends are served from a
/// different origin than the API.
pub fn app_router(
    engine: Arc<SearchEngine>,
    recommender: Arc<RecommendationOrchestrator>,
) -> Router {
    Router::new()
        .route("/restaurants", get(get_restaurants))
        .route("/search", get(get_search))
        .route("/recommend", get(get_recommend))
        .route("/health", get(get_health))
        .layer(Extension(engine))
        .layer(Extension(recommender))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Query parameters for `/restaurants`: a coordinate pair or a city name.
#[derive(Debug, Deserialize)]
struct RestaurantsParams {
    lat: Option<f64>,
    lng: Option<f64>,
    city: Option<String>,
}

/// `GET /restaurants?lat=..&lng=..` or `GET /restaurants?city=..`
///
/// Exactly one mode per request. The coordinate mode returns only the
/// nearby partition: this endpoint backs the "around me" map view, which
/// has no use for the rest of the catalog.
async fn get_restaurants(
    Extension(engine): Extension<Arc<SearchEngine>>,
    Query(params): Query<RestaurantsParams>,
) -> Result<Json<Vec<RestaurantItem>>, ApiError> {
    match (params.lat, params.lng, params.city) {
        (None, None, Some(city)) => {
            let found = engine.city_search(&city);
            Ok(Json(found.iter().map(RestaurantItem::from).collect()))
        }
        (Some(lat), Some(lng), None) => {
            let origin = Coordinate::new(lat, lng);
            // The engine fans out over rayon; keep it off the async workers
            let outcome = tokio::task::spawn_blocking(move || engine.nearby_search(origin, ""))
                .await
                .context("search task panicked")??;
            Ok(Json(
                outcome
                    .nearby
                    .iter()
                    .map(|hit| RestaurantItem::from(&hit.restaurant))
                    .collect(),
            ))
        }
        (None, None, None) => Err(ApiError::InvalidRequest(
            "supply lat/lng coordinates or a city".to_string(),
        )),
        (_, _, Some(_)) => Err(ApiError::InvalidRequest(
            "supply either lat/lng or city, not both".to_string(),
        )),
        _ => Err(ApiError::InvalidRequest(
            "lat and lng are both required for a coordinate search".to_string(),
        )),
    }
}

/// Query parameters for `/search`. The text query is optional; the
/// coordinates are not.
#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

/// `GET /search?query=..&lat=..&lng=..`
///
/// Both partitions come back so the client can pin the nearby hits on
/// the map and list the rest below it. An absent or empty query means
/// no text filtering.
async fn get_search(
    Extension(engine): Extension<Arc<SearchEngine>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let origin = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
        _ => {
            return Err(ApiError::InvalidRequest(
                "lat and lng query parameters are required".to_string(),
            ))
        }
    };
    let query = params.query.unwrap_or_default();

    let outcome = tokio::task::spawn_blocking(move || engine.nearby_search(origin, &query))
        .await
        .context("search task panicked")??;

    Ok(Json(SearchResponse {
        nearby: outcome.nearby.iter().map(SearchItem::from).collect(),
        others: outcome.others.iter().map(SearchItem::from).collect(),
    }))
}

/// Query parameters for `/recommend`.
#[derive(Debug, Deserialize)]
struct RecommendParams {
    user_id: Option<String>,
    limit: Option<usize>,
}

/// `GET /recommend?user_id=..&limit=..`
///
/// A user the review file has never seen is a 404, not an empty list;
/// the client shows a different page for "new diner" than for "nothing
/// cleared the filters".
async fn get_recommend(
    Extension(recommender): Extension<Arc<RecommendationOrchestrator>>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<Vec<RecommendationItem>>, ApiError> {
    let user_id = params
        .user_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| {
            ApiError::InvalidRequest("user_id query parameter is required".to_string())
        })?;
    let limit = params.limit.unwrap_or(DEFAULT_RECOMMEND_LIMIT);

    let recommendations = recommender.get_recommendations(&user_id, limit).await?;
    Ok(Json(
        recommendations.iter().map(RecommendationItem::from).collect(),
    ))
}

/// `GET /health`: liveness plus the catalog size, which doubles as a
/// cheap "did the data actually load" check for deploy scripts.
async fn get_health(Extension(engine): Extension<Arc<SearchEngine>>) -> Json<HealthResponse> {
    let (restaurants, _, _) = engine.catalog().counts();
    Json(HealthResponse {
        status: "ok",
        restaurants,
    })
}
