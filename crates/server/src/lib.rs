//! Server crate for the BiteMap restaurant search engine.
//!
//! This crate holds the HTTP surface: the router and handlers, the wire
//! types the API speaks, the error taxonomy, and the orchestrator behind
//! the recommendation endpoint. The `bitemap-server` binary wires a
//! loaded catalog into all of it.

pub mod api;
pub mod error;
pub mod recommend;
pub mod routes;

pub use api::{HealthResponse, RecommendationItem, RestaurantItem, SearchItem, SearchResponse};
pub use error::ApiError;
pub use recommend::{Recommendation, RecommendationOrchestrator};
pub use routes::app_router;
