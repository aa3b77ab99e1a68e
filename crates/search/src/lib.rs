//! # Search Crate
//!
//! The geospatial + text search engine behind the restaurant API.
//!
//! ## Main Components
//!
//! - **geo**: haversine great-circle distance
//! - **matcher**: free-text relevance scoring against names and cuisines
//! - **config**: the explicit knobs (nearby radius, result cap)
//! - **engine**: the orchestrator that selects, classifies, ranks and caps
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{Catalog, Coordinate};
//! use search::{SearchConfig, SearchEngine};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(Catalog::load_from_files(Path::new("data/sample"))?);
//! let engine = SearchEngine::new(catalog, SearchConfig::new());
//!
//! let outcome = engine.nearby_search(Coordinate::new(17.385, 78.4867), "biryani")?;
//! println!("{} nearby, {} further out", outcome.nearby.len(), outcome.others.len());
//! ```

// Public modules
pub mod config;
pub mod engine;
pub mod geo;
pub mod matcher;

// Re-export main types
pub use config::{SearchConfig, DEFAULT_NEARBY_RADIUS_KM};
pub use engine::{Band, ScoredResult, SearchEngine, SearchError, SearchOutcome};
pub use geo::distance_km;
pub use matcher::match_score;
