//! # Recs Crate
//!
//! This crate implements candidate generation sources for restaurant
//! recommendations.
//!
//! ## Components
//!
//! ### SimilarDiners Source (In-Network)
//! Collaborative filtering based on similar diners:
//! - "Diners who liked what you liked also liked..."
//! - Scores candidates by the share of similar diners backing them
//!
//! ### Discovery Source (Out-of-Network)
//! Exploration through two strategies:
//! - Cuisine-based: restaurants serving the diner's favorite cuisines
//! - Popularity-based: broadly well-liked restaurants
//!
//! ## Example Usage
//!
//! ```ignore
//! use recs::{SimilarDinersSource, DiscoverySource, diner_profile::build_diner_profile};
//! use catalog::Catalog;
//! use std::sync::Arc;
//!
//! // Load data
//! let catalog = Arc::new(Catalog::load_from_files("data/sample".as_ref())?);
//!
//! // Build the diner's profile
//! let profile = build_diner_profile(&catalog, "u1")?;
//!
//! // Generate candidates
//! let similar = SimilarDinersSource::new(catalog.clone());
//! let discovery = DiscoverySource::new(catalog.clone());
//!
//! let in_network = similar.get_candidates(&profile, 50);
//! let out_of_network = discovery.get_candidates(&profile, 30);
//! ```
//!
//! ## Learning Goals
//!
//! This crate teaches:
//!
//! 1. **Algorithm Implementation**: Translating recommendation algorithms into Rust
//! 2. **HashMap Operations**: Aggregation, counting, scoring with entry() API
//! 3. **HashSet Usage**: O(1) lookups for filtering and deduplication
//! 4. **Arc for Sharing**: Sharing the Catalog across sources without copying
//! 5. **Builder Pattern**: Configurable sources with method chaining
//! 6. **Instrumentation**: Using tracing for observability
//! 7. **Multiple Strategies**: Combining different recommendation approaches

// Public modules
pub mod diner_profile;
pub mod discovery;
pub mod similar_diners;
pub mod types;

// Re-export commonly used types
pub use discovery::DiscoverySource;
pub use similar_diners::SimilarDinersSource;
pub use types::{Candidate, CandidateMetadata, CandidateSource, DinerProfile};
