//! Core domain types for the restaurant dataset.
//!
//! This module defines the fundamental data structures used throughout the system.
//! Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (RestaurantId, UserId)
//! - Structs with public fields
//! - Derive macros for common traits
//! - HashMap indices over a stable Vec primary store

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// These make the domain clearer and prevent mixing up user ids with business ids

/// Unique identifier for a restaurant (opaque string, e.g. "Pns2l4eNsfO8kk83dixA6A")
pub type RestaurantId = String;

/// Unique identifier for a reviewer (opaque string)
pub type UserId = String;

// =============================================================================
// Geographic Types
// =============================================================================

/// A latitude/longitude pair in signed decimal degrees.
///
/// Rust concept: small all-`Copy` structs are cheap to pass by value,
/// so distance math never needs to borrow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// True when both components are finite and inside the valid ranges:
    /// latitude in [-90, 90], longitude in [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

// =============================================================================
// Restaurant-related Types
// =============================================================================

/// Represents a restaurant in the catalog.
///
/// Loaded once at startup and read-only afterwards; every search borrows
/// these records, never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub coord: Coordinate,
    /// Aggregate rating from the dataset, 0.0 to 5.0
    pub stars: f32,
    /// Review count as reported by the dataset
    pub review_count: u32,
    /// Street address; empty string when the dataset has none
    pub address: String,
    /// City name as written in the dataset
    ///
    /// Rust concept: `Option<T>` represents a value that may be absent,
    /// which is common for this field in real dumps
    pub city: Option<String>,
    /// Cuisine/category tags parsed from the comma-separated dataset field
    pub cuisines: Vec<String>,
}

// =============================================================================
// Review Type
// =============================================================================

/// A single review left by a user for a restaurant.
///
/// Only the fields the recommendation sources need are kept; review text
/// stays in the raw dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    /// Star rating from 1.0 to 5.0
    pub stars: f32,
}

// =============================================================================
// Statistics Types
// =============================================================================

/// Precomputed statistics for a restaurant
///
/// These are computed once when loading data for fast lookups later
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RestaurantStats {
    /// Mean of the loaded review stars, falling back to the catalog rating
    /// when the review file is absent
    pub avg_review_stars: f32,
    pub review_count: u32,
    /// Popularity score derived from rating and review count
    pub popularity_score: f32,
}

// =============================================================================
// Catalog - The Core In-Memory Database
// =============================================================================

/// Main data structure that holds all restaurants, reviews and indices.
///
/// This is the heart of the catalog crate. The primary store is a `Vec` in
/// file order so that iteration is deterministic; HashMaps provide O(1)
/// lookups by id, city and cuisine on top of it.
///
/// Rust concepts demonstrated:
/// - HashMap<K, V> for O(1) lookups (like a dictionary)
/// - Borrowing: methods return `&T` (references) not `T` (owned values)
#[derive(Debug)]
pub struct Catalog {
    // Primary data store, in dataset order
    pub(crate) restaurants: Vec<Restaurant>,
    /// Restaurant id -> position in `restaurants`
    pub(crate) by_id: HashMap<RestaurantId, usize>,

    // Review indices for fast lookups
    /// All reviews written by each user
    pub(crate) user_reviews: HashMap<UserId, Vec<Review>>,
    /// All reviews received by each restaurant
    pub(crate) restaurant_reviews: HashMap<RestaurantId, Vec<Review>>,

    // Secondary indices for specialized queries
    /// Positions grouped by lowercased city name
    pub(crate) city_index: HashMap<String, Vec<usize>>,
    /// Positions grouped by lowercased cuisine tag
    pub(crate) cuisine_index: HashMap<String, Vec<usize>>,

    // Precomputed statistics
    pub(crate) restaurant_stats: HashMap<RestaurantId, RestaurantStats>,
}

impl Catalog {
    /// Creates a new, empty Catalog
    pub fn new() -> Self {
        Self {
            restaurants: Vec::new(),
            by_id: HashMap::new(),
            user_reviews: HashMap::new(),
            restaurant_reviews: HashMap::new(),
            city_index: HashMap::new(),
            cuisine_index: HashMap::new(),
            restaurant_stats: HashMap::new(),
        }
    }

    // Getters - Note: These return references (&T) not owned values (T)
    // This is a key Rust concept: borrowing vs. ownership

    /// Get a restaurant by id
    ///
    /// Returns `Option<&Restaurant>`:
    /// - `Some(&restaurant)` if it exists (borrowing it)
    /// - `None` if it doesn't
    pub fn get_restaurant(&self, id: &str) -> Option<&Restaurant> {
        self.by_id.get(id).map(|&pos| &self.restaurants[pos])
    }

    /// All restaurants in dataset order
    ///
    /// Rust concept: `&[T]` is a slice (view into an array/vector)
    pub fn all_restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// All restaurants in a city, matched case-insensitively.
    ///
    /// Returns an empty Vec (never an error) for an unknown city.
    pub fn restaurants_in_city(&self, city: &str) -> Vec<&Restaurant> {
        self.city_index
            .get(&city.to_lowercase())
            .map(|positions| positions.iter().map(|&pos| &self.restaurants[pos]).collect())
            .unwrap_or_default()
    }

    /// All restaurants carrying a cuisine tag, matched case-insensitively
    pub fn restaurants_with_cuisine(&self, cuisine: &str) -> Vec<&Restaurant> {
        self.cuisine_index
            .get(&cuisine.to_lowercase())
            .map(|positions| positions.iter().map(|&pos| &self.restaurants[pos]).collect())
            .unwrap_or_default()
    }

    /// Get all reviews written by a user
    ///
    /// Returns an empty slice if the user has no reviews
    pub fn get_user_reviews(&self, user_id: &str) -> &[Review] {
        self.user_reviews
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all reviews for a restaurant
    pub fn get_restaurant_reviews(&self, restaurant_id: &str) -> &[Review] {
        self.restaurant_reviews
            .get(restaurant_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get precomputed statistics for a restaurant
    pub fn get_restaurant_stats(&self, restaurant_id: &str) -> Option<&RestaurantStats> {
        self.restaurant_stats.get(restaurant_id)
    }

    /// Lowercased city names known to the catalog
    pub fn cities(&self) -> impl Iterator<Item = &str> {
        self.city_index.keys().map(|c| c.as_str())
    }

    // Mutators - These will be used during data loading
    // Note: They take `&mut self` (mutable reference) to modify the data

    /// Insert a restaurant and index it by id, city and cuisine
    pub fn insert_restaurant(&mut self, restaurant: Restaurant) {
        let pos = self.restaurants.len();

        if let Some(city) = &restaurant.city {
            self.city_index
                .entry(city.to_lowercase())
                .or_insert_with(Vec::new)
                .push(pos);
        }
        for cuisine in &restaurant.cuisines {
            self.cuisine_index
                .entry(cuisine.to_lowercase())
                .or_insert_with(Vec::new)
                .push(pos);
        }

        self.by_id.insert(restaurant.id.clone(), pos);
        self.restaurants.push(restaurant);
    }

    /// Insert a review and update both review indices
    pub fn insert_review(&mut self, review: Review) {
        self.user_reviews
            .entry(review.user_id.clone())
            .or_insert_with(Vec::new)
            .push(review.clone());

        self.restaurant_reviews
            .entry(review.restaurant_id.clone())
            .or_insert_with(Vec::new)
            .push(review);
    }

    /// Get counts for debugging/validation: (restaurants, users, reviews)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_reviews = self.user_reviews.values().map(|v| v.len()).sum();
        (self.restaurants.len(), self.user_reviews.len(), total_reviews)
    }
}

// Implement Default trait for convenience
impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}
