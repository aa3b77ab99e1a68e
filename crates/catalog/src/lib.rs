//! # Catalog Crate
//!
//! This crate handles loading and indexing the restaurant dataset.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Restaurant, Review, Coordinate, Catalog)
//! - **parser**: Parse .jsonl files into Rust structs
//! - **index**: Build efficient indices for fast lookups
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::Catalog;
//! use std::path::Path;
//!
//! // Load the entire dataset
//! let catalog = Catalog::load_from_files(Path::new("data/sample"))?;
//!
//! // Query data
//! let restaurant = catalog.get_restaurant("Pns2l4eNsfO8kk83dixA6A").unwrap();
//! let in_city = catalog.restaurants_in_city("Hyderabad");
//!
//! println!("{} is one of {} places in town", restaurant.name, in_city.len());
//! ```
//!
//! ## Learning Goals
//!
//! This crate demonstrates several key Rust concepts:
//!
//! 1. **Ownership and Borrowing**: Catalog owns the data, methods return references
//! 2. **Error Handling**: Using Result<T> and custom error types
//! 3. **Type Safety**: Type aliases (RestaurantId, UserId) prevent mixing up ids
//! 4. **Collections**: Vec primary store with HashMap indices on top
//! 5. **Traits**: Implementing Display, Debug, Error, etc.
//! 6. **Modules**: Organizing code into logical units
//! 7. **Parallel Processing**: Using Rayon for data-parallel operations

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use types::{
    // Type aliases
    RestaurantId,
    UserId,
    // Core types
    Coordinate,
    Restaurant,
    Review,
    Catalog,
    RestaurantStats,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn restaurant(id: &str, name: &str, city: Option<&str>, cuisines: &[&str]) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: name.to_string(),
            coord: Coordinate::new(17.385, 78.4867),
            stars: 4.0,
            review_count: 10,
            address: "Somewhere".to_string(),
            city: city.map(str::to_string),
            cuisines: cuisines.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_catalog_creation() {
        // Test that we can create an empty Catalog
        let catalog = Catalog::new();
        let (restaurants, users, reviews) = catalog.counts();

        assert_eq!(restaurants, 0);
        assert_eq!(users, 0);
        assert_eq!(reviews, 0);
    }

    #[test]
    fn test_insert_restaurant() {
        let mut catalog = Catalog::new();
        catalog.insert_restaurant(restaurant("b1", "Paradise Biryani", Some("Hyderabad"), &["Biryani"]));

        let retrieved = catalog.get_restaurant("b1").unwrap();
        assert_eq!(retrieved.name, "Paradise Biryani");
        assert_eq!(retrieved.cuisines, vec!["Biryani"]);

        // City and cuisine indices see the insert too
        assert_eq!(catalog.restaurants_in_city("hyderabad").len(), 1);
        assert_eq!(catalog.restaurants_with_cuisine("biryani").len(), 1);
    }

    #[test]
    fn test_insert_review() {
        let mut catalog = Catalog::new();
        catalog.insert_restaurant(restaurant("b1", "Paradise Biryani", None, &[]));

        let review = Review {
            user_id: "u1".to_string(),
            restaurant_id: "b1".to_string(),
            stars: 5.0,
        };
        catalog.insert_review(review);

        let user_reviews = catalog.get_user_reviews("u1");
        assert_eq!(user_reviews.len(), 1);
        assert_eq!(user_reviews[0].stars, 5.0);

        let restaurant_reviews = catalog.get_restaurant_reviews("b1");
        assert_eq!(restaurant_reviews.len(), 1);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut catalog = Catalog::new();
        catalog.insert_restaurant(restaurant("b1", "First", Some("Hyderabad"), &[]));
        catalog.insert_restaurant(restaurant("b2", "Second", Some("Hyderabad"), &[]));
        catalog.insert_restaurant(restaurant("b3", "Third", Some("Hyderabad"), &[]));

        let names: Vec<&str> = catalog
            .restaurants_in_city("Hyderabad")
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);

        let all: Vec<&str> = catalog.all_restaurants().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(all, vec!["b1", "b2", "b3"]);
    }

    #[test]
    fn test_empty_queries() {
        let catalog = Catalog::new();

        // Querying non-existent data should return None or empty collections
        assert!(catalog.get_restaurant("nope").is_none());
        assert!(catalog.restaurants_in_city("Atlantis").is_empty());
        assert!(catalog.restaurants_with_cuisine("Biryani").is_empty());
        assert!(catalog.get_user_reviews("nobody").is_empty());
        assert!(catalog.get_restaurant_reviews("nope").is_empty());
    }
}
