//! Catalog building and indexing logic.
//!
//! This module builds the Catalog from parsed data:
//! - Load both dataset files in parallel
//! - Populate the primary store and the id/city/cuisine indices
//! - Compute aggregate statistics (restaurant stats)
//!
//! Rust concepts you'll learn:
//! - Using Rayon for parallel processing
//! - Iterator methods (map, filter, fold, etc.)
//! - Entry API for HashMap
//! - Borrowing and ownership in complex data structures

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::path::Path;
use tracing::{info, warn};

impl Catalog {
    /// Load the restaurant dataset from a directory.
    ///
    /// This is the main entry point for loading data. Expects
    /// `restaurants.jsonl` (required) and `reviews.jsonl` (optional; the
    /// recommendation surface degrades gracefully without it).
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Build the primary store plus id/city/cuisine indices
    /// 3. Attach reviews, dropping ones that reference unknown restaurants
    /// 4. Compute restaurant statistics
    /// 5. Validate index integrity
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading restaurant dataset from {:?}", data_dir);

        let restaurants_path = data_dir.join("restaurants.jsonl");
        let reviews_path = data_dir.join("reviews.jsonl");

        // Parse both files IN PARALLEL using Rayon's `join`,
        // which runs two closures on separate worker threads
        let (restaurants, reviews) = rayon::join(
            || parser::parse_restaurants(&restaurants_path),
            || {
                if reviews_path.exists() {
                    parser::parse_reviews(&reviews_path)
                } else {
                    Ok(Vec::new())
                }
            },
        );

        // Handle errors from parallel parsing
        // The ? operator works because both return Result<Vec<T>>
        let restaurants = restaurants?;
        let reviews = reviews?;

        info!(
            "Parsed {} restaurants and {} reviews",
            restaurants.len(),
            reviews.len()
        );

        let mut catalog = Catalog::new();

        for restaurant in restaurants {
            catalog.insert_restaurant(restaurant);
        }

        // Reviews may reference businesses that were skipped or are simply
        // not part of this extract; those are dropped, not fatal
        let mut orphaned = 0usize;
        for review in reviews {
            if catalog.by_id.contains_key(&review.restaurant_id) {
                catalog.insert_review(review);
            } else {
                orphaned += 1;
            }
        }
        if orphaned > 0 {
            warn!(orphaned, "dropped reviews referencing unknown restaurants");
        }

        // Compute restaurant statistics in parallel
        catalog.compute_restaurant_stats();

        catalog.validate()?;

        let (restaurant_count, user_count, review_count) = catalog.counts();
        info!(
            "Catalog ready: {} restaurants, {} reviewers, {} reviews, {} cities",
            restaurant_count,
            user_count,
            review_count,
            catalog.city_index.len()
        );
        Ok(catalog)
    }

    /// Compute aggregate statistics for all restaurants.
    ///
    /// For each restaurant:
    /// - Average review stars (falls back to the catalog rating when the
    ///   review file has nothing for it)
    /// - Review count (same fallback)
    /// - Popularity score: stars * ln(review_count + 1), which rewards both
    ///   a high rating and a large number of reviews
    pub fn compute_restaurant_stats(&mut self) {
        let stats = self
            .restaurants
            .par_iter()
            .map(|restaurant| {
                let loaded = self.restaurant_reviews.get(&restaurant.id);
                let (avg_review_stars, review_count) = match loaded {
                    Some(reviews) if !reviews.is_empty() => {
                        let total: f32 = reviews.iter().map(|r| r.stars).sum();
                        (total / reviews.len() as f32, reviews.len() as u32)
                    }
                    _ => (restaurant.stars, restaurant.review_count),
                };
                let popularity_score =
                    compute_popularity_score(restaurant.stars, restaurant.review_count);

                (
                    restaurant.id.clone(),
                    RestaurantStats {
                        avg_review_stars,
                        review_count,
                        popularity_score,
                    },
                )
            })
            .collect();
        self.restaurant_stats = stats;
    }

    /// Validate index integrity.
    ///
    /// Check that:
    /// - Every id entry points inside the primary store and back to itself
    /// - Every indexed review references a known restaurant
    /// - Catalog stars stayed in range (the parser enforces this; a failure
    ///   here means an insertion path bypassed the parser)
    ///
    /// Returns Ok(()) if valid, Err if any issues found
    pub fn validate(&self) -> Result<()> {
        for (id, &pos) in &self.by_id {
            if pos >= self.restaurants.len() || &self.restaurants[pos].id != id {
                return Err(CatalogError::ValidationError(format!(
                    "id index entry {} points at the wrong record",
                    id
                )));
            }
        }

        for restaurant in &self.restaurants {
            if restaurant.stars < 0.0 || restaurant.stars > 5.0 {
                return Err(CatalogError::InvalidValue {
                    field: "stars".to_string(),
                    value: restaurant.stars.to_string(),
                });
            }
        }

        for reviews in self.user_reviews.values() {
            for review in reviews {
                if !self.by_id.contains_key(&review.restaurant_id) {
                    return Err(CatalogError::MissingReference {
                        entity: "Restaurant".to_string(),
                        id: review.restaurant_id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Helper function to compute popularity score
///
/// Formula: stars * ln(review_count + 1)
/// This rewards both high ratings and many reviews
fn compute_popularity_score(stars: f32, review_count: u32) -> f32 {
    stars * (review_count as f32 + 1.0).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_dataset(dir: &Path, restaurants: &str, reviews: Option<&str>) {
        fs::write(dir.join("restaurants.jsonl"), restaurants).unwrap();
        if let Some(reviews) = reviews {
            fs::write(dir.join("reviews.jsonl"), reviews).unwrap();
        }
    }

    #[test]
    fn test_popularity_score() {
        // High rating with few reviews
        let score1 = compute_popularity_score(4.5, 10);

        // Medium rating with many reviews
        let score2 = compute_popularity_score(3.5, 1000);

        // Should balance both factors
        assert!(score1 > 0.0);
        assert!(score2 > score1);
    }

    #[test]
    fn test_load_skips_bad_records() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            concat!(
                r#"{"business_id":"b1","name":"Paradise Biryani","address":"SD Road","city":"Hyderabad","latitude":17.44,"longitude":78.48,"stars":4.5,"review_count":812,"categories":"Biryani, Indian"}"#,
                "\n",
                "this line is not json\n",
                r#"{"business_id":"b2","name":"Broken","latitude":999.0,"longitude":78.48,"stars":4.0}"#,
                "\n",
                r#"{"business_id":"b3","name":"Dosa Corner","city":"Hyderabad","latitude":17.40,"longitude":78.47,"stars":4.2,"review_count":120,"categories":"Dosa, South Indian"}"#,
                "\n",
            ),
            None,
        );

        let catalog = Catalog::load_from_files(dir.path()).unwrap();
        let (restaurants, users, reviews) = catalog.counts();
        assert_eq!(restaurants, 2, "bad records must be skipped, not fatal");
        assert_eq!(users, 0);
        assert_eq!(reviews, 0);
        assert!(catalog.get_restaurant("b1").is_some());
        assert!(catalog.get_restaurant("b2").is_none());
    }

    #[test]
    fn test_load_attaches_reviews_and_stats() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            concat!(
                r#"{"business_id":"b1","name":"Paradise Biryani","city":"Hyderabad","latitude":17.44,"longitude":78.48,"stars":4.5,"review_count":812,"categories":"Biryani"}"#,
                "\n",
            ),
            Some(concat!(
                r#"{"user_id":"u1","business_id":"b1","stars":5.0}"#,
                "\n",
                r#"{"user_id":"u2","business_id":"b1","stars":4.0}"#,
                "\n",
                r#"{"user_id":"u1","business_id":"missing","stars":3.0}"#,
                "\n",
            )),
        );

        let catalog = Catalog::load_from_files(dir.path()).unwrap();
        let (restaurants, users, reviews) = catalog.counts();
        assert_eq!(restaurants, 1);
        assert_eq!(users, 2);
        assert_eq!(reviews, 2, "orphaned review must be dropped");

        let stats = catalog.get_restaurant_stats("b1").unwrap();
        assert!((stats.avg_review_stars - 4.5).abs() < 1e-6);
        assert_eq!(stats.review_count, 2);
        assert!(stats.popularity_score > 0.0);
    }

    #[test]
    fn test_load_missing_restaurants_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Catalog::load_from_files(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::FileNotFound { .. }));
    }

    #[test]
    fn test_load_rejects_file_with_no_usable_records() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), "name,latitude,longitude\nfoo,1.0,2.0\n", None);

        let err = Catalog::load_from_files(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::ParseError { .. }));
    }

    #[test]
    fn test_city_lookup_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(
            dir.path(),
            concat!(
                r#"{"business_id":"b1","name":"Paradise Biryani","city":"Hyderabad","latitude":17.44,"longitude":78.48,"stars":4.5}"#,
                "\n",
                r#"{"business_id":"b2","name":"Bawarchi","city":"hyderabad","latitude":17.41,"longitude":78.50,"stars":4.1}"#,
                "\n",
            ),
            None,
        );

        let catalog = Catalog::load_from_files(dir.path()).unwrap();
        assert_eq!(catalog.restaurants_in_city("HYDERABAD").len(), 2);
        assert!(catalog.restaurants_in_city("Atlantis").is_empty());
    }
}
