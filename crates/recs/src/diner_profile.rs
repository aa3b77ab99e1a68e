//! Helper functions to build a DinerProfile from the catalog.
//!
//! This module aggregates one diner's review history into the profile
//! struct the candidate sources and filters all consume.

use crate::types::DinerProfile;
use anyhow::{anyhow, Result};
use catalog::Catalog;
use std::collections::HashMap;

/// Stars at or above which a review counts as "liked"
const LIKED_THRESHOLD: f32 = 4.0;

/// Build a DinerProfile for a given user.
///
/// Aggregates everything the sources need in one pass:
/// - Restaurants reviewed (all of them)
/// - Liked restaurants (stars >= 4.0)
/// - Cuisine preferences (average stars given per cuisine tag)
/// - Average stars across all reviews
///
/// There is no separate user table in the dataset, so a user with no
/// reviews on file is indistinguishable from an unknown user; both come
/// back as an error.
pub fn build_diner_profile(catalog: &Catalog, user_id: &str) -> Result<DinerProfile> {
    let reviews = catalog.get_user_reviews(user_id);
    if reviews.is_empty() {
        return Err(anyhow!("User {} not found (no reviews on file)", user_id));
    }

    let mut profile = DinerProfile::new(user_id.to_string());

    let total: f32 = reviews.iter().map(|r| r.stars).sum();
    profile.avg_stars = total / reviews.len() as f32;

    for review in reviews {
        profile.reviewed.insert(review.restaurant_id.clone());

        if review.stars >= LIKED_THRESHOLD {
            profile.liked.push(review.restaurant_id.clone());
        }
    }

    profile.cuisine_preferences = compute_cuisine_preferences(catalog, user_id);

    Ok(profile)
}

/// Average stars the diner gave per cuisine tag, lowercased.
fn compute_cuisine_preferences(catalog: &Catalog, user_id: &str) -> HashMap<String, f32> {
    let mut cuisine_stats: HashMap<String, (f32, u32)> = HashMap::new();
    for review in catalog.get_user_reviews(user_id) {
        if let Some(restaurant) = catalog.get_restaurant(&review.restaurant_id) {
            for cuisine in &restaurant.cuisines {
                let entry = cuisine_stats.entry(cuisine.to_lowercase()).or_insert((0.0, 0));
                entry.0 += review.stars;
                entry.1 += 1;
            }
        }
    }

    // Convert to averages
    cuisine_stats
        .into_iter()
        .map(|(cuisine, (sum, count))| (cuisine, sum / count as f32))
        .collect()
}
