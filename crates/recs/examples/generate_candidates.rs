//! Example: Generate candidates for a diner
//!
//! Run with: cargo run --package recs --example generate_candidates
//!
//! This example shows how to:
//! 1. Load the restaurant catalog
//! 2. Build a diner profile
//! 3. Generate SimilarDiners (collaborative) candidates
//! 4. Generate Discovery (exploration) candidates
//! 5. Display the results

use catalog::Catalog;
use recs::{diner_profile::build_diner_profile, DiscoverySource, SimilarDinersSource};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    println!("=== BiteMap Candidate Generation Example ===\n");

    // Load dataset
    println!("Loading restaurant catalog...");
    let start = Instant::now();
    let data_dir = Path::new("data/sample");
    let catalog = Arc::new(Catalog::load_from_files(data_dir)?);
    println!("Loaded catalog in {:?}\n", start.elapsed());

    // Choose a test diner (defaults to u1)
    let user_id = std::env::args().nth(1).unwrap_or_else(|| "u1".to_string());
    println!("Target Diner: {}", user_id);

    // Build the diner's profile
    println!("Building diner profile...");
    let start = Instant::now();
    let profile = build_diner_profile(&catalog, &user_id)?;
    println!("Built profile in {:?}", start.elapsed());
    println!("  Reviewed restaurants: {}", profile.reviewed.len());
    println!("  Liked restaurants: {}", profile.liked.len());
    println!("  Avg stars given: {:.2}", profile.avg_stars);
    println!(
        "  Cuisine preferences: {} cuisines",
        profile.cuisine_preferences.len()
    );
    if let Some(cuisine) = profile.top_cuisines(1).into_iter().next() {
        let avg = profile.cuisine_preferences.get(&cuisine).copied().unwrap_or(0.0);
        println!("  Favorite cuisine: {} ({:.2} avg stars)", cuisine, avg);
    }
    println!();

    // Generate SimilarDiners candidates
    println!("Generating SimilarDiners (collaborative) candidates...");
    let similar = SimilarDinersSource::new(catalog.clone());
    let start = Instant::now();
    let similar_candidates = similar.get_candidates(&profile, 50);
    let similar_time = start.elapsed();
    println!(
        "Generated {} SimilarDiners candidates in {:?}",
        similar_candidates.len(),
        similar_time
    );

    // Show top 5 SimilarDiners candidates
    println!("\nTop 5 SimilarDiners Candidates:");
    for (i, candidate) in similar_candidates.iter().take(5).enumerate() {
        if let Some(restaurant) = catalog.get_restaurant(&candidate.restaurant_id) {
            println!(
                "  {}. {} (Score: {:.3})",
                i + 1,
                restaurant.name,
                candidate.base_score
            );
            if let Some(count) = candidate.metadata.similar_diners_count {
                println!("     - Liked by {} similar diners", count);
            }
        }
    }

    // Generate Discovery candidates
    println!("\nGenerating Discovery (exploration) candidates...");
    let discovery = DiscoverySource::new(catalog.clone());
    let start = Instant::now();
    let discovery_candidates = discovery.get_candidates(&profile, 30);
    let discovery_time = start.elapsed();
    println!(
        "Generated {} Discovery candidates in {:?}",
        discovery_candidates.len(),
        discovery_time
    );

    // Show top 5 Discovery candidates
    println!("\nTop 5 Discovery Candidates:");
    for (i, candidate) in discovery_candidates.iter().take(5).enumerate() {
        if let Some(restaurant) = catalog.get_restaurant(&candidate.restaurant_id) {
            println!(
                "  {}. {} (Score: {:.3})",
                i + 1,
                restaurant.name,
                candidate.base_score
            );
            if !candidate.metadata.matched_cuisines.is_empty() {
                println!(
                    "     - Matched cuisines: {:?}",
                    candidate.metadata.matched_cuisines
                );
            }
            if candidate.metadata.from_popularity {
                println!("     - From popularity-based discovery");
            }
        }
    }

    // Summary
    println!("\n=== Summary ===");
    println!(
        "Total candidates: {}",
        similar_candidates.len() + discovery_candidates.len()
    );
    println!("SimilarDiners time: {:?}", similar_time);
    println!("Discovery time: {:?}", discovery_time);

    // Check for overlap
    let similar_ids: std::collections::HashSet<_> = similar_candidates
        .iter()
        .map(|c| c.restaurant_id.as_str())
        .collect();
    let discovery_ids: std::collections::HashSet<_> = discovery_candidates
        .iter()
        .map(|c| c.restaurant_id.as_str())
        .collect();
    let overlap = similar_ids.intersection(&discovery_ids).count();
    println!("Overlap between sources: {} restaurants", overlap);

    Ok(())
}
