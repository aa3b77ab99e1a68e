//! Example: load a dataset directory and print what the catalog holds.
//!
//! Run with: cargo run --package catalog --example load_catalog [data-dir]

use catalog::Catalog;
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let arg = std::env::args().nth(1).unwrap_or_else(|| "data/sample".to_string());
    let data_dir = Path::new(&arg);

    println!("Loading restaurant dataset from {:?}...\n", data_dir);

    let start = Instant::now();
    let catalog = Catalog::load_from_files(data_dir)?;
    let elapsed = start.elapsed();

    let (restaurants, users, reviews) = catalog.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Restaurants: {}", restaurants);
    println!("Reviewers: {}", users);
    println!("Reviews: {}", reviews);

    let mut cities: Vec<&str> = catalog.cities().collect();
    cities.sort_unstable();
    println!("Cities: {}", cities.join(", "));

    Ok(())
}
