use anyhow::{bail, Context, Result};
use catalog::{Catalog, Coordinate, Restaurant};
use clap::{Parser, Subcommand};
use colored::Colorize;
use search::{ScoredResult, SearchConfig, SearchEngine};
use server::{Recommendation, RecommendationOrchestrator};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;

/// BiteMap - Restaurant Search Engine
#[derive(Parser)]
#[command(name = "bitemap")]
#[command(about = "Restaurant search and recommendations from the command line", long_about = None)]
struct Cli {
    /// Path to the restaurant dataset directory
    #[arg(short, long, default_value = "data/sample")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for restaurants around a point
    Search {
        /// Origin latitude in degrees
        #[arg(long)]
        lat: f64,

        /// Origin longitude in degrees
        #[arg(long)]
        lng: f64,

        /// Text query matched against names and cuisines
        #[arg(long, default_value = "")]
        query: String,

        /// Radius in km at or under which a hit counts as nearby
        #[arg(long)]
        radius_km: Option<f64>,

        /// Cap on results per partition
        #[arg(long)]
        limit: Option<usize>,
    },

    /// List every restaurant in a city
    City {
        /// City name (case-insensitive)
        name: String,
    },

    /// Get restaurant recommendations for a diner
    Recommend {
        /// Diner id from the review file
        user_id: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Show why each place was recommended
        #[arg(long)]
        explain: bool,
    },

    /// Run benchmark to test search performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalog (this may take a moment on a large extract)
    println!("Loading restaurant dataset from {}...", cli.data_dir.display());
    let start = Instant::now();
    let catalog = Arc::new(
        Catalog::load_from_files(&cli.data_dir)
            .context("Failed to load restaurant dataset")?,
    );
    let (restaurants, users, reviews) = catalog.counts();
    println!(
        "{} Loaded {} restaurants, {} reviewers, {} reviews in {:?}",
        "✓".green(),
        restaurants,
        users,
        reviews,
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Search {
            lat,
            lng,
            query,
            radius_km,
            limit,
        } => handle_search(catalog, lat, lng, &query, radius_km, limit)?,
        Commands::City { name } => handle_city(catalog, &name),
        Commands::Recommend {
            user_id,
            limit,
            explain,
        } => handle_recommend(catalog, &user_id, limit, explain).await?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(catalog, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'search' command
fn handle_search(
    catalog: Arc<Catalog>,
    lat: f64,
    lng: f64,
    query: &str,
    radius_km: Option<f64>,
    limit: Option<usize>,
) -> Result<()> {
    let mut config = SearchConfig::new();
    if let Some(radius) = radius_km {
        config = config.with_nearby_radius_km(radius);
    }
    if let Some(cap) = limit {
        config = config.with_max_results(cap);
    }
    let radius = config.nearby_radius_km;

    let engine = SearchEngine::new(catalog, config);
    let outcome = engine.nearby_search(Coordinate::new(lat, lng), query)?;

    if query.trim().is_empty() {
        println!("{}", format!("Restaurants around ({}, {}):", lat, lng).bold().blue());
    } else {
        println!(
            "{}",
            format!("Results for '{}' around ({}, {}):", query, lat, lng).bold().blue()
        );
    }

    println!("{}", format!("Nearby (within {} km):", radius).green());
    print_scored_results(&outcome.nearby);
    println!("{}", "Further out:".yellow());
    print_scored_results(&outcome.others);

    Ok(())
}

/// Print one partition of search results, ranked
fn print_scored_results(results: &[ScoredResult]) {
    if results.is_empty() {
        println!("  (none)");
        return;
    }
    for (rank, hit) in results.iter().enumerate() {
        println!(
            "  {}. {} - {:.2} km, {:.1}★{}",
            (rank + 1).to_string().green(),
            hit.restaurant.name,
            hit.distance_km,
            hit.restaurant.stars,
            format_address(&hit.restaurant)
        );
        if !hit.restaurant.cuisines.is_empty() {
            println!("     [{}]", hit.restaurant.cuisines.join(", "));
        }
    }
}

/// Handle the 'city' command
fn handle_city(catalog: Arc<Catalog>, name: &str) {
    let engine = SearchEngine::new(catalog, SearchConfig::new());
    let found = engine.city_search(name);

    println!("{}", format!("Restaurants in {}:", name).bold().blue());
    if found.is_empty() {
        println!("  (none on file)");
        return;
    }
    for (rank, restaurant) in found.iter().enumerate() {
        println!(
            "  {}. {} - {:.1}★ ({} reviews){}",
            (rank + 1).to_string().green(),
            restaurant.name,
            restaurant.stars,
            restaurant.review_count,
            format_address(restaurant)
        );
    }
}

/// Handle the 'recommend' command
async fn handle_recommend(
    catalog: Arc<Catalog>,
    user_id: &str,
    limit: usize,
    explain: bool,
) -> Result<()> {
    let orchestrator = RecommendationOrchestrator::new(catalog);
    let recommendations = orchestrator.get_recommendations(user_id, limit).await?;

    print_recommendations(user_id, &recommendations, explain);
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    catalog: Arc<Catalog>,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }
    if concurrent == 0 {
        bail!("--concurrent must be at least 1");
    }
    let restaurants = catalog.all_restaurants();
    if restaurants.is_empty() {
        bail!("catalog has no restaurants to benchmark against");
    }

    // Origins drawn from real catalog coordinates, so the work mirrors
    // what actual requests do
    let origins: Vec<Coordinate> = (0..requests)
        .map(|_| {
            let idx = rand::random::<u32>() as usize % restaurants.len();
            restaurants[idx].coord
        })
        .collect();

    let engine = Arc::new(SearchEngine::new(catalog, SearchConfig::new()));
    let semaphore = Arc::new(Semaphore::new(concurrent));

    println!(
        "Running {} searches ({} concurrent)...",
        requests, concurrent
    );
    let bench_start = Instant::now();

    // Spawn all requests; the semaphore holds the concurrency at the
    // requested level
    let mut handles = vec![];
    for origin in origins {
        let engine = engine.clone();
        let semaphore = semaphore.clone();
        let handle = tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let start = Instant::now();
            tokio::task::spawn_blocking(move || engine.nearby_search(origin, "")).await??;
            Ok::<_, anyhow::Error>(start.elapsed())
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }

    let total_time = bench_start.elapsed();
    let sum: std::time::Duration = timings.iter().sum();
    let avg_latency = sum / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[((timings.len() as f32 * 0.95) as usize).min(timings.len() - 1)];
    let p99 = timings[((timings.len() as f32 * 0.99) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / total_time.as_secs_f32();

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print recommendations
fn print_recommendations(user_id: &str, recommendations: &[Recommendation], explain: bool) {
    println!("{}", format!("Recommendations for {}:", user_id).bold().blue());
    for (rank, rec) in recommendations.iter().enumerate() {
        let cuisines = rec.restaurant.cuisines.join(", ");
        println!(
            "{}. {} [{}] - {:.1}★ - Score: {:.2}",
            (rank + 1).to_string().green(),
            rec.restaurant.name,
            cuisines,
            rec.restaurant.stars,
            rec.score
        );
        if explain {
            println!("   {}", rec.explanation);
        }
    }
}

/// ", <address>" when the restaurant has one on file
fn format_address(restaurant: &Restaurant) -> String {
    if restaurant.address.is_empty() {
        String::new()
    } else {
        format!(", {}", restaurant.address)
    }
}
