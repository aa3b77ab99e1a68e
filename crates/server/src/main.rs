//! The `bitemap-server` binary: load the catalog once, then serve the
//! HTTP API until shutdown.
//!
//! Flags: `--bind <addr>` (default 0.0.0.0:8080), `--data-dir <path>`
//! (default data/sample), `--radius-km <f64>`, `--max-results <n>`.
//! Everything else is tuned through `RUST_LOG`.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::info;

use catalog::Catalog;
use search::{SearchConfig, SearchEngine};
use server::{app_router, RecommendationOrchestrator};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut bind_addr: SocketAddr = "0.0.0.0:8080"
        .parse()
        .context("default bind address must parse")?;
    let mut data_dir = PathBuf::from("data/sample");
    let mut config = SearchConfig::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" => {
                bind_addr = next_value(&args, i)?
                    .parse()
                    .context("--bind expects an addr:port")?;
                i += 2;
            }
            "--data-dir" => {
                data_dir = PathBuf::from(next_value(&args, i)?);
                i += 2;
            }
            "--radius-km" => {
                let radius: f64 = next_value(&args, i)?
                    .parse()
                    .context("--radius-km expects a number")?;
                config = config.with_nearby_radius_km(radius);
                i += 2;
            }
            "--max-results" => {
                let cap: usize = next_value(&args, i)?
                    .parse()
                    .context("--max-results expects a count")?;
                config = config.with_max_results(cap);
                i += 2;
            }
            "--help" | "-h" => {
                print_usage(&args[0]);
                return Ok(());
            }
            other => {
                print_usage(&args[0]);
                bail!("unknown argument: {}", other);
            }
        }
    }

    info!("Starting BiteMap server on {}", bind_addr);

    let catalog = Arc::new(
        Catalog::load_from_files(&data_dir)
            .with_context(|| format!("failed to load dataset from {}", data_dir.display()))?,
    );
    let (restaurants, users, reviews) = catalog.counts();
    info!(
        restaurants,
        users, reviews, "catalog loaded, ready to serve"
    );

    let engine = Arc::new(SearchEngine::new(catalog.clone(), config));
    let recommender = Arc::new(RecommendationOrchestrator::new(catalog));
    let app = app_router(engine, recommender);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("HTTP server listening on {}", bind_addr);
    info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn next_value<'a>(args: &'a [String], i: usize) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .with_context(|| format!("{} expects a value", args[i]))
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} [--bind <addr:port>] [--data-dir <path>] [--radius-km <km>] [--max-results <n>]",
        program
    );
    eprintln!("Example: {} --bind 127.0.0.1:8080 --data-dir data/sample", program);
}
