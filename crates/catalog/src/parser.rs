//! Parsers for the JSON-lines dataset files.
//!
//! This module handles parsing the .jsonl files:
//! - restaurants.jsonl: one business record per line
//! - reviews.jsonl: one review record per line
//!
//! A record that fails to deserialize, or that carries out-of-range
//! coordinates or stars, is skipped with a logged warning. Only a file that
//! yields no usable records at all is treated as a hard error, since that
//! means the path points at something that is not this dataset.
//!
//! Rust concepts you'll learn here:
//! - serde derive on private raw-record structs
//! - The `?` operator with custom error types
//! - Mapping io::ErrorKind to a domain error

use crate::error::{CatalogError, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Raw restaurant record exactly as it appears in restaurants.jsonl.
///
/// Numeric fields are optional here because real dumps contain nulls;
/// validation happens when converting to [`Restaurant`].
#[derive(Debug, Deserialize)]
struct RestaurantRecord {
    business_id: String,
    name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    stars: Option<f32>,
    #[serde(default)]
    review_count: Option<u32>,
    /// Comma-separated tag string, e.g. "Biryani, Indian, Halal"
    #[serde(default)]
    categories: Option<String>,
}

/// Raw review record from reviews.jsonl
#[derive(Debug, Deserialize)]
struct ReviewRecord {
    user_id: String,
    business_id: String,
    #[serde(default)]
    stars: Option<f32>,
}

/// Read a dataset file into a string, mapping a missing file to the
/// dedicated error variant for a clearer message upstream.
fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CatalogError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            CatalogError::IoError(e)
        }
    })
}

/// Parse the restaurants.jsonl file.
///
/// Returns every record that survives validation, in file order. Skipped
/// records are logged with their line number and reason.
pub fn parse_restaurants(path: &Path) -> Result<Vec<Restaurant>> {
    let file_name = file_label(path);
    let content = read_file(path)?;

    let mut restaurants = Vec::new();
    let mut first_failure: Option<(usize, String)> = None;
    let mut skipped = 0usize;
    let mut saw_record = false;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue; // Skip blank lines
        }
        saw_record = true;

        let record: RestaurantRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                warn!(file = %file_name, line = line_no, "skipping unparseable record: {}", e);
                note_failure(&mut first_failure, line_no, e.to_string());
                skipped += 1;
                continue;
            }
        };

        match record_into_restaurant(record, &file_name, line_no) {
            Some(restaurant) => restaurants.push(restaurant),
            None => {
                note_failure(&mut first_failure, line_no, "invalid record".to_string());
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!(file = %file_name, skipped, kept = restaurants.len(), "dataset contained bad records");
    }

    // Every non-blank line failed: the file is not a restaurant dataset
    if saw_record && restaurants.is_empty() {
        let (line, reason) = first_failure.unwrap_or((1, "unknown".to_string()));
        return Err(CatalogError::ParseError {
            file: file_name,
            line,
            reason,
        });
    }

    Ok(restaurants)
}

/// Parse the reviews.jsonl file.
///
/// Same skip-and-warn policy as [`parse_restaurants`]; reviews pointing at
/// restaurants the catalog doesn't know are dropped later, at index time.
pub fn parse_reviews(path: &Path) -> Result<Vec<Review>> {
    let file_name = file_label(path);
    let content = read_file(path)?;

    let mut reviews = Vec::new();
    let mut first_failure: Option<(usize, String)> = None;
    let mut skipped = 0usize;
    let mut saw_record = false;

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        saw_record = true;

        let record: ReviewRecord = match serde_json::from_str(line) {
            Ok(record) => record,
            Err(e) => {
                warn!(file = %file_name, line = line_no, "skipping unparseable review: {}", e);
                note_failure(&mut first_failure, line_no, e.to_string());
                skipped += 1;
                continue;
            }
        };

        let stars = match record.stars {
            Some(stars) if (0.0..=5.0).contains(&stars) => stars,
            Some(stars) => {
                warn!(file = %file_name, line = line_no, stars, "skipping review with out-of-range stars");
                note_failure(&mut first_failure, line_no, format!("stars out of range: {}", stars));
                skipped += 1;
                continue;
            }
            None => {
                warn!(file = %file_name, line = line_no, "skipping review without stars");
                note_failure(&mut first_failure, line_no, "missing stars".to_string());
                skipped += 1;
                continue;
            }
        };

        reviews.push(Review {
            user_id: record.user_id,
            restaurant_id: record.business_id,
            stars,
        });
    }

    if skipped > 0 {
        warn!(file = %file_name, skipped, kept = reviews.len(), "review file contained bad records");
    }

    if saw_record && reviews.is_empty() {
        let (line, reason) = first_failure.unwrap_or((1, "unknown".to_string()));
        return Err(CatalogError::ParseError {
            file: file_name,
            line,
            reason,
        });
    }

    Ok(reviews)
}

/// Validate a raw record and convert it into a [`Restaurant`].
///
/// Returns None (after logging why) when the record cannot be used:
/// - missing or out-of-range coordinates
/// - stars outside [0, 5]
///
/// Missing stars/review_count default to zero, matching how the upstream
/// dataset fills gaps.
fn record_into_restaurant(
    record: RestaurantRecord,
    file: &str,
    line_no: usize,
) -> Option<Restaurant> {
    let (lat, lng) = match (record.latitude, record.longitude) {
        (Some(lat), Some(lng)) => (lat, lng),
        _ => {
            warn!(
                file = %file,
                line = line_no,
                business_id = %record.business_id,
                "skipping restaurant without coordinates"
            );
            return None;
        }
    };

    let coord = Coordinate::new(lat, lng);
    if !coord.is_valid() {
        warn!(
            file = %file,
            line = line_no,
            business_id = %record.business_id,
            lat,
            lng,
            "skipping restaurant with out-of-range coordinates"
        );
        return None;
    }

    let stars = record.stars.unwrap_or(0.0);
    if !(0.0..=5.0).contains(&stars) {
        warn!(
            file = %file,
            line = line_no,
            business_id = %record.business_id,
            stars,
            "skipping restaurant with out-of-range stars"
        );
        return None;
    }

    Some(Restaurant {
        id: record.business_id,
        name: record.name,
        coord,
        stars,
        review_count: record.review_count.unwrap_or(0),
        address: record.address.unwrap_or_default(),
        city: record.city.filter(|c| !c.trim().is_empty()),
        cuisines: record
            .categories
            .as_deref()
            .map(parse_cuisines)
            .unwrap_or_default(),
    })
}

/// Split a comma-separated category string into trimmed, non-empty tags
///
/// Example: "Biryani, Indian, " -> vec!["Biryani", "Indian"]
fn parse_cuisines(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

fn note_failure(slot: &mut Option<(usize, String)>, line: usize, reason: String) {
    if slot.is_none() {
        *slot = Some((line, reason));
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
