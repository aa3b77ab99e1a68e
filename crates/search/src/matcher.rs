//! Free-text relevance scoring against restaurant names and cuisine tags.
//!
//! The matcher is deliberately simple: tokenize the query, then give each
//! token an exact-token hit, a substring hit, or nothing. Scores from all
//! tokens are summed, so a restaurant matching more of the query ranks a
//! stronger match. A total of 0 with a non-empty query means "no match",
//! which the engine uses to drop the candidate entirely.

use catalog::Restaurant;
use std::collections::HashSet;

/// Score added for a token that equals a name or cuisine token
const EXACT_MATCH_WEIGHT: f32 = 2.0;
/// Score added for a token found only as a substring
const PARTIAL_MATCH_WEIGHT: f32 = 1.0;

/// Score a restaurant against a free-text query.
///
/// Returns 0.0 for an empty or whitespace-only query (neutral; nothing is
/// excluded by text alone). All comparisons are case-insensitive.
pub fn match_score(restaurant: &Restaurant, query: &str) -> f32 {
    let query_tokens = tokenize(query);
    if query_tokens.is_empty() {
        return 0.0;
    }

    // Exact hits compare against the token sets of the name and every tag,
    // so "south indian" matches the tag "South Indian" token by token
    let mut field_tokens: HashSet<String> = tokenize(&restaurant.name).into_iter().collect();
    for cuisine in &restaurant.cuisines {
        field_tokens.extend(tokenize(cuisine));
    }

    let name_lower = restaurant.name.to_lowercase();
    let cuisines_lower: Vec<String> = restaurant
        .cuisines
        .iter()
        .map(|c| c.to_lowercase())
        .collect();

    let mut score = 0.0;
    for token in &query_tokens {
        if field_tokens.contains(token.as_str()) {
            score += EXACT_MATCH_WEIGHT;
        } else if name_lower.contains(token.as_str())
            || cuisines_lower.iter().any(|c| c.contains(token.as_str()))
        {
            score += PARTIAL_MATCH_WEIGHT;
        }
    }
    score
}

/// Lowercase and split on whitespace, trimming punctuation from token
/// edges ("biryani," -> "biryani"). Empty tokens are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| {
            token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .filter(|token| !token.is_empty())
        .collect()
}
