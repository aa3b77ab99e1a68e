//! Engine configuration.

/// Default classification radius in kilometers
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 5.0;

/// Tunable knobs for the search engine, passed in at construction.
///
/// Rust concept: builder-style `with_*` methods consume and return `self`,
/// so configs chain nicely at the call site.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Distance threshold (km) at or under which a hit counts as "nearby"
    pub nearby_radius_km: f64,
    /// Optional cap applied to each partition after sorting; None means
    /// return everything
    pub max_results: Option<usize>,
}

impl SearchConfig {
    pub fn new() -> Self {
        Self {
            nearby_radius_km: DEFAULT_NEARBY_RADIUS_KM,
            max_results: None,
        }
    }

    pub fn with_nearby_radius_km(mut self, radius_km: f64) -> Self {
        self.nearby_radius_km = radius_km;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::new();
        assert_eq!(config.nearby_radius_km, DEFAULT_NEARBY_RADIUS_KM);
        assert!(config.max_results.is_none());
    }

    #[test]
    fn test_builder_chains() {
        let config = SearchConfig::new()
            .with_nearby_radius_km(10.0)
            .with_max_results(10);
        assert_eq!(config.nearby_radius_km, 10.0);
        assert_eq!(config.max_results, Some(10));
    }
}
