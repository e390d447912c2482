//! Tests for station lookup

pub mod geo_tests;

use crate::app::models::{NormalizedStation, StationId, StationObservation, Theme};
use crate::app::services::station_normalizer::normalize;

/// Create a raw observation with a name and nothing else of interest
pub fn create_named_observation(id: i64, name: &str) -> StationObservation {
    StationObservation::new(Some(StationId::Number(id)), name, Some(20.0))
}

/// Normalize observations without reordering or truncating them away
pub fn create_normalized_stations(observations: &[StationObservation]) -> Vec<NormalizedStation> {
    use crate::app::services::station_normalizer::StationNormalizer;
    use crate::config::{NormalizerConfig, RankingPolicy};

    let config = NormalizerConfig {
        max_items: observations.len().max(1),
        ranking: RankingPolicy::TrustUpstream,
    };
    StationNormalizer::new(config, Theme::Light).normalize(observations)
}

/// Same, sorted by temperature with the default settings
pub fn create_ranked_stations(observations: &[StationObservation]) -> Vec<NormalizedStation> {
    normalize(observations, observations.len().max(1), Theme::Light)
}
