//! Tests for the station normalizer module
//!
//! This module provides unit tests for every normalization stage and the full pipeline.

pub mod normalizer_tests;

// Test helper functions and fixtures
use crate::app::models::{StationId, StationObservation};

/// Create a test observation with a numeric id
pub fn create_test_observation(id: i64, name: &str, temperature: f64) -> StationObservation {
    StationObservation::new(Some(StationId::Number(id)), name, Some(temperature))
        .with_location(-33.3, -66.3)
        .with_precipitation(0.0)
}

/// Create a test observation without an id
pub fn create_anonymous_observation(name: &str, temperature: f64) -> StationObservation {
    StationObservation::new(None, name, Some(temperature))
}

/// Create a feed snapshot mixing valid, malformed and repeated records
pub fn create_mixed_feed() -> Vec<StationObservation> {
    vec![
        create_test_observation(1, "Estación ANCHORENA", 31.4),
        create_test_observation(2, "Est. LA TOMA", 28.9),
        // repeated id: dropped
        create_test_observation(1, "Estación ANCHORENA", 30.0),
        // malformed: no temperature
        StationObservation::new(Some(StationId::Number(3)), "Estación MERLO", None),
        // malformed: NaN temperature
        create_test_observation(4, "Estación JUANA KOSLAY", f64::NAN),
        // malformed: missing name
        StationObservation {
            id: Some(StationId::Number(5)),
            temperatura: Some(22.0),
            ..Default::default()
        },
        create_test_observation(10, "Estación CENTRO", 25.0),
        create_test_observation(20, "EST. CENTRO", 24.0),
        create_anonymous_observation("Villa Mercedes", 19.5),
    ]
}

/// Create a normalized station directly, bypassing the pipeline
pub fn create_normalized_station(
    id: i64,
    display_name: &str,
    temperature: f64,
) -> crate::app::models::NormalizedStation {
    use crate::app::models::{NormalizedStation, Theme};
    use crate::app::services::classification::{classify, color_for};

    NormalizedStation {
        observation: create_test_observation(id, display_name, temperature),
        temperature,
        display_name: display_name.to_string(),
        short_name: display_name.to_string(),
        color_band: classify(temperature),
        color: color_for(temperature, Theme::Light),
        unique_key: format!("id-{id}"),
    }
}
