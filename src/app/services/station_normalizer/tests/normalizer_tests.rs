//! Tests for the full normalization pipeline

use super::*;
use crate::app::models::{ColorBand, Theme};
use crate::app::services::station_normalizer::normalizer::{StationNormalizer, normalize};
use crate::config::{NormalizerConfig, RankingPolicy};
use std::collections::HashSet;

fn normalizer(max_items: usize, ranking: RankingPolicy, theme: Theme) -> StationNormalizer {
    StationNormalizer::new(NormalizerConfig { max_items, ranking }, theme)
}

#[test]
fn test_pipeline_on_mixed_feed() {
    let feed = create_mixed_feed();
    let result = normalizer(20, RankingPolicy::ByTemperature, Theme::Light).run(&feed);

    let names: Vec<&str> = result
        .stations
        .iter()
        .map(|s| s.display_name.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "Anchorena",
            "La Toma",
            "Centro",
            "Centro (20)",
            "Villa Mercedes"
        ]
    );

    assert_eq!(result.stats.total_input, 9);
    assert_eq!(result.stats.valid, 6);
    assert_eq!(result.stats.deduplicated, 5);
    assert_eq!(result.stats.renamed, 1);
    assert_eq!(result.stats.output, 5);
}

#[test]
fn test_duplicate_names_suffix_second_id() {
    let feed = vec![
        create_test_observation(10, "Centro", 22.0),
        create_test_observation(20, "Centro", 22.0),
    ];

    let stations = normalize(&feed, 20, Theme::Light);
    assert_eq!(stations[0].display_name, "Centro");
    assert_eq!(stations[1].display_name, "Centro (20)");
}

#[test]
fn test_classification_and_colors_attached() {
    let feed = vec![
        create_test_observation(1, "Caliente", 35.0),
        create_test_observation(2, "Fria", 9.9),
    ];

    let light = normalize(&feed, 20, Theme::Light);
    assert_eq!(light[0].color_band, ColorBand::VeryHot);
    assert_eq!(light[0].color, "#ee0000");
    assert_eq!(light[1].color_band, ColorBand::VeryCold);
    assert_eq!(light[1].color, "#7928ca");

    let dark = normalize(&feed, 20, Theme::Dark);
    assert_eq!(dark[0].color_band, ColorBand::VeryHot);
    assert_eq!(dark[0].color, "#ef4444");
}

#[test]
fn test_output_respects_max_items() {
    let feed: Vec<_> = (0..30)
        .map(|i| create_test_observation(i, &format!("Estacion {i}"), 10.0 + i as f64))
        .collect();

    for max_items in [0, 1, 20, 25, 50] {
        let stations = normalize(&feed, max_items, Theme::Light);
        assert_eq!(stations.len(), max_items.min(30));
    }

    let top = normalize(&feed, 3, Theme::Light);
    let temps: Vec<f64> = top.iter().map(|s| s.temperature).collect();
    assert_eq!(temps, vec![39.0, 38.0, 37.0]);
}

#[test]
fn test_output_invariants() {
    let mut feed = create_mixed_feed();
    feed.extend(create_mixed_feed());
    feed.push(create_anonymous_observation("Villa Mercedes", 19.5));
    feed.push(create_anonymous_observation("", 30.0));

    let stations = normalize(&feed, 20, Theme::Dark);

    let mut labels = HashSet::new();
    let mut keys = HashSet::new();
    for station in &stations {
        assert!(!station.display_name.trim().is_empty());
        assert!(station.temperature.is_finite());
        assert_eq!(station.observation.temperatura, Some(station.temperature));
        assert!(labels.insert(station.display_name.clone()));
        assert!(keys.insert(station.unique_key.clone()));
    }
    assert!(stations.len() <= 20);
}

#[test]
fn test_unique_keys() {
    let feed = vec![
        create_test_observation(7, "Norte", 20.0),
        create_anonymous_observation("Sur", 21.0),
        create_anonymous_observation("Sur", 19.0),
    ];

    let stations = normalizer(20, RankingPolicy::TrustUpstream, Theme::Light).normalize(&feed);
    let keys: Vec<&str> = stations.iter().map(|s| s.unique_key.as_str()).collect();
    assert_eq!(keys, vec!["id-7", "pos-1", "pos-2"]);
    assert_eq!(stations[2].display_name, "Sur (2)");
}

#[test]
fn test_malformed_records_never_appear() {
    let feed = vec![
        create_test_observation(1, "Nan", f64::NAN),
        StationObservation {
            id: Some(StationId::Number(2)),
            temperatura: Some(20.0),
            ..Default::default()
        },
        create_test_observation(3, "Bien", 20.0),
    ];

    let stations = normalize(&feed, 20, Theme::Light);
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].display_name, "Bien");
}

#[test]
fn test_empty_input_yields_empty_output() {
    let result = normalizer(20, RankingPolicy::ByTemperature, Theme::Light).run(&[]);
    assert!(result.is_empty());
    assert_eq!(result.stats.total_input, 0);
}

#[test]
fn test_normalize_is_idempotent() {
    let feed = create_mixed_feed();
    let first = normalize(&feed, 4, Theme::Dark);
    let second = normalize(&feed, 4, Theme::Dark);
    assert_eq!(first, second);
}

#[test]
fn test_theme_change_only_changes_colors() {
    let feed = create_mixed_feed();
    let light = normalizer(20, RankingPolicy::ByTemperature, Theme::Light);
    let dark = light.with_theme(Theme::Dark);

    let light_stations = light.normalize(&feed);
    let dark_stations = dark.normalize(&feed);

    assert_eq!(light_stations.len(), dark_stations.len());
    for (l, d) in light_stations.iter().zip(&dark_stations) {
        assert_eq!(l.display_name, d.display_name);
        assert_eq!(l.color_band, d.color_band);
        assert_eq!(l.unique_key, d.unique_key);
        assert_ne!(l.color, d.color);
    }
}

#[test]
fn test_trust_upstream_keeps_input_order() {
    let feed = vec![
        create_test_observation(1, "Fria", 5.0),
        create_test_observation(2, "Caliente", 36.0),
    ];

    let stations = normalizer(20, RankingPolicy::TrustUpstream, Theme::Light).normalize(&feed);
    assert_eq!(stations[0].display_name, "Fria");
    assert_eq!(stations[1].display_name, "Caliente");
}

#[test]
fn test_serialized_output_shape() {
    let feed = vec![create_test_observation(104, "Estación CENTRO", 26.0)];
    let stations = normalize(&feed, 20, Theme::Light);
    let value = serde_json::to_value(&stations[0]).unwrap();

    assert_eq!(value["id"], 104);
    assert_eq!(value["nombre"], "Estación CENTRO");
    assert_eq!(value["temperatura"], 26.0);
    assert_eq!(value["displayName"], "Centro");
    assert_eq!(value["shortName"], "Centro");
    assert_eq!(value["colorBand"], "warm");
    assert_eq!(value["color"], "#f5a623");
    assert_eq!(value["uniqueKey"], "id-104");
    assert!(value.get("temperature").is_none());
}

#[test]
fn test_missing_precipitation_defaults_to_zero() {
    let mut wet = create_test_observation(2, "Lluviosa", 18.0);
    wet.precipitacion = Some(4.5);
    let feed = vec![create_anonymous_observation("Seca", 20.0), wet];

    let stations = normalize(&feed, 20, Theme::Light);
    let dry = stations.iter().find(|s| s.display_name == "Seca").unwrap();
    let wet = stations.iter().find(|s| s.display_name == "Lluviosa").unwrap();

    assert_eq!(dry.observation.precipitacion, Some(0.0));
    assert_eq!(serde_json::to_value(dry).unwrap()["precipitacion"], 0.0);
    assert_eq!(wet.observation.precipitacion, Some(4.5));
}
