//! Main station normalizer implementation and pipeline orchestration
//!
//! This module contains the StationNormalizer struct and coordinates the
//! filtering, deduplication, naming, classification and ranking stages.

use crate::app::models::{NormalizedStation, StationObservation, Theme};
use crate::app::services::classification::{classify, palette_for};
use crate::config::NormalizerConfig;
use tracing::info;

use super::{
    deduplication::deduplicate,
    filter::filter_valid,
    naming::{NamedStation, abbreviate_name, clean_names, ensure_unique_display_names},
    ranking::rank,
    stats::{NormalizationResult, NormalizationStats},
};

/// Station normalizer for one theme and one set of pipeline settings
///
/// The normalizer holds no state between runs. It is re-run on every feed
/// refresh and on every theme change, each time over a fresh snapshot.
///
/// # Example
///
/// ```rust
/// use estaciones::app::models::{StationObservation, Theme};
/// use estaciones::app::services::station_normalizer::StationNormalizer;
/// use estaciones::config::NormalizerConfig;
///
/// let normalizer = StationNormalizer::new(NormalizerConfig::default(), Theme::Dark);
/// let raw = vec![StationObservation::new(None, "Est. LA TOMA", Some(31.2))];
///
/// let result = normalizer.run(&raw);
/// assert_eq!(result.stations[0].display_name, "La Toma");
/// assert_eq!(result.stations[0].color, "#f97316");
/// ```
#[derive(Debug, Clone)]
pub struct StationNormalizer {
    config: NormalizerConfig,
    theme: Theme,
}

impl StationNormalizer {
    /// Create a new normalizer
    pub fn new(config: NormalizerConfig, theme: Theme) -> Self {
        Self { config, theme }
    }

    /// Same settings, different theme
    pub fn with_theme(&self, theme: Theme) -> Self {
        Self {
            config: self.config.clone(),
            theme,
        }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Run the full pipeline and return stations with per-stage statistics
    ///
    /// The output holds at most `max_items` stations, each with a finite
    /// temperature and a non-empty display name that is unique in the output.
    pub fn run(&self, raw_stations: &[StationObservation]) -> NormalizationResult {
        let mut stats = NormalizationStats::new();
        stats.total_input = raw_stations.len();

        info!(
            "Starting station normalization for {} records (theme: {}, max: {})",
            raw_stations.len(),
            self.theme,
            self.config.max_items
        );

        // Step 1: Drop malformed records
        let valid = filter_valid(raw_stations);
        stats.valid = valid.len();

        // Step 2: Drop repeated ids
        let deduplicated = deduplicate(valid);
        stats.deduplicated = deduplicated.len();

        // Step 3: Clean names and make them unique
        let named = clean_names(deduplicated);
        let cleaned: Vec<String> = named.iter().map(|s| s.display_name.clone()).collect();
        let named = ensure_unique_display_names(named);
        stats.renamed = named
            .iter()
            .zip(&cleaned)
            .filter(|(station, original)| station.display_name != **original)
            .count();

        // Step 4: Classify and key every station
        let classified: Vec<NormalizedStation> = named
            .into_iter()
            .enumerate()
            .map(|(position, station)| self.finish(position, station))
            .collect();

        // Step 5: Order and truncate
        let stations = rank(classified, self.config.ranking, self.config.max_items);
        stats.output = stations.len();

        info!("{}", stats.summary());

        NormalizationResult::new(stations, stats)
    }

    /// Run the pipeline and return only the stations
    pub fn normalize(&self, raw_stations: &[StationObservation]) -> Vec<NormalizedStation> {
        self.run(raw_stations).stations
    }

    fn finish(&self, position: usize, station: NamedStation) -> NormalizedStation {
        let NamedStation {
            mut observation,
            display_name,
        } = station;

        // Missing or non-finite precipitation is reported as no rain
        observation.precipitacion = Some(observation.precipitation_mm());

        // Records without a finite temperature never get past filtering
        let temperature = observation.finite_temperature().unwrap_or_default();
        let color_band = classify(temperature);
        let unique_key = match &observation.id {
            Some(id) => format!("id-{}", id.key()),
            None => format!("pos-{position}"),
        };

        NormalizedStation {
            temperature,
            short_name: abbreviate_name(&display_name),
            display_name,
            color_band,
            color: palette_for(self.theme).color(color_band),
            unique_key,
            observation,
        }
    }
}

/// Normalize a raw station list with default ranking
///
/// Shorthand for a [`StationNormalizer`] whose only non-default setting is
/// `max_items`.
pub fn normalize(
    raw_stations: &[StationObservation],
    max_items: usize,
    theme: Theme,
) -> Vec<NormalizedStation> {
    let config = NormalizerConfig {
        max_items,
        ..NormalizerConfig::default()
    };
    StationNormalizer::new(config, theme).normalize(raw_stations)
}
