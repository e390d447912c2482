//! Dashboard summary cards
//!
//! Reproduces the `resumen` computation from a station list and today's
//! forecast, so the cards can be filled even when only the station feed is
//! available.

use crate::app::models::{PronosticoPayload, StationObservation, Summary};
use tracing::debug;

/// Compute the summary over every station with a finite temperature
///
/// The average is rounded to one decimal. Forecast extremes and the alert
/// flag come from the forecast when one is given.
pub fn summarize(stations: &[StationObservation], forecast: Option<&PronosticoPayload>) -> Summary {
    let temperatures: Vec<f64> = stations
        .iter()
        .filter_map(StationObservation::finite_temperature)
        .collect();

    let (average, max, min) = if temperatures.is_empty() {
        (None, None, None)
    } else {
        let sum: f64 = temperatures.iter().sum();
        let average = round_one_decimal(sum / temperatures.len() as f64);
        let max = temperatures.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = temperatures.iter().copied().fold(f64::INFINITY, f64::min);
        (Some(average), Some(max), Some(min))
    };

    let today = forecast.and_then(|f| f.pronostico_hoy.as_ref());

    let summary = Summary {
        temperatura_minima: today.and_then(|t| t.temperatura_minima),
        temperatura_maxima: today.and_then(|t| t.temperatura_maxima),
        temperatura_promedio: average,
        temperatura_actual_max: max,
        temperatura_actual_min: min,
        total_estaciones: temperatures.len(),
        hay_alerta: forecast.is_some_and(|f| f.alerta_meteorologica.is_some()),
    };

    debug!(
        "Summary over {} stations: avg={:?} min={:?} max={:?}",
        summary.total_estaciones,
        summary.temperatura_promedio,
        summary.temperatura_actual_min,
        summary.temperatura_actual_max
    );

    summary
}

/// Round to one decimal place
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format an optional temperature for a card, `--` when missing
pub fn format_temperature(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{v:.0}"),
        Some(v) => format!("{v:.1}"),
        None => "--".to_string(),
    }
}

impl Summary {
    /// Whether today's forecast maximum reaches the hot-day threshold
    pub fn is_hot_day(&self, threshold: f64) -> bool {
        self.temperatura_maxima.is_some_and(|max| max >= threshold)
    }

    /// Card text for the current range, e.g. `"12 - 31.5"`
    pub fn current_range(&self) -> String {
        format!(
            "{} - {}",
            format_temperature(self.temperatura_actual_min),
            format_temperature(self.temperatura_actual_max)
        )
    }
}
