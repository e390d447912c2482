//! Malformed record exclusion
//!
//! Records without a finite temperature or without a usable name are expected
//! from a live sensor feed. They are dropped silently (logged at debug level)
//! and never surfaced as errors.

use crate::app::models::StationObservation;
use tracing::{debug, info};

/// Keep only records with a finite temperature and a non-blank name
///
/// Input order is preserved.
pub fn filter_valid(stations: &[StationObservation]) -> Vec<StationObservation> {
    let valid: Vec<StationObservation> = stations
        .iter()
        .filter(|station| {
            let keep = is_valid(station);
            if !keep {
                debug!(
                    "Dropping malformed station record id={:?} nombre={:?} temperatura={:?}",
                    station.id, station.nombre, station.temperatura
                );
            }
            keep
        })
        .cloned()
        .collect();

    info!(
        "Filtering complete: {} -> {} stations ({} malformed)",
        stations.len(),
        valid.len(),
        stations.len() - valid.len()
    );

    valid
}

/// Check if a record can be displayed
///
/// A name made only of whitespace counts as missing.
pub fn is_valid(station: &StationObservation) -> bool {
    station.finite_temperature().is_some()
        && station
            .nombre
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
}
