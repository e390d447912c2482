//! Map marker selection and geographic queries

use crate::app::models::NormalizedStation;
use crate::constants::is_plottable;
use crate::{Error, Result};
use std::str::FromStr;

/// Stations that can be drawn as map markers
///
/// Both coordinates must be present, finite, non-zero and within WGS84 ranges.
pub fn map_markers(stations: &[NormalizedStation]) -> Vec<&NormalizedStation> {
    stations
        .iter()
        .filter(|station| {
            station
                .observation
                .location()
                .is_some_and(|(lat, lon)| is_plottable(lat, lon))
        })
        .collect()
}

/// Rectangular geographic region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Result<Self> {
        if min_lat > max_lat || min_lon > max_lon {
            return Err(Error::configuration(format!(
                "Invalid bounding box {min_lat},{max_lat},{min_lon},{max_lon}: minimum exceeds maximum"
            )));
        }
        Ok(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

impl FromStr for BoundingBox {
    type Err = Error;

    /// Parse `min_lat,max_lat,min_lon,max_lon`
    fn from_str(s: &str) -> Result<Self> {
        let values: Vec<f64> = s
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| Error::configuration(format!("Invalid bounding box '{s}': {e}")))?;

        match values.as_slice() {
            &[min_lat, max_lat, min_lon, max_lon] => Self::new(min_lat, max_lat, min_lon, max_lon),
            _ => Err(Error::configuration(format!(
                "Invalid bounding box '{s}': expected min_lat,max_lat,min_lon,max_lon"
            ))),
        }
    }
}

/// Stations located inside a bounding box
pub fn find_stations_in_region<'a>(
    stations: &'a [NormalizedStation],
    region: &BoundingBox,
) -> Vec<&'a NormalizedStation> {
    stations
        .iter()
        .filter(|station| {
            station
                .observation
                .location()
                .is_some_and(|(lat, lon)| region.contains(lat, lon))
        })
        .collect()
}
