//! Station lookup and selection
//!
//! This module locates individual stations for the featured dashboard card and
//! selects the stations that can be drawn on the map.
//!
//! - [`name_match`] - Priority-ordered name search
//! - [`geo`] - Map marker selection and bounding-box queries

pub mod geo;
pub mod name_match;

#[cfg(test)]
pub mod tests;

pub use geo::{BoundingBox, find_stations_in_region, map_markers};
pub use name_match::{MatchRule, StationName, find_station_by_name, match_station_by_name};
