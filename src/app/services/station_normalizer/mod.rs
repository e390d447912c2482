//! Station normalization module
//!
//! This module turns the raw `estaciones` station list into a cleaned,
//! deduplicated, classified and display-ready sequence shared by the chart,
//! the map and the cards.
//!
//! # Architecture
//!
//! The module is organized into logical components:
//! - [`normalizer`] - Main StationNormalizer struct and pipeline orchestration
//! - [`filter`] - Malformed record exclusion
//! - [`deduplication`] - Repeated id removal, first occurrence wins
//! - [`naming`] - Name cleaning, label uniqueness and chart abbreviations
//! - [`ranking`] - Explicit temperature ordering and truncation
//! - [`stats`] - Normalization statistics and result structures
//!
//! # Processing Pipeline
//!
//! 1. **Filtering**: keep records with a finite temperature and a non-blank name
//! 2. **Deduplication**: drop later records repeating an id
//! 3. **Naming**: clean every name, then suffix repeated names with the station id
//! 4. **Classification**: attach band, theme colour and render key
//! 5. **Ranking**: sort by descending temperature (unless the feed order is trusted) and truncate
//!
//! Every stage is pure and synchronous. Running the pipeline twice over the
//! same input with the same settings yields identical output.
//!
//! # Example Usage
//!
//! ```rust
//! use estaciones::app::models::{StationId, StationObservation, Theme};
//! use estaciones::app::services::station_normalizer::normalize;
//!
//! let raw = vec![
//!     StationObservation::new(Some(StationId::Number(10)), "Estación CENTRO", Some(24.5)),
//!     StationObservation::new(Some(StationId::Number(20)), "Est. CENTRO", Some(21.0)),
//! ];
//!
//! let stations = normalize(&raw, 20, Theme::Light);
//! assert_eq!(stations[0].display_name, "Centro");
//! assert_eq!(stations[1].display_name, "Centro (20)");
//! ```

pub mod deduplication;
pub mod filter;
pub mod naming;
pub mod normalizer;
pub mod ranking;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use normalizer::{StationNormalizer, normalize};
pub use stats::{NormalizationResult, NormalizationStats};

// Re-export the individual stages
pub use deduplication::{count_duplicate_ids, deduplicate};
pub use filter::{filter_valid, is_valid};
pub use naming::{abbreviate_name, clean_name, ensure_unique_display_names};
pub use ranking::{sort_by_descending_temperature, top_n};
