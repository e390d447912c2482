//! Normalization statistics and result structures
//!
//! This module provides types for tracking how many records each pipeline
//! stage kept, and for handing the normalized stations to the views.

use crate::app::models::NormalizedStation;

/// Record counts after each normalization stage
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizationStats {
    /// Number of raw input records
    pub total_input: usize,
    /// Records left after malformed-record filtering
    pub valid: usize,
    /// Records left after id deduplication
    pub deduplicated: usize,
    /// Display names that received a disambiguating suffix
    pub renamed: usize,
    /// Final number of output stations
    pub output: usize,
}

impl NormalizationStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Records dropped as malformed
    pub fn malformed(&self) -> usize {
        self.total_input - self.valid
    }

    /// Records dropped as repeated ids
    pub fn duplicates_removed(&self) -> usize {
        self.valid - self.deduplicated
    }

    /// Stations cut by truncation
    pub fn truncated(&self) -> usize {
        self.deduplicated - self.output
    }

    /// Percentage of input records that were displayable
    pub fn validity_rate(&self) -> f64 {
        if self.total_input == 0 {
            100.0
        } else {
            (self.valid as f64 / self.total_input as f64) * 100.0
        }
    }

    /// Get summary of pipeline statistics
    pub fn summary(&self) -> String {
        format!(
            "Normalization Summary: {} -> {} stations | Malformed: {} ({:.1}% valid) | \
             Duplicates: {} | Renamed: {} | Truncated: {}",
            self.total_input,
            self.output,
            self.malformed(),
            self.validity_rate(),
            self.duplicates_removed(),
            self.renamed,
            self.truncated()
        )
    }
}

/// Result of one normalization run
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizationResult {
    /// Display-ready stations
    pub stations: Vec<NormalizedStation>,
    /// Per-stage record counts
    pub stats: NormalizationStats,
}

impl NormalizationResult {
    pub fn new(stations: Vec<NormalizedStation>, stats: NormalizationStats) -> Self {
        Self { stations, stats }
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
