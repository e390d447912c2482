//! Station deduplication
//!
//! The same physical station may appear more than once in one feed refresh.
//! The first occurrence wins so that ordering stays stable across polls.
//! Records without an id are never deduplicated against each other.

use crate::app::models::StationObservation;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Remove records repeating an earlier id, keeping the first in input order
///
/// Ids are compared by their textual form (see [`StationId::key`]).
///
/// [`StationId::key`]: crate::app::models::StationId::key
pub fn deduplicate(stations: Vec<StationObservation>) -> Vec<StationObservation> {
    let input_count = stations.len();
    let mut seen: HashSet<String> = HashSet::new();

    let deduplicated: Vec<StationObservation> = stations
        .into_iter()
        .filter(|station| match &station.id {
            Some(id) => {
                let first = seen.insert(id.key());
                if !first {
                    debug!("Dropping repeated station id {}", id);
                }
                first
            }
            None => true,
        })
        .collect();

    info!(
        "Deduplication complete: removed {} repeated ids, {} stations remaining",
        input_count - deduplicated.len(),
        deduplicated.len()
    );

    deduplicated
}

/// Count records that deduplication would remove
pub fn count_duplicate_ids(stations: &[StationObservation]) -> usize {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for id in stations.iter().filter_map(|s| s.id.as_ref()) {
        *counts.entry(id.key()).or_insert(0) += 1;
    }
    counts.values().map(|&count| count.saturating_sub(1)).sum()
}
