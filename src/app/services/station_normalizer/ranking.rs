//! Station ordering and truncation
//!
//! The feed is supposed to deliver stations sorted by descending temperature.
//! Rather than relying on that, the normalizer sorts explicitly before
//! truncating. The trusted-order behaviour stays available through
//! [`RankingPolicy::TrustUpstream`].

use crate::app::models::NormalizedStation;
use crate::config::RankingPolicy;
use std::cmp::Ordering;
use tracing::debug;

/// Sort by descending temperature, ties broken by display name (ascending)
///
/// The sort is stable.
pub fn sort_by_descending_temperature(stations: &mut [NormalizedStation]) {
    stations.sort_by(compare_for_display);
}

/// Ordering used for display: warmest first, then alphabetical
pub fn compare_for_display(a: &NormalizedStation, b: &NormalizedStation) -> Ordering {
    b.temperature
        .total_cmp(&a.temperature)
        .then_with(|| a.display_name.cmp(&b.display_name))
}

/// Keep the first `n` entries
pub fn top_n<T>(mut stations: Vec<T>, n: usize) -> Vec<T> {
    stations.truncate(n);
    stations
}

/// Apply a ranking policy and truncate to `max_items`
pub fn rank(
    mut stations: Vec<NormalizedStation>,
    policy: RankingPolicy,
    max_items: usize,
) -> Vec<NormalizedStation> {
    match policy {
        RankingPolicy::ByTemperature => sort_by_descending_temperature(&mut stations),
        RankingPolicy::TrustUpstream => {
            if !stations.windows(2).all(|w| w[0].temperature >= w[1].temperature) {
                debug!("Feed order is not sorted by descending temperature; keeping it as-is");
            }
        }
    }
    top_n(stations, max_items)
}
