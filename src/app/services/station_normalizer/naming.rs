//! Station name cleaning and label uniqueness
//!
//! Raw feed names look like "Estación ANCHORENA" or "Est. LA TOMA". Cleaning
//! strips the prefix and title-cases every word. After cleaning, repeated
//! names get the station id appended so every rendered label is distinct.

use crate::app::models::{StationId, StationObservation};
use crate::constants::{
    SHORT_NAME_ELLIPSIS, SHORT_NAME_KEEP_CHARS, SHORT_NAME_MAX_CHARS, STATION_NAME_PREFIXES,
};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use tracing::{debug, info};

/// Case-insensitive match of any known prefix at the start of a name
static PREFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = STATION_NAME_PREFIXES
        .iter()
        .map(|prefix| regex::escape(prefix))
        .collect();
    Regex::new(&format!("^(?i:{})", alternatives.join("|")))
        .expect("station name prefix pattern is valid")
});

/// A station paired with its display name
#[derive(Debug, Clone, PartialEq)]
pub struct NamedStation {
    pub observation: StationObservation,
    pub display_name: String,
}

/// Clean a raw station name
///
/// 1. Strip one leading "Estación ", "Est. " or "EST. " (case-insensitive).
/// 2. Title-case every whitespace-separated word and join with single spaces.
/// 3. If nothing is left, return the raw name unmodified.
///
/// ```
/// use estaciones::app::services::station_normalizer::clean_name;
///
/// assert_eq!(clean_name("Estación ANCHORENA"), "Anchorena");
/// assert_eq!(clean_name("Est. LA TOMA"), "La Toma");
/// assert_eq!(clean_name(""), "");
/// ```
pub fn clean_name(raw: &str) -> String {
    let stripped = PREFIX_PATTERN.replace(raw.trim_start(), "");

    let cleaned = stripped
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.is_empty() {
        raw.to_string()
    } else {
        cleaned
    }
}

/// Uppercase the first character and lowercase the rest
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Pair every station with its cleaned name
pub fn clean_names(stations: Vec<StationObservation>) -> Vec<NamedStation> {
    stations
        .into_iter()
        .map(|observation| {
            let display_name = clean_name(observation.name());
            NamedStation {
                observation,
                display_name,
            }
        })
        .collect()
}

/// Make display names unique, first occurrence keeps the bare name
///
/// Later stations with an already used name become `"Name (id)"`. Stations
/// without an id use their occurrence number instead, so the second id-less
/// "Centro" becomes `"Centro (2)"`. If a suffixed label is itself taken, a
/// further `-n` counter is added until it is free.
pub fn ensure_unique_display_names(stations: Vec<NamedStation>) -> Vec<NamedStation> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let mut renamed = 0;

    let unique: Vec<NamedStation> = stations
        .into_iter()
        .map(|mut station| {
            let occurrence = occurrences
                .entry(station.display_name.clone())
                .and_modify(|count| *count += 1)
                .or_insert(1);

            if taken.contains(&station.display_name) {
                let label = disambiguate(
                    &station.display_name,
                    station.observation.id.as_ref(),
                    *occurrence,
                    &taken,
                );
                debug!(
                    "Renamed repeated station name '{}' to '{}'",
                    station.display_name, label
                );
                station.display_name = label;
                renamed += 1;
            }

            taken.insert(station.display_name.clone());
            station
        })
        .collect();

    info!(
        "Name deduplication complete: {} of {} labels suffixed",
        renamed,
        unique.len()
    );

    unique
}

fn disambiguate(
    base: &str,
    id: Option<&StationId>,
    occurrence: usize,
    taken: &HashSet<String>,
) -> String {
    let tag = match id {
        Some(id) => id.key(),
        None => occurrence.to_string(),
    };

    let mut label = format!("{base} ({tag})");
    let mut counter = 2;
    while taken.contains(&label) {
        label = format!("{base} ({tag}-{counter})");
        counter += 1;
    }
    label
}

/// Abbreviate long names for chart axis labels
///
/// Names over 18 characters keep their first 16 characters followed by "...".
pub fn abbreviate_name(name: &str) -> String {
    if name.chars().count() > SHORT_NAME_MAX_CHARS {
        let head: String = name.chars().take(SHORT_NAME_KEEP_CHARS).collect();
        format!("{head}{SHORT_NAME_ELLIPSIS}")
    } else {
        name.to_string()
    }
}
