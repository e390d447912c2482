//! Priority-ordered station name search
//!
//! The network has several stations with overlapping names ("San Luis",
//! "Ciudad de San Luis", "San Luis Rural"). The search tries three rules in a
//! fixed order and leans towards the urban station:
//!
//! 1. Exact case-insensitive match on the full name.
//! 2. The name equals or contains `"ciudad de " + query`.
//! 3. The name contains the query, or the query contains the name's first word.
//!
//! Within a rule the first station in list order wins.

use crate::app::models::{NormalizedStation, StationObservation};
use crate::constants::CITY_PHRASE;
use tracing::debug;

/// Anything that carries a searchable station name
pub trait StationName {
    fn station_name(&self) -> &str;
}

impl StationName for StationObservation {
    fn station_name(&self) -> &str {
        self.name()
    }
}

impl StationName for NormalizedStation {
    fn station_name(&self) -> &str {
        &self.display_name
    }
}

impl<T: StationName + ?Sized> StationName for &T {
    fn station_name(&self) -> &str {
        (**self).station_name()
    }
}

/// Which rule produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    Exact,
    City,
    Partial,
}

/// Find a station by name, `None` when no rule matches
///
/// A blank query matches nothing.
pub fn find_station_by_name<'a, T: StationName>(query: &str, stations: &'a [T]) -> Option<&'a T> {
    match_station_by_name(query, stations).map(|(station, _)| station)
}

/// Find a station by name and report the rule that matched
pub fn match_station_by_name<'a, T: StationName>(
    query: &str,
    stations: &'a [T],
) -> Option<(&'a T, MatchRule)> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }

    let lowered: Vec<String> = stations
        .iter()
        .map(|station| station.station_name().to_lowercase())
        .collect();

    let found = exact_match(&query, &lowered)
        .map(|index| (index, MatchRule::Exact))
        .or_else(|| city_match(&query, &lowered).map(|index| (index, MatchRule::City)))
        .or_else(|| partial_match(&query, &lowered).map(|index| (index, MatchRule::Partial)));

    match found {
        Some((index, rule)) => {
            debug!(
                "Station query '{}' matched '{}' ({:?})",
                query,
                stations[index].station_name(),
                rule
            );
            Some((&stations[index], rule))
        }
        None => {
            debug!("Station query '{}' matched nothing", query);
            None
        }
    }
}

fn exact_match(query: &str, names: &[String]) -> Option<usize> {
    names.iter().position(|name| name == query)
}

fn city_match(query: &str, names: &[String]) -> Option<usize> {
    let phrase = format!("{CITY_PHRASE} {query}");
    let candidates: Vec<usize> = names
        .iter()
        .enumerate()
        .filter(|(_, name)| **name == phrase || name.contains(&phrase))
        .map(|(index, _)| index)
        .collect();

    candidates
        .iter()
        .copied()
        .find(|&index| names[index].contains(CITY_PHRASE))
        .or_else(|| candidates.first().copied())
}

fn partial_match(query: &str, names: &[String]) -> Option<usize> {
    names.iter().position(|name| {
        name.contains(query)
            || name
                .split_whitespace()
                .next()
                .is_some_and(|first_word| query.contains(first_word))
    })
}
