//! Lookup command implementation
//!
//! Searches the raw station list by name with the same priority order the
//! featured dashboard card uses.

use super::shared::{
    CommandStats, load_configuration, setup_logging, swatch, to_json, write_output,
};
use crate::app::models::{StationObservation, Theme};
use crate::app::services::classification::{classify, palette_for};
use crate::app::services::payload::load_stations;
use crate::app::services::station_lookup::{MatchRule, match_station_by_name};
use crate::app::services::station_normalizer::clean_name;
use crate::app::services::summary::format_temperature;
use crate::cli::args::{LookupArgs, OutputFormat};
use crate::{Error, Result};
use colored::Colorize;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info};

/// Lookup command runner
pub async fn run_lookup(args: LookupArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Lookup arguments: {:?}", args);

    args.validate()?;
    let config = load_configuration(&args.common).await?;

    let query = args
        .query
        .clone()
        .unwrap_or_else(|| config.dashboard.featured_station.clone());
    info!("Looking up station '{}'", query);

    let stations = load_stations(&args.input).await?;
    let (station, rule) = match_station_by_name(&query, &stations)
        .ok_or_else(|| Error::station_not_found(query.clone()))?;

    let content = match args.common.output_format {
        OutputFormat::Human => render_human(station, rule, config.theme),
        OutputFormat::Json => render_json(station, rule, config.theme)?,
    };
    write_output(&content, None).await?;

    Ok(CommandStats {
        stations_loaded: stations.len(),
        stations_output: 1,
        refreshes: 1,
        processing_time: start_time.elapsed(),
    })
}

fn rule_name(rule: MatchRule) -> &'static str {
    match rule {
        MatchRule::Exact => "exact",
        MatchRule::City => "city",
        MatchRule::Partial => "partial",
    }
}

/// Station card for human output
pub fn render_human(station: &StationObservation, rule: MatchRule, theme: Theme) -> String {
    let mut output = format!(
        "{} {}\n",
        clean_name(station.name()).bright_white().bold(),
        format!("({} match)", rule_name(rule)).dimmed()
    );

    match station.finite_temperature() {
        Some(temperature) => {
            let band = classify(temperature);
            output.push_str(&format!(
                "  {} {}°C  {} {}\n",
                "Temperatura:".bright_cyan(),
                format_temperature(Some(temperature)),
                swatch(palette_for(theme).color(band)),
                band.label()
            ));
        }
        None => output.push_str(&format!("  {} --\n", "Temperatura:".bright_cyan())),
    }

    output.push_str(&format!(
        "  {} {:.1} mm\n",
        "Precipitación:".bright_cyan(),
        station.precipitation_mm()
    ));

    if let Some((lat, lon)) = station.location() {
        output.push_str(&format!(
            "  {} {:.4}, {:.4}\n",
            "Ubicación:".bright_cyan(),
            lat,
            lon
        ));
    }

    if let Some(measured_at) = station.measured_at() {
        output.push_str(&format!(
            "  {} {}\n",
            "Medición:".bright_cyan(),
            measured_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }

    output
}

/// Matched station as JSON
pub fn render_json(station: &StationObservation, rule: MatchRule, theme: Theme) -> Result<String> {
    let band = station.finite_temperature().map(classify);
    let document = json!({
        "match": rule_name(rule),
        "displayName": clean_name(station.name()),
        "colorBand": band,
        "color": band.map(|band| palette_for(theme).color(band)),
        "estacion": station,
    });
    to_json(&document)
}
