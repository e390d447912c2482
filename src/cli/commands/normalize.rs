//! Normalize command implementation
//!
//! Loads an `estaciones` payload, runs the normalization pipeline and prints
//! the display-ready stations as a ranked table or as JSON.

use super::shared::{
    CommandStats, create_spinner, format_station_row, load_configuration, setup_logging, to_json,
    write_output,
};
use crate::app::models::{NormalizedStation, Theme};
use crate::app::services::payload::load_estaciones;
use crate::app::services::station_lookup::find_stations_in_region;
use crate::app::services::station_normalizer::{NormalizationStats, StationNormalizer};
use crate::cli::args::{NormalizeArgs, OutputFormat};
use crate::config::{Config, RankingPolicy};
use crate::{Error, Result};
use colored::Colorize;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Normalize command runner
pub async fn run_normalize(args: NormalizeArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    info!("Starting station normalization");
    debug!("Normalize arguments: {:?}", args);

    args.validate()?;
    let config = apply_overrides(load_configuration(&args.common).await?, &args)?;

    let spinner = args
        .common
        .show_progress()
        .then(|| create_spinner("Loading stations..."));

    let payload = load_estaciones(&args.input).await?;
    if !payload.exito {
        if let Some(spinner) = &spinner {
            spinner.finish_and_clear();
        }
        return Err(Error::payload(
            "estaciones",
            payload
                .error
                .unwrap_or_else(|| "backend reported failure".to_string()),
        ));
    }
    if payload.dropped_records > 0 {
        warn!(
            "{} station records were not objects and were skipped",
            payload.dropped_records
        );
    }

    let normalizer = StationNormalizer::new(config.normalizer.clone(), config.theme);
    let result = normalizer.run(&payload.estaciones);

    let stations: Vec<NormalizedStation> = match &args.region {
        Some(region) => {
            let inside: Vec<NormalizedStation> = find_stations_in_region(&result.stations, region)
                .into_iter()
                .cloned()
                .collect();
            info!(
                "Region filter kept {} of {} stations",
                inside.len(),
                result.station_count()
            );
            inside
        }
        None => result.stations.clone(),
    };

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let content = match args.common.output_format {
        OutputFormat::Human => render_human(&stations, &result.stats, config.theme),
        OutputFormat::Json => render_json(&stations, &result.stats, config.theme)?,
    };
    write_output(&content, args.output_file.as_deref()).await?;

    let stats = CommandStats {
        stations_loaded: payload.estaciones.len(),
        stations_output: stations.len(),
        refreshes: 1,
        processing_time: start_time.elapsed(),
    };

    info!(
        "Normalization completed in {:.2}s",
        stats.processing_time.as_secs_f64()
    );

    Ok(stats)
}

fn apply_overrides(mut config: Config, args: &NormalizeArgs) -> Result<Config> {
    if let Some(max_items) = args.max_items {
        config = config.with_max_items(max_items);
    }
    if args.trust_order {
        config = config.with_ranking(RankingPolicy::TrustUpstream);
    }
    config.validate()?;
    Ok(config)
}

/// Ranked station table
pub fn render_human(
    stations: &[NormalizedStation],
    stats: &NormalizationStats,
    theme: Theme,
) -> String {
    let mut output = format!(
        "{}\n{}\n",
        format!("Estaciones ({} theme)", theme).bright_green().bold(),
        "=".repeat(40)
    );

    if stations.is_empty() {
        output.push_str(&format!("{}\n", "No stations to display".bright_yellow()));
    } else {
        for (index, station) in stations.iter().enumerate() {
            output.push_str(&format_station_row(index + 1, station));
            output.push('\n');
        }
    }

    output.push('\n');
    output.push_str(&stats.summary().dimmed().to_string());
    output
}

/// JSON document with the stations and per-stage counts
pub fn render_json(
    stations: &[NormalizedStation],
    stats: &NormalizationStats,
    theme: Theme,
) -> Result<String> {
    let document = json!({
        "theme": theme,
        "total": stations.len(),
        "stats": {
            "total_input": stats.total_input,
            "valid": stats.valid,
            "deduplicated": stats.deduplicated,
            "renamed": stats.renamed,
            "output": stats.output,
        },
        "estaciones": stations,
    });
    to_json(&document)
}
