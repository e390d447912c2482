//! Watch command implementation
//!
//! Polls an `estaciones` payload file on a fixed interval and re-runs the
//! normalizer over every fresh snapshot. A failed refresh is logged and the
//! loop keeps going; Ctrl+C is handled by the binary entry point.

use super::normalize::render_human;
use super::shared::{CommandStats, create_spinner, load_configuration, setup_logging};
use crate::app::services::payload::load_stations;
use crate::app::services::station_normalizer::{NormalizationResult, StationNormalizer};
use crate::cli::args::{OutputFormat, WatchArgs};
use crate::config::Config;
use crate::{Error, Result};
use chrono::Utc;
use colored::Colorize;
use serde_json::json;
use std::path::Path;
use std::time::Instant;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, warn};

/// Watch command runner
pub async fn run_watch(args: WatchArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    debug!("Watch arguments: {:?}", args);

    args.validate()?;
    let config = apply_overrides(load_configuration(&args.common).await?, &args)?;
    let normalizer = StationNormalizer::new(config.normalizer.clone(), config.theme);

    info!(
        "Watching {} every {}s",
        args.input.display(),
        config.dashboard.poll_interval_secs
    );

    let mut ticker = interval(config.poll_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut stats = CommandStats::default();
    loop {
        ticker.tick().await;

        let spinner = args
            .common
            .show_progress()
            .then(|| create_spinner("Refreshing stations..."));
        let refreshed = refresh(&normalizer, &args.input).await;
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        stats.refreshes += 1;
        match refreshed {
            Ok((loaded, result)) => {
                stats.stations_loaded = loaded;
                stats.stations_output = result.station_count();
                print_refresh(&result, &config, args.common.output_format)?;
            }
            Err(e) => warn!("Refresh {} failed: {}", stats.refreshes, e),
        }

        if args.count.is_some_and(|count| stats.refreshes as u64 >= count) {
            debug!("Reached {} refreshes, stopping", stats.refreshes);
            break;
        }
    }

    stats.processing_time = start_time.elapsed();
    Ok(stats)
}

fn apply_overrides(mut config: Config, args: &WatchArgs) -> Result<Config> {
    if let Some(secs) = args.interval {
        config = config.with_poll_interval_secs(secs);
    }
    if let Some(max_items) = args.max_items {
        config = config.with_max_items(max_items);
    }
    config.validate()?;
    Ok(config)
}

/// Read a fresh snapshot and normalize it
pub async fn refresh(
    normalizer: &StationNormalizer,
    input: &Path,
) -> Result<(usize, NormalizationResult)> {
    let stations = load_stations(input).await?;
    Ok((stations.len(), normalizer.run(&stations)))
}

fn print_refresh(result: &NormalizationResult, config: &Config, format: OutputFormat) -> Result<()> {
    let refreshed_at = Utc::now();
    match format {
        OutputFormat::Human => {
            println!(
                "\n{}",
                format!("Actualizado {}", refreshed_at.format("%H:%M:%S")).bright_yellow()
            );
            println!("{}", render_human(&result.stations, &result.stats, config.theme));
        }
        OutputFormat::Json => {
            // One document per line
            let line = serde_json::to_string(&json!({
                "actualizado": refreshed_at.to_rfc3339(),
                "theme": config.theme,
                "estaciones": result.stations,
            }))
            .map_err(|e| Error::json("Failed to serialize refresh", e))?;
            println!("{line}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Theme;
    use crate::cli::args::CommonArgs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_refresh_reads_fresh_snapshot() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("estaciones.json");
        let normalizer = StationNormalizer::new(Default::default(), Theme::Light);

        std::fs::write(
            &input,
            r#"{"exito": true, "estaciones": [{"id": 1, "nombre": "A", "temperatura": 10}]}"#,
        )
        .unwrap();
        let (loaded, first) = refresh(&normalizer, &input).await.unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(first.stations[0].temperature, 10.0);

        std::fs::write(
            &input,
            r#"{"exito": true, "estaciones": [{"id": 1, "nombre": "A", "temperatura": 26}]}"#,
        )
        .unwrap();
        let (_, second) = refresh(&normalizer, &input).await.unwrap();
        assert_eq!(second.stations[0].temperature, 26.0);
        assert_ne!(first.stations[0].color, second.stations[0].color);
    }

    #[tokio::test]
    async fn test_run_watch_stops_after_count() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("estaciones.json");
        std::fs::write(&input, r#"{"exito": false, "error": "caído"}"#).unwrap();

        let args = WatchArgs {
            input,
            interval: Some(1),
            max_items: None,
            count: Some(2),
            common: CommonArgs {
                quiet: true,
                output_format: OutputFormat::Json,
                ..Default::default()
            },
        };

        let stats = run_watch(args).await.unwrap();
        assert_eq!(stats.refreshes, 2);
        assert_eq!(stats.stations_output, 0);
    }
}
