//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! multiple CLI command implementations.

use crate::app::models::NormalizedStation;
use crate::app::services::classification::hex_to_rgb;
use crate::cli::args::CommonArgs;
use crate::config::Config;
use crate::{Error, Result};
use colored::{ColoredString, Colorize};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Command statistics for reporting across all commands
#[derive(Debug, Clone, Default)]
pub struct CommandStats {
    /// Raw station records read
    pub stations_loaded: usize,
    /// Stations in the final output
    pub stations_output: usize,
    /// Feed refreshes performed
    pub refreshes: usize,
    /// Total processing time
    pub processing_time: Duration,
}

impl CommandStats {
    /// Stations dropped between input and output
    pub fn stations_dropped(&self) -> usize {
        self.stations_loaded.saturating_sub(self.stations_output)
    }
}

/// Set up structured logging on stderr
///
/// `RUST_LOG` takes precedence over the verbosity flags. A second call keeps
/// the subscriber installed by the first.
pub fn setup_logging(args: &CommonArgs) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("estaciones={log_level}")));

    let installed = if args.quiet {
        // Minimal logging for quiet mode
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if installed.is_err() {
        debug!("Logging already initialized");
    } else {
        debug!("Logging initialized at level: {}", log_level);
    }
    Ok(())
}

/// Load configuration using the layered approach (defaults -> file -> args)
///
/// Only the shared `--theme` override is applied here; commands apply their
/// own overrides through the `Config::with_*` builders and validate again.
pub async fn load_configuration(args: &CommonArgs) -> Result<Config> {
    match &args.config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => debug!("No explicit config file, checking default location"),
    }

    let mut config = Config::load(args.config_file.as_deref()).await?;

    if let Some(theme) = args.theme {
        config = config.with_theme(theme);
    }

    config.validate()?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

/// Write command output to a file, or to stdout when no file is given
pub async fn write_output(content: &str, output_file: Option<&Path>) -> Result<()> {
    match output_file {
        Some(path) => {
            tokio::fs::write(path, content)
                .await
                .map_err(|e| Error::io(format!("Failed to write {}", path.display()), e))?;
            info!("Wrote output to {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

/// Serialize a value as pretty JSON
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| Error::json("Failed to serialize output", e))
}

/// Colour block for a `#rrggbb` value
pub fn swatch(color: &str) -> ColoredString {
    match hex_to_rgb(color) {
        Some((r, g, b)) => "██".truecolor(r, g, b),
        None => "██".normal(),
    }
}

/// Temperature text coloured with the station's band colour
pub fn colored_temperature(station: &NormalizedStation) -> ColoredString {
    let text = format!("{:>6.1}°C", station.temperature);
    match hex_to_rgb(station.color) {
        Some((r, g, b)) => text.truecolor(r, g, b).bold(),
        None => text.bold(),
    }
}

/// One ranked station line for human output
pub fn format_station_row(rank: usize, station: &NormalizedStation) -> String {
    format!(
        "{:>3}. {} {:<32} {} {}",
        rank,
        swatch(station.color),
        station.display_name,
        colored_temperature(station),
        station.band_label().dimmed()
    )
}

/// Create a simple spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
