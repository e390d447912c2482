//! Command-line argument definitions for the estaciones CLI
//!
//! This module defines the complete CLI interface using the clap derive API.
//! Options shared by every command live in [`CommonArgs`] and are flattened
//! into each subcommand.

use crate::app::models::Theme;
use crate::app::services::station_lookup::BoundingBox;
use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the weather-station normalizer
///
/// Turns the station list of a regional weather-station network into
/// display-ready records for charts, maps and summary cards.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "estaciones",
    version,
    about = "Normalize weather-station feeds into display-ready records",
    long_about = "Reads the estaciones, pronostico and resumen payloads of a regional \
                  weather-station network, drops malformed and repeated records, cleans \
                  station names, classifies temperatures into seven colour bands and \
                  ranks the stations for charts and maps."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Normalize an estaciones payload and print the display-ready stations
    Normalize(NormalizeArgs),
    /// Find a station by name
    Lookup(LookupArgs),
    /// Render the dashboard from a snapshot directory
    Dashboard(DashboardArgs),
    /// Print the temperature band legend
    Legend(LegendArgs),
    /// Re-read and re-normalize an estaciones payload on a fixed interval
    Watch(WatchArgs),
}

/// Options shared by every command
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CommonArgs {
    /// Path to configuration file
    ///
    /// TOML configuration file. If not specified, looks for
    /// <config dir>/estaciones/config.toml and falls back to defaults.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Colour theme, overrides the configuration file
    #[arg(short = 't', long = "theme", value_name = "THEME", help = "Colour theme: light or dark")]
    pub theme: Option<Theme>,

    /// Output format for results
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress logging except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the normalize command
#[derive(Debug, Clone, Parser)]
pub struct NormalizeArgs {
    /// Path to an estaciones payload (JSON)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Maximum number of stations to output
    #[arg(short = 'n', long = "max-items", value_name = "COUNT")]
    pub max_items: Option<usize>,

    /// Keep the feed order instead of sorting by temperature
    #[arg(long = "trust-order", help = "Keep the feed order and only truncate")]
    pub trust_order: bool,

    /// Only keep stations inside a bounding box
    #[arg(
        long = "region",
        value_name = "BBOX",
        allow_hyphen_values = true,
        help = "Filter stations by bounding box (min_lat,max_lat,min_lon,max_lon)"
    )]
    pub region: Option<BoundingBox>,

    /// Write the result to a file instead of stdout
    #[arg(short = 'o', long = "output-file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the lookup command
#[derive(Debug, Clone, Parser)]
pub struct LookupArgs {
    /// Path to an estaciones payload (JSON)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Station name to look for; defaults to the configured featured station
    #[arg(value_name = "QUERY")]
    pub query: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the dashboard command
#[derive(Debug, Clone, Parser)]
pub struct DashboardArgs {
    /// Directory holding pronostico.json, estaciones.json and resumen.json
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: PathBuf,

    /// Rows shown in the temperature chart
    #[arg(long = "chart-items", value_name = "COUNT")]
    pub chart_items: Option<usize>,

    /// Station shown on the featured card
    #[arg(long = "featured", value_name = "NAME")]
    pub featured: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the legend command
#[derive(Debug, Clone, Parser)]
pub struct LegendArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Arguments for the watch command
#[derive(Debug, Clone, Parser)]
pub struct WatchArgs {
    /// Path to an estaciones payload (JSON), re-read on every refresh
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Seconds between refreshes
    #[arg(long = "interval", value_name = "SECS")]
    pub interval: Option<u64>,

    /// Maximum number of stations to output
    #[arg(short = 'n', long = "max-items", value_name = "COUNT")]
    pub max_items: Option<usize>,

    /// Stop after this many refreshes instead of running until Ctrl+C
    #[arg(long = "count", value_name = "N")]
    pub count: Option<u64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Options shared by every command, if a command was given
    pub fn common(&self) -> Option<&CommonArgs> {
        self.command.as_ref().map(Commands::common)
    }
}

impl Commands {
    pub fn common(&self) -> &CommonArgs {
        match self {
            Commands::Normalize(args) => &args.common,
            Commands::Lookup(args) => &args.common,
            Commands::Dashboard(args) => &args.common,
            Commands::Legend(args) => &args.common,
            Commands::Watch(args) => &args.common,
        }
    }
}

impl CommonArgs {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress spinners (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet && self.output_format == OutputFormat::Human
    }

    /// Validate that an explicit config file exists
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(Error::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }
        Ok(())
    }
}

fn validate_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }
    if !path.is_file() {
        return Err(Error::configuration(format!(
            "Input path is not a file: {}",
            path.display()
        )));
    }
    Ok(())
}

fn validate_count(value: Option<usize>, what: &str) -> Result<()> {
    if value == Some(0) {
        return Err(Error::configuration(format!("{what} must be greater than 0")));
    }
    Ok(())
}

impl NormalizeArgs {
    /// Validate the normalize command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        validate_input_file(&self.input)?;
        validate_count(self.max_items, "Max items")?;

        if let Some(output_file) = &self.output_file {
            if let Some(parent) = output_file.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    return Err(Error::configuration(format!(
                        "Output file directory does not exist: {}",
                        parent.display()
                    )));
                }
            }
        }
        Ok(())
    }
}

impl LookupArgs {
    /// Validate the lookup command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        validate_input_file(&self.input)?;
        if let Some(query) = &self.query {
            if query.trim().is_empty() {
                return Err(Error::configuration("Query cannot be empty"));
            }
        }
        Ok(())
    }
}

impl DashboardArgs {
    /// Validate the dashboard command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        if !self.dir.is_dir() {
            return Err(Error::configuration(format!(
                "Snapshot directory does not exist: {}",
                self.dir.display()
            )));
        }
        validate_count(self.chart_items, "Chart items")
    }
}

impl WatchArgs {
    /// Validate the watch command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        self.common.validate()?;
        validate_input_file(&self.input)?;
        validate_count(self.max_items, "Max items")?;
        if self.interval == Some(0) {
            return Err(Error::configuration("Interval must be at least 1 second"));
        }
        if self.count == Some(0) {
            return Err(Error::configuration("Count must be greater than 0"));
        }
        Ok(())
    }
}
