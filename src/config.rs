//! Configuration management and validation.
//!
//! Provides the normalizer, dashboard and theme settings. Configuration is
//! layered: built-in defaults, then an optional TOML file, then command-line
//! overrides applied through the `with_*` builder methods.

use crate::app::models::Theme;
use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_CHART_MAX_ITEMS, DEFAULT_FEATURED_STATION,
    DEFAULT_HOT_DAY_THRESHOLD, DEFAULT_MAX_ITEMS, DEFAULT_POLL_INTERVAL_SECS,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// How the normalizer orders stations before truncating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingPolicy {
    /// Sort by descending temperature, ties broken by display name
    #[default]
    ByTemperature,
    /// Keep the feed order and only truncate
    TrustUpstream,
}

/// Settings for the normalization pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Maximum number of stations in the output
    pub max_items: usize,

    /// Ordering applied before truncation
    pub ranking: RankingPolicy,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            ranking: RankingPolicy::default(),
        }
    }
}

/// Settings for the dashboard views and the refresh cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Rows shown in the temperature chart
    pub chart_max_items: usize,

    /// Station shown on the featured card
    pub featured_station: String,

    /// Seconds between two refreshes
    pub poll_interval_secs: u64,

    /// Forecast maximum at or above which the day is highlighted
    pub hot_day_threshold: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            chart_max_items: DEFAULT_CHART_MAX_ITEMS,
            featured_station: DEFAULT_FEATURED_STATION.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            hot_day_threshold: DEFAULT_HOT_DAY_THRESHOLD,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub normalizer: NormalizerConfig,
    pub dashboard: DashboardConfig,
    pub theme: Theme,
}

impl Config {
    /// Default config file location (`<config dir>/estaciones/config.toml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::configuration_file("Invalid configuration TOML", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub async fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;
        debug!("Loaded configuration file {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Load an explicit file, else the default location if it exists, else defaults
    pub async fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path).await;
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path).await,
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate value ranges
    pub fn validate(&self) -> Result<()> {
        if self.normalizer.max_items == 0 {
            return Err(Error::configuration("max_items must be at least 1"));
        }
        if self.dashboard.chart_max_items == 0 {
            return Err(Error::configuration("chart_max_items must be at least 1"));
        }
        if self.dashboard.poll_interval_secs == 0 {
            return Err(Error::configuration(
                "poll_interval_secs must be at least 1",
            ));
        }
        if !self.dashboard.hot_day_threshold.is_finite() {
            return Err(Error::configuration(
                "hot_day_threshold must be a finite number",
            ));
        }
        Ok(())
    }

    /// Override the number of normalized stations
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.normalizer.max_items = max_items;
        self
    }

    /// Override the ranking policy
    pub fn with_ranking(mut self, ranking: RankingPolicy) -> Self {
        self.normalizer.ranking = ranking;
        self
    }

    /// Override the theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Override the refresh interval
    pub fn with_poll_interval_secs(mut self, secs: u64) -> Self {
        self.dashboard.poll_interval_secs = secs;
        self
    }

    /// Override the featured station query
    pub fn with_featured_station(mut self, query: impl Into<String>) -> Self {
        self.dashboard.featured_station = query.into();
        self
    }

    /// Refresh interval as a `Duration`
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.dashboard.poll_interval_secs)
    }
}
