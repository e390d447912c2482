//! Estaciones Library
//!
//! A Rust library for turning the raw station list of a regional
//! weather-station network into display-ready records for a dashboard.
//!
//! This library provides tools for:
//! - Decoding the `pronostico`, `estaciones` and `resumen` backend payloads leniently
//! - Filtering malformed station records and deduplicating repeated ids
//! - Cleaning station names and keeping every label unique
//! - Classifying temperatures into seven bands with theme-aware colours
//! - Ranking and truncating stations for the chart, and selecting map markers
//! - Locating a featured station by name with a fixed priority order
//! - Computing the dashboard summary cards

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod classification;
        pub mod payload;
        pub mod station_lookup;
        pub mod station_normalizer;
        pub mod summary;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{ColorBand, NormalizedStation, StationId, StationObservation, Theme};
pub use app::services::classification::{classify, color_for, palette_for};
pub use app::services::station_lookup::find_station_by_name;
pub use app::services::station_normalizer::{StationNormalizer, normalize};
pub use config::Config;

/// Result type alias for the station normalizer
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for loading, decoding and reporting station data
///
/// The normalization pipeline itself never fails; these errors come from the
/// surface around it (files, payload envelopes, configuration, the CLI).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON decoding error
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Backend payload could not be used
    #[error("Payload error in '{payload}': {message}")]
    Payload { payload: String, message: String },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Configuration file could not be parsed
    #[error("Configuration file error: {message}")]
    ConfigurationFile {
        message: String,
        #[source]
        source: toml::de::Error,
    },

    /// Station not found
    #[error("Station not found: '{query}'")]
    StationNotFound { query: String },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a JSON decoding error with context
    pub fn json(message: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            message: message.into(),
            source,
        }
    }

    /// Create a payload error
    pub fn payload(payload: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Payload {
            payload: payload.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a configuration file error
    pub fn configuration_file(message: impl Into<String>, source: toml::de::Error) -> Self {
        Self::ConfigurationFile {
            message: message.into(),
            source,
        }
    }

    /// Create a station not found error
    pub fn station_not_found(query: impl Into<String>) -> Self {
        Self::StationNotFound {
            query: query.into(),
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json {
            message: "JSON decoding failed".to_string(),
            source: error,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Self::ConfigurationFile {
            message: "TOML parsing failed".to_string(),
            source: error,
        }
    }
}
