//! Application constants for the station normalizer
//!
//! This module contains the temperature band boundaries, the two colour
//! palettes, name-cleaning prefixes and the default values used throughout
//! the crate.

// =============================================================================
// Temperature Bands
// =============================================================================

/// Lower bounds (°C, inclusive) of the six upper bands, coldest first
///
/// Anything below the first bound is very-cold. A temperature equal to a bound
/// belongs to the warmer band.
pub mod band_bounds {
    pub const COLD: f64 = 10.0;
    pub const COOL: f64 = 15.0;
    pub const MILD: f64 = 20.0;
    pub const WARM: f64 = 25.0;
    pub const HOT: f64 = 30.0;
    pub const VERY_HOT: f64 = 35.0;
}

/// Number of ordinal temperature bands
pub const BAND_COUNT: usize = 7;

// =============================================================================
// Colour Palettes
// =============================================================================

/// Light theme palette (chart colours), very-cold first
pub const LIGHT_PALETTE: [&str; BAND_COUNT] = [
    "#7928ca", // violet
    "#0070f3", // blue
    "#00b4d8", // cyan
    "#0cce6b", // green
    "#f5a623", // amber
    "#ff6b35", // orange
    "#ee0000", // red
];

/// Dark theme palette (map colours over dark tiles), very-cold first
pub const DARK_PALETTE: [&str; BAND_COUNT] = [
    "#8b5cf6", "#3b82f6", "#06b6d4", "#22c55e", "#eab308", "#f97316", "#ef4444",
];

/// Spanish labels shown in map popups, very-cold first
pub const BAND_LABELS: [&str; BAND_COUNT] = [
    "Muy frío",
    "Frío",
    "Fresco",
    "Templado",
    "Cálido",
    "Caliente",
    "Muy caliente",
];

/// Legend range labels, very-cold first
pub const BAND_RANGE_LABELS: [&str; BAND_COUNT] = [
    "<10°", "10-15°", "15-20°", "20-25°", "25-30°", "30-35°", ">35°",
];

// =============================================================================
// Station Names
// =============================================================================

/// Prefixes stripped from raw station names (matched case-insensitively)
pub const STATION_NAME_PREFIXES: &[&str] = &["Estación ", "Est. ", "EST. "];

/// Names longer than this many characters get abbreviated on chart axes
pub const SHORT_NAME_MAX_CHARS: usize = 18;

/// Characters kept when a chart label is abbreviated
pub const SHORT_NAME_KEEP_CHARS: usize = 16;

/// Appended to abbreviated chart labels
pub const SHORT_NAME_ELLIPSIS: &str = "...";

/// Phrase used to prefer urban stations when searching by name
pub const CITY_PHRASE: &str = "ciudad de";

// =============================================================================
// Defaults
// =============================================================================

/// Default number of stations kept by the normalizer
pub const DEFAULT_MAX_ITEMS: usize = 20;

/// Default number of chart rows on the dashboard
pub const DEFAULT_CHART_MAX_ITEMS: usize = 25;

/// Default refresh interval of the polling cycle (5 minutes)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 5 * 60;

/// Station shown on the featured dashboard card
pub const DEFAULT_FEATURED_STATION: &str = "aeropuerto san luis";

/// Forecast maximum at or above which the dashboard highlights the day as hot
pub const DEFAULT_HOT_DAY_THRESHOLD: f64 = 30.0;

/// File names of the three backend payloads inside a snapshot directory
pub mod snapshot_files {
    pub const PRONOSTICO: &str = "pronostico.json";
    pub const ESTACIONES: &str = "estaciones.json";
    pub const RESUMEN: &str = "resumen.json";
}

/// Config file name looked up in the user config directory
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name under the user config directory
pub const APP_DIR_NAME: &str = "estaciones";

// =============================================================================
// Geographic Validation
// =============================================================================

/// Valid WGS84 latitude range
pub const LATITUDE_RANGE: (f64, f64) = (-90.0, 90.0);

/// Valid WGS84 longitude range
pub const LONGITUDE_RANGE: (f64, f64) = (-180.0, 180.0);

/// Check whether a coordinate pair is usable for a map marker
///
/// Zero coordinates are treated as missing, the way the feed reports them.
pub fn is_plottable(lat: f64, lon: f64) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && lat != 0.0
        && lon != 0.0
        && (LATITUDE_RANGE.0..=LATITUDE_RANGE.1).contains(&lat)
        && (LONGITUDE_RANGE.0..=LONGITUDE_RANGE.1).contains(&lon)
}
