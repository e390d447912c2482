//! Data models for station normalization
//!
//! This module contains the raw station observation records delivered by the
//! backend, the display-ready records produced by the normalizer, the
//! temperature band and theme enumerations, and the three backend payload
//! envelopes (`pronostico`, `estaciones`, `resumen`).

use crate::constants::{self, BAND_LABELS, BAND_RANGE_LABELS};
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Station Identifier
// =============================================================================

/// Opaque station identifier as delivered by the feed
///
/// The feed normally sends integers, but string ids are accepted too. Two ids
/// are the same station when their textual forms are equal, so `10` and `"10"`
/// collide on purpose.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StationId {
    Number(i64),
    Text(String),
}

impl StationId {
    /// Canonical key used for deduplication and render keys
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationId::Number(n) => write!(f, "{n}"),
            StationId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for StationId {
    fn from(value: i64) -> Self {
        StationId::Number(value)
    }
}

impl From<&str> for StationId {
    fn from(value: &str) -> Self {
        StationId::Text(value.to_string())
    }
}

// =============================================================================
// Raw Observation
// =============================================================================

/// Station observation exactly as received from the `estaciones` payload
///
/// No field is guaranteed: ids can repeat or be missing, names can be missing,
/// and the temperature can be null, absent or not a number at all. Every field
/// is decoded leniently, so a wrongly typed value becomes `None` instead of
/// failing the whole record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StationObservation {
    /// Opaque identifier
    #[serde(default, deserialize_with = "lenient::station_id")]
    pub id: Option<StationId>,

    /// Raw display name, possibly prefixed with "Estación" or "Est."
    #[serde(default, deserialize_with = "lenient::string")]
    pub nombre: Option<String>,

    /// Air temperature in degrees Celsius
    #[serde(default, deserialize_with = "lenient::number")]
    pub temperatura: Option<f64>,

    /// Latitude in WGS84 decimal degrees
    #[serde(default, deserialize_with = "lenient::number")]
    pub latitud: Option<f64>,

    /// Longitude in WGS84 decimal degrees
    #[serde(default, deserialize_with = "lenient::number")]
    pub longitud: Option<f64>,

    /// Precipitation in millimeters
    #[serde(default, deserialize_with = "lenient::number")]
    pub precipitacion: Option<f64>,

    /// Measurement time in milliseconds since the Unix epoch
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<i64>,
}

impl StationObservation {
    /// Create an observation with the fields the normalizer cares about
    pub fn new(
        id: Option<StationId>,
        nombre: impl Into<String>,
        temperatura: Option<f64>,
    ) -> Self {
        Self {
            id,
            nombre: Some(nombre.into()),
            temperatura,
            ..Default::default()
        }
    }

    /// Attach coordinates
    pub fn with_location(mut self, latitud: f64, longitud: f64) -> Self {
        self.latitud = Some(latitud);
        self.longitud = Some(longitud);
        self
    }

    /// Attach precipitation
    pub fn with_precipitation(mut self, millimeters: f64) -> Self {
        self.precipitacion = Some(millimeters);
        self
    }

    /// Temperature, if it is a finite number
    pub fn finite_temperature(&self) -> Option<f64> {
        self.temperatura.filter(|t| t.is_finite())
    }

    /// Raw name, or an empty string when missing
    pub fn name(&self) -> &str {
        self.nombre.as_deref().unwrap_or("")
    }

    /// Precipitation in millimeters, missing or invalid values count as 0
    pub fn precipitation_mm(&self) -> f64 {
        self.precipitacion.filter(|p| p.is_finite()).unwrap_or(0.0)
    }

    /// Get station location as (latitude, longitude) if both are present
    pub fn location(&self) -> Option<(f64, f64)> {
        match (self.latitud, self.longitud) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// Measurement time, if the feed sent one
    pub fn measured_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

// =============================================================================
// Normalized Station
// =============================================================================

/// Display-ready station produced by the normalization pipeline
///
/// Serializes with all raw observation fields plus `displayName`, `shortName`,
/// `colorBand`, `color` and `uniqueKey`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedStation {
    #[serde(flatten)]
    pub observation: StationObservation,

    /// Validated finite temperature (same value as `observation.temperatura`)
    #[serde(skip)]
    pub temperature: f64,

    /// Cleaned, capitalized, de-prefixed name, unique within one output set
    pub display_name: String,

    /// Chart axis label
    pub short_name: String,

    pub color_band: ColorBand,

    /// Band colour for the theme the pipeline ran with
    pub color: &'static str,

    /// Render key, unique within one output set
    pub unique_key: String,
}

impl NormalizedStation {
    pub fn id(&self) -> Option<&StationId> {
        self.observation.id.as_ref()
    }

    /// Band label shown in map popups
    pub fn band_label(&self) -> &'static str {
        self.color_band.label()
    }
}

// =============================================================================
// Temperature Bands and Themes
// =============================================================================

/// Seven ordered temperature classification buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorBand {
    VeryCold,
    Cold,
    Cool,
    Mild,
    Warm,
    Hot,
    VeryHot,
}

impl ColorBand {
    /// All bands, coldest first
    pub const ALL: [ColorBand; constants::BAND_COUNT] = [
        ColorBand::VeryCold,
        ColorBand::Cold,
        ColorBand::Cool,
        ColorBand::Mild,
        ColorBand::Warm,
        ColorBand::Hot,
        ColorBand::VeryHot,
    ];

    /// Ordinal position, 0 for very-cold
    pub fn index(self) -> usize {
        self as usize
    }

    /// Machine name (`very-cold`, `cold`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            ColorBand::VeryCold => "very-cold",
            ColorBand::Cold => "cold",
            ColorBand::Cool => "cool",
            ColorBand::Mild => "mild",
            ColorBand::Warm => "warm",
            ColorBand::Hot => "hot",
            ColorBand::VeryHot => "very-hot",
        }
    }

    /// Spanish label shown in map popups
    pub fn label(self) -> &'static str {
        BAND_LABELS[self.index()]
    }

    /// Legend range label, e.g. "10-15°"
    pub fn range_label(self) -> &'static str {
        BAND_RANGE_LABELS[self.index()]
    }
}

impl fmt::Display for ColorBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colour theme of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme, as a toggle would switch to
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(Error::configuration(format!(
                "Unknown theme '{other}': expected 'light' or 'dark'"
            ))),
        }
    }
}

// =============================================================================
// Backend Payloads
// =============================================================================

/// `estaciones` payload: the station list with a success flag
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct EstacionesPayload {
    pub exito: bool,
    pub total: Option<usize>,
    pub estaciones: Vec<StationObservation>,
    pub error: Option<String>,
    /// Records dropped while decoding because they were not JSON objects
    #[serde(skip)]
    pub dropped_records: usize,
}

/// Summary statistics, as carried by the `resumen` payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Summary {
    /// Forecast minimum for today
    #[serde(deserialize_with = "lenient::number")]
    pub temperatura_minima: Option<f64>,
    /// Forecast maximum for today
    #[serde(deserialize_with = "lenient::number")]
    pub temperatura_maxima: Option<f64>,
    /// Current average over reporting stations, one decimal
    #[serde(deserialize_with = "lenient::number")]
    pub temperatura_promedio: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub temperatura_actual_max: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub temperatura_actual_min: Option<f64>,
    pub total_estaciones: usize,
    pub hay_alerta: bool,
}

/// `resumen` payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResumenPayload {
    #[serde(default)]
    pub exito: bool,
    #[serde(flatten)]
    pub resumen: Summary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Current weather conditions section of the forecast
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    pub descripcion: String,
    pub cielo: String,
    pub temperatura: String,
    pub viento: String,
}

/// Forecast for today
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TodayForecast {
    pub descripcion: String,
    #[serde(deserialize_with = "lenient::number")]
    pub temperatura_minima: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub temperatura_maxima: Option<f64>,
    pub viento: String,
    pub cielo: String,
}

/// One day of the extended forecast
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyForecast {
    pub dia: String,
    pub fecha: String,
    pub descripcion: String,
    #[serde(deserialize_with = "lenient::number")]
    pub temperatura_minima: Option<f64>,
    #[serde(deserialize_with = "lenient::number")]
    pub temperatura_maxima: Option<f64>,
}

/// Weather alert issued with the forecast
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherAlert {
    pub zona_afectada: Option<String>,
    pub horario: Option<String>,
    pub descripcion: Option<String>,
}

/// `pronostico` payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PronosticoPayload {
    pub exito: bool,
    pub estado_actual: Option<CurrentConditions>,
    pub pronostico_hoy: Option<TodayForecast>,
    pub pronostico_extendido: Vec<DailyForecast>,
    pub alerta_meteorologica: Option<WeatherAlert>,
    pub informe_especial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Lenient Field Decoding
// =============================================================================

/// Field deserializers that turn wrongly typed values into `None`
///
/// A live sensor feed sends `null`, empty strings and the occasional text in
/// numeric columns. Each helper first reads an arbitrary JSON value and then
/// keeps it only when it has the expected shape.
pub(crate) mod lenient {
    use super::StationId;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(|v| v.as_f64()))
    }

    pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(|v| v.as_i64()))
    }

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            _ => None,
        })
    }

    pub fn station_id<'de, D>(deserializer: D) -> Result<Option<StationId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Some(StationId::Number(i)),
                // 10.0 names the same station as 10
                (None, Some(f))
                    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
                {
                    Some(StationId::Number(f as i64))
                }
                _ => Some(StationId::Text(n.to_string())),
            },
            Some(Value::String(s)) if !s.trim().is_empty() => Some(StationId::Text(s)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_observation_decodes_lenient_fields() {
        let obs: StationObservation = serde_json::from_value(json!({
            "id": 104,
            "nombre": "Estación CENTRO",
            "temperatura": "n/a",
            "latitud": -33.3,
            "longitud": null,
            "timestamp": 1700000000000i64
        }))
        .unwrap();

        assert_eq!(obs.id, Some(StationId::Number(104)));
        assert_eq!(obs.nombre.as_deref(), Some("Estación CENTRO"));
        assert_eq!(obs.temperatura, None);
        assert_eq!(obs.latitud, Some(-33.3));
        assert_eq!(obs.longitud, None);
        assert_eq!(obs.precipitacion, None);
        assert!(obs.measured_at().is_some());
    }

    #[test]
    fn test_observation_missing_fields_default_to_none() {
        let obs: StationObservation = serde_json::from_value(json!({})).unwrap();
        assert_eq!(obs, StationObservation::default());
        assert_eq!(obs.name(), "");
        assert_eq!(obs.precipitation_mm(), 0.0);
    }

    #[test]
    fn test_station_id_forms() {
        let obs: StationObservation =
            serde_json::from_value(json!({"id": "A-7", "nombre": 12})).unwrap();
        assert_eq!(obs.id, Some(StationId::Text("A-7".to_string())));
        assert_eq!(obs.nombre, None);

        let blank: StationObservation = serde_json::from_value(json!({"id": "  "})).unwrap();
        assert_eq!(blank.id, None);

        assert_eq!(StationId::Number(10).key(), StationId::from("10").key());
    }

    #[test]
    fn test_station_id_integral_float() {
        let whole: StationObservation = serde_json::from_value(json!({"id": 10.0})).unwrap();
        assert_eq!(whole.id, Some(StationId::Number(10)));

        let fractional: StationObservation = serde_json::from_value(json!({"id": 10.5})).unwrap();
        assert_eq!(fractional.id, Some(StationId::Text("10.5".to_string())));
    }

    #[test]
    fn test_color_band_names_and_labels() {
        assert_eq!(ColorBand::VeryCold.as_str(), "very-cold");
        assert_eq!(ColorBand::VeryHot.to_string(), "very-hot");
        assert_eq!(ColorBand::Mild.label(), "Templado");
        assert_eq!(ColorBand::Cold.range_label(), "10-15°");
        assert_eq!(
            serde_json::to_value(ColorBand::VeryHot).unwrap(),
            json!("very-hot")
        );
        assert!(ColorBand::Cold < ColorBand::Hot);
    }

    #[test]
    fn test_theme_parsing() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" Light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[test]
    fn test_resumen_payload_flattens_summary() {
        let payload: ResumenPayload = serde_json::from_value(json!({
            "exito": true,
            "temperatura_minima": 12,
            "temperatura_maxima": 31,
            "temperatura_promedio": 24.3,
            "temperatura_actual_max": 29.5,
            "temperatura_actual_min": 18.0,
            "total_estaciones": 42,
            "hay_alerta": false
        }))
        .unwrap();

        assert!(payload.exito);
        assert_eq!(payload.resumen.temperatura_maxima, Some(31.0));
        assert_eq!(payload.resumen.total_estaciones, 42);
    }
}
