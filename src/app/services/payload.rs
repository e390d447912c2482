//! Decoding of the three backend payloads
//!
//! Each payload carries an `exito` success flag plus its domain data. Station
//! records are decoded one by one so a single malformed entry never rejects
//! the whole list. A [`DashboardSnapshot`] bundles the three payloads of one
//! refresh cycle.

use crate::app::models::{EstacionesPayload, PronosticoPayload, ResumenPayload, StationObservation};
use crate::constants::snapshot_files;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, warn};

/// Envelope with the station array kept as raw JSON values
#[derive(Debug, Deserialize)]
struct RawEstacionesPayload {
    #[serde(default)]
    exito: bool,
    #[serde(default)]
    total: Option<usize>,
    #[serde(default)]
    estaciones: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

/// Decode an `estaciones` payload from JSON text
pub fn decode_estaciones(json: &str) -> Result<EstacionesPayload> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| Error::json("Invalid JSON in estaciones payload", e))?;
    decode_estaciones_value(value)
}

/// Decode an `estaciones` payload from a JSON value
///
/// A bare array is accepted as a successful payload holding just the station
/// list. Array entries that are not JSON objects are dropped and counted.
pub fn decode_estaciones_value(value: Value) -> Result<EstacionesPayload> {
    let raw = match value {
        Value::Array(records) => RawEstacionesPayload {
            exito: true,
            total: None,
            estaciones: Some(Value::Array(records)),
            error: None,
        },
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| Error::payload("estaciones", format!("Invalid envelope: {e}")))?,
        other => {
            return Err(Error::payload(
                "estaciones",
                format!("Expected an object or array, found {}", json_kind(&other)),
            ));
        }
    };

    let records = match raw.estaciones {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(records)) => records,
        Some(other) => {
            return Err(Error::payload(
                "estaciones",
                format!("'estaciones' must be an array, found {}", json_kind(&other)),
            ));
        }
    };

    let record_count = records.len();
    let estaciones: Vec<StationObservation> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| decode_station(index, record))
        .collect();
    let dropped_records = record_count - estaciones.len();

    debug!(
        "Decoded estaciones payload: {} records, {} dropped, exito={}",
        record_count, dropped_records, raw.exito
    );

    Ok(EstacionesPayload {
        exito: raw.exito,
        total: raw.total,
        estaciones,
        error: raw.error,
        dropped_records,
    })
}

fn decode_station(index: usize, record: Value) -> Option<StationObservation> {
    if !record.is_object() {
        debug!(
            "Dropping station record {}: expected object, found {}",
            index,
            json_kind(&record)
        );
        return None;
    }
    match serde_json::from_value(record) {
        Ok(station) => Some(station),
        Err(e) => {
            debug!("Dropping station record {}: {}", index, e);
            None
        }
    }
}

/// Decode a `resumen` payload from JSON text
pub fn decode_resumen(json: &str) -> Result<ResumenPayload> {
    serde_json::from_str(json).map_err(|e| Error::json("Invalid resumen payload", e))
}

/// Decode a `pronostico` payload from JSON text
pub fn decode_pronostico(json: &str) -> Result<PronosticoPayload> {
    serde_json::from_str(json).map_err(|e| Error::json("Invalid pronostico payload", e))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read a payload file to a string
async fn read_payload_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))
}

/// Load and decode an `estaciones` payload file
pub async fn load_estaciones(path: &Path) -> Result<EstacionesPayload> {
    let content = read_payload_file(path).await?;
    let payload = decode_estaciones(&content)?;
    info!(
        "Loaded {} station records from {}",
        payload.estaciones.len(),
        path.display()
    );
    Ok(payload)
}

/// Load the station list of an `estaciones` file, failing if the payload is unsuccessful
pub async fn load_stations(path: &Path) -> Result<Vec<StationObservation>> {
    let payload = load_estaciones(path).await?;
    if !payload.exito {
        return Err(Error::payload(
            "estaciones",
            payload
                .error
                .unwrap_or_else(|| "backend reported failure".to_string()),
        ));
    }
    Ok(payload.estaciones)
}

/// Load and decode a `resumen` payload file
pub async fn load_resumen(path: &Path) -> Result<ResumenPayload> {
    decode_resumen(&read_payload_file(path).await?)
}

/// Load and decode a `pronostico` payload file
pub async fn load_pronostico(path: &Path) -> Result<PronosticoPayload> {
    decode_pronostico(&read_payload_file(path).await?)
}

/// The three payloads of one refresh cycle
///
/// A payload whose `exito` flag is false is kept as absent, so the view for
/// it shows placeholders while the others still render.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub pronostico: Option<PronosticoPayload>,
    pub estaciones: Vec<StationObservation>,
    pub resumen: Option<ResumenPayload>,
    pub loaded_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Load `pronostico.json`, `estaciones.json` and `resumen.json` from a directory
    ///
    /// The three files are read concurrently; any missing or undecodable file
    /// fails the whole snapshot.
    pub async fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::file_not_found(dir.display().to_string()));
        }

        let pronostico_path = dir.join(snapshot_files::PRONOSTICO);
        let estaciones_path = dir.join(snapshot_files::ESTACIONES);
        let resumen_path = dir.join(snapshot_files::RESUMEN);

        let (pronostico, estaciones, resumen) = tokio::try_join!(
            load_pronostico(&pronostico_path),
            load_estaciones(&estaciones_path),
            load_resumen(&resumen_path),
        )?;

        let pronostico = pronostico.exito.then_some(pronostico).or_else(|| {
            warn!("pronostico payload reported failure; forecast sections will be empty");
            None
        });

        let estaciones = if estaciones.exito {
            estaciones.estaciones
        } else {
            warn!(
                "estaciones payload reported failure: {}",
                estaciones.error.as_deref().unwrap_or("no details")
            );
            Vec::new()
        };

        let resumen = resumen.exito.then_some(resumen).or_else(|| {
            warn!("resumen payload reported failure; summary cards will show placeholders");
            None
        });

        Ok(Self {
            pronostico,
            estaciones,
            resumen,
            loaded_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::StationId;
    use serde_json::json;

    #[test]
    fn test_decode_estaciones_envelope() {
        let payload = decode_estaciones(
            r#"{
                "exito": true,
                "total": 2,
                "estaciones": [
                    {"id": 1, "nombre": "Estación CENTRO", "temperatura": 24.5, "latitud": -33.3, "longitud": -66.3, "precipitacion": 0.0},
                    {"id": 2, "nombre": "Est. LA TOMA", "temperatura": null}
                ]
            }"#,
        )
        .unwrap();

        assert!(payload.exito);
        assert_eq!(payload.total, Some(2));
        assert_eq!(payload.estaciones.len(), 2);
        assert_eq!(payload.estaciones[0].id, Some(StationId::Number(1)));
        assert_eq!(payload.estaciones[1].temperatura, None);
        assert_eq!(payload.dropped_records, 0);
    }

    #[test]
    fn test_decode_estaciones_drops_non_objects() {
        let payload = decode_estaciones_value(json!({
            "exito": true,
            "estaciones": [{"id": 1, "nombre": "A", "temperatura": 20}, 5, "x", null, []]
        }))
        .unwrap();

        assert_eq!(payload.estaciones.len(), 1);
        assert_eq!(payload.dropped_records, 4);
    }

    #[test]
    fn test_decode_estaciones_bare_array() {
        let payload =
            decode_estaciones_value(json!([{"nombre": "A", "temperatura": 1.5}])).unwrap();
        assert!(payload.exito);
        assert_eq!(payload.estaciones.len(), 1);
    }

    #[test]
    fn test_decode_estaciones_failure_envelope() {
        let payload = decode_estaciones(
            r#"{"exito": false, "error": "timeout", "estaciones": []}"#,
        )
        .unwrap();
        assert!(!payload.exito);
        assert_eq!(payload.error.as_deref(), Some("timeout"));
        assert!(payload.estaciones.is_empty());
    }

    #[test]
    fn test_decode_estaciones_rejects_bad_shapes() {
        assert!(matches!(
            decode_estaciones("42"),
            Err(Error::Payload { .. })
        ));
        assert!(matches!(
            decode_estaciones(r#"{"exito": true, "estaciones": {"id": 1}}"#),
            Err(Error::Payload { .. })
        ));
        assert!(matches!(decode_estaciones("{not json"), Err(Error::Json { .. })));
    }

    #[test]
    fn test_decode_pronostico() {
        let payload = decode_pronostico(
            r#"{
                "exito": true,
                "estado_actual": {"descripcion": "Templado", "cielo": "Cielo despejado", "temperatura": "", "viento": "Viento leve del norte"},
                "pronostico_hoy": {"descripcion": "Caluroso", "temperatura_minima": 18, "temperatura_maxima": 34, "viento": "", "cielo": ""},
                "pronostico_extendido": [
                    {"dia": "Viernes", "fecha": "3 de Enero de 2025", "descripcion": "Inestable", "temperatura_minima": 19, "temperatura_maxima": null}
                ],
                "alerta_meteorologica": {"zona_afectada": "Norte provincial", "horario": null, "descripcion": null},
                "informe_especial": null
            }"#,
        )
        .unwrap();

        assert_eq!(
            payload.pronostico_hoy.as_ref().unwrap().temperatura_maxima,
            Some(34.0)
        );
        assert_eq!(payload.pronostico_extendido.len(), 1);
        assert_eq!(payload.pronostico_extendido[0].temperatura_maxima, None);
        assert_eq!(
            payload
                .alerta_meteorologica
                .as_ref()
                .unwrap()
                .zona_afectada
                .as_deref(),
            Some("Norte provincial")
        );
    }

    #[tokio::test]
    async fn test_load_dir_reads_all_three_payloads() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(snapshot_files::ESTACIONES),
            r#"{"exito": true, "estaciones": [{"id": 1, "nombre": "A", "temperatura": 21}]}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(snapshot_files::PRONOSTICO),
            r#"{"exito": false, "error": "sin pronóstico"}"#,
        )
        .unwrap();
        std::fs::write(
            dir.path().join(snapshot_files::RESUMEN),
            r#"{"exito": true, "total_estaciones": 1, "hay_alerta": false}"#,
        )
        .unwrap();

        let snapshot = DashboardSnapshot::load_dir(dir.path()).await.unwrap();
        assert_eq!(snapshot.estaciones.len(), 1);
        assert!(snapshot.pronostico.is_none());
        assert_eq!(snapshot.resumen.unwrap().resumen.total_estaciones, 1);
    }

    #[tokio::test]
    async fn test_load_estaciones_missing_file() {
        let result = load_estaciones(Path::new("/nonexistent/estaciones.json")).await;
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }
}
