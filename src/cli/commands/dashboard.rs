//! Dashboard command implementation
//!
//! Renders one refresh cycle of the dashboard from a snapshot directory:
//! summary cards, alert banner, featured station, temperature chart and map
//! markers.

use super::shared::{
    CommandStats, create_spinner, format_station_row, load_configuration, setup_logging, swatch,
    to_json, write_output,
};
use crate::app::models::{NormalizedStation, PronosticoPayload, StationObservation, Summary};
use crate::app::services::classification::classify;
use crate::app::services::payload::DashboardSnapshot;
use crate::app::services::station_lookup::{find_station_by_name, map_markers};
use crate::app::services::station_normalizer::{StationNormalizer, clean_name, top_n};
use crate::app::services::summary::{format_temperature, summarize};
use crate::cli::args::{DashboardArgs, OutputFormat};
use crate::config::{Config, NormalizerConfig};
use crate::Result;
use colored::Colorize;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Everything one dashboard render needs
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub summary: Summary,
    pub pronostico: Option<PronosticoPayload>,
    pub featured: Option<StationObservation>,
    pub chart: Vec<NormalizedStation>,
    pub markers: Vec<NormalizedStation>,
    pub hot_day: bool,
}

impl DashboardView {
    /// Build the view from a snapshot
    ///
    /// The summary comes from the `resumen` payload when it was successful and
    /// is computed from the station list otherwise.
    pub fn build(snapshot: &DashboardSnapshot, config: &Config) -> Self {
        let summary = match &snapshot.resumen {
            Some(resumen) => resumen.resumen.clone(),
            None => {
                debug!("No resumen payload, computing summary from stations");
                summarize(&snapshot.estaciones, snapshot.pronostico.as_ref())
            }
        };

        let featured =
            find_station_by_name(&config.dashboard.featured_station, &snapshot.estaciones).cloned();
        if featured.is_none() {
            warn!(
                "Featured station '{}' not found in feed",
                config.dashboard.featured_station
            );
        }

        // One run over every station; the chart is its head, the map its plottable subset
        let normalizer = StationNormalizer::new(
            NormalizerConfig {
                max_items: snapshot.estaciones.len(),
                ranking: config.normalizer.ranking,
            },
            config.theme,
        );
        let stations = normalizer.normalize(&snapshot.estaciones);
        let markers: Vec<NormalizedStation> =
            map_markers(&stations).into_iter().cloned().collect();
        let chart = top_n(stations, config.dashboard.chart_max_items);

        Self {
            hot_day: summary.is_hot_day(config.dashboard.hot_day_threshold),
            summary,
            pronostico: snapshot.pronostico.clone(),
            featured,
            chart,
            markers,
        }
    }

    /// Human-readable dashboard
    pub fn render_human(&self) -> String {
        let mut output = format!(
            "{}\n{}\n",
            "Monitor de Temperatura".bright_green().bold(),
            "=".repeat(40)
        );

        if let Some(alert) = self
            .pronostico
            .as_ref()
            .and_then(|p| p.alerta_meteorologica.as_ref())
        {
            output.push_str(&format!(
                "{} {}\n",
                "⚠ Alerta meteorológica:".bright_red().bold(),
                alert.zona_afectada.as_deref().unwrap_or("zona no informada")
            ));
            if let Some(horario) = &alert.horario {
                output.push_str(&format!("  {horario}\n"));
            }
            if let Some(descripcion) = &alert.descripcion {
                output.push_str(&format!("  {descripcion}\n"));
            }
            output.push('\n');
        }

        let maxima = format!("{}°", format_temperature(self.summary.temperatura_maxima));
        output.push_str(&format!(
            "  {} {}°   {} {}   {} {}°   {} {}°\n   ({} estaciones)\n\n",
            "Mínima:".bright_cyan(),
            format_temperature(self.summary.temperatura_minima),
            "Máxima:".bright_cyan(),
            if self.hot_day {
                maxima.bright_red().bold()
            } else {
                maxima.normal()
            },
            "Promedio:".bright_cyan(),
            format_temperature(self.summary.temperatura_promedio),
            "Rango actual:".bright_cyan(),
            self.summary.current_range(),
            self.summary.total_estaciones
        ));

        if let Some(pronostico) = &self.pronostico {
            if let Some(actual) = &pronostico.estado_actual {
                output.push_str(&format!(
                    "{} {} {}\n",
                    "Estado actual:".bright_yellow(),
                    actual.descripcion,
                    actual.cielo.dimmed()
                ));
            }
            if let Some(hoy) = &pronostico.pronostico_hoy {
                output.push_str(&format!(
                    "{} {}\n",
                    "Pronóstico hoy:".bright_yellow(),
                    hoy.descripcion
                ));
            }
        }

        match &self.featured {
            Some(station) => output.push_str(&format!(
                "{} {} {}°C\n\n",
                "Destacada:".bright_yellow(),
                clean_name(station.name()).bright_white().bold(),
                format_temperature(station.finite_temperature())
            )),
            None => output.push_str(&format!("{} --\n\n", "Destacada:".bright_yellow())),
        }

        output.push_str(&format!("{}\n", "Temperaturas".bright_green().bold()));
        for (index, station) in self.chart.iter().enumerate() {
            output.push_str(&format_station_row(index + 1, station));
            output.push('\n');
        }

        output.push_str(&format!(
            "\n{} {}\n",
            "Mapa:".bright_green().bold(),
            format!("{} estaciones con ubicación", self.markers.len()).dimmed()
        ));
        for station in &self.markers {
            if let Some((lat, lon)) = station.observation.location() {
                output.push_str(&format!(
                    "  {} {:<32} {:>8.4} {:>9.4}\n",
                    swatch(station.color),
                    station.display_name,
                    lat,
                    lon
                ));
            }
        }

        if let Some(pronostico) = &self.pronostico {
            if !pronostico.pronostico_extendido.is_empty() {
                output.push_str(&format!("\n{}\n", "Pronóstico extendido".bright_green().bold()));
                for day in &pronostico.pronostico_extendido {
                    output.push_str(&format!(
                        "  {:<10} {:>4}° / {:>4}°  {}\n",
                        day.dia,
                        format_temperature(day.temperatura_minima),
                        format_temperature(day.temperatura_maxima),
                        day.descripcion
                    ));
                }
            }
        }

        output
    }

    /// Dashboard as JSON
    pub fn render_json(&self) -> Result<String> {
        let featured = self.featured.as_ref().map(|station| {
            json!({
                "displayName": clean_name(station.name()),
                "colorBand": station.finite_temperature().map(classify),
                "estacion": station,
            })
        });
        let document = json!({
            "resumen": self.summary,
            "diaCaluroso": self.hot_day,
            "pronostico": self.pronostico,
            "destacada": featured,
            "grafico": self.chart,
            "mapa": self.markers,
        });
        to_json(&document)
    }
}

/// Dashboard command runner
pub async fn run_dashboard(args: DashboardArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    info!("Rendering dashboard from {}", args.dir.display());
    debug!("Dashboard arguments: {:?}", args);

    args.validate()?;
    let mut config = load_configuration(&args.common).await?;
    if let Some(chart_items) = args.chart_items {
        config.dashboard.chart_max_items = chart_items;
    }
    if let Some(featured) = &args.featured {
        config = config.with_featured_station(featured.clone());
    }
    config.validate()?;

    let spinner = args
        .common
        .show_progress()
        .then(|| create_spinner("Loading snapshot..."));
    let snapshot = DashboardSnapshot::load_dir(&args.dir).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    let snapshot = snapshot?;

    let view = DashboardView::build(&snapshot, &config);
    let content = match args.common.output_format {
        OutputFormat::Human => view.render_human(),
        OutputFormat::Json => view.render_json()?,
    };
    write_output(&content, None).await?;

    Ok(CommandStats {
        stations_loaded: snapshot.estaciones.len(),
        stations_output: view.chart.len(),
        refreshes: 1,
        processing_time: start_time.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{ResumenPayload, StationId, TodayForecast, WeatherAlert};
    use chrono::Utc;

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot {
            pronostico: Some(PronosticoPayload {
                exito: true,
                pronostico_hoy: Some(TodayForecast {
                    descripcion: "Caluroso".to_string(),
                    temperatura_minima: Some(19.0),
                    temperatura_maxima: Some(32.0),
                    ..Default::default()
                }),
                alerta_meteorologica: Some(WeatherAlert {
                    zona_afectada: Some("Norte".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            estaciones: vec![
                StationObservation::new(
                    Some(StationId::Number(1)),
                    "Estación Aeropuerto San Luis",
                    Some(27.0),
                )
                .with_location(-33.27, -66.35),
                StationObservation::new(Some(StationId::Number(2)), "Est. MERLO", Some(22.0)),
                StationObservation::new(Some(StationId::Number(3)), "La Toma", Some(30.5))
                    .with_location(-33.05, -65.62),
            ],
            resumen: None,
            loaded_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_computes_missing_summary() {
        let view = DashboardView::build(&snapshot(), &Config::default());

        assert_eq!(view.summary.total_estaciones, 3);
        assert_eq!(view.summary.temperatura_maxima, Some(32.0));
        assert!(view.summary.hay_alerta);
        assert!(view.hot_day);
        assert_eq!(view.chart[0].display_name, "La Toma");
        assert_eq!(view.markers.len(), 2);
        assert_eq!(
            view.featured.as_ref().map(StationObservation::name),
            Some("Estación Aeropuerto San Luis")
        );
    }

    #[test]
    fn test_build_prefers_resumen_payload() {
        let mut snapshot = snapshot();
        snapshot.resumen = Some(ResumenPayload {
            exito: true,
            resumen: Summary {
                temperatura_promedio: Some(11.1),
                total_estaciones: 40,
                ..Default::default()
            },
            error: None,
        });

        let config = Config::default().with_featured_station("nowhere");
        let view = DashboardView::build(&snapshot, &config);
        assert_eq!(view.summary.total_estaciones, 40);
        assert!(!view.hot_day);
        assert!(view.featured.is_none());
    }

    #[test]
    fn test_chart_respects_chart_items() {
        let mut config = Config::default();
        config.dashboard.chart_max_items = 1;
        let view = DashboardView::build(&snapshot(), &config);
        assert_eq!(view.chart.len(), 1);
        assert_eq!(view.markers.len(), 2);
    }

    #[test]
    fn test_render_outputs() {
        let view = DashboardView::build(&snapshot(), &Config::default());
        let human = view.render_human();
        assert!(human.contains("Alerta"));
        assert!(human.contains("Merlo"));

        let value: serde_json::Value = serde_json::from_str(&view.render_json().unwrap()).unwrap();
        assert_eq!(value["diaCaluroso"], true);
        assert_eq!(value["grafico"].as_array().unwrap().len(), 3);
        assert_eq!(value["destacada"]["displayName"], "Aeropuerto San Luis");
    }
}
