//! Legend command implementation

use super::shared::{CommandStats, load_configuration, setup_logging, swatch, to_json, write_output};
use crate::app::models::Theme;
use crate::app::services::classification::{LegendEntry, legend};
use crate::cli::args::{LegendArgs, OutputFormat};
use crate::Result;
use colored::Colorize;
use std::time::Instant;

/// Legend command runner
pub async fn run_legend(args: LegendArgs) -> Result<CommandStats> {
    let start_time = Instant::now();

    setup_logging(&args.common)?;
    args.common.validate()?;
    let config = load_configuration(&args.common).await?;

    let entries = legend(config.theme);
    let content = match args.common.output_format {
        OutputFormat::Human => render_human(&entries, config.theme),
        OutputFormat::Json => to_json(&entries)?,
    };
    write_output(&content, None).await?;

    Ok(CommandStats {
        stations_output: entries.len(),
        processing_time: start_time.elapsed(),
        ..Default::default()
    })
}

/// One line per band, coldest first
pub fn render_human(entries: &[LegendEntry], theme: Theme) -> String {
    let mut output = format!("{}\n", format!("Temperatura ({theme})").bright_green().bold());
    for entry in entries {
        output.push_str(&format!(
            "  {} {:<8} {:<13} {}\n",
            swatch(entry.color),
            entry.range_label,
            entry.label,
            entry.color.dimmed()
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_human_lists_every_band() {
        let entries = legend(Theme::Dark);
        let rendered = render_human(&entries, Theme::Dark);
        assert_eq!(rendered.lines().count(), 8);
        assert!(rendered.contains("#8b5cf6"));
        assert!(rendered.contains("Muy caliente"));
    }

    #[test]
    fn test_legend_json() {
        let rendered = to_json(&legend(Theme::Light)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[0]["band"], "very-cold");
        assert_eq!(value[0]["rangeLabel"], "<10°");
        assert_eq!(value[6]["color"], "#ee0000");
    }
}
