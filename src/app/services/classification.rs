//! Temperature classification and theme-aware colours
//!
//! Band boundaries are theme-independent; only the band-to-colour mapping
//! depends on the theme. Everything here is a pure function, so chart bars,
//! map markers and legend swatches all resolve the same colour for the same
//! temperature.

use crate::app::models::{ColorBand, Theme};
use crate::constants::{DARK_PALETTE, LIGHT_PALETTE, band_bounds};
use serde::Serialize;

/// Band-to-colour mapping for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    theme: Theme,
    colors: &'static [&'static str; 7],
}

impl Palette {
    /// Hex colour for a band
    pub fn color(&self, band: ColorBand) -> &'static str {
        self.colors[band.index()]
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Iterate (band, colour) pairs coldest first
    pub fn iter(&self) -> impl Iterator<Item = (ColorBand, &'static str)> + '_ {
        ColorBand::ALL.iter().map(|&band| (band, self.color(band)))
    }
}

/// One legend swatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub band: ColorBand,
    pub color: &'static str,
    pub range_label: &'static str,
    pub label: &'static str,
}

/// Classify a temperature (°C) into one of the seven bands
///
/// Lower bounds are inclusive: `classify(10.0)` is cold, `classify(35.0)` is
/// very-hot. A NaN compares false against every bound and lands in very-cold;
/// the normalizer never passes one.
pub fn classify(temperature: f64) -> ColorBand {
    if temperature >= band_bounds::VERY_HOT {
        ColorBand::VeryHot
    } else if temperature >= band_bounds::HOT {
        ColorBand::Hot
    } else if temperature >= band_bounds::WARM {
        ColorBand::Warm
    } else if temperature >= band_bounds::MILD {
        ColorBand::Mild
    } else if temperature >= band_bounds::COOL {
        ColorBand::Cool
    } else if temperature >= band_bounds::COLD {
        ColorBand::Cold
    } else {
        ColorBand::VeryCold
    }
}

/// Palette for a theme
pub fn palette_for(theme: Theme) -> Palette {
    let colors = match theme {
        Theme::Light => &LIGHT_PALETTE,
        Theme::Dark => &DARK_PALETTE,
    };
    Palette { theme, colors }
}

/// Colour of a temperature under a theme
pub fn color_for(temperature: f64, theme: Theme) -> &'static str {
    palette_for(theme).color(classify(temperature))
}

/// Legend swatches for a theme, coldest first
pub fn legend(theme: Theme) -> Vec<LegendEntry> {
    palette_for(theme)
        .iter()
        .map(|(band, color)| LegendEntry {
            band,
            color,
            range_label: band.range_label(),
            label: band.label(),
        })
        .collect()
}

/// Parse a `#rrggbb` colour into its components
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}
