use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Gender;

// ---------------------------------------------------------------------------
// Warm theme
// ---------------------------------------------------------------------------

pub const HEADER_BG: Color32 = Color32::from_rgb(0xCD, 0x61, 0x55);
pub const PAGE_BG: Color32 = Color32::from_rgb(0xFF, 0xF5, 0xEB);
pub const TITLE: Color32 = Color32::from_rgb(0xB3, 0x33, 0x09);
pub const TEXT: Color32 = Color32::from_rgb(0x55, 0x55, 0x55);
pub const TOTAL_CARD: Color32 = Color32::from_rgb(0xDB, 0x43, 0x25);
pub const COUNT_CARD: Color32 = Color32::from_rgb(0xE6, 0x7E, 0x22);
pub const TREND_LINE: Color32 = Color32::from_rgb(0xDB, 0x43, 0x25);
pub const TREND_MARKER: Color32 = Color32::from_rgb(0xFF, 0x9E, 0x4A);

/// Slice colours of the product-line pie, used in order.
pub const PIE_SEQUENCE: [Color32; 7] = [
    Color32::from_rgb(0xDB, 0x43, 0x25),
    Color32::from_rgb(0xFF, 0x9E, 0x4A),
    Color32::from_rgb(0xFF, 0xC7, 0x5F),
    Color32::from_rgb(0xE6, 0x7E, 0x22),
    Color32::from_rgb(0xB3, 0x33, 0x09),
    Color32::from_rgb(0xFF, 0x57, 0x33),
    Color32::from_rgb(0xCD, 0x61, 0x55),
];

pub fn gender_color(gender: Gender) -> Color32 {
    match gender {
        Gender::Female => Color32::from_rgb(0xFF, 0x9E, 0x4A),
        Gender::Male => Color32::from_rgb(0xDB, 0x43, 0x25),
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// `n` colours with evenly spaced hues inside the red–yellow band.
pub fn generate_warm_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = 5.0 + (i as f32 / n as f32) * 45.0;
            let lightness = if i % 2 == 0 { 0.45 } else { 0.62 };
            let hsl = Hsl::new(hue, 0.80, lightness);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// The fixed sequence first, then generated warm shades for the rest.
pub fn slice_colors(n: usize) -> Vec<Color32> {
    let mut colors: Vec<Color32> = PIE_SEQUENCE.iter().copied().take(n).collect();
    if n > PIE_SEQUENCE.len() {
        colors.extend(generate_warm_palette(n - PIE_SEQUENCE.len()));
    }
    colors
}

// ---------------------------------------------------------------------------
// Color mapping: product line → Color32
// ---------------------------------------------------------------------------

/// Stable colour per product line, so a slice keeps its colour when the
/// filter removes other lines.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut keys: Vec<&str> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        let colors = slice_colors(keys.len());
        ColorMap {
            mapping: keys
                .into_iter()
                .zip(colors)
                .map(|(k, c)| (k.to_string(), c))
                .collect(),
        }
    }

    pub fn color_for(&self, key: &str) -> Color32 {
        self.mapping.get(key).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_sequence_comes_first() {
        let colors = slice_colors(9);
        assert_eq!(colors.len(), 9);
        assert_eq!(&colors[..7], &PIE_SEQUENCE[..]);
    }

    #[test]
    fn color_map_is_independent_of_input_order() {
        let a = ColorMap::new(["Sports", "Food", "Health", "Food"]);
        let b = ColorMap::new(["Health", "Sports", "Food"]);
        for key in ["Sports", "Food", "Health"] {
            assert_eq!(a.color_for(key), b.color_for(key));
        }
        assert_eq!(a.color_for("Food"), PIE_SEQUENCE[0]);
        assert_eq!(a.color_for("Unknown"), Color32::GRAY);
    }
}
