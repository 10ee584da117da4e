//! Color-name helpers shared by the config loader and the input layer.
//!
//! The palette is the six fixed colors offered by the color shortcuts:
//! black, white, green, yellow, red and blue.

use crate::draw::{Color, color::*};

const PALETTE: [(&str, Color); 6] = [
    ("Black", BLACK),
    ("White", WHITE),
    ("Green", GREEN),
    ("Yellow", YELLOW),
    ("Red", RED),
    ("Blue", BLUE),
];

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "black", "white", "green", "yellow", "red", "blue"
///
/// # Returns
/// - `Some(Color)` if the name matches a palette color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    let name = name.trim();
    PALETTE
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, color)| *color)
}

/// Maps a Color value to its palette name.
///
/// Colors are compared at 8-bit precision, so a color that went through the
/// raster or a hex string still matches. Anything else is "Custom".
pub fn color_to_name(color: &Color) -> &'static str {
    let rgb = color.to_rgb8();
    PALETTE
        .iter()
        .find(|(_, known)| known.to_rgb8() == rgb)
        .map(|(name, _)| *name)
        .unwrap_or("Custom")
}
