//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canvas geometry and background.
///
/// The canvas has a fixed size for the whole session; the export image always
/// has exactly these dimensions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Canvas height in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Blank-canvas color; the eraser paints with it
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background: default_background(),
        }
    }
}

/// Brush defaults applied when a session starts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial brush color - a named color (black, white, green, yellow, red, blue),
    /// a `#rrggbb` string, or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Initial brush width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_width")]
    pub default_width: f64,

    /// Widths selected by the four brush size shortcuts, smallest first
    #[serde(default = "default_width_presets")]
    pub width_presets: [f64; 4],
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
            width_presets: default_width_presets(),
        }
    }
}

/// Where and how the canvas is saved.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory for saves without an explicit path (`~` is expanded)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Filename template for saves without an explicit path (chrono format specifiers)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Format for generated filenames: "png" or "jpg"
    #[serde(default = "default_export_format")]
    pub format: String,

    /// JPEG quality (valid range: 1 - 100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
            format: default_export_format(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    600
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_width() -> f64 {
    2.0
}

fn default_width_presets() -> [f64; 4] {
    [4.0, 7.0, 9.0, 12.0]
}

fn default_export_directory() -> String {
    dirs::picture_dir()
        .map(|dir| dir.join("Whiteboard").to_string_lossy().into_owned())
        .unwrap_or_else(|| "~/Pictures/Whiteboard".to_string())
}

fn default_filename_template() -> String {
    "whiteboard_%Y-%m-%d_%H%M%S".to_string()
}

fn default_export_format() -> String {
    "png".to_string()
}

fn default_jpeg_quality() -> u8 {
    90
}
