//! Configuration file support for whiteboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/whiteboard/config.toml`. Settings include the canvas size and
//! background, brush defaults, export preferences and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{CanvasConfig, DrawingConfig, ExportConfig};

use crate::export::{ExportOptions, ImageFormat};
use crate::session::{BrushState, CanvasSettings};
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Smallest and largest brush widths accepted from config and width shortcuts.
pub const MIN_BRUSH_WIDTH: f64 = 1.0;
pub const MAX_BRUSH_WIDTH: f64 = 50.0;

const MAX_CANVAS_DIMENSION: u32 = 8192;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 800
/// height = 600
/// background = "white"
///
/// [drawing]
/// default_color = "black"
/// default_width = 2.0
/// width_presets = [4.0, 7.0, 9.0, 12.0]
///
/// [export]
/// format = "png"
///
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Canvas geometry and background color
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Brush defaults (color, width, width presets)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Save location and encoder settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by a default)
    /// and a warning is logged.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 1 - 8192
    /// - `drawing.default_width` and each preset: 1.0 - 50.0
    /// - `export.jpeg_quality`: 1 - 100
    /// - `export.format`: png, jpg or jpeg
    pub fn validate_and_clamp(&mut self) {
        if !(1..=MAX_CANVAS_DIMENSION).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 1-{} range",
                self.canvas.width,
                MAX_CANVAS_DIMENSION
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_CANVAS_DIMENSION);
        }

        if !(1..=MAX_CANVAS_DIMENSION).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 1-{} range",
                self.canvas.height,
                MAX_CANVAS_DIMENSION
            );
            self.canvas.height = self.canvas.height.clamp(1, MAX_CANVAS_DIMENSION);
        }

        self.drawing.default_width = clamp_width("default_width", self.drawing.default_width);
        for (i, preset) in self.drawing.width_presets.iter_mut().enumerate() {
            *preset = clamp_width(&format!("width_presets[{i}]"), *preset);
        }

        if !(1..=100).contains(&self.export.jpeg_quality) {
            log::warn!(
                "Invalid jpeg_quality {}, clamping to 1-100 range",
                self.export.jpeg_quality
            );
            self.export.jpeg_quality = self.export.jpeg_quality.clamp(1, 100);
        }

        if ImageFormat::from_extension(&self.export.format).is_none() {
            log::warn!(
                "Invalid export format '{}', falling back to 'png'",
                self.export.format
            );
            self.export.format = "png".to_string();
        }

        if self.canvas.background.try_to_color().is_none() {
            log::warn!(
                "Invalid canvas background {:?}, falling back to white",
                self.canvas.background
            );
            self.canvas.background = ColorSpec::Name("white".to_string());
        }
    }

    /// Canvas settings for a new session.
    pub fn canvas_settings(&self) -> CanvasSettings {
        CanvasSettings {
            width: self.canvas.width,
            height: self.canvas.height,
            background: self.canvas.background.to_color(),
        }
    }

    /// Initial brush for a new session.
    pub fn brush_state(&self) -> BrushState {
        BrushState::new(
            self.drawing.default_color.to_color(),
            self.drawing.default_width,
        )
    }

    /// Encoder settings for saving.
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            jpeg_quality: self.export.jpeg_quality,
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/whiteboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("whiteboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to `path`.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path and `overwrite` is false
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file(path: &Path, overwrite: bool) -> Result<()> {
        if path.exists() && !overwrite {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        fs::write(path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    /// Serializes the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

/// Commented example configuration shipped with the binary.
pub const EXAMPLE_CONFIG: &str = include_str!("../../config.example.toml");

fn clamp_width(field: &str, width: f64) -> f64 {
    if width.is_nan() {
        log::warn!("Invalid {field} (NaN), using {MIN_BRUSH_WIDTH:.1}");
        return MIN_BRUSH_WIDTH;
    }
    if !(MIN_BRUSH_WIDTH..=MAX_BRUSH_WIDTH).contains(&width) {
        log::warn!(
            "Invalid {field} {:.1}, clamping to {:.1}-{:.1} range",
            width,
            MIN_BRUSH_WIDTH,
            MAX_BRUSH_WIDTH
        );
        return width.clamp(MIN_BRUSH_WIDTH, MAX_BRUSH_WIDTH);
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, WHITE};

    #[test]
    fn defaults_match_classic_paint_window() {
        let config = Config::default();
        let canvas = config.canvas_settings();
        assert_eq!((canvas.width, canvas.height), (800, 600));
        assert_eq!(canvas.background, WHITE);

        let brush = config.brush_state();
        assert_eq!(brush.color(), BLACK);
        assert_eq!(brush.width(), 2.0);
        assert_eq!(config.drawing.width_presets, [4.0, 7.0, 9.0, 12.0]);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [canvas]
            width = 1024

            [drawing]
            default_color = [255, 0, 0]
            "#,
        )
        .unwrap();

        assert_eq!(config.canvas.width, 1024);
        assert_eq!(config.canvas.height, 600);
        assert_eq!(config.drawing.default_color, ColorSpec::Rgb([255, 0, 0]));
        assert_eq!(config.drawing.default_width, 2.0);
        assert_eq!(config.keybindings.undo, vec!["Ctrl+Z".to_string()]);
    }

    #[test]
    fn validate_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.canvas.width = 0;
        config.canvas.height = 100_000;
        config.drawing.default_width = 400.0;
        config.drawing.width_presets = [0.5, 7.0, f64::NAN, 60.0];
        config.export.jpeg_quality = 0;
        config.export.format = "tiff".to_string();
        config.canvas.background = ColorSpec::Name("not-a-color".to_string());

        config.validate_and_clamp();

        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.canvas.height, MAX_CANVAS_DIMENSION);
        assert_eq!(config.drawing.default_width, MAX_BRUSH_WIDTH);
        assert_eq!(config.drawing.width_presets, [1.0, 7.0, 1.0, 50.0]);
        assert_eq!(config.export.jpeg_quality, 1);
        assert_eq!(config.export.format, "png");
        assert_eq!(config.canvas_settings().background, WHITE);
    }

    #[test]
    fn load_from_reads_and_validates_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[drawing]\ndefault_width = 0.0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.drawing.default_width, MIN_BRUSH_WIDTH);
    }

    #[test]
    fn load_from_reports_parse_errors() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[canvas\nwidth = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config"));
    }

    #[test]
    fn example_config_parses_and_builds_action_map() {
        let config: Config = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config.canvas.width, 800);
        config.keybindings.build_action_map().unwrap();
    }

    #[test]
    fn create_default_file_refuses_to_overwrite() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        Config::create_default_file(&path, false).unwrap();
        assert!(path.exists());
        assert!(Config::create_default_file(&path, false).is_err());
        Config::create_default_file(&path, true).unwrap();
    }

    #[test]
    fn config_serializes_back_to_toml() {
        let text = Config::default().to_toml().unwrap();
        let reparsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(reparsed.canvas.width, 800);
    }
}
