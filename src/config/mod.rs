//! Configuration file support for midisketch.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/midisketch/config.toml`. Settings include drawing defaults,
//! the MIDI controller channel, canvas size, export quality, and UI variant knobs.
//!
//! If no config file exists, defaults are used.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{CanvasConfig, ControllerConfig, DrawingConfig, ExportConfig, UiConfig};

use crate::controller::{MAX_WIDTH, MIN_WIDTH};
use crate::draw::{CanvasRegion, Color, WHITE};
use crate::export::{ExportFormat, FileSaveConfig, MAX_SUPERSAMPLE_FACTOR, file::expand_tilde};
use crate::input::SessionSettings;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const MAX_CANVAS_SIDE: u32 = 16_384;
const MAX_QUEUE_CAPACITY: usize = 4096;

/// The knobs that distinguish the plain and themed front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppVariant {
    pub themed_buttons: bool,
    pub color_picker: bool,
    /// Linear supersampling applied on export, always >= 1
    pub supersample_factor: u32,
}

impl Default for AppVariant {
    fn default() -> Self {
        Self {
            themed_buttons: false,
            color_picker: false,
            supersample_factor: 1,
        }
    }
}

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "black"
/// default_width = 5.0
///
/// [controller]
/// device_name = "MIDI Expression RED 3"
/// channel = 4
///
/// [canvas]
/// width = 800
/// height = 600
///
/// [export]
/// supersample_factor = 2
///
/// [ui]
/// themed_buttons = true
/// color_picker = true
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Starting tool state
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// MIDI controller input
    #[serde(default)]
    pub controller: ControllerConfig,

    /// Canvas size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Image export
    #[serde(default)]
    pub export: ExportConfig,

    /// Front-end variant
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_width`: 1.0 - 30.0
    /// - `controller.channel`: 0 - 15
    /// - `controller.queue_capacity`: 1 - 4096
    /// - `canvas.width` / `canvas.height`: 1 - 16384
    /// - `export.supersample_factor`: 1 - 8
    /// - `export.format`: any extension an encoder can write, else `png`
    fn validate_and_clamp(&mut self) {
        let width = self.drawing.default_width;
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            let clamped = crate::controller::clamp_width(width);
            warn!("Invalid default_width {width:.1}, clamping to 1.0-30.0 range");
            self.drawing.default_width = clamped;
        }

        if self.drawing.default_color.resolve().is_none() {
            warn!(
                "Unknown default_color {:?}, falling back to black",
                self.drawing.default_color
            );
            self.drawing.default_color = ColorSpec::Name("black".to_string());
        }

        if self.controller.channel > 15 {
            warn!(
                "Invalid controller channel {}, clamping to 0-15 range",
                self.controller.channel
            );
            self.controller.channel = 15;
        }

        if !(1..=MAX_QUEUE_CAPACITY).contains(&self.controller.queue_capacity) {
            warn!(
                "Invalid queue_capacity {}, clamping to 1-{MAX_QUEUE_CAPACITY} range",
                self.controller.queue_capacity
            );
            self.controller.queue_capacity =
                self.controller.queue_capacity.clamp(1, MAX_QUEUE_CAPACITY);
        }

        for (name, side) in [
            ("width", &mut self.canvas.width),
            ("height", &mut self.canvas.height),
        ] {
            if !(1..=MAX_CANVAS_SIDE).contains(side) {
                warn!("Invalid canvas {name} {side}, clamping to 1-{MAX_CANVAS_SIDE} range");
                *side = (*side).clamp(1, MAX_CANVAS_SIDE);
            }
        }

        if self.canvas.background.resolve().is_none() {
            warn!(
                "Unknown canvas background {:?}, falling back to white",
                self.canvas.background
            );
            self.canvas.background = ColorSpec::Name("white".to_string());
        }

        if !(1..=MAX_SUPERSAMPLE_FACTOR).contains(&self.export.supersample_factor) {
            warn!(
                "Invalid supersample_factor {}, clamping to 1-{MAX_SUPERSAMPLE_FACTOR} range",
                self.export.supersample_factor
            );
            self.export.supersample_factor = self
                .export
                .supersample_factor
                .clamp(1, MAX_SUPERSAMPLE_FACTOR);
        }

        if ExportFormat::from_extension(&self.export.format).is_none() {
            warn!(
                "Unsupported export format '{}', falling back to 'png'",
                self.export.format
            );
            self.export.format = "png".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("midisketch");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from `config_path`.
    ///
    /// A missing file yields defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses TOML text and validates it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(text)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Saves the current configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file, for editors and tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    pub fn variant(&self) -> AppVariant {
        AppVariant {
            themed_buttons: self.ui.themed_buttons,
            color_picker: self.ui.color_picker,
            supersample_factor: self.export.supersample_factor.max(1),
        }
    }

    pub fn canvas_region(&self) -> CanvasRegion {
        CanvasRegion::new(self.canvas.width, self.canvas.height)
    }

    pub fn background(&self) -> Color {
        self.canvas.background.resolve().unwrap_or(WHITE)
    }

    /// Startup parameters for a drawing session built from this config.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            color: self.drawing.default_color.to_color(),
            width: self.drawing.default_width,
            controller_channel: self.controller.channel,
            region: self.canvas_region(),
            color_picker: self.ui.color_picker,
        }
    }

    pub fn file_save_config(&self) -> FileSaveConfig {
        FileSaveConfig {
            save_directory: expand_tilde(&self.export.save_directory),
            filename_template: self.export.filename_template.clone(),
            format: self.export.format.to_lowercase(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, PURPLE};

    #[test]
    fn empty_file_yields_defaults() {
        let config = Config::from_toml("").unwrap();
        let settings = config.session_settings();
        assert_eq!(settings.color, BLACK);
        assert_eq!(settings.width, 5.0);
        assert_eq!(settings.controller_channel, 4);
        assert_eq!(settings.region, CanvasRegion::new(800, 600));
        assert_eq!(config.variant(), AppVariant::default());
        assert_eq!(config.background(), WHITE);
        assert!(config.controller.enabled);
        assert!(config.controller.device_name.is_none());
    }

    #[test]
    fn parses_all_sections() {
        let config = Config::from_toml(
            r##"
            [drawing]
            default_color = "purple"
            default_width = 12.5

            [controller]
            device_name = "MIDI Expression RED 3"
            channel = 2

            [canvas]
            width = 320
            height = 240
            background = "#000000"

            [export]
            supersample_factor = 2

            [ui]
            themed_buttons = true
            color_picker = true
            "##,
        )
        .unwrap();

        assert_eq!(config.drawing.default_color.to_color(), PURPLE);
        assert_eq!(config.drawing.default_width, 12.5);
        assert_eq!(
            config.controller.device_name.as_deref(),
            Some("MIDI Expression RED 3")
        );
        assert_eq!(config.canvas_region(), CanvasRegion::new(320, 240));
        assert_eq!(config.background(), BLACK);
        assert_eq!(
            config.variant(),
            AppVariant {
                themed_buttons: true,
                color_picker: true,
                supersample_factor: 2,
            }
        );
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml(
            r#"
            [drawing]
            default_width = 99.0
            default_color = "mauve"

            [controller]
            channel = 40
            queue_capacity = 0

            [canvas]
            width = 0
            height = 100000

            [export]
            supersample_factor = 0
            format = "docx"
            "#,
        )
        .unwrap();

        assert_eq!(config.drawing.default_width, 30.0);
        assert_eq!(config.drawing.default_color, ColorSpec::Name("black".into()));
        assert_eq!(config.controller.channel, 15);
        assert_eq!(config.controller.queue_capacity, 1);
        assert_eq!(config.canvas_region(), CanvasRegion::new(1, 16_384));
        assert_eq!(config.export.supersample_factor, 1);
        assert_eq!(config.export.format, "png");
    }

    #[test]
    fn other_writable_formats_are_kept() {
        let config = Config::from_toml("[export]\nformat = \"jpg\"\n").unwrap();
        assert_eq!(config.file_save_config().format, "jpg");
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("[drawing\ndefault_width = ").is_err());
    }

    #[test]
    fn load_from_missing_file_uses_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.canvas.width, 800);
    }

    #[test]
    fn load_from_reads_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[export]\nsupersample_factor = 3\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.variant().supersample_factor, 3);
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("supersample_factor"));
        assert!(schema.contains("channel"));
    }
}
