//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::controller::{DEFAULT_CHANNEL, DEFAULT_QUEUE_CAPACITY, DEFAULT_WIDTH};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the tool state a session starts with. Width changes at runtime
/// come only from the MIDI controller.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Starting pen color - a palette name, `#rrggbb`, or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Starting line width in pixels (valid range: 1.0 - 30.0)
    #[serde(default = "default_width")]
    pub default_width: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
        }
    }
}

/// MIDI controller settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ControllerConfig {
    /// Listen for a controller at all
    #[serde(default = "default_controller_enabled")]
    pub enabled: bool,

    /// Input port to open; the first available port when unset
    #[serde(default)]
    pub device_name: Option<String>,

    /// Zero-based channel whose aftertouch drives the width (valid range: 0 - 15)
    #[serde(default = "default_channel")]
    pub channel: u8,

    /// Messages buffered between the MIDI thread and the session (valid range: 1 - 4096)
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            enabled: default_controller_enabled(),
            device_name: None,
            channel: default_channel(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// Canvas dimensions and background.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Canvas height in pixels (valid range: 1 - 16384)
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Background fill
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

/// Image export settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Render at this linear scale and downsample for smoother edges (valid range: 1 - 8).
    /// The written image always has the canvas dimensions.
    #[serde(default = "default_supersample_factor")]
    pub supersample_factor: u32,

    /// Directory for exports without an explicit path (supports ~)
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Filename template with chrono format specifiers
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Image format extension for exports without an explicit path (png, jpg, bmp, tiff, ...)
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            supersample_factor: default_supersample_factor(),
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
            format: default_format(),
        }
    }
}

/// UI variant knobs.
///
/// Front ends use these to pick between plain and themed controls; the
/// session itself only looks at `color_picker`.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct UiConfig {
    /// Use themed (flat, padded) buttons instead of plain ones
    #[serde(default)]
    pub themed_buttons: bool,

    /// Offer a free-form color chooser next to the palette
    #[serde(default)]
    pub color_picker: bool,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_width() -> f64 {
    DEFAULT_WIDTH
}

fn default_controller_enabled() -> bool {
    true
}

fn default_channel() -> u8 {
    DEFAULT_CHANNEL
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    600
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_supersample_factor() -> u32 {
    1
}

fn default_save_directory() -> String {
    "~/Pictures/midisketch".to_string()
}

fn default_filename_template() -> String {
    "sketch_%Y-%m-%d_%H%M%S".to_string()
}

fn default_format() -> String {
    "png".to_string()
}
