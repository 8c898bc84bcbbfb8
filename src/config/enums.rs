//! Configuration enum types.

use crate::draw::{BLACK, Color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a palette name, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named palette color
/// default_color = "purple"
///
/// # Hex, as returned by a color chooser
/// default_color = "#336699"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Palette name (black, red, green, blue, yellow, orange, purple, white) or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves the specification, or `None` for an unknown name.
    pub fn resolve(&self) -> Option<Color> {
        match self {
            ColorSpec::Name(name) if name.trim_start().starts_with('#') => Color::from_hex(name),
            ColorSpec::Name(name) => crate::util::name_to_color(name),
            ColorSpec::Rgb([r, g, b]) => Some(Color::from_rgb8(*r, *g, *b)),
        }
    }

    /// Whether this is a free-form color rather than a palette entry.
    pub fn is_free_form(&self) -> bool {
        !matches!(self, ColorSpec::Name(name) if !name.trim_start().starts_with('#'))
    }

    /// Converts to a [`Color`], falling back to black for unknown names.
    pub fn to_color(&self) -> Color {
        self.resolve().unwrap_or_else(|| {
            warn!("Unknown color {:?}, using black", self);
            BLACK
        })
    }
}
