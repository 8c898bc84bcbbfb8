//! RGB color type and the fixed swatch palette.

use serde::{Deserialize, Serialize};

/// An opaque RGB color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use midisketch::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0 };
/// assert_eq!(Color::from_hex("#ff0000"), Some(red));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
}

impl Default for Color {
    fn default() -> Self {
        BLACK
    }
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Parses `#rrggbb` or `#rgb`, the formats a color chooser hands back.
    ///
    /// The leading `#` is optional. Returns `None` for anything else.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some(Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
            }
            3 => {
                let channel = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .ok()
                        .map(|v| v * 17)
                };
                Some(Self::from_rgb8(channel(0)?, channel(1)?, channel(2)?))
            }
            _ => None,
        }
    }

    /// Returns the color as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn to_rgb8(&self) -> [u8; 3] {
        let quantize = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

// ============================================================================
// Palette swatches (Tk / CSS named color values)
// ============================================================================

pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

pub const RED: Color = Color::new(1.0, 0.0, 0.0);

/// CSS green (#008000), not the full-intensity X11 green.
pub const GREEN: Color = Color::new(0.0, 128.0 / 255.0, 0.0);

pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);

pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);

/// #FFA500
pub const ORANGE: Color = Color::new(1.0, 165.0 / 255.0, 0.0);

/// #800080
pub const PURPLE: Color = Color::new(128.0 / 255.0, 0.0, 128.0 / 255.0);

/// Canvas background.
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

/// The seven swatches offered by the palette row, in display order.
pub const PALETTE: [(&str, Color); 7] = [
    ("black", BLACK),
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("yellow", YELLOW),
    ("orange", ORANGE),
    ("purple", PURPLE),
];

/// Looks up a palette swatch by its position in the row.
pub fn palette_swatch(index: usize) -> Option<Color> {
    PALETTE.get(index).map(|(_, color)| *color)
}
