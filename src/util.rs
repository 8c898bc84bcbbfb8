//! Color-name lookups and pixel-rectangle helpers.

use crate::draw::{Color, color::*};

// ============================================================================
// Color Names
// ============================================================================

/// Maps a color name to a palette value (case-insensitive).
///
/// Accepts the seven swatch names plus "white", which is only used as a
/// background color.
pub fn name_to_color(name: &str) -> Option<Color> {
    let lowered = name.trim().to_lowercase();
    if lowered == "white" {
        return Some(WHITE);
    }
    PALETTE
        .iter()
        .find(|(swatch, _)| *swatch == lowered)
        .map(|(_, color)| *color)
}

/// Returns the swatch name for a palette color, or "custom".
pub fn color_to_name(color: &Color) -> &'static str {
    let rgb = color.to_rgb8();
    if rgb == WHITE.to_rgb8() {
        return "white";
    }
    PALETTE
        .iter()
        .find(|(_, swatch)| swatch.to_rgb8() == rgb)
        .map(|(name, _)| *name)
        .unwrap_or("custom")
}

// ============================================================================
// Geometry
// ============================================================================

/// Axis-aligned pixel rectangle used for damage tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle; `None` unless width and height are positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Smallest rectangle covering both.
    pub fn union(self, other: Rect) -> Rect {
        let min_x = self.x.min(other.x);
        let min_y = self.y.min(other.y);
        let max_x = (self.x + self.width).max(other.x + other.width);
        let max_y = (self.y + self.height).max(other.y + other.height);
        Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        }
    }

    /// Clips to `[0, width) x [0, height)`; `None` when nothing is left.
    pub fn clamp_to_bounds(self, width: i32, height: i32) -> Option<Rect> {
        let min_x = self.x.clamp(0, width);
        let min_y = self.y.clamp(0, height);
        let max_x = (self.x + self.width).clamp(0, width);
        let max_y = (self.y + self.height).clamp(0, height);
        Rect::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
