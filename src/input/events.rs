//! Pointer events delivered to a drawing session.

use crate::draw::Point;
use serde::{Deserialize, Serialize};

/// Primary-button pointer activity in canvas pixel space.
///
/// Backends map their native press/motion/release callbacks to these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    /// Button pressed (pen down)
    Down { x: f64, y: f64 },
    /// Motion with the button held; ignored while the pen is up
    Move { x: f64, y: f64 },
    /// Button released (pen up)
    Up { x: f64, y: f64 },
}

impl PointerEvent {
    pub fn down(p: impl Into<Point>) -> Self {
        let p = p.into();
        PointerEvent::Down { x: p.x, y: p.y }
    }

    pub fn moved(p: impl Into<Point>) -> Self {
        let p = p.into();
        PointerEvent::Move { x: p.x, y: p.y }
    }

    pub fn up(p: impl Into<Point>) -> Self {
        let p = p.into();
        PointerEvent::Up { x: p.x, y: p.y }
    }

    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { x, y }
            | PointerEvent::Move { x, y }
            | PointerEvent::Up { x, y } => Point::new(x, y),
        }
    }
}
