//! Maps pressure messages to the active line width.

use super::message::{ControllerMessage, MessageKind};
use crate::input::ToolState;

/// Thinnest line the controller (or config) can produce.
pub const MIN_WIDTH: f64 = 1.0;
/// Widest line; a full-scale pressure value maps here.
pub const MAX_WIDTH: f64 = 30.0;
/// Width used until a controller message says otherwise.
pub const DEFAULT_WIDTH: f64 = 5.0;
/// Channel the expression pedal transmits on (zero-based).
pub const DEFAULT_CHANNEL: u8 = 4;

/// Clamps any width into the supported range.
pub fn clamp_width(width: f64) -> f64 {
    if width.is_nan() {
        return DEFAULT_WIDTH;
    }
    width.clamp(MIN_WIDTH, MAX_WIDTH)
}

/// Linear map of a 7-bit value onto the width range, floored at [`MIN_WIDTH`].
pub fn width_for_value(value: u8) -> f64 {
    clamp_width(value as f64 / 127.0 * MAX_WIDTH)
}

/// Filters controller traffic down to aftertouch on one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthController {
    channel: u8,
}

impl Default for WidthController {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL)
    }
}

impl WidthController {
    pub fn new(channel: u8) -> Self {
        Self {
            channel: channel.min(15),
        }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Returns the width a message asks for, if it is one we listen to.
    pub fn width_for(&self, message: &ControllerMessage) -> Option<f64> {
        (message.kind == MessageKind::Aftertouch && message.channel == self.channel)
            .then(|| width_for_value(message.value))
    }

    /// Applies a message to the tool state. Returns whether it was accepted.
    pub fn apply(&self, message: &ControllerMessage, tool: &mut ToolState) -> bool {
        match self.width_for(message) {
            Some(width) => {
                tool.width = width;
                true
            }
            None => false,
        }
    }
}
