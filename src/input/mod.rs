//! Pointer input and the drawing session state machine.
//!
//! This module turns pointer events and controller messages into stroke
//! segments. It owns the tool state (color, width, pen position) and the
//! Idle/Drawing state machine that decides when a segment is emitted.

pub mod events;
pub mod state;

pub use events::PointerEvent;
pub use state::{DrawingSession, DrawingState, SessionSettings, ToolState};
