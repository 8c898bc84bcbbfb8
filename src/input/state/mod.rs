mod actions;
mod core;
mod pointer;
#[cfg(test)]
mod tests;

pub use core::{DrawingSession, DrawingState, SessionSettings, ToolState};
