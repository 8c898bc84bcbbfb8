//! Event scripts for driving a drawing session without a window.
//!
//! A script is a JSON array of tagged events:
//!
//! ```json
//! [
//!   { "type": "down", "x": 10, "y": 10 },
//!   { "type": "controller", "kind": "aftertouch", "channel": 4, "value": 127 },
//!   { "type": "move", "x": 60, "y": 20 },
//!   { "type": "up", "x": 60, "y": 20 },
//!   { "type": "palette", "index": 1 },
//!   { "type": "color", "color": "#336699" },
//!   { "type": "clear" },
//!   { "type": "export", "path": "out.png" }
//! ]
//! ```

use crate::config::ColorSpec;
use crate::controller::{ControllerInbox, ControllerMessage};
use crate::export::{ExportOutcome, FileSaveConfig};
use crate::input::{DrawingSession, PointerEvent};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read event script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid event script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    /// A controller message, as if it had arrived from the device
    Controller(ControllerMessage),
    /// Palette name, `#rrggbb` or `[r, g, b]`
    Color { color: ColorSpec },
    /// Palette swatch by position
    Palette { index: usize },
    Clear,
    /// Export the canvas; without a path the configured save directory is used
    Export {
        #[serde(default)]
        path: Option<PathBuf>,
    },
}

impl ReplayEvent {
    fn pointer(&self) -> Option<PointerEvent> {
        match *self {
            ReplayEvent::Down { x, y } => Some(PointerEvent::down((x, y))),
            ReplayEvent::Move { x, y } => Some(PointerEvent::moved((x, y))),
            ReplayEvent::Up { x, y } => Some(PointerEvent::up((x, y))),
            _ => None,
        }
    }
}

/// What a replay did to the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub events: usize,
    pub segments_drawn: usize,
    /// Controller messages that changed the width, scripted and live
    pub controller_applied: usize,
    pub exports: Vec<PathBuf>,
    pub exports_failed: usize,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} events, {} segments drawn, {} width updates, {} exports",
            self.events,
            self.segments_drawn,
            self.controller_applied,
            self.exports.len()
        )?;
        if self.exports_failed > 0 {
            write!(f, " ({} failed)", self.exports_failed)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventScript {
    events: Vec<ReplayEvent>,
    save_config: Option<FileSaveConfig>,
}

impl EventScript {
    pub fn new(events: Vec<ReplayEvent>) -> Self {
        Self {
            events,
            save_config: None,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let text = fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let script = Self::from_str(&text)?;
        log::info!(
            "Loaded {} events from {}",
            script.events.len(),
            path.display()
        );
        Ok(script)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self, ReplayError> {
        let events: Vec<ReplayEvent> = serde_json::from_str(text)?;
        Ok(Self::new(events))
    }

    /// Where path-less export events write to. Without this they are cancelled.
    pub fn with_save_config(mut self, save_config: FileSaveConfig) -> Self {
        self.save_config = Some(save_config);
        self
    }

    pub fn events(&self) -> &[ReplayEvent] {
        &self.events
    }

    /// Runs every event against `session`, in order.
    ///
    /// Live controller messages waiting in `inbox` are applied before each
    /// pointer event, so a device held during replay shapes the strokes the
    /// same way it would during interactive drawing.
    pub fn apply(
        &self,
        session: &mut DrawingSession,
        mut inbox: Option<&mut ControllerInbox>,
    ) -> ReplaySummary {
        let mut summary = ReplaySummary::default();

        for event in &self.events {
            summary.events += 1;

            if let Some(pointer) = event.pointer() {
                if let Some(inbox) = inbox.as_deref_mut() {
                    summary.controller_applied += session.pump_controller(inbox);
                }
                let before = session.segments().len();
                session.handle_pointer(pointer);
                if session.segments().len() > before {
                    summary.segments_drawn += 1;
                }
                continue;
            }

            match event {
                ReplayEvent::Controller(message) => {
                    if session.handle_controller(message) {
                        summary.controller_applied += 1;
                    }
                }
                ReplayEvent::Color { color } => self.apply_color(session, color),
                ReplayEvent::Palette { index } => {
                    session.select_swatch(*index);
                }
                ReplayEvent::Clear => session.clear(),
                ReplayEvent::Export { path } => {
                    let target = path
                        .clone()
                        .or_else(|| self.save_config.as_ref().map(|c| c.default_target()));
                    match session.export(target.as_deref()) {
                        ExportOutcome::Saved(path) => summary.exports.push(path),
                        ExportOutcome::Cancelled(_) => {}
                        ExportOutcome::Failed(_) => summary.exports_failed += 1,
                    }
                }
                ReplayEvent::Down { .. } | ReplayEvent::Move { .. } | ReplayEvent::Up { .. } => {}
            }
        }

        if let Some(inbox) = inbox {
            summary.controller_applied += session.pump_controller(inbox);
        }

        log::debug!("Replay finished: {summary}");
        summary
    }

    fn apply_color(&self, session: &mut DrawingSession, color: &ColorSpec) {
        if color.is_free_form() {
            // Free-form colors come from the chooser, which the palette-only
            // variant does not have.
            match color.resolve() {
                Some(resolved) => {
                    session.choose_color(Some(&resolved.to_hex()));
                }
                None => log::warn!("Ignoring unparseable color {color:?}"),
            }
            return;
        }
        match color.resolve() {
            Some(resolved) => session.set_color(resolved),
            None => log::warn!("Ignoring unknown color {color:?}"),
        }
    }
}
