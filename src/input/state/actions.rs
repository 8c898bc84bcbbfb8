use std::path::Path;

use crate::draw::{Color, color::palette_swatch};
use crate::export::{ExportError, ExportOutcome};
use crate::util;

use super::DrawingSession;

impl DrawingSession {
    /// Removes every segment and erases the surface. The pen state is kept.
    pub fn clear(&mut self) {
        log::info!("Clearing {} segments", self.segments.len());
        self.segments.clear();
        self.surface.erase_all();
    }

    /// Changes the color used by segments emitted from now on.
    pub fn set_color(&mut self, color: Color) {
        log::debug!("Color set to {} ({})", color.to_hex(), util::color_to_name(&color));
        self.tool.color = color;
    }

    /// Selects one of the seven palette swatches.
    pub fn select_swatch(&mut self, index: usize) -> bool {
        match palette_swatch(index) {
            Some(color) => {
                self.set_color(color);
                true
            }
            None => {
                log::warn!("No palette swatch at index {index}");
                false
            }
        }
    }

    /// Applies a color chooser result (`#rrggbb`).
    ///
    /// Only available when the color picker is enabled; a dismissed chooser
    /// (`None`) leaves the color alone.
    pub fn choose_color(&mut self, chosen: Option<&str>) -> bool {
        if !self.color_picker {
            log::warn!("Color picker is disabled; ignoring free-form color");
            return false;
        }
        let Some(chosen) = chosen else {
            return false;
        };
        match Color::from_hex(chosen) {
            Some(color) => {
                self.set_color(color);
                true
            }
            None => {
                log::warn!("Ignoring unparseable color '{chosen}'");
                false
            }
        }
    }

    /// Writes the current canvas to `target`.
    ///
    /// `None` or an empty path means the save dialog was dismissed. Failures
    /// are logged and reported in the outcome; the session itself is never
    /// changed by an export.
    pub fn export(&mut self, target: Option<&Path>) -> ExportOutcome {
        let Some(target) = target.filter(|path| !path.as_os_str().is_empty()) else {
            log::info!("Export cancelled: no file chosen");
            return ExportOutcome::Cancelled("no file chosen".to_string());
        };

        match self
            .exporter
            .capture_and_save(target, self.region, &self.segments)
        {
            Ok(path) => {
                log::info!("Canvas exported to {}", path.display());
                ExportOutcome::Saved(path)
            }
            Err(ExportError::Cancelled(reason)) => {
                log::info!("Export cancelled: {reason}");
                ExportOutcome::Cancelled(reason)
            }
            Err(err) => {
                log::error!("Export to {} failed: {err}", target.display());
                ExportOutcome::Failed(err.to_string())
            }
        }
    }
}
