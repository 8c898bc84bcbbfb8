//! Exporting the canvas to an image file.
//!
//! The session hands its segment list and the visible region to a
//! [`CanvasExporter`]. The bundled [`PngExporter`] re-rasterizes offscreen,
//! optionally supersampled, and writes an image of the region's exact size:
//! PNG by default, or whatever format the target's extension names.

pub mod file;
pub mod png;
pub mod types;


use crate::draw::{CanvasRegion, StrokeSegment};
use std::path::{Path, PathBuf};

pub use file::{ExportFormat, FileSaveConfig};
pub use png::{MAX_SUPERSAMPLE_FACTOR, PngExporter};
pub use types::{ExportError, ExportOutcome};

/// Abstraction over how the current canvas ends up in a file.
pub trait CanvasExporter {
    /// Rasterizes `segments` over `region` and writes the image at `target`.
    ///
    /// Returns the path actually written, which may differ from `target`
    /// when a default extension was added.
    fn capture_and_save(
        &mut self,
        target: &Path,
        region: CanvasRegion,
        segments: &[StrokeSegment],
    ) -> Result<PathBuf, ExportError>;
}
