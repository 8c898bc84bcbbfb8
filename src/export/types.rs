//! Data types for canvas export.

use std::path::PathBuf;
use thiserror::Error;

/// Outcome of an export request as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The image was written to this path.
    Saved(PathBuf),
    /// Nothing was written because no usable target was chosen.
    Cancelled(String),
    /// Writing was attempted and failed; nothing was left behind.
    Failed(String),
}

/// Errors that can occur while rasterizing or writing an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Export cancelled: {0}")]
    Cancelled(String),

    #[error("Invalid export path: {0}")]
    InvalidPath(String),

    #[error("Canvas region {width}x{height} has no pixels")]
    EmptyRegion { width: u32, height: u32 },

    #[error("Unsupported image format '{0}'")]
    UnsupportedFormat(String),

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("Surface pixels unavailable: {0}")]
    SurfaceData(#[from] cairo::BorrowError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rendering error: {0}")]
    Render(#[from] cairo::Error),
}

impl From<cairo::IoError> for ExportError {
    fn from(err: cairo::IoError) -> Self {
        match err {
            cairo::IoError::Io(io) => ExportError::Io(io),
            cairo::IoError::Cairo(cairo) => ExportError::Render(cairo),
        }
    }
}
