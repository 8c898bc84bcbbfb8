//! Export target resolution and file writing.

use super::types::ExportError;
use crate::draw::unpremultiply;
use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Where exports go when no explicit path is given.
#[derive(Debug, Clone)]
pub struct FileSaveConfig {
    /// Directory to save exports to.
    pub save_directory: PathBuf,
    /// Filename template (supports chrono format specifiers).
    pub filename_template: String,
    /// Image format extension.
    pub format: String,
}

impl Default for FileSaveConfig {
    fn default() -> Self {
        Self {
            save_directory: dirs::picture_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("midisketch"),
            filename_template: "sketch_%Y-%m-%d_%H%M%S".to_string(),
            format: "png".to_string(),
        }
    }
}

impl FileSaveConfig {
    /// A fresh timestamped path inside the save directory.
    pub fn default_target(&self) -> PathBuf {
        self.save_directory
            .join(generate_filename(&self.filename_template, &self.format))
    }
}

/// Generate a filename based on the template and current time.
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Encoder used for an export target, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Written by cairo itself
    Png,
    /// Converted to straight RGB and encoded with the `image` crate
    Encoded(image::ImageFormat),
}

impl ExportFormat {
    /// Looks up a writable format by extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("png") {
            return Some(Self::Png);
        }
        image::ImageFormat::from_extension(ext)
            .filter(|format| format.writing_enabled())
            .map(Self::Encoded)
    }

    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| ExportError::UnsupportedFormat(ext.to_string()))
    }
}

/// Validates a user-chosen target and fills in the default extension.
///
/// An empty path means the save dialog was dismissed. A path without a file
/// name (e.g. `/tmp/` or `..`) is rejected, as is an extension no encoder
/// can write.
pub fn resolve_target(target: &Path, default_format: &str) -> Result<PathBuf, ExportError> {
    if target.as_os_str().is_empty() {
        return Err(ExportError::Cancelled("no file chosen".to_string()));
    }
    let raw = target.to_string_lossy();
    if raw.ends_with('/') || raw.ends_with(std::path::MAIN_SEPARATOR) {
        return Err(ExportError::InvalidPath(format!("{raw} is a directory")));
    }
    if target.file_name().is_none() {
        return Err(ExportError::InvalidPath(format!("{raw} has no file name")));
    }

    let expanded = expand_tilde(&raw);
    if expanded.extension().is_none() {
        return Ok(expanded.with_extension(default_format));
    }
    ExportFormat::from_path(&expanded)?;
    Ok(expanded)
}

/// Ensure the parent directory exists, creating it if necessary.
pub fn ensure_parent_exists(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        log::info!("Creating export directory: {}", parent.display());
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Copies an ARGB32 surface into a straight-alpha RGB image.
///
/// The canvas is always opaque, so alpha is dropped after un-premultiplying.
pub fn surface_to_rgb(
    surface: &mut cairo::ImageSurface,
) -> Result<image::RgbImage, ExportError> {
    surface.flush();
    let width = surface.width().max(0) as u32;
    let height = surface.height().max(0) as u32;
    let stride = surface.stride() as usize;
    let data = surface.data()?;

    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    for row in data.chunks(stride).take(height as usize) {
        for pixel in row[..width as usize * 4].chunks_exact(4) {
            rgb.extend_from_slice(&unpremultiply(pixel));
        }
    }
    image::RgbImage::from_raw(width, height, rgb)
        .ok_or(ExportError::Render(cairo::Error::InvalidSize))
}

/// Encodes `surface` at `path` in `format`.
///
/// The file handle lives only inside this call. If encoding or flushing
/// fails the partially written file is removed.
pub fn write_image(
    surface: &mut cairo::ImageSurface,
    path: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    ensure_parent_exists(path)?;

    let encoded = match format {
        ExportFormat::Png => None,
        ExportFormat::Encoded(image_format) => Some((surface_to_rgb(surface)?, image_format)),
    };

    let result = File::create(path)
        .map_err(ExportError::from)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            match &encoded {
                None => surface.write_to_png(&mut writer)?,
                Some((rgb, image_format)) => rgb.write_to(&mut writer, *image_format)?,
            }
            writer.flush()?;
            Ok(())
        });

    if let Err(err) = &result {
        log::warn!("Export to {} failed: {err}", path.display());
        if path.exists()
            && let Err(remove_err) = fs::remove_file(path)
        {
            log::warn!(
                "Could not remove partial export {}: {remove_err}",
                path.display()
            );
        }
        return result;
    }

    let written_size = fs::metadata(path)?.len();
    log::debug!("File written: {} bytes ({:?})", written_size, format);
    Ok(())
}
