//! Raster exporter with optional supersampling.

use super::CanvasExporter;
use super::file::{ExportFormat, resolve_target, write_image};
use super::types::ExportError;
use crate::draw::{CanvasRegion, Color, StrokeSegment, WHITE, render};
use std::path::{Path, PathBuf};

/// Largest supersampling factor accepted; larger values are clamped.
pub const MAX_SUPERSAMPLE_FACTOR: u32 = 8;

/// Cairo refuses image surfaces with a longer side than this.
const MAX_SURFACE_SIDE: u32 = 32_767;

/// Re-renders the segment list offscreen and writes it as an image file.
///
/// PNG is the default; other formats follow the target's extension. With
/// `supersample_factor > 1` the strokes are rendered at that linear scale and
/// filtered back down, so edges are smoother while the written image keeps
/// the canvas dimensions.
#[derive(Debug, Clone)]
pub struct PngExporter {
    supersample_factor: u32,
    background: Color,
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new(1, WHITE)
    }
}

impl PngExporter {
    pub fn new(supersample_factor: u32, background: Color) -> Self {
        Self {
            supersample_factor: supersample_factor.clamp(1, MAX_SUPERSAMPLE_FACTOR),
            background,
        }
    }

    pub fn supersample_factor(&self) -> u32 {
        self.supersample_factor
    }

    /// The factor actually used for `region`.
    ///
    /// Lowered when the scaled surface would exceed cairo's size limit.
    pub fn effective_factor(&self, region: CanvasRegion) -> u32 {
        let longest = region.width.max(region.height).max(1);
        self.supersample_factor.min((MAX_SURFACE_SIDE / longest).max(1))
    }

    /// Renders `segments` into a surface of exactly `region` size.
    pub fn rasterize(
        &self,
        region: CanvasRegion,
        segments: &[StrokeSegment],
    ) -> Result<cairo::ImageSurface, ExportError> {
        if region.width == 0 || region.height == 0 {
            return Err(ExportError::EmptyRegion {
                width: region.width,
                height: region.height,
            });
        }
        let (width, height) = (region.width as i32, region.height as i32);
        let factor = self.effective_factor(region);
        if factor < self.supersample_factor {
            log::warn!(
                "Supersample x{} too large for a {}x{} canvas, using x{}",
                self.supersample_factor,
                region.width,
                region.height,
                factor
            );
        }

        if factor == 1 {
            let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
            {
                let ctx = cairo::Context::new(&surface)?;
                render::render_background(&ctx, self.background);
                render::render_segments(&ctx, segments);
            }
            return Ok(surface);
        }

        let scale = factor as f64;
        let large = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            width * factor as i32,
            height * factor as i32,
        )?;
        {
            let ctx = cairo::Context::new(&large)?;
            render::render_background(&ctx, self.background);
            ctx.scale(scale, scale);
            render::render_segments(&ctx, segments);
        }

        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        {
            let ctx = cairo::Context::new(&surface)?;
            ctx.scale(1.0 / scale, 1.0 / scale);
            ctx.set_source_surface(&large, 0.0, 0.0)?;
            let source = ctx.source();
            source.set_filter(cairo::Filter::Good);
            source.set_extend(cairo::Extend::Pad);
            ctx.set_operator(cairo::Operator::Source);
            ctx.paint()?;
        }
        log::debug!(
            "Supersampled export: {}x{} -> {}x{}",
            large.width(),
            large.height(),
            width,
            height
        );
        Ok(surface)
    }
}

impl CanvasExporter for PngExporter {
    fn capture_and_save(
        &mut self,
        target: &Path,
        region: CanvasRegion,
        segments: &[StrokeSegment],
    ) -> Result<PathBuf, ExportError> {
        let path = resolve_target(target, "png")?;
        let format = ExportFormat::from_path(&path)?;
        let mut surface = self.rasterize(region, segments)?;

        log::info!(
            "Exporting {} segments to {} ({}x{}, supersample x{})",
            segments.len(),
            path.display(),
            region.width,
            region.height,
            self.effective_factor(region)
        );
        write_image(&mut surface, &path, format)?;
        Ok(path)
    }
}
