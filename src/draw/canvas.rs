//! The canvas surface collaborator and its in-memory Cairo implementation.

use super::color::Color;
use super::dirty::DirtyTracker;
use super::render;
use super::segment::StrokeSegment;
use crate::util::Rect;

/// Pixel dimensions of the visible drawing area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasRegion {
    pub width: u32,
    pub height: u32,
}

impl CanvasRegion {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Receives rendered output from a drawing session.
///
/// Implementations rasterize immediately; the session never asks for a
/// segment back.
pub trait CanvasSurface {
    fn render_segment(&mut self, segment: &StrokeSegment);
    fn erase_all(&mut self);
}

/// ARGB32 image surface that accumulates strokes as they arrive.
pub struct CairoCanvas {
    surface: cairo::ImageSurface,
    background: Color,
    dirty: DirtyTracker,
}

impl CairoCanvas {
    /// Creates a canvas filled with `background`.
    pub fn new(region: CanvasRegion, background: Color) -> Result<Self, cairo::Error> {
        let surface = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            region.width as i32,
            region.height as i32,
        )?;
        let mut canvas = Self {
            surface,
            background,
            dirty: DirtyTracker::new(),
        };
        canvas.erase_all();
        Ok(canvas)
    }

    pub fn region(&self) -> CanvasRegion {
        CanvasRegion::new(self.surface.width() as u32, self.surface.height() as u32)
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Underlying surface, for presenting or encoding.
    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Takes the area changed since the previous call.
    pub fn take_damage(&mut self) -> Option<Rect> {
        let (w, h) = (self.surface.width(), self.surface.height());
        self.dirty.take(w, h)
    }

    /// Reads back one pixel as 8-bit RGB, un-premultiplied.
    pub fn pixel_rgb(&mut self, x: i32, y: i32) -> Option<[u8; 3]> {
        if x < 0 || y < 0 || x >= self.surface.width() || y >= self.surface.height() {
            return None;
        }
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let data = self.surface.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        Some(unpremultiply(&data[offset..offset + 4]))
    }

    fn with_context(&self, draw: impl FnOnce(&cairo::Context)) {
        match cairo::Context::new(&self.surface) {
            Ok(ctx) => draw(&ctx),
            Err(err) => log::error!("Failed to create drawing context: {err}"),
        }
    }
}

/// Converts one ARGB32 pixel (native-endian, premultiplied) to straight RGB.
pub fn unpremultiply(pixel: &[u8]) -> [u8; 3] {
    let pixel = u32::from_ne_bytes([pixel[0], pixel[1], pixel[2], pixel[3]]);
    let alpha = (pixel >> 24) & 0xff;
    if alpha == 0 {
        return [0, 0, 0];
    }
    let channel = |v: u32| ((v * 255 + alpha / 2) / alpha).min(255) as u8;
    [
        channel((pixel >> 16) & 0xff),
        channel((pixel >> 8) & 0xff),
        channel(pixel & 0xff),
    ]
}

impl CanvasSurface for CairoCanvas {
    fn render_segment(&mut self, segment: &StrokeSegment) {
        self.with_context(|ctx| render::render_segment(ctx, segment));
        self.dirty.mark_segment(segment);
    }

    fn erase_all(&mut self) {
        let background = self.background;
        self.with_context(|ctx| render::render_background(ctx, background));
        self.dirty.mark_full();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, Point, RED, WHITE, smooth};

    fn canvas() -> CairoCanvas {
        CairoCanvas::new(CanvasRegion::new(64, 48), WHITE).unwrap()
    }

    #[test]
    fn new_canvas_is_background_colored() {
        let mut canvas = canvas();
        assert_eq!(canvas.pixel_rgb(0, 0), Some([255, 255, 255]));
        assert_eq!(canvas.pixel_rgb(63, 47), Some([255, 255, 255]));
        assert_eq!(canvas.pixel_rgb(64, 0), None);
    }

    #[test]
    fn rendered_segment_colors_its_path() {
        let mut canvas = canvas();
        canvas.take_damage();
        canvas.render_segment(&smooth(
            Point::new(4.0, 24.0),
            Point::new(60.0, 24.0),
            8.0,
            RED,
        ));
        assert_eq!(canvas.pixel_rgb(32, 24), Some([255, 0, 0]));
        assert_eq!(canvas.pixel_rgb(32, 2), Some([255, 255, 255]));
        assert_eq!(canvas.take_damage(), Rect::new(0, 20, 64, 8));
    }

    #[test]
    fn long_strokes_keep_a_single_pending_rectangle() {
        let mut canvas = canvas();
        canvas.take_damage();
        let mut last = Point::new(0.0, 0.0);
        for i in 1..=5000 {
            let next = Point::new((i % 64) as f64, (i % 48) as f64);
            canvas.render_segment(&smooth(last, next, 2.0, BLACK));
            last = next;
        }
        assert_eq!(canvas.take_damage(), Rect::new(0, 0, 64, 48));
        assert_eq!(canvas.take_damage(), None);
    }

    #[test]
    fn unpremultiply_restores_straight_color() {
        let half_red = 0x8080_0000u32.to_ne_bytes();
        assert_eq!(unpremultiply(&half_red), [255, 0, 0]);
        assert_eq!(unpremultiply(&[0, 0, 0, 0]), [0, 0, 0]);
    }

    #[test]
    fn erase_restores_background() {
        let mut canvas = canvas();
        canvas.render_segment(&smooth(
            Point::new(10.0, 10.0),
            Point::new(30.0, 30.0),
            10.0,
            BLACK,
        ));
        assert_eq!(canvas.pixel_rgb(20, 20), Some([0, 0, 0]));
        canvas.erase_all();
        assert_eq!(canvas.pixel_rgb(20, 20), Some([255, 255, 255]));
        assert_eq!(canvas.take_damage(), Rect::new(0, 0, 64, 48));
    }
}
