//! Stroke segments and the chord-based cubic smoother.

use super::color::Color;
use crate::util::Rect;
use serde::{Deserialize, Serialize};

/// Number of line pieces the rasterizer flattens each cubic into.
pub const SUBDIVISIONS: u32 = 36;

/// A canvas-local pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x as f64, y as f64)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Line cap used when stroking a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineCap {
    Round,
}

/// One smoothed piece of a freehand stroke.
///
/// Created once per pointer move while the pen is down and never mutated
/// afterwards; the session keeps them in draw order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeSegment {
    pub start: Point,
    pub control1: Point,
    pub control2: Point,
    pub end: Point,
    /// Line width in pixels
    pub width: f64,
    pub color: Color,
    pub cap: LineCap,
    pub smooth: bool,
    pub subdivisions: u32,
}

/// Builds the cubic between the previous point `p0` and the new point `p3`.
///
/// The control points sit at one and two thirds along the chord, so the curve
/// hugs the straight line; the visual smoothing comes from overlapping round
/// caps of many short segments. `p0 == p3` yields a zero-length curve.
pub fn smooth(p0: Point, p3: Point, width: f64, color: Color) -> StrokeSegment {
    let dx = (p3.x - p0.x) / 3.0;
    let dy = (p3.y - p0.y) / 3.0;
    StrokeSegment {
        start: p0,
        control1: Point::new(p0.x + dx, p0.y + dy),
        control2: Point::new(p3.x - dx, p3.y - dy),
        end: p3,
        width,
        color,
        cap: LineCap::Round,
        smooth: true,
        subdivisions: SUBDIVISIONS,
    }
}

impl StrokeSegment {
    /// The four control points in order.
    pub fn control_points(&self) -> [Point; 4] {
        [self.start, self.control1, self.control2, self.end]
    }

    /// Evaluates the cubic at `t` in [0, 1] (de Casteljau).
    pub fn point_at(&self, t: f64) -> Point {
        let a = self.start.lerp(self.control1, t);
        let b = self.control1.lerp(self.control2, t);
        let c = self.control2.lerp(self.end, t);
        let ab = a.lerp(b, t);
        let bc = b.lerp(c, t);
        ab.lerp(bc, t)
    }

    /// Flattens the curve into `subdivisions + 1` points, endpoints included.
    pub fn flatten(&self) -> Vec<Point> {
        if !self.smooth || self.subdivisions == 0 {
            return vec![self.start, self.end];
        }
        let steps = self.subdivisions;
        (0..=steps)
            .map(|i| self.point_at(i as f64 / steps as f64))
            .collect()
    }

    /// Axis-aligned pixel bounds of the stroke, padded by half the width.
    ///
    /// A cubic never leaves the hull of its control points, so the hull is
    /// enough for damage tracking.
    pub fn bounding_box(&self) -> Option<Rect> {
        let points = self.control_points();
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let padding = (self.width / 2.0).ceil().max(1.0);
        let x0 = (min_x - padding).floor() as i32;
        let y0 = (min_y - padding).floor() as i32;
        let x1 = (max_x + padding).ceil() as i32;
        let y1 = (max_y + padding).ceil() as i32;
        Rect::from_min_max(x0, y0, x1, y1)
    }
}
