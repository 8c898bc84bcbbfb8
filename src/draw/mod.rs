//! Stroke geometry and Cairo-based rendering.
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGB colors and the seven-swatch palette
//! - [`StrokeSegment`]: one smoothed cubic piece of a freehand stroke
//! - [`CanvasSurface`]: the sink a drawing session renders into
//! - [`CairoCanvas`]: an in-memory Cairo implementation of that sink

pub mod canvas;
pub mod color;
pub mod dirty;
pub mod render;
pub mod segment;

pub use canvas::{CairoCanvas, CanvasRegion, CanvasSurface, unpremultiply};
pub use color::{BLACK, BLUE, Color, GREEN, ORANGE, PALETTE, PURPLE, RED, WHITE, YELLOW};
pub use dirty::DirtyTracker;
pub use render::{render_background, render_segment, render_segments};
pub use segment::{LineCap, Point, SUBDIVISIONS, StrokeSegment, smooth};
