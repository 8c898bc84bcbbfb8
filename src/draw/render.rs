//! Cairo-based rendering of stroke segments.

use super::color::Color;
use super::segment::{LineCap, StrokeSegment};

/// Fills the whole surface with an opaque background color.
pub fn render_background(ctx: &cairo::Context, color: Color) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgb(color.r, color.g, color.b);
    let _ = ctx.paint(); // a failed paint leaves the previous contents
    let _ = ctx.restore();
}

/// Renders segments in order (first segment = bottom layer).
pub fn render_segments(ctx: &cairo::Context, segments: &[StrokeSegment]) {
    for segment in segments {
        render_segment(ctx, segment);
    }
}

/// Strokes one segment as a polyline through its flattened curve.
///
/// Round caps and joins are what make consecutive segments read as a
/// single continuous stroke.
pub fn render_segment(ctx: &cairo::Context, segment: &StrokeSegment) {
    let points = segment.flatten();
    let Some((first, rest)) = points.split_first() else {
        return;
    };

    let color = segment.color;
    ctx.set_source_rgb(color.r, color.g, color.b);
    ctx.set_line_width(segment.width);
    ctx.set_line_cap(match segment.cap {
        LineCap::Round => cairo::LineCap::Round,
    });
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(first.x, first.y);
    // Degenerate segments still produce a dot from the round cap.
    for p in rest {
        ctx.line_to(p.x, p.y);
    }

    let _ = ctx.stroke();
}
