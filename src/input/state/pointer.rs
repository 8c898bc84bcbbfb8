use crate::draw::{Point, smooth};
use crate::input::events::PointerEvent;

use super::DrawingSession;

impl DrawingSession {
    /// Dispatches a pointer event to the matching handler.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let position = event.position();
        match event {
            PointerEvent::Down { .. } => self.pointer_down(position),
            PointerEvent::Move { .. } => self.pointer_move(position),
            PointerEvent::Up { .. } => self.pointer_up(position),
        }
    }

    /// Puts the pen down at `p`. No segment is emitted yet.
    pub fn pointer_down(&mut self, p: Point) {
        self.tool.pen_down = true;
        self.tool.last_point = Some(p);
    }

    /// Extends the stroke to `p` while the pen is down.
    ///
    /// # Behavior
    /// - Pen down: emits one smoothed segment from the last point to `p`,
    ///   using the width and color active right now, and renders it
    /// - Pen up: ignored
    pub fn pointer_move(&mut self, p: Point) {
        if !self.tool.pen_down {
            return;
        }
        let Some(last) = self.tool.last_point else {
            return;
        };

        let segment = smooth(last, p, self.tool.width, self.tool.color);
        self.surface.render_segment(&segment);
        self.segments.push(segment);
        self.tool.last_point = Some(p);
    }

    /// Lifts the pen. The release position does not add to the stroke.
    pub fn pointer_up(&mut self, _p: Point) {
        self.tool.pen_down = false;
    }
}
