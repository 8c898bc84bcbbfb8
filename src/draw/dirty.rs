//! Damage tracking for incremental presentation of the canvas.
//!
//! Everything touched since the last present is folded into one bounding
//! rectangle, so the tracker stays the same size no matter how long nobody
//! asks for it.

use super::StrokeSegment;
use crate::util::Rect;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Damage {
    #[default]
    Clean,
    Partial(Rect),
    Full,
}

/// Accumulates the area changed between presents.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    damage: Damage,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty.
    pub fn mark_full(&mut self) {
        self.damage = Damage::Full;
    }

    /// Grows the pending damage to cover `rect`.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() {
            return;
        }
        self.damage = match self.damage {
            Damage::Clean => Damage::Partial(rect),
            Damage::Partial(pending) => Damage::Partial(pending.union(rect)),
            Damage::Full => Damage::Full,
        };
    }

    /// Adds the bounds of a freshly rendered segment.
    pub fn mark_segment(&mut self, segment: &StrokeSegment) {
        match segment.bounding_box() {
            Some(rect) => self.mark_rect(rect),
            None => self.mark_full(),
        }
    }

    /// Takes the pending damage, clipped to a `width` x `height` surface.
    pub fn take(&mut self, width: i32, height: i32) -> Option<Rect> {
        match std::mem::take(&mut self.damage) {
            Damage::Clean => None,
            Damage::Partial(rect) => rect.clamp_to_bounds(width, height),
            Damage::Full => Rect::new(0, 0, width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, Point, smooth};

    #[test]
    fn segments_merge_into_one_clipped_rectangle() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_segment(&smooth(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            4.0,
            BLACK,
        ));
        tracker.mark_segment(&smooth(
            Point::new(10.0, 10.0),
            Point::new(40.0, 20.0),
            4.0,
            BLACK,
        ));

        assert_eq!(tracker.take(100, 100), Rect::new(0, 0, 42, 22));
        assert_eq!(tracker.take(100, 100), None);
    }

    #[test]
    fn mark_full_takes_precedence() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_full();
        tracker.mark_segment(&smooth(
            Point::new(20.0, 20.0),
            Point::new(35.0, 35.0),
            2.0,
            BLACK,
        ));

        assert_eq!(tracker.take(200, 100), Rect::new(0, 0, 200, 100));
    }

    #[test]
    fn offscreen_damage_is_dropped() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_rect(Rect::new(500, 500, 10, 10).unwrap());
        assert_eq!(tracker.take(100, 100), None);
    }
}
