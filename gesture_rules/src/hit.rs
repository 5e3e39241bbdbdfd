//! Axis-aligned hit regions and the on-screen touch button.

use hand_geometry::Keypoint;

use crate::debounce::EdgeTrigger;

/// An axis-aligned rectangle in pixel space.
///
/// Edges are inclusive on all four sides: `x ≤ px ≤ x + w`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn contains(&self, p: Keypoint) -> bool {
        self.x <= p.x && p.x <= self.x + self.w
            && self.y <= p.y && p.y <= self.y + self.h
    }

    /// Absent points are never inside.
    pub fn contains_opt(&self, p: Option<Keypoint>) -> bool {
        p.is_some_and(|p| self.contains(p))
    }

    pub fn center(&self) -> Keypoint {
        Keypoint::new(self.x + self.w / 2, self.y + self.h / 2)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TouchButton
// ════════════════════════════════════════════════════════════════════════════

/// A rectangle that fires once each time a fingertip enters it.
#[derive(Clone, Debug)]
pub struct TouchButton {
    pub rect:  Rect,
    pub label: String,
    edge:      EdgeTrigger,
}

impl TouchButton {
    pub fn new(rect: Rect, label: impl Into<String>) -> Self {
        TouchButton { rect, label: label.into(), edge: EdgeTrigger::new() }
    }

    /// True on the first frame the point is inside after being outside.
    pub fn update(&mut self, point: Option<Keypoint>) -> bool {
        self.edge.update(self.rect.contains_opt(point))
    }

    /// Whether the point was inside on the last update.
    pub fn is_pressed(&self) -> bool {
        self.edge.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_inclusive() {
        let r = Rect::new(10, 20, 30, 40);
        assert!(r.contains(Keypoint::new(10, 20)));
        assert!(r.contains(Keypoint::new(40, 60)));
        assert!(!r.contains(Keypoint::new(41, 60)));
        assert!(!r.contains(Keypoint::new(9, 30)));
        assert!(!r.contains_opt(None));
    }

    #[test]
    fn button_fires_once_per_visit() {
        let mut b = TouchButton::new(Rect::new(0, 0, 100, 50), "LEARN");
        let inside  = Some(Keypoint::new(50, 25));
        let outside = Some(Keypoint::new(200, 25));

        let presses = [outside, inside, inside, inside, None, inside, outside]
            .into_iter()
            .filter(|&p| b.update(p))
            .count();
        assert_eq!(presses, 2);
        assert!(!b.is_pressed());
    }
}
