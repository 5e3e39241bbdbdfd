//! HUD-style overlay that follows the palm.
//!
//! | Mode | Drawn |
//! |---|---|
//! | open | pulsing rings, rotating tick ring, fingertip spokes, thumb–index angle |
//! | pinch | thumb–index bar with the pinch value |
//! | fist | a solid marker and label |

use gesture_rules::overlay::{self, OverlayMode};
use hand_geometry::{Finger, Keypoint, LandmarkSet};

use crate::app::Feature;
use crate::session::Session;
use crate::source::Tracking;
use crate::surface::{dim, Surface, CYAN, GREEN, ORANGE, RED, WHITE, YELLOW};

use super::{draw_hand, hand_of, no_hand, panel};

const TICKS: usize = 12;

#[derive(Default)]
pub struct ArOverlay {
    mode: Option<OverlayMode>,
}

impl ArOverlay {
    pub fn mode(&self) -> Option<OverlayMode> { self.mode }
}

/// Point at `r` pixels from `c` in direction `deg` (0 = right, clockwise).
fn polar(c: Keypoint, r: f32, deg: f32) -> Keypoint {
    let a = deg.to_radians();
    c.offset((r * a.cos()).round() as i32, (r * a.sin()).round() as i32)
}

impl Feature for ArOverlay {
    fn tracking(&self) -> Tracking { Tracking::Hand }

    fn update(&mut self, landmarks: Option<&LandmarkSet>, session: &mut Session) {
        let mode = overlay::classify(hand_of(landmarks));
        if mode.map(|m| m.label()) != self.mode.map(|m| m.label()) {
            session.set_status(mode.map_or("NO HAND", |m| m.label()));
        }
        self.mode = mode;
    }

    fn render(&self, surface: &mut Surface, landmarks: Option<&LandmarkSet>, session: &Session) {
        let Some(hand) = hand_of(landmarks) else {
            no_hand(surface);
            return;
        };
        draw_hand(surface, hand);
        let palm = hand.palm();
        let pulse = overlay::pulse(session.frame_index).sin();

        match self.mode {
            Some(OverlayMode::Open { angle }) => {
                let glow = 45 + (pulse * 8.0) as i32;
                surface.circle(palm, glow, 3, dim(CYAN, 0.7 + 0.3 * pulse.abs()));
                surface.circle(palm, 95, 2, CYAN);

                let rot = overlay::rotation(session.frame_index);
                for i in 0..TICKS {
                    let deg = rot + i as f32 * (360.0 / TICKS as f32);
                    surface.line(polar(palm, 80.0, deg), polar(palm, 92.0, deg), 2, WHITE);
                }
                for tip in hand.tips() {
                    surface.line(palm, tip, 1, dim(GREEN, 0.8));
                    surface.circle(tip, 10, 2, GREEN);
                }
                surface.line(palm, hand.tip(Finger::Thumb), 2, YELLOW);
                surface.line(palm, hand.tip(Finger::Index), 2, YELLOW);
                let at = palm.offset(40, -40);
                surface.label(&format!("{:.0}'", angle), at.x, at.y, 2, YELLOW, 0xFF10_1828);
            }
            Some(OverlayMode::Pinch { value }) => {
                let (a, b) = (hand.tip(Finger::Thumb), hand.tip(Finger::Index));
                surface.line(a, b, 4, ORANGE);
                surface.fill_circle(a, 6, ORANGE);
                surface.fill_circle(b, 6, ORANGE);
                let mid = a.midpoint(b).offset(0, -30);
                surface.label(&value.to_string(), mid.x - 10, mid.y, 3, WHITE, 0xFF10_1828);
            }
            Some(OverlayMode::Fist) => {
                surface.fill_circle(palm, 20 + (pulse * 4.0) as i32, RED);
                surface.circle(palm, 40, 3, RED);
            }
            None => {}
        }

        if let Some(mode) = self.mode {
            panel(surface, 10, 10, 160, 60, "MODE");
            surface.text(mode.label(), 20, 35, 3, WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_geometry::{FingerStates, FingerThresholds, HandSketch};
    use std::time::Instant;

    fn session() -> Session {
        Session::new(640, 480, FingerThresholds::default(), Instant::now())
    }

    #[test]
    fn modes_follow_the_hand() {
        let mut f = ArOverlay::default();
        let mut s = session();

        let open = LandmarkSet::Hand(HandSketch::new(Keypoint::new(300, 300)).build());
        f.update(Some(&open), &mut s);
        assert!(matches!(f.mode(), Some(OverlayMode::Open { .. })));
        assert_eq!(s.status, "OPEN");

        let fist = LandmarkSet::Hand(
            HandSketch::new(Keypoint::new(300, 300)).with_fingers(FingerStates::NONE).build(),
        );
        f.update(Some(&fist), &mut s);
        assert_eq!(f.mode(), Some(OverlayMode::Fist));

        f.update(None, &mut s);
        assert_eq!(f.mode(), None);
        assert_eq!(s.status, "NO HAND");
    }

    #[test]
    fn polar_points_clockwise_on_screen() {
        let c = Keypoint::new(100, 100);
        assert_eq!(polar(c, 10.0, 0.0), Keypoint::new(110, 100));
        assert_eq!(polar(c, 10.0, 90.0), Keypoint::new(100, 110));
    }

    #[test]
    fn renders_every_mode() {
        let mut f = ArOverlay::default();
        let mut s = session();
        let mut surface = Surface::new(640, 480, 0xFF00_0000);
        for fingers in [FingerStates::ALL, FingerStates::NONE] {
            let set = LandmarkSet::Hand(HandSketch::new(Keypoint::new(300, 300)).with_fingers(fingers).build());
            s.advance(s.now);
            f.update(Some(&set), &mut s);
            f.render(&mut surface, Some(&set), &s);
        }
        assert!(surface.pixels().iter().any(|&p| p == RED));
    }
}
