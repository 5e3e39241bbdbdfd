//! Pinch-to-set volume with a circular gauge around the palm.

use gesture_rules::VolumeControl;
use hand_geometry::{Finger, FingerStates, LandmarkSet};

use crate::app::Feature;
use crate::session::{Command, Session};
use crate::source::Tracking;
use crate::surface::{dim, Surface, CYAN, GREEN, GREY, WHITE};

use super::{draw_hand, hand_of, no_hand, panel};

const GAUGE_R: i32 = 60;

#[derive(Default)]
pub struct Volume {
    control: VolumeControl,
}

impl Volume {
    pub fn level(&self) -> u8 { self.control.volume() }
    pub fn is_controlling(&self) -> bool { self.control.is_controlling() }
}

impl Feature for Volume {
    fn tracking(&self) -> Tracking { Tracking::Hand }

    fn on_command(&mut self, command: Command, session: &mut Session) {
        if command == Command::Reset {
            self.control = VolumeControl::default();
            session.set_status(format!("VOLUME {}", self.level()));
        }
    }

    fn update(&mut self, landmarks: Option<&LandmarkSet>, session: &mut Session) {
        let hand = hand_of(landmarks);
        let fingers = FingerStates::read(hand, session.fingers);
        let before = self.level();
        if self.control.update(hand, fingers) && self.level() != before {
            session.set_status(format!("VOLUME {}", self.level()));
        }
    }

    fn render(&self, surface: &mut Surface, landmarks: Option<&LandmarkSet>, _session: &Session) {
        let level = self.level();
        let hand = hand_of(landmarks);
        match hand {
            Some(h) => draw_hand(surface, h),
            None    => no_hand(surface),
        }

        if let Some(h) = hand {
            let palm = h.palm();
            let color = if self.is_controlling() { GREEN } else { dim(CYAN, 0.6) };
            surface.circle(palm, GAUGE_R, 6, GREY);
            surface.arc(palm, GAUGE_R, 6, -90.0, level as f32 * 3.6, color);
            let text = level.to_string();
            surface.text(&text, palm.x - Surface::text_width(&text, 3) / 2, palm.y - 10, 3, WHITE);
            if self.is_controlling() {
                surface.line(h.tip(Finger::Thumb), h.tip(Finger::Index), 3, GREEN);
            }
        }

        // Vertical bar on the right.
        let (x, top, h) = (surface.width() - 60, 60, 300);
        let filled = h * level as i32 / 100;
        surface.fill_rect(x, top, 30, h, 0xFF30_3040);
        surface.fill_rect(x, top + h - filled, 30, filled, GREEN);
        surface.draw_border(x, top, 30, h, 2, WHITE);
        surface.text(&format!("{}%", level), x - 10, top + h + 10, 2, WHITE);

        panel(surface, 10, 10, 250, 70, "VOLUME");
        let hint = if self.is_controlling() { "CONTROLLING" } else { "PINCH TO ADJUST" };
        surface.text(hint, 20, 40, 2, if self.is_controlling() { GREEN } else { WHITE });
    }
}
