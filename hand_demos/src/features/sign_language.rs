//! Fingerspelling guesser with a practice mode.
//!
//! The raw per-frame letter flickers, so only a reading that has held for
//! `[stability] frames` is shown.  Touching the LEARN button with the index
//! tip (or pressing `M`) switches to practice: a target letter is shown and
//! advances, scoring a point, once the stable reading matches it.

use gesture_rules::asl::{self, AslReading};
use gesture_rules::{Reading, Rect, StabilityFilter, TouchButton};
use hand_geometry::{Finger, FingerStates, LandmarkSet};

use crate::app::Feature;
use crate::session::{Command, Session};
use crate::source::Tracking;
use crate::surface::{Surface, CYAN, GREEN, GREY, WHITE, YELLOW};

use super::{draw_hand, hand_of, no_hand, panel};

/// Letters offered in practice mode, in order.
pub const PRACTICE: [char; 10] = ['A', 'B', 'C', 'D', 'E', 'I', 'L', 'V', 'W', 'Y'];

pub struct SignLanguage {
    filter:   StabilityFilter<AslReading>,
    shown:    Reading<AslReading>,
    fingers:  FingerStates,
    button:   TouchButton,
    learning: bool,
    target:   usize,
    score:    u32,
}

impl SignLanguage {
    pub fn new(stability_frames: u32, width: i32) -> Self {
        SignLanguage {
            filter:   StabilityFilter::new(stability_frames),
            shown:    Reading::Detecting,
            fingers:  FingerStates::NONE,
            button:   TouchButton::new(Rect::new(width - 150, 20, 130, 60), "LEARN"),
            learning: false,
            target:   0,
            score:    0,
        }
    }

    pub fn shown(&self) -> Reading<AslReading> { self.shown }
    pub fn is_learning(&self) -> bool { self.learning }
    pub fn target(&self) -> char { PRACTICE[self.target] }
    pub fn score(&self) -> u32 { self.score }

    fn toggle_learning(&mut self) {
        self.learning = !self.learning;
        log::info!("practice mode {}", if self.learning { "on" } else { "off" });
    }
}

impl Feature for SignLanguage {
    fn tracking(&self) -> Tracking { Tracking::Hand }

    fn on_command(&mut self, command: Command, _session: &mut Session) {
        match command {
            Command::ToggleMode => self.toggle_learning(),
            Command::Reset => {
                self.score  = 0;
                self.target = 0;
                self.filter.reset();
                self.shown  = Reading::Detecting;
            }
            _ => {}
        }
    }

    fn update(&mut self, landmarks: Option<&LandmarkSet>, session: &mut Session) {
        let hand = hand_of(landmarks);
        self.fingers = FingerStates::read(hand, session.fingers);
        self.shown = self.filter.update(asl::classify(hand, self.fingers));

        if self.button.update(hand.map(|h| h.tip(Finger::Index))) {
            self.toggle_learning();
        }

        if self.learning && self.shown == Reading::Stable(AslReading::Letter(self.target())) {
            self.score += 1;
            self.target = (self.target + 1) % PRACTICE.len();
            session.set_status(format!("CORRECT! NEXT: {}", self.target()));
        } else if !self.learning {
            session.set_status(format!("FINGERS UP: {}", self.fingers.count()));
        }
    }

    fn render(&self, surface: &mut Surface, landmarks: Option<&LandmarkSet>, _session: &Session) {
        match hand_of(landmarks) {
            Some(hand) => draw_hand(surface, hand),
            None       => no_hand(surface),
        }

        panel(surface, 10, 10, 200, 130, "SIGN");
        match self.shown {
            Reading::Stable(r) => surface.text(&r.to_string(), 30, 40, 12, GREEN),
            Reading::Detecting => surface.text("DETECTING", 20, 60, 2, GREY),
        }

        let b = self.button.rect;
        let fill = if self.learning { 0xFF00_8040 } else { 0xFF40_4060 };
        surface.fill_rect(b.x, b.y, b.w, b.h, fill);
        surface.draw_border(b.x, b.y, b.w, b.h, 2, if self.button.is_pressed() { YELLOW } else { WHITE });
        surface.text(&self.button.label, b.x + 25, b.y + 20, 3, WHITE);

        if self.learning {
            panel(surface, 10, 150, 200, 140, "PRACTICE");
            surface.text(&self.target().to_string(), 30, 180, 10, CYAN);
            surface.text(&format!("SCORE {}", self.score), 100, 200, 2, WHITE);
        }
    }
}
