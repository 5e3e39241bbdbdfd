//! Hand posture scoring with a running good/poor tally.

use gesture_rules::posture::{self, PostureReport, PostureTally, Rating};
use hand_geometry::LandmarkSet;

use crate::app::Feature;
use crate::session::{Command, Session};
use crate::source::Tracking;
use crate::surface::{Surface, GLYPH_H, GREEN, GREY, ORANGE, RED, WHITE};

use super::{draw_hand, hand_of, no_hand, panel, progress_bar};

const MAX_FEEDBACK_LINES: usize = 3;

#[derive(Default)]
pub struct Posture {
    report: Option<PostureReport>,
    tally:  PostureTally,
}

impl Posture {
    pub fn report(&self) -> Option<&PostureReport> { self.report.as_ref() }
    pub fn tally(&self) -> PostureTally { self.tally }
}

fn rating_color(rating: Rating) -> u32 {
    match rating {
        Rating::Good => GREEN,
        Rating::Ok   => ORANGE,
        Rating::Poor => RED,
    }
}

impl Feature for Posture {
    fn tracking(&self) -> Tracking { Tracking::Hand }

    fn on_command(&mut self, command: Command, session: &mut Session) {
        if command == Command::Reset {
            self.tally = PostureTally::default();
            session.set_status("TALLY CLEARED");
        }
    }

    fn update(&mut self, landmarks: Option<&LandmarkSet>, session: &mut Session) {
        self.report = posture::analyze(hand_of(landmarks));
        if let Some(r) = &self.report {
            self.tally.record(r.rating);
            if let Some(rate) = self.tally.good_rate() {
                session.set_status(format!("GOOD RATE {:.0}%", rate));
            }
        }
    }

    fn render(&self, surface: &mut Surface, landmarks: Option<&LandmarkSet>, _session: &Session) {
        match hand_of(landmarks) {
            Some(hand) => draw_hand(surface, hand),
            None       => no_hand(surface),
        }

        panel(surface, 10, 10, 300, 190, "POSTURE");
        if let Some(r) = &self.report {
            let color = rating_color(r.rating);
            surface.text(&r.rating.to_string(), 20, 35, 3, color);
            surface.text(&format!("SCORE {}/100", r.score), 20, 65, 2, WHITE);
            progress_bar(surface, 20, 85, 280, 14, r.score as f32 / 100.0, color);

            for (i, fb) in r.feedback.iter().take(MAX_FEEDBACK_LINES).enumerate() {
                let y = 110 + i as i32 * (GLYPH_H * 2 + 4);
                surface.text(&fb.to_string(), 20, y, 2, if fb.is_positive() { GREEN } else { ORANGE });
            }
        }

        let t = self.tally;
        surface.text(&format!("GOOD {}  POOR {}", t.good, t.poor), 20, 175, 2, GREY);
        if let Some(rate) = t.good_rate() {
            surface.text(&format!("{:.0}%", rate), 240, 175, 2, WHITE);
        }
    }
}
