//! Rock-paper-scissors against a random computer.

use gesture_rules::rps::{self, Gesture, Outcome, RpsGame};
use hand_geometry::{FingerStates, LandmarkSet};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::app::Feature;
use crate::session::{Command, Session};
use crate::source::Tracking;
use crate::surface::{Surface, CYAN, GREEN, GREY, RED, WHITE, YELLOW};

use super::{draw_hand, hand_of, panel, progress_bar};

pub struct RpsFeature {
    game:         RpsGame,
    round_frames: u64,
    current:      Gesture,
    rng:          StdRng,
}

impl RpsFeature {
    pub fn new(round_frames: u64) -> Self {
        RpsFeature::with_rng(round_frames, StdRng::from_entropy())
    }

    pub fn with_rng(round_frames: u64, rng: StdRng) -> Self {
        RpsFeature {
            game: RpsGame::new(round_frames),
            round_frames: round_frames.max(1),
            current: Gesture::NoDetection,
            rng,
        }
    }

    pub fn game(&self) -> &RpsGame { &self.game }
}

impl Feature for RpsFeature {
    fn tracking(&self) -> Tracking { Tracking::Hand }

    fn on_command(&mut self, command: Command, session: &mut Session) {
        if command == Command::Reset {
            self.game.reset();
            session.set_status("SCORES CLEARED");
        }
    }

    fn update(&mut self, landmarks: Option<&LandmarkSet>, session: &mut Session) {
        let hand = hand_of(landmarks);
        let fingers = FingerStates::read(hand, session.fingers);
        self.current = rps::classify(hand, fingers);

        if let Some(outcome) = self.game.on_frame(session.frame_index, self.current, &mut self.rng) {
            let t = self.game.tally;
            log::debug!("round {}: {}", t.rounds(), outcome);
            session.set_status(format!("W {}  L {}  T {}", t.wins, t.losses, t.ties));
        }
    }

    fn render(&self, surface: &mut Surface, landmarks: Option<&LandmarkSet>, session: &Session) {
        if let Some(hand) = hand_of(landmarks) {
            draw_hand(surface, hand);
        }

        panel(surface, 10, 10, 330, 170, "ROCK PAPER SCISSORS");
        if let Some(player) = self.game.player {
            surface.text(&format!("YOU: {}", player), 20, 40, 3, GREEN);
        }
        if let Some(computer) = self.game.computer {
            surface.text(&format!("CPU: {}", computer), 20, 75, 3, CYAN);
        }
        if let Some(outcome) = self.game.outcome {
            let color = match outcome {
                Outcome::PlayerWins   => GREEN,
                Outcome::ComputerWins => RED,
                Outcome::Tie          => YELLOW,
            };
            surface.text(&outcome.to_string(), 20, 115, 4, color);
        }

        let into_round = session.frame_index % self.round_frames;
        let fraction = into_round as f32 / self.round_frames as f32;
        progress_bar(surface, 20, 160, 310, 10, fraction, WHITE);

        surface.text(&format!("NOW: {}", self.current), 350, 20, 2, GREY);
        surface.text("FIST=ROCK  OPEN=PAPER  V=SCISSORS", 10, surface.height() - 50, 2, WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_geometry::{Finger, FingerThresholds, HandSketch, Keypoint};
    use std::time::Instant;

    fn hand(fingers: FingerStates) -> LandmarkSet {
        LandmarkSet::Hand(HandSketch::new(Keypoint::new(300, 300)).with_fingers(fingers).build())
    }

    fn play(f: &mut RpsFeature, s: &mut Session, set: Option<&LandmarkSet>, frames: u64) {
        for _ in 0..frames {
            s.advance(s.now);
            f.update(set, s);
        }
    }

    #[test]
    fn one_round_per_thirty_frames() {
        let mut f = RpsFeature::with_rng(30, StdRng::seed_from_u64(7));
        let mut s = Session::new(640, 480, FingerThresholds::default(), Instant::now());
        let rock = hand(FingerStates::NONE);

        play(&mut f, &mut s, Some(&rock), 29);
        assert_eq!(f.game().tally.rounds(), 0);
        play(&mut f, &mut s, Some(&rock), 1);
        assert_eq!(f.game().tally.rounds(), 1);
        assert_eq!(f.game().player, Some(Gesture::Rock));
        play(&mut f, &mut s, Some(&rock), 60);
        assert_eq!(f.game().tally.rounds(), 3);
    }

    #[test]
    fn unknown_and_missing_hands_skip_rounds() {
        let mut f = RpsFeature::with_rng(30, StdRng::seed_from_u64(7));
        let mut s = Session::new(640, 480, FingerThresholds::default(), Instant::now());
        let odd = hand(FingerStates::only(&[Finger::Index, Finger::Ring]));

        play(&mut f, &mut s, Some(&odd), 30);
        assert_eq!(f.game().tally.rounds(), 0);
        assert_eq!(f.game().player, Some(Gesture::Unknown));
        play(&mut f, &mut s, None, 30);
        assert_eq!(f.game().tally.rounds(), 0);
    }

    #[test]
    fn reset_clears_the_tally() {
        let mut f = RpsFeature::with_rng(1, StdRng::seed_from_u64(1));
        let mut s = Session::new(640, 480, FingerThresholds::default(), Instant::now());
        play(&mut f, &mut s, Some(&hand(FingerStates::ALL)), 5);
        assert_eq!(f.game().tally.rounds(), 5);
        f.on_command(Command::Reset, &mut s);
        assert_eq!(f.game().tally.rounds(), 0);
    }
}
