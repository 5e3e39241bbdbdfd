//! Extended-finger count, with open/close reps as a side counter.

use std::time::Instant;

use gesture_rules::{RepCounter, RepSample, RepStrategy, ThresholdRule};
use hand_geometry::{FingerStates, LandmarkSet};

use crate::app::Feature;
use crate::session::{Command, Session};
use crate::source::Tracking;
use crate::surface::{Surface, CYAN, GREEN, WHITE};

use super::{draw_hand, finger_list, hand_of, no_hand, panel};

/// Fist is closed, four or more fingers is open.
const OPEN_CLOSE: ThresholdRule = ThresholdRule::Band { position2_at_most: 0.0, position1_at_least: 4.0 };

pub struct FingerCounter {
    states: FingerStates,
    seen:   bool,
    reps:   RepCounter,
}

impl FingerCounter {
    pub fn new(now: Instant) -> Self {
        FingerCounter {
            states: FingerStates::NONE,
            seen:   false,
            reps:   RepCounter::new(RepStrategy::Threshold(OPEN_CLOSE), 10, now),
        }
    }

    pub fn states(&self) -> FingerStates { self.states }

    pub fn open_close_reps(&self) -> u32 {
        self.reps.reps().unwrap_or(0)
    }
}

impl Feature for FingerCounter {
    fn tracking(&self) -> Tracking { Tracking::Hand }

    fn on_command(&mut self, command: Command, session: &mut Session) {
        if command == Command::Reset {
            self.reps.reset(session.now);
        }
    }

    fn update(&mut self, landmarks: Option<&LandmarkSet>, session: &mut Session) {
        let hand = hand_of(landmarks);
        self.seen   = hand.is_some();
        self.states = FingerStates::read(hand, session.fingers);

        let sample = hand.map(|_| RepSample::scalar(self.states.count() as f32));
        if self.reps.update(sample, session.now) {
            session.set_status(format!("OPEN/CLOSE REPS: {}", self.open_close_reps()));
        }
    }

    fn render(&self, surface: &mut Surface, landmarks: Option<&LandmarkSet>, _session: &Session) {
        match hand_of(landmarks) {
            Some(hand) => draw_hand(surface, hand),
            None       => no_hand(surface),
        }
        if !self.seen {
            return;
        }

        panel(surface, 10, 10, 180, 140, "FINGERS");
        surface.text(&self.states.count().to_string(), 60, 40, 14, GREEN);

        panel(surface, 10, 160, 200, 100, "");
        finger_list(surface, 20, 170, self.states);

        surface.text(&format!("REPS {}", self.open_close_reps()), 200, 20, 2, CYAN);
        surface.text("CLOSE THEN OPEN FOR A REP", 200, 40, 1, WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_geometry::{Finger, FingerThresholds, HandSketch, Keypoint};

    fn hand(fingers: FingerStates) -> LandmarkSet {
        LandmarkSet::Hand(HandSketch::new(Keypoint::new(300, 300)).with_fingers(fingers).build())
    }

    fn session() -> Session {
        Session::new(640, 480, FingerThresholds::default(), Instant::now())
    }

    #[test]
    fn counts_up_fingers() {
        let mut f = FingerCounter::new(Instant::now());
        let mut s = session();
        f.update(Some(&hand(FingerStates::only(&[Finger::Index, Finger::Middle, Finger::Pinky]))), &mut s);
        assert_eq!(f.states().count(), 3);
        assert!(f.states().is_up(Finger::Pinky));
        assert!(!f.states().is_up(Finger::Ring));

        f.update(None, &mut s);
        assert_eq!(f.states(), FingerStates::NONE);
    }

    #[test]
    fn close_then_open_is_one_rep() {
        let mut f = FingerCounter::new(Instant::now());
        let mut s = session();
        let open = hand(FingerStates::ALL);
        let fist = hand(FingerStates::NONE);
        let two  = hand(FingerStates::only(&[Finger::Index, Finger::Middle]));

        for set in [&open, &fist, &two, &open, &fist, &open] {
            f.update(Some(set), &mut s);
        }
        assert_eq!(f.open_close_reps(), 2);

        f.on_command(Command::Reset, &mut s);
        assert_eq!(f.open_close_reps(), 0);
    }
}
