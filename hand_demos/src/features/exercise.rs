//! Push-up counter on the body tracker.
//!
//! By default a rep is counted with the fixed rule: down while the
//! shoulders are more than `push_up_margin_px` below the wrists, up
//! otherwise.  `M` switches to calibrated counting on shoulder height:
//! `C` records the up position, `C` again the down position, and
//! counting starts.
//!
//! ```text
//!   NeedsCalibration ─C─► Capturing(1) ─► NeedsCalibration ─C─► Capturing(2) ─► Counting
//! ```

use std::time::{Duration, Instant};

use gesture_rules::{CounterState, RepCounter, RepSample, RepStrategy, ThresholdRule};
use hand_geometry::{LandmarkSet, PoseLandmarks};

use crate::app::Feature;
use crate::config::ExerciseConfig;
use crate::session::{Command, Session};
use crate::source::Tracking;
use crate::surface::{Surface, CYAN, GREEN, GREY, ORANGE, WHITE, YELLOW};

use super::{body_of, draw_body, panel, progress_bar, SKELETON};

pub struct Exercise {
    counter:    RepCounter,
    threshold:  RepStrategy,
    calibrated: RepStrategy,
    goal:       u32,
    standing:   bool,
    seen:       bool,
}

impl Exercise {
    pub fn new(cfg: &ExerciseConfig, now: Instant) -> Self {
        let threshold = RepStrategy::Threshold(ThresholdRule::BelowBy { margin: cfg.push_up_margin_px });
        Exercise {
            counter:    RepCounter::new(threshold, cfg.history, now),
            threshold,
            calibrated: RepStrategy::Calibrated { capture: cfg.capture() },
            goal:       cfg.goal.max(1),
            standing:   false,
            seen:       false,
        }
    }

    pub fn counter(&self) -> &RepCounter { &self.counter }
    pub fn is_standing(&self) -> bool { self.standing }

    pub fn is_calibrated_mode(&self) -> bool {
        self.counter.strategy() == self.calibrated
    }

    fn sample(&self, body: &PoseLandmarks) -> Option<RepSample> {
        let shoulder = body.shoulder_y()?;
        if self.is_calibrated_mode() {
            Some(RepSample::scalar(shoulder))
        } else {
            Some(RepSample::relative(shoulder, body.wrist_y()?))
        }
    }

    fn toggle_mode(&mut self, session: &mut Session) {
        let next = if self.is_calibrated_mode() { self.threshold } else { self.calibrated };
        self.counter.set_strategy(next, session.now);
        let name = if self.is_calibrated_mode() { "CALIBRATED" } else { "PUSH-UP RULE" };
        log::info!("rep counting: {}", name);
        session.set_status(format!("MODE: {}", name));
    }
}

fn fmt_secs(d: Duration) -> String {
    format!("{:.1}S", d.as_secs_f32())
}

impl Feature for Exercise {
    fn tracking(&self) -> Tracking { Tracking::Body }

    fn on_command(&mut self, command: Command, session: &mut Session) {
        match command {
            Command::Reset => {
                self.counter.reset(session.now);
                session.set_status("COUNT RESET");
            }
            Command::ToggleMode => self.toggle_mode(session),
            Command::Calibrate => match self.counter.begin_capture(session.now) {
                CounterState::CapturingPosition1 => session.set_status("HOLD THE UP POSITION"),
                CounterState::CapturingPosition2 => session.set_status("HOLD THE DOWN POSITION"),
                _ => session.set_status("PRESS M FOR CALIBRATED MODE"),
            },
            Command::Quit => {}
        }
    }

    fn update(&mut self, landmarks: Option<&LandmarkSet>, session: &mut Session) {
        let body = body_of(landmarks).filter(|b| !b.is_empty());
        self.seen     = body.is_some();
        self.standing = body.map_or(false, PoseLandmarks::is_standing);

        let before = self.counter.state();
        let sample = body.and_then(|b| self.sample(b));
        if self.counter.update(sample, session.now) {
            let reps = self.counter.reps().unwrap_or(0);
            if reps == self.goal {
                log::info!("goal of {} reps reached", self.goal);
                session.set_status("GOAL REACHED!");
            } else {
                session.set_status(format!("REP {}", reps));
            }
        }

        let after = self.counter.state();
        if before != after {
            log::debug!("counter {:?} -> {:?}", before, after);
            match after {
                CounterState::NeedsCalibration if self.counter.positions().0.is_some() => {
                    session.set_status("UP RECORDED, PRESS C FOR DOWN");
                }
                CounterState::NeedsCalibration => session.set_status("NOTHING SEEN, PRESS C AGAIN"),
                CounterState::Counting => session.set_status("CALIBRATED, GO!"),
                _ => {}
            }
        }
    }

    fn render(&self, surface: &mut Surface, landmarks: Option<&LandmarkSet>, session: &Session) {
        if let Some(body) = body_of(landmarks) {
            let color = if self.standing { GREEN } else { SKELETON };
            draw_body(surface, body, color);
        }
        if !self.seen {
            let msg = "STEP INTO VIEW";
            let x = (surface.width() - Surface::text_width(msg, 3)) / 2;
            surface.text(msg, x, surface.height() / 2, 3, WHITE);
        }

        panel(surface, 10, 10, 260, 180, "PUSH-UPS");
        match self.counter.reps() {
            Some(n) => surface.text(&n.to_string(), 20, 35, 10, GREEN),
            None    => surface.text("CALIBRATE", 20, 50, 3, ORANGE),
        }
        surface.text(&format!("TIME {}", fmt_secs(self.counter.elapsed(session.now))), 140, 40, 2, WHITE);
        if let Some(avg) = self.counter.average_rep_interval() {
            surface.text(&format!("PACE {}/REP", fmt_secs(avg)), 140, 60, 2, CYAN);
        }

        let reps = self.counter.reps().unwrap_or(0);
        surface.text(&format!("GOAL {}/{}", reps.min(self.goal), self.goal), 20, 125, 2, WHITE);
        progress_bar(surface, 20, 145, 240, 14, reps as f32 / self.goal as f32, GREEN);

        let mode = if self.is_calibrated_mode() { "MODE: CALIBRATED" } else { "MODE: PUSH-UP RULE" };
        surface.text(mode, 20, 170, 1, GREY);
        if let Some(p) = self.counter.capture_progress(session.now) {
            surface.text("CAPTURING", 290, 20, 2, YELLOW);
            progress_bar(surface, 290, 40, 150, 10, p, YELLOW);
        }
        if self.standing {
            surface.text("STANDING", 290, 60, 2, GREEN);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_geometry::{BodySketch, FingerThresholds};

    fn body(shoulder_y: i32) -> LandmarkSet {
        LandmarkSet::Pose(BodySketch::new(320, shoulder_y, 300).build())
    }

    fn feed(e: &mut Exercise, s: &mut Session, shoulders: &[i32], t: &mut Instant) {
        for &y in shoulders {
            *t += Duration::from_millis(100);
            s.advance(*t);
            e.update(Some(&body(y)), s);
        }
    }

    fn setup() -> (Exercise, Session, Instant) {
        let t0 = Instant::now();
        let e = Exercise::new(&ExerciseConfig::default(), t0);
        let s = Session::new(640, 480, FingerThresholds::default(), t0);
        (e, s, t0)
    }

    #[test]
    fn push_up_rule_counts_down_then_up() {
        let (mut e, mut s, mut t) = setup();
        feed(&mut e, &mut s, &[200, 340, 220, 345], &mut t);
        assert_eq!(e.counter().reps(), Some(0));
        feed(&mut e, &mut s, &[360, 200, 380, 200], &mut t);
        assert_eq!(e.counter().reps(), Some(2));
        assert!(e.counter().average_rep_interval().is_some());
        assert_eq!(s.status, "REP 2");
    }

    #[test]
    fn standing_shows_for_an_upright_body() {
        let (mut e, mut s, _) = setup();
        e.update(Some(&body(200)), &mut s);
        assert!(e.is_standing());
        let lying = LandmarkSet::Pose(BodySketch::new(320, 200, 300).with_hip_y(190).build());
        e.update(Some(&lying), &mut s);
        assert!(!e.is_standing());
        e.update(None, &mut s);
        assert!(!e.is_standing());
    }

    #[test]
    fn calibrated_mode_needs_two_captures() {
        let (mut e, mut s, mut t) = setup();
        e.on_command(Command::ToggleMode, &mut s);
        assert!(e.is_calibrated_mode());
        assert_eq!(e.counter().reps(), None);

        e.on_command(Command::Calibrate, &mut s);
        feed(&mut e, &mut s, &[200; 12], &mut t);
        assert_eq!(e.counter().state(), CounterState::NeedsCalibration);

        e.on_command(Command::Calibrate, &mut s);
        feed(&mut e, &mut s, &[300; 12], &mut t);
        assert_eq!(e.counter().state(), CounterState::Counting);
        assert_eq!(s.status, "CALIBRATED, GO!");

        feed(&mut e, &mut s, &[290, 210, 295, 205], &mut t);
        assert_eq!(e.counter().reps(), Some(2));

        e.on_command(Command::ToggleMode, &mut s);
        assert!(!e.is_calibrated_mode());
        assert_eq!(e.counter().reps(), Some(0));
    }

    #[test]
    fn reset_zeroes_the_count() {
        let (mut e, mut s, mut t) = setup();
        feed(&mut e, &mut s, &[200, 360, 200], &mut t);
        assert_eq!(e.counter().reps(), Some(1));
        e.on_command(Command::Reset, &mut s);
        assert_eq!(e.counter().reps(), Some(0));
    }
}
