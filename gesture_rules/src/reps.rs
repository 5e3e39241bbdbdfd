//! Repetition counting.
//!
//! A repetition is one Position1 → Position2 → Position1 cycle.  How a
//! frame is placed in a position depends on the [`RepStrategy`]:
//!
//! * **Calibrated**: the user records both positions (average of the
//!   scalar over a short capture window each), then every frame goes to
//!   whichever recorded position is nearer.
//! * **Threshold**: a fixed rule with no calibration, e.g. "shoulders
//!   more than 50 px below the wrists is down".
//!
//! ```text
//!                 Calibrate              window ends            Calibrate
//!  NeedsCalibration ───────▶ CapturingPosition1 ───────▶ NeedsCalibration ───▶ …
//!        ▲                      │ (no frames)                (pos1 set)
//!        └──────────────────────┘
//!  … ───▶ CapturingPosition2 ───────▶ Counting
//!                           window ends
//! ```
//!
//! Threshold strategies start in `Counting`.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

// ════════════════════════════════════════════════════════════════════════════
// Types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Position1,
    Position2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterState {
    NeedsCalibration,
    CapturingPosition1,
    CapturingPosition2,
    Counting,
}

/// Fixed placement rules for the uncalibrated strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThresholdRule {
    /// Position2 when `value > baseline + margin`, else Position1.
    ///
    /// Push-ups: value = shoulder y, baseline = wrist y, margin = 50.
    BelowBy { margin: f32 },
    /// Position2 when `value ≤ position2_at_most`, Position1 when
    /// `value ≥ position1_at_least`, otherwise hold.
    ///
    /// Open/close reps: value = finger count, 0 closed, ≥4 open.
    Band { position2_at_most: f32, position1_at_least: f32 },
}

impl ThresholdRule {
    fn place(self, sample: RepSample) -> Option<Phase> {
        match self {
            ThresholdRule::BelowBy { margin } => Some(
                if sample.value > sample.baseline + margin { Phase::Position2 } else { Phase::Position1 },
            ),
            ThresholdRule::Band { position2_at_most, position1_at_least } => {
                if sample.value <= position2_at_most {
                    Some(Phase::Position2)
                } else if sample.value >= position1_at_least {
                    Some(Phase::Position1)
                } else {
                    None
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RepStrategy {
    Calibrated { capture: Duration },
    Threshold(ThresholdRule),
}

/// One frame's measurement.  Calibrated counting only looks at `value`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RepSample {
    pub value:    f32,
    pub baseline: f32,
}

impl RepSample {
    pub fn scalar(value: f32) -> Self {
        RepSample { value, baseline: 0.0 }
    }

    pub fn relative(value: f32, baseline: f32) -> Self {
        RepSample { value, baseline }
    }
}

#[derive(Clone, Copy, Debug)]
struct Capture {
    slot:    usize,
    started: Instant,
    sum:     f64,
    frames:  u32,
}

// ════════════════════════════════════════════════════════════════════════════
// RepCounter
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct RepCounter {
    strategy:  RepStrategy,
    state:     CounterState,
    phase:     Phase,
    reps:      u32,
    positions: [Option<f32>; 2],
    capture:   Option<Capture>,
    rep_times: VecDeque<Instant>,
    history:   usize,
    started:   Instant,
}

impl RepCounter {
    /// `history` is how many recent rep timestamps are kept for pacing.
    pub fn new(strategy: RepStrategy, history: usize, now: Instant) -> Self {
        let history = history.max(2);
        RepCounter {
            strategy,
            state:     initial_state(strategy),
            phase:     Phase::Position1,
            reps:      0,
            positions: [None, None],
            capture:   None,
            rep_times: VecDeque::with_capacity(history),
            history,
            started:   now,
        }
    }

    pub fn strategy(&self) -> RepStrategy { self.strategy }
    pub fn state(&self) -> CounterState { self.state }
    pub fn phase(&self) -> Phase { self.phase }

    /// Recorded (position1, position2).
    pub fn positions(&self) -> (Option<f32>, Option<f32>) {
        (self.positions[0], self.positions[1])
    }

    /// Rep count, or `None` while the counter is not ready to count.
    pub fn reps(&self) -> Option<u32> {
        (self.state == CounterState::Counting).then_some(self.reps)
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    /// Switch strategy; everything recorded so far is dropped.
    pub fn set_strategy(&mut self, strategy: RepStrategy, now: Instant) {
        *self = RepCounter::new(strategy, self.history, now);
    }

    /// Start the next calibration window.
    ///
    /// With position1 unrecorded this captures position1, otherwise
    /// position2.  Calling it while already counting starts over from
    /// position1.  Threshold strategies ignore it.
    pub fn begin_capture(&mut self, now: Instant) -> CounterState {
        if !matches!(self.strategy, RepStrategy::Calibrated { .. }) {
            return self.state;
        }
        if self.state == CounterState::Counting {
            self.positions = [None, None];
            self.clear_count(now);
        }
        let slot = if self.positions[0].is_none() { 0 } else { 1 };
        self.capture = Some(Capture { slot, started: now, sum: 0.0, frames: 0 });
        self.state = if slot == 0 {
            CounterState::CapturingPosition1
        } else {
            CounterState::CapturingPosition2
        };
        self.state
    }

    /// Fraction of the running capture window already elapsed.
    pub fn capture_progress(&self, now: Instant) -> Option<f32> {
        let RepStrategy::Calibrated { capture } = self.strategy else { return None };
        let c = self.capture?;
        let done = now.saturating_duration_since(c.started).as_secs_f32();
        Some((done / capture.as_secs_f32().max(f32::EPSILON)).min(1.0))
    }

    /// Feed one frame.  Returns true when this frame completed a rep.
    ///
    /// `None` means nothing was detected; it never moves the phase and
    /// contributes nothing to a capture.
    pub fn update(&mut self, sample: Option<RepSample>, now: Instant) -> bool {
        match self.state {
            CounterState::CapturingPosition1 | CounterState::CapturingPosition2 => {
                self.feed_capture(sample, now);
                false
            }
            CounterState::Counting => match sample.and_then(|s| self.place(s)) {
                Some(next) => self.advance(next, now),
                None       => false,
            },
            CounterState::NeedsCalibration => false,
        }
    }

    /// Zero the count and pacing; recorded positions are kept.
    pub fn reset(&mut self, now: Instant) {
        self.clear_count(now);
    }

    /// Mean time between the recorded reps, once two exist.
    pub fn average_rep_interval(&self) -> Option<Duration> {
        let (first, last) = (self.rep_times.front()?, self.rep_times.back()?);
        let gaps = self.rep_times.len().checked_sub(1).filter(|&n| n > 0)?;
        Some(last.saturating_duration_since(*first) / gaps as u32)
    }

    // ── internals ─────────────────────────────────────────────────────────

    fn clear_count(&mut self, now: Instant) {
        self.reps    = 0;
        self.phase   = Phase::Position1;
        self.started = now;
        self.rep_times.clear();
    }

    fn feed_capture(&mut self, sample: Option<RepSample>, now: Instant) {
        let RepStrategy::Calibrated { capture: window } = self.strategy else { return };
        let Some(mut c) = self.capture else { return };

        if now.saturating_duration_since(c.started) < window {
            if let Some(s) = sample {
                c.sum    += s.value as f64;
                c.frames += 1;
            }
            self.capture = Some(c);
            return;
        }

        self.capture = None;
        if c.frames == 0 {
            self.state = CounterState::NeedsCalibration;
            return;
        }
        self.positions[c.slot] = Some((c.sum / c.frames as f64) as f32);
        if c.slot == 0 {
            self.state = CounterState::NeedsCalibration;
        } else {
            self.clear_count(now);
            self.state = CounterState::Counting;
        }
    }

    fn place(&self, sample: RepSample) -> Option<Phase> {
        match self.strategy {
            RepStrategy::Threshold(rule) => rule.place(sample),
            RepStrategy::Calibrated { .. } => {
                let (p1, p2) = (self.positions[0]?, self.positions[1]?);
                let d1 = (sample.value - p1).abs();
                let d2 = (sample.value - p2).abs();
                if d1 < d2 {
                    Some(Phase::Position1)
                } else if d2 < d1 {
                    Some(Phase::Position2)
                } else {
                    None
                }
            }
        }
    }

    fn advance(&mut self, next: Phase, now: Instant) -> bool {
        match (self.phase, next) {
            (Phase::Position1, Phase::Position2) => {
                self.phase = Phase::Position2;
                false
            }
            (Phase::Position2, Phase::Position1) => {
                self.phase = Phase::Position1;
                self.reps += 1;
                if self.rep_times.len() == self.history {
                    self.rep_times.pop_front();
                }
                self.rep_times.push_back(now);
                true
            }
            _ => false,
        }
    }
}

fn initial_state(strategy: RepStrategy) -> CounterState {
    match strategy {
        RepStrategy::Calibrated { .. } => CounterState::NeedsCalibration,
        RepStrategy::Threshold(_)      => CounterState::Counting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_secs(1);

    fn ms(base: Instant, n: u64) -> Instant {
        base + Duration::from_millis(n)
    }

    /// Run one capture window of `values` at 100 ms spacing, then one
    /// frame past the deadline to close it.
    fn capture(c: &mut RepCounter, t0: Instant, values: &[Option<f32>]) -> Instant {
        c.begin_capture(t0);
        for (i, v) in values.iter().enumerate() {
            c.update(v.map(RepSample::scalar), ms(t0, 100 * i as u64));
        }
        let end = t0 + WINDOW;
        c.update(None, end);
        end
    }

    fn calibrated(t0: Instant, p1: f32, p2: f32) -> (RepCounter, Instant) {
        let mut c = RepCounter::new(RepStrategy::Calibrated { capture: WINDOW }, 10, t0);
        let t = capture(&mut c, t0, &[Some(p1); 5]);
        let t = capture(&mut c, t + Duration::from_secs(1), &[Some(p2); 5]);
        (c, t)
    }

    #[test]
    fn calibrated_counts_one_round_trip() {
        let t0 = Instant::now();
        let (mut c, t) = calibrated(t0, 100.0, 200.0);
        assert_eq!(c.state(), CounterState::Counting);
        assert_eq!(c.positions(), (Some(100.0), Some(200.0)));

        let fired: u32 = [100.0, 100.0, 150.0, 200.0, 200.0, 150.0, 100.0]
            .iter()
            .enumerate()
            .map(|(i, &v)| c.update(Some(RepSample::scalar(v)), ms(t, 100 * i as u64)) as u32)
            .sum();
        assert_eq!(fired, 1);
        assert_eq!(c.reps(), Some(1));
    }

    #[test]
    fn capture_averages_detected_frames_only() {
        let t0 = Instant::now();
        let mut c = RepCounter::new(RepStrategy::Calibrated { capture: WINDOW }, 10, t0);
        capture(&mut c, t0, &[Some(90.0), None, Some(110.0), None]);
        assert_eq!(c.positions().0, Some(100.0));
        assert_eq!(c.state(), CounterState::NeedsCalibration);
    }

    #[test]
    fn empty_capture_fails_closed() {
        let t0 = Instant::now();
        let mut c = RepCounter::new(RepStrategy::Calibrated { capture: WINDOW }, 10, t0);
        assert_eq!(c.begin_capture(t0), CounterState::CapturingPosition1);
        capture(&mut c, t0, &[None, None, None]);
        assert_eq!(c.state(), CounterState::NeedsCalibration);
        assert_eq!(c.positions(), (None, None));

        for (i, v) in [0.0, 500.0, 0.0, 500.0].into_iter().enumerate() {
            assert!(!c.update(Some(RepSample::scalar(v)), ms(t0, 2000 + i as u64)));
        }
        assert_eq!(c.reps(), None);
    }

    #[test]
    fn not_ready_before_calibration() {
        let t0 = Instant::now();
        let c = RepCounter::new(RepStrategy::Calibrated { capture: WINDOW }, 10, t0);
        assert_eq!(c.state(), CounterState::NeedsCalibration);
        assert_eq!(c.reps(), None);
    }

    #[test]
    fn recalibrating_while_counting_starts_over() {
        let t0 = Instant::now();
        let (mut c, t) = calibrated(t0, 100.0, 200.0);
        assert_eq!(c.begin_capture(t), CounterState::CapturingPosition1);
        assert_eq!(c.positions(), (None, None));
        assert_eq!(c.reps(), None);
    }

    #[test]
    fn pacing_keeps_at_least_two_reps() {
        let t0 = Instant::now();
        let rule = ThresholdRule::BelowBy { margin: 50.0 };
        let mut c = RepCounter::new(RepStrategy::Threshold(rule), 0, t0);
        // down/up pairs; reps complete at 100, 200 and 500 ms
        for (t, s) in [(50, 400.0), (100, 200.0), (150, 400.0), (200, 200.0), (450, 400.0), (500, 200.0)] {
            c.update(Some(RepSample::relative(s, 300.0)), ms(t0, t));
        }
        assert_eq!(c.reps(), Some(3));
        assert_eq!(c.average_rep_interval(), Some(Duration::from_millis(300)));
    }

    #[test]
    fn push_up_rule() {
        let t0 = Instant::now();
        let rule = ThresholdRule::BelowBy { margin: 50.0 };
        let mut c = RepCounter::new(RepStrategy::Threshold(rule), 10, t0);
        assert_eq!(c.reps(), Some(0));

        // shoulder y against wrist y = 300
        let shoulders = [200.0, 340.0, 360.0, 351.0, 350.0, 220.0, 380.0, 200.0];
        let fired: Vec<bool> = shoulders
            .iter()
            .enumerate()
            .map(|(i, &s)| c.update(Some(RepSample::relative(s, 300.0)), ms(t0, i as u64)))
            .collect();
        assert_eq!(fired, [false, false, false, false, true, false, false, true]);
        assert_eq!(c.reps(), Some(2));
    }

    #[test]
    fn open_close_band_holds_in_between() {
        let t0 = Instant::now();
        let rule = ThresholdRule::Band { position2_at_most: 0.0, position1_at_least: 4.0 };
        let mut c = RepCounter::new(RepStrategy::Threshold(rule), 10, t0);
        for (i, n) in [5.0, 2.0, 0.0, 2.0, 3.0, 4.0, 1.0, 3.0].into_iter().enumerate() {
            c.update(Some(RepSample::scalar(n)), ms(t0, i as u64));
        }
        assert_eq!(c.reps(), Some(1));
        assert_eq!(c.phase(), Phase::Position1);
    }

    #[test]
    fn absent_frames_do_not_move_phase() {
        let t0 = Instant::now();
        let rule = ThresholdRule::BelowBy { margin: 50.0 };
        let mut c = RepCounter::new(RepStrategy::Threshold(rule), 10, t0);
        c.update(Some(RepSample::relative(400.0, 300.0)), t0);
        assert_eq!(c.phase(), Phase::Position2);
        assert!(!c.update(None, ms(t0, 1)));
        assert_eq!(c.phase(), Phase::Position2);
    }

    #[test]
    fn pacing_uses_recent_history() {
        let t0 = Instant::now();
        let rule = ThresholdRule::BelowBy { margin: 50.0 };
        let mut c = RepCounter::new(RepStrategy::Threshold(rule), 3, t0);
        assert_eq!(c.average_rep_interval(), None);
        // One rep every 2 s for the first three, then one after 5 s.
        for (k, at) in [2u64, 4, 6, 11].into_iter().enumerate() {
            let t = t0 + Duration::from_secs(at);
            c.update(Some(RepSample::relative(400.0, 300.0)), t - Duration::from_millis(500));
            assert!(c.update(Some(RepSample::relative(200.0, 300.0)), t), "rep {}", k);
        }
        assert_eq!(c.reps(), Some(4));
        // History of 3 keeps reps at 4, 6, 11 s.
        assert_eq!(c.average_rep_interval(), Some(Duration::from_millis(3500)));
    }

    #[test]
    fn reset_keeps_calibration() {
        let t0 = Instant::now();
        let (mut c, t) = calibrated(t0, 100.0, 200.0);
        c.update(Some(RepSample::scalar(200.0)), t);
        c.update(Some(RepSample::scalar(100.0)), ms(t, 10));
        assert_eq!(c.reps(), Some(1));
        c.reset(ms(t, 20));
        assert_eq!(c.reps(), Some(0));
        assert_eq!(c.positions(), (Some(100.0), Some(200.0)));
        assert_eq!(c.elapsed(ms(t, 120)), Duration::from_millis(100));
    }
}
