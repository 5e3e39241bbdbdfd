//! Where landmarks come from: an external detector process or the
//! keyboard/mouse simulation.
//!
//! The public interface is [`LandmarkSource::detect`], called once per frame.
//! Features never know which source is feeding them.
//!
//! ### Simulation keys
//!
//! | Key | Effect |
//! |---|---|
//! | mouse | palm (hand) or shoulders (body) follow the cursor |
//! | `1`–`5` | toggle thumb … pinky |
//! | `F` / `O` | close / open every finger |
//! | `P` | toggle thumb–index pinch |
//! | `Up` / `Down` | widen / narrow the pinch gap |
//! | `H` | hide the hand (no detection) |

use std::io::{BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use hand_geometry::{
    is_plausible_normalized, BodySketch, Finger, FingerStates, HandLandmarks, HandSketch,
    Keypoint, LandmarkSet, PoseLandmarks, HAND_POINTS,
};
use serde::Deserialize;

use crate::config::DetectorConfig;

/// Detector visibility below which a body point is treated as absent.
pub const MIN_VISIBILITY: f32 = 0.5;

/// Largest frame side a detector line may claim, in pixels.
pub const MAX_FRAME_SIDE: u32 = 8192;

/// Which landmark scheme a feature consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tracking {
    Hand,
    Body,
}

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSource trait
// ════════════════════════════════════════════════════════════════════════════

pub trait LandmarkSource {
    /// This frame's landmarks; `Ok(None)` when nothing is in view.
    fn detect(&mut self, input: &SimInput) -> Result<Option<LandmarkSet>>;

    /// True once the source can never produce another frame.
    fn is_finished(&self) -> bool {
        false
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimulatedSource: keyboard/mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the window, gathered once per frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimInput {
    /// Mouse position in window pixels, if the pointer is over the window.
    pub cursor: Option<(i32, i32)>,
    /// Keys pressed this frame (first press only, no repeat).
    pub keys:   Vec<SimKey>,
}

/// Simulated key codes (mapped from minifb Key).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimKey {
    ToggleFinger(Finger), // 1–5
    CloseAll,             // F
    OpenAll,              // O
    Pinch,                // P
    Wider,                // Up
    Narrower,             // Down
    Hide,                 // H
}

const GAP_STEP: i32 = 5;
const GAP_MAX:  i32 = 150;

/// Synthesises a plausible hand or body under the mouse cursor.
pub struct SimulatedSource {
    tracking: Tracking,
    height:   i32,
    cursor:   Keypoint,
    fingers:  FingerStates,
    pinch:    bool,
    gap:      i32,
    hidden:   bool,
}

impl SimulatedSource {
    pub fn new(tracking: Tracking, width: i32, height: i32) -> Self {
        SimulatedSource {
            tracking,
            height,
            cursor:  Keypoint::new(width / 2, height / 2),
            fingers: FingerStates::ALL,
            pinch:   false,
            gap:     30,
            hidden:  false,
        }
    }

    pub fn fingers(&self) -> FingerStates { self.fingers }
    pub fn pinch_gap(&self) -> Option<i32> { self.pinch.then_some(self.gap) }

    fn apply(&mut self, key: SimKey) {
        match key {
            SimKey::ToggleFinger(f) => self.fingers.toggle(f),
            SimKey::CloseAll        => self.fingers = FingerStates::NONE,
            SimKey::OpenAll         => self.fingers = FingerStates::ALL,
            SimKey::Pinch           => self.pinch = !self.pinch,
            SimKey::Wider           => self.gap = (self.gap + GAP_STEP).min(GAP_MAX),
            SimKey::Narrower        => self.gap = (self.gap - GAP_STEP).max(0),
            SimKey::Hide            => self.hidden = !self.hidden,
        }
    }

    fn hand(&self) -> HandLandmarks {
        let sketch = HandSketch::new(self.cursor).with_fingers(self.fingers);
        match self.pinch_gap() {
            Some(gap) => sketch.with_pinch(gap).build(),
            None      => sketch.build(),
        }
    }

    /// Shoulders at the cursor, hands planted two thirds of the way down.
    fn body(&self) -> PoseLandmarks {
        BodySketch::new(self.cursor.x, self.cursor.y, self.height * 2 / 3).build()
    }
}

impl LandmarkSource for SimulatedSource {
    fn detect(&mut self, input: &SimInput) -> Result<Option<LandmarkSet>> {
        for &key in &input.keys {
            self.apply(key);
        }
        if let Some(c) = input.cursor {
            self.cursor = c.into();
        }
        if self.hidden {
            return Ok(None);
        }
        Ok(Some(match self.tracking {
            Tracking::Hand => LandmarkSet::Hand(self.hand()),
            Tracking::Body => LandmarkSet::Pose(self.body()),
        }))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Detector wire format
// ════════════════════════════════════════════════════════════════════════════

fn fully_visible() -> f32 { 1.0 }

#[derive(Deserialize, Debug)]
struct PointJson {
    x: f32,
    y: f32,
    #[serde(default = "fully_visible")]
    visibility: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    #[serde(default = "fully_visible")]
    score:     f32,
    landmarks: Vec<PointJson>,
}

#[derive(Deserialize, Debug)]
struct FrameJson {
    width:  u32,
    height: u32,
    #[serde(default)]
    hands:  Vec<HandJson>,
    #[serde(default)]
    pose:   Vec<PointJson>,
    #[serde(default)]
    error:  Option<String>,
}

/// Turn one JSON line into this frame's landmarks.
///
/// Only the first hand with `score ≥ min_score` and exactly 21 points is
/// kept.  A body with no visible joint counts as no body.  A frame with an
/// implausible size or any coordinate outside the normalised range is
/// dropped whole.
pub fn parse_frame(
    line: &str,
    tracking: Tracking,
    mirror: bool,
    min_score: f32,
) -> Result<Option<LandmarkSet>> {
    let frame: FrameJson = serde_json::from_str(line.trim())
        .with_context(|| format!("malformed detector line: {}", line.trim()))?;

    if let Some(error) = frame.error {
        log::warn!("detector error: {}", error);
        return Ok(None);
    }

    let sides = 1..=MAX_FRAME_SIDE;
    if !sides.contains(&frame.width) || !sides.contains(&frame.height) {
        log::warn!("detector frame size {}x{} out of range", frame.width, frame.height);
        return Ok(None);
    }
    let wild = frame
        .hands
        .iter()
        .flat_map(|h| &h.landmarks)
        .chain(&frame.pose)
        .find(|p| !is_plausible_normalized(p.x) || !is_plausible_normalized(p.y));
    if let Some(p) = wild {
        log::warn!("detector coordinate out of range: ({}, {})", p.x, p.y);
        return Ok(None);
    }

    let px = |p: &PointJson| Keypoint::from_normalized(p.x, p.y, frame.width, frame.height, mirror);

    match tracking {
        Tracking::Hand => {
            for hand in &frame.hands {
                if hand.score < min_score {
                    continue;
                }
                if hand.landmarks.len() != HAND_POINTS {
                    log::debug!("skipping hand with {} landmarks", hand.landmarks.len());
                    continue;
                }
                let points: Vec<Keypoint> = hand.landmarks.iter().map(px).collect();
                return Ok(HandLandmarks::from_slice(&points).map(LandmarkSet::Hand));
            }
            Ok(None)
        }
        Tracking::Body => {
            let points: Vec<Option<Keypoint>> = frame
                .pose
                .iter()
                .map(|p| (p.visibility >= MIN_VISIBILITY).then(|| px(p)))
                .collect();
            let pose = PoseLandmarks::from_detector(&points);
            Ok((!pose.is_empty()).then_some(LandmarkSet::Pose(pose)))
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DetectorStream / DetectorProcess: external detector over stdout
// ════════════════════════════════════════════════════════════════════════════

/// The line protocol, independent of where the lines come from.
pub struct DetectorStream<R> {
    reader:    R,
    tracking:  Tracking,
    mirror:    bool,
    min_score: f32,
    finished:  bool,
    line:      Vec<u8>,
}

impl<R: BufRead> DetectorStream<R> {
    /// Wait for the `READY` line, then hand back a stream of frames.
    pub fn handshake(mut reader: R, tracking: Tracking, cfg: &DetectorConfig) -> Result<Self> {
        let mut ready = String::new();
        reader.read_line(&mut ready).context("waiting for detector READY")?;
        if ready.trim() != "READY" {
            bail!("detector did not signal ready, got: {:?}", ready.trim());
        }
        Ok(DetectorStream {
            reader,
            tracking,
            mirror:    cfg.mirror,
            min_score: cfg.min_score,
            finished:  false,
            line:      Vec::new(),
        })
    }

    /// Next frame; a line that is not valid UTF-8 is decoded lossily and
    /// then fails to parse like any other garbage.
    pub fn next_frame(&mut self) -> Result<Option<LandmarkSet>> {
        if self.finished {
            return Ok(None);
        }
        self.line.clear();
        let n = self.reader.read_until(b'\n', &mut self.line).context("reading detector output")?;
        if n == 0 {
            log::info!("detector output ended");
            self.finished = true;
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&self.line);
        match parse_frame(&line, self.tracking, self.mirror, self.min_score) {
            Ok(set) => Ok(set),
            Err(e) => {
                log::warn!("{:#}", e);
                Ok(None)
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<R: BufRead + Send + 'static> DetectorStream<R> {
    /// [`handshake`](Self::handshake) on a helper thread, giving up after
    /// `timeout`.  The thread is left blocked on the reader; closing the
    /// reader's source lets it finish.
    pub fn handshake_within(
        reader: R,
        tracking: Tracking,
        cfg: &DetectorConfig,
        timeout: Duration,
    ) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let cfg = cfg.clone();
        thread::Builder::new()
            .name("detector-ready".into())
            .spawn(move || {
                let _ = tx.send(DetectorStream::handshake(reader, tracking, &cfg));
            })
            .context("spawning detector handshake thread")?;

        match rx.recv_timeout(timeout) {
            Ok(stream) => stream,
            Err(RecvTimeoutError::Timeout) => {
                bail!("detector sent no READY within {}s", timeout.as_secs_f32())
            }
            Err(RecvTimeoutError::Disconnected) => bail!("detector handshake thread died"),
        }
    }
}

/// A detector command that owns the camera and prints one JSON line per
/// frame on stdout.
pub struct DetectorProcess {
    child:  Child,
    stream: DetectorStream<BufReader<ChildStdout>>,
}

impl DetectorProcess {
    pub fn spawn(cfg: &DetectorConfig, tracking: Tracking) -> Result<Self> {
        log::info!("starting detector: {} {}", cfg.program, cfg.args.join(" "));
        let mut child = Command::new(&cfg.program)
            .args(&cfg.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("failed to start detector `{}`", cfg.program))?;

        let stdout = child.stdout.take().context("detector stdout was not captured")?;
        let reader = BufReader::new(stdout);
        let stream = match DetectorStream::handshake_within(reader, tracking, cfg, cfg.ready_timeout()) {
            Ok(s) => s,
            Err(e) => {
                let _ = child.kill();
                return Err(e);
            }
        };
        log::info!("detector ready");
        Ok(DetectorProcess { child, stream })
    }
}

impl LandmarkSource for DetectorProcess {
    fn detect(&mut self, _input: &SimInput) -> Result<Option<LandmarkSet>> {
        self.stream.next_frame()
    }

    fn is_finished(&self) -> bool {
        self.stream.is_finished()
    }
}

impl Drop for DetectorProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_geometry::{FingerThresholds, Joint};
    use std::io::{self, Cursor, Read};

    fn hand_line(score: f32, points: usize) -> String {
        let lm: Vec<String> = (0..points)
            .map(|i| format!(r#"{{"x":{},"y":0.5}}"#, 0.25 + i as f32 * 0.01))
            .collect();
        format!(
            r#"{{"width":640,"height":480,"hands":[{{"score":{},"landmarks":[{}]}}]}}"#,
            score,
            lm.join(","),
        )
    }

    fn keys(k: &[SimKey]) -> SimInput {
        SimInput { cursor: Some((300, 200)), keys: k.to_vec() }
    }

    #[test]
    fn simulated_hand_follows_cursor_and_keys() {
        let mut src = SimulatedSource::new(Tracking::Hand, 640, 480);
        let set = src.detect(&keys(&[])).unwrap().unwrap();
        let hand = set.as_hand().unwrap();
        assert_eq!(hand.palm(), Keypoint::new(300, 200));
        assert_eq!(FingerStates::read(Some(hand), FingerThresholds::default()), FingerStates::ALL);

        let set = src.detect(&keys(&[SimKey::CloseAll, SimKey::ToggleFinger(Finger::Index)])).unwrap();
        let hand = set.as_ref().and_then(LandmarkSet::as_hand);
        let states = FingerStates::read(hand, FingerThresholds::default());
        assert_eq!(states, FingerStates::only(&[Finger::Index]));
    }

    #[test]
    fn simulated_hide_means_no_detection() {
        let mut src = SimulatedSource::new(Tracking::Hand, 640, 480);
        assert!(src.detect(&keys(&[SimKey::Hide])).unwrap().is_none());
        assert!(src.detect(&keys(&[])).unwrap().is_none());
        assert!(src.detect(&keys(&[SimKey::Hide])).unwrap().is_some());
    }

    #[test]
    fn simulated_pinch_gap_is_clamped() {
        let mut src = SimulatedSource::new(Tracking::Hand, 640, 480);
        assert_eq!(src.pinch_gap(), None);
        src.detect(&keys(&[SimKey::Pinch])).unwrap();
        assert_eq!(src.pinch_gap(), Some(30));
        for _ in 0..10 {
            src.detect(&keys(&[SimKey::Narrower])).unwrap();
        }
        assert_eq!(src.pinch_gap(), Some(0));
    }

    #[test]
    fn simulated_body_tracks_shoulders() {
        let mut src = SimulatedSource::new(Tracking::Body, 640, 480);
        let set = src.detect(&keys(&[])).unwrap().unwrap();
        let body = set.as_pose().unwrap();
        assert_eq!(body.shoulder_y(), Some(200.0));
        assert_eq!(body.wrist_y(), Some(320.0));
        assert!(body.is_standing());
    }

    #[test]
    fn parses_and_mirrors_a_hand() {
        let set = parse_frame(&hand_line(0.9, 21), Tracking::Hand, true, 0.5).unwrap().unwrap();
        let hand = set.as_hand().unwrap();
        // x = 0.25 mirrored → 0.75 · 640
        assert_eq!(hand.wrist(), Keypoint::new(480, 240));
    }

    #[test]
    fn low_score_and_short_hands_are_dropped() {
        assert!(parse_frame(&hand_line(0.3, 21), Tracking::Hand, false, 0.5).unwrap().is_none());
        assert!(parse_frame(&hand_line(0.9, 20), Tracking::Hand, false, 0.5).unwrap().is_none());
    }

    #[test]
    fn invisible_pose_points_are_absent() {
        let mut pts = vec![r#"{"x":0.5,"y":0.5,"visibility":0.1}"#.to_string(); 33];
        pts[11] = r#"{"x":0.4,"y":0.25,"visibility":0.9}"#.to_string();
        pts[12] = r#"{"x":0.6,"y":0.25,"visibility":0.9}"#.to_string();
        let line = format!(r#"{{"width":640,"height":480,"pose":[{}]}}"#, pts.join(","));

        let set = parse_frame(&line, Tracking::Body, false, 0.5).unwrap().unwrap();
        let body = set.as_pose().unwrap();
        assert_eq!(body.get(Joint::LeftShoulder), Some(Keypoint::new(256, 120)));
        assert_eq!(body.get(Joint::Nose), None);
        assert_eq!(body.shoulder_y(), Some(120.0));
    }

    #[test]
    fn empty_pose_is_no_body() {
        let line = r#"{"width":640,"height":480,"pose":[]}"#;
        assert!(parse_frame(line, Tracking::Body, false, 0.5).unwrap().is_none());
    }

    #[test]
    fn stream_requires_ready() {
        let err = DetectorStream::handshake(
            Cursor::new("hello\n"),
            Tracking::Hand,
            &DetectorConfig::default(),
        );
        assert!(err.is_err());
    }

    #[test]
    fn out_of_range_coordinates_are_no_detection() {
        let wild = hand_line(0.9, 21).replacen(r#""x":0.25"#, r#""x":50000000.0"#, 1);
        assert!(parse_frame(&wild, Tracking::Hand, false, 0.5).unwrap().is_none());

        let huge = hand_line(0.9, 21).replacen(r#""width":640"#, r#""width":4000000000"#, 1);
        assert!(parse_frame(&huge, Tracking::Hand, false, 0.5).unwrap().is_none());
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let mut input = b"READY\n{\"e\":\"\xff\"}\n".to_vec();
        input.extend_from_slice(hand_line(0.9, 21).as_bytes());
        input.push(b'\n');
        let mut stream =
            DetectorStream::handshake(Cursor::new(input), Tracking::Hand, &DetectorConfig::default())
                .unwrap();
        assert!(stream.next_frame().unwrap().is_none());
        assert!(!stream.is_finished());
        assert!(stream.next_frame().unwrap().is_some());
    }

    /// A detector that never writes anything.
    struct Silent;

    impl Read for Silent {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            thread::sleep(Duration::from_secs(2));
            Ok(0)
        }
    }

    #[test]
    fn handshake_gives_up_without_ready() {
        let err = DetectorStream::handshake_within(
            BufReader::new(Silent),
            Tracking::Hand,
            &DetectorConfig::default(),
            Duration::from_millis(50),
        )
        .err()
        .map(|e| e.to_string());
        assert!(err.is_some_and(|e| e.contains("READY")));

        let ok = DetectorStream::handshake_within(
            Cursor::new("READY\n".to_string()),
            Tracking::Hand,
            &DetectorConfig::default(),
            Duration::from_secs(5),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn stream_skips_garbage_and_ends_at_eof() {
        let input = format!("READY\nnot json\n{}\n", hand_line(0.9, 21));
        let mut stream =
            DetectorStream::handshake(Cursor::new(input), Tracking::Hand, &DetectorConfig::default())
                .unwrap();
        assert!(stream.next_frame().unwrap().is_none());
        assert!(!stream.is_finished());
        assert!(stream.next_frame().unwrap().is_some());
        assert!(stream.next_frame().unwrap().is_none());
        assert!(stream.is_finished());
    }
}
