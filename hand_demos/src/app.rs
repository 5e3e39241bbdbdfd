//! The one frame loop every demo runs in.
//!
//! ```text
//!   poll window ─► detect landmarks ─► step(feature) ─► render ─► present
//!        │                                 ▲
//!        └────────── commands ─────────────┘
//! ```
//!
//! A demo is a [`Feature`]: it reacts to named [`Command`]s, updates its own
//! state from one frame of landmarks, and draws itself.  [`step`] is the
//! whole per-frame contract and needs no window, so it is what the tests
//! drive.

use std::fmt;
use std::time::Instant;

use anyhow::Result;
use clap::ValueEnum;
use hand_geometry::LandmarkSet;

use crate::config::DemoConfig;
use crate::features::{
    air_piano::AirPiano, ar_overlay::ArOverlay, drawing::Drawing, exercise::Exercise,
    finger_counter::FingerCounter, posture::Posture, rps_game::RpsFeature,
    sign_language::SignLanguage, volume::Volume,
};
use crate::player::open_midi_output;
use crate::session::{Command, Session};
use crate::source::{DetectorProcess, LandmarkSource, SimulatedSource, Tracking};
use crate::surface::{Surface, GLYPH_H, GREY, WHITE};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// Feature trait
// ════════════════════════════════════════════════════════════════════════════

pub trait Feature {
    /// Hands or bodies.
    fn tracking(&self) -> Tracking;

    fn on_command(&mut self, _command: Command, _session: &mut Session) {}

    /// Advance by one frame.  `landmarks` is `None` when nothing is in view.
    fn update(&mut self, landmarks: Option<&LandmarkSet>, session: &mut Session);

    fn render(&self, surface: &mut Surface, landmarks: Option<&LandmarkSet>, session: &Session);
}

// ════════════════════════════════════════════════════════════════════════════
// FeatureKind
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FeatureKind {
    SignLanguage,
    RockPaperScissors,
    FingerCounter,
    Drawing,
    Exercise,
    AirPiano,
    Posture,
    Volume,
    ArOverlay,
}

impl FeatureKind {
    /// Menu order.
    pub const ALL: [FeatureKind; 9] = [
        FeatureKind::SignLanguage,
        FeatureKind::RockPaperScissors,
        FeatureKind::FingerCounter,
        FeatureKind::Drawing,
        FeatureKind::Exercise,
        FeatureKind::AirPiano,
        FeatureKind::Posture,
        FeatureKind::Volume,
        FeatureKind::ArOverlay,
    ];

    pub fn title(self) -> &'static str {
        match self {
            FeatureKind::SignLanguage      => "Sign Language",
            FeatureKind::RockPaperScissors => "Rock Paper Scissors",
            FeatureKind::FingerCounter     => "Finger Counter",
            FeatureKind::Drawing           => "Air Drawing",
            FeatureKind::Exercise          => "Exercise Counter",
            FeatureKind::AirPiano          => "Air Piano",
            FeatureKind::Posture           => "Hand Posture",
            FeatureKind::Volume            => "Pinch Volume",
            FeatureKind::ArOverlay         => "AR Overlay",
        }
    }

    pub fn tracking(self) -> Tracking {
        match self {
            FeatureKind::Exercise => Tracking::Body,
            _                     => Tracking::Hand,
        }
    }

    /// Build the feature.  The air piano opens its MIDI port here.
    pub fn build(self, cfg: &DemoConfig) -> Box<dyn Feature> {
        let (w, h) = (cfg.window.width as i32, cfg.window.height as i32);
        match self {
            FeatureKind::SignLanguage      => Box::new(SignLanguage::new(cfg.stability.frames, w)),
            FeatureKind::RockPaperScissors => Box::new(RpsFeature::new(cfg.game.round_frames)),
            FeatureKind::FingerCounter     => Box::new(FingerCounter::new(Instant::now())),
            FeatureKind::Drawing           => Box::new(Drawing::new(w, h)),
            FeatureKind::Exercise          => Box::new(Exercise::new(&cfg.exercise, Instant::now())),
            FeatureKind::AirPiano          => Box::new(AirPiano::new(&cfg.piano, w, h, open_midi_output())),
            FeatureKind::Posture           => Box::new(Posture::default()),
            FeatureKind::Volume            => Box::new(Volume::default()),
            FeatureKind::ArOverlay         => Box::new(ArOverlay::default()),
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.title())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// step(): one frame without a window
// ════════════════════════════════════════════════════════════════════════════

/// Run one frame of `feature`.  Returns false once the user asked to quit.
pub fn step(
    feature:   &mut dyn Feature,
    session:   &mut Session,
    landmarks: Option<&LandmarkSet>,
    commands:  &[Command],
    now:       Instant,
) -> bool {
    session.advance(now);
    for &command in commands {
        if command == Command::Quit {
            return false;
        }
        log::debug!("frame {}: {}", session.frame_index, command);
        feature.on_command(command, session);
    }
    feature.update(landmarks, session);
    true
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Open the landmark source a feature needs.
pub fn open_source(
    kind: FeatureKind,
    cfg: &DemoConfig,
    use_detector: bool,
) -> Result<Box<dyn LandmarkSource>> {
    if use_detector {
        Ok(Box::new(DetectorProcess::spawn(&cfg.detector, kind.tracking())?))
    } else {
        let (w, h) = (cfg.window.width as i32, cfg.window.height as i32);
        Ok(Box::new(SimulatedSource::new(kind.tracking(), w, h)))
    }
}

/// Run `kind` until the window closes, Esc is pressed, or the source runs
/// dry.
pub fn run(kind: FeatureKind, cfg: &DemoConfig, mut source: Box<dyn LandmarkSource>) -> Result<()> {
    let mut vis = Visualizer::new(&format!("Hand Demos - {}", kind.title()), &cfg.window)?;
    let mut feature = kind.build(cfg);
    let mut session = Session::new(
        cfg.window.width as i32,
        cfg.window.height as i32,
        cfg.fingers.thresholds(),
        Instant::now(),
    );

    log::info!("{} started", kind);
    while vis.is_open() {
        let input = vis.poll();
        let landmarks = source.detect(&input.sim)?;
        if source.is_finished() {
            break;
        }
        if !step(feature.as_mut(), &mut session, landmarks.as_ref(), &input.commands, Instant::now()) {
            break;
        }

        let surface = vis.surface_mut();
        feature.render(surface, landmarks.as_ref(), &session);
        draw_status_bar(surface, &session.status);
        vis.present()?;
    }
    log::info!("{} stopped after {} frames", kind, session.frame_index);
    Ok(())
}

const LEGEND: &str = "ESC QUIT  C CALIBRATE  R RESET  M MODE";

fn draw_status_bar(surface: &mut Surface, status: &str) {
    let h = GLYPH_H * 2 + 6;
    let y = surface.height() - h;
    surface.blend_rect(0, y, surface.width(), h, 0xFF0F3460, 0.8);
    surface.text(status, 8, y + 4, 2, WHITE);
    let lw = Surface::text_width(LEGEND, 1);
    surface.text(LEGEND, surface.width() - lw - 8, y + 4, 1, GREY);
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use hand_geometry::{FingerThresholds, HandSketch, Keypoint};
    use std::time::Duration;

    #[derive(Default)]
    struct Recording {
        commands: Vec<Command>,
        frames:   Vec<(u64, bool)>,
    }

    impl Feature for Recording {
        fn tracking(&self) -> Tracking { Tracking::Hand }
        fn on_command(&mut self, command: Command, _session: &mut Session) {
            self.commands.push(command);
        }
        fn update(&mut self, landmarks: Option<&LandmarkSet>, session: &mut Session) {
            self.frames.push((session.frame_index, landmarks.is_some()));
        }
        fn render(&self, _s: &mut Surface, _l: Option<&LandmarkSet>, _session: &Session) {}
    }

    fn session(t0: Instant) -> Session {
        Session::new(640, 480, FingerThresholds::default(), t0)
    }

    #[test]
    fn step_advances_and_forwards_commands() {
        let t0 = Instant::now();
        let mut s = session(t0);
        let mut recording = Recording::default();
        let hand = LandmarkSet::Hand(HandSketch::new(Keypoint::new(100, 100)).build());

        assert!(step(&mut recording, &mut s, Some(&hand), &[Command::Reset], t0));
        assert!(step(&mut recording, &mut s, None, &[], t0 + Duration::from_millis(33)));
        assert_eq!(recording.commands, vec![Command::Reset]);
        assert_eq!(recording.frames, vec![(1, true), (2, false)]);
        assert_eq!(s.now, t0 + Duration::from_millis(33));
    }

    #[test]
    fn quit_stops_before_update() {
        let t0 = Instant::now();
        let mut s = session(t0);
        let mut recording = Recording::default();
        assert!(!step(&mut recording, &mut s, None, &[Command::Quit, Command::Reset], t0));
        assert!(recording.frames.is_empty());
        assert!(recording.commands.is_empty());
    }

    #[test]
    fn every_feature_runs_headless() {
        let cfg = DemoConfig::default();
        let t0 = Instant::now();
        for kind in FeatureKind::ALL {
            let mut feature: Box<dyn Feature> = match kind {
                // Keep the test off real MIDI ports.
                FeatureKind::AirPiano => Box::new(AirPiano::new(
                    &cfg.piano, 640, 480, Box::new(crate::player::NullOut),
                )),
                _ => kind.build(&cfg),
            };
            assert_eq!(feature.tracking(), kind.tracking());

            let mut src = SimulatedSource::new(kind.tracking(), 640, 480);
            let mut s = session(t0);
            let mut surface = Surface::new(640, 480, 0xFF000000);
            for i in 0..40u64 {
                let input = crate::source::SimInput {
                    cursor: Some((320, 200 + (i as i32 % 10) * 10)),
                    keys:   Vec::new(),
                };
                let set = src.detect(&input).unwrap();
                let now = t0 + Duration::from_millis(33 * i);
                assert!(step(feature.as_mut(), &mut s, set.as_ref(), &[], now));
                feature.render(&mut surface, set.as_ref(), &s);
            }
            feature.on_command(Command::Reset, &mut s);
            feature.update(None, &mut s);
            feature.render(&mut surface, None, &s);
        }
    }

    #[test]
    fn kebab_case_names_on_the_command_line() {
        let names: Vec<String> = FeatureKind::ALL
            .iter()
            .filter_map(|k| k.to_possible_value().map(|v| v.get_name().to_string()))
            .collect();
        assert_eq!(names[0], "sign-language");
        assert_eq!(names[1], "rock-paper-scissors");
        assert_eq!(names[8], "ar-overlay");
    }
}
