//! `hand_demos.toml`: every field optional.
//!
//! ```toml
//! [window]
//! width  = 640
//! height = 480
//! fps    = 30
//!
//! [piano]
//! root       = 60      # C4
//! instrument = 0       # GM program
//!
//! [detector]
//! program = "python3"
//! args    = ["detect.py"]
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use hand_geometry::FingerThresholds;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub window:    WindowConfig,
    pub fingers:   FingerConfig,
    pub stability: StabilityConfig,
    pub game:      GameConfig,
    pub exercise:  ExerciseConfig,
    pub piano:     PianoConfig,
    pub detector:  DetectorConfig,
}

impl DemoConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: DemoConfig = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Like [`DemoConfig::load`], but a missing or broken file only costs a
    /// warning.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("no {} found, using built-in defaults", path.display());
            return DemoConfig::default();
        }
        match DemoConfig::load(path) {
            Ok(cfg) => {
                log::info!("loaded {}", path.display());
                cfg
            }
            Err(e) => {
                log::warn!("{:#}; using built-in defaults", e);
                DemoConfig::default()
            }
        }
    }
}

// ── [window] ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width:  u32,
    pub height: u32,
    pub fps:    u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig { width: 640, height: 480, fps: 30 }
    }
}

impl WindowConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps.max(1) as u64)
    }
}

// ── [fingers] ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FingerConfig {
    pub thumb_px:  f32,
    pub finger_px: f32,
}

impl Default for FingerConfig {
    fn default() -> Self {
        let t = FingerThresholds::default();
        FingerConfig { thumb_px: t.thumb_px, finger_px: t.finger_px }
    }
}

impl FingerConfig {
    pub fn thresholds(&self) -> FingerThresholds {
        FingerThresholds::new(self.thumb_px, self.finger_px)
    }
}

// ── [stability] ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StabilityConfig {
    /// Consecutive identical readings before a label is shown.
    pub frames: u32,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        StabilityConfig { frames: 5 }
    }
}

// ── [game] ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub round_frames: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { round_frames: 30 }
    }
}

// ── [exercise] ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExerciseConfig {
    pub goal:              u32,
    pub capture_secs:      f32,
    pub push_up_margin_px: f32,
    /// Rep timestamps kept for the pace readout.
    pub history:           usize,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        ExerciseConfig {
            goal:              10,
            capture_secs:      1.0,
            push_up_margin_px: 50.0,
            history:           10,
        }
    }
}

impl ExerciseConfig {
    pub fn capture(&self) -> Duration {
        Duration::from_secs_f32(self.capture_secs.max(0.0))
    }
}

// ── [piano] ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PianoConfig {
    pub root:             u8,
    pub velocity:         u8,
    pub channel:          u8,
    pub instrument:       u8,
    pub note_hold_frames: u32,
}

impl Default for PianoConfig {
    fn default() -> Self {
        PianoConfig {
            root:             60,
            velocity:         100,
            channel:          0,
            instrument:       0,
            note_hold_frames: 30,
        }
    }
}

// ── [detector] ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct DetectorConfig {
    pub program:   String,
    pub args:      Vec<String>,
    /// Flip x so the picture reads like a mirror.
    pub mirror:    bool,
    pub min_score: f32,
    /// How long to wait for the detector's `READY` line.
    pub ready_timeout_secs: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig {
            program:   "python3".to_string(),
            args:      vec!["detect_landmarks.py".to_string()],
            mirror:    true,
            min_score: 0.5,
            ready_timeout_secs: 30,
        }
    }
}

impl DetectorConfig {
    pub fn ready_timeout(&self) -> Duration {
        Duration::from_secs(self.ready_timeout_secs)
    }
}
