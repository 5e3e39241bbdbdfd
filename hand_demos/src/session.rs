//! Per-run state shared by the frame loop and the active feature.

use std::fmt;
use std::time::{Duration, Instant};

use hand_geometry::FingerThresholds;

/// Keyboard actions a feature can react to.  Raw key codes stay in the
/// visualizer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Esc
    Quit,
    /// C
    Calibrate,
    /// R
    Reset,
    /// M
    ToggleMode,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Command::Quit       => "quit",
            Command::Calibrate  => "calibrate",
            Command::Reset      => "reset",
            Command::ToggleMode => "toggle mode",
        };
        f.write_str(s)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════

/// Owned by the loop and lent to the feature every frame.
#[derive(Clone, Debug)]
pub struct Session {
    /// 1 on the first processed frame.
    pub frame_index: u64,
    pub started:     Instant,
    pub now:         Instant,
    pub width:       i32,
    pub height:      i32,
    pub fingers:     FingerThresholds,
    /// Bottom-of-window message; features overwrite it freely.
    pub status:      String,
}

impl Session {
    pub fn new(width: i32, height: i32, fingers: FingerThresholds, now: Instant) -> Self {
        Session {
            frame_index: 0,
            started:     now,
            now,
            width,
            height,
            fingers,
            status:      String::new(),
        }
    }

    /// Start the next frame.
    pub fn advance(&mut self, now: Instant) {
        self.frame_index += 1;
        self.now = now;
    }

    pub fn elapsed(&self) -> Duration {
        self.now.saturating_duration_since(self.started)
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_count_from_one() {
        let t0 = Instant::now();
        let mut s = Session::new(640, 480, FingerThresholds::default(), t0);
        assert_eq!(s.frame_index, 0);
        s.advance(t0 + Duration::from_millis(33));
        assert_eq!(s.frame_index, 1);
        s.advance(t0 + Duration::from_millis(66));
        assert_eq!(s.frame_index, 2);
        assert_eq!(s.elapsed(), Duration::from_millis(66));
    }
}
