//! Synthetic landmark sets.
//!
//! A detector is not always to hand; these builders produce anatomically
//! plausible hands and bodies from a few parameters.  The simulation source
//! drives them from the mouse and keyboard, and the rule tests use them as
//! fixtures.
//!
//! Hand layout relative to the palm centre (landmark 9), upright, palm
//! facing the camera, thumb on the left of the image:
//!
//! ```text
//!           8   12
//!       4   |    |  16
//!        \  |    |   |  20
//!         3 5───9───13──17
//!          2     |
//!           1    |
//!              0 (wrist)
//! ```

use crate::hand::*;
use crate::point::Keypoint;
use crate::pose::{Joint, PoseLandmarks};

// ════════════════════════════════════════════════════════════════════════════
// Hand proportions (pixels)
// ════════════════════════════════════════════════════════════════════════════

/// MCP offset from the palm centre for index, middle, ring, pinky.
const MCP_OFFSET: [(i32, i32); 4] = [(-28, 4), (0, 0), (26, 4), (48, 14)];

/// MCP→PIP, PIP→DIP, DIP→tip lengths when extended.
const SEGMENTS: [[f32; 3]; 4] = [
    [32.0, 24.0, 20.0],
    [34.0, 26.0, 22.0],
    [32.0, 24.0, 20.0],
    [26.0, 18.0, 16.0],
];

/// Fan-out of each finger away from vertical, degrees.
const SPLAY_DEG: [f32; 4] = [-8.0, 0.0, 6.0, 12.0];

/// Curled finger: PIP, DIP, tip offsets from the MCP.
const CURLED: [(i32, i32); 3] = [(0, -18), (0, -6), (0, 8)];

const WRIST_OFFSET:      (i32, i32) = (0, 90);
const THUMB_CMC_OFFSET:  (i32, i32) = (-38, 62);
const THUMB_MCP_OFFSET:  (i32, i32) = (-58, 44);
const THUMB_OUT:         [(i32, i32); 2] = [(-80, 30), (-100, 18)];
const THUMB_IN:          [(i32, i32); 2] = [(-50, 46), (-40, 40)];

/// Default PIP bend of an extended finger; a relaxed hand is never ruler
/// straight.
pub const RELAXED_BEND_DEG: f32 = 20.0;

// ════════════════════════════════════════════════════════════════════════════
// HandSketch
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct HandSketch {
    palm:     Keypoint,
    fingers:  FingerStates,
    bend_deg: f32,
    pinch:    Option<i32>,
}

impl HandSketch {
    /// An open hand centred on `palm`.
    pub fn new(palm: Keypoint) -> Self {
        HandSketch {
            palm,
            fingers:  FingerStates::ALL,
            bend_deg: RELAXED_BEND_DEG,
            pinch:    None,
        }
    }

    pub fn with_fingers(mut self, fingers: FingerStates) -> Self {
        self.fingers = fingers;
        self
    }

    /// Bend at the PIP joint of every extended finger, degrees.
    pub fn with_bend(mut self, deg: f32) -> Self {
        self.bend_deg = deg;
        self
    }

    /// Bring the thumb tip to `gap` pixels left of the index tip.
    pub fn with_pinch(mut self, gap: i32) -> Self {
        self.pinch = Some(gap);
        self
    }

    pub fn build(&self) -> HandLandmarks {
        let palm = self.palm;
        let at = |(dx, dy): (i32, i32)| palm.offset(dx, dy);
        let mut pts = [palm; HAND_POINTS];

        pts[WRIST]     = at(WRIST_OFFSET);
        pts[THUMB_CMC] = at(THUMB_CMC_OFFSET);
        pts[THUMB_MCP] = at(THUMB_MCP_OFFSET);
        let thumb = if self.fingers.is_up(Finger::Thumb) { THUMB_OUT } else { THUMB_IN };
        pts[THUMB_IP]  = at(thumb[0]);
        pts[THUMB_TIP] = at(thumb[1]);

        for (i, finger) in Finger::LONG.into_iter().enumerate() {
            let chain = finger.chain();
            let mcp = at(MCP_OFFSET[i]);
            pts[chain[0]] = mcp;

            if self.fingers.is_up(finger) {
                let joints = extended_chain(mcp, SEGMENTS[i], SPLAY_DEG[i], self.bend_deg);
                for (slot, p) in chain[1..].iter().zip(joints) {
                    pts[*slot] = p;
                }
            } else {
                for (slot, (dx, dy)) in chain[1..].iter().zip(CURLED) {
                    pts[*slot] = mcp.offset(dx, dy);
                }
            }
        }

        if let Some(gap) = self.pinch {
            let tip = pts[INDEX_TIP].offset(-gap, 0);
            pts[THUMB_TIP] = tip;
            pts[THUMB_IP]  = tip.midpoint(pts[THUMB_MCP]);
        }

        HandLandmarks::new(pts)
    }
}

/// PIP, DIP and tip of a finger that leaves the MCP at `splay_deg` from
/// vertical and bends by `bend_deg` at the PIP.
fn extended_chain(mcp: Keypoint, seg: [f32; 3], splay_deg: f32, bend_deg: f32) -> [Keypoint; 3] {
    let step = |x: f32, y: f32, len: f32, deg: f32| {
        let r = deg.to_radians();
        (x + len * r.sin(), y - len * r.cos())
    };
    let (x0, y0) = (mcp.x as f32, mcp.y as f32);
    let (x1, y1) = step(x0, y0, seg[0], splay_deg);
    let (x2, y2) = step(x1, y1, seg[1], splay_deg + bend_deg);
    let (x3, y3) = step(x2, y2, seg[2], splay_deg + bend_deg);
    let round = |x: f32, y: f32| Keypoint::new(x.round() as i32, y.round() as i32);
    [round(x1, y1), round(x2, y2), round(x3, y3)]
}

// ════════════════════════════════════════════════════════════════════════════
// BodySketch
// ════════════════════════════════════════════════════════════════════════════

/// A front-facing stick figure.
///
/// Only the heights that the rules look at are parameters; everything else
/// is laid out around `center_x` with fixed proportions.
#[derive(Clone, Debug)]
pub struct BodySketch {
    center_x:   i32,
    shoulder_y: i32,
    wrist_y:    i32,
    hip_y:      Option<i32>,
}

impl BodySketch {
    pub fn new(center_x: i32, shoulder_y: i32, wrist_y: i32) -> Self {
        BodySketch { center_x, shoulder_y, wrist_y, hip_y: None }
    }

    /// Override hip height; by default hips sit 150 px below the shoulders.
    pub fn with_hip_y(mut self, hip_y: i32) -> Self {
        self.hip_y = Some(hip_y);
        self
    }

    pub fn build(&self) -> PoseLandmarks {
        let cx  = self.center_x;
        let sy  = self.shoulder_y;
        let wy  = self.wrist_y;
        let hy  = self.hip_y.unwrap_or(sy + 150);
        let ey  = (sy + wy) / 2;
        let p   = Keypoint::new;

        PoseLandmarks::new()
            .with(Joint::Nose,          p(cx,      sy - 60))
            .with(Joint::LeftShoulder,  p(cx - 40, sy))
            .with(Joint::RightShoulder, p(cx + 40, sy))
            .with(Joint::LeftElbow,     p(cx - 55, ey))
            .with(Joint::RightElbow,    p(cx + 55, ey))
            .with(Joint::LeftWrist,     p(cx - 60, wy))
            .with(Joint::RightWrist,    p(cx + 60, wy))
            .with(Joint::LeftHip,       p(cx - 30, hy))
            .with(Joint::RightHip,      p(cx + 30, hy))
            .with(Joint::LeftKnee,      p(cx - 30, hy + 100))
            .with(Joint::RightKnee,     p(cx + 30, hy + 100))
            .with(Joint::LeftAnkle,     p(cx - 30, hy + 190))
            .with(Joint::RightAnkle,    p(cx + 30, hy + 190))
    }
}
