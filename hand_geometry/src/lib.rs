//! # hand_geometry
//!
//! Pixel-space landmark sets produced by an external hand / body detector,
//! and the small set of geometric predicates every demo is built on.
//!
//! * [`Keypoint`]: one integer pixel coordinate.  "Absent" is modelled as
//!   `Option<Keypoint>::None`, never as a magic coordinate.
//! * [`HandLandmarks`]: exactly 21 points, MediaPipe numbering.
//! * [`PoseLandmarks`]: the 13 named body joints retained from the 33-point
//!   body scheme.
//! * [`distance`], [`angle_between`], [`joint_angle`], [`tilt_from_vertical`]:
//!   pure, total functions; degenerate input yields a defined sentinel.
//! * [`is_finger_extended`] / [`FingerStates`]: the threshold finger-up test.
//!
//! Image Y grows downward, so "above" means a *smaller* y.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_geometry::{Finger, FingerStates, FingerThresholds, HandSketch, Keypoint};
//!
//! let hand = HandSketch::new(Keypoint::new(320, 240))
//!     .with_fingers(FingerStates::only(&[Finger::Index, Finger::Middle]))
//!     .build();
//!
//! let states = FingerStates::read(Some(&hand), FingerThresholds::default());
//! assert!(states.is_up(Finger::Index));
//! assert!(!states.is_up(Finger::Ring));
//! assert_eq!(states.count(), 2);
//! ```

pub mod point;
pub mod hand;
pub mod pose;
pub mod sketch;

pub use point::{
    Keypoint, Vector, distance, angle_between, joint_angle, tilt_from_vertical,
    is_plausible_normalized, NORMALIZED_RANGE,
};
pub use hand::{
    Finger, FingerStates, FingerThresholds, HandLandmarks, is_finger_extended,
    HAND_CONNECTIONS, HAND_POINTS,
};
pub use pose::{Joint, PoseLandmarks, POSE_CONNECTIONS, POSE_POINTS};
pub use sketch::{BodySketch, HandSketch};

// ════════════════════════════════════════════════════════════════════════════
// LandmarkSet: what a detector hands back for one frame
// ════════════════════════════════════════════════════════════════════════════

/// One frame's worth of detector output.
///
/// A frame with nothing in it is `Option<LandmarkSet>::None`; there is no
/// "empty" variant.
#[derive(Clone, Debug, PartialEq)]
pub enum LandmarkSet {
    Hand(HandLandmarks),
    Pose(PoseLandmarks),
}

impl LandmarkSet {
    pub fn as_hand(&self) -> Option<&HandLandmarks> {
        match self {
            LandmarkSet::Hand(h) => Some(h),
            LandmarkSet::Pose(_) => None,
        }
    }

    pub fn as_pose(&self) -> Option<&PoseLandmarks> {
        match self {
            LandmarkSet::Pose(p) => Some(p),
            LandmarkSet::Hand(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landmark_set_accessors() {
        let hand = HandSketch::new(Keypoint::new(100, 100)).build();
        let set = LandmarkSet::Hand(hand.clone());
        assert_eq!(set.as_hand(), Some(&hand));
        assert!(set.as_pose().is_none());

        let body = BodySketch::new(200, 150, 300).build();
        let set = LandmarkSet::Pose(body);
        assert!(set.as_hand().is_none());
        assert!(set.as_pose().is_some());
    }
}
