//! Which AR overlay to draw around the palm.

use hand_geometry::{angle_between, distance, Finger, HandLandmarks, Vector};

/// Mean fingertip-to-palm distance above which the hand is open.
pub const OPEN_SPREAD_PX: f32 = 70.0;
/// Pinch values below this show the pinch gauge.
pub const PINCH_BELOW:    u8  = 60;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlayMode {
    /// Full HUD; carries the thumb–index angle at the palm in degrees.
    Open  { angle: f32 },
    /// `value` is `100 − min(thumb–index distance, 100)`.
    Pinch { value: u8 },
    Fist,
}

impl OverlayMode {
    pub fn label(&self) -> &'static str {
        match self {
            OverlayMode::Open { .. }  => "OPEN",
            OverlayMode::Pinch { .. } => "PINCH",
            OverlayMode::Fist         => "FIST",
        }
    }
}

/// Average distance from the five fingertips to the palm centre.
pub fn spread(hand: &HandLandmarks) -> f32 {
    let palm = hand.palm();
    hand.tips().iter().map(|&t| distance(t, palm)).sum::<f32>() / 5.0
}

pub fn pinch_value(hand: &HandLandmarks) -> u8 {
    let d = distance(hand.tip(Finger::Thumb), hand.tip(Finger::Index));
    (100.0 - d.min(100.0)) as u8
}

pub fn classify(hand: Option<&HandLandmarks>) -> Option<OverlayMode> {
    let hand = hand?;
    if spread(hand) > OPEN_SPREAD_PX {
        let palm  = hand.palm();
        let angle = angle_between(
            Vector::between(palm, hand.tip(Finger::Thumb)),
            Vector::between(palm, hand.tip(Finger::Index)),
        );
        return Some(OverlayMode::Open { angle });
    }
    let value = pinch_value(hand);
    Some(if value < PINCH_BELOW { OverlayMode::Pinch { value } } else { OverlayMode::Fist })
}

/// Animation phase for the glow pulse, radians.
pub fn pulse(frame_index: u64) -> f32 {
    frame_index as f32 * 0.1
}

/// Rotation of the tick ring, degrees.
pub fn rotation(frame_index: u64) -> f32 {
    (frame_index as f32 * 0.5) % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_geometry::hand::THUMB_TIP;
    use hand_geometry::{FingerStates, HandSketch, Keypoint};

    #[test]
    fn open_hand() {
        let hand = HandSketch::new(Keypoint::new(300, 300)).build();
        match classify(Some(&hand)) {
            Some(OverlayMode::Open { angle }) => assert!(angle > 20.0 && angle < 120.0),
            other => panic!("expected open, got {:?}", other),
        }
    }

    #[test]
    fn fist_with_thumb_near_index() {
        let hand = HandSketch::new(Keypoint::new(300, 300))
            .with_fingers(FingerStates::NONE)
            .build();
        assert_eq!(classify(Some(&hand)), Some(OverlayMode::Fist));
    }

    #[test]
    fn closed_hand_with_thumb_away_is_pinch_mode() {
        let mut hand = HandSketch::new(Keypoint::new(300, 300))
            .with_fingers(FingerStates::NONE)
            .build();
        hand.points[THUMB_TIP] = hand.tip(Finger::Index).offset(-50, 0);
        assert_eq!(classify(Some(&hand)), Some(OverlayMode::Pinch { value: 50 }));
    }

    #[test]
    fn nothing_without_a_hand() {
        assert_eq!(classify(None), None);
    }

    #[test]
    fn animation_advances() {
        assert_eq!(pulse(0), 0.0);
        assert!((pulse(10) - 1.0).abs() < 1e-5);
        assert_eq!(rotation(720 * 2 + 4), 2.0);
    }
}
