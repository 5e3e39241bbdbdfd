//! Hand posture score.
//!
//! Start from 100 and take off a fixed amount for each problem found:
//!
//! | check                                             | deduction |
//! |---------------------------------------------------|-----------|
//! | mean PIP angle < 100° (curled) or > 170° (rigid)  | 20        |
//! | middle MCP→PIP leans > 45° from vertical          | 15        |
//! | thumb tip > 100 px from the index MCP             | 10        |
//!
//! Deductions are independent and add up.  The score never drops below 0.

use std::fmt;

use hand_geometry::hand::{INDEX_MCP, MIDDLE_MCP, MIDDLE_PIP};
use hand_geometry::{distance, joint_angle, tilt_from_vertical, Finger, HandLandmarks};

pub const CURLED_BELOW_DEG:   f32 = 100.0;
pub const RIGID_ABOVE_DEG:    f32 = 170.0;
pub const WRIST_BEND_DEG:     f32 = 45.0;
pub const THUMB_FAR_PX:       f32 = 100.0;

const FINGER_DEDUCTION: i32 = 20;
const WRIST_DEDUCTION:  i32 = 15;
const THUMB_DEDUCTION:  i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rating {
    Good,
    Ok,
    Poor,
}

impl Rating {
    pub fn from_score(score: u8) -> Rating {
        match score {
            80.. => Rating::Good,
            60.. => Rating::Ok,
            _    => Rating::Poor,
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Rating::Good => "GOOD POSTURE",
            Rating::Ok   => "OK POSTURE",
            Rating::Poor => "POOR POSTURE",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Feedback {
    FingersCurled,
    FingersRigid,
    FingersGood,
    WristBent,
    ThumbFar,
}

impl Feedback {
    pub fn is_positive(self) -> bool {
        self == Feedback::FingersGood
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Feedback::FingersCurled => "Fingers too curled",
            Feedback::FingersRigid  => "Fingers too extended",
            Feedback::FingersGood   => "Good finger position!",
            Feedback::WristBent     => "Wrist bent too much",
            Feedback::ThumbFar      => "Thumb too far",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PostureReport {
    pub score:          u8,
    pub rating:         Rating,
    pub feedback:       Vec<Feedback>,
    pub finger_angle:   f32,
    pub wrist_tilt:     f32,
    pub thumb_distance: f32,
}

/// Score one frame.  No hand, no report.
pub fn analyze(hand: Option<&HandLandmarks>) -> Option<PostureReport> {
    let hand = hand?;
    let mut score    = 100i32;
    let mut feedback = Vec::with_capacity(3);

    let finger_angle = Finger::LONG
        .iter()
        .map(|&f| {
            let c = f.chain();
            joint_angle(hand.point(c[0]), hand.point(c[1]), hand.point(c[2]))
        })
        .sum::<f32>()
        / Finger::LONG.len() as f32;

    if finger_angle < CURLED_BELOW_DEG {
        feedback.push(Feedback::FingersCurled);
        score -= FINGER_DEDUCTION;
    } else if finger_angle > RIGID_ABOVE_DEG {
        feedback.push(Feedback::FingersRigid);
        score -= FINGER_DEDUCTION;
    } else {
        feedback.push(Feedback::FingersGood);
    }

    let wrist_tilt = tilt_from_vertical(hand.point(MIDDLE_MCP), hand.point(MIDDLE_PIP));
    if wrist_tilt.abs() > WRIST_BEND_DEG {
        feedback.push(Feedback::WristBent);
        score -= WRIST_DEDUCTION;
    }

    let thumb_distance = distance(hand.tip(Finger::Thumb), hand.point(INDEX_MCP));
    if thumb_distance > THUMB_FAR_PX {
        feedback.push(Feedback::ThumbFar);
        score -= THUMB_DEDUCTION;
    }

    let score = score.clamp(0, 100) as u8;
    Some(PostureReport {
        score,
        rating: Rating::from_score(score),
        feedback,
        finger_angle,
        wrist_tilt,
        thumb_distance,
    })
}

// ════════════════════════════════════════════════════════════════════════════
// PostureTally
// ════════════════════════════════════════════════════════════════════════════

/// Session counts of good and poor frames.  OK frames count toward neither.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PostureTally {
    pub good: u32,
    pub poor: u32,
}

impl PostureTally {
    pub fn record(&mut self, rating: Rating) {
        match rating {
            Rating::Good => self.good += 1,
            Rating::Poor => self.poor += 1,
            Rating::Ok   => {}
        }
    }

    /// Percentage of good frames among good + poor, once any exist.
    pub fn good_rate(&self) -> Option<f32> {
        let total = self.good + self.poor;
        (total > 0).then(|| self.good as f32 * 100.0 / total as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hand_geometry::hand::THUMB_TIP;
    use hand_geometry::{FingerStates, HandSketch, Keypoint};

    fn relaxed() -> HandLandmarks {
        HandSketch::new(Keypoint::new(300, 300)).build()
    }

    #[test]
    fn relaxed_hand_is_perfect() {
        let r = analyze(Some(&relaxed())).unwrap();
        assert_eq!(r.score, 100);
        assert_eq!(r.rating, Rating::Good);
        assert_eq!(r.feedback, [Feedback::FingersGood]);
    }

    #[test]
    fn rigid_fingers_cost_twenty() {
        let hand = HandSketch::new(Keypoint::new(300, 300)).with_bend(0.0).build();
        let r = analyze(Some(&hand)).unwrap();
        assert_eq!(r.score, 80);
        assert_eq!(r.feedback, [Feedback::FingersRigid]);
    }

    #[test]
    fn fist_reads_curled() {
        let hand = HandSketch::new(Keypoint::new(300, 300))
            .with_fingers(FingerStates::NONE)
            .build();
        let r = analyze(Some(&hand)).unwrap();
        assert!(r.feedback.contains(&Feedback::FingersCurled));
        assert_eq!(r.score, 80);
    }

    #[test]
    fn all_deductions_add_up() {
        let mut hand = HandSketch::new(Keypoint::new(300, 300))
            .with_fingers(FingerStates::NONE)
            .build();
        hand.points[MIDDLE_PIP] = hand.point(MIDDLE_MCP).offset(34, 0);
        hand.points[THUMB_TIP]  = hand.point(INDEX_MCP).offset(-150, 0);
        let r = analyze(Some(&hand)).unwrap();
        assert!(r.feedback.contains(&Feedback::WristBent));
        assert!(r.feedback.contains(&Feedback::ThumbFar));
        assert!(!r.feedback.contains(&Feedback::FingersGood));
        assert_eq!(r.score, 55);
        assert_eq!(r.rating, Rating::Poor);
    }

    #[test]
    fn rating_buckets() {
        assert_eq!(Rating::from_score(100), Rating::Good);
        assert_eq!(Rating::from_score(80), Rating::Good);
        assert_eq!(Rating::from_score(79), Rating::Ok);
        assert_eq!(Rating::from_score(60), Rating::Ok);
        assert_eq!(Rating::from_score(59), Rating::Poor);
        assert_eq!(Rating::from_score(0), Rating::Poor);
    }

    #[test]
    fn tally_rate() {
        let mut t = PostureTally::default();
        assert_eq!(t.good_rate(), None);
        t.record(Rating::Good);
        t.record(Rating::Good);
        t.record(Rating::Ok);
        t.record(Rating::Poor);
        assert_eq!(t, PostureTally { good: 2, poor: 1 });
        let rate = t.good_rate().unwrap();
        assert!((rate - 66.666).abs() < 0.01);
    }

    #[test]
    fn no_hand_no_report() {
        assert!(analyze(None).is_none());
    }
}
