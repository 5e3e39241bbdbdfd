//! The 21-point hand landmark set and the finger-up test.
//!
//! Numbering follows the MediaPipe hand model:
//!
//! ```text
//!   0  wrist
//!   1–4   thumb   (CMC, MCP, IP, tip)
//!   5–8   index   (MCP, PIP, DIP, tip)
//!   9–12  middle  (MCP, PIP, DIP, tip)   ← 9 doubles as the palm centre
//!  13–16  ring
//!  17–20  pinky
//! ```

use crate::point::Keypoint;

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices
// ════════════════════════════════════════════════════════════════════════════

pub const HAND_POINTS: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// Bone pairs for drawing a hand skeleton.
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (WRIST, INDEX_MCP), (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (INDEX_MCP, MIDDLE_MCP), (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (MIDDLE_MCP, RING_MCP), (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (RING_MCP, PINKY_MCP), (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
    (WRIST, PINKY_MCP),
];

// ════════════════════════════════════════════════════════════════════════════
// Finger
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// Thumb first, pinky last.
    pub const ALL: [Finger; 5] = [
        Finger::Thumb, Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky,
    ];

    /// The four non-thumb fingers.
    pub const LONG: [Finger; 4] = [
        Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Finger::Thumb  => "Thumb",
            Finger::Index  => "Index",
            Finger::Middle => "Middle",
            Finger::Ring   => "Ring",
            Finger::Pinky  => "Pinky",
        }
    }

    /// Landmark indices of the finger's joint chain, base first.
    ///
    /// The thumb chain starts at its MCP (index 2), so it has three points;
    /// every other finger runs MCP → tip with four.
    pub fn chain(self) -> &'static [usize] {
        match self {
            Finger::Thumb  => &[THUMB_MCP, THUMB_IP, THUMB_TIP],
            Finger::Index  => &[INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP],
            Finger::Middle => &[MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP],
            Finger::Ring   => &[RING_MCP, RING_PIP, RING_DIP, RING_TIP],
            Finger::Pinky  => &[PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP],
        }
    }

    pub fn tip(self) -> usize {
        match self {
            Finger::Thumb  => THUMB_TIP,
            Finger::Index  => INDEX_TIP,
            Finger::Middle => MIDDLE_TIP,
            Finger::Ring   => RING_TIP,
            Finger::Pinky  => PINKY_TIP,
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandLandmarks
// ════════════════════════════════════════════════════════════════════════════

/// Exactly 21 pixel-space points for one detected hand.
///
/// Rebuilt from detector output every frame; nothing here survives a frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandLandmarks {
    pub points: [Keypoint; HAND_POINTS],
}

impl HandLandmarks {
    pub fn new(points: [Keypoint; HAND_POINTS]) -> Self {
        HandLandmarks { points }
    }

    /// Build from a detector slice; anything but exactly 21 points is rejected.
    pub fn from_slice(points: &[Keypoint]) -> Option<Self> {
        let points: [Keypoint; HAND_POINTS] = points.try_into().ok()?;
        Some(HandLandmarks { points })
    }

    pub fn point(&self, index: usize) -> Keypoint {
        self.points[index]
    }

    pub fn wrist(&self) -> Keypoint { self.points[WRIST] }

    /// Palm centre: the middle-finger MCP.
    pub fn palm(&self) -> Keypoint { self.points[MIDDLE_MCP] }

    pub fn tip(&self, finger: Finger) -> Keypoint {
        self.points[finger.tip()]
    }

    /// All five fingertips, thumb first.
    pub fn tips(&self) -> [Keypoint; 5] {
        Finger::ALL.map(|f| self.tip(f))
    }

    /// The finger's joint chain as points, base first.
    pub fn chain(&self, finger: Finger) -> Vec<Keypoint> {
        finger.chain().iter().map(|&i| self.points[i]).collect()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Finger-up test
// ════════════════════════════════════════════════════════════════════════════

/// Pixel thresholds for [`is_finger_extended`].
///
/// The thumb is judged on horizontal spread, the other fingers on vertical
/// rise, so each gets its own threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FingerThresholds {
    /// Minimum `|tipX − baseX|` for the thumb to count as out.
    pub thumb_px:  f32,
    /// Minimum `baseY − tipY` for a long finger to count as up.
    pub finger_px: f32,
}

impl FingerThresholds {
    pub const fn new(thumb_px: f32, finger_px: f32) -> Self {
        FingerThresholds { thumb_px, finger_px }
    }
}

impl Default for FingerThresholds {
    fn default() -> Self {
        FingerThresholds { thumb_px: 30.0, finger_px: 40.0 }
    }
}

/// True if `finger` is extended in this frame.
///
/// * Thumb: `|tipX − baseX| > thumb_px`.
/// * Others: `baseY − tipY > finger_px` (tip well above the knuckle).
///
/// An absent hand has no extended fingers.
pub fn is_finger_extended(
    hand: Option<&HandLandmarks>,
    finger: Finger,
    thresholds: FingerThresholds,
) -> bool {
    let Some(hand) = hand else { return false };
    let chain = finger.chain();
    let base  = hand.points[chain[0]];
    let tip   = hand.points[chain[chain.len() - 1]];
    match finger {
        Finger::Thumb => (tip.x as i64 - base.x as i64).abs() as f32 > thresholds.thumb_px,
        _             => (base.y as i64 - tip.y as i64) as f32 > thresholds.finger_px,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// FingerStates
// ════════════════════════════════════════════════════════════════════════════

/// Up/down flag for each of the five fingers, packed into one byte.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FingerStates(u8);

impl FingerStates {
    pub const NONE: FingerStates = FingerStates(0);
    pub const ALL:  FingerStates = FingerStates(0b1_1111);

    /// Evaluate the finger-up test for all five fingers.
    pub fn read(hand: Option<&HandLandmarks>, thresholds: FingerThresholds) -> Self {
        let mut states = FingerStates::NONE;
        for finger in Finger::ALL {
            states.set(finger, is_finger_extended(hand, finger, thresholds));
        }
        states
    }

    /// Exactly `fingers` up, everything else down.
    pub fn only(fingers: &[Finger]) -> Self {
        let mut states = FingerStates::NONE;
        for &f in fingers {
            states.set(f, true);
        }
        states
    }

    pub fn is_up(self, finger: Finger) -> bool {
        self.0 & finger.bit() != 0
    }

    pub fn set(&mut self, finger: Finger, up: bool) {
        if up { self.0 |= finger.bit(); } else { self.0 &= !finger.bit(); }
    }

    pub fn toggle(&mut self, finger: Finger) {
        self.0 ^= finger.bit();
    }

    /// Number of extended fingers, thumb included.
    pub fn count(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Number of extended fingers among index, middle, ring, pinky.
    pub fn long_count(self) -> u8 {
        Finger::LONG.iter().filter(|&&f| self.is_up(f)).count() as u8
    }

    /// True if precisely `fingers` are up and no others.
    pub fn is_exactly(self, fingers: &[Finger]) -> bool {
        self == FingerStates::only(fingers)
    }

    /// True if precisely `fingers` are up among the long fingers; the
    /// thumb is ignored.
    pub fn long_exactly(self, fingers: &[Finger]) -> bool {
        let mut mine = self;
        mine.set(Finger::Thumb, false);
        let mut theirs = FingerStates::only(fingers);
        theirs.set(Finger::Thumb, false);
        mine == theirs
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::HandSketch;

    fn sketch(states: FingerStates) -> HandLandmarks {
        HandSketch::new(Keypoint::new(300, 300)).with_fingers(states).build()
    }

    #[test]
    fn from_slice_requires_21_points() {
        let pts = vec![Keypoint::default(); 21];
        assert!(HandLandmarks::from_slice(&pts).is_some());
        assert!(HandLandmarks::from_slice(&pts[..20]).is_none());
        let more = vec![Keypoint::default(); 33];
        assert!(HandLandmarks::from_slice(&more).is_none());
    }

    #[test]
    fn thumb_chain_has_three_points() {
        assert_eq!(Finger::Thumb.chain().len(), 3);
        for f in Finger::LONG {
            assert_eq!(f.chain().len(), 4);
        }
    }

    #[test]
    fn absent_hand_has_no_fingers_up() {
        for f in Finger::ALL {
            assert!(!is_finger_extended(None, f, FingerThresholds::default()));
        }
        assert_eq!(FingerStates::read(None, FingerThresholds::default()), FingerStates::NONE);
    }

    #[test]
    fn long_finger_uses_vertical_rise() {
        let mut hand = sketch(FingerStates::NONE);
        let base = hand.points[INDEX_MCP];
        let th = FingerThresholds::default();

        hand.points[INDEX_TIP] = base.offset(0, -41);
        assert!(is_finger_extended(Some(&hand), Finger::Index, th));

        hand.points[INDEX_TIP] = base.offset(0, -40);
        assert!(!is_finger_extended(Some(&hand), Finger::Index, th));

        // Far to the side but level with the knuckle: not up.
        hand.points[INDEX_TIP] = base.offset(120, 0);
        assert!(!is_finger_extended(Some(&hand), Finger::Index, th));
    }

    #[test]
    fn extreme_spans_do_not_overflow() {
        let mut hand = sketch(FingerStates::NONE);
        let th = FingerThresholds::default();
        hand.points[INDEX_MCP] = Keypoint::new(0, i32::MAX);
        hand.points[INDEX_TIP] = Keypoint::new(0, i32::MIN);
        assert!(is_finger_extended(Some(&hand), Finger::Index, th));

        hand.points[THUMB_MCP] = Keypoint::new(i32::MAX, 0);
        hand.points[THUMB_TIP] = Keypoint::new(i32::MIN, 0);
        assert!(is_finger_extended(Some(&hand), Finger::Thumb, th));
    }

    #[test]
    fn thumb_uses_horizontal_spread_either_side() {
        let mut hand = sketch(FingerStates::NONE);
        let base = hand.points[THUMB_MCP];
        let th = FingerThresholds::default();

        hand.points[THUMB_TIP] = base.offset(-31, 0);
        assert!(is_finger_extended(Some(&hand), Finger::Thumb, th));
        hand.points[THUMB_TIP] = base.offset(31, 0);
        assert!(is_finger_extended(Some(&hand), Finger::Thumb, th));
        hand.points[THUMB_TIP] = base.offset(10, -80);
        assert!(!is_finger_extended(Some(&hand), Finger::Thumb, th));
    }

    #[test]
    fn sketch_round_trips_through_finger_test() {
        for bits in 0u8..32 {
            let states = FingerStates(bits);
            let read = FingerStates::read(Some(&sketch(states)), FingerThresholds::default());
            assert_eq!(read, states, "bits {:05b}", bits);
        }
    }

    #[test]
    fn finger_state_counts() {
        let s = FingerStates::only(&[Finger::Thumb, Finger::Index, Finger::Pinky]);
        assert_eq!(s.count(), 3);
        assert_eq!(s.long_count(), 2);
        assert!(s.long_exactly(&[Finger::Index, Finger::Pinky]));
        assert!(!s.is_exactly(&[Finger::Index, Finger::Pinky]));
        assert_eq!(FingerStates::ALL.count(), 5);
    }

    #[test]
    fn toggle_flips_one_finger() {
        let mut s = FingerStates::NONE;
        s.toggle(Finger::Ring);
        assert!(s.is_up(Finger::Ring));
        s.toggle(Finger::Ring);
        assert_eq!(s, FingerStates::NONE);
    }
}
