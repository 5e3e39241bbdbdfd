//! Approximate fingerspelling from a single still frame.
//!
//! The table is keyed by how many of the four long fingers are up, which
//! ones, and a few distances and angles between them:
//!
//! | long fingers up      | refinement                          | letter |
//! |----------------------|-------------------------------------|--------|
//! | none                 | index + middle pointing sideways    | H      |
//! |                      | index pointing sideways             | G      |
//! |                      | thumb out                           | A      |
//! |                      | thumb tip on index tip              | O      |
//! |                      | thumb tip above the index PIP       | S      |
//! |                      | otherwise                           | E      |
//! | index                | thumb out                           | L      |
//! |                      | otherwise                           | D      |
//! | pinky                | thumb out                           | Y      |
//! |                      | otherwise                           | I      |
//! | index, middle        | thumb out                           | K      |
//! |                      | tips crossed                        | R      |
//! |                      | tips together                       | U      |
//! |                      | otherwise                           | V      |
//! | index, pinky         |                                     | Y      |
//! | index, middle, ring  |                                     | W      |
//! | middle, ring, pinky  | thumb tip on index tip              | F      |
//! | all four             | mean PIP angle under 150°           | C      |
//! |                      | otherwise                           | B      |
//!
//! Everything else is [`AslReading::NoMatch`].
//!
//! Several letters cannot be told apart without motion or depth and
//! collapse onto one output: Q reads as G, J reads as I.

use std::fmt;

use hand_geometry::hand::{INDEX_PIP, MIDDLE_MCP, INDEX_MCP};
use hand_geometry::{
    distance, joint_angle, tilt_from_vertical, Finger, FingerStates, HandLandmarks,
};

/// Thumb tip this close to the index tip counts as touching.
pub const TOUCH_PX:       f32 = 20.0;
/// Index and middle tips this close count as held together.
pub const TOGETHER_PX:    f32 = 30.0;
/// Tilt band, either side of vertical, for a finger to point sideways.
pub const SIDEWAYS_DEG:   (f32, f32) = (60.0, 120.0);
/// A sideways finger must reach at least this far from its knuckle.
pub const SIDEWAYS_MIN_PX: f32 = 40.0;
/// Mean PIP angle below which four raised fingers read as a curved C.
pub const CURVE_DEG:      f32 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AslReading {
    Letter(char),
    /// No rule matched; carries the total extended-finger count.
    NoMatch { fingers: u8 },
    NoHand,
}

impl fmt::Display for AslReading {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AslReading::Letter(c)           => write!(f, "{}", c),
            AslReading::NoMatch { fingers } => write!(f, "?({})", fingers),
            AslReading::NoHand              => f.write_str("-"),
        }
    }
}

pub fn classify(hand: Option<&HandLandmarks>, fingers: FingerStates) -> AslReading {
    let Some(hand) = hand else { return AslReading::NoHand };
    use Finger::*;

    let thumb  = fingers.is_up(Thumb);
    let letter = match fingers.long_count() {
        0 => {
            if is_sideways(hand, Index) && is_sideways(hand, Middle) {
                Some('H')
            } else if is_sideways(hand, Index) {
                Some('G')
            } else if thumb {
                Some('A')
            } else if thumb_touches_index(hand) {
                Some('O')
            } else if hand.tip(Thumb).y < hand.point(INDEX_PIP).y {
                Some('S')
            } else {
                Some('E')
            }
        }
        1 if fingers.is_up(Index) => Some(if thumb { 'L' } else { 'D' }),
        1 if fingers.is_up(Pinky) => Some(if thumb { 'Y' } else { 'I' }),
        2 if fingers.long_exactly(&[Index, Middle]) => Some(
            if thumb {
                'K'
            } else if tips_crossed(hand) {
                'R'
            } else if distance(hand.tip(Index), hand.tip(Middle)) < TOGETHER_PX {
                'U'
            } else {
                'V'
            },
        ),
        2 if fingers.long_exactly(&[Index, Pinky]) => Some('Y'),
        3 if fingers.long_exactly(&[Index, Middle, Ring]) => Some('W'),
        3 if fingers.long_exactly(&[Middle, Ring, Pinky]) && thumb_touches_index(hand) => Some('F'),
        4 => Some(if mean_pip_angle(hand) < CURVE_DEG { 'C' } else { 'B' }),
        _ => None,
    };

    match letter {
        Some(c) => AslReading::Letter(c),
        None    => AslReading::NoMatch { fingers: fingers.count() },
    }
}

fn thumb_touches_index(hand: &HandLandmarks) -> bool {
    distance(hand.tip(Finger::Thumb), hand.tip(Finger::Index)) < TOUCH_PX
}

/// Finger held out horizontally: tilted well away from vertical and long
/// enough that the tilt is not just a curled knuckle.
fn is_sideways(hand: &HandLandmarks, finger: Finger) -> bool {
    let mcp  = hand.point(finger.chain()[0]);
    let tip  = hand.tip(finger);
    let tilt = tilt_from_vertical(mcp, tip).abs();
    (SIDEWAYS_DEG.0..=SIDEWAYS_DEG.1).contains(&tilt) && distance(mcp, tip) > SIDEWAYS_MIN_PX
}

/// Index and middle tips in the opposite left/right order to their knuckles.
fn tips_crossed(hand: &HandLandmarks) -> bool {
    let knuckles = hand.point(INDEX_MCP).x - hand.point(MIDDLE_MCP).x;
    let tips     = hand.tip(Finger::Index).x - hand.tip(Finger::Middle).x;
    knuckles.signum() * tips.signum() < 0
}

fn mean_pip_angle(hand: &HandLandmarks) -> f32 {
    let sum: f32 = Finger::LONG
        .iter()
        .map(|&f| {
            let c = f.chain();
            joint_angle(hand.point(c[0]), hand.point(c[1]), hand.point(c[2]))
        })
        .sum();
    sum / Finger::LONG.len() as f32
}
