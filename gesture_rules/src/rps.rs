//! Rock-paper-scissors: the per-frame gesture classifier and the round
//! logic around it.

use std::fmt;

use hand_geometry::{Finger, FingerStates, HandLandmarks};
use rand::Rng;

// ════════════════════════════════════════════════════════════════════════════
// Classifier
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    Rock,
    Paper,
    Scissors,
    Unknown,
    NoDetection,
}

impl Gesture {
    /// The playable throw, if this gesture is one.
    pub fn throw(self) -> Option<Throw> {
        match self {
            Gesture::Rock     => Some(Throw::Rock),
            Gesture::Paper    => Some(Throw::Paper),
            Gesture::Scissors => Some(Throw::Scissors),
            _                 => None,
        }
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Gesture::Rock        => "ROCK",
            Gesture::Paper       => "PAPER",
            Gesture::Scissors    => "SCISSORS",
            Gesture::Unknown     => "UNKNOWN",
            Gesture::NoDetection => "NO HAND",
        };
        f.write_str(s)
    }
}

/// Fist is rock, open hand is paper, index+middle alone is scissors.
///
/// Any other pair of fingers is `Unknown`; it is never guessed as scissors.
pub fn classify(hand: Option<&HandLandmarks>, fingers: FingerStates) -> Gesture {
    if hand.is_none() {
        return Gesture::NoDetection;
    }
    match fingers.count() {
        0 => Gesture::Rock,
        5 => Gesture::Paper,
        _ if fingers.is_exactly(&[Finger::Index, Finger::Middle]) => Gesture::Scissors,
        _ => Gesture::Unknown,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Throws and outcomes
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Throw {
    Rock,
    Paper,
    Scissors,
}

impl Throw {
    pub const ALL: [Throw; 3] = [Throw::Rock, Throw::Paper, Throw::Scissors];

    /// Uniform pick for the computer.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Throw {
        Throw::ALL[rng.gen_range(0..Throw::ALL.len())]
    }

    /// The throw this one defeats.
    pub fn beats(self) -> Throw {
        match self {
            Throw::Rock     => Throw::Scissors,
            Throw::Paper    => Throw::Rock,
            Throw::Scissors => Throw::Paper,
        }
    }
}

impl fmt::Display for Throw {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Throw::Rock     => "ROCK",
            Throw::Paper    => "PAPER",
            Throw::Scissors => "SCISSORS",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Tie,
    PlayerWins,
    ComputerWins,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Outcome::Tie          => "TIE",
            Outcome::PlayerWins   => "YOU WIN!",
            Outcome::ComputerWins => "COMPUTER WINS!",
        };
        f.write_str(s)
    }
}

pub fn decide(player: Throw, computer: Throw) -> Outcome {
    if player == computer {
        Outcome::Tie
    } else if player.beats() == computer {
        Outcome::PlayerWins
    } else {
        Outcome::ComputerWins
    }
}

// ════════════════════════════════════════════════════════════════════════════
// RpsGame
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub wins:   u32,
    pub losses: u32,
    pub ties:   u32,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Tie          => self.ties   += 1,
            Outcome::PlayerWins   => self.wins   += 1,
            Outcome::ComputerWins => self.losses += 1,
        }
    }

    pub fn rounds(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// One round every `round_frames` frames while a hand is in view.
#[derive(Clone, Debug)]
pub struct RpsGame {
    round_frames: u64,
    /// What the player showed at the last round check, playable or not.
    pub player:   Option<Gesture>,
    pub computer: Option<Throw>,
    pub outcome:  Option<Outcome>,
    pub tally:    Tally,
}

impl RpsGame {
    pub fn new(round_frames: u64) -> Self {
        RpsGame {
            round_frames: round_frames.max(1),
            player:       None,
            computer:     None,
            outcome:      None,
            tally:        Tally::default(),
        }
    }

    /// Feed one frame.  Returns the outcome when a round was played.
    ///
    /// Frames without a hand never play; an `Unknown` throw is shown but
    /// the round is skipped and the previous result stays up.
    pub fn on_frame<R: Rng + ?Sized>(
        &mut self,
        frame_index: u64,
        gesture: Gesture,
        rng: &mut R,
    ) -> Option<Outcome> {
        if gesture == Gesture::NoDetection || frame_index % self.round_frames != 0 {
            return None;
        }
        self.player = Some(gesture);
        let throw = gesture.throw()?;
        let computer = Throw::random(rng);
        let outcome  = decide(throw, computer);
        self.computer = Some(computer);
        self.outcome  = Some(outcome);
        self.tally.record(outcome);
        Some(outcome)
    }

    pub fn reset(&mut self) {
        *self = RpsGame::new(self.round_frames);
    }
}
