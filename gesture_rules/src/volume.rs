//! Pinch-to-set volume.

use hand_geometry::{distance, Finger, FingerStates, HandLandmarks};

/// Thumb–index distance below which the hand counts as pinching.
pub const PINCH_PX:    f32 = 80.0;
/// Pinch distance mapped to full volume.
pub const NEAR_PX:     f32 = 20.0;
/// Pinch distance mapped to zero volume.
pub const FAR_PX:      f32 = 100.0;
/// A pinch only counts with at most this many fingers up.
pub const MAX_FINGERS: u8  = 2;

/// Volume for a pinch distance: closer fingers, louder.
pub fn level_for(pinch_px: f32) -> u8 {
    let normalized = ((pinch_px - NEAR_PX) / (FAR_PX - NEAR_PX) * 100.0).clamp(0.0, 100.0);
    (100.0 - normalized) as u8
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VolumeControl {
    volume:      u8,
    primed:      bool,
    controlling: bool,
    last_pinch:  Option<f32>,
}

impl Default for VolumeControl {
    fn default() -> Self {
        VolumeControl { volume: 50, primed: false, controlling: false, last_pinch: None }
    }
}

impl VolumeControl {
    pub fn volume(&self) -> u8 { self.volume }
    pub fn is_controlling(&self) -> bool { self.controlling }
    pub fn last_pinch(&self) -> Option<f32> { self.last_pinch }

    /// Feed one frame; returns whether the hand is controlling.
    ///
    /// The first pinching frame only primes the control so a hand entering
    /// the frame does not make the volume jump.  Letting go (or losing the
    /// hand) keeps the volume and un-primes.
    pub fn update(&mut self, hand: Option<&HandLandmarks>, fingers: FingerStates) -> bool {
        let pinch = hand
            .map(|h| distance(h.tip(Finger::Thumb), h.tip(Finger::Index)))
            .filter(|&d| d < PINCH_PX && fingers.count() <= MAX_FINGERS);

        match pinch {
            Some(d) => {
                if self.primed {
                    self.volume = level_for(d);
                }
                self.primed      = true;
                self.controlling = true;
                self.last_pinch  = Some(d);
            }
            None => {
                self.primed      = false;
                self.controlling = false;
                self.last_pinch  = None;
            }
        }
        self.controlling
    }
}
