//! # gesture_rules
//!
//! Per-frame rules over [`hand_geometry`] landmark sets.  Nothing here
//! draws, logs, or fails: absent input gives a neutral answer.
//!
//! | module       | what it decides                                        |
//! |--------------|--------------------------------------------------------|
//! | [`rps`]      | rock / paper / scissors, plus round and tally logic    |
//! | [`asl`]      | approximate fingerspelled letter                       |
//! | [`posture`]  | hand posture score, rating and feedback                |
//! | [`debounce`] | stability filter and rising-edge trigger               |
//! | [`reps`]     | repetition counter, calibrated or fixed-threshold      |
//! | [`hit`]      | rectangle hit-test and touch button                    |
//! | [`piano`]    | one-octave keyboard with per-key press detection       |
//! | [`canvas`]   | freehand stroke layer                                  |
//! | [`volume`]   | pinch distance → volume                                |
//! | [`overlay`]  | open / pinch / fist overlay selection                  |
//!
//! ## Quick start
//!
//! ```rust
//! use gesture_rules::rps::{classify, Gesture};
//! use gesture_rules::debounce::{Reading, StabilityFilter};
//! use hand_geometry::{FingerStates, FingerThresholds, HandSketch, Keypoint};
//!
//! let fist   = HandSketch::new(Keypoint::new(320, 240))
//!     .with_fingers(FingerStates::NONE)
//!     .build();
//! let states = FingerStates::read(Some(&fist), FingerThresholds::default());
//!
//! let mut filter = StabilityFilter::new(3);
//! let mut shown  = Reading::Detecting;
//! for _ in 0..3 {
//!     shown = filter.update(classify(Some(&fist), states));
//! }
//! assert_eq!(shown, Reading::Stable(Gesture::Rock));
//! ```

pub mod asl;
pub mod canvas;
pub mod debounce;
pub mod hit;
pub mod overlay;
pub mod piano;
pub mod posture;
pub mod reps;
pub mod rps;
pub mod volume;

pub use asl::AslReading;
pub use canvas::{InkColor, Mark, StrokeCanvas};
pub use debounce::{EdgeTrigger, Reading, StabilityFilter};
pub use hit::{Rect, TouchButton};
pub use overlay::OverlayMode;
pub use piano::{Keyboard, PianoKey};
pub use posture::{Feedback, PostureReport, PostureTally, Rating};
pub use reps::{CounterState, Phase, RepCounter, RepSample, RepStrategy, ThresholdRule};
pub use rps::{Gesture, Outcome, RpsGame, Tally, Throw};
pub use volume::VolumeControl;
