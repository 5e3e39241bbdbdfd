//! # hand_demos
//!
//! Nine small interactive demos driven by hand or body landmarks, drawn in
//! a software-rendered window.
//!
//! ## Demos
//!
//! | Demo | Tracks | What it does |
//! |---|---|---|
//! | `sign-language` | hand | smoothed fingerspelling guess, practice mode |
//! | `rock-paper-scissors` | hand | a round against the computer every 30 frames |
//! | `finger-counter` | hand | extended-finger count and per-finger list |
//! | `drawing` | hand | draw with the index tip; fist clears, open hand changes colour, V erases |
//! | `exercise` | body | push-up counter, fixed rule or calibrated |
//! | `air-piano` | hand | one-octave keyboard played over MIDI |
//! | `posture` | hand | posture score, feedback and good-rate tally |
//! | `volume` | hand | pinch-to-set volume |
//! | `ar-overlay` | hand | HUD that changes with open / pinch / fist |
//!
//! ## Landmark sources
//!
//! * (default) **Simulation**: the mouse moves a synthetic hand (or body)
//!   and the keyboard changes its shape.
//! * `--detector`: spawns the configured detector process and reads one JSON
//!   frame per line from its stdout.  See [`source`].
//!
//! ### Keys
//!
//! | Key | Meaning |
//! |---|---|
//! | `Esc` | quit |
//! | `C` / `R` / `M` | calibrate / reset / toggle mode |
//! | `1`–`5` | simulation: toggle thumb … pinky |
//! | `F` / `O` | simulation: fist / open hand |
//! | `P`, `Up`, `Down` | simulation: pinch, widen, narrow |
//! | `H` | simulation: hide the hand |

pub mod app;
pub mod config;
pub mod features;
pub mod player;
pub mod session;
pub mod source;
pub mod surface;
pub mod visualizer;
