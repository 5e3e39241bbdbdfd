//! One-octave piano played with the index fingertip.

use gesture_rules::Keyboard;
use hand_geometry::{Finger, LandmarkSet};

use crate::app::Feature;
use crate::config::PianoConfig;
use crate::player::{MidiOut, NotePlayer};
use crate::session::{Command, Session};
use crate::source::Tracking;
use crate::surface::{Surface, BLACK, GREY, WHITE, YELLOW};

use super::{draw_hand, hand_of, panel};

const PRESSED_WHITE: u32 = 0xFF96_C8FF;
const PRESSED_BLACK: u32 = 0xFF32_50A0;

pub struct AirPiano {
    keyboard:   Keyboard,
    player:     NotePlayer,
    root:       u8,
    hold:       u64,
    /// Last struck key name and the frame it was struck on.
    last:       Option<(&'static str, u64)>,
    played:     u32,
}

impl AirPiano {
    pub fn new(cfg: &PianoConfig, width: i32, height: i32, out: Box<dyn MidiOut>) -> Self {
        AirPiano {
            keyboard: Keyboard::new(width, height),
            player:   NotePlayer::new(out, cfg.channel, cfg.instrument, cfg.velocity),
            root:     cfg.root,
            hold:     cfg.note_hold_frames as u64,
            last:     None,
            played:   0,
        }
    }

    pub fn keyboard(&self) -> &Keyboard { &self.keyboard }
    pub fn sounding(&self) -> Option<u8> { self.player.sounding() }

    /// Name of the last struck key while it is still on screen.
    pub fn shown_note(&self, frame_index: u64) -> Option<&'static str> {
        self.last
            .filter(|&(_, at)| frame_index.saturating_sub(at) < self.hold)
            .map(|(name, _)| name)
    }
}

impl Feature for AirPiano {
    fn tracking(&self) -> Tracking { Tracking::Hand }

    fn on_command(&mut self, command: Command, _session: &mut Session) {
        if command == Command::Reset {
            self.keyboard.release_all();
            self.player.silence();
            self.last   = None;
            self.played = 0;
        }
    }

    fn update(&mut self, landmarks: Option<&LandmarkSet>, session: &mut Session) {
        let tip = hand_of(landmarks).map(|h| h.tip(Finger::Index));

        if let Some(key) = self.keyboard.press(tip) {
            let note = key.midi_note(self.root);
            log::debug!("key {} -> note {}", key.name, note);
            self.player.play(note);
            self.last = Some((key.name, session.frame_index));
            self.played += 1;
            session.set_status(format!("NOTES PLAYED: {}", self.played));
        } else if !self.keyboard.keys().iter().any(|k| k.is_pressed()) {
            self.player.silence();
        }
    }

    fn render(&self, surface: &mut Surface, landmarks: Option<&LandmarkSet>, session: &Session) {
        for key in self.keyboard.keys() {
            let r = key.rect;
            let fill = match (key.black, key.is_pressed()) {
                (false, false) => WHITE,
                (false, true)  => PRESSED_WHITE,
                (true, false)  => BLACK,
                (true, true)   => PRESSED_BLACK,
            };
            surface.fill_rect(r.x, r.y, r.w, r.h, fill);
            surface.draw_border(r.x, r.y, r.w, r.h, 2, if key.black { GREY } else { BLACK });
            if !key.black {
                surface.text(key.name, r.x + r.w / 2 - 4, r.y + r.h - 25, 2, BLACK);
            }
        }

        if let Some(hand) = hand_of(landmarks) {
            draw_hand(surface, hand);
            surface.fill_circle(hand.tip(Finger::Index), 10, YELLOW);
        }

        if let Some(name) = self.shown_note(session.frame_index) {
            panel(surface, 10, 10, 160, 110, "NOTE");
            surface.text(name, 30, 40, 10, YELLOW);
        }
        surface.text("POINT AT A KEY TO PLAY", 200, 20, 2, WHITE);
    }
}
