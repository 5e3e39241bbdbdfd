//! The on-screen one-octave keyboard.
//!
//! ```text
//!   ┌──┬─┬─┬─┬──┬──┬─┬─┬─┬─┬─┬──┐
//!   │  │█│ │█│  │  │█│ │█│ │█│  │   black keys 40×100, over the joins
//!   │  └┬┘ └┬┘  │  └┬┘ └┬┘ └┬┘  │
//!   │ C │ D │ E │ F │ G │ A │ B │   white keys 60×150
//!   └───┴───┴───┴───┴───┴───┴───┘
//! ```

use hand_geometry::Keypoint;

use crate::hit::Rect;

pub const WHITE_W: i32 = 60;
pub const WHITE_H: i32 = 150;
pub const BLACK_W: i32 = 40;
pub const BLACK_H: i32 = 100;
/// Keyboard top sits this far above the bottom of the frame.
pub const BOTTOM_MARGIN: i32 = 200;

const WHITE: [(&str, u8); 7] = [
    ("C", 0), ("D", 2), ("E", 4), ("F", 5), ("G", 7), ("A", 9), ("B", 11),
];

/// Black keys by the white key they sit to the right of; none after E.
const BLACK: [Option<(&str, u8)>; 6] = [
    Some(("C#", 1)), Some(("D#", 3)), None, Some(("F#", 6)), Some(("G#", 8)), Some(("A#", 10)),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PianoKey {
    pub rect:     Rect,
    pub name:     &'static str,
    /// Semitones above the keyboard root.
    pub semitone: u8,
    pub black:    bool,
    pressed:      bool,
}

impl PianoKey {
    pub fn is_pressed(&self) -> bool { self.pressed }

    /// MIDI note number for this key given the root note, capped at 127.
    pub fn midi_note(&self, root: u8) -> u8 {
        root.saturating_add(self.semitone).min(127)
    }
}

#[derive(Clone, Debug)]
pub struct Keyboard {
    keys: Vec<PianoKey>,
}

impl Keyboard {
    /// Lay out the octave centred along the bottom of a `width × height`
    /// frame.
    pub fn new(width: i32, height: i32) -> Self {
        let top     = height - BOTTOM_MARGIN;
        let start_x = (width - WHITE.len() as i32 * WHITE_W) / 2;
        let key = |x, w, h, (name, semitone): (&'static str, u8), black| PianoKey {
            rect: Rect::new(x, top, w, h),
            name,
            semitone,
            black,
            pressed: false,
        };

        let mut keys: Vec<PianoKey> = WHITE
            .iter()
            .enumerate()
            .map(|(i, &n)| key(start_x + i as i32 * WHITE_W, WHITE_W, WHITE_H, n, false))
            .collect();
        for (i, n) in BLACK.iter().enumerate() {
            if let Some(n) = *n {
                let x = start_x + i as i32 * WHITE_W + WHITE_W - BLACK_W / 2;
                keys.push(key(x, BLACK_W, BLACK_H, n, true));
            }
        }
        Keyboard { keys }
    }

    /// White keys first, then black, which is also the painting order.
    pub fn keys(&self) -> &[PianoKey] {
        &self.keys
    }

    /// Key under the point.  Black keys sit on top, so they win where the
    /// two overlap.
    pub fn key_at(&self, p: Keypoint) -> Option<usize> {
        let hit = |black: bool| {
            self.keys.iter().position(|k| k.black == black && k.rect.contains(p))
        };
        hit(true).or_else(|| hit(false))
    }

    /// Move the fingertip.  Every key's pressed state is updated; returns
    /// the key that became pressed this frame, if any.
    pub fn press(&mut self, tip: Option<Keypoint>) -> Option<&PianoKey> {
        let hit = tip.and_then(|p| self.key_at(p));
        let mut newly = None;
        for (i, key) in self.keys.iter_mut().enumerate() {
            let now = hit == Some(i);
            if now && !key.pressed {
                newly = Some(i);
            }
            key.pressed = now;
        }
        newly.map(|i| &self.keys[i])
    }

    pub fn release_all(&mut self) {
        self.keys.iter_mut().for_each(|k| k.pressed = false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Keyboard {
        Keyboard::new(640, 480)
    }

    #[test]
    fn layout() {
        let kb = board();
        assert_eq!(kb.keys().len(), 12);
        let c = &kb.keys()[0];
        assert_eq!(c.name, "C");
        assert_eq!(c.rect, Rect::new(110, 280, 60, 150));
        let cs = kb.keys().iter().find(|k| k.name == "C#").unwrap();
        assert_eq!(cs.rect, Rect::new(150, 280, 40, 100));
        assert!(kb.keys().iter().all(|k| k.name != "E#"));
    }

    #[test]
    fn black_key_wins_overlap() {
        let kb = board();
        // x = 165 lies in both C (110..=170) and C# (150..=190).
        let i = kb.key_at(Keypoint::new(165, 300)).unwrap();
        assert_eq!(kb.keys()[i].name, "C#");
        // Below the black keys only the white key is there.
        let i = kb.key_at(Keypoint::new(165, 400)).unwrap();
        assert_eq!(kb.keys()[i].name, "C");
    }

    #[test]
    fn key_fires_once_while_held() {
        let mut kb = board();
        let on_e = Some(Keypoint::new(245, 420));
        assert_eq!(kb.press(on_e).map(|k| k.name), Some("E"));
        assert!(kb.press(on_e).is_none());
        assert!(kb.press(on_e).is_none());
        assert!(kb.press(None).is_none());
        assert_eq!(kb.press(on_e).map(|k| k.name), Some("E"));
    }

    #[test]
    fn sliding_to_next_key_fires_it() {
        let mut kb = board();
        kb.press(Some(Keypoint::new(120, 420)));
        let k = kb.press(Some(Keypoint::new(185, 420))).unwrap();
        assert_eq!(k.name, "D");
        assert_eq!(k.midi_note(60), 62);
        assert_eq!(kb.keys().iter().filter(|k| k.is_pressed()).count(), 1);
    }

    #[test]
    fn midi_note_caps() {
        let kb = board();
        let b = kb.keys().iter().find(|k| k.name == "B").unwrap();
        assert_eq!(b.midi_note(60), 71);
        assert_eq!(b.midi_note(120), 127);
    }
}
