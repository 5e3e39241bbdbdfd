//! Air drawing.
//!
//! | Hand | Effect |
//! |---|---|
//! | index up, ≤ 2 fingers | draw (or erase) at the index tip |
//! | V (index + middle) | toggle erase, once per V |
//! | open hand | next colour, once per open hand |
//! | fist | clear |
//! | anything else | lift the pen |
//!
//! Strokes live on a transparent layer that is laid over each frame.

use gesture_rules::{EdgeTrigger, Mark, StrokeCanvas};
use hand_geometry::{Finger, FingerStates, HandLandmarks, Keypoint, LandmarkSet};

use crate::app::Feature;
use crate::session::{Command, Session};
use crate::source::Tracking;
use crate::surface::{Surface, GREY, TRANSPARENT, WHITE};

use super::{draw_hand, hand_of, panel};

/// What one frame's hand asks the canvas to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stroke {
    Clear,
    Open,
    Pen { toggle: bool },
    Lift,
}

fn stroke_for(hand: Option<&HandLandmarks>, fingers: FingerStates) -> Stroke {
    if hand.is_none() {
        return Stroke::Lift;
    }
    match fingers.count() {
        0 => Stroke::Clear,
        5 => Stroke::Open,
        n if n <= 2 && fingers.is_up(Finger::Index) => Stroke::Pen {
            toggle: n == 2 && fingers.is_up(Finger::Middle),
        },
        _ => Stroke::Lift,
    }
}

pub struct Drawing {
    canvas:  StrokeCanvas,
    layer:   Surface,
    open:    EdgeTrigger,
    v_sign:  EdgeTrigger,
    pointer: Option<Keypoint>,
}

impl Drawing {
    pub fn new(width: i32, height: i32) -> Self {
        Drawing {
            canvas:  StrokeCanvas::default(),
            layer:   Surface::new(width, height, TRANSPARENT),
            open:    EdgeTrigger::new(),
            v_sign:  EdgeTrigger::new(),
            pointer: None,
        }
    }

    pub fn canvas(&self) -> &StrokeCanvas { &self.canvas }
    pub fn layer(&self) -> &Surface { &self.layer }

    fn clear(&mut self) {
        self.canvas.clear();
        self.layer.clear(TRANSPARENT);
    }

    fn paint(&mut self, mark: Mark) {
        match mark {
            Mark::Dot { at, color, radius } => {
                self.layer.fill_circle(at, radius, color.argb());
            }
            Mark::Segment { from, to, color, thickness } => {
                self.layer.line(from, to, thickness, color.argb());
            }
            Mark::Erase { center, radius } => {
                self.layer.fill_circle(center, radius, TRANSPARENT);
            }
        }
    }
}

impl Feature for Drawing {
    fn tracking(&self) -> Tracking { Tracking::Hand }

    fn on_command(&mut self, command: Command, _session: &mut Session) {
        match command {
            Command::Reset      => self.clear(),
            Command::ToggleMode => { self.canvas.toggle_erase(); }
            _ => {}
        }
    }

    fn update(&mut self, landmarks: Option<&LandmarkSet>, session: &mut Session) {
        let hand = hand_of(landmarks);
        let fingers = FingerStates::read(hand, session.fingers);
        let stroke = stroke_for(hand, fingers);
        self.pointer = hand.map(|h| h.tip(Finger::Index));

        let opened = self.open.update(stroke == Stroke::Open);
        let v_sign = self.v_sign.update(stroke == Stroke::Pen { toggle: true });

        match (stroke, hand) {
            (Stroke::Clear, _) => {
                if !self.canvas.is_blank() {
                    session.set_status("CANVAS CLEARED");
                }
                self.clear();
            }
            (Stroke::Open, _) => {
                self.canvas.lift();
                if opened {
                    let c = self.canvas.cycle_color();
                    session.set_status(format!("COLOR: {}", c.name()));
                }
            }
            (Stroke::Pen { .. }, Some(h)) => {
                if v_sign {
                    let erasing = self.canvas.toggle_erase();
                    session.set_status(if erasing { "ERASER ON" } else { "ERASER OFF" });
                }
                let mark = self.canvas.extend(h.tip(Finger::Index));
                self.paint(mark);
            }
            _ => self.canvas.lift(),
        }
    }

    fn render(&self, surface: &mut Surface, landmarks: Option<&LandmarkSet>, _session: &Session) {
        surface.overlay(&self.layer);
        if let Some(hand) = hand_of(landmarks) {
            draw_hand(surface, hand);
        }
        if let Some(p) = self.pointer {
            if self.canvas.is_erasing() {
                surface.circle(p, gesture_rules::canvas::DEFAULT_ERASE_RADIUS, 2, WHITE);
            } else {
                surface.fill_circle(p, 6, self.canvas.color().argb());
            }
        }

        panel(surface, 10, 10, 230, 80, "DRAW");
        surface.fill_rect(20, 35, 40, 40, self.canvas.color().argb());
        surface.draw_border(20, 35, 40, 40, 2, WHITE);
        let mode = if self.canvas.is_erasing() { "ERASE" } else { self.canvas.color().name() };
        surface.text(mode, 70, 45, 3, WHITE);
        surface.text("FIST CLEARS  OPEN = COLOR  V = ERASER", 10, surface.height() - 50, 1, GREY);
    }
}
