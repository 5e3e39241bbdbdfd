//! The nine demos, one [`Feature`](crate::app::Feature) each, plus the
//! drawing helpers they share.

pub mod air_piano;
pub mod ar_overlay;
pub mod drawing;
pub mod exercise;
pub mod finger_counter;
pub mod posture;
pub mod rps_game;
pub mod sign_language;
pub mod volume;

use hand_geometry::{
    Finger, FingerStates, HandLandmarks, LandmarkSet, PoseLandmarks, HAND_CONNECTIONS,
    POSE_CONNECTIONS,
};

use crate::surface::{Surface, GLYPH_H, GREEN, GREY, RED, WHITE};

pub const SKELETON: u32 = 0xFF00_C8FF;
pub const JOINT:    u32 = 0xFFFF_3C3C;
pub const PANEL:    u32 = 0xFF10_1828;

pub fn hand_of(set: Option<&LandmarkSet>) -> Option<&HandLandmarks> {
    set.and_then(LandmarkSet::as_hand)
}

pub fn body_of(set: Option<&LandmarkSet>) -> Option<&PoseLandmarks> {
    set.and_then(LandmarkSet::as_pose)
}

pub fn draw_hand(surface: &mut Surface, hand: &HandLandmarks) {
    for &(a, b) in HAND_CONNECTIONS.iter() {
        surface.line(hand.point(a), hand.point(b), 2, SKELETON);
    }
    for &p in hand.points.iter() {
        surface.fill_circle(p, 3, JOINT);
    }
}

pub fn draw_body(surface: &mut Surface, body: &PoseLandmarks, color: u32) {
    for &(a, b) in POSE_CONNECTIONS.iter() {
        if let (Some(pa), Some(pb)) = (body.get(a), body.get(b)) {
            surface.line(pa, pb, 3, color);
        }
    }
    for (_, p) in body.iter() {
        surface.fill_circle(p, 5, JOINT);
    }
}

/// Translucent box with a title line.
pub fn panel(surface: &mut Surface, x: i32, y: i32, w: i32, h: i32, title: &str) {
    surface.blend_rect(x, y, w, h, PANEL, 0.75);
    surface.text(title, x + 8, y + 6, 2, GREY);
}

/// Horizontal gauge filled to `fraction` (0..=1).
pub fn progress_bar(surface: &mut Surface, x: i32, y: i32, w: i32, h: i32, fraction: f32, color: u32) {
    let filled = (w as f32 * fraction.clamp(0.0, 1.0)) as i32;
    surface.fill_rect(x, y, w, h, 0xFF30_3040);
    surface.fill_rect(x, y, filled, h, color);
    surface.draw_border(x, y, w, h, 1, WHITE);
}

/// `THUMB: UP` … one line per finger, green when up.
pub fn finger_list(surface: &mut Surface, x: i32, y: i32, states: FingerStates) {
    for (i, f) in Finger::ALL.into_iter().enumerate() {
        let up = states.is_up(f);
        let line = format!("{}: {}", f.name(), if up { "UP" } else { "DOWN" });
        surface.text(&line, x, y + i as i32 * (GLYPH_H * 2 + 2), 2, if up { GREEN } else { RED });
    }
}

pub fn no_hand(surface: &mut Surface) {
    let msg = "SHOW YOUR HAND";
    let x = (surface.width() - Surface::text_width(msg, 3)) / 2;
    surface.text(msg, x, surface.height() / 2, 3, WHITE);
}
