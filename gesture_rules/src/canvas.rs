//! Freehand stroke layer for the air-drawing demo.
//!
//! The canvas does not own pixels or keep history; each call hands back
//! one mark for the renderer to paint, and only a running count survives.
//! A pen that has been lifted never joins its next point to the old one.

use hand_geometry::Keypoint;

pub const DEFAULT_THICKNESS:    i32 = 8;
pub const DEFAULT_ERASE_RADIUS: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InkColor {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

impl InkColor {
    pub const PALETTE: [InkColor; 6] = [
        InkColor::Red, InkColor::Green, InkColor::Blue,
        InkColor::Yellow, InkColor::Magenta, InkColor::Cyan,
    ];

    pub fn argb(self) -> u32 {
        match self {
            InkColor::Red     => 0xFFFF0000,
            InkColor::Green   => 0xFF00FF00,
            InkColor::Blue    => 0xFF0000FF,
            InkColor::Yellow  => 0xFFFFFF00,
            InkColor::Magenta => 0xFFFF00FF,
            InkColor::Cyan    => 0xFF00FFFF,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InkColor::Red     => "RED",
            InkColor::Green   => "GREEN",
            InkColor::Blue    => "BLUE",
            InkColor::Yellow  => "YELLOW",
            InkColor::Magenta => "MAGENTA",
            InkColor::Cyan    => "CYAN",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mark {
    /// First point after the pen touches down.
    Dot     { at: Keypoint, color: InkColor, radius: i32 },
    Segment { from: Keypoint, to: Keypoint, color: InkColor, thickness: i32 },
    Erase   { center: Keypoint, radius: i32 },
}

#[derive(Clone, Debug)]
pub struct StrokeCanvas {
    marks:        u64,
    last:         Option<Keypoint>,
    color_index:  usize,
    erasing:      bool,
    thickness:    i32,
    erase_radius: i32,
}

impl Default for StrokeCanvas {
    fn default() -> Self {
        StrokeCanvas::new(DEFAULT_THICKNESS, DEFAULT_ERASE_RADIUS)
    }
}

impl StrokeCanvas {
    pub fn new(thickness: i32, erase_radius: i32) -> Self {
        StrokeCanvas {
            marks:       0,
            last:        None,
            color_index: 0,
            erasing:     false,
            thickness,
            erase_radius,
        }
    }

    /// Marks handed out since the last clear.
    pub fn mark_count(&self) -> u64 { self.marks }
    pub fn is_blank(&self) -> bool { self.marks == 0 }
    pub fn color(&self) -> InkColor { InkColor::PALETTE[self.color_index] }
    pub fn is_erasing(&self) -> bool { self.erasing }
    pub fn pen_down(&self) -> bool { self.last.is_some() }

    /// Draw (or erase) at `p`.  Returns the mark to paint.
    pub fn extend(&mut self, p: Keypoint) -> Mark {
        let mark = if self.erasing {
            self.last = None;
            Mark::Erase { center: p, radius: self.erase_radius }
        } else {
            let color = self.color();
            let mark = match self.last {
                Some(from) => Mark::Segment { from, to: p, color, thickness: self.thickness },
                None       => Mark::Dot { at: p, color, radius: self.thickness },
            };
            self.last = Some(p);
            mark
        };
        self.marks = self.marks.saturating_add(1);
        mark
    }

    /// Break the stroke; the next point starts a new one.
    pub fn lift(&mut self) {
        self.last = None;
    }

    pub fn clear(&mut self) {
        self.marks = 0;
        self.last = None;
    }

    pub fn cycle_color(&mut self) -> InkColor {
        self.color_index = (self.color_index + 1) % InkColor::PALETTE.len();
        self.color()
    }

    pub fn toggle_erase(&mut self) -> bool {
        self.erasing = !self.erasing;
        self.last = None;
        self.erasing
    }
}
