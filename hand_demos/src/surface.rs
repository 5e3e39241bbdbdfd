//! In-memory ARGB framebuffer and the handful of primitives the features
//! draw with.
//!
//! Coordinates are signed; anything outside the buffer is clipped, so
//! callers can draw half-off-screen shapes without checking.  A pixel with
//! alpha 0 is transparent when one surface is laid over another.

use hand_geometry::Keypoint;

pub const TRANSPARENT: u32 = 0x0000_0000;
pub const BLACK:       u32 = 0xFF00_0000;
pub const WHITE:       u32 = 0xFFFF_FFFF;
pub const GREEN:       u32 = 0xFF00_FF00;
pub const RED:         u32 = 0xFFFF_0000;
pub const YELLOW:      u32 = 0xFFFF_FF00;
pub const CYAN:        u32 = 0xFF00_FFFF;
pub const ORANGE:      u32 = 0xFFFF_A500;
pub const GREY:        u32 = 0xFF88_8888;

/// Glyph cell: 3 columns + 1 gap, 5 rows + 2 gap, before scaling.
pub const GLYPH_W: i32 = 4;
pub const GLYPH_H: i32 = 7;

#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    width:  i32,
    height: i32,
    buf:    Vec<u32>,
}

impl Surface {
    pub fn new(width: i32, height: i32, fill: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Surface { width, height, buf: vec![fill; (width * height) as usize] }
    }

    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }
    pub fn pixels(&self) -> &[u32] { &self.buf }

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|i| self.buf[i])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index(x, y) {
            self.buf[i] = color;
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        (x >= 0 && y >= 0 && x < self.width && y < self.height)
            .then(|| (y * self.width + x) as usize)
    }

    // ── Rectangles ────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let (x0, x1) = (x.max(0), (x + w).min(self.width));
        let (y0, y1) = (y.max(0), (y + h).min(self.height));
        if x0 >= x1 {
            return;
        }
        for row in y0..y1 {
            let base = (row * self.width) as usize;
            self.buf[base + x0 as usize..base + x1 as usize].fill(color);
        }
    }

    /// Tint a rectangle toward `color` by `t` (0 = unchanged).
    pub fn blend_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32, t: f32) {
        for row in y.max(0)..(y + h).min(self.height) {
            for col in x.max(0)..(x + w).min(self.width) {
                let i = (row * self.width + col) as usize;
                self.buf[i] = blend(self.buf[i], color, t);
            }
        }
    }

    pub fn draw_border(&mut self, x: i32, y: i32, w: i32, h: i32, thickness: i32, color: u32) {
        let t = thickness.max(1);
        self.fill_rect(x, y, w, t, color);
        self.fill_rect(x, y + h - t, w, t, color);
        self.fill_rect(x, y, t, h, color);
        self.fill_rect(x + w - t, y, t, h, color);
    }

    // ── Lines and circles ─────────────────────────────────────────────────

    /// Straight line with round caps, `thickness` pixels wide.
    ///
    /// The walk is capped at a few times the buffer's perimeter, so a line
    /// between far-off points stays cheap; it just gets sparse.
    pub fn line(&mut self, from: Keypoint, to: Keypoint, thickness: i32, color: u32) {
        let dx = (to.x as i64 - from.x as i64) as f32;
        let dy = (to.y as i64 - from.y as i64) as f32;
        let cap = 4 * (self.width + self.height);
        let steps = (dx.abs().max(dy.abs()).ceil().max(1.0) as i32).min(cap);
        let r = (thickness / 2).max(0);
        for s in 0..=steps {
            let t = s as f32 / steps as f32;
            let x = from.x.saturating_add((dx * t).round() as i32);
            let y = from.y.saturating_add((dy * t).round() as i32);
            if r == 0 {
                self.set_pixel(x, y, color);
            } else {
                self.fill_circle(Keypoint::new(x, y), r, color);
            }
        }
    }

    pub fn fill_circle(&mut self, center: Keypoint, radius: i32, color: u32) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    let p = center.offset(dx, dy);
                    self.set_pixel(p.x, p.y, color);
                }
            }
        }
    }

    /// Ring between `radius − thickness` and `radius`.
    pub fn circle(&mut self, center: Keypoint, radius: i32, thickness: i32, color: u32) {
        self.arc(center, radius, thickness, 0.0, 360.0, color);
    }

    /// Part of a ring, starting at `start_deg` (0 = right, clockwise on
    /// screen) and sweeping `sweep_deg`.
    pub fn arc(
        &mut self,
        center: Keypoint,
        radius: i32,
        thickness: i32,
        start_deg: f32,
        sweep_deg: f32,
        color: u32,
    ) {
        let inner = (radius - thickness.max(1)).max(0);
        let (outer2, inner2) = (radius * radius, inner * inner);
        let sweep = sweep_deg.clamp(0.0, 360.0);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let d2 = dx * dx + dy * dy;
                if d2 > outer2 || d2 < inner2 {
                    continue;
                }
                let deg = (dy as f32).atan2(dx as f32).to_degrees();
                if (deg - start_deg).rem_euclid(360.0) <= sweep {
                    let p = center.offset(dx, dy);
                    self.set_pixel(p.x, p.y, color);
                }
            }
        }
    }

    // ── Text ──────────────────────────────────────────────────────────────

    /// Bitmap text; each glyph pixel becomes a `scale × scale` block.
    pub fn text(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let s = scale.max(1);
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * s, y + row as i32 * s, s, s, color);
                    }
                }
            }
            cx += GLYPH_W * s;
            if cx >= self.width { break; }
        }
    }

    pub fn text_width(text: &str, scale: i32) -> i32 {
        text.chars().count() as i32 * GLYPH_W * scale.max(1)
    }

    /// Text on a solid box with a small margin.
    pub fn label(&mut self, text: &str, x: i32, y: i32, scale: i32, fg: u32, bg: u32) {
        let s = scale.max(1);
        self.fill_rect(x, y, Surface::text_width(text, s) + 2 * s, GLYPH_H * s + s, bg);
        self.text(text, x + s, y + s, s, fg);
    }

    // ── Layers ────────────────────────────────────────────────────────────

    /// Copy every non-transparent pixel of `layer` on top of this surface.
    pub fn overlay(&mut self, layer: &Surface) {
        let w = self.width.min(layer.width);
        for row in 0..self.height.min(layer.height) {
            for col in 0..w {
                let px = layer.buf[(row * layer.width + col) as usize];
                if px >> 24 != 0 {
                    self.buf[(row * self.width + col) as usize] = px;
                }
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '#' => [0b101, 0b111, 0b101, 0b111, 0b101],
        '%' => [0b101, 0b001, 0b010, 0b100, 0b101],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '?' => [0b111, 0b001, 0b010, 0b000, 0b010],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        '>' => [0b100, 0b010, 0b001, 0b010, 0b100],
        '<' => [0b001, 0b010, 0b100, 0b010, 0b001],
        '\'' => [0b010, 0b010, 0b000, 0b000, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
pub fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0-t) + cb as f32 * t).round() as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar,br) << 16) | (lerp(ag,bg) << 8) | lerp(ab,bb)
}

/// Scale the RGB channels; used for pulsing glows.
pub fn dim(color: u32, factor: f32) -> u32 {
    blend(BLACK, color, factor)
}
