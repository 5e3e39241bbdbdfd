//! Keypoints and the scalar predicates over them.

// ════════════════════════════════════════════════════════════════════════════
// Keypoint
// ════════════════════════════════════════════════════════════════════════════

/// Normalised coordinates a detector may plausibly report.  Points a little
/// outside the frame are normal; anything beyond this is garbage.
pub const NORMALIZED_RANGE: std::ops::RangeInclusive<f32> = -1.0..=2.0;

/// True for a finite coordinate inside [`NORMALIZED_RANGE`].
pub fn is_plausible_normalized(v: f32) -> bool {
    NORMALIZED_RANGE.contains(&v)
}

/// A single landmark in pixel coordinates.
///
/// Detectors report normalised coordinates; by the time a `Keypoint` exists
/// they have been scaled to the frame and truncated to whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Keypoint {
    pub x: i32,
    pub y: i32,
}

impl Keypoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Keypoint { x, y }
    }

    /// Convert a normalised `(0..1, 0..1)` detector coordinate to pixels.
    ///
    /// With `mirror` set the x axis is flipped first, so the picture reads
    /// like a mirror to the person in front of the camera.  Coordinates are
    /// clamped to [`NORMALIZED_RANGE`]; a NaN lands on 0.
    pub fn from_normalized(x: f32, y: f32, width: u32, height: u32, mirror: bool) -> Self {
        let (lo, hi) = (*NORMALIZED_RANGE.start(), *NORMALIZED_RANGE.end());
        let x = if mirror { 1.0 - x } else { x };
        Keypoint {
            x: (x.clamp(lo, hi) * width as f32) as i32,
            y: (y.clamp(lo, hi) * height as f32) as i32,
        }
    }

    /// Offset by a whole-pixel delta.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Keypoint { x: self.x.saturating_add(dx), y: self.y.saturating_add(dy) }
    }

    pub fn midpoint(self, other: Keypoint) -> Self {
        Keypoint {
            x: ((self.x as i64 + other.x as i64) / 2) as i32,
            y: ((self.y as i64 + other.y as i64) / 2) as i32,
        }
    }
}

impl From<(i32, i32)> for Keypoint {
    fn from((x, y): (i32, i32)) -> Self {
        Keypoint { x, y }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Vector
// ════════════════════════════════════════════════════════════════════════════

/// A 2-D direction in pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

/// Below this length a vector has no usable direction.
const DEGENERATE_LEN: f32 = 1e-6;

impl Vector {
    /// Straight up on screen.
    pub const UP: Vector = Vector { x: 0.0, y: -1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Vector { x, y }
    }

    /// The vector pointing from `from` to `to`.
    pub fn between(from: Keypoint, to: Keypoint) -> Self {
        Vector {
            x: (to.x as i64 - from.x as i64) as f32,
            y: (to.y as i64 - from.y as i64) as f32,
        }
    }

    pub fn dot(self, other: Vector) -> f32 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_degenerate(self) -> bool {
        self.length() < DEGENERATE_LEN
    }
}

impl std::ops::Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Vector {
        Vector { x: -self.x, y: -self.y }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Predicates
// ════════════════════════════════════════════════════════════════════════════

/// Euclidean pixel distance between two keypoints.
///
/// Returns `0.0` when either point is absent.  Callers must read that `0.0`
/// as "no signal", not as two coincident points.
pub fn distance(a: impl Into<Option<Keypoint>>, b: impl Into<Option<Keypoint>>) -> f32 {
    match (a.into(), b.into()) {
        (Some(a), Some(b)) => Vector::between(a, b).length(),
        _ => 0.0,
    }
}

/// Unsigned angle between two vectors, in degrees `[0, 180]`.
///
/// The cosine is clamped to `[-1, 1]` before `acos`.  A zero-length vector
/// has no direction; the angle is then `0.0` by convention.
pub fn angle_between(a: Vector, b: Vector) -> f32 {
    if a.is_degenerate() || b.is_degenerate() {
        return 0.0;
    }
    let cos = (a.dot(b) / (a.length() * b.length())).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Interior angle at `vertex` formed by the segments to `a` and `c`.
///
/// A straight finger joint reads ~180°, a fully folded one ~0°.
pub fn joint_angle(a: Keypoint, vertex: Keypoint, c: Keypoint) -> f32 {
    angle_between(Vector::between(vertex, a), Vector::between(vertex, c))
}

/// Signed lean of the segment `from → to` away from straight up, in degrees.
///
/// `0` points up, positive leans toward +x, `±180` points down.  A
/// zero-length segment reads `0.0`.
pub fn tilt_from_vertical(from: Keypoint, to: Keypoint) -> f32 {
    let v = Vector::between(from, to);
    if v.is_degenerate() {
        return 0.0;
    }
    v.x.atan2(-v.y).to_degrees()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-3;

    // ── distance ─────────────────────────────────────────────────────────
    #[test]
    fn distance_to_self_is_zero() {
        let p = Keypoint::new(17, -4);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let p = Keypoint::new(0, 0);
        let q = Keypoint::new(3, 4);
        assert!((distance(p, q) - 5.0).abs() < EPS);
        assert_eq!(distance(p, q), distance(q, p));
    }

    #[test]
    fn distance_with_absent_point_is_zero() {
        let p = Keypoint::new(10, 10);
        assert_eq!(distance(p, None::<Keypoint>), 0.0);
        assert_eq!(distance(None::<Keypoint>, p), 0.0);
        assert_eq!(distance(None::<Keypoint>, None::<Keypoint>), 0.0);
    }

    // ── angle_between ────────────────────────────────────────────────────
    #[test]
    fn angle_with_itself_is_zero() {
        let v = Vector::new(3.0, -7.0);
        assert!(angle_between(v, v).abs() < 0.05);
    }

    #[test]
    fn angle_with_opposite_is_180() {
        let v = Vector::new(-2.5, 9.0);
        assert!((angle_between(v, -v) - 180.0).abs() < 0.05);
    }

    #[test]
    fn angle_right_angle() {
        let a = Vector::new(1.0, 0.0);
        let b = Vector::new(0.0, 5.0);
        assert!((angle_between(a, b) - 90.0).abs() < EPS);
    }

    #[test]
    fn angle_degenerate_vector_is_zero() {
        assert_eq!(angle_between(Vector::new(0.0, 0.0), Vector::new(1.0, 1.0)), 0.0);
        assert_eq!(angle_between(Vector::new(1.0, 1.0), Vector::default()), 0.0);
    }

    // ── joint_angle / tilt ───────────────────────────────────────────────
    #[test]
    fn straight_joint_is_180() {
        let a = Keypoint::new(0, 100);
        let b = Keypoint::new(0, 50);
        let c = Keypoint::new(0, 0);
        assert!((joint_angle(a, b, c) - 180.0).abs() < EPS);
    }

    #[test]
    fn tilt_directions() {
        let o = Keypoint::new(100, 100);
        assert!(tilt_from_vertical(o, Keypoint::new(100, 50)).abs() < EPS);
        assert!((tilt_from_vertical(o, Keypoint::new(150, 100)) - 90.0).abs() < EPS);
        assert!((tilt_from_vertical(o, Keypoint::new(50, 100)) + 90.0).abs() < EPS);
        assert!((tilt_from_vertical(o, Keypoint::new(150, 50)) - 45.0).abs() < EPS);
        assert_eq!(tilt_from_vertical(o, o), 0.0);
    }

    // ── normalisation ────────────────────────────────────────────────────
    #[test]
    fn from_normalized_mirrors_x() {
        let p = Keypoint::from_normalized(0.25, 0.5, 640, 480, false);
        assert_eq!(p, Keypoint::new(160, 240));
        let m = Keypoint::from_normalized(0.25, 0.5, 640, 480, true);
        assert_eq!(m, Keypoint::new(480, 240));
    }

    #[test]
    fn from_normalized_clamps_wild_values() {
        assert_eq!(Keypoint::from_normalized(-5e7, 5e7, 640, 480, false), Keypoint::new(-640, 960));
        assert_eq!(Keypoint::from_normalized(f32::NAN, 0.5, 640, 480, false), Keypoint::new(0, 240));
        assert!(!is_plausible_normalized(f32::NAN));
        assert!(!is_plausible_normalized(f32::INFINITY));
        assert!(!is_plausible_normalized(-5e7));
        assert!(is_plausible_normalized(-0.1));
    }

    #[test]
    fn extreme_keypoints_do_not_overflow() {
        let lo = Keypoint::new(i32::MIN, i32::MIN);
        let hi = Keypoint::new(i32::MAX, i32::MAX);
        let d = distance(lo, hi);
        assert!((d - (u32::MAX as f32) * std::f32::consts::SQRT_2).abs() / d < 1e-3);
        assert_eq!(lo.midpoint(hi), Keypoint::new(0, 0));
        assert_eq!(hi.offset(10, 10), hi);
        assert!((joint_angle(lo, Keypoint::new(0, 0), hi) - 180.0).abs() < 0.05);
    }
}
