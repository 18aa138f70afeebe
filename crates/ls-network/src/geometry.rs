//! Cubic Bézier lane curves.
//!
//! A lane's centreline is a cubic Bézier in the lane's local frame:
//!
//! ```text
//! B(t)  = u³·p0 + 3u²t·p1 + 3ut²·p2 + t³·p3          u = 1 - t
//! B'(t) = 3u²·(p1 - p0) + 6ut·(p2 - p1) + 3t²·(p3 - p2)
//! ```
//!
//! Both are evaluated with `t` clamped to `[0, 1]`.  The endpoints are
//! returned exactly (`point(0) == p0`, `point(1) == p3`) so consecutive lanes
//! that share a control point meet without a seam.

use ls_core::Vec3;

/// Number of chords used to approximate arc length.
pub const ARC_LENGTH_SAMPLES: usize = 100;

/// Lower bound applied to `|tangent|` wherever it is used as a denominator.
pub const TANGENT_FLOOR: f32 = 0.1;

/// Four control points of a cubic Bézier curve.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CubicBezier {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl CubicBezier {
    #[inline]
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// A straight segment with control points at the thirds.
    pub fn line(a: Vec3, b: Vec3) -> Self {
        Self::new(a, a.lerp(b, 1.0 / 3.0), a.lerp(b, 2.0 / 3.0), b)
    }

    /// Position at parameter `t` (clamped).
    pub fn point(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 {
            return self.p0;
        }
        if t == 1.0 {
            return self.p3;
        }
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.p1 * (3.0 * u * u * t)
            + self.p2 * (3.0 * u * t * t)
            + self.p3 * (t * t * t)
    }

    /// First derivative at `t` (clamped).  Not normalised: its magnitude is
    /// the local speed of the parameterisation in metres per unit `t`.
    pub fn tangent(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let u = 1.0 - t;
        (self.p1 - self.p0) * (3.0 * u * u)
            + (self.p2 - self.p1) * (6.0 * u * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// Arc length approximated by summing `samples` chords.
    pub fn arc_length(&self, samples: usize) -> f32 {
        let samples = samples.max(1);
        let mut length = 0.0;
        let mut prev = self.p0;
        for i in 1..=samples {
            let p = self.point(i as f32 / samples as f32);
            length += prev.distance(p);
            prev = p;
        }
        length
    }

    /// `true` when every control point is finite.
    pub fn is_finite(&self) -> bool {
        self.p0.is_finite() && self.p1.is_finite() && self.p2.is_finite() && self.p3.is_finite()
    }
}
