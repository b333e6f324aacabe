//! Cubic Bézier segments.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CurveError, Result};

/// A cubic Bézier curve segment.
///
/// Defined by four control points:
/// - `p0`: Start point
/// - `p1`: Start handle (the curve leaves `p0` heading towards it)
/// - `p2`: End handle (the curve arrives at `p3` coming from it)
/// - `p3`: End point
///
/// # Example
///
/// ```
/// use curve_types::CubicBezier;
/// use nalgebra::Point3;
///
/// let curve = CubicBezier::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 2.0, 0.0),
///     Point3::new(3.0, 2.0, 0.0),
///     Point3::new(4.0, 0.0, 0.0),
/// );
///
/// let start = curve.point_at(0.0);
/// assert!((start.x - 0.0).abs() < 1e-10);
///
/// let end = curve.point_at(1.0);
/// assert!((end.x - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CubicBezier {
    /// Start point.
    pub p0: Point3<f64>,
    /// Start handle.
    pub p1: Point3<f64>,
    /// End handle.
    pub p2: Point3<f64>,
    /// End point.
    pub p3: Point3<f64>,
}

impl CubicBezier {
    /// Create a new cubic Bézier curve.
    #[must_use]
    pub const fn new(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>, p3: Point3<f64>) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// A curve collapsed onto a single point.
    #[must_use]
    pub const fn point(p: Point3<f64>) -> Self {
        Self::new(p, p, p, p)
    }

    /// Evaluate the curve at parameter `t`, clamped to `[0, 1]`.
    ///
    /// `B(t) = (1-t)³ p0 + 3(1-t)² t p1 + 3(1-t) t² p2 + t³ p3`
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;
        let s2 = s * s;
        let t2 = t * t;

        Point3::from(
            self.p0.coords * (s2 * s)
                + self.p1.coords * (3.0 * s2 * t)
                + self.p2.coords * (3.0 * s * t2)
                + self.p3.coords * (t2 * t),
        )
    }

    /// First derivative with respect to `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn derivative_at(&self, t: f64) -> Vector3<f64> {
        let t = t.clamp(0.0, 1.0);
        let s = 1.0 - t;

        // B'(t) = 3(1-t)²(p1-p0) + 6(1-t)t(p2-p1) + 3t²(p3-p2)
        (self.p1 - self.p0) * (3.0 * s * s)
            + (self.p2 - self.p1) * (6.0 * s * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// Unit tangent at `t`, or `None` where the derivative vanishes.
    #[must_use]
    pub fn tangent_at(&self, t: f64) -> Option<Vector3<f64>> {
        self.derivative_at(t).try_normalize(f64::EPSILON)
    }

    /// Split the curve at parameter `t` using de Casteljau's algorithm.
    ///
    /// The left half ends and the right half starts exactly on
    /// `point_at(t)`, and the two halves trace the original curve.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ParameterOutOfRange`] if `t` is not in `[0, 1]`.
    pub fn split(&self, t: f64) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&t) {
            return Err(CurveError::ParameterOutOfRange(t));
        }

        let p01 = lerp_point(self.p0, self.p1, t);
        let p12 = lerp_point(self.p1, self.p2, t);
        let p23 = lerp_point(self.p2, self.p3, t);

        let p012 = lerp_point(p01, p12, t);
        let p123 = lerp_point(p12, p23, t);

        let p0123 = lerp_point(p012, p123, t);

        let left = Self::new(self.p0, p01, p012, p0123);
        let right = Self::new(p0123, p123, p23, self.p3);

        Ok((left, right))
    }

    /// The same curve moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector3<f64>) -> Self {
        Self::new(
            self.p0 + offset,
            self.p1 + offset,
            self.p2 + offset,
            self.p3 + offset,
        )
    }

    /// Move the start point together with its handle.
    #[must_use]
    pub fn with_start_shifted(mut self, offset: &Vector3<f64>) -> Self {
        self.p0 += offset;
        self.p1 += offset;
        self
    }

    /// Move the end point together with its handle.
    #[must_use]
    pub fn with_end_shifted(mut self, offset: &Vector3<f64>) -> Self {
        self.p2 += offset;
        self.p3 += offset;
        self
    }

    /// Estimate the arc length by summing `pieces` equal-parameter chords.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::TooFewPieces`] if `pieces` is zero.
    pub fn chord_length(&self, pieces: usize) -> Result<f64> {
        if pieces == 0 {
            return Err(CurveError::TooFewPieces { min: 1, actual: 0 });
        }

        let mut previous = self.p0;
        let mut length = 0.0;
        for piece in 1..=pieces {
            let next = self.point_at(piece as f64 / pieces as f64);
            length += (next - previous).norm();
            previous = next;
        }

        Ok(length)
    }
}

fn lerp_point(a: Point3<f64>, b: Point3<f64>, t: f64) -> Point3<f64> {
    a + (b - a) * t
}
