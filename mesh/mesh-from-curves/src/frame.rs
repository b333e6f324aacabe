//! Rotation frame carried along a swept curve.
//!
//! The ring of a tube is a fixed circle in the plane perpendicular to the
//! reference tangent (+X). As the sweep advances, the frame accumulates
//! the minimal rotation between successive tangents, so consecutive rings
//! do not twist relative to one another.

use std::f64::consts::TAU;

use curve_types::{angle_between, rotation_between_vectors};
use nalgebra::{Rotation3, Vector3};

/// Running rotation along a sampled curve.
///
/// # Example
///
/// ```
/// use mesh_from_curves::SweepFrame;
/// use nalgebra::Vector3;
///
/// let mut frame = SweepFrame::new();
/// frame.advance(&Vector3::new(0.0, 0.0, 2.0));
///
/// // The ring plane now faces along +Z
/// let offset = frame.ring_offset(0.0);
/// assert!(offset.z.abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepFrame {
    rotation: Rotation3<f64>,
    tangent: Vector3<f64>,
}

impl Default for SweepFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepFrame {
    /// Tangent the unrotated ring circle is perpendicular to.
    pub const REFERENCE_TANGENT: Vector3<f64> = Vector3::new(1.0, 0.0, 0.0);

    /// A frame with no rotation, facing the reference tangent.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rotation: Rotation3::identity(),
            tangent: Self::REFERENCE_TANGENT,
        }
    }

    /// Accumulated rotation.
    #[must_use]
    pub fn rotation(&self) -> &Rotation3<f64> {
        &self.rotation
    }

    /// Unit tangent of the most recent sample.
    #[must_use]
    pub fn tangent(&self) -> &Vector3<f64> {
        &self.tangent
    }

    /// Turn the frame to face `tangent`.
    ///
    /// A zero tangent leaves the frame as it is.
    pub fn advance(&mut self, tangent: &Vector3<f64>) {
        if let Some(unit) = tangent.try_normalize(f64::EPSILON) {
            let step = rotation_between_vectors(&self.tangent, &unit);
            self.rotation = step * self.rotation;
            self.tangent = unit;
        }
    }

    /// Unit offset from the curve to the ring vertex at `angle`.
    #[must_use]
    pub fn ring_offset(&self, angle: f64) -> Vector3<f64> {
        self.rotation * Vector3::new(0.0, angle.sin(), angle.cos())
    }

    /// Angular offset to apply to the final ring of a tube.
    ///
    /// Compares the twist accumulated by this frame with the twist of a
    /// single direct rotation from the reference tangent to the current
    /// one. The difference is reduced modulo one segment step into
    /// `(-π/segments, π/segments]`, so the closing ring lines up with the
    /// opening ring of a tube that starts from the reference frame.
    #[must_use]
    pub fn seam_correction(&self, segments: usize) -> f64 {
        if segments == 0 {
            return 0.0;
        }

        let step = TAU / segments as f64;
        let twist_running = self.rotation * Vector3::y();
        let twist_direct =
            rotation_between_vectors(&Self::REFERENCE_TANGENT, &self.tangent) * Vector3::y();

        let mut angle = angle_between(&twist_running, &twist_direct) % step;
        if angle > step / 2.0 {
            angle -= step;
        }

        // The unsigned angle loses its sense; recover it from the side of
        // the tangent the twist axis falls on.
        if angle.abs() > 0.0 {
            if let Some(axis) = twist_running
                .cross(&twist_direct)
                .try_normalize(f64::EPSILON)
            {
                if (axis + self.tangent).norm() > 1.0 {
                    angle = -angle;
                }
            }
        }

        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn new_frame_is_identity() {
        let frame = SweepFrame::new();
        assert_eq!(*frame.rotation(), Rotation3::identity());
        assert_relative_eq!(frame.ring_offset(0.0), Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(frame.ring_offset(PI / 2.0), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn ring_offsets_stay_perpendicular_to_tangent() {
        let mut frame = SweepFrame::new();
        for tangent in [
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 1.0),
            Vector3::new(-1.0, 0.2, 0.5),
        ] {
            frame.advance(&tangent);
            for i in 0..8 {
                let offset = frame.ring_offset(f64::from(i) * PI / 4.0);
                assert_relative_eq!(offset.norm(), 1.0, epsilon = 1e-12);
                assert_relative_eq!(offset.dot(frame.tangent()), 0.0, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn zero_tangent_keeps_frame() {
        let mut frame = SweepFrame::new();
        frame.advance(&Vector3::new(0.0, 2.0, 0.0));
        let before = frame;
        frame.advance(&Vector3::zeros());
        assert_eq!(frame, before);
    }

    #[test]
    fn straight_sweep_needs_no_correction() {
        let mut frame = SweepFrame::new();
        for _ in 0..5 {
            frame.advance(&Vector3::new(3.0, 0.0, 0.0));
        }
        assert_relative_eq!(frame.seam_correction(10), 0.0);
    }

    #[test]
    fn single_turn_needs_no_correction() {
        let mut frame = SweepFrame::new();
        frame.advance(&Vector3::new(0.0, 1.0, 1.0));
        assert_relative_eq!(frame.seam_correction(10), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn correction_stays_within_half_step() {
        let mut frame = SweepFrame::new();
        let segments = 10;
        let half_step = PI / segments as f64;
        for i in 0..40 {
            let t = f64::from(i) / 8.0;
            frame.advance(&Vector3::new(t.cos(), t.sin(), 0.3 * (2.0 * t).sin() + 0.1));
            let correction = frame.seam_correction(segments);
            assert!(correction > -half_step - 1e-12);
            assert!(correction <= half_step + 1e-12);
        }
    }

    #[test]
    fn corrected_ring_matches_direct_ring() {
        // Walk the tangent around a loop that leaves a net twist, then check
        // that the corrected final ring coincides with a ring built from the
        // direct rotation, up to a whole number of segments.
        let segments = 12;
        let step = TAU / segments as f64;
        let mut frame = SweepFrame::new();
        for i in 0..=32 {
            let t = f64::from(i) / 32.0 * PI;
            frame.advance(&Vector3::new(t.cos(), t.sin(), (t / 2.0).sin()));
        }

        let correction = frame.seam_correction(segments);
        let direct = rotation_between_vectors(&SweepFrame::REFERENCE_TANGENT, frame.tangent());
        let first = frame.ring_offset(correction);

        let matched = (0..segments).any(|s| {
            let angle = s as f64 * step;
            let candidate = direct * Vector3::new(0.0, angle.sin(), angle.cos());
            (candidate - first).norm() < 1e-6
        });
        assert!(matched);
    }
}
