//! Rotations between directions.
//!
//! The tube sweep keeps a running rotation that is updated, sample by
//! sample, by the minimal rotation taking the previous tangent onto the
//! next one. These helpers provide that rotation and its fallbacks.

use std::f64::consts::PI;

use nalgebra::{Rotation3, Unit, Vector3};

/// Angle in radians between two directions, in `[0, π]`.
///
/// Returns `0.0` if either vector has zero length.
#[must_use]
pub fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    match (a.try_normalize(f64::EPSILON), b.try_normalize(f64::EPSILON)) {
        (Some(a), Some(b)) => a.dot(&b).clamp(-1.0, 1.0).acos(),
        _ => 0.0,
    }
}

/// A unit vector perpendicular to `v`.
///
/// Takes the coordinate axis along which `v` is smallest and removes its
/// component along `v`. Returns `None` if `v` has zero length.
#[must_use]
pub fn perpendicular_vector(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let v = v.try_normalize(f64::EPSILON)?;

    let mut smallest = 0;
    for dim in 1..3 {
        if v[dim].abs() < v[smallest].abs() {
            smallest = dim;
        }
    }

    let mut axis = Vector3::zeros();
    axis[smallest] = 1.0;

    (axis - v * v[smallest]).try_normalize(f64::EPSILON)
}

/// Right-handed rotation by `angle` radians about `axis`.
///
/// A zero-length axis gives the identity.
#[must_use]
pub fn rotation_about_axis(axis: &Vector3<f64>, angle: f64) -> Rotation3<f64> {
    Unit::try_new(*axis, f64::EPSILON)
        .map_or_else(Rotation3::identity, |axis| {
            Rotation3::from_axis_angle(&axis, angle)
        })
}

/// The minimal rotation carrying the direction of `from` onto the
/// direction of `to`.
///
/// Opposed directions have no unique minimal rotation; they are turned
/// half way round an axis perpendicular to `from`. Zero-length input gives
/// the identity.
///
/// # Example
///
/// ```
/// use curve_types::rotation_between_vectors;
/// use nalgebra::Vector3;
///
/// let from = Vector3::new(1.0, 0.0, 0.0);
/// let to = Vector3::new(0.0, 3.0, 4.0);
///
/// let rotated = rotation_between_vectors(&from, &to) * from;
/// assert!((rotated - to.normalize()).norm() < 1e-12);
/// ```
#[must_use]
pub fn rotation_between_vectors(from: &Vector3<f64>, to: &Vector3<f64>) -> Rotation3<f64> {
    let (Some(from), Some(to)) = (
        from.try_normalize(f64::EPSILON),
        to.try_normalize(f64::EPSILON),
    ) else {
        return Rotation3::identity();
    };

    let angle = from.dot(&to).clamp(-1.0, 1.0).acos();
    if angle <= 0.0 {
        return Rotation3::identity();
    }

    let axis = if angle >= PI {
        None
    } else {
        Unit::try_new(from.cross(&to), f64::EPSILON)
    };

    match axis {
        Some(axis) => Rotation3::from_axis_angle(&axis, angle),
        // Parallel within rounding: opposed needs the fallback axis,
        // aligned needs nothing.
        None if angle > PI / 2.0 => perpendicular_vector(&from)
            .map_or_else(Rotation3::identity, |perp| rotation_about_axis(&perp, angle)),
        None => Rotation3::identity(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_directions() -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, -2.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(-0.3, 0.8, 0.1),
            Vector3::new(5.0, -4.0, 2.5),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.2, 0.2, -0.9),
        ]
    }

    #[test]
    fn rotation_maps_from_onto_to() {
        for a in sample_directions() {
            for b in sample_directions() {
                let rotated = rotation_between_vectors(&a, &b) * a.normalize();
                assert_relative_eq!(rotated, b.normalize(), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn opposed_directions_use_half_turn() {
        let a = Vector3::new(0.0, 0.0, 1.0);
        let rotation = rotation_between_vectors(&a, &-a);
        assert_relative_eq!(rotation * a, -a, epsilon = 1e-12);
        assert_relative_eq!(rotation.angle(), PI, epsilon = 1e-12);
    }

    #[test]
    fn aligned_directions_give_identity() {
        let a = Vector3::new(2.0, -1.0, 0.5);
        let rotation = rotation_between_vectors(&a, &(a * 3.0));
        assert_relative_eq!(rotation.angle(), 0.0, epsilon = 1e-7);
    }

    #[test]
    fn zero_vector_gives_identity() {
        let rotation = rotation_between_vectors(&Vector3::zeros(), &Vector3::x());
        assert_eq!(rotation, Rotation3::identity());
    }

    #[test]
    fn axis_rotation_is_right_handed() {
        let rotation = rotation_about_axis(&Vector3::z(), PI / 2.0);
        assert_relative_eq!(rotation * Vector3::x(), Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn perpendicular_is_unit_and_orthogonal() {
        for v in sample_directions() {
            let perp = perpendicular_vector(&v).expect("perpendicular");
            assert_relative_eq!(perp.norm(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(perp.dot(&v), 0.0, epsilon = 1e-12);
        }
        assert!(perpendicular_vector(&Vector3::zeros()).is_none());
    }

    #[test]
    fn perpendicular_prefers_smallest_axis() {
        let perp = perpendicular_vector(&Vector3::new(0.0, 1.0, 1.0)).expect("perpendicular");
        assert_relative_eq!(perp, Vector3::x(), epsilon = 1e-12);
    }

    #[test]
    fn angle_between_is_symmetric() {
        let a = Vector3::new(1.0, 0.0, 0.0);
        let b = Vector3::new(1.0, 1.0, 0.0);
        assert_relative_eq!(angle_between(&a, &b), PI / 4.0, epsilon = 1e-12);
        assert_relative_eq!(angle_between(&b, &a), PI / 4.0, epsilon = 1e-12);
        assert_relative_eq!(angle_between(&a, &Vector3::zeros()), 0.0);
    }
}
