//! Tube mesh generation from Bézier curves.
//!
//! Sweeps a circle along a [`CubicBezier`], sampling `pieces + 1` rings of
//! `segments` vertices each.

use std::f64::consts::TAU;

use curve_types::CubicBezier;
use mesh_types::{Point3, Rgb, TubeMesh, TubeVertex};

use crate::error::{CurveError, CurveResult};
use crate::frame::SweepFrame;

/// Sampling resolution of a tube.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TubeResolution {
    pieces: usize,
    segments: usize,
}

impl Default for TubeResolution {
    fn default() -> Self {
        Self {
            pieces: Self::DEFAULT_PIECES,
            segments: Self::DEFAULT_SEGMENTS,
        }
    }
}

impl TubeResolution {
    /// Fewest pieces along a tube.
    pub const MIN_PIECES: usize = 1;
    /// Fewest segments around a tube.
    pub const MIN_SEGMENTS: usize = 3;
    /// Default pieces along a tube.
    pub const DEFAULT_PIECES: usize = 24;
    /// Default segments around a tube.
    pub const DEFAULT_SEGMENTS: usize = 10;

    /// Create a resolution of `pieces` along and `segments` around.
    ///
    /// # Errors
    ///
    /// Returns an error if `pieces` is below [`Self::MIN_PIECES`] or
    /// `segments` is below [`Self::MIN_SEGMENTS`].
    pub fn new(pieces: usize, segments: usize) -> CurveResult<Self> {
        if pieces < Self::MIN_PIECES {
            return Err(CurveError::TooFewPieces {
                min: Self::MIN_PIECES,
                actual: pieces,
            });
        }
        if segments < Self::MIN_SEGMENTS {
            return Err(CurveError::TooFewSegments {
                min: Self::MIN_SEGMENTS,
                actual: segments,
            });
        }
        Ok(Self { pieces, segments })
    }

    /// Longitudinal pieces.
    #[must_use]
    pub fn pieces(&self) -> usize {
        self.pieces
    }

    /// Radial segments.
    #[must_use]
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Vertices in one tube: `(pieces + 1) × segments`.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        (self.pieces + 1) * self.segments
    }

    /// Triangles in one tube: `2 × pieces × segments`.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        2 * self.pieces * self.segments
    }
}

/// Colours at the two ends of a tube, interpolated linearly between.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRamp {
    /// Colour of the first ring.
    pub start: Rgb,
    /// Colour of the last ring.
    pub end: Rgb,
}

impl ColorRamp {
    /// Ramp from `start` to `end`.
    #[must_use]
    pub const fn new(start: Rgb, end: Rgb) -> Self {
        Self { start, end }
    }

    /// A single colour along the whole tube.
    #[must_use]
    pub const fn uniform(color: Rgb) -> Self {
        Self::new(color, color)
    }

    /// Colour at fraction `t` of the way along.
    #[must_use]
    pub fn at(&self, t: f32) -> Rgb {
        self.start.lerp(&self.end, t)
    }
}

/// Configuration for tube generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeConfig {
    /// Radius of the tube.
    pub radius: f64,
    /// Sampling resolution.
    pub resolution: TubeResolution,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            resolution: TubeResolution::default(),
        }
    }
}

impl TubeConfig {
    /// Create a tube config with the given radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Create a tube config with the given resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: TubeResolution) -> Self {
        self.resolution = resolution;
        self
    }
}

/// Check that `radius` can be swept.
pub(crate) fn validate_radius(radius: f64) -> CurveResult<()> {
    if radius <= 0.0 || !radius.is_finite() {
        return Err(CurveError::InvalidRadius(radius));
    }
    Ok(())
}

/// Sweep a circular tube along a cubic Bézier curve.
///
/// Rings are sampled at `t = i / pieces` for `i` in `0..pieces`, each
/// oriented by a [`SweepFrame`] advanced to the curve derivative at `t`.
/// The closing ring at `t = 1` is turned by the frame's seam correction
/// and takes the end colour exactly.
///
/// # Errors
///
/// Returns [`CurveError::InvalidRadius`] if the radius is not positive
/// and finite.
///
/// # Example
///
/// ```
/// use curve_types::CubicBezier;
/// use mesh_from_curves::{sweep_bezier, ColorRamp, TubeConfig, TubeResolution};
/// use mesh_types::{Point3, Rgb};
///
/// let curve = CubicBezier::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 1.0, 0.0),
///     Point3::new(2.0, 1.0, 0.0),
///     Point3::new(3.0, 0.0, 0.0),
/// );
/// let config = TubeConfig::default()
///     .with_radius(0.2)
///     .with_resolution(TubeResolution::new(8, 6)?);
///
/// let mesh = sweep_bezier(&curve, &config, &ColorRamp::uniform(Rgb::PLAIN))?;
/// assert_eq!(mesh.vertex_count(), 9 * 6);
/// # Ok::<(), mesh_from_curves::CurveError>(())
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn sweep_bezier(
    curve: &CubicBezier,
    config: &TubeConfig,
    colors: &ColorRamp,
) -> CurveResult<TubeMesh> {
    validate_radius(config.radius)?;

    let pieces = config.resolution.pieces();
    let segments = config.resolution.segments();
    let mut vertices = Vec::with_capacity(config.resolution.vertex_count());
    let mut frame = SweepFrame::new();

    for piece in 0..pieces {
        let t = piece as f64 / pieces as f64;
        frame.advance(&curve.derivative_at(t));
        push_ring(
            &mut vertices,
            &Ring {
                centre: curve.point_at(t),
                frame: &frame,
                radius: config.radius,
                segments,
                twist: 0.0,
                color: colors.at(t as f32),
            },
        );
    }

    frame.advance(&curve.derivative_at(1.0));
    push_ring(
        &mut vertices,
        &Ring {
            centre: curve.point_at(1.0),
            frame: &frame,
            radius: config.radius,
            segments,
            twist: frame.seam_correction(segments),
            color: colors.end,
        },
    );

    let actual = vertices.len();
    TubeMesh::from_rings(pieces, segments, vertices).ok_or(CurveError::RingMismatch {
        expected: config.resolution.vertex_count(),
        actual,
    })
}

struct Ring<'a> {
    centre: Point3<f64>,
    frame: &'a SweepFrame,
    radius: f64,
    segments: usize,
    twist: f64,
    color: Rgb,
}

fn push_ring(vertices: &mut Vec<TubeVertex>, ring: &Ring<'_>) {
    let step = TAU / ring.segments as f64;
    for seg in 0..ring.segments {
        let normal = ring.frame.ring_offset(seg as f64 * step + ring.twist);
        vertices.push(TubeVertex {
            position: ring.centre + normal * ring.radius,
            normal,
            color: ring.color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::Vector3;

    fn straight_curve() -> CubicBezier {
        CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(5.0, 0.0, 0.0),
        )
    }

    fn bent_curve() -> CubicBezier {
        CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 1.0),
            Point3::new(3.0, -1.0, 2.0),
            Point3::new(2.0, 2.0, -1.0),
        )
    }

    fn config(radius: f64, pieces: usize, segments: usize) -> TubeConfig {
        TubeConfig::default()
            .with_radius(radius)
            .with_resolution(TubeResolution::new(pieces, segments).expect("resolution"))
    }

    #[test]
    fn straight_tube_is_a_cylinder() {
        let mesh = sweep_bezier(
            &straight_curve(),
            &config(0.25, 10, 24),
            &ColorRamp::uniform(Rgb::PLAIN),
        )
        .expect("mesh");

        assert_eq!(mesh.vertex_count(), 11 * 24);
        for vertex in mesh.vertices() {
            let radial = (vertex.position.y.powi(2) + vertex.position.z.powi(2)).sqrt();
            assert_relative_eq!(radial, 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn straight_tube_rings_sit_on_samples() {
        let curve = straight_curve();
        let mesh = sweep_bezier(&curve, &config(0.25, 10, 24), &ColorRamp::uniform(Rgb::PLAIN))
            .expect("mesh");

        for piece in 0..=10 {
            let ring = mesh.ring(piece).expect("ring");
            let expected = curve.point_at(piece as f64 / 10.0).x;
            assert!(ring.iter().all(|v| (v.position.x - expected).abs() < 1e-12));
        }
    }

    #[test]
    fn vertices_lie_at_radius_from_curve() {
        let curve = bent_curve();
        let mesh = sweep_bezier(&curve, &config(0.3, 16, 8), &ColorRamp::uniform(Rgb::PLAIN))
            .expect("mesh");

        for piece in 0..=16 {
            let centre = curve.point_at(piece as f64 / 16.0);
            let tangent = curve.tangent_at(piece as f64 / 16.0).expect("tangent");
            for vertex in mesh.ring(piece).expect("ring") {
                let offset = vertex.position - centre;
                assert_relative_eq!(offset.norm(), 0.3, epsilon = 1e-9);
                assert_relative_eq!(offset.dot(&tangent), 0.0, epsilon = 1e-9);
                assert_relative_eq!(vertex.normal.norm(), 1.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn closing_ring_aligns_with_a_fresh_start() {
        let curve = bent_curve();
        let segments = 10;
        let mesh = sweep_bezier(&curve, &config(0.2, 24, segments), &ColorRamp::uniform(Rgb::PLAIN))
            .expect("mesh");

        // A tube continuing from this one starts from the reference frame
        // turned directly onto the end tangent.
        let mut fresh = SweepFrame::new();
        fresh.advance(&curve.derivative_at(1.0));
        let end = curve.point_at(1.0);
        let step = TAU / segments as f64;
        let last = mesh.ring(24).expect("ring");

        for vertex in last {
            let matched = (0..segments).any(|s| {
                let expected = end + fresh.ring_offset(s as f64 * step) * 0.2;
                (expected - vertex.position).norm() < 1e-6
            });
            assert!(matched);
        }
    }

    #[test]
    fn colors_interpolate_along_tube() {
        let ramp = ColorRamp::new(Rgb::new(0.0, 0.0, 0.0), Rgb::new(1.0, 0.5, 0.0));
        let mesh = sweep_bezier(&straight_curve(), &config(0.1, 4, 3), &ramp).expect("mesh");

        assert_eq!(mesh.ring(0).expect("ring")[0].color, ramp.start);
        assert_relative_eq!(mesh.ring(2).expect("ring")[1].color.r, 0.5);
        assert_eq!(mesh.ring(4).expect("ring")[2].color, ramp.end);
    }

    #[test]
    fn first_ring_faces_initial_tangent() {
        let curve = CubicBezier::new(
            Point3::origin(),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, 0.0, 2.0),
            Point3::new(0.0, 0.0, 3.0),
        );
        let mesh =
            sweep_bezier(&curve, &config(1.0, 3, 4), &ColorRamp::uniform(Rgb::PLAIN)).expect("mesh");
        for vertex in mesh.ring(0).expect("ring") {
            assert_relative_eq!(vertex.normal.dot(&Vector3::z()), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn invalid_radius_is_rejected() {
        let result = sweep_bezier(
            &straight_curve(),
            &config(-1.0, 4, 4),
            &ColorRamp::uniform(Rgb::PLAIN),
        );
        assert_eq!(result, Err(CurveError::InvalidRadius(-1.0)));
    }

    #[test]
    fn resolution_limits() {
        assert_eq!(
            TubeResolution::new(0, 10),
            Err(CurveError::TooFewPieces { min: 1, actual: 0 })
        );
        assert_eq!(
            TubeResolution::new(10, 2),
            Err(CurveError::TooFewSegments { min: 3, actual: 2 })
        );
        let resolution = TubeResolution::new(10, 24).expect("resolution");
        assert_eq!(resolution.vertex_count(), 264);
        assert_eq!(resolution.triangle_count(), 480);
    }
}
