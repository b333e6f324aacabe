//! Pieces shared by the flat and cubic tile-to-curve mappings.
//!
//! Every drawn tile line is a cubic Bézier between two tile corners. It is
//! split at its midpoint into two tubes so the middle can be lifted over
//! or pushed under neighbouring strands.

use curve_types::CubicBezier;
use knot_topology::{Corner, LoopColoring, TileCoord};
use mesh_from_curves::{ColorRamp, TubeSpec};
use mesh_types::{Point3, Rgb, Vector3};

use crate::error::KnotResult;

/// Tube specs for every slot of a knot, with the total strand length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedKnot {
    /// One entry per tube slot. Lines that are not drawn leave `None`.
    pub slots: Vec<Option<TubeSpec>>,
    /// Summed chord length of every drawn line.
    pub length: f64,
}

impl RenderedKnot {
    pub(crate) fn with_capacity(slots: usize) -> Self {
        Self {
            slots: Vec::with_capacity(slots),
            length: 0.0,
        }
    }

    /// Number of drawn tubes.
    #[must_use]
    pub fn visible(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub(crate) fn push_hidden_line(&mut self) {
        self.slots.extend([None, None]);
    }

    pub(crate) fn push_line(&mut self, halves: [TubeSpec; 2], length: f64) {
        self.slots.extend(halves.map(Some));
        self.length += length;
    }
}

/// Colour of the strand at each tile corner.
pub trait CornerColors<const N: usize> {
    /// Colour at `corner` of `tile`.
    fn corner_color(&self, tile: &TileCoord<N>, corner: Corner) -> Rgb;
}

impl<const N: usize> CornerColors<N> for LoopColoring<N> {
    fn corner_color(&self, tile: &TileCoord<N>, corner: Corner) -> Rgb {
        self.color(tile, corner).unwrap_or(Rgb::BLACK)
    }
}

/// Where a line meets a tile corner, and its handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LineEnd {
    pub point: Point3<f64>,
    pub handle: Point3<f64>,
}

impl LineEnd {
    /// Anchor at `corner` of the tile spanning `origin..origin + size`.
    ///
    /// The point is moved `inset` into the tile and the handle reaches
    /// `reach` further in, both mirrored on the far side of each axis.
    pub fn at_corner(
        origin: &Point3<f64>,
        size: &Vector3<f64>,
        corner: Corner,
        inset: &Vector3<f64>,
        reach: &Vector3<f64>,
    ) -> Self {
        let mut point = *origin;
        let mut towards = Vector3::zeros();
        for axis in 0..3 {
            let (side, inward) = if corner.is_far(axis) {
                (size[axis], -1.0)
            } else {
                (0.0, 1.0)
            };
            point[axis] += side + inward * inset[axis];
            towards[axis] = inward * reach[axis];
        }
        Self {
            point,
            handle: point + towards,
        }
    }

    /// The same end moved by `offset`.
    pub fn shifted(self, offset: &Vector3<f64>) -> Self {
        Self {
            point: self.point + offset,
            handle: self.handle + offset,
        }
    }
}

/// Curve from `start` to `end`.
pub(crate) fn line_curve(start: &LineEnd, end: &LineEnd) -> CubicBezier {
    CubicBezier::new(start.point, start.handle, end.handle, end.point)
}

/// Split `curve` in half and lift its start, middle and end.
///
/// `mid_lift` receives the unlifted midpoint.
pub(crate) fn lifted_halves(
    curve: &CubicBezier,
    start_lift: &Vector3<f64>,
    end_lift: &Vector3<f64>,
    mid_lift: impl FnOnce(&Point3<f64>) -> Vector3<f64>,
) -> KnotResult<[CubicBezier; 2]> {
    let (left, right) = curve.split(0.5)?;
    let mid = mid_lift(&left.p3);
    Ok([
        left.with_start_shifted(start_lift).with_end_shifted(&mid),
        right.with_start_shifted(&mid).with_end_shifted(end_lift),
    ])
}

/// Tube specs for the two halves of a line, blending through the average
/// colour at the middle.
pub(crate) fn half_tubes(halves: [CubicBezier; 2], radius: f64, start: Rgb, end: Rgb) -> [TubeSpec; 2] {
    let mid = start.midpoint(&end);
    let [left, right] = halves;
    [
        TubeSpec {
            curve: left,
            radius,
            colors: ColorRamp::new(start, mid),
        },
        TubeSpec {
            curve: right,
            radius,
            colors: ColorRamp::new(mid, end),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn corners_mirror_inset_and_handle() {
        let origin = Point3::new(3.0, 6.0, 0.0);
        let size = Vector3::new(3.0, 3.0, 0.0);
        let inset = Vector3::new(0.0, 0.5, 0.0);
        let reach = Vector3::new(1.2, 0.0, 0.0);

        let near = LineEnd::at_corner(&origin, &size, Corner::TOP_LEFT, &inset, &reach);
        assert_eq!(near.point, Point3::new(3.0, 6.5, 0.0));
        assert_eq!(near.handle, Point3::new(4.2, 6.5, 0.0));

        let far = LineEnd::at_corner(&origin, &size, Corner::BOTTOM_RIGHT, &inset, &reach);
        assert_eq!(far.point, Point3::new(6.0, 8.5, 0.0));
        assert_eq!(far.handle, Point3::new(4.8, 8.5, 0.0));
    }

    #[test]
    fn halves_meet_at_lifted_midpoint() {
        let curve = CubicBezier::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(2.0, 1.0, 0.0),
            Point3::new(3.0, 0.0, 0.0),
        );
        let lift = Vector3::new(0.0, 0.0, 0.3);
        let [left, right] =
            lifted_halves(&curve, &Vector3::zeros(), &Vector3::zeros(), |_| lift).expect("split");

        assert_eq!(left.p3, right.p0);
        assert_relative_eq!(left.p3.z, 0.3);
        assert_relative_eq!(left.p3.x, curve.point_at(0.5).x, epsilon = 1e-12);
        assert_eq!(left.p0, curve.p0);
        assert_eq!(right.p3, curve.p3);
    }

    #[test]
    fn halves_blend_colours() {
        let curve = CubicBezier::point(Point3::origin());
        let red = Rgb::new(1.0, 0.0, 0.0);
        let blue = Rgb::new(0.0, 0.0, 1.0);
        let [left, right] = half_tubes([curve, curve], 0.1, red, blue);
        assert_eq!(left.colors.start, red);
        assert_eq!(left.colors.end, Rgb::new(0.5, 0.0, 0.5));
        assert_eq!(right.colors.start, left.colors.end);
        assert_eq!(right.colors.end, blue);
    }

    #[test]
    fn hidden_lines_take_two_slots() {
        let mut rendered = RenderedKnot::with_capacity(4);
        rendered.push_hidden_line();
        assert_eq!(rendered.slots.len(), 2);
        assert_eq!(rendered.visible(), 0);
    }
}
