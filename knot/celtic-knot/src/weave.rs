//! Over/under displacement of crossing strands in cubic knots.
//!
//! Each tile corner maps to a fixed set of axes along which a strand
//! passing diagonally through it is pushed outward, and the diagonal's
//! midpoint is pushed the opposite way. The table is a fixed lookup in
//! which opposite corners share an entry.

use knot_topology::Corner;
use nalgebra::Vector3;

/// Axis bits (x = 1, y = 2, z = 4) displaced at each corner, by corner index.
pub const WEAVE_TABLE: [u8; 8] = [7, 2, 4, 1, 1, 4, 2, 7];

fn weave_axes(corner: Corner) -> Vector3<f64> {
    let bits = WEAVE_TABLE[corner.index() % WEAVE_TABLE.len()];
    Vector3::new(
        f64::from(bits & 1),
        f64::from((bits >> 1) & 1),
        f64::from(bits >> 2),
    )
}

/// Displacement of a diagonal strand where it meets `corner`.
#[must_use]
pub fn weave_corner(corner: Corner, height: f64) -> Vector3<f64> {
    weave_axes(corner) * height
}

/// Displacement of the midpoint of a diagonal strand starting at `corner`.
#[must_use]
pub fn weave_centre(corner: Corner, height: f64) -> Vector3<f64> {
    weave_axes(corner) * -height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_fixture() {
        assert_eq!(weave_corner(Corner::at(0, 0, 0), 1.0), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(weave_corner(Corner::at(1, 0, 0), 1.0), Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(weave_corner(Corner::at(0, 1, 0), 1.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(weave_corner(Corner::at(1, 1, 0), 1.0), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(weave_corner(Corner::at(1, 1, 1), 0.5), Vector3::new(0.5, 0.5, 0.5));
    }

    #[test]
    fn opposite_corners_share_axes() {
        for corner in Corner::all::<3>() {
            assert_eq!(
                weave_corner(corner, 1.0),
                weave_corner(corner.flipped(0b111), 1.0)
            );
        }
    }

    #[test]
    fn centre_pushes_back() {
        let corner = Corner::at(0, 1, 1);
        assert_eq!(weave_centre(corner, 0.3), -weave_corner(corner, 0.3));
    }
}
