//! Cubic knot grids.

use rand::Rng;
use tracing::debug;

use crate::direction::TileDirection;
use crate::error::TopologyResult;
use crate::grid::Grid;
use crate::lattice::{Corner, Extent};

const INTERIOR_CORNERS: [TileDirection; 4] = [
    TileDirection::Cross,
    TileDirection::Horizontal,
    TileDirection::Vertical,
    TileDirection::Longitudinal,
];

const TURNING_CENTRES: [TileDirection; 3] = [
    TileDirection::Horizontal,
    TileDirection::Vertical,
    TileDirection::Longitudinal,
];

fn pick<R: Rng + ?Sized>(rng: &mut R, choices: &[TileDirection]) -> TileDirection {
    choices[rng.gen_range(0..choices.len())]
}

impl Grid<3> {
    /// Fewest tiles per axis for which the face rules close every loop.
    pub const MIN_EXTENT: usize = 3;

    /// Half-turns about each axis.
    pub const REFLECTIONS: [u8; 3] = [0b110, 0b101, 0b011];

    /// Fill a cubic grid with random markers.
    ///
    /// Interior tiles get random corners from all four directions and a
    /// cross centre unless a uniform draw falls below `weirdness`. The
    /// top and bottom faces are closed off, the remaining faces and the
    /// grid edges steer strands back inside.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::GridTooSmall`](crate::TopologyError::GridTooSmall)
    /// if any axis has fewer than [`Self::MIN_EXTENT`] tiles.
    pub fn populate<R: Rng + ?Sized>(
        extent: Extent<3>,
        weirdness: f32,
        rng: &mut R,
    ) -> TopologyResult<Self> {
        Self::check_min_extent(&extent, Self::MIN_EXTENT)?;
        let [width, height, depth] = extent.dims();
        let mut grid = Self::new(extent);

        for x in 1..width - 1 {
            for y in 1..height - 1 {
                for z in 1..depth - 1 {
                    let tile = [x, y, z];
                    for corner in Corner::all::<3>() {
                        grid.set_corner(&tile, corner, pick(rng, &INTERIOR_CORNERS))?;
                    }
                    let draw: f32 = rng.gen();
                    let turn = pick(rng, &TURNING_CENTRES);
                    let centre = if draw >= weirdness {
                        TileDirection::Cross
                    } else {
                        turn
                    };
                    grid.set_centre(&tile, centre)?;
                }
            }
        }

        // Top and bottom faces
        let flat = [TileDirection::Longitudinal, TileDirection::Horizontal];
        for x in 0..width {
            for z in 0..depth {
                for corner in Corner::all::<3>() {
                    if !corner.is_far(1) {
                        grid.set_corner(&[x, 0, z], corner, TileDirection::Invalid)?;
                    }
                }
                grid.set_centre(&[x, 0, z], pick(rng, &flat))?;

                for corner in Corner::all::<3>() {
                    if corner.is_far(1) {
                        grid.set_corner(&[x, height - 1, z], corner, TileDirection::Invalid)?;
                    }
                }
                grid.set_centre(&[x, height - 1, z], pick(rng, &flat))?;
            }
        }
        for x in 1..width - 1 {
            for z in 1..depth - 1 {
                for corner in Corner::all::<3>() {
                    if corner.is_far(1) {
                        grid.set_corner(&[x, 0, z], corner, TileDirection::Cross)?;
                    } else {
                        grid.set_corner(&[x, height - 1, z], corner, TileDirection::Cross)?;
                    }
                }
            }
        }

        // Left and right faces
        let upright = [TileDirection::Vertical, TileDirection::Longitudinal];
        for y in 1..height - 1 {
            for z in 1..depth - 1 {
                for corner in Corner::all::<3>() {
                    if corner.is_far(0) {
                        grid.set_corner(&[width - 1, y, z], corner, pick(rng, &upright))?;
                    } else {
                        grid.set_corner(&[0, y, z], corner, pick(rng, &upright))?;
                    }
                }
            }
        }

        // Front and back faces
        let facing = [TileDirection::Vertical, TileDirection::Horizontal];
        for x in 1..width - 1 {
            for y in 1..height - 1 {
                for corner in Corner::all::<3>() {
                    if corner.is_far(2) {
                        grid.set_corner(&[x, y, depth - 1], corner, pick(rng, &facing))?;
                    } else {
                        grid.set_corner(&[x, y, 0], corner, pick(rng, &facing))?;
                    }
                }
            }
        }

        let (wx, hy, dz) = (width - 1, height - 1, depth - 1);
        let vertical = TileDirection::Vertical;

        // Edges along x
        for x in 1..width - 1 {
            for (tile, corners) in [
                ([x, 0, 0], [Corner::at(0, 1, 0), Corner::at(1, 1, 0)]),
                ([x, hy, 0], [Corner::at(0, 0, 0), Corner::at(1, 0, 0)]),
                ([x, 0, dz], [Corner::at(0, 1, 1), Corner::at(1, 1, 1)]),
                ([x, hy, dz], [Corner::at(0, 0, 1), Corner::at(1, 0, 1)]),
            ] {
                for corner in corners {
                    grid.set_corner(&tile, corner, vertical)?;
                }
            }
        }

        // Edges along y
        for y in 1..height - 1 {
            for (tile, corners) in [
                ([0, y, 0], [Corner::at(0, 0, 0), Corner::at(0, 1, 0)]),
                ([wx, y, 0], [Corner::at(1, 0, 0), Corner::at(1, 1, 0)]),
                ([0, y, dz], [Corner::at(0, 0, 1), Corner::at(0, 1, 1)]),
                ([wx, y, dz], [Corner::at(1, 0, 1), Corner::at(1, 1, 1)]),
            ] {
                for corner in corners {
                    grid.set_corner(&tile, corner, vertical)?;
                }
            }
        }

        // Edges along z
        for z in 1..depth - 1 {
            for (tile, corners) in [
                ([0, 0, z], [Corner::at(0, 1, 0), Corner::at(0, 1, 1)]),
                ([wx, 0, z], [Corner::at(1, 1, 0), Corner::at(1, 1, 1)]),
                ([0, hy, z], [Corner::at(0, 0, 0), Corner::at(0, 0, 1)]),
                ([wx, hy, z], [Corner::at(1, 0, 0), Corner::at(1, 0, 1)]),
            ] {
                for corner in corners {
                    grid.set_corner(&tile, corner, vertical)?;
                }
            }
        }

        debug!(width, height, depth, weirdness, "populated cubic grid");
        Ok(grid)
    }

    /// Give the grid the symmetry of half-turns about every axis.
    pub fn symmetrify(&mut self) {
        self.symmetrify_under(&Self::REFLECTIONS);
    }

    /// Whether the grid is unchanged by a half-turn about every axis.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric_under(&Self::REFLECTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TopologyError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn populated(dims: [usize; 3], seed: u64) -> Grid<3> {
        let mut rng = StdRng::seed_from_u64(seed);
        Grid::<3>::populate(Extent::new(dims), 0.0, &mut rng).expect("populate")
    }

    #[test]
    fn top_and_bottom_are_closed() {
        let grid = populated([4, 3, 5], 1);
        for x in 0..=4 {
            for z in 0..=5 {
                assert_eq!(grid.lattice(&[x, 0, z]), Some(TileDirection::Invalid));
                assert_eq!(grid.lattice(&[x, 3, z]), Some(TileDirection::Invalid));
            }
        }
    }

    #[test]
    fn face_centres_lie_flat() {
        let grid = populated([3, 3, 3], 2);
        for x in 0..3 {
            for z in 0..3 {
                for y in [0, 2] {
                    let centre = grid.centre(&[x, y, z]).expect("centre");
                    assert!(matches!(
                        centre,
                        TileDirection::Longitudinal | TileDirection::Horizontal
                    ));
                }
            }
        }
    }

    #[test]
    fn grid_edges_run_vertically() {
        let grid = populated([4, 4, 4], 3);
        // Lattice points on the x edge just inside the bottom face
        for x in 1..4 {
            assert_eq!(grid.lattice(&[x, 1, 0]), Some(TileDirection::Vertical));
        }
        for y in 1..4 {
            assert_eq!(grid.lattice(&[0, y, 0]), Some(TileDirection::Vertical));
            assert_eq!(grid.lattice(&[4, y, 4]), Some(TileDirection::Vertical));
        }
    }

    #[test]
    fn side_faces_use_restricted_markers() {
        let grid = populated([4, 4, 4], 4);
        let left = grid.lattice(&[0, 2, 2]).expect("left");
        assert!(matches!(
            left,
            TileDirection::Vertical | TileDirection::Longitudinal
        ));
        let front = grid.lattice(&[2, 2, 0]).expect("front");
        assert!(matches!(
            front,
            TileDirection::Vertical | TileDirection::Horizontal
        ));
    }

    #[test]
    fn same_seed_same_grid() {
        assert_eq!(populated([3, 4, 5], 42), populated([3, 4, 5], 42));
    }

    #[test]
    fn symmetrify_is_idempotent() {
        let mut grid = populated([3, 3, 4], 42);
        grid.symmetrify();
        assert!(grid.is_symmetric());

        let once = grid.clone();
        grid.symmetrify();
        assert_eq!(grid, once);
    }

    #[test]
    fn thin_grid_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let result = Grid::<3>::populate(Extent::new([3, 2, 3]), 0.0, &mut rng);
        assert_eq!(
            result,
            Err(TopologyError::GridTooSmall {
                extent: vec![3, 2, 3],
                min: 3
            })
        );
    }
}
