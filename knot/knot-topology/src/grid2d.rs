//! Flat knot grids.

use rand::Rng;
use tracing::debug;

use crate::direction::{Orientation, TileDirection};
use crate::error::TopologyResult;
use crate::grid::Grid;
use crate::lattice::{Corner, Extent};

const INTERIOR_CORNERS: [TileDirection; 3] = [
    TileDirection::Cross,
    TileDirection::Horizontal,
    TileDirection::Vertical,
];

const TURNING_CENTRES: [TileDirection; 2] = [TileDirection::Horizontal, TileDirection::Vertical];

impl Grid<2> {
    /// Fewest tiles per axis for which the boundary rules close every loop.
    pub const MIN_EXTENT: usize = 2;

    /// Point reflection through the grid centre.
    pub const REFLECTIONS: [u8; 1] = [0b11];

    /// Fill a flat grid with random markers.
    ///
    /// Every corner gets a random cross, horizontal or vertical marker.
    /// Each centre is a cross unless a uniform draw falls below
    /// `weirdness`, in which case it turns horizontally or vertically.
    /// The boundary is then fixed up so no strand leaves the grid: edges
    /// across the strands are invalid, edges along them carry straight
    /// strands, and the four canvas corners are invalid.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::GridTooSmall`](crate::TopologyError::GridTooSmall)
    /// if either axis has fewer than [`Self::MIN_EXTENT`] tiles.
    ///
    /// # Example
    ///
    /// ```
    /// use knot_topology::{Corner, Extent, Grid2, Orientation, TileDirection};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let grid = Grid2::populate(Extent::new([4, 3]), Orientation::Horizontal, 0.2, &mut rng)?;
    ///
    /// assert_eq!(grid.corner(&[0, 0], Corner::TOP_LEFT), Some(TileDirection::Invalid));
    /// assert_eq!(grid.centre(&[1, 0]), Some(TileDirection::Horizontal));
    /// # Ok::<(), knot_topology::TopologyError>(())
    /// ```
    pub fn populate<R: Rng + ?Sized>(
        extent: Extent<2>,
        orientation: Orientation,
        weirdness: f32,
        rng: &mut R,
    ) -> TopologyResult<Self> {
        Self::check_min_extent(&extent, Self::MIN_EXTENT)?;
        let [width, height] = extent.dims();
        let mut grid = Self::new(extent);

        for tile in extent.tiles() {
            for corner in Corner::all::<2>() {
                let choice = INTERIOR_CORNERS[rng.gen_range(0..INTERIOR_CORNERS.len())];
                grid.set_corner(&tile, corner, choice)?;
            }

            let draw: f32 = rng.gen();
            let turn = TURNING_CENTRES[rng.gen_range(0..TURNING_CENTRES.len())];
            let centre = if draw >= weirdness {
                TileDirection::Cross
            } else {
                turn
            };
            grid.set_centre(&tile, centre)?;
        }

        // Top and bottom edges
        let across = match orientation {
            Orientation::Vertical => TileDirection::Horizontal,
            Orientation::Horizontal => TileDirection::Invalid,
        };
        for x in 0..width {
            grid.set_corner(&[x, 0], Corner::TOP_LEFT, across)?;
            grid.set_corner(&[x, 0], Corner::TOP_RIGHT, across)?;
            grid.set_corner(&[x, height - 1], Corner::BOTTOM_LEFT, across)?;
            grid.set_corner(&[x, height - 1], Corner::BOTTOM_RIGHT, across)?;
        }

        // Left and right edges
        let along = match orientation {
            Orientation::Horizontal => TileDirection::Vertical,
            Orientation::Vertical => TileDirection::Invalid,
        };
        for y in 0..height {
            grid.set_corner(&[0, y], Corner::TOP_LEFT, along)?;
            grid.set_corner(&[0, y], Corner::BOTTOM_LEFT, along)?;
            grid.set_corner(&[width - 1, y], Corner::TOP_RIGHT, along)?;
            grid.set_corner(&[width - 1, y], Corner::BOTTOM_RIGHT, along)?;
        }

        match orientation {
            Orientation::Vertical => {
                for y in 0..height {
                    grid.set_centre(&[0, y], TileDirection::Vertical)?;
                    grid.set_centre(&[width - 1, y], TileDirection::Vertical)?;
                }
                let inner = [TileDirection::Cross, TileDirection::Horizontal];
                for y in 1..height - 1 {
                    for (tile, corner) in [
                        ([0, y], Corner::TOP_RIGHT),
                        ([0, y], Corner::BOTTOM_RIGHT),
                        ([width - 1, y], Corner::TOP_LEFT),
                        ([width - 1, y], Corner::BOTTOM_LEFT),
                    ] {
                        grid.set_corner(&tile, corner, inner[rng.gen_range(0..inner.len())])?;
                    }
                }
            }
            Orientation::Horizontal => {
                for x in 0..width {
                    grid.set_centre(&[x, 0], TileDirection::Horizontal)?;
                    grid.set_centre(&[x, height - 1], TileDirection::Horizontal)?;
                }
                let inner = [TileDirection::Cross, TileDirection::Vertical];
                for x in 1..width - 1 {
                    for (tile, corner) in [
                        ([x, 0], Corner::BOTTOM_LEFT),
                        ([x, 0], Corner::BOTTOM_RIGHT),
                        ([x, height - 1], Corner::TOP_LEFT),
                        ([x, height - 1], Corner::TOP_RIGHT),
                    ] {
                        grid.set_corner(&tile, corner, inner[rng.gen_range(0..inner.len())])?;
                    }
                }
            }
        }

        // Canvas corners
        grid.set_corner(&[0, 0], Corner::TOP_LEFT, TileDirection::Invalid)?;
        grid.set_corner(&[0, height - 1], Corner::BOTTOM_LEFT, TileDirection::Invalid)?;
        grid.set_corner(&[width - 1, 0], Corner::TOP_RIGHT, TileDirection::Invalid)?;
        grid.set_corner(
            &[width - 1, height - 1],
            Corner::BOTTOM_RIGHT,
            TileDirection::Invalid,
        )?;

        debug!(width, height, ?orientation, weirdness, "populated flat grid");
        Ok(grid)
    }

    /// Give the grid 180° rotational symmetry about its centre.
    pub fn symmetrify(&mut self) {
        self.symmetrify_under(&Self::REFLECTIONS);
    }

    /// Whether the grid has 180° rotational symmetry about its centre.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.is_symmetric_under(&Self::REFLECTIONS)
    }
}
