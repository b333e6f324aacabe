//! Direction grids shared by the flat and cubic knot layouts.

use crate::direction::TileDirection;
use crate::error::{TopologyError, TopologyResult};
use crate::lattice::{Corner, Extent, TileCoord};

/// Corner and centre direction markers of an `N`-dimensional tile grid.
///
/// Corners live on the lattice and are shared between neighbouring tiles;
/// each tile owns its centre. Every marker starts as
/// [`TileDirection::Cross`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<const N: usize> {
    extent: Extent<N>,
    corners: Vec<TileDirection>,
    centres: Vec<TileDirection>,
}

/// A flat grid of square tiles.
pub type Grid2 = Grid<2>;

/// A cubic grid of box tiles.
pub type Grid3 = Grid<3>;

impl<const N: usize> Grid<N> {
    /// A grid of `extent` with every marker set to cross.
    #[must_use]
    pub fn new(extent: Extent<N>) -> Self {
        Self {
            extent,
            corners: vec![TileDirection::Cross; extent.lattice_count()],
            centres: vec![TileDirection::Cross; extent.tile_count()],
        }
    }

    /// Tile counts of the grid.
    #[must_use]
    pub fn extent(&self) -> &Extent<N> {
        &self.extent
    }

    /// Direction at `corner` of `tile`.
    #[must_use]
    pub fn corner(&self, tile: &TileCoord<N>, corner: Corner) -> Option<TileDirection> {
        self.extent.tile_index(tile)?;
        self.lattice(&self.extent.corner_point(tile, corner))
    }

    /// Set the direction at `corner` of `tile`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::TileOutOfRange`] if `tile` is outside the
    /// grid.
    pub fn set_corner(
        &mut self,
        tile: &TileCoord<N>,
        corner: Corner,
        direction: TileDirection,
    ) -> TopologyResult<()> {
        let index = self
            .extent
            .tile_index(tile)
            .and_then(|_| self.extent.lattice_index(&self.extent.corner_point(tile, corner)))
            .ok_or_else(|| out_of_range(tile))?;
        self.corners[index] = direction;
        Ok(())
    }

    /// Direction at the centre of `tile`.
    #[must_use]
    pub fn centre(&self, tile: &TileCoord<N>) -> Option<TileDirection> {
        self.extent
            .tile_index(tile)
            .map(|index| self.centres[index])
    }

    /// Set the direction at the centre of `tile`.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::TileOutOfRange`] if `tile` is outside the
    /// grid.
    pub fn set_centre(&mut self, tile: &TileCoord<N>, direction: TileDirection) -> TopologyResult<()> {
        let index = self
            .extent
            .tile_index(tile)
            .ok_or_else(|| out_of_range(tile))?;
        self.centres[index] = direction;
        Ok(())
    }

    /// Direction at a lattice point.
    #[must_use]
    pub fn lattice(&self, point: &[usize; N]) -> Option<TileDirection> {
        self.extent
            .lattice_index(point)
            .map(|index| self.corners[index])
    }

    /// All lattice markers, flat-indexed.
    #[must_use]
    pub fn corners(&self) -> &[TileDirection] {
        &self.corners
    }

    /// All centre markers, flat-indexed.
    #[must_use]
    pub fn centres(&self) -> &[TileDirection] {
        &self.centres
    }

    /// Make the grid invariant under the given reflections.
    ///
    /// Each mask mirrors the axes whose bits it sets. Together with the
    /// identity the masks must form a group (closed under XOR). Every
    /// orbit of lattice points and of tiles then takes the marker of its
    /// lowest flat index. Reflections preserve axes, so markers are copied
    /// unchanged.
    pub fn symmetrify_under(&mut self, reflections: &[u8]) {
        for index in 0..self.corners.len() {
            let Some(point) = self.extent.lattice_point_at(index) else {
                continue;
            };
            let images = self.lattice_images(&point, reflections);
            if images.iter().all(|&image| image >= index) {
                let value = self.corners[index];
                for image in images {
                    self.corners[image] = value;
                }
            }
        }

        for index in 0..self.centres.len() {
            let Some(tile) = self.extent.tile_at(index) else {
                continue;
            };
            let images = self.tile_images(&tile, reflections);
            if images.iter().all(|&image| image >= index) {
                let value = self.centres[index];
                for image in images {
                    self.centres[image] = value;
                }
            }
        }
    }

    /// Whether every marker equals its images under `reflections`.
    #[must_use]
    pub fn is_symmetric_under(&self, reflections: &[u8]) -> bool {
        let corners_match = (0..self.corners.len()).all(|index| {
            self.extent.lattice_point_at(index).is_some_and(|point| {
                self.lattice_images(&point, reflections)
                    .into_iter()
                    .all(|image| self.corners[image] == self.corners[index])
            })
        });
        let centres_match = (0..self.centres.len()).all(|index| {
            self.extent.tile_at(index).is_some_and(|tile| {
                self.tile_images(&tile, reflections)
                    .into_iter()
                    .all(|image| self.centres[image] == self.centres[index])
            })
        });
        corners_match && centres_match
    }

    /// Number of `(tile, corner)` pairs a strand passes through.
    #[must_use]
    pub fn valid_corner_slots(&self) -> usize {
        self.extent
            .tiles()
            .map(|tile| {
                Corner::all::<N>()
                    .filter(|&corner| self.corner(&tile, corner).is_some_and(TileDirection::is_valid))
                    .count()
            })
            .sum()
    }

    pub(crate) fn check_min_extent(extent: &Extent<N>, min: usize) -> TopologyResult<()> {
        if extent.min_dim() < min {
            return Err(TopologyError::GridTooSmall {
                extent: extent.dims().to_vec(),
                min,
            });
        }
        Ok(())
    }

    fn lattice_images(&self, point: &[usize; N], reflections: &[u8]) -> Vec<usize> {
        reflections
            .iter()
            .filter_map(|&mask| {
                self.extent
                    .lattice_index(&self.extent.reflect_point(point, mask))
            })
            .collect()
    }

    fn tile_images(&self, tile: &TileCoord<N>, reflections: &[u8]) -> Vec<usize> {
        reflections
            .iter()
            .filter_map(|&mask| self.extent.tile_index(&self.extent.reflect_tile(tile, mask)))
            .collect()
    }
}

fn out_of_range<const N: usize>(tile: &TileCoord<N>) -> TopologyError {
    TopologyError::TileOutOfRange {
        tile: tile.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_cross() {
        let grid = Grid::new(Extent::new([2, 3]));
        assert_eq!(grid.corners().len(), 12);
        assert_eq!(grid.centres().len(), 6);
        assert!(grid.corners().iter().all(|&d| d == TileDirection::Cross));
    }

    #[test]
    fn shared_corners_alias() {
        let mut grid = Grid::new(Extent::new([3, 3]));
        grid.set_corner(&[0, 0], Corner::BOTTOM_RIGHT, TileDirection::Vertical)
            .expect("set");
        assert_eq!(
            grid.corner(&[1, 1], Corner::TOP_LEFT),
            Some(TileDirection::Vertical)
        );
        assert_eq!(grid.lattice(&[1, 1]), Some(TileDirection::Vertical));
    }

    #[test]
    fn out_of_range_access() {
        let mut grid = Grid::new(Extent::new([2, 2]));
        assert_eq!(grid.corner(&[2, 0], Corner::TOP_LEFT), None);
        assert_eq!(grid.centre(&[0, 5]), None);
        assert_eq!(
            grid.set_centre(&[2, 0], TileDirection::Vertical),
            Err(TopologyError::TileOutOfRange { tile: vec![2, 0] })
        );
        assert!(grid
            .set_corner(&[0, 2], Corner::TOP_LEFT, TileDirection::Vertical)
            .is_err());
    }

    #[test]
    fn symmetrify_copies_lowest_index() {
        let mut grid = Grid::new(Extent::new([3, 2]));
        grid.set_centre(&[0, 0], TileDirection::Horizontal).expect("set");
        grid.set_centre(&[2, 1], TileDirection::Vertical).expect("set");
        assert!(!grid.is_symmetric_under(&[0b11]));

        grid.symmetrify_under(&[0b11]);
        assert_eq!(grid.centre(&[2, 1]), Some(TileDirection::Horizontal));
        assert!(grid.is_symmetric_under(&[0b11]));
    }

    #[test]
    fn valid_slots_skip_invalid_corners() {
        let mut grid = Grid::new(Extent::new([2, 2]));
        assert_eq!(grid.valid_corner_slots(), 16);
        // The centre lattice point is shared by all four tiles
        grid.set_corner(&[0, 0], Corner::BOTTOM_RIGHT, TileDirection::Invalid)
            .expect("set");
        assert_eq!(grid.valid_corner_slots(), 12);
    }
}
