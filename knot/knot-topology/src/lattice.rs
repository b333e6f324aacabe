//! Tile coordinates, tile corners and flat indexing.
//!
//! A grid of `N`-dimensional tiles has `dims[a]` tiles along axis `a` and
//! `dims[a] + 1` lattice points. Corner `c` of tile `t` is the lattice
//! point `t + bits(c)`, so neighbouring tiles share their corners.
//!
//! Flat indices run with axis 0 fastest. Scans visit tiles with axis 0
//! outermost.

/// Tile coordinate, one entry per axis.
pub type TileCoord<const N: usize> = [usize; N];

/// One corner of a tile, encoded as a bit per axis (x = 1, y = 2, z = 4).
///
/// A set bit means the corner lies on the far side of the tile along that
/// axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Corner(u8);

impl Corner {
    /// Top-left corner of a flat tile.
    pub const TOP_LEFT: Self = Self(0b00);
    /// Top-right corner of a flat tile.
    pub const TOP_RIGHT: Self = Self(0b01);
    /// Bottom-left corner of a flat tile.
    pub const BOTTOM_LEFT: Self = Self(0b10);
    /// Bottom-right corner of a flat tile.
    pub const BOTTOM_RIGHT: Self = Self(0b11);

    /// Corner from per-axis bits.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Corner with the given side on each of three axes.
    #[must_use]
    pub const fn at(x: u8, y: u8, z: u8) -> Self {
        Self((x & 1) | ((y & 1) << 1) | ((z & 1) << 2))
    }

    /// Per-axis bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Position of this corner among a tile's corners.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Whether the corner lies on the far side along `axis`.
    #[must_use]
    pub const fn is_far(self, axis: usize) -> bool {
        (self.0 >> axis) & 1 == 1
    }

    /// The corner with the axes in `mask` mirrored.
    #[must_use]
    pub const fn flipped(self, mask: u8) -> Self {
        Self(self.0 ^ mask)
    }

    /// All corners of an `N`-dimensional tile, in index order.
    #[allow(clippy::cast_possible_truncation)]
    pub fn all<const N: usize>() -> impl Iterator<Item = Self> {
        (0..1usize << N).map(|bits| Self(bits as u8))
    }
}

/// The tile counts of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent<const N: usize> {
    dims: [usize; N],
}

impl<const N: usize> Extent<N> {
    /// Corners per tile.
    pub const CORNERS_PER_TILE: usize = 1 << N;

    /// Extent with `dims[a]` tiles along axis `a`.
    #[must_use]
    pub const fn new(dims: [usize; N]) -> Self {
        Self { dims }
    }

    /// Tiles per axis.
    #[must_use]
    pub const fn dims(&self) -> [usize; N] {
        self.dims
    }

    /// Lattice points per axis.
    #[must_use]
    pub fn lattice_dims(&self) -> [usize; N] {
        self.dims.map(|d| d + 1)
    }

    /// Total number of tiles.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.dims.iter().product()
    }

    /// Total number of lattice points.
    #[must_use]
    pub fn lattice_count(&self) -> usize {
        self.lattice_dims().iter().product()
    }

    /// Total number of tile corners, counting shared corners once per tile.
    #[must_use]
    pub fn corner_slots(&self) -> usize {
        self.tile_count() * Self::CORNERS_PER_TILE
    }

    /// Smallest tile count along any axis.
    #[must_use]
    pub fn min_dim(&self) -> usize {
        self.dims.iter().copied().min().unwrap_or(0)
    }

    /// Flat index of `tile`, or `None` if it lies outside the grid.
    #[must_use]
    pub fn tile_index(&self, tile: &TileCoord<N>) -> Option<usize> {
        flatten(tile, &self.dims)
    }

    /// Tile at flat index `index`.
    #[must_use]
    pub fn tile_at(&self, index: usize) -> Option<TileCoord<N>> {
        unflatten(index, &self.dims)
    }

    /// Flat index of a lattice point.
    #[must_use]
    pub fn lattice_index(&self, point: &[usize; N]) -> Option<usize> {
        flatten(point, &self.lattice_dims())
    }

    /// Lattice point at flat index `index`.
    #[must_use]
    pub fn lattice_point_at(&self, index: usize) -> Option<[usize; N]> {
        unflatten(index, &self.lattice_dims())
    }

    /// The lattice point at `corner` of `tile`.
    #[must_use]
    pub fn corner_point(&self, tile: &TileCoord<N>, corner: Corner) -> [usize; N] {
        let mut point = *tile;
        for (axis, p) in point.iter_mut().enumerate() {
            *p += usize::from(corner.is_far(axis));
        }
        point
    }

    /// Slot of `corner` of `tile` in per-corner tables.
    #[must_use]
    pub fn corner_slot(&self, tile: &TileCoord<N>, corner: Corner) -> Option<usize> {
        (corner.index() < Self::CORNERS_PER_TILE)
            .then(|| self.tile_index(tile))
            .flatten()
            .map(|index| index * Self::CORNERS_PER_TILE + corner.index())
    }

    /// Mirror a tile through the grid centre along the axes in `mask`.
    #[must_use]
    pub fn reflect_tile(&self, tile: &TileCoord<N>, mask: u8) -> TileCoord<N> {
        let mut reflected = *tile;
        for (axis, t) in reflected.iter_mut().enumerate() {
            if (mask >> axis) & 1 == 1 {
                *t = self.dims[axis].saturating_sub(1).saturating_sub(*t);
            }
        }
        reflected
    }

    /// Mirror a lattice point through the grid centre along the axes in
    /// `mask`.
    #[must_use]
    pub fn reflect_point(&self, point: &[usize; N], mask: u8) -> [usize; N] {
        let mut reflected = *point;
        for (axis, p) in reflected.iter_mut().enumerate() {
            if (mask >> axis) & 1 == 1 {
                *p = self.dims[axis].saturating_sub(*p);
            }
        }
        reflected
    }

    /// Every tile, axis 0 outermost.
    pub fn tiles(&self) -> impl Iterator<Item = TileCoord<N>> {
        let dims = self.dims;
        (0..self.tile_count()).map(move |n| {
            let mut tile = [0; N];
            let mut rest = n;
            for axis in (0..N).rev() {
                tile[axis] = rest % dims[axis];
                rest /= dims[axis];
            }
            tile
        })
    }
}

fn flatten<const N: usize>(coord: &[usize; N], sizes: &[usize; N]) -> Option<usize> {
    let mut index = 0;
    for axis in (0..N).rev() {
        if coord[axis] >= sizes[axis] {
            return None;
        }
        index = index * sizes[axis] + coord[axis];
    }
    Some(index)
}

fn unflatten<const N: usize>(index: usize, sizes: &[usize; N]) -> Option<[usize; N]> {
    let mut coord = [0; N];
    let mut rest = index;
    for axis in 0..N {
        if sizes[axis] == 0 {
            return None;
        }
        coord[axis] = rest % sizes[axis];
        rest /= sizes[axis];
    }
    (rest == 0).then_some(coord)
}
