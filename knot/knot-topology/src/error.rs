//! Error types for knot topology operations.

use thiserror::Error;

/// Result type for knot topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Errors raised while building or tracing a tile grid.
///
/// Coordinates are reported as slices so one error type serves every grid
/// dimension.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A grid axis has fewer tiles than its boundary rules need.
    #[error("grid extent {extent:?} is below the minimum of {min} tiles per axis")]
    GridTooSmall {
        /// Requested tile counts.
        extent: Vec<usize>,
        /// Minimum tiles per axis.
        min: usize,
    },

    /// A tile coordinate outside the grid.
    #[error("tile {tile:?} is outside the grid")]
    TileOutOfRange {
        /// Offending tile.
        tile: Vec<usize>,
    },

    /// A tile centre with no direction was reached while tracing.
    #[error("tile {tile:?} has no centre direction")]
    InvalidCentre {
        /// Tile whose centre is invalid.
        tile: Vec<usize>,
    },

    /// A corner with no direction was reached in the middle of a loop.
    #[error("corner {corner} of tile {tile:?} has no direction")]
    InvalidCorner {
        /// Tile being traced.
        tile: Vec<usize>,
        /// Corner index within the tile.
        corner: usize,
    },

    /// A corner direction led out of the grid.
    #[error("loop left the grid from corner {corner} of tile {tile:?}")]
    OffGrid {
        /// Last tile inside the grid.
        tile: Vec<usize>,
        /// Corner the step was taken from.
        corner: usize,
    },

    /// A loop reached a corner already claimed by another loop.
    #[error("loop re-entered corner {corner} of tile {tile:?}")]
    Revisited {
        /// Tile being traced.
        tile: Vec<usize>,
        /// Corner index within the tile.
        corner: usize,
    },
}
