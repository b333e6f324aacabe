//! Tile-direction lattices for Celtic knots.
//!
//! A knot is laid out on a grid of tiles. Every tile corner and every tile
//! centre carries a [`TileDirection`] telling a strand which way to go.
//! This crate fills such grids at random, makes them symmetric and traces
//! the closed loops they describe:
//!
//! - [`Grid2`] / [`Grid3`] - Flat and cubic grids with shared lattice corners
//! - [`Grid2::populate`] / [`Grid3::populate`] - Random fills whose boundary
//!   rules guarantee every strand closes
//! - [`color_loops`] - Loop tracing with a [`LoopPalette`] colour per loop
//!
//! # Layer 0 Crate
//!
//! Nothing here knows about curves or meshes. The output of tracing is a
//! colour per tile corner, which the renderer turns into tubes.
//!
//! # Feature Flags
//!
//! - `serde`: Serialize/Deserialize for [`TileDirection`] and [`Orientation`]
//!
//! # Example
//!
//! ```
//! use knot_topology::{color_loops, Extent, Grid2, LoopPalette, Orientation};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let mut grid = Grid2::populate(Extent::new([4, 4]), Orientation::Vertical, 0.2, &mut rng)?;
//! grid.symmetrify();
//!
//! let coloring = color_loops(&grid, &mut LoopPalette::new(0))?;
//! assert!(coloring.loop_count() > 0);
//! assert_eq!(coloring.visited(), grid.valid_corner_slots());
//! # Ok::<(), knot_topology::TopologyError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

mod direction;
mod error;
mod grid;
mod grid2d;
mod grid3d;
mod lattice;
mod palette;
mod trace;

pub use direction::{Orientation, TileDirection};
pub use error::{TopologyError, TopologyResult};
pub use grid::{Grid, Grid2, Grid3};
pub use lattice::{Corner, Extent, TileCoord};
pub use palette::LoopPalette;
pub use trace::{color_loops, LoopColoring};
