//! Loop tracing over a populated grid.
//!
//! A strand enters a tile at one corner, crosses the centre to the
//! opposite corner along the centre's axes, and leaves through that corner
//! along the corner's axes into the neighbouring tile. Following these
//! steps from an unvisited corner until the start comes back around
//! yields one closed loop.

use mesh_types::Rgb;
use tracing::{debug, error};

use crate::error::{TopologyError, TopologyResult};
use crate::grid::Grid;
use crate::lattice::{Corner, Extent, TileCoord};
use crate::palette::LoopPalette;

/// Loop membership and colour of every `(tile, corner)` slot.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopColoring<const N: usize> {
    extent: Extent<N>,
    loop_count: usize,
    colors: Vec<Rgb>,
    loop_ids: Vec<Option<usize>>,
}

impl<const N: usize> LoopColoring<N> {
    /// Number of closed loops found.
    #[must_use]
    pub fn loop_count(&self) -> usize {
        self.loop_count
    }

    /// Colour of the strand at `corner` of `tile`. Unvisited slots are
    /// [`Rgb::BLACK`].
    #[must_use]
    pub fn color(&self, tile: &TileCoord<N>, corner: Corner) -> Option<Rgb> {
        self.extent
            .corner_slot(tile, corner)
            .map(|slot| self.colors[slot])
    }

    /// Loop passing through `corner` of `tile`, if any.
    #[must_use]
    pub fn loop_id(&self, tile: &TileCoord<N>, corner: Corner) -> Option<usize> {
        self.extent
            .corner_slot(tile, corner)
            .and_then(|slot| self.loop_ids[slot])
    }

    /// Number of slots some loop passes through.
    #[must_use]
    pub fn visited(&self) -> usize {
        self.loop_ids.iter().filter(|id| id.is_some()).count()
    }

    /// Colours of all slots, in slot order.
    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

/// Trace every loop of `grid` and colour it from `palette`.
///
/// Tiles are scanned with axis 0 outermost and their corners in index
/// order. Every unvisited slot draws a palette colour, including slots
/// whose corner is invalid and which start no loop.
///
/// # Errors
///
/// Fails if the grid does not close into loops: a strand reaching an
/// invalid centre or corner, stepping off the grid, or entering a slot
/// that belongs to another loop.
pub fn color_loops<const N: usize>(
    grid: &Grid<N>,
    palette: &mut LoopPalette,
) -> TopologyResult<LoopColoring<N>> {
    let extent = *grid.extent();
    let mut tracer = Tracer {
        grid,
        coloring: LoopColoring {
            extent,
            loop_count: 0,
            colors: vec![Rgb::BLACK; extent.corner_slots()],
            loop_ids: vec![None; extent.corner_slots()],
        },
    };

    for tile in extent.tiles() {
        for corner in Corner::all::<N>() {
            if tracer.is_visited(&tile, corner) {
                continue;
            }
            let color = palette.next_color();
            if !grid.corner(&tile, corner).is_some_and(|d| d.is_valid()) {
                continue;
            }
            if let Err(err) = tracer.trace(tile, corner, color) {
                error!(%err, ?tile, corner = corner.index(), "knot loop failed to close");
                return Err(err);
            }
        }
    }

    debug!(loops = tracer.coloring.loop_count, "traced knot loops");
    Ok(tracer.coloring)
}

struct Tracer<'a, const N: usize> {
    grid: &'a Grid<N>,
    coloring: LoopColoring<N>,
}

impl<const N: usize> Tracer<'_, N> {
    fn slot(&self, tile: &TileCoord<N>, corner: Corner) -> TopologyResult<usize> {
        self.coloring
            .extent
            .corner_slot(tile, corner)
            .ok_or_else(|| TopologyError::TileOutOfRange {
                tile: tile.to_vec(),
            })
    }

    fn is_visited(&self, tile: &TileCoord<N>, corner: Corner) -> bool {
        self.coloring
            .extent
            .corner_slot(tile, corner)
            .is_some_and(|slot| self.coloring.loop_ids[slot].is_some())
    }

    fn mark(&mut self, tile: &TileCoord<N>, corner: Corner, color: Rgb) -> TopologyResult<()> {
        let slot = self.slot(tile, corner)?;
        self.coloring.loop_ids[slot] = Some(self.coloring.loop_count);
        self.coloring.colors[slot] = color;
        Ok(())
    }

    fn trace(&mut self, start: TileCoord<N>, start_corner: Corner, color: Rgb) -> TopologyResult<()> {
        let (mut tile, mut corner) = (start, start_corner);
        loop {
            self.mark(&tile, corner, color)?;

            let across = self.cross_centre(&tile, corner)?;
            if self.is_visited(&tile, across) {
                return Err(revisited(&tile, across));
            }
            self.mark(&tile, across, color)?;

            (tile, corner) = self.leave(&tile, across)?;
            if self.is_visited(&tile, corner) {
                if (tile, corner) == (start, start_corner) {
                    break;
                }
                return Err(revisited(&tile, corner));
            }
        }
        self.coloring.loop_count += 1;
        Ok(())
    }

    fn cross_centre(&self, tile: &TileCoord<N>, corner: Corner) -> TopologyResult<Corner> {
        self.grid
            .centre(tile)
            .and_then(|direction| direction.axis_mask(N))
            .map(|mask| corner.flipped(mask))
            .ok_or_else(|| TopologyError::InvalidCentre {
                tile: tile.to_vec(),
            })
    }

    fn leave(&self, tile: &TileCoord<N>, corner: Corner) -> TopologyResult<(TileCoord<N>, Corner)> {
        let mask = self
            .grid
            .corner(tile, corner)
            .and_then(|direction| direction.axis_mask(N))
            .ok_or_else(|| TopologyError::InvalidCorner {
                tile: tile.to_vec(),
                corner: corner.index(),
            })?;

        let dims = self.coloring.extent.dims();
        let mut next = *tile;
        for axis in (0..N).filter(|&axis| (mask >> axis) & 1 == 1) {
            let step = if corner.is_far(axis) {
                next[axis].checked_add(1).filter(|&t| t < dims[axis])
            } else {
                next[axis].checked_sub(1)
            };
            next[axis] = step.ok_or_else(|| TopologyError::OffGrid {
                tile: tile.to_vec(),
                corner: corner.index(),
            })?;
        }
        Ok((next, corner.flipped(mask)))
    }
}

fn revisited<const N: usize>(tile: &TileCoord<N>, corner: Corner) -> TopologyError {
    TopologyError::Revisited {
        tile: tile.to_vec(),
        corner: corner.index(),
    }
}
