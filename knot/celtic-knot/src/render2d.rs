//! Tile-to-curve mapping for flat knots.
//!
//! Each tile carries two lines chosen by its centre: a horizontal centre
//! joins the top and bottom pairs of corners, a vertical centre the left
//! and right pairs, and a cross the two diagonals. Diagonal lines are
//! woven by lifting their ends and pushing their middle the other way
//! along z.

use knot_topology::{Corner, Grid2, TileDirection};
use mesh_types::{Point3, Vector3};

use crate::config::KnotConfig;
use crate::error::KnotResult;
use crate::strand::{half_tubes, lifted_halves, line_curve, CornerColors, LineEnd, RenderedKnot};

/// Corner pairs joined inside a tile with the given centre.
fn tile_lines(centre: TileDirection) -> Option<[(Corner, Corner); 2]> {
    match centre {
        TileDirection::Horizontal => Some([
            (Corner::TOP_LEFT, Corner::TOP_RIGHT),
            (Corner::BOTTOM_LEFT, Corner::BOTTOM_RIGHT),
        ]),
        TileDirection::Vertical => Some([
            (Corner::TOP_LEFT, Corner::BOTTOM_LEFT),
            (Corner::TOP_RIGHT, Corner::BOTTOM_RIGHT),
        ]),
        TileDirection::Cross => Some([
            (Corner::TOP_LEFT, Corner::BOTTOM_RIGHT),
            (Corner::BOTTOM_LEFT, Corner::TOP_RIGHT),
        ]),
        TileDirection::Invalid | TileDirection::Longitudinal => None,
    }
}

/// How a line leaves a corner with the given marker.
struct EndStyle {
    inset: Vector3<f64>,
    reach: Vector3<f64>,
    lift: f64,
}

fn end_style(direction: TileDirection, config: &KnotConfig) -> Option<EndStyle> {
    let [tile_x, tile_y, _] = config.tile_size;
    let [inset_x, inset_y, _] = config.inset;
    let scale = config.control_scale;
    match direction {
        TileDirection::Horizontal => Some(EndStyle {
            inset: Vector3::new(0.0, inset_y, 0.0),
            reach: Vector3::new(tile_x * scale, 0.0, 0.0),
            lift: 0.0,
        }),
        TileDirection::Vertical => Some(EndStyle {
            inset: Vector3::new(inset_x, 0.0, 0.0),
            reach: Vector3::new(0.0, tile_y * scale, 0.0),
            lift: 0.0,
        }),
        TileDirection::Cross => Some(EndStyle {
            inset: Vector3::zeros(),
            reach: Vector3::new(tile_x * scale, tile_y * scale, 0.0),
            lift: config.weave_height,
        }),
        TileDirection::Invalid | TileDirection::Longitudinal => None,
    }
}

/// Lift at a corner: the anti-diagonal corners sit below the plane.
fn corner_lift(corner: Corner, lift: f64) -> f64 {
    if corner.is_far(0) == corner.is_far(1) {
        lift
    } else {
        -lift
    }
}

/// Lift at the middle of a line: diagonals cross over and under.
fn middle_lift(start: Corner, end: Corner, weave: f64) -> f64 {
    if start.bits() ^ end.bits() != 0b11 {
        0.0
    } else if start.is_far(0) == start.is_far(1) {
        -weave
    } else {
        weave
    }
}

/// Map every tile of a flat grid to its tube specs.
///
/// Tiles are visited with x outermost. Each tile fills four slots, two
/// halves per line; a line with an invalid end, or a tile with an invalid
/// centre, leaves its slots empty. `pieces` sets the chord count used to
/// measure length.
///
/// # Errors
///
/// Returns an error if `pieces` is zero.
#[allow(clippy::cast_precision_loss)]
pub fn render_flat<C: CornerColors<2>>(
    grid: &Grid2,
    colors: &C,
    config: &KnotConfig,
    pieces: usize,
) -> KnotResult<RenderedKnot> {
    let extent = *grid.extent();
    let size = Vector3::new(config.tile_size[0], config.tile_size[1], 0.0);
    let offset = config.offset();
    let mut rendered = RenderedKnot::with_capacity(extent.tile_count() * 4);

    for tile in extent.tiles() {
        let origin = Point3::new(tile[0] as f64 * size.x, tile[1] as f64 * size.y, 0.0);
        let Some(lines) = grid.centre(&tile).and_then(tile_lines) else {
            rendered.push_hidden_line();
            rendered.push_hidden_line();
            continue;
        };

        for (start, end) in lines {
            let styles = grid
                .corner(&tile, start)
                .and_then(|d| end_style(d, config))
                .zip(grid.corner(&tile, end).and_then(|d| end_style(d, config)));
            let Some((from_style, to_style)) = styles else {
                rendered.push_hidden_line();
                continue;
            };

            let from = LineEnd::at_corner(&origin, &size, start, &from_style.inset, &from_style.reach);
            let to = LineEnd::at_corner(&origin, &size, end, &to_style.inset, &to_style.reach);
            let curve = line_curve(&from, &to);
            let length = curve.chord_length(pieces)?;

            let start_lift = Vector3::z() * corner_lift(start, from_style.lift);
            let end_lift = Vector3::z() * corner_lift(end, to_style.lift);
            let mid_lift = Vector3::z() * middle_lift(start, end, config.weave_height);
            let halves = lifted_halves(&curve.translated(&offset), &start_lift, &end_lift, |_| mid_lift)?;

            let tubes = half_tubes(
                halves,
                config.thickness,
                colors.corner_color(&tile, start),
                colors.corner_color(&tile, end),
            );
            rendered.push_line(tubes, length);
        }
    }

    Ok(rendered)
}
