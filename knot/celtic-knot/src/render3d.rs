//! Tile-to-curve mapping for cubic knots.
//!
//! Every cubic tile carries four lines. A straight centre joins the four
//! corner pairs along its axis; a cross joins the four main diagonals,
//! which are bent through the tile centre and pushed apart by the weave
//! table so they never intersect.

use knot_topology::{Corner, Grid3, TileDirection};
use mesh_types::{Point3, Vector3};

use crate::config::KnotConfig;
use crate::error::KnotResult;
use crate::strand::{half_tubes, lifted_halves, line_curve, CornerColors, LineEnd, RenderedKnot};
use crate::weave::{weave_centre, weave_corner};

const fn pair(start: (u8, u8, u8), end: (u8, u8, u8)) -> (Corner, Corner) {
    (
        Corner::at(start.0, start.1, start.2),
        Corner::at(end.0, end.1, end.2),
    )
}

const HORIZONTAL_LINES: [(Corner, Corner); 4] = [
    pair((0, 0, 0), (1, 0, 0)),
    pair((0, 1, 0), (1, 1, 0)),
    pair((0, 0, 1), (1, 0, 1)),
    pair((0, 1, 1), (1, 1, 1)),
];

const VERTICAL_LINES: [(Corner, Corner); 4] = [
    pair((0, 0, 0), (0, 1, 0)),
    pair((1, 0, 0), (1, 1, 0)),
    pair((0, 0, 1), (0, 1, 1)),
    pair((1, 0, 1), (1, 1, 1)),
];

const LONGITUDINAL_LINES: [(Corner, Corner); 4] = [
    pair((0, 0, 0), (0, 0, 1)),
    pair((1, 0, 0), (1, 0, 1)),
    pair((0, 1, 0), (0, 1, 1)),
    pair((1, 1, 0), (1, 1, 1)),
];

const CROSS_LINES: [(Corner, Corner); 4] = [
    pair((0, 0, 0), (1, 1, 1)),
    pair((0, 1, 0), (1, 0, 1)),
    pair((1, 0, 0), (0, 1, 1)),
    pair((1, 1, 0), (0, 0, 1)),
];

fn tile_lines(centre: TileDirection) -> Option<&'static [(Corner, Corner); 4]> {
    match centre {
        TileDirection::Horizontal => Some(&HORIZONTAL_LINES),
        TileDirection::Vertical => Some(&VERTICAL_LINES),
        TileDirection::Longitudinal => Some(&LONGITUDINAL_LINES),
        TileDirection::Cross => Some(&CROSS_LINES),
        TileDirection::Invalid => None,
    }
}

/// Anchor of a line at `corner`, shaped by the corner's marker.
fn line_end(
    direction: TileDirection,
    corner: Corner,
    origin: &Point3<f64>,
    size: &Vector3<f64>,
    config: &KnotConfig,
) -> Option<LineEnd> {
    let [inset_x, inset_y, inset_z] = config.inset;
    let reach = size * config.control_scale;
    let (inset, reach) = match direction {
        TileDirection::Horizontal => (
            Vector3::new(0.0, inset_y, inset_z),
            Vector3::new(reach.x, 0.0, 0.0),
        ),
        TileDirection::Vertical => (
            Vector3::new(inset_x, 0.0, inset_z),
            Vector3::new(0.0, reach.y, 0.0),
        ),
        TileDirection::Longitudinal => (
            Vector3::new(inset_x, inset_y, 0.0),
            Vector3::new(0.0, 0.0, reach.z),
        ),
        TileDirection::Cross => {
            let end = LineEnd::at_corner(origin, size, corner, &Vector3::zeros(), &reach);
            return Some(end.shifted(&weave_corner(corner, config.weave_height)));
        }
        TileDirection::Invalid => return None,
    };
    Some(LineEnd::at_corner(origin, size, corner, &inset, &reach))
}

/// Map every tile of a cubic grid to its tube specs.
///
/// Tiles are visited z outermost, then x, then y. Each tile fills eight
/// slots, two halves per line. Main diagonals are routed through the tile
/// centre, displaced by the weave table of their starting corner.
///
/// # Errors
///
/// Returns an error if `pieces` is zero.
#[allow(clippy::cast_precision_loss)]
pub fn render_cubic<C: CornerColors<3>>(
    grid: &Grid3,
    colors: &C,
    config: &KnotConfig,
    pieces: usize,
) -> KnotResult<RenderedKnot> {
    let [width, height, depth] = grid.extent().dims();
    let size = Vector3::from(config.tile_size);
    let offset = config.offset();
    let mut rendered = RenderedKnot::with_capacity(width * height * depth * 8);

    for z in 0..depth {
        for x in 0..width {
            for y in 0..height {
                let tile = [x, y, z];
                let origin = Point3::new(x as f64 * size.x, y as f64 * size.y, z as f64 * size.z);
                let Some(lines) = grid.centre(&tile).and_then(tile_lines) else {
                    for _ in 0..4 {
                        rendered.push_hidden_line();
                    }
                    continue;
                };

                for &(start, end) in lines {
                    let ends = grid
                        .corner(&tile, start)
                        .and_then(|d| line_end(d, start, &origin, &size, config))
                        .zip(
                            grid.corner(&tile, end)
                                .and_then(|d| line_end(d, end, &origin, &size, config)),
                        );
                    let Some((from, to)) = ends else {
                        rendered.push_hidden_line();
                        continue;
                    };

                    let curve = line_curve(&from, &to);
                    let length = curve.chord_length(pieces)?;
                    let diagonal = start.bits() ^ end.bits() == 0b111;
                    let centre = origin + size / 2.0 + offset;
                    let halves = lifted_halves(
                        &curve.translated(&offset),
                        &Vector3::zeros(),
                        &Vector3::zeros(),
                        |mid| {
                            if diagonal {
                                weave_centre(start, config.weave_height) + (centre - mid)
                            } else {
                                Vector3::zeros()
                            }
                        },
                    )?;

                    let tubes = half_tubes(
                        halves,
                        config.thickness,
                        colors.corner_color(&tile, start),
                        colors.corner_color(&tile, end),
                    );
                    rendered.push_line(tubes, length);
                }
            }
        }
    }

    Ok(rendered)
}
