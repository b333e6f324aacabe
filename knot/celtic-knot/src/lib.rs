//! Procedural Celtic knots rendered as swept Bézier tubes.
//!
//! A [`CelticKnot`] fills a flat or cubic grid of tiles with direction
//! markers, traces the closed loops they describe and draws every strand
//! as a pair of tubes per tile line:
//!
//! - **Generation**: [`CelticKnot::generate`] populates, symmetrifies and
//!   traces the grid from its seeds, then renders it
//! - **Rendering**: tile lines become cubic Béziers shaped by the inset,
//!   control scale and weave height, split in half so crossings pass over
//!   and under each other
//! - **Export**: [`CelticKnot::export_ply`] writes the stored tubes as a
//!   PLY mesh in any of its three encodings
//! - **Persistence**: [`CelticKnot::save_settings`] and
//!   [`CelticKnot::load_property`] move parameters through any
//!   [`SettingsSink`], with [`TomlSettings`] as a ready-made TOML store
//!
//! # Quick Start
//!
//! ```no_run
//! use celtic_knot::{CelticKnot, Dimension, PlyEncoding};
//!
//! let mut knot = CelticKnot::new(Dimension::Cubic);
//! knot.set_seed(7);
//! knot.set_colour_seed(3);
//!
//! let loops = knot.generate()?;
//! println!("{loops} loops, volume {:.3}", knot.volume());
//!
//! knot.export_ply("knot.ply", PlyEncoding::BinaryLittleEndian)?;
//! # Ok::<(), celtic_knot::KnotError>(())
//! ```
//!
//! # Reproducibility
//!
//! Grid population and loop colouring each use their own generator seeded
//! from the knot's seed and colour seed. Equal parameters always produce
//! equal knots.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

mod config;
mod error;
mod knot;
mod render2d;
mod render3d;
mod settings;
mod strand;
mod weave;

pub use config::{Dimension, KnotConfig};
pub use error::{KnotError, KnotResult};
pub use knot::CelticKnot;
pub use render2d::render_flat;
pub use render3d::render_cubic;
pub use settings::{SettingValue, SettingsSink, TomlSettings, CELTIC_SECTION, RENDER_SECTION};
pub use strand::{CornerColors, RenderedKnot};
pub use weave::{weave_centre, weave_corner, WEAVE_TABLE};

pub use knot_topology::Orientation;
pub use mesh_from_curves::GeometryHost;
pub use mesh_io::{PlyEncoding, PlyStats};
