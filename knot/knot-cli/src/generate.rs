//! The `generate` command.

use std::fmt::Debug;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use celtic_knot::{CelticKnot, Dimension, Orientation, PlyEncoding, TomlSettings};
use clap::{Args, ValueEnum};
use tracing::info;

/// Knot layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Flat grid of square tiles
    #[value(name = "2d")]
    Flat,
    /// Box of cubic tiles
    #[value(name = "3d")]
    Cubic,
}

/// Edges flat strands run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrientationArg {
    /// Strands bounce off the top and bottom
    Horizontal,
    /// Strands bounce off the left and right
    Vertical,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Horizontal => Self::Horizontal,
            OrientationArg::Vertical => Self::Vertical,
        }
    }
}

/// Flags of the `generate` command. Flags override loaded settings.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Flat or cubic knot
    #[arg(long, value_enum, default_value_t = Mode::Flat)]
    mode: Mode,

    /// Load parameters from a TOML settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Tiles along x
    #[arg(long)]
    width: Option<usize>,

    /// Tiles along y
    #[arg(long)]
    height: Option<usize>,

    /// Tiles along z (3d only)
    #[arg(long)]
    depth: Option<usize>,

    /// Tile edge length along x
    #[arg(long)]
    tile_x: Option<f64>,

    /// Tile edge length along y
    #[arg(long)]
    tile_y: Option<f64>,

    /// Tile edge length along z
    #[arg(long)]
    tile_z: Option<f64>,

    /// Grid population seed
    #[arg(long)]
    seed: Option<u32>,

    /// Loop colour seed (0 for plain grey)
    #[arg(long)]
    colour_seed: Option<u32>,

    /// Probability of a turning tile centre, 0 to 1
    #[arg(long)]
    weirdness: Option<f32>,

    /// Strand orientation of flat knots
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Make the grid symmetric (true or false)
    #[arg(long)]
    symmetrify: Option<bool>,

    /// Tube radius
    #[arg(long)]
    thickness: Option<f64>,

    /// Over/under displacement of crossing strands
    #[arg(long)]
    weave_height: Option<f64>,

    /// Pieces along each tube (at least 1)
    #[arg(long)]
    pieces: Option<usize>,

    /// Segments around each tube (at least 3)
    #[arg(long)]
    segments: Option<usize>,

    /// Write the knot parameters to a TOML settings file
    #[arg(long)]
    save_settings: Option<PathBuf>,

    /// Export the knot as a PLY mesh
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Write ASCII PLY instead of binary
    #[arg(long)]
    ascii: bool,

    /// Write big-endian binary PLY
    #[arg(long, conflicts_with = "ascii")]
    big_endian: bool,
}

impl GenerateArgs {
    fn encoding(&self) -> PlyEncoding {
        if self.ascii {
            PlyEncoding::Ascii
        } else if self.big_endian {
            PlyEncoding::BinaryBigEndian
        } else {
            PlyEncoding::BinaryLittleEndian
        }
    }
}

/// Build, generate and optionally export a knot.
pub fn run(args: &GenerateArgs) -> Result<()> {
    let dimension = match args.mode {
        Mode::Flat => Dimension::Flat,
        Mode::Cubic => Dimension::Cubic,
    };
    let mut knot = CelticKnot::new(dimension);

    if let Some(path) = &args.settings {
        let applied = TomlSettings::load(path, &mut knot)
            .with_context(|| format!("failed to load settings from {}", path.display()))?;
        info!(path = %path.display(), applied, "loaded settings");
    }
    apply_flags(&mut knot, args)?;

    let loops = knot.generate().context("failed to generate knot")?;

    println!("loops:  {loops}");
    println!("tubes:  {} of {}", knot.tube_count(), knot.slot_count());
    println!("length: {:.4}", knot.length());
    println!("volume: {:.4}", knot.volume());

    if let Some(path) = &args.save_settings {
        let mut settings = TomlSettings::new();
        knot.save_settings(&mut settings);
        settings
            .save(path)
            .with_context(|| format!("failed to save settings to {}", path.display()))?;
        info!(path = %path.display(), "saved settings");
    }

    if let Some(path) = &args.output {
        let stats = knot
            .export_ply(path, args.encoding())
            .with_context(|| format!("failed to export {}", path.display()))?;
        println!(
            "wrote {} ({} vertices, {} faces)",
            path.display(),
            stats.vertices,
            stats.faces
        );
    }

    Ok(())
}

fn apply_flags(knot: &mut CelticKnot, args: &GenerateArgs) -> Result<()> {
    set(knot, "width", args.width, CelticKnot::set_width, CelticKnot::width)?;
    set(knot, "height", args.height, CelticKnot::set_height, CelticKnot::height)?;
    if args.mode == Mode::Cubic {
        set(knot, "depth", args.depth, CelticKnot::set_depth, CelticKnot::depth)?;
    } else {
        ensure!(args.depth.is_none(), "--depth needs --mode 3d");
    }
    set(knot, "tile-x", args.tile_x, CelticKnot::set_tile_size_x, CelticKnot::tile_size_x)?;
    set(knot, "tile-y", args.tile_y, CelticKnot::set_tile_size_y, CelticKnot::tile_size_y)?;
    set(knot, "tile-z", args.tile_z, CelticKnot::set_tile_size_z, CelticKnot::tile_size_z)?;
    set(knot, "seed", args.seed, CelticKnot::set_seed, CelticKnot::seed)?;
    set(
        knot,
        "colour-seed",
        args.colour_seed,
        CelticKnot::set_colour_seed,
        CelticKnot::colour_seed,
    )?;
    set(knot, "weirdness", args.weirdness, CelticKnot::set_weirdness, CelticKnot::weirdness)?;
    set(
        knot,
        "orientation",
        args.orientation.map(Orientation::from),
        CelticKnot::set_orientation,
        CelticKnot::orientation,
    )?;
    set(
        knot,
        "symmetrify",
        args.symmetrify,
        CelticKnot::set_symmetrify,
        CelticKnot::symmetrify,
    )?;
    set(knot, "thickness", args.thickness, CelticKnot::set_thickness, CelticKnot::thickness)?;
    set(
        knot,
        "weave-height",
        args.weave_height,
        CelticKnot::set_weave_height,
        CelticKnot::weave_height,
    )?;
    set(
        knot,
        "pieces",
        args.pieces,
        CelticKnot::set_accuracy_longitudinal,
        CelticKnot::accuracy_longitudinal,
    )?;
    set(
        knot,
        "segments",
        args.segments,
        CelticKnot::set_accuracy_radial,
        CelticKnot::accuracy_radial,
    )?;
    Ok(())
}

/// Apply `value` through `setter` and fail if the knot did not take it.
fn set<T: Copy + PartialEq + Debug>(
    knot: &mut CelticKnot,
    flag: &str,
    value: Option<T>,
    setter: fn(&mut CelticKnot, T) -> bool,
    getter: fn(&CelticKnot) -> T,
) -> Result<()> {
    if let Some(value) = value {
        setter(knot, value);
        ensure!(getter(knot) == value, "invalid --{flag}: {value:?}");
    }
    Ok(())
}
