//! Knot generation and rendering parameters.

use knot_topology::{Extent, Grid2, Grid3, Orientation};
use mesh_from_curves::{CurveResult, TubeResolution};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Whether the knot lies in a plane or fills a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    /// A flat grid of square tiles, woven above and below the plane.
    #[default]
    Flat,
    /// A box of cubic tiles.
    Cubic,
}

impl Dimension {
    /// Tube slots each tile owns: two halves per drawn line.
    #[must_use]
    pub const fn curves_per_tile(self) -> usize {
        match self {
            Self::Flat => 4,
            Self::Cubic => 8,
        }
    }

    /// Fewest tiles per axis a grid of this dimension accepts.
    #[must_use]
    pub const fn min_extent(self) -> usize {
        match self {
            Self::Flat => Grid2::MIN_EXTENT,
            Self::Cubic => Grid3::MIN_EXTENT,
        }
    }
}

/// Every persistent parameter of a knot.
///
/// Missing fields deserialize to their defaults, so partial documents
/// are accepted.
///
/// # Examples
///
/// ```
/// use celtic_knot::{Dimension, KnotConfig};
///
/// let config = KnotConfig::flat()
///     .with_size(4, 4)
///     .with_seed(42)
///     .with_thickness(0.2);
/// assert_eq!(config.dimension, Dimension::Flat);
/// assert_eq!(config.offset().x, -6.0);
///
/// let cubic = KnotConfig::cubic();
/// assert_eq!(cubic.weirdness, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnotConfig {
    /// Flat or cubic layout.
    pub dimension: Dimension,

    /// Seed for populating the grid.
    pub seed: u32,

    /// Seed for loop colours. Zero colours every loop grey.
    pub colour_seed: u32,

    /// Tiles along x.
    pub width: usize,

    /// Tiles along y.
    pub height: usize,

    /// Tiles along z. Always 1 for flat knots.
    pub depth: usize,

    /// Tile edge lengths along x, y and z.
    pub tile_size: [f64; 3],

    /// Probability that an interior tile centre turns instead of crossing.
    pub weirdness: f32,

    /// Which grid edges flat strands run along.
    pub orientation: Orientation,

    /// Whether to make the grid symmetric before tracing.
    pub symmetrify: bool,

    /// Tube radius.
    pub thickness: f64,

    /// Distance of straight strands from the tile edge, per axis.
    pub inset: [f64; 3],

    /// Displacement of crossing strands over and under each other.
    pub weave_height: f64,

    /// Handle length as a fraction of the tile size.
    pub control_scale: f64,

    /// Pieces sampled along each tube.
    pub accuracy_longitudinal: usize,

    /// Segments sampled around each tube.
    pub accuracy_radial: usize,
}

impl Default for KnotConfig {
    fn default() -> Self {
        Self {
            dimension: Dimension::Flat,
            seed: 0,
            colour_seed: 0,
            width: 5,
            height: 6,
            depth: 1,
            tile_size: [3.0, 3.0, 0.0],
            weirdness: 0.2,
            orientation: Orientation::Horizontal,
            symmetrify: true,
            thickness: 0.15,
            inset: [0.5; 3],
            weave_height: 0.3,
            control_scale: 0.4,
            accuracy_longitudinal: TubeResolution::DEFAULT_PIECES,
            accuracy_radial: TubeResolution::DEFAULT_SEGMENTS,
        }
    }
}

impl KnotConfig {
    /// Defaults for a flat knot.
    #[must_use]
    pub fn flat() -> Self {
        Self::default()
    }

    /// Defaults for a cubic knot.
    #[must_use]
    pub fn cubic() -> Self {
        Self {
            dimension: Dimension::Cubic,
            width: 3,
            height: 4,
            depth: 3,
            tile_size: [3.0; 3],
            weirdness: 0.0,
            ..Self::default()
        }
    }

    /// Set the population seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the colour seed.
    #[must_use]
    pub fn with_colour_seed(mut self, colour_seed: u32) -> Self {
        self.colour_seed = colour_seed;
        self
    }

    /// Set the tile counts along x and y.
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the tile count along z. Ignored by flat knots.
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    /// Set the tile edge lengths.
    #[must_use]
    pub fn with_tile_size(mut self, tile_size: [f64; 3]) -> Self {
        self.tile_size = tile_size;
        self
    }

    /// Set the weirdness.
    #[must_use]
    pub fn with_weirdness(mut self, weirdness: f32) -> Self {
        self.weirdness = weirdness;
        self
    }

    /// Set the flat strand orientation.
    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Enable or disable symmetrifying.
    #[must_use]
    pub fn with_symmetrify(mut self, symmetrify: bool) -> Self {
        self.symmetrify = symmetrify;
        self
    }

    /// Set the tube radius.
    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Set the per-axis strand inset.
    #[must_use]
    pub fn with_inset(mut self, inset: [f64; 3]) -> Self {
        self.inset = inset;
        self
    }

    /// Set the weave height.
    #[must_use]
    pub fn with_weave_height(mut self, weave_height: f64) -> Self {
        self.weave_height = weave_height;
        self
    }

    /// Set the handle length fraction.
    #[must_use]
    pub fn with_control_scale(mut self, control_scale: f64) -> Self {
        self.control_scale = control_scale;
        self
    }

    /// Set the tube sampling resolution.
    #[must_use]
    pub fn with_accuracy(mut self, longitudinal: usize, radial: usize) -> Self {
        self.accuracy_longitudinal = longitudinal;
        self.accuracy_radial = radial;
        self
    }

    /// Tube resolution from the two accuracies.
    ///
    /// # Errors
    ///
    /// Returns an error if either accuracy is below its minimum.
    pub fn resolution(&self) -> CurveResult<TubeResolution> {
        TubeResolution::new(self.accuracy_longitudinal, self.accuracy_radial)
    }

    /// Translation that centres the knot on the origin.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn offset(&self) -> Vector3<f64> {
        let z = match self.dimension {
            Dimension::Flat => 0.0,
            Dimension::Cubic => -(self.depth as f64) * self.tile_size[2] / 2.0,
        };
        Vector3::new(
            -(self.width as f64) * self.tile_size[0] / 2.0,
            -(self.height as f64) * self.tile_size[1] / 2.0,
            z,
        )
    }

    /// Tile counts of a flat grid.
    #[must_use]
    pub fn flat_extent(&self) -> Extent<2> {
        Extent::new([self.width, self.height])
    }

    /// Tile counts of a cubic grid.
    #[must_use]
    pub fn cubic_extent(&self) -> Extent<3> {
        Extent::new([self.width, self.height, self.depth])
    }

    /// Number of tiles in the grid.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        match self.dimension {
            Dimension::Flat => self.width * self.height,
            Dimension::Cubic => self.width * self.height * self.depth,
        }
    }

    /// Number of tube slots the knot owns.
    #[must_use]
    pub fn tube_slots(&self) -> usize {
        self.tile_count() * self.dimension.curves_per_tile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_layouts() {
        let flat = KnotConfig::flat();
        assert_eq!(flat.weirdness, 0.2);
        assert!(flat.symmetrify);
        assert_eq!(flat.depth, 1);
        assert_eq!(flat.tube_slots(), 5 * 6 * 4);

        let cubic = KnotConfig::cubic();
        assert_eq!(cubic.dimension, Dimension::Cubic);
        assert_eq!(cubic.tube_slots(), 3 * 4 * 3 * 8);
    }

    #[test]
    fn offset_centres_the_grid() {
        let config = KnotConfig::cubic().with_size(4, 2).with_depth(6);
        let offset = config.offset();
        assert_eq!(offset, Vector3::new(-6.0, -3.0, -9.0));

        let flat = KnotConfig::flat().with_depth(6);
        assert_eq!(flat.offset().z, 0.0);
    }

    #[test]
    fn resolution_rejects_thin_tubes() {
        let config = KnotConfig::flat().with_accuracy(10, 2);
        assert!(config.resolution().is_err());
        let config = KnotConfig::flat().with_accuracy(10, 24);
        let resolution = config.resolution().expect("resolution");
        assert_eq!(resolution.pieces(), 10);
        assert_eq!(resolution.segments(), 24);
    }

    #[test]
    fn partial_documents_keep_defaults() {
        let config: KnotConfig = toml::from_str("seed = 9\nwidth = 7\n").expect("parse");
        assert_eq!(config.seed, 9);
        assert_eq!(config.width, 7);
        assert_eq!(config.height, 6);
        assert_eq!(config.orientation, Orientation::Horizontal);
    }
}
