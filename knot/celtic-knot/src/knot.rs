//! The knot itself: topology, tubes and every tunable parameter.

use std::f64::consts::PI;
use std::fmt;
use std::path::Path;

use knot_topology::{color_loops, Grid2, Grid3, LoopColoring, LoopPalette, Orientation};
use mesh_from_curves::{GeometryHost, TubeResolution, TubeSet};
use mesh_io::{save_tube_ply, PlyEncoding, PlyStats};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info, warn};

use crate::config::{Dimension, KnotConfig};
use crate::error::{KnotError, KnotResult};
use crate::render2d::render_flat;
use crate::render3d::render_cubic;
use crate::strand::RenderedKnot;

/// A traced grid of either dimension.
#[derive(Debug, Clone)]
enum Topology {
    Flat {
        grid: Grid2,
        coloring: LoopColoring<2>,
    },
    Cubic {
        grid: Grid3,
        coloring: LoopColoring<3>,
    },
}

impl Topology {
    fn loop_count(&self) -> usize {
        match self {
            Self::Flat { coloring, .. } => coloring.loop_count(),
            Self::Cubic { coloring, .. } => coloring.loop_count(),
        }
    }
}

/// A procedurally generated Celtic knot.
///
/// Parameters are changed through setters, each returning whether the
/// value changed. Changing a parameter that shapes the grid discards the
/// current topology; [`generate`](Self::generate) rebuilds it. Changing a
/// rendering parameter re-renders a generated knot straight away.
///
/// # Examples
///
/// ```
/// use celtic_knot::{CelticKnot, Dimension};
///
/// let mut knot = CelticKnot::new(Dimension::Flat);
/// knot.set_width(4);
/// knot.set_height(4);
/// knot.set_seed(3);
///
/// let loops = knot.generate()?;
/// assert!(loops >= 1);
/// assert!(knot.length() > 0.0);
/// assert_eq!(knot.slot_count(), 4 * 4 * 4);
/// # Ok::<(), celtic_knot::KnotError>(())
/// ```
pub struct CelticKnot {
    config: KnotConfig,
    topology: Option<Topology>,
    tubes: TubeSet,
    length: f64,
    host: Option<Box<dyn GeometryHost>>,
}

impl fmt::Debug for CelticKnot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CelticKnot")
            .field("config", &self.config)
            .field("loops", &self.loops())
            .field("length", &self.length)
            .field("slots", &self.tubes.len())
            .field("host", &self.host.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for CelticKnot {
    fn default() -> Self {
        Self::new(Dimension::Flat)
    }
}

impl CelticKnot {
    /// A knot with the default parameters of `dimension`.
    #[must_use]
    pub fn new(dimension: Dimension) -> Self {
        let config = match dimension {
            Dimension::Flat => KnotConfig::flat(),
            Dimension::Cubic => KnotConfig::cubic(),
        };
        Self {
            config,
            topology: None,
            tubes: TubeSet::new(TubeResolution::default()),
            length: 0.0,
            host: None,
        }
    }

    /// A knot using a copy of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if either accuracy is below its minimum.
    pub fn with_config(config: KnotConfig) -> KnotResult<Self> {
        let resolution = config.resolution()?;
        Ok(Self {
            config,
            topology: None,
            tubes: TubeSet::new(resolution),
            length: 0.0,
            host: None,
        })
    }

    /// Current parameters.
    #[must_use]
    pub fn config(&self) -> &KnotConfig {
        &self.config
    }

    /// Attach a receiver for tube geometry. It is sent every slot after
    /// each render and the index buffer whenever the accuracy changes.
    pub fn attach_host(&mut self, host: Box<dyn GeometryHost>) {
        self.host = Some(host);
    }

    /// Detach and return the geometry receiver.
    pub fn detach_host(&mut self) -> Option<Box<dyn GeometryHost>> {
        self.host.take()
    }

    /// Populate, symmetrify and trace a new grid, then render it.
    ///
    /// The grid is drawn from the seed and the loop colours from the colour
    /// seed, each with a freshly seeded generator, so equal parameters
    /// always give equal knots. Returns the loop count.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is smaller than its dimension allows,
    /// if its strands do not close into loops, or if a tube cannot be
    /// swept.
    pub fn generate(&mut self) -> KnotResult<usize> {
        self.topology = None;
        self.length = 0.0;

        let config = &self.config;
        let mut rng = StdRng::seed_from_u64(u64::from(config.seed));
        let mut palette = LoopPalette::new(config.colour_seed);

        let topology = match config.dimension {
            Dimension::Flat => {
                let mut grid = Grid2::populate(
                    config.flat_extent(),
                    config.orientation,
                    config.weirdness,
                    &mut rng,
                )?;
                if config.symmetrify {
                    grid.symmetrify();
                }
                let coloring = color_loops(&grid, &mut palette)?;
                Topology::Flat { grid, coloring }
            }
            Dimension::Cubic => {
                let mut grid = Grid3::populate(config.cubic_extent(), config.weirdness, &mut rng)?;
                if config.symmetrify {
                    grid.symmetrify();
                }
                let coloring = color_loops(&grid, &mut palette)?;
                Topology::Cubic { grid, coloring }
            }
        };

        let loops = topology.loop_count();
        self.topology = Some(topology);
        self.render()?;

        info!(
            dimension = ?self.config.dimension,
            width = self.config.width,
            height = self.config.height,
            depth = self.config.depth,
            seed = self.config.seed,
            loops,
            length = self.length,
            "generated celtic knot"
        );
        Ok(loops)
    }

    /// Rebuild every tube from the current grid and rendering parameters.
    ///
    /// Clears the store list and records every drawn tube in it.
    ///
    /// # Errors
    ///
    /// Returns [`KnotError::NotGenerated`] before the first
    /// [`generate`](Self::generate), or an error if a tube cannot be
    /// swept.
    pub fn render(&mut self) -> KnotResult<()> {
        self.render_at(self.tubes.resolution())
    }

    /// Render at `resolution`. The tubes are left untouched on failure.
    fn render_at(&mut self, resolution: TubeResolution) -> KnotResult<()> {
        let rendered = self.rendered(resolution.pieces())?;

        self.tubes.set_storing(true);
        self.tubes.replace(resolution, &rendered.slots)?;
        self.length = rendered.length;

        debug!(
            slots = self.tubes.len(),
            visible = rendered.visible(),
            length = self.length,
            "rendered knot tubes"
        );
        if let Some(host) = self.host.as_deref_mut() {
            self.tubes.upload(host);
        }
        Ok(())
    }

    fn rendered(&self, pieces: usize) -> KnotResult<RenderedKnot> {
        match &self.topology {
            Some(Topology::Flat { grid, coloring }) => render_flat(grid, coloring, &self.config, pieces),
            Some(Topology::Cubic { grid, coloring }) => render_cubic(grid, coloring, &self.config, pieces),
            None => Err(KnotError::NotGenerated),
        }
    }

    /// Write every stored tube to a PLY file, re-sampled at the current
    /// accuracy.
    ///
    /// # Errors
    ///
    /// Returns [`KnotError::NotGenerated`] before the first
    /// [`generate`](Self::generate), or an error if sweeping or writing
    /// fails.
    pub fn export_ply<P: AsRef<Path>>(&self, path: P, encoding: PlyEncoding) -> KnotResult<PlyStats> {
        if self.topology.is_none() {
            return Err(KnotError::NotGenerated);
        }
        let meshes = self.tubes.sample_stored(self.tubes.resolution())?;
        Ok(save_tube_ply(path, &meshes, encoding)?)
    }

    /// Write every stored tube to a PLY file, reporting success.
    ///
    /// Failures are logged.
    pub fn export_model<P: AsRef<Path>>(&self, path: P, encoding: PlyEncoding) -> bool {
        let path = path.as_ref();
        match self.export_ply(path, encoding) {
            Ok(stats) => {
                info!(
                    path = %path.display(),
                    vertices = stats.vertices,
                    faces = stats.faces,
                    encoding = encoding.keyword(),
                    "exported knot model"
                );
                true
            }
            Err(err) => {
                error!(path = %path.display(), %err, "failed to export knot model");
                false
            }
        }
    }

    /// Push the index buffer and every slot to `host`.
    pub fn upload<H: GeometryHost + ?Sized>(&self, host: &mut H) {
        self.tubes.upload(host);
    }

    /// Tube slots of the last render.
    #[must_use]
    pub fn tubes(&self) -> &TubeSet {
        &self.tubes
    }

    /// Traced flat grid, if one has been generated.
    #[must_use]
    pub fn flat_grid(&self) -> Option<&Grid2> {
        match &self.topology {
            Some(Topology::Flat { grid, .. }) => Some(grid),
            _ => None,
        }
    }

    /// Traced cubic grid, if one has been generated.
    #[must_use]
    pub fn cubic_grid(&self) -> Option<&Grid3> {
        match &self.topology {
            Some(Topology::Cubic { grid, .. }) => Some(grid),
            _ => None,
        }
    }

    /// Whether a grid has been generated for the current parameters.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.topology.is_some()
    }

    /// Number of closed loops, zero before generation.
    #[must_use]
    pub fn loops(&self) -> usize {
        self.topology.as_ref().map_or(0, Topology::loop_count)
    }

    /// Summed length of every drawn strand.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Volume of the strands treated as cylinders.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.length * PI * self.config.thickness * self.config.thickness
    }

    /// Number of tube slots, drawn or not.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.tubes.len()
    }

    /// Number of drawn tubes.
    #[must_use]
    pub fn tube_count(&self) -> usize {
        self.tubes.visible().count()
    }

    /// Flat or cubic.
    #[must_use]
    pub fn dimension(&self) -> Dimension {
        self.config.dimension
    }

    /// Population seed.
    #[must_use]
    pub fn seed(&self) -> u32 {
        self.config.seed
    }

    /// Loop colour seed.
    #[must_use]
    pub fn colour_seed(&self) -> u32 {
        self.config.colour_seed
    }

    /// Tiles along x.
    #[must_use]
    pub fn width(&self) -> usize {
        self.config.width
    }

    /// Tiles along y.
    #[must_use]
    pub fn height(&self) -> usize {
        self.config.height
    }

    /// Tiles along z.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.config.depth
    }

    /// Tile edge length along x.
    #[must_use]
    pub fn tile_size_x(&self) -> f64 {
        self.config.tile_size[0]
    }

    /// Tile edge length along y.
    #[must_use]
    pub fn tile_size_y(&self) -> f64 {
        self.config.tile_size[1]
    }

    /// Tile edge length along z.
    #[must_use]
    pub fn tile_size_z(&self) -> f64 {
        self.config.tile_size[2]
    }

    /// Probability of a turning tile centre.
    #[must_use]
    pub fn weirdness(&self) -> f32 {
        self.config.weirdness
    }

    /// Flat strand orientation.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    /// Whether the grid is made symmetric.
    #[must_use]
    pub fn symmetrify(&self) -> bool {
        self.config.symmetrify
    }

    /// Tube radius.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.config.thickness
    }

    /// Strand inset along x.
    #[must_use]
    pub fn inset_x(&self) -> f64 {
        self.config.inset[0]
    }

    /// Strand inset along y.
    #[must_use]
    pub fn inset_y(&self) -> f64 {
        self.config.inset[1]
    }

    /// Strand inset along z.
    #[must_use]
    pub fn inset_z(&self) -> f64 {
        self.config.inset[2]
    }

    /// Over/under displacement of crossing strands.
    #[must_use]
    pub fn weave_height(&self) -> f64 {
        self.config.weave_height
    }

    /// Handle length as a fraction of the tile size.
    #[must_use]
    pub fn control_scale(&self) -> f64 {
        self.config.control_scale
    }

    /// Pieces along each tube.
    #[must_use]
    pub fn accuracy_longitudinal(&self) -> usize {
        self.config.accuracy_longitudinal
    }

    /// Segments around each tube.
    #[must_use]
    pub fn accuracy_radial(&self) -> usize {
        self.config.accuracy_radial
    }

    /// Set the population seed.
    pub fn set_seed(&mut self, seed: u32) -> bool {
        let changed = assign(&mut self.config.seed, seed);
        self.invalidate(changed)
    }

    /// Set the loop colour seed. Zero colours every loop grey.
    pub fn set_colour_seed(&mut self, colour_seed: u32) -> bool {
        let changed = assign(&mut self.config.colour_seed, colour_seed);
        self.invalidate(changed)
    }

    /// Set the tile count along x. Values below the minimum grid size are
    /// rejected.
    pub fn set_width(&mut self, width: usize) -> bool {
        if !self.accepts_extent("width", width) {
            return false;
        }
        let changed = assign(&mut self.config.width, width);
        self.invalidate(changed)
    }

    /// Set the tile count along y. Values below the minimum grid size are
    /// rejected.
    pub fn set_height(&mut self, height: usize) -> bool {
        if !self.accepts_extent("height", height) {
            return false;
        }
        let changed = assign(&mut self.config.height, height);
        self.invalidate(changed)
    }

    /// Set the tile count along z. Flat knots always have depth 1.
    pub fn set_depth(&mut self, depth: usize) -> bool {
        if self.config.dimension == Dimension::Flat {
            warn!(depth, "flat knots have no depth");
            return false;
        }
        if !self.accepts_extent("depth", depth) {
            return false;
        }
        let changed = assign(&mut self.config.depth, depth);
        self.invalidate(changed)
    }

    /// Set the probability of a turning tile centre, between 0 and 1.
    pub fn set_weirdness(&mut self, weirdness: f32) -> bool {
        if !(0.0..=1.0).contains(&weirdness) {
            warn!(weirdness, "rejected weirdness outside 0..=1");
            return false;
        }
        let changed = assign(&mut self.config.weirdness, weirdness);
        self.invalidate(changed)
    }

    /// Set the flat strand orientation.
    pub fn set_orientation(&mut self, orientation: Orientation) -> bool {
        let changed = assign(&mut self.config.orientation, orientation);
        self.invalidate(changed)
    }

    /// Enable or disable symmetrifying.
    pub fn set_symmetrify(&mut self, symmetrify: bool) -> bool {
        let changed = assign(&mut self.config.symmetrify, symmetrify);
        self.invalidate(changed)
    }

    /// Set the tile edge length along x.
    pub fn set_tile_size_x(&mut self, size: f64) -> bool {
        self.set_tile_size(0, size)
    }

    /// Set the tile edge length along y.
    pub fn set_tile_size_y(&mut self, size: f64) -> bool {
        self.set_tile_size(1, size)
    }

    /// Set the tile edge length along z.
    pub fn set_tile_size_z(&mut self, size: f64) -> bool {
        self.set_tile_size(2, size)
    }

    fn set_tile_size(&mut self, axis: usize, size: f64) -> bool {
        if !(size.is_finite() && size >= 0.0) {
            warn!(axis, size, "rejected tile size");
            return false;
        }
        let changed = assign(&mut self.config.tile_size[axis], size);
        self.refresh(changed)
    }

    /// Set the tube radius. Must be positive.
    pub fn set_thickness(&mut self, thickness: f64) -> bool {
        if !(thickness.is_finite() && thickness > 0.0) {
            warn!(thickness, "rejected thickness");
            return false;
        }
        let changed = assign(&mut self.config.thickness, thickness);
        self.refresh(changed)
    }

    /// Set the strand inset along x.
    pub fn set_inset_x(&mut self, inset: f64) -> bool {
        self.set_inset(0, inset)
    }

    /// Set the strand inset along y.
    pub fn set_inset_y(&mut self, inset: f64) -> bool {
        self.set_inset(1, inset)
    }

    /// Set the strand inset along z.
    pub fn set_inset_z(&mut self, inset: f64) -> bool {
        self.set_inset(2, inset)
    }

    fn set_inset(&mut self, axis: usize, inset: f64) -> bool {
        if !inset.is_finite() {
            warn!(axis, inset, "rejected inset");
            return false;
        }
        let changed = assign(&mut self.config.inset[axis], inset);
        self.refresh(changed)
    }

    /// Set the over/under displacement of crossing strands.
    pub fn set_weave_height(&mut self, weave_height: f64) -> bool {
        if !weave_height.is_finite() {
            warn!(weave_height, "rejected weave height");
            return false;
        }
        let changed = assign(&mut self.config.weave_height, weave_height);
        self.refresh(changed)
    }

    /// Set the handle length fraction.
    pub fn set_control_scale(&mut self, control_scale: f64) -> bool {
        if !control_scale.is_finite() {
            warn!(control_scale, "rejected control scale");
            return false;
        }
        let changed = assign(&mut self.config.control_scale, control_scale);
        self.refresh(changed)
    }

    /// Set the pieces along each tube, at least 1.
    ///
    /// Every tube is re-sampled and an attached host receives the new
    /// index buffer.
    pub fn set_accuracy_longitudinal(&mut self, pieces: usize) -> bool {
        match TubeResolution::new(pieces, self.config.accuracy_radial) {
            Ok(resolution) => self.apply_resolution(resolution),
            Err(err) => {
                warn!(pieces, %err, "rejected longitudinal accuracy");
                false
            }
        }
    }

    /// Set the segments around each tube, at least 3.
    ///
    /// Every tube is re-sampled and an attached host receives the new
    /// index buffer.
    pub fn set_accuracy_radial(&mut self, segments: usize) -> bool {
        match TubeResolution::new(self.config.accuracy_longitudinal, segments) {
            Ok(resolution) => self.apply_resolution(resolution),
            Err(err) => {
                warn!(segments, %err, "rejected radial accuracy");
                false
            }
        }
    }

    fn apply_resolution(&mut self, resolution: TubeResolution) -> bool {
        if resolution == self.tubes.resolution() {
            return false;
        }

        // Length is measured with one chord per piece
        let result = if self.topology.is_some() {
            self.render_at(resolution)
        } else {
            self.tubes.set_resolution(resolution).map(drop).map_err(KnotError::from)
        };
        if let Err(err) = result {
            error!(%err, "failed to re-sample tubes");
            return false;
        }

        self.config.accuracy_longitudinal = resolution.pieces();
        self.config.accuracy_radial = resolution.segments();
        if self.topology.is_none() {
            if let Some(host) = self.host.as_deref_mut() {
                host.upload_indices(self.tubes.indices());
            }
        }
        true
    }

    /// Re-render a generated knot after a rendering parameter changed.
    fn refresh(&mut self, changed: bool) -> bool {
        if changed && self.topology.is_some() {
            if let Err(err) = self.render() {
                error!(%err, "failed to re-render knot");
            }
        }
        changed
    }

    fn accepts_extent(&self, axis: &str, tiles: usize) -> bool {
        let min = self.config.dimension.min_extent();
        if tiles < min {
            warn!(axis, tiles, min, "rejected grid size below minimum");
            return false;
        }
        true
    }

    fn invalidate(&mut self, changed: bool) -> bool {
        if changed {
            self.topology = None;
        }
        changed
    }
}

fn assign<T: PartialEq>(field: &mut T, value: T) -> bool {
    let changed = *field != value;
    *field = value;
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_from_curves::StripIndices;
    use mesh_types::TubeMesh;
    use std::sync::{Arc, Mutex};

    fn small_flat() -> CelticKnot {
        let config = KnotConfig::flat().with_size(3, 3).with_seed(42).with_accuracy(6, 5);
        CelticKnot::with_config(config).expect("config")
    }

    #[derive(Default)]
    struct Counts {
        indices: usize,
        vertices: usize,
    }

    struct SharedHost(Arc<Mutex<Counts>>);

    impl GeometryHost for SharedHost {
        fn upload_vertices(&mut self, _slot: usize, _mesh: Option<&TubeMesh>) {
            self.0.lock().expect("lock").vertices += 1;
        }

        fn upload_indices(&mut self, _indices: &StripIndices) {
            self.0.lock().expect("lock").indices += 1;
        }
    }

    #[test]
    fn generate_fills_every_slot() {
        let mut knot = small_flat();
        let loops = knot.generate().expect("generate");
        assert!(loops >= 1);
        assert_eq!(knot.loops(), loops);
        assert_eq!(knot.slot_count(), 3 * 3 * 4);
        assert_eq!(knot.tubes().stored().len(), knot.tube_count());
        assert!(knot.tube_count() > 0);
    }

    #[test]
    fn same_parameters_same_knot() {
        let mut a = small_flat();
        let mut b = small_flat();
        a.generate().expect("generate");
        b.generate().expect("generate");
        assert_eq!(a.flat_grid(), b.flat_grid());
        assert_eq!(a.length(), b.length());
    }

    #[test]
    fn volume_follows_length_and_thickness() {
        let mut knot = small_flat();
        knot.generate().expect("generate");
        let expected = knot.length() * PI * 0.15 * 0.15;
        assert!((knot.volume() - expected).abs() < 1e-12);
    }

    #[test]
    fn render_needs_a_grid() {
        let mut knot = small_flat();
        assert!(matches!(knot.render(), Err(KnotError::NotGenerated)));
        assert!(!knot.export_model("unused.ply", PlyEncoding::Ascii));
    }

    #[test]
    fn setters_report_changes() {
        let mut knot = CelticKnot::new(Dimension::Flat);
        assert!(knot.set_thickness(0.2));
        assert!(!knot.set_thickness(0.2));
        assert!(!knot.set_thickness(0.0));
        assert_eq!(knot.thickness(), 0.2);

        assert!(!knot.set_width(1));
        assert_eq!(knot.width(), 5);
        assert!(!knot.set_depth(4));
        assert!(!knot.set_weirdness(1.5));
    }

    #[test]
    fn grid_parameters_discard_topology() {
        let mut knot = small_flat();
        knot.generate().expect("generate");
        assert!(knot.is_generated());

        knot.set_thickness(0.3);
        assert!(knot.is_generated());
        knot.set_width(4);
        assert!(!knot.is_generated());
        assert_eq!(knot.loops(), 0);
    }

    #[test]
    fn render_parameters_rebuild_the_tubes() {
        let mut knot = small_flat();
        knot.generate().expect("generate");
        let length = knot.length();

        assert!(knot.set_thickness(0.5));
        assert!(knot.tubes().stored().iter().all(|spec| spec.radius == 0.5));
        assert!(knot.tubes().visible().all(|slot| slot.spec.radius == 0.5));
        let expected = knot.length() * PI * 0.5 * 0.5;
        assert!((knot.volume() - expected).abs() < 1e-12);

        assert!(knot.set_tile_size_x(4.0));
        assert!(knot.length() > length);
        assert!(knot.is_generated());
    }

    #[test]
    fn accuracy_is_kept_in_step_with_the_tubes() {
        let mut knot = small_flat();
        assert!(knot.set_accuracy_radial(7));
        assert_eq!(knot.tubes().resolution().segments(), 7);

        knot.generate().expect("generate");
        assert!(knot.set_accuracy_longitudinal(3));
        assert_eq!(knot.tubes().resolution().pieces(), 3);
        assert_eq!(knot.config().resolution().expect("resolution"), knot.tubes().resolution());
        assert!(!knot.set_accuracy_longitudinal(3));
    }

    #[test]
    fn radial_accuracy_below_three_is_rejected() {
        let mut knot = small_flat();
        assert!(!knot.set_accuracy_radial(2));
        assert_eq!(knot.accuracy_radial(), 5);
        assert!(!knot.set_accuracy_longitudinal(0));
        assert_eq!(knot.accuracy_longitudinal(), 6);
    }

    #[test]
    fn accuracy_change_resamples_and_notifies() {
        let counts = Arc::new(Mutex::new(Counts::default()));
        let mut knot = small_flat();
        knot.attach_host(Box::new(SharedHost(Arc::clone(&counts))));
        knot.generate().expect("generate");
        let before = knot.length();

        assert!(knot.set_accuracy_longitudinal(12));
        assert_eq!(knot.tubes().resolution().pieces(), 12);
        let mesh = &knot.tubes().visible().next().expect("visible").mesh;
        assert_eq!(mesh.vertex_count(), 13 * 5);
        assert!(knot.length() >= before - 1e-9);

        let counts = counts.lock().expect("lock");
        assert_eq!(counts.indices, 2);
        assert_eq!(counts.vertices, 2 * 3 * 3 * 4);
    }

    #[test]
    fn cubic_knots_own_eight_slots_per_tile() {
        let mut knot = CelticKnot::new(Dimension::Cubic);
        knot.set_accuracy_longitudinal(4);
        knot.set_accuracy_radial(3);
        knot.generate().expect("generate");
        assert_eq!(knot.slot_count(), 3 * 4 * 3 * 8);
        assert!(knot.cubic_grid().is_some());
        assert!(knot.flat_grid().is_none());
    }
}
