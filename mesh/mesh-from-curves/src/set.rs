//! A fixed set of tube slots sharing one resolution.
//!
//! Slots are addressed by index. A slot is either hidden or holds the curve
//! and styling it was swept from together with the sampled mesh. The curves
//! of coloured tubes can optionally be stored so the whole set can be
//! re-sampled later, e.g. for export at a different resolution.

use curve_types::CubicBezier;
use mesh_types::TubeMesh;
use tracing::debug;

use crate::error::{CurveError, CurveResult};
use crate::indices::StripIndices;
use crate::tube::{sweep_bezier, ColorRamp, TubeConfig, TubeResolution};

/// Everything needed to sweep one tube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeSpec {
    /// Centre curve.
    pub curve: CubicBezier,
    /// Tube radius.
    pub radius: f64,
    /// End colours.
    pub colors: ColorRamp,
}

impl TubeSpec {
    /// Sweep this tube at `resolution`.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is not positive and finite.
    pub fn sweep(&self, resolution: TubeResolution) -> CurveResult<TubeMesh> {
        let config = TubeConfig::default()
            .with_radius(self.radius)
            .with_resolution(resolution);
        sweep_bezier(&self.curve, &config, &self.colors)
    }
}

/// A visible tube: its spec and sampled mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeSlot {
    /// Spec the mesh was swept from.
    pub spec: TubeSpec,
    /// Sampled mesh at the set's resolution.
    pub mesh: TubeMesh,
}

/// Receiver for tube geometry, typically a GPU buffer owner.
///
/// The set pushes the shared strip indices whenever the resolution changes
/// and each slot's vertices (or `None` for a hidden slot) on upload.
pub trait GeometryHost {
    /// Replace the vertices of `slot`. `None` hides it.
    fn upload_vertices(&mut self, slot: usize, mesh: Option<&TubeMesh>);

    /// Replace the index buffer shared by every slot.
    fn upload_indices(&mut self, indices: &StripIndices);
}

/// Indexed collection of tube slots.
#[derive(Debug, Clone)]
pub struct TubeSet {
    resolution: TubeResolution,
    indices: StripIndices,
    slots: Vec<Option<TubeSlot>>,
    storing: bool,
    stored: Vec<TubeSpec>,
}

impl Default for TubeSet {
    fn default() -> Self {
        Self::new(TubeResolution::default())
    }
}

impl TubeSet {
    /// An empty set sampling at `resolution`.
    #[must_use]
    pub fn new(resolution: TubeResolution) -> Self {
        Self {
            resolution,
            indices: StripIndices::new(resolution),
            slots: Vec::new(),
            storing: false,
            stored: Vec::new(),
        }
    }

    /// Current sampling resolution.
    #[must_use]
    pub fn resolution(&self) -> TubeResolution {
        self.resolution
    }

    /// Strip indices for the current resolution.
    #[must_use]
    pub fn indices(&self) -> &StripIndices {
        &self.indices
    }

    /// Number of slots, visible or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the set has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Replace every slot with `count` hidden slots.
    pub fn reset(&mut self, count: usize) {
        self.slots.clear();
        self.slots.resize(count, None);
    }

    /// Remove `count` slots starting at `start`, shifting later slots down.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::SlotOutOfRange`] if the range runs past the
    /// last slot.
    pub fn remove_range(&mut self, start: usize, count: usize) -> CurveResult<()> {
        let end = start
            .checked_add(count)
            .filter(|&end| end <= self.slots.len())
            .ok_or(CurveError::SlotOutOfRange {
                index: start.saturating_add(count),
                len: self.slots.len(),
            })?;
        self.slots.drain(start..end);
        Ok(())
    }

    /// Sweep `spec` into `slot`, making it visible.
    ///
    /// When storing is enabled the spec is also appended to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if `slot` is out of range or the spec cannot be
    /// swept.
    pub fn set_tube(&mut self, slot: usize, spec: TubeSpec) -> CurveResult<()> {
        let len = self.slots.len();
        let resolution = self.resolution;
        let target = self
            .slots
            .get_mut(slot)
            .ok_or(CurveError::SlotOutOfRange { index: slot, len })?;

        let mesh = spec.sweep(resolution)?;
        *target = Some(TubeSlot { spec, mesh });

        if self.storing {
            self.stored.push(spec);
        }
        Ok(())
    }

    /// Hide `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::SlotOutOfRange`] if `slot` is out of range.
    pub fn hide_tube(&mut self, slot: usize) -> CurveResult<()> {
        let len = self.slots.len();
        let target = self
            .slots
            .get_mut(slot)
            .ok_or(CurveError::SlotOutOfRange { index: slot, len })?;
        *target = None;
        Ok(())
    }

    /// Contents of `slot`, if it exists and is visible.
    #[must_use]
    pub fn slot(&self, slot: usize) -> Option<&TubeSlot> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    /// Visible slots in index order.
    pub fn visible(&self) -> impl Iterator<Item = &TubeSlot> {
        self.slots.iter().flatten()
    }

    /// Change the sampling resolution and re-sample every visible slot.
    ///
    /// Returns whether the resolution changed. An unchanged resolution
    /// leaves the set untouched, and so does a failed re-sample.
    ///
    /// # Errors
    ///
    /// Returns an error if a visible slot can no longer be swept.
    pub fn set_resolution(&mut self, resolution: TubeResolution) -> CurveResult<bool> {
        if resolution == self.resolution {
            return Ok(false);
        }

        let meshes = self
            .visible()
            .map(|slot| slot.spec.sweep(resolution))
            .collect::<CurveResult<Vec<_>>>()?;
        for (slot, mesh) in self.slots.iter_mut().flatten().zip(meshes) {
            slot.mesh = mesh;
        }
        self.resolution = resolution;
        self.indices = StripIndices::new(resolution);

        debug!(
            pieces = resolution.pieces(),
            segments = resolution.segments(),
            visible = self.slots.iter().flatten().count(),
            "tube resolution changed"
        );
        Ok(true)
    }

    /// Replace every slot with `specs` swept at `resolution`.
    ///
    /// `None` entries become hidden slots. When storing, the store is
    /// refilled with the visible specs in slot order. Nothing changes
    /// unless every spec sweeps.
    ///
    /// # Errors
    ///
    /// Returns an error if a spec cannot be swept.
    pub fn replace(&mut self, resolution: TubeResolution, specs: &[Option<TubeSpec>]) -> CurveResult<()> {
        let slots = specs
            .iter()
            .map(|spec| {
                spec.map(|spec| spec.sweep(resolution).map(|mesh| TubeSlot { spec, mesh }))
                    .transpose()
            })
            .collect::<CurveResult<Vec<_>>>()?;

        if resolution != self.resolution {
            self.resolution = resolution;
            self.indices = StripIndices::new(resolution);
        }
        self.slots = slots;
        if self.storing {
            self.stored = specs.iter().flatten().copied().collect();
        }
        Ok(())
    }

    /// Enable or disable storing of swept specs. Disabling clears the store.
    pub fn set_storing(&mut self, storing: bool) {
        self.storing = storing;
        if !storing {
            self.stored.clear();
        }
    }

    /// Whether swept specs are being stored.
    #[must_use]
    pub fn is_storing(&self) -> bool {
        self.storing
    }

    /// Stored specs in the order they were swept.
    #[must_use]
    pub fn stored(&self) -> &[TubeSpec] {
        &self.stored
    }

    /// Re-sample every stored spec at `resolution`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored spec cannot be swept.
    pub fn sample_stored(&self, resolution: TubeResolution) -> CurveResult<Vec<TubeMesh>> {
        self.stored.iter().map(|spec| spec.sweep(resolution)).collect()
    }

    /// Push the indices and every slot to `host`.
    pub fn upload<H: GeometryHost + ?Sized>(&self, host: &mut H) {
        host.upload_indices(&self.indices);
        for (index, slot) in self.slots.iter().enumerate() {
            host.upload_vertices(index, slot.as_ref().map(|s| &s.mesh));
        }
    }
}
