//! Sampled tube meshes.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::Rgb;

/// One vertex on the surface of a tube.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TubeVertex {
    /// Position in world space.
    pub position: Point3<f64>,
    /// Unit outward normal.
    pub normal: Vector3<f64>,
    /// Interpolated colour.
    pub color: Rgb,
}

/// The rings of vertices sampled along one tube.
///
/// Vertices are stored ring by ring: vertex `s` of ring `i` is at index
/// `i × segments + s`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TubeMesh {
    pieces: usize,
    segments: usize,
    vertices: Vec<TubeVertex>,
}

impl TubeMesh {
    /// Wrap sampled rings.
    ///
    /// Returns `None` unless `vertices` holds exactly
    /// `(pieces + 1) × segments` entries.
    #[must_use]
    pub fn from_rings(pieces: usize, segments: usize, vertices: Vec<TubeVertex>) -> Option<Self> {
        ((pieces + 1) * segments == vertices.len()).then_some(Self {
            pieces,
            segments,
            vertices,
        })
    }

    /// Number of longitudinal pieces.
    #[must_use]
    pub fn pieces(&self) -> usize {
        self.pieces
    }

    /// Number of vertices around each ring.
    #[must_use]
    pub fn segments(&self) -> usize {
        self.segments
    }

    /// All vertices, ring by ring.
    #[must_use]
    pub fn vertices(&self) -> &[TubeVertex] {
        &self.vertices
    }

    /// The ring sampled at `t = piece / pieces`.
    #[must_use]
    pub fn ring(&self, piece: usize) -> Option<&[TubeVertex]> {
        let start = piece.checked_mul(self.segments)?;
        self.vertices.get(start..start + self.segments)
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles in the tube surface.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        2 * self.pieces * self.segments
    }

    /// Triangles of the tube surface, indexing into [`vertices`](Self::vertices).
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> {
        tube_triangles(self.pieces, self.segments)
    }
}

/// Triangles joining consecutive rings of a tube.
///
/// For each piece `i` and segment `s` the quad between rings `i` and
/// `i + 1` is emitted as two counter-clockwise triangles:
/// `[i·S + s, (i+1)·S + s, i·S + s′]` and
/// `[i·S + s′, (i+1)·S + s, (i+1)·S + s′]` with `s′ = (s + 1) mod S`.
#[allow(clippy::cast_possible_truncation)]
pub fn tube_triangles(pieces: usize, segments: usize) -> impl Iterator<Item = [u32; 3]> {
    (0..pieces).flat_map(move |piece| {
        (0..segments).flat_map(move |seg| {
            let curr = (piece * segments + seg) as u32;
            let next_seg = (piece * segments + (seg + 1) % segments) as u32;
            let next_ring = ((piece + 1) * segments + seg) as u32;
            let next_both = ((piece + 1) * segments + (seg + 1) % segments) as u32;

            [[curr, next_ring, next_seg], [next_seg, next_ring, next_both]]
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_mesh(pieces: usize, segments: usize) -> TubeMesh {
        let vertices = (0..=pieces)
            .flat_map(|piece| {
                (0..segments).map(move |seg| TubeVertex {
                    position: Point3::new(piece as f64, seg as f64, 0.0),
                    normal: Vector3::z(),
                    color: Rgb::PLAIN,
                })
            })
            .collect();
        TubeMesh::from_rings(pieces, segments, vertices).expect("mesh")
    }

    #[test]
    fn counts_follow_resolution() {
        let mesh = ring_mesh(10, 24);
        assert_eq!(mesh.vertex_count(), 11 * 24);
        assert_eq!(mesh.triangle_count(), 2 * 10 * 24);
        assert_eq!(mesh.triangles().count(), mesh.triangle_count());
    }

    #[test]
    fn mismatched_vertex_count_is_rejected() {
        assert!(TubeMesh::from_rings(2, 3, Vec::new()).is_none());
    }

    #[test]
    fn ring_slices_by_piece() {
        let mesh = ring_mesh(3, 4);
        let ring = mesh.ring(2).expect("ring");
        assert_eq!(ring.len(), 4);
        assert!(ring.iter().all(|v| (v.position.x - 2.0).abs() < f64::EPSILON));
        assert!(mesh.ring(4).is_none());
    }

    #[test]
    fn triangles_wrap_around_the_seam() {
        let triangles: Vec<_> = tube_triangles(1, 3).collect();
        assert_eq!(triangles[0], [0, 3, 1]);
        assert_eq!(triangles[1], [1, 3, 4]);
        // Last segment wraps back to vertex 0
        assert_eq!(triangles[4], [2, 5, 0]);
        assert_eq!(triangles[5], [0, 5, 3]);
    }

    #[test]
    fn triangle_indices_stay_in_range() {
        let mesh = ring_mesh(5, 7);
        let count = mesh.vertex_count() as u32;
        assert!(mesh.triangles().flatten().all(|i| i < count));
    }
}
