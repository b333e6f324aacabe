//! Triangle-strip index buffer shared by every tube of one resolution.

use crate::tube::TubeResolution;

/// Per-piece triangle strips for a tube of a given resolution.
///
/// Every tube sampled at the same resolution has the same topology, so
/// one buffer serves all of them. Strip `i` zig-zags between rings `i`
/// and `i + 1`, returning to segment 0 to close the seam.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripIndices {
    resolution: TubeResolution,
    strips: Vec<Vec<u32>>,
}

impl StripIndices {
    /// Build the strips for `resolution`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(resolution: TubeResolution) -> Self {
        let pieces = resolution.pieces();
        let segments = resolution.segments();

        let strips = (0..pieces)
            .map(|piece| {
                (0..=segments)
                    .flat_map(|seg| {
                        let seg = seg % segments;
                        [
                            (piece * segments + seg) as u32,
                            ((piece + 1) * segments + seg) as u32,
                        ]
                    })
                    .collect()
            })
            .collect();

        Self { resolution, strips }
    }

    /// Resolution the strips were built for.
    #[must_use]
    pub fn resolution(&self) -> TubeResolution {
        self.resolution
    }

    /// All strips, one per piece.
    #[must_use]
    pub fn strips(&self) -> &[Vec<u32>] {
        &self.strips
    }

    /// Strip joining rings `piece` and `piece + 1`.
    #[must_use]
    pub fn strip(&self, piece: usize) -> Option<&[u32]> {
        self.strips.get(piece).map(Vec::as_slice)
    }

    /// Decode the strips into individual triangles.
    ///
    /// Odd triangles in a strip swap their first two vertices so every
    /// triangle keeps the same winding.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.strips.iter().flat_map(|strip| {
            strip.windows(3).enumerate().map(|(j, w)| {
                if j % 2 == 0 {
                    [w[0], w[1], w[2]]
                } else {
                    [w[1], w[0], w[2]]
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::tube_triangles;

    fn indices(pieces: usize, segments: usize) -> StripIndices {
        StripIndices::new(TubeResolution::new(pieces, segments).expect("resolution"))
    }

    #[test]
    fn strip_layout() {
        let indices = indices(2, 3);
        assert_eq!(indices.strips().len(), 2);
        assert_eq!(indices.strip(0), Some(&[0, 3, 1, 4, 2, 5, 0, 3][..]));
        assert_eq!(indices.strip(1), Some(&[3, 6, 4, 7, 5, 8, 3, 6][..]));
        assert!(indices.strip(2).is_none());
    }

    #[test]
    fn decoded_strips_match_triangle_list() {
        let indices = indices(5, 7);
        let from_strips: Vec<_> = indices.triangles().collect();
        let listed: Vec<_> = tube_triangles(5, 7).collect();
        assert_eq!(from_strips, listed);
    }

    #[test]
    fn triangle_count_matches_resolution() {
        let indices = indices(24, 10);
        assert_eq!(indices.triangles().count(), indices.resolution().triangle_count());
    }
}
