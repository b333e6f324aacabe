//! Error types for mesh-from-curves operations.

use thiserror::Error;

/// Result type for mesh-from-curves operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors that can occur during curve-to-mesh operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// Too few pieces along the tube.
    #[error("pieces must be at least {min}, got {actual}")]
    TooFewPieces {
        /// Minimum required pieces.
        min: usize,
        /// Requested piece count.
        actual: usize,
    },

    /// Segments count is too low.
    #[error("segments must be at least {min}, got {actual}")]
    TooFewSegments {
        /// Minimum required segments.
        min: usize,
        /// Actual segment count.
        actual: usize,
    },

    /// Radius is invalid (zero, negative or not finite).
    #[error("invalid radius: {0}")]
    InvalidRadius(f64),

    /// A tube slot index past the end of the collection.
    #[error("tube slot {index} out of range for {len} slots")]
    SlotOutOfRange {
        /// Requested slot.
        index: usize,
        /// Number of slots.
        len: usize,
    },

    /// Sampled rings did not match the requested resolution.
    #[error("sampled {actual} tube vertices, expected {expected}")]
    RingMismatch {
        /// Vertices implied by the resolution.
        expected: usize,
        /// Vertices produced.
        actual: usize,
    },

    /// Error from the underlying curve.
    #[error(transparent)]
    Segment(#[from] curve_types::CurveError),
}
