//! Error types for curve operations.

use thiserror::Error;

/// Errors that can occur during curve operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// A sampled measure was requested with too few pieces.
    #[error("curve must be sampled with at least {min} pieces, got {actual}")]
    TooFewPieces {
        /// Minimum number of pieces.
        min: usize,
        /// Requested number of pieces.
        actual: usize,
    },

    /// Parameter is outside the valid range [0, 1].
    #[error("parameter {0} is outside valid range [0, 1]")]
    ParameterOutOfRange(f64),
}

/// Result type for curve operations.
pub type Result<T> = std::result::Result<T, CurveError>;
