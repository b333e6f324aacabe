//! Error types for knot generation, rendering and persistence.

use thiserror::Error;

/// Result type for knot operations.
pub type KnotResult<T> = Result<T, KnotError>;

/// Errors that can occur while building, rendering or saving a knot.
#[derive(Debug, Error)]
pub enum KnotError {
    /// The tile grid could not be populated or traced.
    #[error("knot topology error: {0}")]
    Topology(#[from] knot_topology::TopologyError),

    /// A tube could not be swept.
    #[error("tube error: {0}")]
    Tube(#[from] mesh_from_curves::CurveError),

    /// Curve arithmetic failed.
    #[error("curve error: {0}")]
    Curve(#[from] curve_types::CurveError),

    /// The mesh file could not be written.
    #[error("mesh export error: {0}")]
    Io(#[from] mesh_io::IoError),

    /// A settings document could not be parsed.
    #[error("failed to parse settings: {0}")]
    SettingsParse(#[from] toml::de::Error),

    /// A settings document could not be produced.
    #[error("failed to write settings: {0}")]
    SettingsWrite(#[from] toml::ser::Error),

    /// A settings file could not be read or written.
    #[error("settings file error: {0}")]
    SettingsFile(#[from] std::io::Error),

    /// The knot has not been generated yet.
    #[error("knot has not been generated")]
    NotGenerated,
}
