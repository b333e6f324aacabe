//! Cubic Bézier segments and the rotation kernel used to sweep tubes along them.
//!
//! This crate is the vector/matrix layer beneath the knot geometry:
//!
//! - [`CubicBezier`] - A single cubic segment given by a start point, two
//!   handles and an end point, with evaluation, derivative, de Casteljau
//!   split and a chord-length estimate
//! - [`rotation_between_vectors`] - The minimal rotation carrying one
//!   direction onto another, with a perpendicular-axis fallback for
//!   opposed directions
//! - [`rotation_about_axis`] and [`perpendicular_vector`] - The building
//!   blocks of the above
//!
//! # Example
//!
//! ```
//! use curve_types::CubicBezier;
//! use nalgebra::Point3;
//!
//! let curve = CubicBezier::new(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 2.0, 0.0),
//!     Point3::new(3.0, 2.0, 0.0),
//!     Point3::new(4.0, 0.0, 0.0),
//! );
//!
//! // Splitting in half gives two segments that meet on the curve
//! let (left, right) = curve.split(0.5)?;
//! assert_eq!(left.p3, right.p0);
//! assert!((left.p3 - curve.point_at(0.5)).norm() < 1e-12);
//! # Ok::<(), curve_types::CurveError>(())
//! ```
//!
//! # Coordinate System
//!
//! Right-handed, all coordinates `f64`. Rotations are right-handed about
//! their axis.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for [`CubicBezier`]

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

mod bezier;
mod error;
mod rotation;

pub use bezier::CubicBezier;
pub use error::{CurveError, Result};
pub use rotation::{
    angle_between, perpendicular_vector, rotation_about_axis, rotation_between_vectors,
};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Rotation3, Vector3};
