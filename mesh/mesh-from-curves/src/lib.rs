//! Sweep tubes along cubic Bézier curves.
//!
//! This crate turns the centre curves of a knot into renderable tube
//! geometry:
//!
//! - **Tube sweeping**: [`sweep_bezier`] samples rings of vertices along a
//!   curve, with colours ramped from one end to the other
//! - **Twist-free frames**: [`SweepFrame`] accumulates minimal rotations
//!   between tangents and corrects the closing ring so adjoining tubes meet
//!   without a visible seam
//! - **Shared topology**: [`StripIndices`] holds the triangle strips common
//!   to every tube of one resolution
//! - **Slot sets**: [`TubeSet`] manages an indexed set of tubes, re-samples
//!   them when the resolution changes and pushes them to a
//!   [`GeometryHost`]
//!
//! # Quick Start
//!
//! ```
//! use curve_types::CubicBezier;
//! use mesh_from_curves::{ColorRamp, TubeResolution, TubeSet, TubeSpec};
//! use mesh_types::{Point3, Rgb};
//!
//! let mut set = TubeSet::new(TubeResolution::new(12, 8)?);
//! set.reset(2);
//!
//! let spec = TubeSpec {
//!     curve: CubicBezier::new(
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!         Point3::new(1.0, 1.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!     ),
//!     radius: 0.1,
//!     colors: ColorRamp::uniform(Rgb::PLAIN),
//! };
//! set.set_tube(0, spec)?;
//!
//! assert_eq!(set.visible().count(), 1);
//! assert_eq!(set.indices().strips().len(), 12);
//! # Ok::<(), mesh_from_curves::CurveError>(())
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![allow(clippy::cast_precision_loss)]

mod error;
mod frame;
mod indices;
mod set;
mod tube;

pub use error::{CurveError, CurveResult};
pub use frame::SweepFrame;
pub use indices::StripIndices;
pub use set::{GeometryHost, TubeSet, TubeSlot, TubeSpec};
pub use tube::{sweep_bezier, ColorRamp, TubeConfig, TubeResolution};
