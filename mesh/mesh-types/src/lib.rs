//! Core mesh types for knot geometry.
//!
//! This crate provides the plain data that flows between tube generation
//! and mesh export:
//!
//! - [`Rgb`] - A floating point colour, interpolated along tubes
//! - [`VertexColor`] - An 8-bit colour as written to mesh files
//! - [`TubeVertex`] - Position, outward normal and colour of one tube vertex
//! - [`TubeMesh`] - The rings of vertices sampled along one tube
//!
//! # Layer 0 Crate
//!
//! This crate has no rendering or windowing dependencies and can be used
//! from CLI tools, servers or any host that uploads vertex buffers.
//!
//! # Tube Layout
//!
//! A tube sampled with `pieces` steps along its length and `segments`
//! steps around its circumference holds `(pieces + 1) × segments`
//! vertices, ring by ring. Each piece contributes `2 × segments`
//! triangles joining ring `i` to ring `i + 1`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{tube_triangles, Rgb, VertexColor};
//!
//! let grey = Rgb::PLAIN;
//! assert_eq!(grey.to_vertex_color(), VertexColor::new(178, 178, 178));
//!
//! // One piece, three segments: six triangles
//! assert_eq!(tube_triangles(1, 3).count(), 6);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod color;
mod tube;

pub use color::{Rgb, VertexColor};
pub use tube::{tube_triangles, TubeMesh, TubeVertex};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
