//! Mesh file I/O for swept tube geometry.
//!
//! This crate writes and reads the PLY (Polygon File Format) files a knot
//! is exported to:
//!
//! - **Export** - [`write_tube_ply`] / [`save_tube_ply`] write any number of
//!   [`TubeMesh`](mesh_types::TubeMesh)es as one coloured triangle mesh,
//!   in ASCII or either binary byte order
//! - **Import** - [`read_ply`] / [`load_ply`] read PLY files with arbitrary
//!   element layouts back into positions, colours and triangles
//!
//! # Layer 0 Crate
//!
//! This crate depends only on `mesh-types` and `thiserror`. It can be used
//! from CLI tools, servers or any other front end.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::{load_ply, save_tube_ply, PlyEncoding};
//!
//! # let meshes: Vec<mesh_types::TubeMesh> = Vec::new();
//! let stats = save_tube_ply("knot.ply", &meshes, PlyEncoding::Ascii)?;
//! let mesh = load_ply("knot.ply")?;
//! assert_eq!(mesh.face_count(), stats.faces);
//! # Ok::<(), mesh_io::IoError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod ply;
mod reader;

pub use error::{IoError, IoResult};
pub use ply::{save_tube_ply, write_tube_ply, PlyEncoding, PlyStats, PLY_COMMENT};
pub use reader::{
    load_ply, read_ply, read_ply_header, ElementDef, PlyHeader, PlyMesh, PropertyDef, PropertyKind,
    ScalarType,
};
