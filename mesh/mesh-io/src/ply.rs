//! PLY export of coloured tube meshes.
//!
//! Every tube is written as its rings of vertices followed by the triangles
//! joining them. Tubes are concatenated into one vertex element and one
//! face element, with each tube's face indices offset by the number of
//! vertices written before it.
//!
//! # Layout
//!
//! ```text
//! element vertex N
//! property float x
//! property float y
//! property float z
//! property uint8 red
//! property uint8 green
//! property uint8 blue
//! element face M
//! property list uchar int vertex_indices
//! ```
//!
//! ASCII bodies write each position on its own line and follow it with the
//! colour and a trailing space, so a colour shares its line with the next
//! position or face. Readers that split on whitespace see the usual
//! records.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use mesh_types::{TubeMesh, TubeVertex};

use crate::error::{IoError, IoResult};

/// Comment line written into every exported header.
pub const PLY_COMMENT: &str = "CelticKnot generated";

/// Body encoding of a PLY file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlyEncoding {
    /// Whitespace separated text, one record per line.
    Ascii,
    /// Packed little-endian binary.
    BinaryLittleEndian,
    /// Packed big-endian binary.
    BinaryBigEndian,
}

impl PlyEncoding {
    /// The binary encoding matching this machine's byte order.
    #[must_use]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::BinaryBigEndian
        } else {
            Self::BinaryLittleEndian
        }
    }

    /// Keyword used on the header's `format` line.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::BinaryLittleEndian => "binary_little_endian",
            Self::BinaryBigEndian => "binary_big_endian",
        }
    }

    /// Parse a `format` keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "ascii" => Some(Self::Ascii),
            "binary_little_endian" => Some(Self::BinaryLittleEndian),
            "binary_big_endian" => Some(Self::BinaryBigEndian),
            _ => None,
        }
    }

    /// Whether the body is binary.
    #[must_use]
    pub const fn is_binary(self) -> bool {
        !matches!(self, Self::Ascii)
    }

    fn format_line(self) -> &'static str {
        match self {
            Self::Ascii => "format ascii 1.0",
            Self::BinaryLittleEndian => "format binary_little_endian 1.0 1.0",
            Self::BinaryBigEndian => "format binary_big_endian 1.0 1.0",
        }
    }
}

/// Element counts of a written file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlyStats {
    /// Vertices written.
    pub vertices: usize,
    /// Triangles written.
    pub faces: usize,
}

/// Write `meshes` as one PLY file to `writer`.
///
/// # Errors
///
/// Returns an error if writing fails or the meshes hold more vertices than
/// a face index can address.
///
/// # Example
///
/// ```
/// use mesh_io::{write_tube_ply, PlyEncoding};
///
/// let mut out = Vec::new();
/// let stats = write_tube_ply(&mut out, &[], PlyEncoding::Ascii)?;
/// assert_eq!(stats.vertices, 0);
/// assert!(String::from_utf8_lossy(&out).starts_with("ply\nformat ascii 1.0\n"));
/// # Ok::<(), mesh_io::IoError>(())
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn write_tube_ply<W: Write>(
    writer: &mut W,
    meshes: &[TubeMesh],
    encoding: PlyEncoding,
) -> IoResult<PlyStats> {
    let stats = PlyStats {
        vertices: meshes.iter().map(TubeMesh::vertex_count).sum(),
        faces: meshes.iter().map(TubeMesh::triangle_count).sum(),
    };
    if i32::try_from(stats.vertices).is_err() {
        return Err(IoError::TooManyVertices {
            count: stats.vertices,
        });
    }

    write_header(writer, &stats, encoding)?;

    for vertex in meshes.iter().flat_map(TubeMesh::vertices) {
        write_vertex(writer, vertex, encoding)?;
    }

    // Fits: the total vertex count was checked against i32 above.
    let mut offset = 0u32;
    for mesh in meshes {
        for triangle in mesh.triangles() {
            write_face(writer, triangle.map(|i| i + offset), encoding)?;
        }
        offset += mesh.vertex_count() as u32;
    }

    writer.flush()?;
    Ok(stats)
}

/// Write `meshes` as one PLY file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
///
/// # Example
///
/// ```no_run
/// use mesh_io::{save_tube_ply, PlyEncoding};
///
/// let stats = save_tube_ply("knot.ply", &[], PlyEncoding::native())?;
/// println!("wrote {} faces", stats.faces);
/// # Ok::<(), mesh_io::IoError>(())
/// ```
pub fn save_tube_ply<P: AsRef<Path>>(
    path: P,
    meshes: &[TubeMesh],
    encoding: PlyEncoding,
) -> IoResult<PlyStats> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_tube_ply(&mut writer, meshes, encoding)
}

fn write_header<W: Write>(writer: &mut W, stats: &PlyStats, encoding: PlyEncoding) -> IoResult<()> {
    writeln!(writer, "ply")?;
    writeln!(writer, "{}", encoding.format_line())?;
    writeln!(writer, "comment {PLY_COMMENT}")?;
    writeln!(writer, "element vertex {}", stats.vertices)?;
    writeln!(writer, "property float x")?;
    writeln!(writer, "property float y")?;
    writeln!(writer, "property float z")?;
    writeln!(writer, "property uint8 red")?;
    writeln!(writer, "property uint8 green")?;
    writeln!(writer, "property uint8 blue")?;
    writeln!(writer, "element face {}", stats.faces)?;
    writeln!(writer, "property list uchar int vertex_indices")?;
    writeln!(writer, "end_header")?;
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
fn write_vertex<W: Write>(writer: &mut W, vertex: &TubeVertex, encoding: PlyEncoding) -> IoResult<()> {
    let position = vertex.position.map(|c| c as f32);
    let [r, g, b] = vertex.color.to_vertex_color().to_array();

    match encoding {
        PlyEncoding::Ascii => {
            writeln!(writer, "{:.6} {:.6} {:.6}", position.x, position.y, position.z)?;
            write!(writer, "{r} {g} {b} ")?;
        }
        PlyEncoding::BinaryLittleEndian => {
            for c in position.iter() {
                writer.write_all(&c.to_le_bytes())?;
            }
            writer.write_all(&[r, g, b])?;
        }
        PlyEncoding::BinaryBigEndian => {
            for c in position.iter() {
                writer.write_all(&c.to_be_bytes())?;
            }
            writer.write_all(&[r, g, b])?;
        }
    }
    Ok(())
}

#[allow(clippy::cast_possible_wrap)]
fn write_face<W: Write>(writer: &mut W, face: [u32; 3], encoding: PlyEncoding) -> IoResult<()> {
    let [a, b, c] = face.map(|i| i as i32);

    match encoding {
        PlyEncoding::Ascii => writeln!(writer, "3 {a} {b} {c}")?,
        PlyEncoding::BinaryLittleEndian => {
            writer.write_all(&[3u8])?;
            for i in [a, b, c] {
                writer.write_all(&i.to_le_bytes())?;
            }
        }
        PlyEncoding::BinaryBigEndian => {
            writer.write_all(&[3u8])?;
            for i in [a, b, c] {
                writer.write_all(&i.to_be_bytes())?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::{load_ply, read_ply};
    use mesh_types::{Point3, Rgb, Vector3, VertexColor};

    /// A single-piece tube with a triangular cross section.
    fn prism(x: f64, color: Rgb) -> TubeMesh {
        let vertices = (0..2)
            .flat_map(|piece| {
                (0..3).map(move |seg| TubeVertex {
                    position: Point3::new(x + f64::from(piece), f64::from(seg), 0.5),
                    normal: Vector3::z(),
                    color,
                })
            })
            .collect();
        TubeMesh::from_rings(1, 3, vertices).expect("mesh")
    }

    fn write(meshes: &[TubeMesh], encoding: PlyEncoding) -> Vec<u8> {
        let mut out = Vec::new();
        write_tube_ply(&mut out, meshes, encoding).expect("write");
        out
    }

    #[test]
    fn ascii_header_and_records() {
        let out = write(&[prism(0.0, Rgb::PLAIN)], PlyEncoding::Ascii);
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "ply");
        assert_eq!(lines[1], "format ascii 1.0");
        assert_eq!(lines[2], "comment CelticKnot generated");
        assert_eq!(lines[3], "element vertex 6");
        assert_eq!(lines[7], "property uint8 red");
        assert_eq!(lines[10], "element face 6");
        assert_eq!(lines[11], "property list uchar int vertex_indices");
        assert_eq!(lines[12], "end_header");
        // Each colour shares a line with the next record
        assert_eq!(lines[13], "0.000000 0.000000 0.500000");
        assert_eq!(lines[14], "178 178 178 0.000000 1.000000 0.500000");
        assert_eq!(lines[19], "178 178 178 3 0 3 1");
        assert_eq!(lines[20], "3 1 3 4");
        assert_eq!(lines.len(), 13 + 6 + 6);
    }

    #[test]
    fn binary_format_lines() {
        for (encoding, line) in [
            (PlyEncoding::BinaryLittleEndian, "format binary_little_endian 1.0 1.0"),
            (PlyEncoding::BinaryBigEndian, "format binary_big_endian 1.0 1.0"),
        ] {
            let out = write(&[], encoding);
            let text = String::from_utf8_lossy(&out);
            assert_eq!(text.lines().nth(1), Some(line));
        }
    }

    #[test]
    fn binary_body_size() {
        let out = write(&[prism(0.0, Rgb::PLAIN)], PlyEncoding::BinaryLittleEndian);
        let header_end = out
            .windows(11)
            .position(|w| w == b"end_header\n")
            .expect("header")
            + 11;
        // 15 bytes per vertex, 13 per face
        assert_eq!(out.len() - header_end, 6 * 15 + 6 * 13);
    }

    #[test]
    fn faces_offset_by_earlier_tubes() {
        let red = Rgb::new(1.0, 0.0, 0.0);
        let out = write(&[prism(0.0, Rgb::PLAIN), prism(5.0, red)], PlyEncoding::Ascii);
        let mesh = read_ply(out.as_slice()).expect("read");

        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.face_count(), 12);
        assert_eq!(mesh.faces[6], [6, 9, 7]);
        assert_eq!(mesh.colors[6], VertexColor::new(255, 0, 0));
    }

    #[test]
    fn roundtrip_every_encoding() {
        let meshes = [prism(0.25, Rgb::new(0.2, 0.4, 0.6)), prism(-3.0, Rgb::PLAIN)];
        let expected: Vec<_> = meshes
            .iter()
            .flat_map(TubeMesh::vertices)
            .map(|v| v.position)
            .collect();

        for encoding in [
            PlyEncoding::Ascii,
            PlyEncoding::BinaryLittleEndian,
            PlyEncoding::BinaryBigEndian,
        ] {
            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join("knot.ply");
            let stats = save_tube_ply(&path, &meshes, encoding).expect("save");
            assert_eq!(stats, PlyStats { vertices: 12, faces: 12 });

            let loaded = load_ply(&path).expect("load");
            assert_eq!(loaded.face_count(), 12);
            for (orig, read) in expected.iter().zip(&loaded.positions) {
                assert!((orig.x - f64::from(read.x)).abs() < 1e-5);
                assert!((orig.y - f64::from(read.y)).abs() < 1e-5);
                assert!((orig.z - f64::from(read.z)).abs() < 1e-5);
            }
            assert_eq!(loaded.colors[0], VertexColor::new(51, 102, 153));
        }
    }

    #[test]
    fn keywords_roundtrip() {
        for encoding in [
            PlyEncoding::Ascii,
            PlyEncoding::BinaryLittleEndian,
            PlyEncoding::BinaryBigEndian,
        ] {
            assert_eq!(PlyEncoding::from_keyword(encoding.keyword()), Some(encoding));
        }
        assert!(PlyEncoding::native().is_binary());
        assert_eq!(PlyEncoding::from_keyword("binary"), None);
    }
}
