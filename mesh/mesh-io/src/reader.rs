//! PLY import.
//!
//! Reads the header generically and decodes any element layout with
//! scalar and list properties, keeping vertex positions, 8-bit vertex
//! colours and triangulated faces. Version fields after the `format`
//! keyword are accepted but ignored.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::SplitWhitespace;

use mesh_types::{Point3, VertexColor};

use crate::error::{IoError, IoResult};
use crate::ply::PlyEncoding;

/// Storage type of a PLY property value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    /// `char` / `int8`
    Int8,
    /// `uchar` / `uint8`
    UInt8,
    /// `short` / `int16`
    Int16,
    /// `ushort` / `uint16`
    UInt16,
    /// `int` / `int32`
    Int32,
    /// `uint` / `uint32`
    UInt32,
    /// `float` / `float32`
    Float32,
    /// `double` / `float64`
    Float64,
}

impl ScalarType {
    /// Parse a type name from a `property` line.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "char" | "int8" => Self::Int8,
            "uchar" | "uint8" => Self::UInt8,
            "short" | "int16" => Self::Int16,
            "ushort" | "uint16" => Self::UInt16,
            "int" | "int32" => Self::Int32,
            "uint" | "uint32" => Self::UInt32,
            "float" | "float32" => Self::Float32,
            "double" | "float64" => Self::Float64,
            _ => return None,
        })
    }

    /// Size in bytes in a binary body.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Float64 => 8,
        }
    }
}

/// Shape of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// A single value.
    Scalar(ScalarType),
    /// A length-prefixed list.
    List {
        /// Type of the length prefix.
        count: ScalarType,
        /// Type of each item.
        item: ScalarType,
    },
}

/// One `property` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDef {
    /// Property name.
    pub name: String,
    /// Property shape.
    pub kind: PropertyKind,
}

/// One `element` line and its properties.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDef {
    /// Element name.
    pub name: String,
    /// Number of records.
    pub count: usize,
    /// Properties in record order.
    pub properties: Vec<PropertyDef>,
}

impl ElementDef {
    fn position_of(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name == name)
    }
}

/// A parsed PLY header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlyHeader {
    /// Body encoding.
    pub encoding: PlyEncoding,
    /// `comment` lines, without the keyword.
    pub comments: Vec<String>,
    /// Elements in body order.
    pub elements: Vec<ElementDef>,
}

impl PlyHeader {
    /// Element named `name`.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&ElementDef> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Number of vertex records, zero if there is no vertex element.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.element("vertex").map_or(0, |e| e.count)
    }

    /// Number of face records, zero if there is no face element.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.element("face").map_or(0, |e| e.count)
    }
}

/// Vertex and face data read from a PLY file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlyMesh {
    /// Vertex positions.
    pub positions: Vec<Point3<f32>>,
    /// Vertex colours; empty when the file has none.
    pub colors: Vec<VertexColor>,
    /// Triangles, fan-triangulated from larger polygons.
    pub faces: Vec<[u32; 3]>,
}

impl PlyMesh {
    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Parse a PLY header, leaving `reader` at the start of the body.
///
/// # Errors
///
/// Returns an error if the header is malformed or ends before
/// `end_header`.
pub fn read_ply_header<R: BufRead>(reader: &mut R) -> IoResult<PlyHeader> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    if line.trim_end() != "ply" {
        return Err(IoError::invalid_content("missing 'ply' magic"));
    }

    let mut encoding = None;
    let mut comments = Vec::new();
    let mut elements: Vec<ElementDef> = Vec::new();

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(IoError::invalid_content("header ended before end_header"));
        }
        let text = line.trim_end();
        let mut tokens = text.split_whitespace();

        match tokens.next() {
            Some("format") => {
                let keyword = tokens.next().unwrap_or_default();
                encoding = Some(PlyEncoding::from_keyword(keyword).ok_or_else(|| {
                    IoError::invalid_content(format!("unknown format '{keyword}'"))
                })?);
            }
            Some("comment") => {
                comments.push(text.trim_start_matches("comment").trim().to_string());
            }
            Some("obj_info") | None => {}
            Some("element") => {
                let name = tokens
                    .next()
                    .ok_or_else(|| IoError::invalid_content("element without a name"))?;
                let count = tokens
                    .next()
                    .ok_or_else(|| IoError::invalid_content("element without a count"))?
                    .parse()?;
                elements.push(ElementDef {
                    name: name.to_string(),
                    count,
                    properties: Vec::new(),
                });
            }
            Some("property") => {
                let property = parse_property(&mut tokens)?;
                elements
                    .last_mut()
                    .ok_or_else(|| IoError::invalid_content("property before any element"))?
                    .properties
                    .push(property);
            }
            Some("end_header") => break,
            Some(other) => {
                return Err(IoError::invalid_content(format!(
                    "unknown header keyword '{other}'"
                )));
            }
        }
    }

    let encoding = encoding.ok_or_else(|| IoError::invalid_content("missing format line"))?;
    Ok(PlyHeader {
        encoding,
        comments,
        elements,
    })
}

fn parse_property(tokens: &mut SplitWhitespace<'_>) -> IoResult<PropertyDef> {
    let scalar = |name: Option<&str>| {
        let name = name.unwrap_or_default();
        ScalarType::from_name(name)
            .ok_or_else(|| IoError::invalid_content(format!("unknown property type '{name}'")))
    };

    let kind = match tokens.next() {
        Some("list") => PropertyKind::List {
            count: scalar(tokens.next())?,
            item: scalar(tokens.next())?,
        },
        ty => PropertyKind::Scalar(scalar(ty)?),
    };
    let name = tokens
        .next()
        .ok_or_else(|| IoError::invalid_content("property without a name"))?;

    Ok(PropertyDef {
        name: name.to_string(),
        kind,
    })
}

/// Read a whole PLY stream.
///
/// # Errors
///
/// Returns an error if the header is malformed, the body is truncated, or
/// a face refers to a negative index.
pub fn read_ply<R: BufRead>(mut reader: R) -> IoResult<PlyMesh> {
    let header = read_ply_header(&mut reader)?;

    match header.encoding {
        PlyEncoding::Ascii => {
            let mut body = String::new();
            reader.read_to_string(&mut body)?;
            read_body(
                &header,
                &mut AsciiValues {
                    tokens: body.split_whitespace(),
                },
            )
        }
        PlyEncoding::BinaryLittleEndian | PlyEncoding::BinaryBigEndian => read_body(
            &header,
            &mut BinaryValues {
                reader,
                big_endian: header.encoding == PlyEncoding::BinaryBigEndian,
                position: 0,
            },
        ),
    }
}

/// Read a PLY file from disk.
///
/// # Errors
///
/// Returns [`IoError::FileNotFound`] if `path` does not exist, otherwise
/// any error from [`read_ply`].
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_ply;
///
/// let mesh = load_ply("knot.ply")?;
/// println!("{} vertices, {} faces", mesh.vertex_count(), mesh.face_count());
/// # Ok::<(), mesh_io::IoError>(())
/// ```
pub fn load_ply<P: AsRef<Path>>(path: P) -> IoResult<PlyMesh> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;
    read_ply(BufReader::new(file))
}

trait ValueSource {
    fn next_value(&mut self, ty: ScalarType) -> IoResult<f64>;
}

struct AsciiValues<'a> {
    tokens: SplitWhitespace<'a>,
}

impl ValueSource for AsciiValues<'_> {
    fn next_value(&mut self, _ty: ScalarType) -> IoResult<f64> {
        let token = self
            .tokens
            .next()
            .ok_or_else(|| IoError::invalid_content("body ended early"))?;
        Ok(token.parse()?)
    }
}

struct BinaryValues<R> {
    reader: R,
    big_endian: bool,
    position: u64,
}

impl<R: Read> ValueSource for BinaryValues<R> {
    fn next_value(&mut self, ty: ScalarType) -> IoResult<f64> {
        let size = ty.size();
        let mut buf = [0u8; 8];
        self.reader.read_exact(&mut buf[..size]).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                IoError::UnexpectedEof {
                    position: self.position,
                }
            } else {
                IoError::Io(e)
            }
        })?;
        self.position += size as u64;
        if self.big_endian {
            buf[..size].reverse();
        }

        let [b0, b1, b2, b3, ..] = buf;
        Ok(match ty {
            ScalarType::Int8 => f64::from(i8::from_le_bytes([b0])),
            ScalarType::UInt8 => f64::from(b0),
            ScalarType::Int16 => f64::from(i16::from_le_bytes([b0, b1])),
            ScalarType::UInt16 => f64::from(u16::from_le_bytes([b0, b1])),
            ScalarType::Int32 => f64::from(i32::from_le_bytes([b0, b1, b2, b3])),
            ScalarType::UInt32 => f64::from(u32::from_le_bytes([b0, b1, b2, b3])),
            ScalarType::Float32 => f64::from(f32::from_le_bytes([b0, b1, b2, b3])),
            ScalarType::Float64 => f64::from_le_bytes(buf),
        })
    }
}

/// Read one record of `element`, leaving scalars in `scalars` and the
/// items of the first list in `list`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn read_record<S: ValueSource>(
    element: &ElementDef,
    source: &mut S,
    scalars: &mut Vec<f64>,
    list: &mut Vec<f64>,
) -> IoResult<()> {
    scalars.clear();
    list.clear();
    let mut list_seen = false;

    for property in &element.properties {
        match property.kind {
            PropertyKind::Scalar(ty) => scalars.push(source.next_value(ty)?),
            PropertyKind::List { count, item } => {
                scalars.push(f64::NAN);
                let len = source.next_value(count)?;
                if !(len >= 0.0 && len.fract() == 0.0) {
                    return Err(IoError::invalid_content(format!("invalid list length {len}")));
                }
                for _ in 0..len as usize {
                    let value = source.next_value(item)?;
                    if !list_seen {
                        list.push(value);
                    }
                }
                list_seen = true;
            }
        }
    }
    Ok(())
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]
fn read_body<S: ValueSource>(header: &PlyHeader, source: &mut S) -> IoResult<PlyMesh> {
    let mut mesh = PlyMesh::default();
    let mut scalars = Vec::new();
    let mut list = Vec::new();

    for element in &header.elements {
        match element.name.as_str() {
            "vertex" => {
                let [x, y, z] = ["x", "y", "z"].map(|n| element.position_of(n));
                let color = ["red", "green", "blue"].map(|n| element.position_of(n));
                let has_color = color.iter().all(Option::is_some);
                let at = |scalars: &[f64], i: Option<usize>| i.map_or(0.0, |i| scalars[i]);

                mesh.positions.reserve(element.count);
                for _ in 0..element.count {
                    read_record(element, source, &mut scalars, &mut list)?;
                    mesh.positions.push(Point3::new(
                        at(&scalars, x) as f32,
                        at(&scalars, y) as f32,
                        at(&scalars, z) as f32,
                    ));
                    if has_color {
                        let [r, g, b] = color.map(|i| at(&scalars, i) as u8);
                        mesh.colors.push(VertexColor::new(r, g, b));
                    }
                }
            }
            "face" => {
                mesh.faces.reserve(element.count);
                for _ in 0..element.count {
                    read_record(element, source, &mut scalars, &mut list)?;
                    if list.iter().any(|&i| i < 0.0) {
                        return Err(IoError::invalid_content("negative face index"));
                    }
                    let indices: Vec<u32> = list.iter().map(|&i| i as u32).collect();
                    for i in 1..indices.len().saturating_sub(1) {
                        mesh.faces.push([indices[0], indices[i], indices[i + 1]]);
                    }
                }
            }
            _ => {
                for _ in 0..element.count {
                    read_record(element, source, &mut scalars, &mut list)?;
                }
            }
        }
    }

    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCII_QUAD: &str = "ply
format ascii 1.0
comment hand written
element vertex 4
property float x
property float y
property float z
property uchar red
property uchar green
property uchar blue
element face 1
property list uchar int vertex_indices
end_header
0 0 0 255 0 0
1 0 0 0 255 0
1 1 0 0 0 255
0 1 0 10 20 30
4 0 1 2 3
";

    #[test]
    fn header_of_written_file() {
        let header = read_ply_header(&mut ASCII_QUAD.as_bytes()).expect("header");
        assert_eq!(header.encoding, PlyEncoding::Ascii);
        assert_eq!(header.comments, vec!["hand written".to_string()]);
        assert_eq!(header.vertex_count(), 4);
        assert_eq!(header.face_count(), 1);
        assert_eq!(
            header.element("face").expect("face").properties[0].kind,
            PropertyKind::List {
                count: ScalarType::UInt8,
                item: ScalarType::Int32
            }
        );
    }

    #[test]
    fn version_suffix_is_accepted() {
        let text = "ply\nformat binary_little_endian 1.0 1.0\nend_header\n";
        let header = read_ply_header(&mut text.as_bytes()).expect("header");
        assert_eq!(header.encoding, PlyEncoding::BinaryLittleEndian);
        assert!(header.elements.is_empty());
    }

    #[test]
    fn quads_are_fan_triangulated() {
        let mesh = read_ply(ASCII_QUAD.as_bytes()).expect("read");
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(mesh.colors[3], VertexColor::new(10, 20, 30));
    }

    #[test]
    fn missing_magic_is_rejected() {
        let result = read_ply("solid cube\n".as_bytes());
        assert!(matches!(result, Err(IoError::InvalidContent { .. })));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result = read_ply_header(&mut "ply\nformat binary 1.0\nend_header\n".as_bytes());
        assert!(matches!(result, Err(IoError::InvalidContent { .. })));
    }

    #[test]
    fn unterminated_header_is_rejected() {
        let result = read_ply_header(&mut "ply\nformat ascii 1.0\n".as_bytes());
        assert!(matches!(result, Err(IoError::InvalidContent { .. })));
    }

    #[test]
    fn truncated_binary_body() {
        let mut data = b"ply\nformat binary_little_endian 1.0\nelement vertex 2\nproperty float x\nend_header\n".to_vec();
        data.extend_from_slice(&1.5f32.to_le_bytes());
        data.extend_from_slice(&[0, 0]);

        let result = read_ply(data.as_slice());
        assert!(matches!(result, Err(IoError::UnexpectedEof { position: 4 })));
    }

    #[test]
    fn big_endian_values() {
        let mut data =
            b"ply\nformat binary_big_endian 1.0\nelement vertex 1\nproperty double x\nproperty short y\nproperty float z\nend_header\n"
                .to_vec();
        data.extend_from_slice(&2.25f64.to_be_bytes());
        data.extend_from_slice(&(-7i16).to_be_bytes());
        data.extend_from_slice(&0.5f32.to_be_bytes());

        let mesh = read_ply(data.as_slice()).expect("read");
        assert_eq!(mesh.positions, vec![Point3::new(2.25, -7.0, 0.5)]);
        assert!(mesh.colors.is_empty());
    }

    #[test]
    fn load_nonexistent_file() {
        let result = load_ply("nonexistent_file_12345.ply");
        assert!(matches!(result, Err(IoError::FileNotFound { .. })));
    }
}
