//! # Binary Codec
//!
//! Compact little-endian encoding of a [`ColorMesh`]. There is no header,
//! magic number or version tag; the reader must know the width used.
//!
//! ```text
//! i32 vertex count
//!   repeat: i32 id, x, y, z
//! i32 triangle count
//!   repeat: i32 id, a, b, c, r g b a (u8 x 4)
//! ```
//!
//! Positions and indices are written at the [`BinaryWidth`] selected by the
//! caller.

use glam::DVec3;
use tracing::{debug, warn};
use trellis_mesh::{Color, ColorMesh, ColorTriangle};

use crate::error::{CodecError, CodecResult};

/// Numeric width of positions and triangle indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BinaryWidth {
    /// `f64` positions, `i32` indices. Lossless.
    #[default]
    Double,
    /// `f32` positions, `i16` indices.
    Float,
}

impl BinaryWidth {
    fn max_index(self) -> i64 {
        match self {
            BinaryWidth::Double => i64::from(i32::MAX),
            BinaryWidth::Float => i64::from(i16::MAX),
        }
    }

    /// Encoded size of one vertex record.
    pub fn vertex_size(self) -> usize {
        match self {
            BinaryWidth::Double => 4 + 3 * 8,
            BinaryWidth::Float => 4 + 3 * 4,
        }
    }

    /// Encoded size of one triangle record.
    pub fn triangle_size(self) -> usize {
        match self {
            BinaryWidth::Double => 4 + 3 * 4 + 4,
            BinaryWidth::Float => 4 + 3 * 2 + 4,
        }
    }
}

/// Result of a lenient decode: everything read before the first error.
#[derive(Debug)]
pub struct PartialMesh {
    pub mesh: ColorMesh,
    pub error: Option<CodecError>,
}

impl PartialMesh {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Converts to a strict result, dropping the partial mesh on error.
    pub fn into_result(self) -> CodecResult<ColorMesh> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.mesh),
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a color mesh.
///
/// # Errors
///
/// Fails with [`CodecError::IndexOverflow`] if a count, id or index does not
/// fit the selected width.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use trellis_codec::binary::{from_bytes, to_bytes, BinaryWidth};
/// use trellis_mesh::ColorMesh;
///
/// let mut mesh = ColorMesh::new();
/// mesh.add_vertex(DVec3::new(0.1, 0.2, 0.3));
/// let bytes = to_bytes(&mesh, BinaryWidth::Double).unwrap();
/// assert_eq!(bytes.len(), 4 + 28 + 4);
/// assert_eq!(from_bytes(&bytes, BinaryWidth::Double).unwrap(), mesh);
/// ```
pub fn to_bytes(mesh: &ColorMesh, width: BinaryWidth) -> CodecResult<Vec<u8>> {
    let mut out = Vec::with_capacity(
        8 + mesh.vertex_count() * width.vertex_size()
            + mesh.triangle_count() * width.triangle_size(),
    );

    write_i32(&mut out, mesh.vertex_count() as i64)?;
    for (id, position) in mesh.vertices().iter() {
        write_i32(&mut out, i64::from(id))?;
        for component in position.to_array() {
            match width {
                BinaryWidth::Double => out.extend_from_slice(&component.to_le_bytes()),
                BinaryWidth::Float => out.extend_from_slice(&(component as f32).to_le_bytes()),
            }
        }
    }

    write_i32(&mut out, mesh.triangle_count() as i64)?;
    for (id, tri) in mesh.triangles().iter() {
        write_i32(&mut out, i64::from(id))?;
        for index in tri.vertices() {
            write_index(&mut out, i64::from(index), width)?;
        }
        out.extend_from_slice(&tri.color.to_array());
    }

    debug!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        bytes = out.len(),
        ?width,
        "encoded binary mesh"
    );
    Ok(out)
}

fn write_i32(out: &mut Vec<u8>, value: i64) -> CodecResult<()> {
    let value = i32::try_from(value).map_err(|_| CodecError::IndexOverflow {
        index: value,
        max: i64::from(i32::MAX),
    })?;
    out.extend_from_slice(&value.to_le_bytes());
    Ok(())
}

fn write_index(out: &mut Vec<u8>, index: i64, width: BinaryWidth) -> CodecResult<()> {
    match width {
        BinaryWidth::Double => write_i32(out, index),
        BinaryWidth::Float => {
            let value = i16::try_from(index).map_err(|_| CodecError::IndexOverflow {
                index,
                max: width.max_index(),
            })?;
            out.extend_from_slice(&value.to_le_bytes());
            Ok(())
        }
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a color mesh, failing on the first malformed record.
pub fn from_bytes(bytes: &[u8], width: BinaryWidth) -> CodecResult<ColorMesh> {
    try_from_bytes(bytes, width).into_result()
}

/// Decodes as much of a color mesh as possible.
///
/// Never fails: the returned [`PartialMesh`] holds every record read before
/// the first error, and that error if there was one.
pub fn try_from_bytes(bytes: &[u8], width: BinaryWidth) -> PartialMesh {
    let mut reader = Reader::new(bytes);
    let mut mesh = ColorMesh::new();
    let error = read_into(&mut reader, &mut mesh, width).err();

    match &error {
        Some(error) => warn!(%error, position = reader.position, "binary decode stopped early"),
        None if reader.remaining() > 0 => {
            debug!(trailing = reader.remaining(), "ignoring trailing bytes")
        }
        None => {}
    }
    PartialMesh { mesh, error }
}

fn read_into(reader: &mut Reader<'_>, mesh: &mut ColorMesh, width: BinaryWidth) -> CodecResult<()> {
    let vertex_count = reader.count()?;
    for _ in 0..vertex_count {
        let id = reader.id()?;
        let position = match width {
            BinaryWidth::Double => DVec3::new(reader.f64()?, reader.f64()?, reader.f64()?),
            BinaryWidth::Float => DVec3::new(
                f64::from(reader.f32()?),
                f64::from(reader.f32()?),
                f64::from(reader.f32()?),
            ),
        };
        mesh.insert_vertex(id, position);
    }

    let triangle_count = reader.count()?;
    for _ in 0..triangle_count {
        let id = reader.id()?;
        let a = reader.index(width)?;
        let b = reader.index(width)?;
        let c = reader.index(width)?;
        let color = Color::from_array(reader.take::<4>()?);
        mesh.insert_triangle(id, ColorTriangle::new(a, b, c, color));
    }
    Ok(())
}

struct Reader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.position)
    }

    fn take<const N: usize>(&mut self) -> CodecResult<[u8; N]> {
        let chunk = self
            .bytes
            .get(self.position..self.position + N)
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or(CodecError::UnexpectedEof {
                position: self.position,
                needed: N - self.remaining().min(N),
            })?;
        self.position += N;
        Ok(chunk)
    }

    fn i32(&mut self) -> CodecResult<i32> {
        Ok(i32::from_le_bytes(self.take()?))
    }

    fn f32(&mut self) -> CodecResult<f32> {
        Ok(f32::from_le_bytes(self.take()?))
    }

    fn f64(&mut self) -> CodecResult<f64> {
        Ok(f64::from_le_bytes(self.take()?))
    }

    fn count(&mut self) -> CodecResult<u32> {
        let count = self.i32()?;
        u32::try_from(count).map_err(|_| CodecError::NegativeCount {
            count: i64::from(count),
        })
    }

    fn id(&mut self) -> CodecResult<u32> {
        let id = self.i32()?;
        non_negative(i64::from(id))
    }

    fn index(&mut self, width: BinaryWidth) -> CodecResult<u32> {
        let index = match width {
            BinaryWidth::Double => i64::from(self.i32()?),
            BinaryWidth::Float => i64::from(i16::from_le_bytes(self.take()?)),
        };
        non_negative(index)
    }
}

fn non_negative(index: i64) -> CodecResult<u32> {
    u32::try_from(index).map_err(|_| CodecError::NegativeIndex { index })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ColorMesh {
        let mut mesh = ColorMesh::new();
        let a = mesh.add_vertex(DVec3::new(0.1, -2.5, 1e-7));
        let b = mesh.add_vertex(DVec3::new(3.0, 4.0, 5.0));
        let c = mesh.add_vertex(DVec3::new(-1.0, 0.0, 7.25));
        mesh.add_triangle(ColorTriangle::new(a, b, c, Color::new(10, 20, 30, 40)));
        mesh
    }

    #[test]
    fn test_layout_is_little_endian() {
        let bytes = to_bytes(&sample(), BinaryWidth::Double).unwrap();
        assert_eq!(&bytes[0..4], &3i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &0i32.to_le_bytes());
        assert_eq!(&bytes[8..16], &0.1f64.to_le_bytes());
        let triangles_at = 4 + 3 * BinaryWidth::Double.vertex_size();
        assert_eq!(&bytes[triangles_at..triangles_at + 4], &1i32.to_le_bytes());
        assert_eq!(&bytes[bytes.len() - 4..], &[10, 20, 30, 40]);
    }

    #[test]
    fn test_sizes_per_width() {
        let mesh = sample();
        let double = to_bytes(&mesh, BinaryWidth::Double).unwrap();
        let float = to_bytes(&mesh, BinaryWidth::Float).unwrap();
        assert_eq!(double.len(), 8 + 3 * 28 + 20);
        assert_eq!(float.len(), 8 + 3 * 16 + 14);
    }

    #[test]
    fn test_float_index_overflow() {
        let mut mesh = ColorMesh::new();
        mesh.insert_vertex(40_000, DVec3::ZERO);
        mesh.add_triangle(ColorTriangle::new(40_000, 0, 1, Color::WHITE));
        assert!(to_bytes(&mesh, BinaryWidth::Double).is_ok());
        assert!(matches!(
            to_bytes(&mesh, BinaryWidth::Float),
            Err(CodecError::IndexOverflow { index: 40_000, max: 32_767 })
        ));
    }

    #[test]
    fn test_truncated_input_keeps_prefix() {
        let bytes = to_bytes(&sample(), BinaryWidth::Double).unwrap();
        let cut = 4 + 2 * BinaryWidth::Double.vertex_size() + 5;
        let partial = try_from_bytes(&bytes[..cut], BinaryWidth::Double);
        assert_eq!(partial.mesh.vertex_count(), 2);
        assert!(matches!(partial.error, Some(CodecError::UnexpectedEof { .. })));
        assert!(from_bytes(&bytes[..cut], BinaryWidth::Double).is_err());
    }

    #[test]
    fn test_negative_count() {
        let bytes = (-1i32).to_le_bytes();
        let partial = try_from_bytes(&bytes, BinaryWidth::Float);
        assert!(partial.mesh.is_empty());
        assert!(matches!(partial.error, Some(CodecError::NegativeCount { count: -1 })));
    }

    #[test]
    fn test_empty_input_is_eof() {
        assert!(matches!(
            from_bytes(&[], BinaryWidth::Double),
            Err(CodecError::UnexpectedEof { position: 0, needed: 4 })
        ));
    }

    #[test]
    fn test_sparse_ids_survive() {
        let mut mesh = sample();
        mesh.remove_vertex(1);
        mesh.insert_vertex(9, DVec3::ONE);
        let decoded = from_bytes(&to_bytes(&mesh, BinaryWidth::Double).unwrap(), BinaryWidth::Double).unwrap();
        assert!(!decoded.has_vertex(1));
        assert_eq!(decoded.vertex(9), Some(DVec3::ONE));
    }
}
