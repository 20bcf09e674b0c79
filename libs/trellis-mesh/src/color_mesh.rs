//! # Color Mesh
//!
//! Flattened mesh variant: positions plus triangles that carry their own
//! color. This is the shape consumed by the binary codec and by renderers
//! that do not resolve materials.

use std::collections::HashMap;

use glam::DVec3;

use crate::arena::Arena;
use crate::color::Color;
use crate::mesh::{Mesh, TriangleId, VertexId};

/// A triangle with an inline color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTriangle {
    pub a: VertexId,
    pub b: VertexId,
    pub c: VertexId,
    pub color: Color,
}

impl ColorTriangle {
    pub fn new(a: VertexId, b: VertexId, c: VertexId, color: Color) -> Self {
        Self { a, b, c, color }
    }

    #[inline]
    pub fn vertices(&self) -> [VertexId; 3] {
        [self.a, self.b, self.c]
    }
}

/// Vertex buffer plus colored triangles, both id-addressed.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use trellis_mesh::{Color, ColorMesh, ColorTriangle};
///
/// let mut mesh = ColorMesh::new();
/// let a = mesh.add_vertex(DVec3::ZERO);
/// let b = mesh.add_vertex(DVec3::X);
/// let c = mesh.add_vertex(DVec3::Y);
/// mesh.add_triangle(ColorTriangle::new(a, b, c, Color::RED));
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorMesh {
    vertices: Arena<DVec3>,
    triangles: Arena<ColorTriangle>,
}

impl ColorMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens a mesh, keeping its vertex and triangle ids.
    ///
    /// Each triangle is painted with the base color of the material bound to
    /// the first group (in name order) that lists it. Ungrouped triangles and
    /// groups with unknown materials get the default material color.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut out = Self::new();
        for (id, &position) in mesh.vertices().iter() {
            out.vertices.insert(id, position);
        }

        let mut painted: HashMap<TriangleId, Color> = HashMap::new();
        for (name, group) in mesh.groups() {
            let color = mesh.group_material(name).base_color;
            for &id in &group.tri_ids {
                painted.entry(id).or_insert(color);
            }
        }

        let fallback = mesh.default_material().base_color;
        for (id, tri) in mesh.triangles().iter() {
            let color = painted.get(&id).copied().unwrap_or(fallback);
            out.triangles
                .insert(id, ColorTriangle::new(tri.a, tri.b, tri.c, color));
        }
        out
    }

    #[inline]
    pub fn vertices(&self) -> &Arena<DVec3> {
        &self.vertices
    }

    #[inline]
    pub fn triangles(&self) -> &Arena<ColorTriangle> {
        &self.triangles
    }

    pub fn add_vertex(&mut self, position: DVec3) -> VertexId {
        self.vertices.push(position)
    }

    pub fn add_triangle(&mut self, triangle: ColorTriangle) -> TriangleId {
        self.triangles.push(triangle)
    }

    /// Stores a vertex under an explicit id (used by decoders).
    pub fn insert_vertex(&mut self, id: VertexId, position: DVec3) -> Option<DVec3> {
        self.vertices.insert(id, position)
    }

    /// Stores a triangle under an explicit id (used by decoders).
    pub fn insert_triangle(&mut self, id: TriangleId, triangle: ColorTriangle) -> Option<ColorTriangle> {
        self.triangles.insert(id, triangle)
    }

    pub fn vertex(&self, id: VertexId) -> Option<DVec3> {
        self.vertices.get(id).copied()
    }

    pub fn triangle(&self, id: TriangleId) -> Option<ColorTriangle> {
        self.triangles.get(id).copied()
    }

    pub fn has_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains(id)
    }

    pub fn has_triangle(&self, id: TriangleId) -> bool {
        self.triangles.contains(id)
    }

    /// Removes a vertex. Triangles referencing it are left in place.
    pub fn remove_vertex(&mut self, id: VertexId) -> Option<DVec3> {
        self.vertices.remove(id)
    }

    pub fn remove_triangle(&mut self, id: TriangleId) -> Option<ColorTriangle> {
        self.triangles.remove(id)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.triangles.is_empty()
    }
}
