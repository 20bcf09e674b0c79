//! # Mesh Data Structure
//!
//! Id-addressed mesh store: vertices, colors, wireframe lines, triangles,
//! materials and triangle groups.
//!
//! Every buffer has its own monotonically increasing id counter. Ids are
//! never reused and never renumbered, so they stay valid as external
//! references (JSON keys, group lists) for the lifetime of the mesh.

use std::collections::{BTreeMap, HashMap};

use glam::DVec3;

use crate::arena::{Arena, Id};
use crate::color::Color;
use crate::material::Material;
use crate::registry::Group;

/// Id of an entry in the vertex buffer.
pub type VertexId = Id;
/// Id of an entry in the color buffer.
pub type ColorId = Id;
/// Id of an entry in the line buffer.
pub type LineId = Id;
/// Id of an entry in the triangle buffer.
pub type TriangleId = Id;

/// A wireframe edge between two vertices, drawn in a stored color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Line {
    pub a: VertexId,
    pub b: VertexId,
    pub color: ColorId,
}

impl Line {
    pub const fn new(a: VertexId, b: VertexId, color: ColorId) -> Self {
        Self { a, b, color }
    }
}

/// A triangle referencing three vertex ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub a: VertexId,
    pub b: VertexId,
    pub c: VertexId,
}

impl Triangle {
    pub const fn new(a: VertexId, b: VertexId, c: VertexId) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub const fn vertices(&self) -> [VertexId; 3] {
        [self.a, self.b, self.c]
    }

    /// The three directed edges in winding order.
    pub const fn edges(&self) -> [(VertexId, VertexId); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }
}

/// A stored id that points at an entry which no longer exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DanglingReference {
    /// A triangle corner references a missing vertex.
    TriangleVertex { triangle: TriangleId, vertex: VertexId },
    /// A line end references a missing vertex.
    LineVertex { line: LineId, vertex: VertexId },
    /// A line references a missing color.
    LineColor { line: LineId, color: ColorId },
    /// A group lists a missing triangle.
    GroupTriangle { group: String, triangle: TriangleId },
}

/// An id-addressed triangle mesh with wireframe lines, materials and groups.
///
/// Removal is non-cascading: removing a vertex that a triangle or line still
/// references leaves a dangling id behind. Use
/// [`Mesh::dangling_references`] to audit a mesh after removals.
///
/// # Example
///
/// ```rust
/// use trellis_mesh::{Mesh, Triangle};
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// let a = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// let t = mesh.add_triangle(Triangle::new(a, b, c));
/// assert_eq!(t, 0);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Arena<DVec3>,
    colors: Arena<Color>,
    lines: Arena<Line>,
    triangles: Arena<Triangle>,
    /// Insertion-ordered; names are unique case-insensitively.
    pub(crate) materials: Vec<Material>,
    pub(crate) groups: BTreeMap<String, Group>,
    fallback: Material,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Arena::new(),
            colors: Arena::new(),
            lines: Arena::new(),
            triangles: Arena::new(),
            materials: Vec::new(),
            groups: BTreeMap::new(),
            fallback: Material::fallback(),
        }
    }

    // =========================================================================
    // BUFFER ACCESS
    // =========================================================================

    #[inline]
    pub fn vertices(&self) -> &Arena<DVec3> {
        &self.vertices
    }

    #[inline]
    pub fn vertices_mut(&mut self) -> &mut Arena<DVec3> {
        &mut self.vertices
    }

    #[inline]
    pub fn colors(&self) -> &Arena<Color> {
        &self.colors
    }

    #[inline]
    pub fn colors_mut(&mut self) -> &mut Arena<Color> {
        &mut self.colors
    }

    #[inline]
    pub fn lines(&self) -> &Arena<Line> {
        &self.lines
    }

    #[inline]
    pub fn lines_mut(&mut self) -> &mut Arena<Line> {
        &mut self.lines
    }

    #[inline]
    pub fn triangles(&self) -> &Arena<Triangle> {
        &self.triangles
    }

    #[inline]
    pub fn triangles_mut(&mut self) -> &mut Arena<Triangle> {
        &mut self.triangles
    }

    // =========================================================================
    // ADD / GET / REMOVE
    // =========================================================================

    /// Adds a vertex and returns its id.
    pub fn add_vertex(&mut self, position: DVec3) -> VertexId {
        self.vertices.push(position)
    }

    /// Adds a color and returns its id.
    pub fn add_color(&mut self, color: Color) -> ColorId {
        self.colors.push(color)
    }

    /// Adds a line and returns its id.
    pub fn add_line(&mut self, line: Line) -> LineId {
        self.lines.push(line)
    }

    /// Adds a triangle and returns its id.
    pub fn add_triangle(&mut self, triangle: Triangle) -> TriangleId {
        self.triangles.push(triangle)
    }

    /// Stores a vertex under an explicit id, as decoders do. Later adds
    /// continue past the largest id inserted.
    pub fn insert_vertex(&mut self, id: VertexId, position: DVec3) -> Option<DVec3> {
        self.vertices.insert(id, position)
    }

    pub fn insert_color(&mut self, id: ColorId, color: Color) -> Option<Color> {
        self.colors.insert(id, color)
    }

    pub fn insert_line(&mut self, id: LineId, line: Line) -> Option<Line> {
        self.lines.insert(id, line)
    }

    pub fn insert_triangle(&mut self, id: TriangleId, triangle: Triangle) -> Option<Triangle> {
        self.triangles.insert(id, triangle)
    }

    #[inline]
    pub fn has_vertex(&self, id: VertexId) -> bool {
        self.vertices.contains(id)
    }

    #[inline]
    pub fn has_color(&self, id: ColorId) -> bool {
        self.colors.contains(id)
    }

    #[inline]
    pub fn has_line(&self, id: LineId) -> bool {
        self.lines.contains(id)
    }

    #[inline]
    pub fn has_triangle(&self, id: TriangleId) -> bool {
        self.triangles.contains(id)
    }

    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<DVec3> {
        self.vertices.get(id).copied()
    }

    #[inline]
    pub fn color(&self, id: ColorId) -> Option<Color> {
        self.colors.get(id).copied()
    }

    #[inline]
    pub fn line(&self, id: LineId) -> Option<Line> {
        self.lines.get(id).copied()
    }

    #[inline]
    pub fn triangle(&self, id: TriangleId) -> Option<Triangle> {
        self.triangles.get(id).copied()
    }

    /// Color of a line, or white when the color id is missing.
    pub fn line_color(&self, line: &Line) -> Color {
        self.color(line.color).unwrap_or(Color::WHITE)
    }

    /// Positions of a triangle's corners, if all three vertices exist.
    pub fn triangle_positions(&self, triangle: &Triangle) -> Option<[DVec3; 3]> {
        Some([
            self.vertex(triangle.a)?,
            self.vertex(triangle.b)?,
            self.vertex(triangle.c)?,
        ])
    }

    pub fn remove_vertex(&mut self, id: VertexId) -> Option<DVec3> {
        self.vertices.remove(id)
    }

    pub fn remove_color(&mut self, id: ColorId) -> Option<Color> {
        self.colors.remove(id)
    }

    pub fn remove_line(&mut self, id: LineId) -> Option<Line> {
        self.lines.remove(id)
    }

    /// Removes a triangle. Group lists that mention it keep the stale id.
    pub fn remove_triangle(&mut self, id: TriangleId) -> Option<Triangle> {
        self.triangles.remove(id)
    }

    // =========================================================================
    // MATERIALS
    // =========================================================================

    /// Adds a material unless one with the same name (case-insensitive)
    /// already exists. Returns true if the material was stored.
    pub fn add_material(&mut self, material: Material) -> bool {
        if self.find_material(&material.name).is_some() {
            return false;
        }
        self.materials.push(material);
        true
    }

    /// First material whose name matches case-insensitively.
    pub fn find_material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name_matches(name))
    }

    pub fn find_material_mut(&mut self, name: &str) -> Option<&mut Material> {
        self.materials.iter_mut().find(|m| m.name_matches(name))
    }

    /// Material lookup that never fails: misses resolve to
    /// [`Material::fallback`].
    pub fn material(&self, name: &str) -> &Material {
        self.find_material(name).unwrap_or(&self.fallback)
    }

    /// The material used for unresolved lookups.
    #[inline]
    pub fn default_material(&self) -> &Material {
        &self.fallback
    }

    #[inline]
    pub fn has_material(&self, name: &str) -> bool {
        self.find_material(name).is_some()
    }

    /// Materials in insertion order.
    #[inline]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the mesh holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` when empty.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let mut positions = self.vertices.iter().map(|(_, p)| *p);
        let first = positions.next()?;
        Some(positions.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }

    /// Translates every vertex by `offset`.
    pub fn translate(&mut self, offset: DVec3) {
        for v in self.vertices.values_mut() {
            *v += offset;
        }
    }

    /// Lists every stored id that points at a missing entry.
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();

        for (id, tri) in self.triangles.iter() {
            for vertex in tri.vertices() {
                if !self.vertices.contains(vertex) {
                    dangling.push(DanglingReference::TriangleVertex { triangle: id, vertex });
                }
            }
        }

        for (id, line) in self.lines.iter() {
            for vertex in [line.a, line.b] {
                if !self.vertices.contains(vertex) {
                    dangling.push(DanglingReference::LineVertex { line: id, vertex });
                }
            }
            if !self.colors.contains(line.color) {
                dangling.push(DanglingReference::LineColor {
                    line: id,
                    color: line.color,
                });
            }
        }

        for (name, group) in &self.groups {
            for &triangle in &group.tri_ids {
                if !self.triangles.contains(triangle) {
                    dangling.push(DanglingReference::GroupTriangle {
                        group: name.clone(),
                        triangle,
                    });
                }
            }
        }

        dangling
    }

    /// Appends another mesh. Every element of `other` receives a fresh id in
    /// this mesh and all references are rewritten accordingly. Materials
    /// follow first-match-wins; groups with the same name are concatenated.
    ///
    /// References in `other` that already dangle are carried over unchanged.
    pub fn merge(&mut self, other: &Mesh) {
        let mut vertex_map: HashMap<VertexId, VertexId> = HashMap::new();
        for (id, position) in other.vertices.iter() {
            vertex_map.insert(id, self.vertices.push(*position));
        }

        let mut color_map: HashMap<ColorId, ColorId> = HashMap::new();
        for (id, color) in other.colors.iter() {
            color_map.insert(id, self.colors.push(*color));
        }

        let vertex = |id: VertexId| vertex_map.get(&id).copied().unwrap_or(id);
        let color = |id: ColorId| color_map.get(&id).copied().unwrap_or(id);

        for (_, line) in other.lines.iter() {
            self.lines
                .push(Line::new(vertex(line.a), vertex(line.b), color(line.color)));
        }

        let mut triangle_map: HashMap<TriangleId, TriangleId> = HashMap::new();
        for (id, tri) in other.triangles.iter() {
            let new_id = self
                .triangles
                .push(Triangle::new(vertex(tri.a), vertex(tri.b), vertex(tri.c)));
            triangle_map.insert(id, new_id);
        }

        for material in &other.materials {
            self.add_material(material.clone());
        }

        for (name, group) in &other.groups {
            let target = self
                .groups
                .entry(name.clone())
                .or_insert_with(|| Group::new(group.material_name.clone()));
            target.tri_ids.extend(
                group
                    .tri_ids
                    .iter()
                    .map(|id| triangle_map.get(id).copied().unwrap_or(*id)),
            );
        }
    }
}
