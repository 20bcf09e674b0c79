//! # Wireframe
//!
//! Emits one line per distinct undirected edge of a set of triangles.

use std::collections::HashSet;

use crate::color::Color;
use crate::mesh::{Line, LineId, Mesh, TriangleId, VertexId};

/// Adds `color` once, then one line for every edge used by `triangles`.
///
/// Edges shared by neighbouring triangles are emitted a single time, in the
/// order they are first met. Missing triangle ids are ignored.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use trellis_mesh::{ops::{add_face, add_wireframe}, Color, Mesh};
///
/// let mut mesh = Mesh::new();
/// for p in [DVec3::ZERO, DVec3::X, DVec3::ONE, DVec3::Y] {
///     mesh.add_vertex(p);
/// }
/// let quad = add_face(&mut mesh, 0, 1, 2, 3);
/// let lines = add_wireframe(&mut mesh, &quad, Color::WHITE);
/// assert_eq!(lines.len(), 5); // four sides plus the diagonal
/// ```
pub fn add_wireframe(mesh: &mut Mesh, triangles: &[TriangleId], color: Color) -> Vec<LineId> {
    let color_id = mesh.add_color(color);
    let mut seen: HashSet<(VertexId, VertexId)> = HashSet::new();
    let mut edges = Vec::new();

    for &id in triangles {
        let Some(tri) = mesh.triangle(id) else {
            continue;
        };
        for (a, b) in tri.edges() {
            if seen.insert((a.min(b), a.max(b))) {
                edges.push((a, b));
            }
        }
    }

    edges
        .into_iter()
        .map(|(a, b)| mesh.add_line(Line::new(a, b, color_id)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;

    #[test]
    fn test_shared_edges_emitted_once() {
        let mut mesh = Mesh::new();
        let t0 = mesh.add_triangle(Triangle::new(0, 1, 2));
        let t1 = mesh.add_triangle(Triangle::new(2, 1, 3));
        let lines = add_wireframe(&mut mesh, &[t0, t1], Color::RED);
        assert_eq!(lines.len(), 5);
        assert_eq!(mesh.colors().len(), 1);
        for id in lines {
            assert_eq!(mesh.line(id).unwrap().color, 0);
        }
    }

    #[test]
    fn test_missing_triangles_are_skipped() {
        let mut mesh = Mesh::new();
        assert!(add_wireframe(&mut mesh, &[3, 4], Color::RED).is_empty());
    }
}
