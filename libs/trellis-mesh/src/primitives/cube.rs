//! # Cube Primitive
//!
//! Generates mesh for cube and rectangular box shapes.

use glam::DVec3;
use tracing::debug;

use crate::color::Color;
use crate::error::{MeshError, MeshResult};
use crate::material::Material;
use crate::mesh::{Mesh, TriangleId};
use crate::ops::add_face;
use crate::primitives::PrimitiveStyle;

/// Corner quads, indexed by `x + 2y + 4z` (bit set = max side), each listed
/// clockwise as seen from outside the box.
const FACES: [[usize; 4]; 6] = [
    [0, 2, 6, 4], // -x
    [1, 5, 7, 3], // +x
    [0, 4, 5, 1], // -y
    [2, 3, 7, 6], // +y
    [0, 1, 3, 2], // -z
    [4, 6, 7, 5], // +z
];

/// Adds an axis-aligned box centered at `center`.
///
/// # Returns
///
/// The 12 triangle ids (2 per face).
pub fn create_box(
    mesh: &mut Mesh,
    center: DVec3,
    size: DVec3,
    style: &PrimitiveStyle,
) -> MeshResult<Vec<TriangleId>> {
    if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0 {
        return Err(MeshError::validation(format!(
            "Box size must be positive: {size:?}"
        )));
    }

    let half = size / 2.0;
    let (min, max) = (center - half, center + half);

    let corners: Vec<_> = (0..8)
        .map(|i| {
            let pick = |bit: usize, lo: f64, hi: f64| if i & bit == 0 { lo } else { hi };
            mesh.add_vertex(DVec3::new(
                pick(1, min.x, max.x),
                pick(2, min.y, max.y),
                pick(4, min.z, max.z),
            ))
        })
        .collect();

    let mut triangles = Vec::with_capacity(12);
    for [a, b, c, d] in FACES {
        triangles.extend(add_face(mesh, corners[a], corners[b], corners[c], corners[d]));
    }

    style.apply(mesh, &triangles);
    debug!(?center, ?size, group = style.group.as_str(), "created box");
    Ok(triangles)
}

/// Adds a cube with edge length `size` centered at `center`.
pub fn create_cube(
    mesh: &mut Mesh,
    center: DVec3,
    size: f64,
    style: &PrimitiveStyle,
) -> MeshResult<Vec<TriangleId>> {
    create_box(mesh, center, DVec3::splat(size), style)
}

/// Builds a new mesh holding a single cube centered at the origin, in the
/// default group, with wireframe lines in `line_color`.
///
/// # Example
///
/// ```rust
/// use trellis_mesh::{basic_cube, Color, Material};
///
/// let mesh = basic_cube(1.0, &Material::solid("Crate", Color::rgb(150, 100, 50)).unwrap(), Color::WHITE).unwrap();
/// assert_eq!(mesh.vertex_count(), 8);
/// assert_eq!(mesh.triangle_count(), 12);
/// ```
pub fn basic_cube(size: f64, material: &Material, line_color: Color) -> MeshResult<Mesh> {
    let mut mesh = Mesh::new();
    let style = PrimitiveStyle::new(material.clone()).with_line_color(line_color);
    create_cube(&mut mesh, DVec3::ZERO, size, &style)?;
    Ok(mesh)
}
