//! # Sphere Primitive
//!
//! Generates a UV sphere: two pole vertices joined by `segments - 1`
//! latitude rings of `2 * segments` vertices each.

use std::f64::consts::PI;

use config::constants::MIN_SPHERE_SEGMENTS;
use glam::DVec3;
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{Mesh, TriangleId, VertexId};
use crate::ops::{add_fan, add_ribbon, spherical_point};
use crate::primitives::PrimitiveStyle;

/// Adds a sphere with its poles on the Z axis through `center`.
///
/// `segments` is the number of latitude bands; each ring holds twice as many
/// vertices so the quads stay roughly square.
///
/// # Returns
///
/// `4 * segments * (segments - 1)` triangle ids.
///
/// # Errors
///
/// Fails if the radius is not positive and finite, or `segments < 2`.
pub fn create_sphere(
    mesh: &mut Mesh,
    center: DVec3,
    radius: f64,
    segments: usize,
    style: &PrimitiveStyle,
) -> MeshResult<Vec<TriangleId>> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MeshError::validation(format!(
            "Sphere radius must be positive: {radius}"
        )));
    }
    if segments < MIN_SPHERE_SEGMENTS {
        return Err(MeshError::too_few_points(segments, MIN_SPHERE_SEGMENTS));
    }

    let longitudes = segments * 2;
    let step = PI / segments as f64;

    let top = mesh.add_vertex(center + DVec3::Z * radius);
    // Azimuth decreases so each ring runs clockwise seen from +Z.
    let rings: Vec<Vec<VertexId>> = (1..segments)
        .map(|k| {
            let polar = step * k as f64;
            (0..longitudes)
                .map(|j| mesh.add_vertex(spherical_point(center, radius, polar, -step * j as f64)))
                .collect()
        })
        .collect();
    let bottom = mesh.add_vertex(center - DVec3::Z * radius);

    let mut triangles = Vec::with_capacity(4 * segments * (segments - 1));
    if let (Some(first), Some(last)) = (rings.first(), rings.last()) {
        triangles.extend(add_fan(mesh, top, first, true)?);
        for pair in rings.windows(2) {
            triangles.extend(add_ribbon(mesh, &pair[0], &pair[1])?);
        }
        triangles.extend(add_fan(mesh, bottom, last, false)?);
    }

    style.apply(mesh, &triangles);
    debug!(?center, radius, segments, triangles = triangles.len(), "created sphere");
    Ok(triangles)
}
