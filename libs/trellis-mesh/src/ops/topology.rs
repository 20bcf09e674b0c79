//! # Ring Topology
//!
//! Circle rings, ribbons between rings, fans from an apex, and quad splits.
//!
//! Rings from [`add_circle_points`] run clockwise around their normal (see
//! [`PlaneBasis`]). Under that orientation `add_fan(.., true)` faces `+normal`
//! and `add_ribbon(far, near)` faces away from the ring axis, where `far` is
//! the ring further along the normal.

use std::f64::consts::TAU;

use config::constants::MIN_RING_SIDES;
use glam::DVec3;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{Mesh, Triangle, TriangleId, VertexId};
use crate::ops::basis::PlaneBasis;

/// Positions of a regular polygon inscribed in the circle of `radius`
/// around `center`, in the plane with the given `normal`.
///
/// Point `i` sits at angle `i * 2π / sides` in the plane basis seeded by
/// `reference`.
///
/// # Errors
///
/// Fails if `sides < 3`, the radius is not positive and finite, or the
/// normal/reference pair cannot form a basis.
pub fn circle_points(
    center: DVec3,
    normal: DVec3,
    radius: f64,
    sides: usize,
    reference: Option<DVec3>,
) -> MeshResult<Vec<DVec3>> {
    if sides < MIN_RING_SIDES {
        return Err(MeshError::too_few_points(sides, MIN_RING_SIDES));
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MeshError::validation(format!(
            "Circle radius must be positive: {radius}"
        )));
    }

    let basis = PlaneBasis::new(center, normal, reference)?;
    let step = TAU / sides as f64;
    Ok((0..sides)
        .map(|i| basis.polar(radius, step * i as f64))
        .collect())
}

/// Adds a ring of `sides` vertices around `center` and returns their ids in
/// angular order.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use trellis_mesh::{ops::add_circle_points, Mesh};
///
/// let mut mesh = Mesh::new();
/// let ring = add_circle_points(&mut mesh, DVec3::ZERO, DVec3::Z, 2.0, 8, None).unwrap();
/// assert_eq!(ring.len(), 8);
/// assert!(add_circle_points(&mut mesh, DVec3::ZERO, DVec3::Z, 2.0, 2, None).is_err());
/// ```
pub fn add_circle_points(
    mesh: &mut Mesh,
    center: DVec3,
    normal: DVec3,
    radius: f64,
    sides: usize,
    reference: Option<DVec3>,
) -> MeshResult<Vec<VertexId>> {
    let points = circle_points(center, normal, radius, sides, reference)?;
    Ok(points.into_iter().map(|p| mesh.add_vertex(p)).collect())
}

/// Joins two rings of equal length with `2 * len` triangles.
///
/// Quad `i` is `ring_a[i], ring_b[i], ring_b[i+1], ring_a[i+1]` (indices
/// wrap), split by [`add_face`].
///
/// # Errors
///
/// Fails if the rings differ in length or hold fewer than 3 points.
pub fn add_ribbon(
    mesh: &mut Mesh,
    ring_a: &[VertexId],
    ring_b: &[VertexId],
) -> MeshResult<Vec<TriangleId>> {
    if ring_a.len() != ring_b.len() {
        return Err(MeshError::MismatchedRings {
            left: ring_a.len(),
            right: ring_b.len(),
        });
    }
    if ring_a.len() < MIN_RING_SIDES {
        return Err(MeshError::too_few_points(ring_a.len(), MIN_RING_SIDES));
    }

    let n = ring_a.len();
    let mut triangles = Vec::with_capacity(n * 2);
    for i in 0..n {
        let j = (i + 1) % n;
        triangles.extend(add_face(mesh, ring_a[i], ring_b[i], ring_b[j], ring_a[j]));
    }
    Ok(triangles)
}

/// Adds one triangle `(apex, ring[i], ring[i+1])` per wrap-around segment.
///
/// With `winding_outward = false` the last two corners are swapped.
///
/// # Errors
///
/// Fails if the ring holds fewer than 3 points.
pub fn add_fan(
    mesh: &mut Mesh,
    apex: VertexId,
    ring: &[VertexId],
    winding_outward: bool,
) -> MeshResult<Vec<TriangleId>> {
    if ring.len() < MIN_RING_SIDES {
        return Err(MeshError::too_few_points(ring.len(), MIN_RING_SIDES));
    }

    let n = ring.len();
    Ok((0..n)
        .map(|i| {
            let (b, c) = (ring[i], ring[(i + 1) % n]);
            let triangle = if winding_outward {
                Triangle::new(apex, b, c)
            } else {
                Triangle::new(apex, c, b)
            };
            mesh.add_triangle(triangle)
        })
        .collect())
}

/// Splits the quad `a, b, c, d` (cyclic order) into `(a, b, c)` and `(a, c, d)`.
pub fn add_face(
    mesh: &mut Mesh,
    a: VertexId,
    b: VertexId,
    c: VertexId,
    d: VertexId,
) -> [TriangleId; 2] {
    [
        mesh.add_triangle(Triangle::new(a, b, c)),
        mesh.add_triangle(Triangle::new(a, c, d)),
    ]
}
