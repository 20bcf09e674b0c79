//! # Cylinder Primitive
//!
//! Generates cylinders and frustums between two arbitrary end points.

use config::constants::{MeshConfig, DEFAULT_SEGMENTS, EPSILON};
use glam::DVec3;
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{Mesh, TriangleId};
use crate::ops::{add_fan, add_ribbon, circle_points};
use crate::primitives::PrimitiveStyle;

/// Parameters for [`create_cylinder`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderParams {
    pub start: DVec3,
    pub end: DVec3,
    pub start_radius: f64,
    pub end_radius: f64,
    pub sides: usize,
    /// Close both ends with triangle fans.
    pub caps: bool,
    /// In-plane direction of the first ring vertex.
    pub reference: Option<DVec3>,
}

impl CylinderParams {
    /// A capped cylinder of constant radius.
    pub fn new(start: DVec3, end: DVec3, radius: f64, sides: usize) -> Self {
        Self {
            start,
            end,
            start_radius: radius,
            end_radius: radius,
            sides,
            caps: true,
            reference: None,
        }
    }

    /// Capped cylinder with `DEFAULT_SEGMENTS` sides.
    pub fn between(start: DVec3, end: DVec3, radius: f64) -> Self {
        Self::new(start, end, radius, DEFAULT_SEGMENTS)
    }

    /// Capped cylinder using the configured segment count.
    pub fn from_config(start: DVec3, end: DVec3, radius: f64, config: &MeshConfig) -> Self {
        Self::new(start, end, radius, config.default_segments)
    }

    /// Tapers the cylinder into a frustum.
    pub fn with_radii(mut self, start_radius: f64, end_radius: f64) -> Self {
        self.start_radius = start_radius;
        self.end_radius = end_radius;
        self
    }

    pub fn with_reference(mut self, reference: DVec3) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn without_caps(mut self) -> Self {
        self.caps = false;
        self
    }
}

/// Adds a cylinder (or frustum) whose axis runs from `params.start` to
/// `params.end`.
///
/// # Returns
///
/// `2 * sides` side triangles, followed by `2 * sides` cap triangles when
/// caps are enabled.
///
/// # Errors
///
/// Fails on a degenerate axis, a non-positive radius, or fewer than 3 sides.
/// Nothing is added to the mesh on failure.
pub fn create_cylinder(
    mesh: &mut Mesh,
    params: &CylinderParams,
    style: &PrimitiveStyle,
) -> MeshResult<Vec<TriangleId>> {
    let axis = params.end - params.start;
    if !axis.is_finite() || axis.length() < EPSILON {
        return Err(MeshError::validation(format!(
            "Cylinder axis must have non-zero length: {:?} -> {:?}",
            params.start, params.end
        )));
    }

    let start_points = circle_points(
        params.start,
        axis,
        params.start_radius,
        params.sides,
        params.reference,
    )?;
    let end_points = circle_points(
        params.end,
        axis,
        params.end_radius,
        params.sides,
        params.reference,
    )?;

    let start_ring: Vec<_> = start_points.into_iter().map(|p| mesh.add_vertex(p)).collect();
    let end_ring: Vec<_> = end_points.into_iter().map(|p| mesh.add_vertex(p)).collect();

    let mut triangles = add_ribbon(mesh, &end_ring, &start_ring)?;
    if params.caps {
        let start_center = mesh.add_vertex(params.start);
        triangles.extend(add_fan(mesh, start_center, &start_ring, false)?);
        let end_center = mesh.add_vertex(params.end);
        triangles.extend(add_fan(mesh, end_center, &end_ring, true)?);
    }

    style.apply(mesh, &triangles);
    debug!(
        start = ?params.start,
        end = ?params.end,
        sides = params.sides,
        caps = params.caps,
        "created cylinder"
    );
    Ok(triangles)
}
