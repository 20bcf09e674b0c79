//! # Pyramid Primitive
//!
//! Generates pyramids over a rectangular or regular polygonal base.

use config::constants::EPSILON;
use glam::DVec3;
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::mesh::{Mesh, TriangleId};
use crate::ops::{add_face, add_fan, circle_points, PlaneBasis};
use crate::primitives::PrimitiveStyle;

/// Footprint of a pyramid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PyramidBase {
    /// `width` runs along the basis `x` axis, `depth` along `y`.
    Rectangle { width: f64, depth: f64 },
    /// Regular polygon inscribed in a circle of `radius`.
    Polygon { radius: f64, sides: usize },
}

/// Parameters for [`create_pyramid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PyramidParams {
    pub base_center: DVec3,
    /// Direction from the base toward the apex.
    pub normal: DVec3,
    pub height: f64,
    pub base: PyramidBase,
    /// Seeds the in-plane `y` axis of the base.
    pub reference: Option<DVec3>,
    /// Emit the base faces.
    pub closed: bool,
}

impl PyramidParams {
    /// A closed pyramid standing on the XY plane and pointing up +Z.
    pub fn new(base_center: DVec3, height: f64, base: PyramidBase) -> Self {
        Self {
            base_center,
            normal: DVec3::Z,
            height,
            base,
            reference: None,
            closed: true,
        }
    }

    pub fn with_normal(mut self, normal: DVec3) -> Self {
        self.normal = normal;
        self
    }

    pub fn with_reference(mut self, reference: DVec3) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn open(mut self) -> Self {
        self.closed = false;
        self
    }

    pub fn apex(&self) -> DVec3 {
        self.base_center + self.normal.normalize_or_zero() * self.height
    }
}

/// Adds a pyramid whose apex sits `height` above the base along `normal`.
///
/// # Returns
///
/// One side triangle per base edge, followed by the base triangles when the
/// pyramid is closed (2 for a rectangle, `sides` for a polygon).
///
/// # Errors
///
/// Fails on a non-positive height or base dimension, fewer than 3 polygon
/// sides, or a normal/reference pair that cannot form a basis. Nothing is
/// added to the mesh on failure.
pub fn create_pyramid(
    mesh: &mut Mesh,
    params: &PyramidParams,
    style: &PrimitiveStyle,
) -> MeshResult<Vec<TriangleId>> {
    if !params.height.is_finite() || params.height < EPSILON {
        return Err(MeshError::validation(format!(
            "Pyramid height must be positive: {}",
            params.height
        )));
    }

    let basis = PlaneBasis::new(params.base_center, params.normal, params.reference)?;
    let corners = match params.base {
        PyramidBase::Rectangle { width, depth } => {
            if !(width.is_finite() && depth.is_finite()) || width <= 0.0 || depth <= 0.0 {
                return Err(MeshError::validation(format!(
                    "Pyramid base must have positive size: {width} x {depth}"
                )));
            }
            let (hw, hd) = (width / 2.0, depth / 2.0);
            // Increasing angle in the basis, so clockwise from the apex side.
            vec![
                basis.project(hw, hd),
                basis.project(-hw, hd),
                basis.project(-hw, -hd),
                basis.project(hw, -hd),
            ]
        }
        PyramidBase::Polygon { radius, sides } => circle_points(
            params.base_center,
            basis.normal,
            radius,
            sides,
            params.reference,
        )?,
    };

    let ring: Vec<_> = corners.into_iter().map(|p| mesh.add_vertex(p)).collect();
    let apex = mesh.add_vertex(params.base_center + basis.normal * params.height);

    let mut triangles = add_fan(mesh, apex, &ring, true)?;
    if params.closed {
        match params.base {
            PyramidBase::Rectangle { .. } => {
                triangles.extend(add_face(mesh, ring[3], ring[2], ring[1], ring[0]));
            }
            PyramidBase::Polygon { .. } => {
                let center = mesh.add_vertex(params.base_center);
                triangles.extend(add_fan(mesh, center, &ring, false)?);
            }
        }
    }

    style.apply(mesh, &triangles);
    debug!(
        base = ?params.base,
        height = params.height,
        closed = params.closed,
        "created pyramid"
    );
    Ok(triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::material::Material;
    use crate::primitives::test_support::{assert_closed_wireframe, assert_faces_outward};
    use approx::assert_relative_eq;

    fn style() -> PrimitiveStyle {
        PrimitiveStyle::new(Material::solid("Sandstone", Color::rgb(220, 190, 120)).unwrap())
    }

    #[test]
    fn test_rectangular_pyramid() {
        let mut mesh = Mesh::new();
        let params = PyramidParams::new(
            DVec3::ZERO,
            3.0,
            PyramidBase::Rectangle { width: 4.0, depth: 2.0 },
        );
        let triangles = create_pyramid(&mut mesh, &params, &style()).unwrap();
        assert_eq!(mesh.vertex_count(), 5);
        assert_eq!(triangles.len(), 6);
        assert_closed_wireframe(&mesh);
        assert_faces_outward(&mesh, &triangles, DVec3::Z * 0.75);

        let (min, max) = mesh.bounding_box().unwrap();
        assert_relative_eq!(max.z, 3.0);
        assert_relative_eq!(min.z, 0.0);
        // width follows the basis x axis, which is +Y for a +Z normal
        assert_relative_eq!(max.y - min.y, 4.0, epsilon = 1e-12);
        assert_relative_eq!(max.x - min.x, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_polygon_pyramid() {
        let mut mesh = Mesh::new();
        let params = PyramidParams::new(
            DVec3::new(1.0, 1.0, 1.0),
            2.0,
            PyramidBase::Polygon { radius: 1.0, sides: 7 },
        )
        .with_normal(DVec3::new(1.0, 1.0, 0.0));
        let triangles = create_pyramid(&mut mesh, &params, &style()).unwrap();
        assert_eq!(mesh.vertex_count(), 7 + 2);
        assert_eq!(triangles.len(), 14);
        assert_closed_wireframe(&mesh);

        let interior = params.base_center + DVec3::new(1.0, 1.0, 0.0).normalize() * 0.5;
        assert_faces_outward(&mesh, &triangles, interior);
        assert_relative_eq!(
            mesh.vertex(7).unwrap().distance(params.apex()),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_open_pyramid() {
        let mut mesh = Mesh::new();
        let params = PyramidParams::new(
            DVec3::ZERO,
            1.0,
            PyramidBase::Rectangle { width: 1.0, depth: 1.0 },
        )
        .open();
        let triangles = create_pyramid(&mut mesh, &params, &style()).unwrap();
        assert_eq!(triangles.len(), 4);
        assert_eq!(mesh.line_count(), 8);
    }

    #[test]
    fn test_pyramid_invalid() {
        let mut mesh = Mesh::new();
        let flat = PyramidParams::new(
            DVec3::ZERO,
            0.0,
            PyramidBase::Rectangle { width: 1.0, depth: 1.0 },
        );
        assert!(create_pyramid(&mut mesh, &flat, &style()).is_err());

        let triangle_base =
            PyramidParams::new(DVec3::ZERO, 1.0, PyramidBase::Polygon { radius: 1.0, sides: 2 });
        assert!(create_pyramid(&mut mesh, &triangle_base, &style()).is_err());

        let thin = PyramidParams::new(
            DVec3::ZERO,
            1.0,
            PyramidBase::Rectangle { width: 1.0, depth: -1.0 },
        );
        assert!(create_pyramid(&mut mesh, &thin, &style()).is_err());

        let no_normal = thin.with_normal(DVec3::ZERO);
        assert!(create_pyramid(&mut mesh, &no_normal, &style()).is_err());
        assert!(mesh.is_empty());
    }
}
