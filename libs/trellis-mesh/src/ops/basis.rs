//! # Plane Basis
//!
//! Orthonormal frames for embedding 2D coordinates in 3D, plus the winding
//! convention shared by every builder.
//!
//! ## Winding
//!
//! A triangle's front face is the side from which its corners appear
//! clockwise. A [`PlaneBasis`] is oriented so that increasing angle runs
//! clockwise when viewed from the `+normal` side, which makes every ring it
//! produces clockwise around its normal.

use config::constants::EPSILON;
use glam::{DVec2, DVec3};

use crate::error::{MeshError, MeshResult};

/// An orthonormal frame: `x` and `y` span the plane, `normal` leaves it.
///
/// `x = normal × y`, so `x × y = -normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneBasis {
    pub origin: DVec3,
    pub x: DVec3,
    pub y: DVec3,
    pub normal: DVec3,
}

impl PlaneBasis {
    /// Builds a frame around `normal`.
    ///
    /// `reference`, when given, seeds the in-plane `y` axis (it is
    /// orthogonalized against the normal). Otherwise the standard axis least
    /// parallel to the normal is used.
    ///
    /// # Errors
    ///
    /// Fails on a zero-length or non-finite normal, or a reference direction
    /// parallel to the normal.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use trellis_mesh::ops::PlaneBasis;
    ///
    /// let basis = PlaneBasis::new(DVec3::ZERO, DVec3::Z, Some(DVec3::Y)).unwrap();
    /// assert_eq!(basis.y, DVec3::Y);
    /// assert_eq!(basis.x, DVec3::new(-1.0, 0.0, 0.0));
    /// ```
    pub fn new(origin: DVec3, normal: DVec3, reference: Option<DVec3>) -> MeshResult<Self> {
        if !normal.is_finite() || normal.length() < EPSILON {
            return Err(MeshError::validation(format!(
                "Plane normal must be a finite non-zero vector: {normal:?}"
            )));
        }
        let normal = normal.normalize();

        let seed = reference.unwrap_or_else(|| least_parallel_axis(normal));
        if !seed.is_finite() {
            return Err(MeshError::validation(format!(
                "Reference direction must be finite: {seed:?}"
            )));
        }
        let y = seed - normal * seed.dot(normal);
        if y.length() < EPSILON {
            return Err(MeshError::validation(format!(
                "Reference direction {seed:?} is parallel to the normal {normal:?}"
            )));
        }
        let y = y.normalize();
        let x = normal.cross(y);

        Ok(Self {
            origin,
            x,
            y,
            normal,
        })
    }

    /// Planar projection of `(u, v)` into 3D.
    #[inline]
    pub fn project(&self, u: f64, v: f64) -> DVec3 {
        self.origin + self.x * u + self.y * v
    }

    /// Point at `radius` and `angle` (radians) from the origin, in the plane.
    #[inline]
    pub fn polar(&self, radius: f64, angle: f64) -> DVec3 {
        let (sin, cos) = angle.sin_cos();
        self.project(radius * cos, radius * sin)
    }

    /// In-plane coordinates of `point` (its offset along the normal is dropped).
    pub fn unproject(&self, point: DVec3) -> DVec2 {
        let offset = point - self.origin;
        DVec2::new(offset.dot(self.x), offset.dot(self.y))
    }

    /// Signed distance of `point` from the plane along the normal.
    #[inline]
    pub fn height(&self, point: DVec3) -> f64 {
        (point - self.origin).dot(self.normal)
    }
}

/// Standard basis vector with the smallest absolute dot product against `n`.
fn least_parallel_axis(n: DVec3) -> DVec3 {
    let abs = n.abs();
    if abs.x <= abs.y && abs.x <= abs.z {
        DVec3::X
    } else if abs.y <= abs.z {
        DVec3::Y
    } else {
        DVec3::Z
    }
}

/// Spherical projection: `polar` is measured from `+Z`, `azimuth` about
/// `+Z` starting at `+X` (counter-clockwise seen from `+Z`).
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use trellis_mesh::ops::spherical_point;
///
/// let north = spherical_point(DVec3::ZERO, 2.0, 0.0, 1.0);
/// assert!((north - DVec3::new(0.0, 0.0, 2.0)).length() < 1e-12);
/// ```
pub fn spherical_point(center: DVec3, radius: f64, polar: f64, azimuth: f64) -> DVec3 {
    let (sin_p, cos_p) = polar.sin_cos();
    let (sin_a, cos_a) = azimuth.sin_cos();
    center + DVec3::new(sin_p * cos_a, sin_p * sin_a, cos_p) * radius
}

/// Unit normal of the triangle's front face (the side from which `a, b, c`
/// appear clockwise). Degenerate triangles yield `DVec3::ZERO`.
pub fn front_normal(a: DVec3, b: DVec3, c: DVec3) -> DVec3 {
    (c - a).cross(b - a).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_basis_is_orthonormal() {
        let basis = PlaneBasis::new(DVec3::ONE, DVec3::new(1.0, 2.0, 3.0), None).unwrap();
        assert_relative_eq!(basis.x.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(basis.y.length(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(basis.x.dot(basis.y), 0.0, epsilon = 1e-12);
        assert_relative_eq!(basis.x.dot(basis.normal), 0.0, epsilon = 1e-12);
        assert_relative_eq!(basis.y.dot(basis.normal), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_basis_is_clockwise_about_normal() {
        let basis = PlaneBasis::new(DVec3::ZERO, DVec3::Z, None).unwrap();
        assert_relative_eq!(basis.x.cross(basis.y).dot(basis.normal), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_reference_is_orthogonalized() {
        let basis = PlaneBasis::new(DVec3::ZERO, DVec3::Z, Some(DVec3::new(0.0, 1.0, 1.0))).unwrap();
        assert_relative_eq!(basis.y.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(basis.y.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(basis.y.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_basis_rejects_degenerate_input() {
        assert!(PlaneBasis::new(DVec3::ZERO, DVec3::ZERO, None).is_err());
        assert!(PlaneBasis::new(DVec3::ZERO, DVec3::Z, Some(DVec3::Z * 3.0)).is_err());
        assert!(PlaneBasis::new(DVec3::ZERO, DVec3::splat(f64::NAN), None).is_err());
    }

    #[test]
    fn test_project_unproject() {
        let basis = PlaneBasis::new(DVec3::new(1.0, 2.0, 3.0), DVec3::X, None).unwrap();
        let p = basis.project(0.5, -2.0);
        let uv = basis.unproject(p);
        assert_relative_eq!(uv.x, 0.5, epsilon = 1e-12);
        assert_relative_eq!(uv.y, -2.0, epsilon = 1e-12);
        assert_relative_eq!(basis.height(p), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_spherical_equator() {
        let p = spherical_point(DVec3::ZERO, 1.0, FRAC_PI_2, FRAC_PI_2);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 1.0, epsilon = 1e-12);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_front_normal_is_clockwise_side() {
        // Clockwise seen from +Z
        let n = front_normal(DVec3::ZERO, DVec3::Y, DVec3::X);
        assert_eq!(n, DVec3::Z);
        assert_eq!(front_normal(DVec3::ZERO, DVec3::X, DVec3::X * 2.0), DVec3::ZERO);
    }
}
