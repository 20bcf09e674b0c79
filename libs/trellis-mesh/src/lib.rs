//! # Trellis Mesh
//!
//! Id-addressed mesh store with procedural construction helpers.
//!
//! ## Architecture
//!
//! ```text
//! arena (ids) → mesh (buffers, materials) → registry (groups)
//!                 ↑
//! ops (basis, rings, ribbons, fans, wireframe) → primitives
//! ```
//!
//! ## Conventions
//!
//! - Ids are append-only per buffer and never reused.
//! - A triangle's front face is the side from which it winds clockwise.
//! - Removal never cascades; see [`Mesh::dangling_references`].
//! - Missing materials, groups and colors resolve to defaults.
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use trellis_mesh::{primitives::create_sphere, Color, Material, Mesh, PrimitiveStyle};
//!
//! let mut mesh = Mesh::new();
//! let style = PrimitiveStyle::new(Material::solid("Chrome", Color::rgb(200, 200, 210)).unwrap())
//!     .with_group("Ball");
//! let triangles = create_sphere(&mut mesh, DVec3::ZERO, 1.0, 8, &style).unwrap();
//! assert_eq!(mesh.group("Ball").unwrap().len(), triangles.len());
//! ```

pub mod arena;
pub mod color;
pub mod color_mesh;
pub mod error;
pub mod material;
pub mod mesh;
pub mod ops;
pub mod primitives;
pub mod registry;

pub use arena::{Arena, Id};
pub use color::Color;
pub use color_mesh::{ColorMesh, ColorTriangle};
pub use error::{MeshError, MeshResult};
pub use material::Material;
pub use mesh::{ColorId, DanglingReference, Line, LineId, Mesh, Triangle, TriangleId, VertexId};
pub use primitives::{basic_cube, PrimitiveStyle};
pub use registry::Group;

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use crate::primitives::{create_cube, create_cylinder, CylinderParams};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scene_with_two_primitives() {
        let mut mesh = Mesh::new();
        let wood = PrimitiveStyle::new(Material::solid("Wood", Color::rgb(120, 80, 40)).unwrap())
            .with_group("Table");
        let steel = PrimitiveStyle::new(Material::solid("Steel", Color::rgb(160, 160, 170)).unwrap())
            .with_group("Legs")
            .without_lines();

        let top = create_cube(&mut mesh, DVec3::Z * 2.0, 1.0, &wood).unwrap();
        let leg = CylinderParams::new(DVec3::ZERO, DVec3::Z * 1.5, 0.1, 6);
        let legs = create_cylinder(&mut mesh, &leg, &steel).unwrap();

        assert_eq!(mesh.triangle_count(), top.len() + legs.len());
        assert_eq!(mesh.line_count(), 18);
        assert_eq!(mesh.materials().len(), 2);
        assert_eq!(mesh.owning_group(legs[0]), Some("Legs"));
        assert!(mesh.dangling_references().is_empty());

        let flat = ColorMesh::from_mesh(&mesh);
        assert_eq!(flat.triangle(top[0]).unwrap().color, Color::rgb(120, 80, 40));
    }

    #[test]
    fn test_variate_then_dissolve_restores_triangles() {
        let mut mesh = Mesh::new();
        let style = PrimitiveStyle::new(Material::solid("Stone", Color::rgb(128, 128, 128)).unwrap());
        let triangles = create_cube(&mut mesh, DVec3::ZERO, 1.0, &style).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        let created = mesh.variate_group(&style.group, 0.1, 3, &mut rng).unwrap();
        for name in &created {
            mesh.dissolve_group(name, &style.group);
        }

        let mut merged = mesh.group(&style.group).unwrap().tri_ids.clone();
        merged.sort_unstable();
        assert_eq!(merged, triangles);
    }
}
