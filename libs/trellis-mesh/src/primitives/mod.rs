//! # Primitives
//!
//! Closed solids built from the topology operations. Every primitive:
//!
//! - is wound clockwise when viewed from outside
//! - registers its triangles in the style's group, bound to the style's material
//! - emits a wireframe line along every triangle edge it uses (unless the
//!   style disables lines)
//! - returns the ids of the triangles it created

pub mod cube;
pub mod cylinder;
pub mod pyramid;
pub mod sphere;

pub use cube::{basic_cube, create_box, create_cube};
pub use cylinder::{create_cylinder, CylinderParams};
pub use pyramid::{create_pyramid, PyramidBase, PyramidParams};
pub use sphere::create_sphere;

use config::constants::{MeshConfig, DEFAULT_GROUP_NAME, DEFAULT_LINE_COLOR};

use crate::color::Color;
use crate::material::Material;
use crate::mesh::{Mesh, TriangleId};
use crate::ops::add_wireframe;

/// Group, material and wireframe color applied to a primitive's triangles.
///
/// # Example
///
/// ```rust
/// use trellis_mesh::{Color, Material, PrimitiveStyle};
///
/// let style = PrimitiveStyle::new(Material::solid("Hull", Color::BLUE).unwrap())
///     .with_group("Body")
///     .without_lines();
/// assert_eq!(style.group, "Body");
/// assert!(style.line_color.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveStyle {
    pub group: String,
    pub material: Material,
    /// `None` suppresses wireframe emission.
    pub line_color: Option<Color>,
}

impl PrimitiveStyle {
    /// Default group name and white wireframe.
    pub fn new(material: Material) -> Self {
        Self {
            group: DEFAULT_GROUP_NAME.to_string(),
            material,
            line_color: Some(Color::from_array(DEFAULT_LINE_COLOR)),
        }
    }

    /// Style whose wireframe color comes from a [`MeshConfig`].
    pub fn from_config(material: Material, config: &MeshConfig) -> Self {
        Self::new(material).with_line_color(Color::from_array(config.line_color))
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    pub fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = Some(color);
        self
    }

    pub fn without_lines(mut self) -> Self {
        self.line_color = None;
        self
    }

    /// Registers material and group, then emits the wireframe.
    pub(crate) fn apply(&self, mesh: &mut Mesh, tri_ids: &[TriangleId]) {
        mesh.add_material(self.material.clone());
        mesh.add_group(&self.group, &self.material.name)
            .tri_ids
            .extend_from_slice(tri_ids);
        if let Some(color) = self.line_color {
            add_wireframe(mesh, tri_ids, color);
        }
    }
}
