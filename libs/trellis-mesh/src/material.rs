//! # Material
//!
//! Named PBR-style surface description referenced by groups.

use crate::color::Color;
use crate::error::{MeshError, MeshResult};
use config::constants::{
    DEFAULT_BASE_COLOR, DEFAULT_MATERIAL_NAME, DEFAULT_METALLIC, DEFAULT_ROUGHNESS,
};

/// A named material: base color, metallic and roughness factors, and an
/// optional texture file name.
///
/// Names are compared case-insensitively when materials are stored in a mesh.
///
/// # Example
///
/// ```rust
/// use trellis_mesh::{Color, Material};
///
/// let steel = Material::new("Steel", Color::rgb(160, 160, 170), 0.9, 0.3).unwrap();
/// assert!(steel.name_matches("steel"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: Color,
    /// Metallic factor in `[0, 1]`.
    pub metallic: f32,
    /// Roughness factor in `[0, 1]`.
    pub roughness: f32,
    pub texture: Option<String>,
}

impl Material {
    /// Creates a material, validating the name and factor ranges.
    pub fn new(
        name: impl Into<String>,
        base_color: Color,
        metallic: f32,
        roughness: f32,
    ) -> MeshResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(MeshError::validation("Material name must not be empty"));
        }
        if !(0.0..=1.0).contains(&metallic) {
            return Err(MeshError::validation(format!(
                "Material metallic must be in [0, 1]: {metallic}"
            )));
        }
        if !(0.0..=1.0).contains(&roughness) {
            return Err(MeshError::validation(format!(
                "Material roughness must be in [0, 1]: {roughness}"
            )));
        }
        Ok(Self {
            name,
            base_color,
            metallic,
            roughness,
            texture: None,
        })
    }

    /// Opaque, non-metallic material of the given color.
    pub fn solid(name: impl Into<String>, base_color: Color) -> MeshResult<Self> {
        Self::new(name, base_color, DEFAULT_METALLIC, DEFAULT_ROUGHNESS)
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }

    /// The sentinel returned by lookups that find no material.
    pub fn fallback() -> Self {
        Self {
            name: DEFAULT_MATERIAL_NAME.to_string(),
            base_color: Color::from_array(DEFAULT_BASE_COLOR),
            metallic: DEFAULT_METALLIC,
            roughness: DEFAULT_ROUGHNESS,
            texture: None,
        }
    }

    /// Case-insensitive name comparison.
    pub fn name_matches(&self, name: &str) -> bool {
        names_match(&self.name, name)
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Case-insensitive name equality used for material uniqueness.
pub fn names_match(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        a.eq_ignore_ascii_case(b)
    } else {
        a.to_lowercase() == b.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_validates_ranges() {
        assert!(Material::new("a", Color::WHITE, 1.5, 0.5).is_err());
        assert!(Material::new("a", Color::WHITE, 0.5, -0.1).is_err());
        assert!(Material::new("  ", Color::WHITE, 0.5, 0.5).is_err());
        assert!(Material::new("a", Color::WHITE, 0.0, 1.0).is_ok());
    }

    #[test]
    fn test_fallback_uses_config_defaults() {
        let fallback = Material::fallback();
        assert_eq!(fallback.name, DEFAULT_MATERIAL_NAME);
        assert_eq!(fallback.base_color.to_array(), DEFAULT_BASE_COLOR);
    }

    #[test]
    fn test_names_match_ignores_case() {
        assert!(names_match("Brick", "BRICK"));
        assert!(names_match("Ärger", "ärger"));
        assert!(!names_match("Brick", "Bricks"));
    }
}
