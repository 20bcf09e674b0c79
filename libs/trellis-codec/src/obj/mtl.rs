//! MTL material records.
//!
//! Export writes both the legacy Phong fields (`Kd`, `Ks`, `Ns`) and the PBR
//! extension (`Pr`, `Pm`, `Pc`). Import prefers the PBR values and falls
//! back to `Ns` for roughness.

use std::io::Write;

use config::constants::{
    DEFAULT_BASE_COLOR, DEFAULT_METALLIC, DEFAULT_ROUGHNESS, MTL_DIELECTRIC_SPECULAR,
    MTL_ILLUM_MODEL, MTL_SHININESS_MAX,
};
use trellis_mesh::{Color, Material};

use crate::error::CodecResult;

/// Writes one `newmtl` block.
pub(crate) fn write_material<W: Write>(writer: &mut W, material: &Material) -> CodecResult<()> {
    let [r, g, b, alpha] = material.base_color.to_f32();
    let metallic = material.metallic;
    let specular = |channel: f32| MTL_DIELECTRIC_SPECULAR + (channel - MTL_DIELECTRIC_SPECULAR) * metallic;

    writeln!(writer, "newmtl {}", material.name)?;
    writeln!(writer, "Kd {r:.6} {g:.6} {b:.6}")?;
    writeln!(
        writer,
        "Ks {:.6} {:.6} {:.6}",
        specular(r),
        specular(g),
        specular(b)
    )?;
    writeln!(writer, "Ns {:.6}", shininess(material.roughness))?;
    writeln!(writer, "Pr {:.6}", material.roughness)?;
    writeln!(writer, "Pm {metallic:.6}")?;
    writeln!(writer, "Pc 0.000000")?;
    if !material.base_color.is_opaque() {
        writeln!(writer, "d {alpha:.6}")?;
        writeln!(writer, "Tr {:.6}", 1.0 - alpha)?;
    }
    if let Some(texture) = &material.texture {
        writeln!(writer, "map_Kd {texture}")?;
    }
    writeln!(writer, "illum {MTL_ILLUM_MODEL}")?;
    Ok(())
}

/// Phong exponent for a roughness factor.
pub(crate) fn shininess(roughness: f32) -> f32 {
    (1.0 - roughness).powi(2) * MTL_SHININESS_MAX
}

/// Roughness recovered from a Phong exponent.
pub(crate) fn roughness_from_shininess(ns: f32) -> f32 {
    1.0 - (ns / MTL_SHININESS_MAX).clamp(0.0, 1.0).sqrt()
}

/// A material being assembled from MTL statements.
#[derive(Debug, Clone)]
pub(crate) struct MtlRecord {
    pub name: String,
    pub diffuse: [f32; 3],
    pub alpha: f32,
    pub shininess: Option<f32>,
    pub roughness: Option<f32>,
    pub metallic: Option<f32>,
    pub texture: Option<String>,
}

impl MtlRecord {
    pub fn new(name: impl Into<String>) -> Self {
        let [r, g, b, _] = Color::from_array(DEFAULT_BASE_COLOR).to_f32();
        Self {
            name: name.into(),
            diffuse: [r, g, b],
            alpha: 1.0,
            shininess: None,
            roughness: None,
            metallic: None,
            texture: None,
        }
    }

    pub fn finish(self) -> CodecResult<Material> {
        let roughness = self
            .roughness
            .or(self.shininess.map(roughness_from_shininess))
            .unwrap_or(DEFAULT_ROUGHNESS)
            .clamp(0.0, 1.0);
        let metallic = self.metallic.unwrap_or(DEFAULT_METALLIC).clamp(0.0, 1.0);
        let [r, g, b] = self.diffuse;
        let color = Color::from_f32([r, g, b, self.alpha]);

        let material = Material::new(self.name, color, metallic, roughness)?;
        Ok(match self.texture {
            Some(texture) => material.with_texture(texture),
            None => material,
        })
    }
}
