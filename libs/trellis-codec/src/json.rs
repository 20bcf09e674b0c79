//! # JSON Codec
//!
//! A mesh document is one JSON object of six string maps:
//!
//! ```json
//! {
//!   "vertices":  { "0": "1.000, 2.000, 3.000" },
//!   "colors":    { "0": "#FFFFFF" },
//!   "lines":     { "0": "0, 1, 0" },
//!   "triangles": { "0": "0, 1, 2" },
//!   "materials": { "0": "name: Stone, baseColor: #808080, metallic: 0.000, roughness: 0.500" },
//!   "groups":    { "All": "MaterialName: Stone, TriIds: [0]" }
//! }
//! ```
//!
//! Element maps are keyed by decimal id (gaps allowed), materials by
//! position, groups by name. Absent maps decode as empty.

use std::collections::BTreeMap;

use config::constants::{MeshConfig, JSON_FLOAT_PRECISION};
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;
use trellis_mesh::{Color, Group, Line, Material, Mesh, Triangle};

use crate::error::{CodecError, CodecResult};
use crate::text;

/// Largest element id a document may carry, shared with the binary format's
/// `i32` ids. Keeps the mesh counters clear of `u32::MAX`.
const MAX_ELEMENT_ID: u32 = i32::MAX as u32;

/// Encoding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonOptions {
    /// Decimals written for positions and material factors.
    pub precision: usize,
    /// Indent the output.
    pub pretty: bool,
}

impl Default for JsonOptions {
    fn default() -> Self {
        Self {
            precision: JSON_FLOAT_PRECISION,
            pretty: false,
        }
    }
}

impl JsonOptions {
    pub fn from_config(config: &MeshConfig) -> Self {
        Self {
            precision: config.json_precision,
            ..Self::default()
        }
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct MeshDocument {
    vertices: BTreeMap<u32, String>,
    colors: BTreeMap<u32, String>,
    lines: BTreeMap<u32, String>,
    triangles: BTreeMap<u32, String>,
    materials: BTreeMap<u32, String>,
    groups: BTreeMap<String, String>,
}

/// Fully parsed document, ready to be applied to a mesh.
struct Decoded {
    vertices: Vec<(u32, DVec3)>,
    colors: Vec<(u32, Color)>,
    lines: Vec<(u32, Line)>,
    triangles: Vec<(u32, Triangle)>,
    materials: Vec<Material>,
    groups: Vec<(String, Group)>,
}

/// Encodes a mesh as a JSON document.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use trellis_codec::json::{to_json, JsonOptions};
/// use trellis_mesh::Mesh;
///
/// let mut mesh = Mesh::new();
/// mesh.add_vertex(DVec3::new(1.0, 2.0, 3.0));
/// let json = to_json(&mesh, &JsonOptions::default()).unwrap();
/// assert!(json.contains(r#""0":"1.000, 2.000, 3.000""#));
/// ```
pub fn to_json(mesh: &Mesh, options: &JsonOptions) -> CodecResult<String> {
    let precision = options.precision;
    let document = MeshDocument {
        vertices: mesh
            .vertices()
            .iter()
            .map(|(id, &p)| (id, text::format_point(p, precision)))
            .collect(),
        colors: mesh
            .colors()
            .iter()
            .map(|(id, &c)| (id, text::format_color(c)))
            .collect(),
        lines: mesh
            .lines()
            .iter()
            .map(|(id, line)| (id, text::format_line(line)))
            .collect(),
        triangles: mesh
            .triangles()
            .iter()
            .map(|(id, tri)| (id, text::format_triangle(tri)))
            .collect(),
        materials: mesh
            .materials()
            .iter()
            .zip(0u32..)
            .map(|(m, index)| (index, text::format_material(m, precision)))
            .collect(),
        groups: mesh
            .groups()
            .iter()
            .map(|(name, group)| (name.clone(), text::format_group(group)))
            .collect(),
    };

    debug!(
        vertices = document.vertices.len(),
        triangles = document.triangles.len(),
        groups = document.groups.len(),
        "encoded mesh as JSON"
    );
    let json = if options.pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(json)
}

/// Decodes a JSON document into a new mesh.
pub fn from_json(json: &str) -> CodecResult<Mesh> {
    let mut mesh = Mesh::new();
    from_json_into(&mut mesh, json)?;
    Ok(mesh)
}

/// Decodes a JSON document into an existing mesh.
///
/// Elements are stored under their document ids, replacing any entries
/// already there. Materials follow first-match-wins naming, groups replace
/// same-named groups. The mesh is left untouched if any element fails to
/// parse.
pub fn from_json_into(mesh: &mut Mesh, json: &str) -> CodecResult<()> {
    let document: MeshDocument = serde_json::from_str(json)?;
    let decoded = decode(&document)?;

    debug!(
        vertices = decoded.vertices.len(),
        triangles = decoded.triangles.len(),
        groups = decoded.groups.len(),
        "decoded JSON mesh"
    );

    for (id, p) in decoded.vertices {
        mesh.insert_vertex(id, p);
    }
    for (id, c) in decoded.colors {
        mesh.insert_color(id, c);
    }
    for (id, line) in decoded.lines {
        mesh.insert_line(id, line);
    }
    for (id, tri) in decoded.triangles {
        mesh.insert_triangle(id, tri);
    }
    for material in decoded.materials {
        mesh.add_material(material);
    }
    for (name, group) in decoded.groups {
        mesh.insert_group(name, group);
    }
    Ok(())
}

fn decode(document: &MeshDocument) -> CodecResult<Decoded> {
    fn each<T>(
        map: &BTreeMap<u32, String>,
        parse: impl Fn(&str) -> CodecResult<T>,
    ) -> CodecResult<Vec<(u32, T)>> {
        map.iter()
            .map(|(&id, s)| {
                if id > MAX_ELEMENT_ID {
                    return Err(CodecError::IndexOverflow {
                        index: i64::from(id),
                        max: i64::from(MAX_ELEMENT_ID),
                    });
                }
                Ok((id, parse(s)?))
            })
            .collect()
    }

    Ok(Decoded {
        vertices: each(&document.vertices, text::parse_point)?,
        colors: each(&document.colors, text::parse_color)?,
        lines: each(&document.lines, text::parse_line)?,
        triangles: each(&document.triangles, text::parse_triangle)?,
        materials: document
            .materials
            .values()
            .map(|s| text::parse_material(s))
            .collect::<CodecResult<_>>()?,
        groups: document
            .groups
            .iter()
            .map(|(name, s)| Ok((name.clone(), text::parse_group(s)?)))
            .collect::<CodecResult<_>>()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::Element;

    #[test]
    fn test_single_vertex_scenario() {
        let mesh = from_json(r#"{"vertices":{"0":"1.000, 2.000, 3.000"}}"#).unwrap();
        assert_eq!(mesh.vertex_count(), 1);
        assert_eq!(mesh.vertex(0), Some(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(mesh.triangle_count(), 0);
        assert!(mesh.groups().is_empty());
    }

    #[test]
    fn test_empty_object() {
        let mesh = from_json("{}").unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_sparse_ids_advance_counter() {
        let mut mesh =
            from_json(r#"{"vertices":{"2":"0, 0, 0","9":"1, 1, 1"}}"#).unwrap();
        assert!(mesh.vertex(5).is_none());
        assert_eq!(mesh.add_vertex(DVec3::ZERO), 10);
    }

    #[test]
    fn test_id_beyond_element_range_rejected() {
        let err = from_json(r#"{"vertices":{"4294967295":"0, 0, 0"}}"#).unwrap_err();
        assert!(matches!(
            err,
            CodecError::IndexOverflow { index: 4_294_967_295, max: 2_147_483_647 }
        ));

        let mut mesh = from_json(r#"{"vertices":{"2147483647":"0, 0, 0"}}"#).unwrap();
        assert_eq!(mesh.add_vertex(DVec3::X), 2_147_483_648);
    }

    #[test]
    fn test_material_name_with_comma() {
        let mut mesh = Mesh::new();
        let sand = Material::new("Wet, Sand", Color::rgb(1, 2, 3), 0.0, 0.5)
            .unwrap()
            .with_texture("sand, wet.png");
        mesh.add_material(sand.clone());
        mesh.add_group("Beach", "Wet, Sand");

        let decoded = from_json(&to_json(&mesh, &JsonOptions::default()).unwrap()).unwrap();
        assert_eq!(decoded.materials(), &[sand][..]);
        assert_eq!(decoded.group("Beach").unwrap().material_name, "Wet, Sand");
    }

    #[test]
    fn test_malformed_element_reports_segments() {
        let err = from_json(r#"{"triangles":{"0":"0, 1"}}"#).unwrap_err();
        match err {
            CodecError::Format {
                element,
                expected,
                actual,
                input,
            } => {
                assert_eq!(element, Element::Triangle);
                assert_eq!((expected, actual), (3, 2));
                assert_eq!(input, "0, 1");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failed_decode_leaves_mesh_unchanged() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::X);
        let json = r#"{"vertices":{"5":"1, 2, 3"},"colors":{"0":"nope"}}"#;
        assert!(from_json_into(&mut mesh, json).is_err());
        assert_eq!(mesh.vertex_count(), 1);
    }

    #[test]
    fn test_non_numeric_key_is_json_error() {
        assert!(matches!(
            from_json(r#"{"vertices":{"a":"1, 2, 3"}}"#),
            Err(CodecError::Json(_))
        ));
    }

    #[test]
    fn test_precision_and_pretty() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(DVec3::new(0.5, 0.26, 0.14));
        let options = JsonOptions::from_config(&MeshConfig::new(1, 16, [255; 4]).unwrap()).pretty();
        let json = to_json(&mesh, &options).unwrap();
        assert!(json.contains("\"0.5, 0.3, 0.1\""), "{json}");
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_materials_keyed_by_position() {
        let mut mesh = Mesh::new();
        mesh.add_material(Material::solid("A", Color::RED).unwrap());
        mesh.add_material(Material::solid("B", Color::BLUE).unwrap());
        let value: serde_json::Value =
            serde_json::from_str(&to_json(&mesh, &JsonOptions::default()).unwrap()).unwrap();
        let materials = value["materials"].as_object().unwrap();
        assert!(materials["0"].as_str().unwrap().starts_with("name: A"));
        assert!(materials["1"].as_str().unwrap().starts_with("name: B"));
    }
}
