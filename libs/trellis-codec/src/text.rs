//! # Element Strings
//!
//! Each mesh element serializes to a single comma-separated string. These
//! strings are the values of the JSON document maps.
//!
//! | Element  | Form |
//! |----------|------|
//! | Vertex   | `x, y, z` |
//! | Color    | `#RRGGBB` or `#RRGGBBAA` |
//! | Line     | `a, b, colorId` |
//! | Triangle | `a, b, c` |
//! | Material | `name: N, baseColor: #hex, metallic: F, roughness: F[, texture: FILE]` |
//! | Group    | `MaterialName: N, TriIds: [i,i,...]` |

use std::fmt;

use glam::DVec3;
use trellis_mesh::{Color, Group, Line, Material, Triangle};

use crate::error::{CodecError, CodecResult};

/// Kind of element being encoded or decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    Vertex,
    Color,
    Line,
    Triangle,
    Material,
    Group,
}

impl Element {
    /// Segment count of the fixed-width forms.
    pub fn segments(self) -> usize {
        match self {
            Element::Vertex | Element::Line | Element::Triangle => 3,
            Element::Color => 1,
            Element::Material => 4,
            Element::Group => 2,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Element::Vertex => "vertex",
            Element::Color => "color",
            Element::Line => "line",
            Element::Triangle => "triangle",
            Element::Material => "material",
            Element::Group => "group",
        };
        f.write_str(name)
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Formats a point with `precision` decimals per component.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use trellis_codec::text::format_point;
///
/// assert_eq!(format_point(DVec3::new(1.0, 2.0, 3.0), 3), "1.000, 2.000, 3.000");
/// ```
pub fn format_point(point: DVec3, precision: usize) -> String {
    format!(
        "{:.p$}, {:.p$}, {:.p$}",
        point.x,
        point.y,
        point.z,
        p = precision
    )
}

pub fn format_color(color: Color) -> String {
    color.to_hex()
}

pub fn format_line(line: &Line) -> String {
    format!("{}, {}, {}", line.a, line.b, line.color)
}

pub fn format_triangle(triangle: &Triangle) -> String {
    format!("{}, {}, {}", triangle.a, triangle.b, triangle.c)
}

pub fn format_material(material: &Material, precision: usize) -> String {
    let mut text = format!(
        "name: {}, baseColor: {}, metallic: {:.p$}, roughness: {:.p$}",
        material.name,
        material.base_color.to_hex(),
        material.metallic,
        material.roughness,
        p = precision
    );
    if let Some(texture) = &material.texture {
        text.push_str(", texture: ");
        text.push_str(texture);
    }
    text
}

pub fn format_group(group: &Group) -> String {
    let ids: Vec<String> = group.tri_ids.iter().map(u32::to_string).collect();
    format!("MaterialName: {}, TriIds: [{}]", group.material_name, ids.join(","))
}

// =============================================================================
// DECODING
// =============================================================================

pub fn parse_point(input: &str) -> CodecResult<DVec3> {
    let parts = split_exact(Element::Vertex, input)?;
    Ok(DVec3::new(
        number(Element::Vertex, parts[0])?,
        number(Element::Vertex, parts[1])?,
        number(Element::Vertex, parts[2])?,
    ))
}

pub fn parse_color(input: &str) -> CodecResult<Color> {
    Color::from_hex(input.trim()).ok_or_else(|| CodecError::InvalidColor {
        value: input.to_string(),
    })
}

pub fn parse_line(input: &str) -> CodecResult<Line> {
    let parts = split_exact(Element::Line, input)?;
    Ok(Line::new(
        number(Element::Line, parts[0])?,
        number(Element::Line, parts[1])?,
        number(Element::Line, parts[2])?,
    ))
}

pub fn parse_triangle(input: &str) -> CodecResult<Triangle> {
    let parts = split_exact(Element::Triangle, input)?;
    Ok(Triangle::new(
        number(Element::Triangle, parts[0])?,
        number(Element::Triangle, parts[1])?,
        number(Element::Triangle, parts[2])?,
    ))
}

/// Parses a material string. The texture segment is optional, and the
/// decoded factors are validated like [`Material::new`].
///
/// Segments are located by their key labels, so the name and texture may
/// themselves contain commas.
pub fn parse_material(input: &str) -> CodecResult<Material> {
    let element = Element::Material;
    let malformed = || {
        let actual = split(input).len();
        let expected = if actual <= 4 { 4 } else { 5 };
        CodecError::format(element, expected, actual, input)
    };

    let mut values = Vec::with_capacity(3);
    let mut rest = input;
    for key in ["baseColor", "metallic", "roughness"] {
        let (end, next) = find_label(rest, key).ok_or_else(malformed)?;
        values.push(rest[..end].trim());
        rest = &rest[next..];
    }
    let (roughness, texture) = match find_label(rest, "texture") {
        Some((end, next)) => (rest[..end].trim(), Some(rest[next..].trim())),
        None => (rest.trim(), None),
    };

    let name = keyed(element, values[0], "name")?;
    let color = parse_color(values[1])?;
    let metallic = number(element, values[2])?;
    let roughness = number(element, roughness)?;

    let material = Material::new(name, color, metallic, roughness)?;
    match texture {
        Some(texture) => Ok(material.with_texture(texture)),
        None => Ok(material),
    }
}

/// Parses a group string. The material name may itself contain commas.
pub fn parse_group(input: &str) -> CodecResult<Group> {
    let element = Element::Group;
    let Some(split_at) = input.rfind("TriIds") else {
        return Err(CodecError::format(element, 2, split(input).len(), input));
    };

    let head = input[..split_at].trim().trim_end_matches(',');
    let material_name = keyed(element, head, "MaterialName")?;
    let list = keyed(element, &input[split_at..], "TriIds")?;

    let inner = list
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| CodecError::invalid_number(element, list))?;
    let tri_ids = inner
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| number(element, id))
        .collect::<CodecResult<Vec<u32>>>()?;

    Ok(Group::new(material_name).with_triangles(tri_ids))
}

fn split(input: &str) -> Vec<&str> {
    input.split(',').map(str::trim).collect()
}

fn split_exact(element: Element, input: &str) -> CodecResult<Vec<&str>> {
    let parts = split(input);
    if parts.len() != element.segments() {
        return Err(CodecError::format(element, element.segments(), parts.len(), input));
    }
    Ok(parts)
}

fn number<T: std::str::FromStr>(element: Element, text: &str) -> CodecResult<T> {
    text.parse()
        .map_err(|_| CodecError::invalid_number(element, text))
}

/// Finds the first `, key:` label, allowing whitespace around the comma and
/// colon. Returns the offset of the comma and the offset just past the colon.
fn find_label(input: &str, key: &str) -> Option<(usize, usize)> {
    input.match_indices(key).find_map(|(at, _)| {
        let before = input[..at].trim_end();
        let after = &input[at + key.len()..];
        let gap = after.len() - after.trim_start().len();
        (before.ends_with(',') && after[gap..].starts_with(':'))
            .then(|| (before.len() - 1, at + key.len() + gap + 1))
    })
}

/// Value of a `key: value` segment.
fn keyed<'a>(element: Element, segment: &'a str, key: &'static str) -> CodecResult<&'a str> {
    match segment.split_once(':') {
        Some((found, value)) if found.trim() == key => Ok(value.trim()),
        Some((found, _)) => Err(CodecError::UnexpectedKey {
            element,
            expected: key,
            actual: found.trim().to_string(),
        }),
        None => Err(CodecError::UnexpectedKey {
            element,
            expected: key,
            actual: segment.trim().to_string(),
        }),
    }
}
