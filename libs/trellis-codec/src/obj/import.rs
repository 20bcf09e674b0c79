//! Single-pass OBJ/MTL reader.
//!
//! OBJ and MTL statements are recognized by the same parser, so a file may
//! mix both. Faces must be triangles; anything else is skipped and counted.

use std::collections::HashMap;

use config::constants::{DEFAULT_LINE_COLOR, DEFAULT_MATERIAL_NAME, OBJ_DEFAULT_GROUP};
use glam::DVec3;
use tracing::{debug, trace, warn};
use trellis_mesh::{Color, ColorId, Line, Mesh, Triangle, VertexId};

use crate::error::{CodecError, CodecResult};
use crate::obj::mtl::MtlRecord;
use crate::text::Element;

/// Summary of one import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjImport {
    /// `v` statements that created a new vertex.
    pub vertices_added: usize,
    /// `v` statements resolved to an existing vertex at the same position.
    pub vertices_reused: usize,
    pub triangles_added: usize,
    pub lines_added: usize,
    /// Faces that were not triangles or referenced unknown vertices.
    pub faces_skipped: usize,
    /// `newmtl` blocks stored as new materials.
    pub materials_added: usize,
    /// File names from `mtllib` statements.
    pub material_libraries: Vec<String>,
    /// Names from `o` statements.
    pub objects: Vec<String>,
}

/// Reads OBJ (and inline MTL) statements into `mesh`.
///
/// `usemtl NAME` routes the following faces into group `NAME`, bound to
/// material `NAME`; earlier faces go to group `default`. Vertices are merged
/// with existing vertices at exactly the same position.
///
/// # Errors
///
/// Fails on a malformed `v` statement or a material that cannot be built.
/// Malformed faces and lines are skipped instead.
///
/// # Example
///
/// ```rust
/// use trellis_codec::obj::import_obj;
/// use trellis_mesh::Mesh;
///
/// let mut mesh = Mesh::new();
/// let report = import_obj(&mut mesh, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nf 1 2 3 1\n").unwrap();
/// assert_eq!(report.triangles_added, 1);
/// assert_eq!(report.faces_skipped, 1);
/// assert_eq!(mesh.group("default").unwrap().len(), 1);
/// ```
pub fn import_obj(mesh: &mut Mesh, text: &str) -> CodecResult<ObjImport> {
    let mut importer = Importer::new(mesh);
    for (number, raw) in text.lines().enumerate() {
        importer.statement(number + 1, raw)?;
    }
    importer.finish()
}

/// Reads MTL statements into `mesh`. Materials whose names are already
/// present are ignored.
pub fn import_mtl(mesh: &mut Mesh, text: &str) -> CodecResult<ObjImport> {
    import_obj(mesh, text)
}

/// Hash key for exact position equality. `-0.0` and `0.0` share a key.
fn position_key(p: DVec3) -> [u64; 3] {
    let bits = |v: f64| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
    [bits(p.x), bits(p.y), bits(p.z)]
}

struct Importer<'m> {
    mesh: &'m mut Mesh,
    positions: HashMap<[u64; 3], VertexId>,
    /// OBJ index (0-based) to mesh vertex id.
    indices: Vec<VertexId>,
    /// Group receiving faces, from the last `usemtl`.
    group: Option<String>,
    line_color: Option<ColorId>,
    material: Option<MtlRecord>,
    report: ObjImport,
}

impl<'m> Importer<'m> {
    fn new(mesh: &'m mut Mesh) -> Self {
        let mut positions = HashMap::with_capacity(mesh.vertex_count());
        for (id, &p) in mesh.vertices().iter() {
            positions.entry(position_key(p)).or_insert(id);
        }
        Self {
            mesh,
            positions,
            indices: Vec::new(),
            group: None,
            line_color: None,
            material: None,
            report: ObjImport::default(),
        }
    }

    fn statement(&mut self, number: usize, raw: &str) -> CodecResult<()> {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            return Ok(());
        }
        let (keyword, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(k, r)| (k, r.trim()));

        match keyword {
            "v" => self.vertex(rest)?,
            "f" => self.face(number, rest),
            "l" => self.line(number, rest),
            "usemtl" if rest.is_empty() => warn!(line = number, "usemtl without a name"),
            "usemtl" => {
                self.mesh.add_group(rest, rest);
                self.group = Some(rest.to_string());
            }
            "mtllib" => self
                .report
                .material_libraries
                .extend(rest.split_whitespace().map(str::to_string)),
            "o" => self.report.objects.push(rest.to_string()),
            "newmtl" => {
                self.finish_material()?;
                if rest.is_empty() {
                    warn!(line = number, "newmtl without a name");
                } else {
                    self.material = Some(MtlRecord::new(rest));
                }
            }
            "Kd" | "Ns" | "Pr" | "Pm" | "d" | "Tr" | "map_Kd" => self.material_field(keyword, rest)?,
            "vt" | "vn" | "g" | "s" | "Ks" | "Ka" | "Ke" | "Ni" | "Pc" | "illum" => {}
            other => trace!(line = number, keyword = other, "ignoring statement"),
        }
        Ok(())
    }

    fn vertex(&mut self, rest: &str) -> CodecResult<()> {
        let coords: Vec<&str> = rest.split_whitespace().collect();
        if coords.len() < 3 {
            return Err(CodecError::format(Element::Vertex, 3, coords.len(), rest));
        }
        let parse = |s: &str| {
            s.parse::<f64>()
                .map_err(|_| CodecError::invalid_number(Element::Vertex, s))
        };
        let p = DVec3::new(parse(coords[0])?, parse(coords[1])?, parse(coords[2])?);

        let id = match self.positions.get(&position_key(p)) {
            Some(&id) => {
                self.report.vertices_reused += 1;
                id
            }
            None => {
                let id = self.mesh.add_vertex(p);
                self.positions.insert(position_key(p), id);
                self.report.vertices_added += 1;
                id
            }
        };
        self.indices.push(id);
        Ok(())
    }

    /// Resolves a face/line corner (`v`, `v/vt`, `v/vt/vn` or `v//vn`).
    fn resolve(&self, corner: &str) -> Option<VertexId> {
        let index: i64 = corner.split('/').next()?.parse().ok()?;
        let count = self.indices.len() as i64;
        let zero_based = match index {
            i if i > 0 => i - 1,
            i if i < 0 => count + i,
            _ => return None,
        };
        usize::try_from(zero_based)
            .ok()
            .and_then(|i| self.indices.get(i).copied())
    }

    fn face(&mut self, number: usize, rest: &str) {
        let corners: Option<Vec<VertexId>> =
            rest.split_whitespace().map(|c| self.resolve(c)).collect();
        let [a, b, c] = match corners.as_deref() {
            Some(&[a, b, c]) => [a, b, c],
            _ => {
                warn!(line = number, face = rest, "skipping face");
                self.report.faces_skipped += 1;
                return;
            }
        };

        let id = self.mesh.add_triangle(Triangle::new(a, b, c));
        let group = self.group.as_deref().unwrap_or(OBJ_DEFAULT_GROUP);
        let material = self.group.as_deref().unwrap_or(DEFAULT_MATERIAL_NAME);
        self.mesh.add_group(group, material).tri_ids.push(id);
        self.report.triangles_added += 1;
    }

    fn line(&mut self, number: usize, rest: &str) {
        let corners: Option<Vec<VertexId>> =
            rest.split_whitespace().map(|c| self.resolve(c)).collect();
        let corners = match corners {
            Some(corners) if corners.len() >= 2 => corners,
            _ => {
                warn!(line = number, "skipping line statement");
                return;
            }
        };

        let color = match self.line_color {
            Some(color) => color,
            None => {
                let color = self.mesh.add_color(Color::from_array(DEFAULT_LINE_COLOR));
                self.line_color = Some(color);
                color
            }
        };
        for pair in corners.windows(2) {
            self.mesh.add_line(Line::new(pair[0], pair[1], color));
            self.report.lines_added += 1;
        }
    }

    fn material_field(&mut self, keyword: &str, rest: &str) -> CodecResult<()> {
        let Some(record) = self.material.as_mut() else {
            trace!(keyword, "material field outside newmtl");
            return Ok(());
        };
        let values = || -> CodecResult<Vec<f32>> {
            rest.split_whitespace()
                .map(|s| {
                    s.parse::<f32>()
                        .map_err(|_| CodecError::invalid_number(Element::Material, s))
                })
                .collect()
        };
        let first = || -> CodecResult<f32> {
            values()?
                .first()
                .copied()
                .ok_or_else(|| CodecError::format(Element::Material, 1, 0, rest))
        };

        match keyword {
            "Kd" => match values()?.as_slice() {
                &[r, g, b, ..] => record.diffuse = [r, g, b],
                other => return Err(CodecError::format(Element::Material, 3, other.len(), rest)),
            },
            "Ns" => record.shininess = Some(first()?),
            "Pr" => record.roughness = Some(first()?),
            "Pm" => record.metallic = Some(first()?),
            "d" => record.alpha = first()?.clamp(0.0, 1.0),
            "Tr" => record.alpha = (1.0 - first()?).clamp(0.0, 1.0),
            "map_Kd" if !rest.is_empty() => record.texture = Some(rest.to_string()),
            _ => {}
        }
        Ok(())
    }

    fn finish_material(&mut self) -> CodecResult<()> {
        if let Some(record) = self.material.take() {
            let material = record.finish()?;
            if self.mesh.add_material(material) {
                self.report.materials_added += 1;
            }
        }
        Ok(())
    }

    fn finish(mut self) -> CodecResult<ObjImport> {
        self.finish_material()?;
        debug!(
            added = self.report.vertices_added,
            reused = self.report.vertices_reused,
            triangles = self.report.triangles_added,
            skipped = self.report.faces_skipped,
            "imported OBJ"
        );
        Ok(self.report)
    }
}
