//! OBJ and MTL writers.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use config::constants::OBJ_DEFAULT_GROUP;
use tracing::{debug, warn};
use trellis_mesh::material::names_match;
use trellis_mesh::{Material, Mesh, TriangleId, VertexId};

use crate::error::CodecResult;
use crate::obj::mtl::write_material;

/// Triangles emitted under one `g`/`usemtl` pair.
struct Block<'a> {
    group: &'a str,
    material: &'a Material,
    triangles: Vec<TriangleId>,
}

/// Splits the mesh's triangles into output blocks.
///
/// Groups are visited in name order and a triangle listed by several groups
/// is written only under the first. Triangles owned by no group end up in a
/// trailing `default` block bound to the default material.
fn blocks(mesh: &Mesh) -> Vec<Block<'_>> {
    let mut claimed = HashSet::new();
    let mut blocks = Vec::new();

    for (name, group) in mesh.groups() {
        let triangles: Vec<_> = group
            .tri_ids
            .iter()
            .copied()
            .filter(|&id| mesh.triangles().contains(id) && claimed.insert(id))
            .collect();
        if !triangles.is_empty() {
            blocks.push(Block {
                group: name,
                material: mesh.material(&group.material_name),
                triangles,
            });
        }
    }

    let ungrouped: Vec<_> = mesh
        .triangles()
        .ids()
        .into_iter()
        .filter(|id| !claimed.contains(id))
        .collect();
    if !ungrouped.is_empty() {
        blocks.push(Block {
            group: OBJ_DEFAULT_GROUP,
            material: mesh.default_material(),
            triangles: ungrouped,
        });
    }
    blocks
}

/// Writes the mesh as OBJ.
///
/// Vertices are written in ascending id order and renumbered from 1; lines
/// follow, then one `g`/`usemtl` block per group. Triangles and lines whose
/// vertices are missing are skipped.
pub fn write_obj<W: Write>(mesh: &Mesh, writer: &mut W, mtl_file: Option<&str>) -> CodecResult<()> {
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    if let Some(file) = mtl_file {
        writeln!(writer, "mtllib {file}")?;
    }

    let mut remap: HashMap<VertexId, usize> = HashMap::with_capacity(mesh.vertex_count());
    for (index, (id, p)) in mesh.vertices().iter().enumerate() {
        remap.insert(id, index + 1);
        writeln!(writer, "v {} {} {}", p.x, p.y, p.z)?;
    }

    for (id, line) in mesh.lines().iter() {
        match (remap.get(&line.a), remap.get(&line.b)) {
            (Some(a), Some(b)) => writeln!(writer, "l {a} {b}")?,
            _ => warn!(line = id, "skipping line with a missing vertex"),
        }
    }

    let mut skipped = 0;
    for block in blocks(mesh) {
        writeln!(writer, "g {}", block.group)?;
        writeln!(writer, "usemtl {}", block.material.name)?;
        for id in block.triangles {
            let Some(tri) = mesh.triangle(id) else { continue };
            match (remap.get(&tri.a), remap.get(&tri.b), remap.get(&tri.c)) {
                (Some(a), Some(b), Some(c)) => writeln!(writer, "f {a} {b} {c}")?,
                _ => {
                    warn!(triangle = id, "skipping triangle with a missing vertex");
                    skipped += 1;
                }
            }
        }
    }

    debug!(
        vertices = remap.len(),
        lines = mesh.line_count(),
        skipped,
        "wrote OBJ"
    );
    Ok(())
}

/// Writes one MTL block per material used by the OBJ output.
pub fn write_mtl<W: Write>(mesh: &Mesh, writer: &mut W) -> CodecResult<()> {
    let mut written: Vec<&Material> = Vec::new();
    for block in blocks(mesh) {
        if written.iter().any(|m| names_match(&m.name, &block.material.name)) {
            continue;
        }
        if !written.is_empty() {
            writeln!(writer)?;
        }
        write_material(writer, block.material)?;
        written.push(block.material);
    }
    debug!(materials = written.len(), "wrote MTL");
    Ok(())
}

/// OBJ text for a mesh. `mtl_file` adds a `mtllib` statement.
///
/// # Example
///
/// ```rust
/// use trellis_codec::obj::to_obj;
/// use trellis_mesh::{basic_cube, Color, Material};
///
/// let cube = basic_cube(1.0, &Material::fallback(), Color::WHITE).unwrap();
/// let obj = to_obj(&cube, Some("cube.mtl")).unwrap();
/// assert!(obj.contains("mtllib cube.mtl"));
/// assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), 12);
/// ```
pub fn to_obj(mesh: &Mesh, mtl_file: Option<&str>) -> CodecResult<String> {
    let mut out = Vec::new();
    write_obj(mesh, &mut out, mtl_file)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// MTL text for the materials [`to_obj`] references.
pub fn to_mtl(mesh: &Mesh) -> CodecResult<String> {
    let mut out = Vec::new();
    write_mtl(mesh, &mut out)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;
    use trellis_mesh::{Color, Line, Triangle};

    fn quad() -> Mesh {
        let mut mesh = Mesh::new();
        for p in [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y] {
            mesh.add_vertex(p);
        }
        mesh.add_triangle(Triangle::new(0, 1, 2));
        mesh.add_triangle(Triangle::new(0, 2, 3));
        mesh
    }

    #[test]
    fn test_indices_are_renumbered() {
        let mut mesh = quad();
        mesh.remove_vertex(0);
        mesh.add_vertex(DVec3::ZERO); // id 4
        mesh.add_triangle(Triangle::new(4, 1, 2));

        let obj = to_obj(&mesh, None).unwrap();
        let vertex_lines: Vec<_> = obj.lines().filter(|l| l.starts_with("v ")).collect();
        assert_eq!(vertex_lines, ["v 1 0 0", "v 1 1 0", "v 0 1 0", "v 0 0 0"]);
        // triangles touching the removed vertex are dropped
        let faces: Vec<_> = obj.lines().filter(|l| l.starts_with("f ")).collect();
        assert_eq!(faces, ["f 4 1 2"]);
        assert!(!obj.contains("mtllib"));
    }

    #[test]
    fn test_ungrouped_triangles_use_default_block() {
        let obj = to_obj(&quad(), None).unwrap();
        assert!(obj.contains("g default\nusemtl Default\nf 1 2 3\nf 1 3 4\n"));
    }

    #[test]
    fn test_groups_and_overlap() {
        let mut mesh = quad();
        mesh.add_material(Material::solid("Red", Color::RED).unwrap());
        mesh.add_group("A", "Red").tri_ids.extend([1]);
        mesh.add_group("B", "Missing").tri_ids.extend([1, 0]);

        let obj = to_obj(&mesh, None).unwrap();
        assert!(obj.contains("g A\nusemtl Red\nf 1 3 4\n"));
        assert!(obj.contains("g B\nusemtl Default\nf 1 2 3\n"));
        assert!(!obj.contains("g default"));
        assert_eq!(obj.lines().filter(|l| l.starts_with("f ")).count(), 2);
    }

    #[test]
    fn test_lines_written_after_vertices() {
        let mut mesh = quad();
        let white = mesh.add_color(Color::WHITE);
        mesh.add_line(Line::new(0, 2, white));
        mesh.add_line(Line::new(0, 99, white));
        let obj = to_obj(&mesh, None).unwrap();
        let lines: Vec<_> = obj.lines().filter(|l| l.starts_with("l ")).collect();
        assert_eq!(lines, ["l 1 3"]);
    }

    #[test]
    fn test_mtl_lists_each_material_once() {
        let mut mesh = quad();
        mesh.add_material(Material::solid("Red", Color::RED).unwrap());
        mesh.add_group("A", "Red").tri_ids.push(0);
        mesh.add_group("B", "red").tri_ids.push(1);
        let mtl = to_mtl(&mesh).unwrap();
        assert_eq!(mtl.matches("newmtl").count(), 1);
        assert!(mtl.contains("newmtl Red\n"));
    }
}
