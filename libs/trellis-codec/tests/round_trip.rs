//! Round trips through every codec.

use approx::assert_relative_eq;
use config::constants::JSON_FLOAT_PRECISION;
use glam::DVec3;
use trellis_codec::{
    from_bytes, from_json, import_obj, obj::import_mtl, to_bytes, to_json, to_mtl, to_obj,
    BinaryWidth, JsonOptions,
};
use trellis_mesh::primitives::{create_cylinder, create_sphere, CylinderParams};
use trellis_mesh::{basic_cube, Color, ColorMesh, Material, Mesh, PrimitiveStyle};

fn scene() -> Mesh {
    let mut mesh = Mesh::new();
    let glass = Material::new("Glass", Color::new(200, 230, 255, 96), 0.1, 0.05)
        .unwrap()
        .with_texture("frost.png");
    let copper = Material::new("Copper", Color::rgb(184, 115, 51), 1.0, 0.35).unwrap();

    create_sphere(
        &mut mesh,
        DVec3::new(0.0, 0.0, 2.0),
        1.0,
        6,
        &PrimitiveStyle::new(glass).with_group("Dome"),
    )
    .unwrap();
    create_cylinder(
        &mut mesh,
        &CylinderParams::new(DVec3::ZERO, DVec3::Z, 0.75, 9),
        &PrimitiveStyle::new(copper).with_group("Base"),
    )
    .unwrap();
    mesh
}

#[test]
fn json_round_trip_preserves_structure() {
    let mesh = scene();
    let options = JsonOptions {
        precision: 9,
        pretty: true,
    };
    let decoded = from_json(&to_json(&mesh, &options).unwrap()).unwrap();

    assert_eq!(decoded.vertex_count(), mesh.vertex_count());
    for (id, p) in mesh.vertices().iter() {
        let q = decoded.vertex(id).unwrap();
        assert_relative_eq!(p.distance(q), 0.0, epsilon = 1e-8);
    }
    for (id, tri) in mesh.triangles().iter() {
        assert_eq!(decoded.triangle(id).as_ref(), Some(tri));
    }
    for (id, line) in mesh.lines().iter() {
        assert_eq!(decoded.line(id).as_ref(), Some(line));
    }
    assert_eq!(decoded.groups(), mesh.groups());

    let glass = decoded.find_material("Glass").unwrap();
    assert_eq!(glass.base_color, Color::new(200, 230, 255, 96));
    assert_eq!(glass.texture.as_deref(), Some("frost.png"));
    assert_relative_eq!(decoded.group_material("Base").metallic, 1.0);
}

#[test]
fn json_default_precision_stays_within_half_ulp() {
    let mesh = scene();
    let options = JsonOptions::default();
    assert_eq!(options.precision, JSON_FLOAT_PRECISION);
    let decoded = from_json(&to_json(&mesh, &options).unwrap()).unwrap();

    let tolerance = 0.5 * 10f64.powi(-(JSON_FLOAT_PRECISION as i32)) + 1e-12;
    assert_eq!(decoded.vertex_count(), mesh.vertex_count());
    for (id, p) in mesh.vertices().iter() {
        let q = decoded.vertex(id).unwrap();
        assert!((*p - q).abs().max_element() <= tolerance, "vertex {id}: {p} vs {q}");
    }
    assert_eq!(decoded.triangle_count(), mesh.triangle_count());
    assert_eq!(decoded.groups(), mesh.groups());

    for material in mesh.materials() {
        let copy = decoded.find_material(&material.name).unwrap();
        assert_eq!(copy.base_color, material.base_color);
        assert!(f64::from((copy.metallic - material.metallic).abs()) <= tolerance);
        assert!(f64::from((copy.roughness - material.roughness).abs()) <= tolerance);
    }
}

#[test]
fn json_round_trip_keeps_holes() {
    let mut mesh = scene();
    mesh.remove_vertex(3);
    mesh.remove_triangle(0);
    let decoded = from_json(&to_json(&mesh, &JsonOptions::default()).unwrap()).unwrap();
    assert!(decoded.vertex(3).is_none());
    assert!(decoded.triangle(0).is_none());
    assert_eq!(decoded.dangling_references(), mesh.dangling_references());
}

#[test]
fn binary_double_is_exact() {
    let flat = ColorMesh::from_mesh(&scene());
    let decoded = from_bytes(&to_bytes(&flat, BinaryWidth::Double).unwrap(), BinaryWidth::Double).unwrap();
    assert_eq!(decoded.vertex_count(), flat.vertex_count());
    for (id, &p) in flat.vertices().iter() {
        assert_eq!(decoded.vertex(id), Some(p));
    }
    for (id, &tri) in flat.triangles().iter() {
        assert_eq!(decoded.triangle(id), Some(tri));
    }
}

#[test]
fn binary_float_is_close() {
    let flat = ColorMesh::from_mesh(&scene());
    let bytes = to_bytes(&flat, BinaryWidth::Float).unwrap();
    assert!(bytes.len() < to_bytes(&flat, BinaryWidth::Double).unwrap().len());

    let decoded = from_bytes(&bytes, BinaryWidth::Float).unwrap();
    for (id, p) in flat.vertices().iter() {
        let q = decoded.vertex(id).unwrap();
        assert_relative_eq!(p.x, q.x, epsilon = 1e-6);
        assert_relative_eq!(p.y, q.y, epsilon = 1e-6);
        assert_relative_eq!(p.z, q.z, epsilon = 1e-6);
    }
    assert_eq!(decoded.triangle_count(), flat.triangle_count());
}

#[test]
fn obj_cube_round_trip() {
    let material = Material::solid("Crate", Color::rgb(150, 100, 50)).unwrap();
    let cube = basic_cube(1.0, &material, Color::WHITE).unwrap();

    let obj = to_obj(&cube, Some("cube.mtl")).unwrap();
    let mtl = to_mtl(&cube).unwrap();

    let mut imported = Mesh::new();
    let report = import_obj(&mut imported, &obj).unwrap();
    import_mtl(&mut imported, &mtl).unwrap();

    assert_eq!(imported.triangle_count(), 12);
    assert!(imported.vertex_count() <= 8);
    assert_eq!(report.faces_skipped, 0);
    assert_eq!(report.material_libraries, ["cube.mtl"]);
    assert_eq!(imported.line_count(), 18);

    let crate_material = imported.group_material("Crate");
    assert_eq!(crate_material.base_color, material.base_color);
    assert_relative_eq!(crate_material.roughness, material.roughness, epsilon = 1e-5);
}

#[test]
fn obj_reimport_into_same_mesh_reuses_vertices() {
    let cube = basic_cube(1.0, &Material::fallback(), Color::WHITE).unwrap();
    let obj = to_obj(&cube, None).unwrap();

    let mut mesh = cube.clone();
    let report = import_obj(&mut mesh, &obj).unwrap();
    assert_eq!(report.vertices_reused, 8);
    assert_eq!(report.vertices_added, 0);
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 24);
}
