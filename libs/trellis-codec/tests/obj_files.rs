//! OBJ/MTL file helpers against a temporary directory.

use std::fs;

use trellis_codec::obj::{load_obj, load_obj_into, save_obj};
use trellis_mesh::{basic_cube, Color, Material, Mesh};

#[test]
fn save_writes_obj_and_mtl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crate.obj");
    let material = Material::solid("Oak", Color::rgb(160, 110, 60)).unwrap();
    save_obj(&basic_cube(2.0, &material, Color::WHITE).unwrap(), &path).unwrap();

    let obj = fs::read_to_string(&path).unwrap();
    let mtl = fs::read_to_string(dir.path().join("crate.mtl")).unwrap();
    assert!(obj.contains("mtllib crate.mtl\n"));
    assert!(obj.contains("usemtl Oak\n"));
    assert!(mtl.contains("newmtl Oak\n"));
    assert!(mtl.contains("illum 2\n"));
}

#[test]
fn load_reads_sibling_mtl() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("crate.obj");
    let material = Material::new("Oak", Color::rgb(160, 110, 60), 0.0, 0.8)
        .unwrap()
        .with_texture("oak.png");
    save_obj(&basic_cube(2.0, &material, Color::WHITE).unwrap(), &path).unwrap();

    let (mesh, report) = load_obj(&path).unwrap();
    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(report.materials_added, 1);

    let oak = mesh.group_material("Oak");
    assert_eq!(oak.base_color, material.base_color);
    assert_eq!(oak.texture.as_deref(), Some("oak.png"));
    assert!((oak.roughness - 0.8).abs() < 1e-5);
}

#[test]
fn missing_mtl_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lonely.obj");
    fs::write(&path, "mtllib gone.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl Gone\nf 1 2 3\n").unwrap();

    let mut mesh = Mesh::new();
    let report = load_obj_into(&mut mesh, &path).unwrap();
    assert_eq!(report.materials_added, 0);
    assert_eq!(mesh.triangle_count(), 1);
    // the group's material is unresolved and falls back
    assert_eq!(mesh.group_material("Gone").name, "Default");
}

#[test]
fn missing_obj_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_obj(dir.path().join("absent.obj"));
    assert!(matches!(result, Err(trellis_codec::CodecError::Io(_))));
}
