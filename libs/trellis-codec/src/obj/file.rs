//! File helpers pairing an OBJ with its sibling MTL.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use tracing::{debug, warn};
use trellis_mesh::Mesh;

use crate::error::CodecResult;
use crate::obj::export::{write_mtl, write_obj};
use crate::obj::import::{import_mtl, import_obj, ObjImport};

/// Writes `path` and a `.mtl` file next to it, linked by `mtllib`.
///
/// # Example
///
/// ```no_run
/// use trellis_codec::obj::save_obj;
/// use trellis_mesh::{basic_cube, Color, Material};
///
/// let cube = basic_cube(1.0, &Material::fallback(), Color::WHITE).unwrap();
/// save_obj(&cube, "cube.obj").unwrap(); // also writes cube.mtl
/// ```
pub fn save_obj(mesh: &Mesh, path: impl AsRef<Path>) -> CodecResult<()> {
    let path = path.as_ref();
    let mtl_path = path.with_extension("mtl");
    let mtl_name = mtl_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());

    let mut writer = BufWriter::new(File::create(path)?);
    write_obj(mesh, &mut writer, mtl_name.as_deref())?;
    writer.flush()?;

    let mut writer = BufWriter::new(File::create(&mtl_path)?);
    write_mtl(mesh, &mut writer)?;
    writer.flush()?;

    debug!(obj = %path.display(), mtl = %mtl_path.display(), "saved OBJ");
    Ok(())
}

/// Reads an OBJ file and every `mtllib` it names into a new mesh.
pub fn load_obj(path: impl AsRef<Path>) -> CodecResult<(Mesh, ObjImport)> {
    let mut mesh = Mesh::new();
    let report = load_obj_into(&mut mesh, path)?;
    Ok((mesh, report))
}

/// Reads an OBJ file into an existing mesh.
///
/// Material libraries are resolved relative to the OBJ's directory. A missing
/// library file is logged and skipped.
pub fn load_obj_into(mesh: &mut Mesh, path: impl AsRef<Path>) -> CodecResult<ObjImport> {
    let path = path.as_ref();
    let mut report = import_obj(mesh, &fs::read_to_string(path)?)?;

    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    for library in report.material_libraries.clone() {
        let mtl_path = dir.join(&library);
        match fs::read_to_string(&mtl_path) {
            Ok(text) => {
                report.materials_added += import_mtl(mesh, &text)?.materials_added;
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(path = %mtl_path.display(), "material library not found");
            }
            Err(err) => return Err(err.into()),
        }
    }

    debug!(path = %path.display(), materials = report.materials_added, "loaded OBJ");
    Ok(report)
}
