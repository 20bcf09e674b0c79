//! # Wavefront OBJ
//!
//! Export and import of the OBJ/MTL subset the mesh model can represent:
//! positions, triangle faces, wireframe lines and per-group materials.
//! Texture coordinates and normals are ignored on import and never written.

mod export;
mod file;
mod import;
mod mtl;

pub use export::{to_mtl, to_obj, write_mtl, write_obj};
pub use file::{load_obj, load_obj_into, save_obj};
pub use import::{import_mtl, import_obj, ObjImport};
