//! # Trellis Codec
//!
//! Serialization for [`trellis_mesh`] meshes.
//!
//! ## Formats
//!
//! - **JSON**: a document of element strings keyed by id ([`json`])
//! - **Binary**: little-endian color meshes, caller-selected width ([`binary`])
//! - **OBJ/MTL**: Wavefront export and import with group materials ([`obj`])
//!
//! ## Usage
//!
//! ```rust
//! use trellis_codec::{from_json, to_json, JsonOptions};
//! use trellis_mesh::{basic_cube, Color, Material};
//!
//! let cube = basic_cube(2.0, &Material::fallback(), Color::WHITE).unwrap();
//! let json = to_json(&cube, &JsonOptions::default()).unwrap();
//! let decoded = from_json(&json).unwrap();
//! assert_eq!(decoded.triangle_count(), 12);
//! ```

pub mod binary;
pub mod error;
pub mod json;
pub mod obj;
pub mod text;

pub use binary::{from_bytes, to_bytes, try_from_bytes, BinaryWidth, PartialMesh};
pub use error::{CodecError, CodecResult};
pub use json::{from_json, from_json_into, to_json, JsonOptions};
pub use obj::{import_obj, load_obj, save_obj, to_mtl, to_obj, ObjImport};
pub use text::Element;
