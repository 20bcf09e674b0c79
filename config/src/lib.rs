//! # Config Crate
//!
//! Centralized configuration constants for the trellis mesh workspace.
//! Default materials, naming conventions, codec precision and the bounds used
//! by procedural generation are defined here so that the mesh and codec crates
//! agree on every literal.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{MeshConfig, DEFAULT_GROUP_NAME, JSON_FLOAT_PRECISION};
//!
//! let cfg = MeshConfig::default();
//! assert_eq!(cfg.json_precision, JSON_FLOAT_PRECISION);
//! assert_eq!(DEFAULT_GROUP_NAME, "All");
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Dependency-Free**: Only `std`, so every crate can depend on it
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
