//! # Configuration Constants
//!
//! Shared values for mesh construction and serialization.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Materials**: The default material returned on lookup misses
//! - **Naming**: Default group names used by primitives and OBJ export
//! - **Generation**: Tessellation and variation bounds
//! - **Codec**: Text precision and MTL conversion factors

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used when deciding whether a direction is degenerate (zero length) or two
/// directions are parallel.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

// =============================================================================
// MATERIAL CONSTANTS
// =============================================================================

/// Name of the sentinel material returned when a lookup misses.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_MATERIAL_NAME;
///
/// assert_eq!(DEFAULT_MATERIAL_NAME, "Default");
/// ```
pub const DEFAULT_MATERIAL_NAME: &str = "Default";

/// Base color of the default material (light gray), RGBA bytes.
pub const DEFAULT_BASE_COLOR: [u8; 4] = [204, 204, 204, 255];

/// Metallic factor of the default material.
pub const DEFAULT_METALLIC: f32 = 0.0;

/// Roughness factor of the default material.
pub const DEFAULT_ROUGHNESS: f32 = 0.5;

/// Default wireframe line color (opaque white), RGBA bytes.
pub const DEFAULT_LINE_COLOR: [u8; 4] = [255, 255, 255, 255];

// =============================================================================
// NAMING CONSTANTS
// =============================================================================

/// Group name primitives register their triangles under unless told otherwise.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_GROUP_NAME;
///
/// let requested: Option<&str> = None;
/// assert_eq!(requested.unwrap_or(DEFAULT_GROUP_NAME), "All");
/// ```
pub const DEFAULT_GROUP_NAME: &str = "All";

/// Group that collects triangles owned by no group during OBJ export, and
/// faces that precede any `usemtl` during OBJ import.
pub const OBJ_DEFAULT_GROUP: &str = "default";

// =============================================================================
// GENERATION CONSTANTS
// =============================================================================

/// Minimum number of points in a ring (circle, fan, ribbon).
///
/// # Example
///
/// ```rust
/// use config::constants::MIN_RING_SIDES;
///
/// let requested = 2;
/// assert!(requested < MIN_RING_SIDES);
/// ```
pub const MIN_RING_SIDES: usize = 3;

/// Minimum latitude band count for a sphere (one band per hemisphere).
pub const MIN_SPHERE_SEGMENTS: usize = 2;

/// Default tessellation count for circular primitives.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEFAULT_SEGMENTS, MIN_RING_SIDES};
///
/// assert!(DEFAULT_SEGMENTS >= MIN_RING_SIDES);
/// ```
pub const DEFAULT_SEGMENTS: usize = 16;

/// Minimum number of sibling materials a group variation must produce.
pub const MIN_VARIATIONS: usize = 2;

/// Scale applied to the variation amount for byte color channels.
///
/// A variation amount of `0.1` moves each RGB channel by at most
/// `0.1 * 255` levels.
pub const VARIATION_COLOR_SCALE: f32 = 255.0;

// =============================================================================
// CODEC CONSTANTS
// =============================================================================

/// Number of decimals written for floats in the JSON element strings.
///
/// # Example
///
/// ```rust
/// use config::constants::JSON_FLOAT_PRECISION;
///
/// assert_eq!(format!("{:.*}", JSON_FLOAT_PRECISION, 1.0), "1.000");
/// ```
pub const JSON_FLOAT_PRECISION: usize = 3;

/// Largest precision worth writing for an `f64`.
pub const MAX_JSON_FLOAT_PRECISION: usize = 17;

/// Upper bound of the MTL `Ns` (specular exponent) range.
pub const MTL_SHININESS_MAX: f32 = 1000.0;

/// Specular reflectance of a non-metal, used to derive MTL `Ks`.
pub const MTL_DIELECTRIC_SPECULAR: f32 = 0.04;

/// Illumination model written for every MTL block.
pub const MTL_ILLUM_MODEL: u32 = 2;

// =============================================================================
// MESH CONFIG
// =============================================================================

/// Immutable snapshot of the tunable settings shared between crates.
///
/// # Examples
/// ```
/// use config::constants::MeshConfig;
/// let config = MeshConfig::default();
/// assert!(config.default_segments >= 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshConfig {
    /// Decimals written for floats in JSON element strings.
    pub json_precision: usize,
    /// Default segment count for circular primitives.
    pub default_segments: usize,
    /// Wireframe color applied by primitives, RGBA bytes.
    pub line_color: [u8; 4],
}

impl MeshConfig {
    /// Builds a configuration, validating precision and segment count.
    ///
    /// # Examples
    /// ```
    /// use config::constants::MeshConfig;
    /// let cfg = MeshConfig::new(6, 24, [0, 0, 0, 255]).expect("valid config");
    /// assert_eq!(cfg.default_segments, 24);
    /// ```
    pub fn new(
        json_precision: usize,
        default_segments: usize,
        line_color: [u8; 4],
    ) -> Result<Self, ConfigError> {
        if json_precision > MAX_JSON_FLOAT_PRECISION {
            return Err(ConfigError::InvalidPrecision(json_precision));
        }
        if default_segments < MIN_RING_SIDES {
            return Err(ConfigError::InvalidSegments(default_segments));
        }
        Ok(Self {
            json_precision,
            default_segments,
            line_color,
        })
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            json_precision: JSON_FLOAT_PRECISION,
            default_segments: DEFAULT_SEGMENTS,
            line_color: DEFAULT_LINE_COLOR,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Raised when the float precision exceeds what an `f64` carries.
    InvalidPrecision(usize),
    /// Raised when the requested segment count is too small to form a ring.
    InvalidSegments(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPrecision(value) => {
                write!(f, "json_precision must be <= {MAX_JSON_FLOAT_PRECISION}: {value}")
            }
            ConfigError::InvalidSegments(value) => {
                write!(f, "default_segments must be >= {MIN_RING_SIDES}: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

#[cfg(test)]
mod tests;
