//! Tests for the centralized configuration constants.

use super::*;

#[test]
fn default_config_is_valid() {
    let cfg = MeshConfig::default();
    assert_eq!(cfg.json_precision, JSON_FLOAT_PRECISION);
    assert!(cfg.default_segments >= MIN_RING_SIDES);
    assert_eq!(cfg.line_color, DEFAULT_LINE_COLOR);
}

#[test]
fn new_validates_inputs() {
    assert_eq!(
        MeshConfig::new(18, 24, DEFAULT_LINE_COLOR).unwrap_err(),
        ConfigError::InvalidPrecision(18)
    );
    assert_eq!(
        MeshConfig::new(3, 2, DEFAULT_LINE_COLOR).unwrap_err(),
        ConfigError::InvalidSegments(2)
    );
}

#[test]
fn error_messages_name_the_limit() {
    let message = ConfigError::InvalidSegments(1).to_string();
    assert!(message.contains(">= 3"), "unexpected message: {message}");
}

#[test]
fn default_material_factors_are_in_unit_range() {
    assert!((0.0..=1.0).contains(&DEFAULT_METALLIC));
    assert!((0.0..=1.0).contains(&DEFAULT_ROUGHNESS));
}

#[test]
fn group_names_differ() {
    // OBJ import must be able to tell the implicit group from the primitive default
    assert_ne!(DEFAULT_GROUP_NAME, OBJ_DEFAULT_GROUP);
}

#[test]
fn sphere_minimum_is_below_ring_minimum() {
    assert!(MIN_SPHERE_SEGMENTS < MIN_RING_SIDES);
}
