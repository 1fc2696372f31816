// Host-side tests for the scroll parallax offset math.

#![allow(dead_code)]
mod parallax {
    include!("../src/core/parallax.rs");
}

use parallax::*;

#[test]
fn node_at_viewport_center_gets_zero_offset() {
    assert_eq!(offset_px(400.0, 800.0, PARALLAX_DEFAULT_COEFF), 0.0);
}

#[test]
fn offset_sign_reads_as_depth() {
    // Above center drifts down, below center drifts up
    let above = offset_px(100.0, 800.0, PARALLAX_DEFAULT_COEFF);
    let below = offset_px(700.0, 800.0, PARALLAX_DEFAULT_COEFF);
    assert!(above > 0.0);
    assert!(below < 0.0);
    assert!((above + below).abs() < 1e-9);
}

#[test]
fn offset_scales_linearly_with_coefficient() {
    let base = offset_px(100.0, 800.0, 0.06);
    let double = offset_px(100.0, 800.0, 0.12);
    assert!((double - base * 2.0).abs() < 1e-9);
}

#[test]
fn default_coefficient_magnitude() {
    // 300px above center at the default sensitivity
    let y = offset_px(100.0, 800.0, PARALLAX_DEFAULT_COEFF);
    assert!((y - 18.0).abs() < 1e-9);
}

#[test]
fn coeff_parses_numeric_attributes() {
    assert_eq!(parse_coeff(Some("0.12")), 0.12);
    assert_eq!(parse_coeff(Some("-0.04")), -0.04);
    assert_eq!(parse_coeff(Some("  0.2  ")), 0.2);
}

#[test]
fn coeff_falls_back_for_missing_or_bad_attributes() {
    assert_eq!(parse_coeff(None), PARALLAX_DEFAULT_COEFF);
    assert_eq!(parse_coeff(Some("")), PARALLAX_DEFAULT_COEFF);
    assert_eq!(parse_coeff(Some("fast")), PARALLAX_DEFAULT_COEFF);
    assert_eq!(parse_coeff(Some("NaN")), PARALLAX_DEFAULT_COEFF);
    // Zero means "unset" in the markup convention, not "pinned"
    assert_eq!(parse_coeff(Some("0")), PARALLAX_DEFAULT_COEFF);
}
