// Parallax: a continuous offset proportional to a node's distance from the
// viewport's vertical midpoint. Nodes above center drift down, nodes below
// drift up, which reads as depth while scrolling.

pub const PARALLAX_DEFAULT_COEFF: f64 = 0.06;

/// Vertical offset in CSS pixels for a node whose midpoint sits at
/// `node_mid_y` within a viewport of height `viewport_h`.
#[inline]
pub fn offset_px(node_mid_y: f64, viewport_h: f64, coeff: f64) -> f64 {
    -(node_mid_y - viewport_h / 2.0) * coeff
}

/// Sensitivity coefficient from a `data-parallax` attribute value; absent or
/// non-numeric values fall back to the default.
pub fn parse_coeff(attr: Option<&str>) -> f64 {
    match attr.and_then(|s| s.trim().parse::<f64>().ok()) {
        Some(v) if v.is_finite() && v != 0.0 => v,
        _ => PARALLAX_DEFAULT_COEFF,
    }
}
