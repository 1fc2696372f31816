use glam::{Vec2, Vec3};

/// Per-frame exponential interpolation toward a target.
///
/// Each call moves `current` a fixed fraction of the remaining distance, which
/// produces inertial motion that converges monotonically and never overshoots.
#[inline]
pub fn approach(current: f32, target: f32, rate: f32) -> f32 {
    current + (target - current) * rate
}

#[inline]
pub fn approach_vec2(current: Vec2, target: Vec2, rate: f32) -> Vec2 {
    current + (target - current) * rate
}

#[inline]
pub fn approach_vec3(current: Vec3, target: Vec3, rate: f32) -> Vec3 {
    current + (target - current) * rate
}

/// Hermite smoothstep matching the WGSL builtin, usable with inverted edges.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
