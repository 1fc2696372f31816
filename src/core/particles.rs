use super::ease;
use glam::Vec3;
use rand::Rng;

// Firefly field tuning. Count and per-particle attributes are fixed at spawn;
// only the shader-derived on-screen position varies per frame.
pub const PARTICLE_COUNT: usize = 520;

// Spawn bounding box (wide X, modest Y, moderate depth)
pub const SPAWN_EXTENT_X: f32 = 14.0;
pub const SPAWN_EXTENT_Y: f32 = 7.0;
pub const SPAWN_EXTENT_Z: f32 = 8.0;

// Per-particle sprite scale range
pub const SCALE_MIN: f32 = 0.6;
pub const SCALE_SPAN: f32 = 1.6;

// Cursor attraction falloff
pub const INFLUENCE_RADIUS: f32 = 5.8;
pub const INFLUENCE_EXPONENT: f32 = 2.2;
// Screen-space parallax strength applied from the smoothed NDC cursor
pub const CURSOR_PARALLAX_STRENGTH: f32 = 0.35;

/// One firefly. Immutable after spawn; motion is a pure function of time,
/// phase, and cursor state evaluated in the vertex shader.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub scale: f32,
    pub phase: f32,
}

/// Spawn `count` particles uniformly inside the bounding box.
pub fn spawn_particles(count: usize, rng: &mut impl Rng) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            position: Vec3::new(
                (rng.gen::<f32>() - 0.5) * SPAWN_EXTENT_X,
                (rng.gen::<f32>() - 0.5) * SPAWN_EXTENT_Y,
                (rng.gen::<f32>() - 0.5) * SPAWN_EXTENT_Z,
            ),
            scale: SCALE_MIN + rng.gen::<f32>() * SCALE_SPAN,
            phase: rng.gen::<f32>() * std::f32::consts::TAU,
        })
        .collect()
}

/// CPU mirror of the shader's attraction falloff, kept for property tests:
/// a power-shaped smoothstep of distance from the cursor's world position.
pub fn attraction_influence(distance: f32) -> f32 {
    ease::smoothstep(INFLUENCE_RADIUS, 0.0, distance).powf(INFLUENCE_EXPONENT)
}

/// Parse a `#RRGGBB` accent color into linear-ish 0..1 RGB. Invalid input
/// falls back to the portfolio's default accent.
pub fn parse_accent(css: &str) -> [f32; 3] {
    fn hex_pair(s: &str) -> Option<f32> {
        u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0)
    }
    let s = css.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Some(r), Some(g), Some(b)) =
                (hex_pair(&hex[0..2]), hex_pair(&hex[2..4]), hex_pair(&hex[4..6]))
            {
                return [r, g, b];
            }
        }
    }
    // #E46A2E
    [228.0 / 255.0, 106.0 / 255.0, 46.0 / 255.0]
}
