// Host-side tests for firefly spawning and the cursor influence falloff.

#![allow(dead_code)]
mod ease {
    include!("../src/core/ease.rs");
}
mod particles {
    include!("../src/core/particles.rs");
}

use particles::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn spawn_fills_requested_count() {
    let mut rng = StdRng::seed_from_u64(7);
    let field = spawn_particles(PARTICLE_COUNT, &mut rng);
    assert_eq!(field.len(), 520);
}

#[test]
fn spawn_positions_stay_inside_bounding_box() {
    let mut rng = StdRng::seed_from_u64(42);
    for p in spawn_particles(PARTICLE_COUNT, &mut rng) {
        assert!(p.position.x.abs() <= SPAWN_EXTENT_X / 2.0);
        assert!(p.position.y.abs() <= SPAWN_EXTENT_Y / 2.0);
        assert!(p.position.z.abs() <= SPAWN_EXTENT_Z / 2.0);
    }
}

#[test]
fn spawn_scales_and_phases_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(1234);
    for p in spawn_particles(PARTICLE_COUNT, &mut rng) {
        assert!(p.scale >= SCALE_MIN);
        assert!(p.scale <= SCALE_MIN + SCALE_SPAN);
        assert!(p.phase >= 0.0);
        assert!(p.phase < std::f32::consts::TAU);
    }
}

#[test]
fn spawn_is_deterministic_per_seed() {
    let a = spawn_particles(32, &mut StdRng::seed_from_u64(9));
    let b = spawn_particles(32, &mut StdRng::seed_from_u64(9));
    for (pa, pb) in a.iter().zip(&b) {
        assert_eq!(pa.position, pb.position);
        assert_eq!(pa.scale, pb.scale);
        assert_eq!(pa.phase, pb.phase);
    }
}

#[test]
fn influence_is_one_at_cursor_and_zero_at_radius() {
    assert!((attraction_influence(0.0) - 1.0).abs() < 1e-6);
    assert_eq!(attraction_influence(INFLUENCE_RADIUS), 0.0);
    assert_eq!(attraction_influence(INFLUENCE_RADIUS * 2.0), 0.0);
}

#[test]
fn influence_decreases_monotonically_with_distance() {
    let mut prev = attraction_influence(0.0);
    let steps = 64;
    for i in 1..=steps {
        let d = INFLUENCE_RADIUS * i as f32 / steps as f32;
        let v = attraction_influence(d);
        assert!(v <= prev + 1e-6, "influence rose at d={}", d);
        assert!((0.0..=1.0).contains(&v));
        prev = v;
    }
}

#[test]
fn influence_exponent_sharpens_the_falloff() {
    // Power shaping pulls the midpoint below the plain smoothstep value
    let mid = attraction_influence(INFLUENCE_RADIUS / 2.0);
    assert!(mid < 0.5);
    assert!(mid > 0.0);
}

#[test]
fn accent_parses_hash_hex() {
    let [r, g, b] = parse_accent("#FF8000");
    assert!((r - 1.0).abs() < 1e-6);
    assert!((g - 128.0 / 255.0).abs() < 1e-6);
    assert!((b - 0.0).abs() < 1e-6);
}

#[test]
fn accent_falls_back_on_bad_input() {
    let default = parse_accent("#E46A2E");
    for bad in ["", "orange", "#12", "#GGGGGG", "rgb(1,2,3)"] {
        assert_eq!(parse_accent(bad), default);
    }
    assert!((default[0] - 228.0 / 255.0).abs() < 1e-6);
}
