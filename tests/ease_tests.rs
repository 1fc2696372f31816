// Host-side tests for the pure smoothing helpers.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod ease {
    include!("../src/core/ease.rs");
}
mod cursor {
    include!("../src/core/cursor.rs");
}

use cursor::*;
use ease::*;
use glam::{Vec2, Vec3};

#[test]
fn approach_moves_fraction_of_remaining_distance() {
    let next = approach(0.0, 10.0, 0.1);
    assert!((next - 1.0).abs() < 1e-6);
    let after = approach(next, 10.0, 0.1);
    assert!((after - 1.9).abs() < 1e-6);
}

#[test]
fn approach_never_overshoots() {
    let mut v = 0.0_f32;
    for _ in 0..1000 {
        let prev = v;
        v = approach(v, 1.0, 0.07);
        assert!(v >= prev);
        assert!(v <= 1.0);
    }
    // After many frames the value is effectively at the target
    assert!((1.0 - v) < 1e-3);
}

#[test]
fn approach_is_stationary_at_target() {
    assert_eq!(approach(5.0, 5.0, 0.5), 5.0);
    let v = Vec3::new(1.0, -2.0, 3.0);
    assert_eq!(approach_vec3(v, v, 0.07), v);
}

#[test]
fn approach_vec_matches_scalar_per_component() {
    let cur = Vec2::new(0.0, 4.0);
    let tgt = Vec2::new(2.0, 0.0);
    let out = approach_vec2(cur, tgt, 0.25);
    assert!((out.x - approach(cur.x, tgt.x, 0.25)).abs() < 1e-7);
    assert!((out.y - approach(cur.y, tgt.y, 0.25)).abs() < 1e-7);
}

#[test]
fn smoothstep_matches_wgsl_builtin_shape() {
    assert_eq!(smoothstep(0.0, 1.0, -1.0), 0.0);
    assert_eq!(smoothstep(0.0, 1.0, 2.0), 1.0);
    assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    // Inverted edges, the way the shader falls off with distance
    assert_eq!(smoothstep(5.8, 0.0, 6.0), 0.0);
    assert_eq!(smoothstep(5.8, 0.0, 0.0), 1.0);
}

#[test]
fn cursor_chases_target_and_activates() {
    let mut c = CursorState::new();
    assert!(!c.active());

    c.set_target(Vec2::new(0.6, -0.4), Vec3::new(2.0, -1.0, 0.0));
    c.step();
    // One frame moves 7% of the way
    assert!((c.ndc.x - 0.6 * CURSOR_SMOOTH_RATE).abs() < 1e-6);
    assert!(c.active());

    for _ in 0..400 {
        c.step();
    }
    assert!((c.ndc.x - 0.6).abs() < 1e-3);
    assert!((c.world.x - 2.0).abs() < 1e-3);
}

#[test]
fn cursor_clear_drifts_back_to_neutral() {
    let mut c = CursorState::new();
    c.set_target(Vec2::new(0.8, 0.8), Vec3::new(3.0, 3.0, 0.0));
    for _ in 0..50 {
        c.step();
    }
    assert!(c.active());

    // Pointer leaves: smoothed values decay instead of freezing
    c.clear();
    let before = c.ndc.length();
    c.step();
    assert!(c.ndc.length() < before);
    for _ in 0..400 {
        c.step();
    }
    assert!(!c.active());
}

#[test]
fn cursor_step_matches_the_shared_approach_helper() {
    let mut c = CursorState::new();
    let target = Vec2::new(0.6, -0.3);
    c.set_target(target, Vec3::new(1.2, -0.6, 0.0));
    let before = c.ndc;
    c.step();
    let expected = approach_vec2(before, target, CURSOR_SMOOTH_RATE);
    assert!((c.ndc - expected).length() < 1e-7);
}

#[test]
fn cursor_epsilon_gates_tiny_magnitudes() {
    let mut c = CursorState::new();
    c.set_target(Vec2::new(0.001, 0.0), Vec3::ZERO);
    for _ in 0..500 {
        c.step();
    }
    // Converged magnitude stays under the activation epsilon
    assert!(!c.active());
}
