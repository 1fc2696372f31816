// Host-side tests for the product preview interaction model and card mesh.

#![allow(dead_code)]
mod ease {
    include!("../src/core/ease.rs");
}
mod preview {
    include!("../src/core/preview.rs");
}

use glam::Vec2;
use preview::*;

#[test]
fn drag_accumulates_and_clamps_rotation() {
    let mut i = PreviewInteraction::new();
    i.pointer_down(100.0, 100.0);
    assert!(i.dragging());

    // A huge horizontal drag hits the yaw clamp
    i.pointer_move(true, 600.0, 100.0, Vec2::ZERO);
    assert!((i.rot_target.y - ROT_CLAMP_Y).abs() < 1e-6);
    assert_eq!(i.rot_target.x, 0.0);

    // And an equal opposite drag walks it back
    i.pointer_move(true, 100.0, 100.0, Vec2::ZERO);
    assert!(i.rot_target.y < ROT_CLAMP_Y);
}

#[test]
fn drag_vertical_clamps_pitch() {
    let mut i = PreviewInteraction::new();
    i.pointer_down(0.0, 0.0);
    i.pointer_move(true, 0.0, 1000.0, Vec2::ZERO);
    assert!((i.rot_target.x - ROT_CLAMP_X).abs() < 1e-6);
    i.pointer_move(true, 0.0, -2000.0, Vec2::ZERO);
    assert!((i.rot_target.x + ROT_CLAMP_X).abs() < 1e-6);
}

#[test]
fn hover_tilts_without_dragging() {
    let mut i = PreviewInteraction::new();
    i.pointer_move(true, 50.0, 50.0, Vec2::new(1.0, -1.0));
    assert!((i.rot_target.x - -HOVER_TILT_X).abs() < 1e-6);
    assert!((i.rot_target.y - HOVER_TILT_Y).abs() < 1e-6);
}

#[test]
fn pointer_leaving_recenters_targets() {
    let mut i = PreviewInteraction::new();
    i.wheel(-100.0);
    i.pointer_move(true, 0.0, 0.0, Vec2::new(0.5, 0.5));
    assert!(i.rot_target != Vec2::ZERO);

    i.pointer_move(false, 0.0, 0.0, Vec2::ZERO);
    assert_eq!(i.rot_target, Vec2::ZERO);
    assert_eq!(i.zoom_target, ZOOM_DEFAULT);
}

#[test]
fn wheel_steps_are_sign_only_and_clamped() {
    let mut i = PreviewInteraction::new();
    // Magnitude is irrelevant, only direction counts
    i.wheel(1.0);
    let one_step = i.zoom_target;
    let mut j = PreviewInteraction::new();
    j.wheel(5000.0);
    assert_eq!(j.zoom_target, one_step);
    assert!((one_step - (ZOOM_DEFAULT + ZOOM_STEP)).abs() < 1e-6);

    for _ in 0..100 {
        i.wheel(1.0);
    }
    assert_eq!(i.zoom_target, ZOOM_MAX);
    for _ in 0..100 {
        i.wheel(-1.0);
    }
    assert_eq!(i.zoom_target, ZOOM_MIN);

    i.wheel(0.0);
    assert_eq!(i.zoom_target, ZOOM_MIN);
}

#[test]
fn step_converges_to_targets() {
    let mut i = PreviewInteraction::new();
    i.pointer_down(0.0, 0.0);
    i.pointer_move(true, 80.0, 40.0, Vec2::ZERO);
    i.wheel(1.0);
    for _ in 0..500 {
        i.step();
    }
    assert!((i.rot - i.rot_target).length() < 1e-3);
    assert!((i.zoom - i.zoom_target).abs() < 1e-3);
}

#[test]
fn bob_is_bounded_and_periodic() {
    for k in 0..200 {
        let t = k as f32 * 0.1;
        assert!(PreviewInteraction::bob(t).abs() <= BOB_AMPLITUDE + 1e-6);
    }
    let period = std::f32::consts::TAU / BOB_FREQUENCY;
    assert!((PreviewInteraction::bob(1.0) - PreviewInteraction::bob(1.0 + period)).abs() < 1e-4);
}

#[test]
fn card_mesh_has_expected_topology() {
    let mesh = build_card_mesh();
    let verts = (CARD_SEGMENTS_X + 1) * (CARD_SEGMENTS_Y + 1);
    assert_eq!(mesh.positions.len(), verts);
    assert_eq!(mesh.normals.len(), verts);
    assert_eq!(mesh.uvs.len(), verts);
    assert_eq!(mesh.indices.len(), CARD_SEGMENTS_X * CARD_SEGMENTS_Y * 6);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < verts));
}

#[test]
fn card_mesh_is_displaced_within_amplitudes() {
    let mesh = build_card_mesh();
    let max_z = CARD_BEND + CARD_WARP + 1e-5;
    let mut any_displaced = false;
    for p in &mesh.positions {
        assert!(p[0].abs() <= CARD_WIDTH / 2.0 + 1e-5);
        assert!(p[1].abs() <= CARD_HEIGHT / 2.0 + 1e-5);
        assert!(p[2].abs() <= max_z);
        if p[2].abs() > 1e-4 {
            any_displaced = true;
        }
    }
    assert!(any_displaced);
    // The right edge midline carries the full bend plus the full warp
    assert!((card_depth(CARD_WIDTH / 2.0, 0.0) - (CARD_BEND + CARD_WARP)).abs() < 1e-5);
    // The displacement is antisymmetric in x
    assert!((card_depth(-CARD_WIDTH / 2.0, 0.0) - (-CARD_BEND + CARD_WARP)).abs() < 1e-5);
}

#[test]
fn card_normals_are_unit_and_front_facing() {
    let mesh = build_card_mesh();
    for n in &mesh.normals {
        let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
        assert!((len - 1.0).abs() < 1e-4);
        // Gentle displacement never flips a normal backwards
        assert!(n[2] > 0.0);
    }
}

#[test]
fn frame_mesh_is_a_flat_backing_plate() {
    let mesh = build_frame_mesh();
    assert_eq!(mesh.positions.len(), 4);
    assert_eq!(mesh.indices.len(), 6);
    for p in &mesh.positions {
        assert_eq!(p[2], FRAME_Z);
        assert!(p[0].abs() <= FRAME_WIDTH / 2.0 + 1e-5);
        assert!(p[1].abs() <= FRAME_HEIGHT / 2.0 + 1e-5);
    }
    assert!(FRAME_WIDTH > CARD_WIDTH && FRAME_HEIGHT > CARD_HEIGHT);
}
