use super::ease;
use glam::{Vec2, Vec3};

// Exponential smoothing rate per frame, shared by the NDC and world cursors,
// and the activation epsilon on the smoothed magnitude.
pub const CURSOR_SMOOTH_RATE: f32 = 0.07;
pub const CURSOR_ACTIVE_EPSILON: f32 = 0.002;

/// Cursor state for one rendering surface.
///
/// Raw targets jump with pointer events; the smoothed values chase them by a
/// fixed fraction per frame, producing the inertial lag the field reads.
/// Clearing resets the targets toward neutral rather than freezing the last
/// value, which would leave a stuck magnet in the field.
#[derive(Clone, Copy, Debug, Default)]
pub struct CursorState {
    target_ndc: Vec2,
    target_world: Vec3,
    pub ndc: Vec2,
    pub world: Vec3,
}

impl CursorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw pointer position (NDC) and its z = 0 plane projection.
    pub fn set_target(&mut self, ndc: Vec2, world: Vec3) {
        self.target_ndc = ndc;
        self.target_world = world;
    }

    /// Pointer left the tracked region: drift back to neutral.
    pub fn clear(&mut self) {
        self.target_ndc = Vec2::ZERO;
        self.target_world = Vec3::ZERO;
    }

    /// Advance the smoothed values one frame toward their targets.
    pub fn step(&mut self) {
        self.ndc = ease::approach_vec2(self.ndc, self.target_ndc, CURSOR_SMOOTH_RATE);
        self.world = ease::approach_vec3(self.world, self.target_world, CURSOR_SMOOTH_RATE);
    }

    /// Whether attraction/parallax should apply this frame.
    pub fn active(&self) -> bool {
        self.ndc.length() > CURSOR_ACTIVE_EPSILON
    }
}
