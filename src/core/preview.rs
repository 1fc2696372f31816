use super::ease;
use glam::{Vec2, Vec3};

// Card plane dimensions and tessellation
pub const CARD_WIDTH: f32 = 2.3;
pub const CARD_HEIGHT: f32 = 1.55;
pub const CARD_SEGMENTS_X: usize = 80;
pub const CARD_SEGMENTS_Y: usize = 40;
// Analytic depth displacement amplitudes (bend + micro warp)
pub const CARD_BEND: f32 = 0.07;
pub const CARD_WARP: f32 = 0.02;

// Resting tilt applied to the card mesh itself, under the group rotation
pub const CARD_REST_TILT_X: f32 = -0.08;

// Backing frame plate
pub const FRAME_WIDTH: f32 = 2.44;
pub const FRAME_HEIGHT: f32 = 1.67;
pub const FRAME_Z: f32 = -0.03;
pub const FRAME_OPACITY: f32 = 0.55;

// Drag rotation: radians per pixel and per-axis clamps so the card never
// flips past a readable angle
pub const DRAG_ROTATE_SENSITIVITY: f32 = 0.004;
pub const ROT_CLAMP_X: f32 = 0.55;
pub const ROT_CLAMP_Y: f32 = 0.75;
// Passive hover tilt from pointer offset off canvas center
pub const HOVER_TILT_X: f32 = 0.28;
pub const HOVER_TILT_Y: f32 = 0.36;

// Zoom along camera Z
pub const ZOOM_DEFAULT: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.22;
pub const ZOOM_MIN: f32 = 1.85;
pub const ZOOM_MAX: f32 = 4.0;

// Per-frame smoothing rates and idle bob
pub const ROT_SMOOTH_RATE: f32 = 0.08;
pub const ZOOM_SMOOTH_RATE: f32 = 0.09;
pub const BOB_FREQUENCY: f32 = 0.9;
pub const BOB_AMPLITUDE: f32 = 0.02;

/// Drag/hover/zoom state for the product preview card.
#[derive(Clone, Copy, Debug)]
pub struct PreviewInteraction {
    pub rot_target: Vec2,
    pub rot: Vec2,
    pub zoom_target: f32,
    pub zoom: f32,
    dragging: bool,
    last: Vec2,
}

impl Default for PreviewInteraction {
    fn default() -> Self {
        Self {
            rot_target: Vec2::ZERO,
            rot: Vec2::ZERO,
            zoom_target: ZOOM_DEFAULT,
            zoom: ZOOM_DEFAULT,
            dragging: false,
            last: Vec2::ZERO,
        }
    }
}

impl PreviewInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    pub fn pointer_down(&mut self, client_x: f32, client_y: f32) {
        self.dragging = true;
        self.last = Vec2::new(client_x, client_y);
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Pointer moved. `inside` is whether the pointer is over the canvas;
    /// `ndc` is the position in normalized device coordinates when inside.
    pub fn pointer_move(&mut self, inside: bool, client_x: f32, client_y: f32, ndc: Vec2) {
        if !inside {
            self.rot_target = Vec2::ZERO;
            self.zoom_target = ZOOM_DEFAULT;
            return;
        }
        if !self.dragging {
            self.rot_target = Vec2::new(ndc.y * HOVER_TILT_X, ndc.x * HOVER_TILT_Y);
            return;
        }
        let dx = client_x - self.last.x;
        let dy = client_y - self.last.y;
        self.last = Vec2::new(client_x, client_y);
        self.rot_target.x =
            (self.rot_target.x + dy * DRAG_ROTATE_SENSITIVITY).clamp(-ROT_CLAMP_X, ROT_CLAMP_X);
        self.rot_target.y =
            (self.rot_target.y + dx * DRAG_ROTATE_SENSITIVITY).clamp(-ROT_CLAMP_Y, ROT_CLAMP_Y);
    }

    /// Discrete wheel tick; only the sign of the delta matters.
    pub fn wheel(&mut self, delta_y: f32) {
        let dir = if delta_y > 0.0 {
            1.0
        } else if delta_y < 0.0 {
            -1.0
        } else {
            return;
        };
        self.zoom_target = (self.zoom_target + dir * ZOOM_STEP).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Advance rotation and zoom one frame toward their targets.
    pub fn step(&mut self) {
        self.rot = ease::approach_vec2(self.rot, self.rot_target, ROT_SMOOTH_RATE);
        self.zoom = ease::approach(self.zoom, self.zoom_target, ZOOM_SMOOTH_RATE);
    }

    /// Idle vertical bob offset for elapsed seconds `t`.
    pub fn bob(t: f32) -> f32 {
        (t * BOB_FREQUENCY).sin() * BOB_AMPLITUDE
    }
}

/// Depth displacement for a vertex at plane coordinates `(x, y)`: a subtle
/// bend along X plus a micro warp along Y, so the card reads as curved.
#[inline]
pub fn card_depth(x: f32, y: f32) -> f32 {
    ((x / CARD_WIDTH) * std::f32::consts::PI).sin() * CARD_BEND
        + ((y / CARD_HEIGHT) * std::f32::consts::PI).cos() * CARD_WARP
}

/// CPU-side mesh: interleaving happens at upload time in the render layer.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
}

/// Build the subdivided, depth-displaced card plane with recomputed normals.
pub fn build_card_mesh() -> MeshData {
    build_grid(CARD_WIDTH, CARD_HEIGHT, CARD_SEGMENTS_X, CARD_SEGMENTS_Y, true)
}

/// Build the flat translucent backing plate behind the card.
pub fn build_frame_mesh() -> MeshData {
    let mut mesh = build_grid(FRAME_WIDTH, FRAME_HEIGHT, 1, 1, false);
    for p in &mut mesh.positions {
        p[2] = FRAME_Z;
    }
    mesh
}

fn build_grid(width: f32, height: f32, seg_x: usize, seg_y: usize, displace: bool) -> MeshData {
    let nx = seg_x + 1;
    let ny = seg_y + 1;
    let mut mesh = MeshData::default();
    mesh.positions.reserve(nx * ny);
    mesh.uvs.reserve(nx * ny);

    for iy in 0..ny {
        let v = iy as f32 / seg_y as f32;
        let y = (0.5 - v) * height;
        for ix in 0..nx {
            let u = ix as f32 / seg_x as f32;
            let x = (u - 0.5) * width;
            let z = if displace { card_depth(x, y) } else { 0.0 };
            mesh.positions.push([x, y, z]);
            mesh.uvs.push([u, v]);
        }
    }

    for iy in 0..seg_y {
        for ix in 0..seg_x {
            let a = (iy * nx + ix) as u32;
            let b = a + 1;
            let c = a + nx as u32;
            let d = c + 1;
            mesh.indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    mesh.normals = compute_normals(&mesh.positions, &mesh.indices);
    mesh
}

/// Area-weighted vertex normals, recomputed after displacement.
pub fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut acc = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let a = Vec3::from_array(positions[ia]);
        let b = Vec3::from_array(positions[ib]);
        let c = Vec3::from_array(positions[ic]);
        let n = (b - a).cross(c - a);
        acc[ia] += n;
        acc[ib] += n;
        acc[ic] += n;
    }
    acc.into_iter()
        .map(|n| n.normalize_or_zero().to_array())
        .collect()
}
