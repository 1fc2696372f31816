use glam::{Mat4, Vec3, Vec4};

/// Compute a world-space ray from normalized device coordinates.
///
/// The camera sits at `(0, 0, camera_z)` looking at the origin, matching the
/// fixed look-at both GPU surfaces use. Returns `(ray_origin, ray_direction)`.
pub fn ndc_to_world_ray(ndc_x: f32, ndc_y: f32, aspect: f32, fov_y_deg: f32, camera_z: f32) -> (Vec3, Vec3) {
    let proj = Mat4::perspective_rh(fov_y_deg.to_radians(), aspect.max(1e-3), 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, camera_z), Vec3::ZERO, Vec3::Y);
    let inv = (proj * view).inverse();
    let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
    let far: Vec3 = p_far.truncate() / p_far.w;
    let ro = Vec3::new(0.0, 0.0, camera_z);
    let rd = (far - ro).normalize();
    (ro, rd)
}

/// Project an NDC cursor position onto the z = 0 world plane.
///
/// This is the attraction target the particle field pulls toward. Falls back
/// to the origin when the ray runs parallel to the plane.
pub fn ndc_to_plane(ndc_x: f32, ndc_y: f32, aspect: f32, fov_y_deg: f32, camera_z: f32) -> Vec3 {
    let (ro, rd) = ndc_to_world_ray(ndc_x, ndc_y, aspect, fov_y_deg, camera_z);
    if rd.z.abs() < 1e-6 {
        return Vec3::ZERO;
    }
    let t = -ro.z / rd.z;
    if t < 0.0 {
        return Vec3::ZERO;
    }
    ro + rd * t
}

/// View-projection matrix shared by the render layer.
pub fn view_proj(aspect: f32, fov_y_deg: f32, eye: Vec3, near: f32, far: f32) -> Mat4 {
    let proj = Mat4::perspective_rh(fov_y_deg.to_radians(), aspect.max(1e-3), near, far);
    let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
    proj * view
}
