//! Camera supplied by the host each frame

use crate::core::types::{Mat4, Vec3, Vec4};
use crate::math::Ray;

const DEFAULT_FOV_DEGREES: f32 = 60.0;
const DEFAULT_ASPECT: f32 = 16.0 / 9.0;
const NEAR: f32 = 0.1;
const FAR: f32 = 500.0;

/// Eye position, viewing direction and perspective lens.
///
/// The LOD pass reads [`Camera::view_projection`] for frustum planes and
/// `position` for distances; hit testing unprojects through the same matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Unit viewing direction.
    pub forward: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Width / height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Camera at `position` looking down -Z.
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: NEAR,
            far: FAR,
        }
    }

    /// Camera at `position` facing `target`, with the default lens.
    ///
    /// A target equal to the position keeps the -Z default direction.
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let mut camera = Self::new(position, DEFAULT_FOV_DEGREES, DEFAULT_ASPECT);
        camera.forward = (target - position).try_normalize().unwrap_or(Vec3::NEG_Z);
        // Keep `up` usable when it is parallel to the view direction
        camera.up = if camera.forward.cross(up).length_squared() > 1e-8 { up } else { Vec3::Z };
        camera
    }

    /// Replace the lens, keeping the pose.
    pub fn with_lens(mut self, fov_y_degrees: f32, aspect: f32) -> Self {
        self.fov_y = fov_y_degrees.to_radians();
        self.aspect = aspect;
        self
    }

    /// Match the viewport; a zero height is ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Build a picking ray from normalized device coordinates.
    ///
    /// `ndc` is in `[-1, 1]` on both axes with +Y up, the usual conversion of
    /// a pointer position (`x / w * 2 - 1`, `1 - y / h * 2`). The ray starts
    /// on the near plane.
    pub fn ray_from_ndc(&self, ndc_x: f32, ndc_y: f32) -> Ray {
        let inv = self.view_projection().inverse();
        let unproject = |depth: f32| {
            let p = inv * Vec4::new(ndc_x, ndc_y, depth, 1.0);
            p.truncate() / p.w
        };
        // glam's perspective_rh maps depth to [0, 1]
        let near = unproject(0.0);
        let far = unproject(1.0);
        Ray::new(near, far - near)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), DEFAULT_FOV_DEGREES, DEFAULT_ASPECT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_puts_eye_at_origin() {
        let camera = Camera::look_at(Vec3::new(3.0, 4.0, -2.0), Vec3::ZERO, Vec3::Y);
        let eye = camera.view().transform_point3(camera.position);
        assert!(eye.length() < 1e-4);
        // Target lies straight ahead on -Z in view space
        let target = camera.view().transform_point3(Vec3::ZERO);
        assert!(target.x.abs() < 1e-4 && target.y.abs() < 1e-4 && target.z < 0.0);
    }

    #[test]
    fn test_look_at_faces_target() {
        let camera = Camera::look_at(Vec3::new(0.0, 10.0, 10.0), Vec3::ZERO, Vec3::Y);
        let expected = (Vec3::ZERO - camera.position).normalize();
        assert!((camera.forward - expected).length() < 1e-4);
    }

    #[test]
    fn test_degenerate_look_at_keeps_default_direction() {
        let camera = Camera::look_at(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert_eq!(camera.forward, Vec3::NEG_Z);
        let straight_down = Camera::look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, Vec3::Y);
        assert!(straight_down.view().is_finite());
    }

    #[test]
    fn test_center_ray_starts_on_near_plane() {
        let camera = Camera::default();
        let ray = camera.ray_from_ndc(0.0, 0.0);
        assert!((ray.direction - camera.forward).length() < 1e-3);
        assert!((ray.origin.z - (camera.position.z - camera.near)).abs() < 1e-3);
    }

    #[test]
    fn test_edge_ray_follows_fov() {
        let camera = Camera::new(Vec3::ZERO, 90.0, 1.0);
        let ray = camera.ray_from_ndc(0.0, 1.0);
        // Top edge of a 90 degree lens is 45 degrees up
        assert!((ray.direction.y - (-ray.direction.z)).abs() < 1e-3);
    }

    #[test]
    fn test_resize_ignores_zero_height() {
        let mut camera = Camera::default().with_lens(45.0, 1.0);
        camera.resize(800.0, 0.0);
        assert_eq!(camera.aspect, 1.0);
        camera.resize(800.0, 400.0);
        assert_eq!(camera.aspect, 2.0);
    }
}
