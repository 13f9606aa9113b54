use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use shadowbox_common::Transform;

/// Perspective camera. `fov_degrees` is the vertical field of view.
///
/// Looks down its local -Z axis, so with an identity rotation it faces the
/// origin from any point on +Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub transform: Transform,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            aspect: 1.0,
            near: 0.1,
            far: 2000.0,
            transform: Transform::default(),
        }
    }
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_degrees,
            aspect,
            near,
            far,
            transform: Transform::default(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn view_matrix(&self) -> Mat4 {
        let eye = self.transform.position;
        Mat4::look_at_rh(eye, eye + self.transform.forward(), self.transform.up())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4Swizzles;

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        let vp = cam.view_projection();
        // Should produce a valid matrix (no NaN)
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let mut cam = PerspectiveCamera::new(45.0, 800.0 / 600.0, 0.1, 100.0);
        cam.transform.position = Vec3::new(0.0, 0.0, 5.0);
        let clip = cam.view_projection() * Vec3::ZERO.extend(1.0);
        let ndc = clip.xyz() / clip.w;
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn points_behind_far_plane_are_clipped() {
        let mut cam = PerspectiveCamera::new(45.0, 1.0, 0.1, 100.0);
        cam.transform.position = Vec3::new(0.0, 0.0, 5.0);
        let clip = cam.view_projection() * Vec3::new(0.0, 0.0, -200.0).extend(1.0);
        assert!(clip.z / clip.w > 1.0);
    }
}
