use crate::camera::PerspectiveCamera;
use glam::{Mat4, UVec2, Vec3};
use serde::{Deserialize, Serialize};
use shadowbox_common::{Color, Transform};

/// One of the six 90 degree views a point light renders its shadow map from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl CubeFace {
    /// Shadow map layer order. Shaders pick layers by this index.
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn direction(self) -> Vec3 {
        match self {
            CubeFace::PosX => Vec3::X,
            CubeFace::NegX => Vec3::NEG_X,
            CubeFace::PosY => Vec3::Y,
            CubeFace::NegY => Vec3::NEG_Y,
            CubeFace::PosZ => Vec3::Z,
            CubeFace::NegZ => Vec3::NEG_Z,
        }
    }

    /// Up vector for the face view; never parallel to `direction`.
    pub fn up(self) -> Vec3 {
        match self {
            CubeFace::PosY => Vec3::Z,
            CubeFace::NegY => Vec3::NEG_Z,
            _ => Vec3::Y,
        }
    }

    /// Face whose frustum contains the direction `d` (major axis wins).
    pub fn containing(d: Vec3) -> Self {
        let a = d.abs();
        if a.x >= a.y && a.x >= a.z {
            if d.x > 0.0 { CubeFace::PosX } else { CubeFace::NegX }
        } else if a.y >= a.z {
            if d.y > 0.0 { CubeFace::PosY } else { CubeFace::NegY }
        } else if d.z > 0.0 {
            CubeFace::PosZ
        } else {
            CubeFace::NegZ
        }
    }
}

/// Perspective camera the light renders its shadow map with.
///
/// Only the depth range is configurable. The six faces tile the full sphere
/// of directions only at a 90 degree square frustum, so `fov_degrees` and
/// `aspect` always load as their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadowCamera {
    #[serde(skip_deserializing)]
    pub fov_degrees: f32,
    #[serde(skip_deserializing)]
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ShadowCamera {
    fn default() -> Self {
        Self {
            fov_degrees: 90.0,
            aspect: 1.0,
            near: 0.5,
            far: 500.0,
        }
    }
}

impl ShadowCamera {
    /// The face the shadow camera is left looking through after a shadow pass,
    /// which is what the helper draws.
    pub const HELPER_FACE: CubeFace = CubeFace::NegY;

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn face_view(&self, eye: Vec3, face: CubeFace) -> Mat4 {
        Mat4::look_at_rh(eye, eye + face.direction(), face.up())
    }

    pub fn face_view_projection(&self, eye: Vec3, face: CubeFace) -> Mat4 {
        self.projection_matrix() * self.face_view(eye, face)
    }

    /// All six face matrices in `CubeFace::ALL` order.
    pub fn cube_view_projections(&self, eye: Vec3) -> [Mat4; 6] {
        CubeFace::ALL.map(|face| self.face_view_projection(eye, face))
    }

    /// The shadow camera as an ordinary perspective camera placed at `eye`
    /// and looking through `face`.
    pub fn as_perspective(&self, eye: Vec3, face: CubeFace) -> PerspectiveCamera {
        let mut camera = PerspectiveCamera::new(self.fov_degrees, self.aspect, self.near, self.far);
        camera.transform = Transform {
            position: eye,
            rotation: glam::Quat::from_mat4(&self.face_view(Vec3::ZERO, face).inverse()),
            ..Transform::default()
        };
        camera
    }
}

/// Shadow-casting properties of a light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightShadow {
    pub map_size: UVec2,
    pub camera: ShadowCamera,
    /// Depth offset subtracted before the shadow comparison.
    pub bias: f32,
}

impl Default for LightShadow {
    fn default() -> Self {
        Self {
            map_size: UVec2::new(512, 512),
            camera: ShadowCamera::default(),
            bias: 0.0,
        }
    }
}

/// Omnidirectional light.
///
/// `distance == 0` means no range cutoff; `decay == 0` means no falloff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub distance: f32,
    pub decay: f32,
    pub transform: Transform,
    pub cast_shadow: bool,
    pub shadow: LightShadow,
}

impl PointLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            distance: 0.0,
            decay: 0.0,
            transform: Transform::default(),
            cast_shadow: false,
            shadow: LightShadow::default(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Colour premultiplied by intensity.
    pub fn radiance(&self) -> Color {
        self.color.scaled(self.intensity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4Swizzles;

    #[test]
    fn containing_face_follows_major_axis() {
        assert_eq!(CubeFace::containing(Vec3::new(0.1, -30.0, 2.0)), CubeFace::NegY);
        assert_eq!(CubeFace::containing(Vec3::new(5.0, 1.0, -4.0)), CubeFace::PosX);
        assert_eq!(CubeFace::containing(Vec3::new(0.0, 0.0, -1.0)), CubeFace::NegZ);
    }

    #[test]
    fn every_direction_lands_inside_its_face_frustum() {
        let eye = Vec3::new(0.0, 30.0, 0.0);
        let cam = ShadowCamera::default();
        let samples = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(9.0, -10.0, 0.0),
            Vec3::new(-10.0, 29.0, 3.0),
            Vec3::new(1.0, 31.0, 8.0),
            Vec3::new(2.0, 45.0, -1.0),
        ];
        for p in samples {
            let face = CubeFace::containing(p - eye);
            let clip = cam.face_view_projection(eye, face) * p.extend(1.0);
            let ndc = clip.xyz() / clip.w;
            assert!(clip.w > 0.0, "{p:?} behind face {face:?}");
            assert!(ndc.x.abs() <= 1.0 + 1e-4 && ndc.y.abs() <= 1.0 + 1e-4, "{p:?} outside {face:?}");
            assert!(ndc.z >= 0.0 && ndc.z <= 1.0);
        }
    }

    #[test]
    fn perspective_view_matches_face_view() {
        let eye = Vec3::new(0.0, 30.0, 0.0);
        let cam = ShadowCamera::default();
        let persp = cam.as_perspective(eye, CubeFace::NegY);
        let a = persp.view_matrix();
        let b = cam.face_view(eye, CubeFace::NegY);
        assert!(a.abs_diff_eq(b, 1e-5));
        assert!(persp.transform.forward().abs_diff_eq(Vec3::NEG_Y, 1e-5));
    }

    #[test]
    fn radiance_scales_with_intensity() {
        let light = PointLight::new(Color::WHITE, 2.0);
        assert_eq!(light.radiance().to_array(), [2.0, 2.0, 2.0]);
        assert!(!light.cast_shadow);
    }
}
