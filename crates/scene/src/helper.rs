use crate::camera::PerspectiveCamera;
use crate::light::{PointLight, ShadowCamera};
use glam::{Vec3, Vec4Swizzles};
use serde::{Deserialize, Serialize};
use shadowbox_common::Color;

const FRUSTUM: u32 = 0xffaa00;
const CONE: u32 = 0xff0000;
const UP: u32 = 0x00aaff;
const TARGET: u32 = 0xffffff;
const CROSS: u32 = 0x333333;

/// One coloured segment of a helper wireframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelperLine {
    pub from: Vec3,
    pub to: Vec3,
    pub color: Color,
}

/// Debug wireframe of a camera frustum.
///
/// Holds a copy of the camera it visualizes; the helper is built once and
/// never follows later changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraHelper {
    pub camera: PerspectiveCamera,
}

impl CameraHelper {
    pub fn new(camera: PerspectiveCamera) -> Self {
        Self { camera }
    }

    /// Helper for a point light's shadow camera, as seen through
    /// [`ShadowCamera::HELPER_FACE`].
    pub fn for_light(light: &PointLight) -> Self {
        Self::new(
            light
                .shadow
                .camera
                .as_perspective(light.position(), ShadowCamera::HELPER_FACE),
        )
    }

    /// Map a point from normalized device space (x, y in [-1, 1], depth 0 at
    /// the near plane and 1 at the far plane) back to world space.
    fn unproject(&self, x: f32, y: f32, depth: f32) -> Vec3 {
        let inverse = self.camera.view_projection().inverse();
        let p = inverse * glam::Vec4::new(x, y, depth, 1.0);
        p.xyz() / p.w
    }

    /// Wireframe segments: near and far quads, frustum sides, the cone from
    /// the eye, the up marker, the target line and the centre crosses.
    pub fn lines(&self) -> Vec<HelperLine> {
        let eye = self.camera.position();
        let n = |x, y| self.unproject(x, y, 0.0);
        let f = |x, y| self.unproject(x, y, 1.0);

        let (n1, n2, n3, n4) = (n(-1.0, -1.0), n(1.0, -1.0), n(-1.0, 1.0), n(1.0, 1.0));
        let (f1, f2, f3, f4) = (f(-1.0, -1.0), f(1.0, -1.0), f(-1.0, 1.0), f(1.0, 1.0));
        let (u1, u2, u3) = (n(-0.7, 1.1), n(0.7, 1.1), n(0.0, 2.0));
        let (c, t) = (n(0.0, 0.0), f(0.0, 0.0));

        #[rustfmt::skip]
        let segments: [(Vec3, Vec3, u32); 25] = [
            // near
            (n1, n2, FRUSTUM), (n2, n4, FRUSTUM), (n4, n3, FRUSTUM), (n3, n1, FRUSTUM),
            // far
            (f1, f2, FRUSTUM), (f2, f4, FRUSTUM), (f4, f3, FRUSTUM), (f3, f1, FRUSTUM),
            // sides
            (n1, f1, FRUSTUM), (n2, f2, FRUSTUM), (n3, f3, FRUSTUM), (n4, f4, FRUSTUM),
            // cone
            (eye, n1, CONE), (eye, n2, CONE), (eye, n3, CONE), (eye, n4, CONE),
            // up
            (u1, u2, UP), (u2, u3, UP), (u3, u1, UP),
            // target
            (c, t, TARGET), (eye, c, TARGET),
            // cross
            (n(-1.0, 0.0), n(1.0, 0.0), CROSS), (n(0.0, -1.0), n(0.0, 1.0), CROSS),
            (f(-1.0, 0.0), f(1.0, 0.0), CROSS), (f(0.0, -1.0), f(0.0, 1.0), CROSS),
        ];

        segments
            .into_iter()
            .map(|(from, to, color)| HelperLine {
                from,
                to,
                color: Color::from_hex(color),
            })
            .collect()
    }
}
