//! CPU-side mirrors of the shader structs. Field order and padding match
//! `shaders.rs` exactly.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use shadowbox_render::RenderSettings;
use shadowbox_scene::{Mesh, PointLight};

fn flag(on: bool) -> f32 {
    if on { 1.0 } else { 0.0 }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// View-projection of the viewer camera, or of one shadow cube face.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(view_proj: Mat4) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct LightUniform {
    pub position: [f32; 4],
    pub color: [f32; 4],
    /// x: range cutoff, y: decay exponent.
    pub attenuation: [f32; 4],
    /// x: shadows on, y: kernel radius in texels, z: depth bias, w: bilinear taps.
    pub shadow: [f32; 4],
    pub face_view_proj: [[[f32; 4]; 4]; 6],
}

impl LightUniform {
    /// A light that contributes nothing, for scenes without one.
    pub fn dark() -> Self {
        Self::zeroed()
    }

    pub fn new(light: &PointLight, settings: &RenderSettings, shadows_on: bool) -> Self {
        let p = light.position();
        let radiance = light.radiance();
        let faces = light
            .shadow
            .camera
            .cube_view_projections(p)
            .map(|m| m.to_cols_array_2d());
        Self {
            position: [p.x, p.y, p.z, 1.0],
            color: radiance.to_rgba(1.0),
            attenuation: [light.distance, light.decay, 0.0, 0.0],
            shadow: [
                flag(shadows_on),
                settings.shadow_map_type.kernel_radius() as f32,
                light.shadow.bias,
                flag(settings.shadow_map_type.filtered()),
            ],
            face_view_proj: faces,
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
pub(crate) struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x: lit, y: receives shadows.
    pub flags: [f32; 4],
}

impl ModelUniform {
    pub fn new(mesh: &Mesh) -> Self {
        Self {
            model: mesh.transform.matrix().to_cols_array_2d(),
            color: mesh.material.color().to_rgba(1.0),
            flags: [
                flag(mesh.material.is_lit()),
                flag(mesh.receive_shadow),
                0.0,
                0.0,
            ],
        }
    }
}
