//! Scene parameters. The defaults describe the stock scene; a config file
//! only needs to name the values it changes.

use crate::light::ShadowCamera;
use glam::{UVec2, Vec3};
use serde::{Deserialize, Serialize};
use shadowbox_common::Color;

/// Parameters for the whole scene setup sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub sphere: SphereConfig,
    pub plane: PlaneConfig,
}

/// Viewer camera. The aspect ratio always comes from the viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(0.0, 0.0, 5.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub color: Color,
    pub intensity: f32,
    /// Range cutoff; 0 disables it.
    pub distance: f32,
    /// Falloff exponent; 0 disables it.
    pub decay: f32,
    pub position: Vec3,
    pub cast_shadow: bool,
    pub shadow_map_size: UVec2,
    pub shadow_camera: ShadowCamera,
    pub shadow_bias: f32,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
            distance: 0.0,
            decay: 0.0,
            position: Vec3::new(0.0, 30.0, 0.0),
            cast_shadow: true,
            shadow_map_size: UVec2::new(512, 512),
            shadow_camera: ShadowCamera::default(),
            shadow_bias: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SphereConfig {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub color: Color,
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 32,
            color: Color::from_hex(0x00ff83),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneConfig {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub color: Color,
}

impl Default for PlaneConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 20.0,
            width_segments: 32,
            height_segments: 32,
            color: Color::from_hex(0x00ff00),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_the_stock_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.camera.fov_degrees, 45.0);
        assert_eq!(config.camera.position.z, 5.0);
        assert_eq!(config.light.shadow_map_size, UVec2::new(512, 512));
        assert_eq!(config.light.shadow_camera.near, 0.5);
        assert_eq!(config.light.shadow_camera.far, 500.0);
        assert_eq!(config.sphere.color.to_hex(), 0x00ff83);
        assert_eq!(config.plane.width_segments, 32);
    }
}
