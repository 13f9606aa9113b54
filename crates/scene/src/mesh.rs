use crate::geometry::Geometry;
use crate::material::Material;
use serde::{Deserialize, Serialize};
use shadowbox_common::Transform;

/// Renderable object: a geometry drawn with a material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: Material,
    pub transform: Transform,
    /// Rendered into the light's shadow map.
    pub cast_shadow: bool,
    /// Darkened where the shadow map says the light is occluded.
    pub receive_shadow: bool,
}

impl Mesh {
    /// A mesh at the origin that neither casts nor receives shadows.
    pub fn new(geometry: Geometry, material: Material) -> Self {
        Self {
            geometry,
            material,
            transform: Transform::default(),
            cast_shadow: false,
            receive_shadow: false,
        }
    }
}
