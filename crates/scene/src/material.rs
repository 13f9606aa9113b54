use serde::{Deserialize, Serialize};
use shadowbox_common::Color;

/// Surface shading model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Material {
    /// Flat colour, unaffected by lights and shadows.
    Basic { color: Color },
    /// Diffuse surface lit by the scene's lights.
    Standard { color: Color },
}

impl Material {
    pub fn color(&self) -> Color {
        match self {
            Material::Basic { color } | Material::Standard { color } => *color,
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Material::Standard { .. })
    }
}
