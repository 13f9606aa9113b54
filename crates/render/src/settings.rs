use serde::{Deserialize, Serialize};
use shadowbox_common::Color;

/// Shadow map filtering algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShadowMapType {
    /// Single unfiltered depth comparison: hard, aliased edges.
    Basic,
    /// 3x3 filtered comparisons.
    Pcf,
    /// 5x5 filtered comparisons.
    #[default]
    PcfSoft,
}

impl ShadowMapType {
    /// Half-width of the square tap kernel.
    pub fn kernel_radius(self) -> u32 {
        match self {
            ShadowMapType::Basic => 0,
            ShadowMapType::Pcf => 1,
            ShadowMapType::PcfSoft => 2,
        }
    }

    /// Whether each tap uses hardware bilinear comparison filtering.
    pub fn filtered(self) -> bool {
        !matches!(self, ShadowMapType::Basic)
    }
}

/// Renderer-level switches, fixed when the renderer is bound to its surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub shadow_map_enabled: bool,
    pub shadow_map_type: ShadowMapType,
    pub clear_color: Color,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            shadow_map_enabled: true,
            shadow_map_type: ShadowMapType::PcfSoft,
            clear_color: Color::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_soft_shadows() {
        let settings = RenderSettings::default();
        assert!(settings.shadow_map_enabled);
        assert_eq!(settings.shadow_map_type, ShadowMapType::PcfSoft);
        assert_eq!(settings.clear_color.to_hex(), 0x000000);
    }

    #[test]
    fn kernel_grows_with_softness() {
        assert_eq!(ShadowMapType::Basic.kernel_radius(), 0);
        assert!(!ShadowMapType::Basic.filtered());
        assert!(ShadowMapType::Pcf.kernel_radius() < ShadowMapType::PcfSoft.kernel_radius());
    }
}
