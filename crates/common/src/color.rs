use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Linear RGB colour.
///
/// Parsed from and printed as sRGB hex (`#rrggbb`), the way colours are
/// usually written in scene descriptions. Shaders receive the linear values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// Errors from parsing a hex colour string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("colour must be 6 hex digits, got {0:?}")]
    Length(String),
    #[error("invalid hex digit in colour {0:?}")]
    Digit(String),
}

impl Color {
    pub const WHITE: Self = Self::linear(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::linear(0.0, 0.0, 0.0);

    pub const fn linear(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed sRGB `0xrrggbb` value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    /// Packed sRGB `0xrrggbb` value.
    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (linear_to_srgb(c).clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Scale every channel, e.g. by a light's intensity.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::linear(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_rgba(&self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        if digits.len() != 6 {
            return Err(ColorParseError::Length(s.to_string()));
        }
        let hex = u32::from_str_radix(digits, 16).map_err(|_| ColorParseError::Digit(s.to_string()))?;
        Ok(Self::from_hex(hex))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hash_and_0x_forms() {
        let a: Color = "#00ff83".parse().unwrap();
        let b: Color = "0x00ff83".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_hex(), 0x00ff83);
        assert_eq!(a.to_string(), "#00ff83");
    }

    #[test]
    fn primaries_are_exact() {
        let green = Color::from_hex(0x00ff00);
        assert_eq!(green.r, 0.0);
        assert!((green.g - 1.0).abs() < 1e-6);
        assert_eq!(green.b, 0.0);
        assert_eq!(Color::from_hex(0xffffff).to_hex(), 0xffffff);
    }

    #[test]
    fn rejects_bad_strings() {
        assert!(matches!("#fff".parse::<Color>(), Err(ColorParseError::Length(_))));
        assert!(matches!("#gg0000".parse::<Color>(), Err(ColorParseError::Digit(_))));
    }

    #[test]
    fn mid_grey_is_linearized() {
        let grey = Color::from_hex(0x808080);
        assert!(grey.r > 0.2 && grey.r < 0.23);
    }
}
