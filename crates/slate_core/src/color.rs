//! Color types and utilities

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex value (0xRRGGBB or 0xRRGGBBAA)
    pub fn from_hex(hex: u32) -> Self {
        if hex > 0xFFFFFF {
            Self::from_rgba8(
                ((hex >> 24) & 0xFF) as u8,
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
            )
        } else {
            Self::from_rgba8(
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
                255,
            )
        }
    }

    /// Copy with a replaced alpha component
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { a: alpha, ..self }
    }

    /// Copy with the alpha multiplied (scrollbar fade, disabled states)
    pub fn fade(self, opacity: f32) -> Self {
        Self {
            a: self.a * opacity.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Components as u8 (0-255)
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

/// Theme files spell colors as `"#RRGGBB"` or `"#RRGGBBAA"` strings.
impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a hex color string like \"#1E1E1E\" or \"#1E1E1EFF\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Color, E>
            where
                E: de::Error,
            {
                let digits = value.strip_prefix('#').unwrap_or(value);
                if digits.len() != 6 && digits.len() != 8 {
                    return Err(E::custom(format!("invalid hex color length: {value:?}")));
                }
                let parsed = u32::from_str_radix(digits, 16)
                    .map_err(|_| E::custom(format!("invalid hex color: {value:?}")))?;
                if digits.len() == 8 {
                    // Force the RRGGBBAA path even when the top byte is zero
                    Ok(Color::from_rgba8(
                        ((parsed >> 24) & 0xFF) as u8,
                        ((parsed >> 16) & 0xFF) as u8,
                        ((parsed >> 8) & 0xFF) as u8,
                        (parsed & 0xFF) as u8,
                    ))
                } else {
                    Ok(Color::from_hex(parsed))
                }
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_rgb() {
        let c = Color::from_hex(0x4287F5);
        assert_eq!(c.to_rgba8(), [0x42, 0x87, 0xF5, 0xFF]);
    }

    #[test]
    fn test_from_hex_rgba() {
        let c = Color::from_hex(0x4287F580);
        assert_eq!(c.to_rgba8(), [0x42, 0x87, 0xF5, 0x80]);
    }

    #[test]
    fn test_fade_clamps() {
        let c = Color::WHITE.fade(2.0);
        assert_eq!(c.a, 1.0);
        let c = Color::WHITE.fade(-1.0);
        assert_eq!(c.a, 0.0);
    }

    #[test]
    fn test_deserialize_hex_string() {
        let c: Color = toml::from_str::<std::collections::HashMap<String, Color>>(
            "c = \"#1E1E1E\"",
        )
        .unwrap()["c"];
        assert_eq!(c.to_rgba8(), [0x1E, 0x1E, 0x1E, 0xFF]);

        let c: Color = toml::from_str::<std::collections::HashMap<String, Color>>(
            "c = \"#00FF0080\"",
        )
        .unwrap()["c"];
        assert_eq!(c.to_rgba8(), [0x00, 0xFF, 0x00, 0x80]);
    }
}
