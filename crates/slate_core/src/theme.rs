//! Theme palette
//!
//! A named color palette, immutable during a frame and swappable between
//! frames. Themes deserialize from TOML with hex color strings; fields left
//! out of a theme file fall back to the built-in dark palette.

use crate::color::Color;
use serde::Deserialize;

/// The shell's color palette
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub background_hover: Color,
    pub background_focused: Color,
    pub primary: Color,
    pub primary_hover: Color,
    pub primary_focused: Color,
    pub secondary: Color,
    pub secondary_hover: Color,
    pub secondary_focused: Color,
    pub text: Color,
    pub text_secondary: Color,
    pub scrollbar_track: Color,
    pub scrollbar_thumb: Color,
    pub scrollbar_thumb_hover: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::from_rgba8(30, 30, 30, 255),
            background_hover: Color::from_rgba8(40, 40, 40, 255),
            background_focused: Color::from_rgba8(45, 45, 45, 255),
            primary: Color::from_rgba8(66, 135, 245, 255),
            primary_hover: Color::from_rgba8(87, 150, 255, 255),
            primary_focused: Color::from_rgba8(100, 160, 255, 255),
            secondary: Color::from_rgba8(45, 45, 45, 255),
            secondary_hover: Color::from_rgba8(55, 55, 55, 255),
            secondary_focused: Color::from_rgba8(65, 65, 65, 255),
            text: Color::from_rgba8(255, 255, 255, 255),
            text_secondary: Color::from_rgba8(180, 180, 180, 255),
            scrollbar_track: Color::from_rgba8(40, 40, 40, 200),
            scrollbar_thumb: Color::from_rgba8(80, 80, 80, 255),
            scrollbar_thumb_hover: Color::from_rgba8(100, 100, 100, 255),
        }
    }
}

impl Theme {
    /// Parse a theme from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        let theme = toml::from_str(text)?;
        tracing::debug!("theme loaded from TOML");
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let theme = Theme::default();
        assert_eq!(theme.background.to_rgba8(), [30, 30, 30, 255]);
        assert_eq!(theme.scrollbar_track.to_rgba8(), [40, 40, 40, 200]);
    }

    #[test]
    fn test_partial_toml_falls_back_to_default() {
        let theme = Theme::from_toml_str("primary = \"#FF0000\"").unwrap();
        assert_eq!(theme.primary.to_rgba8(), [255, 0, 0, 255]);
        // Untouched fields keep the default palette
        assert_eq!(theme.background, Theme::default().background);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Theme::from_toml_str("primary = \"#XYZ\"").is_err());
    }
}
