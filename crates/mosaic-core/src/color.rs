//! Color handling for region aesthetics.
//!
//! [`Color`] wraps the `DynamicColor` type from the color crate so fills and
//! strokes accept any CSS color string ("#ff0000", "rgb(255, 0, 0)", "red").

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Rgba8, Srgb};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// A CSS color used for fills and strokes.
///
/// Two colors are equal when they paint the same 8-bit sRGB value, however
/// they were spelled: `gray`, `#808080` and `rgb(128, 128, 128)` compare
/// equal.
#[derive(Clone, Copy, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    fn rgba8(&self) -> Rgba8 {
        self.color.to_alpha_color::<Srgb>().to_rgba8()
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.rgba8() == other.rgba8()
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let Rgba8 { r, g, b, a } = self.rgba8();
        [r, g, b, a].hash(state);
    }
}

impl Color {
    /// Parses a CSS color string.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_core::color::Color;
    ///
    /// let steel = Color::new("steelblue").unwrap();
    /// let red = Color::new("#ff0000").unwrap();
    /// assert_ne!(steel, red);
    /// assert!(Color::new("not-a-color").is_err());
    /// ```
    pub fn new(color_str: &str) -> Result<Self, ConfigError> {
        DynamicColor::from_str(color_str)
            .map(|color| Self { color })
            .map_err(|err| ConfigError::InvalidColor {
                value: color_str.to_string(),
                reason: err.to_string(),
            })
    }

    /// Returns the alpha component, between 0.0 (transparent) and 1.0 (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::new(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_new() {
        assert!(Color::new("#ff0000").is_ok());
        assert!(Color::new("lightgray").is_ok());

        let invalid = Color::new("not-a-color");
        assert!(matches!(invalid, Err(ConfigError::InvalidColor { .. })));
    }

    #[test]
    fn test_color_default() {
        assert_eq!(Color::default().to_string(), "black");
    }

    #[test]
    fn test_color_alpha() {
        assert!((Color::new("red").unwrap().alpha() - 1.0).abs() < 0.001);
        let translucent = Color::new("rgba(255, 0, 0, 0.5)").unwrap();
        assert!((translucent.alpha() - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_color_from_str_matches_new() {
        let parsed: Color = "blue".parse().unwrap();
        assert_eq!(parsed, Color::new("blue").unwrap());
    }

    #[test]
    fn test_color_serde_rejects_invalid() {
        #[derive(Debug, Deserialize)]
        struct Holder {
            #[allow(dead_code)]
            fill: Color,
        }

        assert!(toml::from_str::<Holder>(r#"fill = "navy""#).is_ok());
        assert!(toml::from_str::<Holder>(r#"fill = "nope""#).is_err());
    }

    #[test]
    fn test_color_eq_hash() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Color::new("red").unwrap());
        assert!(set.contains(&Color::new("red").unwrap()));
        assert!(!set.contains(&Color::new("blue").unwrap()));
    }

    #[test]
    fn test_color_eq_ignores_spelling() {
        use std::collections::HashSet;

        let gray = Color::new("gray").unwrap();
        let hex = Color::new("#808080").unwrap();
        let rgb = Color::new("rgb(128, 128, 128)").unwrap();
        assert_eq!(gray, hex);
        assert_eq!(gray, rgb);
        assert_ne!(gray, Color::new("rgba(128, 128, 128, 0.5)").unwrap());

        let set: HashSet<Color> = [gray, hex, rgb].into_iter().collect();
        assert_eq!(set.len(), 1);
    }
}
