//! Stroke dash patterns.
//!
//! [`StrokeStyle`] is the value type of the `stroke_dasharray` property. It
//! follows SVG terminology and maps directly to the `stroke-dasharray`
//! attribute:
//!
//! | Variant | `stroke-dasharray` |
//! |---------|--------------------|
//! | `Solid` | *(omitted)* |
//! | `Dashed` | `5,5` |
//! | `Dotted` | `2,3` |
//! | `DashDot` | `10,5,2,5` |
//! | `DashDotDot` | `10,5,2,5,2,5` |
//! | `Custom(p)` | `p` |
//!
//! ```
//! use mosaic_core::draw::StrokeStyle;
//!
//! let style: StrokeStyle = "dash-dot".parse().unwrap();
//! assert_eq!(style.to_svg_value(), Some("10,5,2,5".to_string()));
//! ```

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// The dash pattern of a stroke.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StrokeStyle {
    /// Solid continuous line (default)
    #[default]
    Solid,
    /// Dashed line with equal dash and gap lengths (5px dash, 5px gap)
    Dashed,
    /// Dotted line with small dots (2px dot, 3px gap)
    Dotted,
    /// Dash-dot pattern (10px dash, 5px gap, 2px dot, 5px gap)
    DashDot,
    /// Dash-dot-dot pattern (10px dash, 5px gap, 2px dot, 5px gap, 2px dot, 5px gap)
    DashDotDot,
    /// Custom SVG dasharray pattern, e.g. "10,5,2,3"
    Custom(String),
}

impl StrokeStyle {
    /// Returns the SVG dasharray value for this style, or None for solid lines
    pub fn to_svg_value(&self) -> Option<String> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5".to_string()),
            Self::Dotted => Some("2,3".to_string()),
            Self::DashDot => Some("10,5,2,5".to_string()),
            Self::DashDotDot => Some("10,5,2,5,2,5".to_string()),
            Self::Custom(pattern) => Some(pattern.clone()),
        }
    }
}

impl FromStr for StrokeStyle {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "solid" => Self::Solid,
            "dashed" => Self::Dashed,
            "dotted" => Self::Dotted,
            "dash-dot" | "dashdot" => Self::DashDot,
            "dash-dot-dot" | "dashdotdot" => Self::DashDotDot,
            // Any other value is treated as a custom dasharray pattern
            _ => Self::Custom(s.to_string()),
        })
    }
}

impl fmt::Display for StrokeStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solid => f.write_str("solid"),
            Self::Dashed => f.write_str("dashed"),
            Self::Dotted => f.write_str("dotted"),
            Self::DashDot => f.write_str("dash-dot"),
            Self::DashDotDot => f.write_str("dash-dot-dot"),
            Self::Custom(pattern) => f.write_str(pattern),
        }
    }
}

impl From<String> for StrokeStyle {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(style) => style,
            Err(never) => match never {},
        }
    }
}

impl From<StrokeStyle> for String {
    fn from(style: StrokeStyle) -> Self {
        style.to_string()
    }
}
