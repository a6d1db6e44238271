//! Element-type tags.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aes::{Prop, Style};

/// The kind of a drawable element, and the classification of a region.
///
/// The set is closed: every paint path matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Shape,
    Line,
    Text,
}

impl ElementKind {
    pub const ALL: [Self; 3] = [Self::Shape, Self::Line, Self::Text];

    /// The reserved aesthetic key holding the default for this kind.
    pub fn reserved_key(self) -> &'static str {
        match self {
            Self::Shape => "__shape",
            Self::Line => "__line",
            Self::Text => "__text",
        }
    }

    /// Parses a reserved key (`__shape`, `__line`, `__text`).
    pub fn from_reserved_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.reserved_key() == key)
    }

    /// Restricts `style` to the properties that apply to this kind.
    ///
    /// Lines are open paths and never take a fill; it is painted as `none`
    /// so the SVG default black fill never shows.
    pub fn project(self, style: &Style) -> Style {
        match self {
            Self::Shape | Self::Text => style.clone(),
            Self::Line => Style {
                fill: Prop::None,
                fill_opacity: Prop::Unset,
                ..style.clone()
            },
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shape => "shape",
            Self::Line => "line",
            Self::Text => "text",
        })
    }
}
