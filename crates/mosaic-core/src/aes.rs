//! Declarative aesthetic model.
//!
//! An aesthetic sheet is a two-dimensional structure:
//!
//! - **Group dimension** ([`ByGroup`]): which definition applies to a region,
//!   chosen by region id, named group, element-type key or the global key.
//! - **State dimension** ([`ByState`]): the `base`, `select` and `hover`
//!   definitions for one target.
//!
//! Leaves are [`Aes`] bags of independently optional properties ([`Prop`]).
//! Numeric properties may hold a [`DeferredExpr`] that is only evaluated once
//! the parent style for the current interaction state is known.
//!
//! # Overview
//!
//! - [`Prop`]: unset / explicit none / concrete value
//! - [`Numeric`], [`DeferredExpr`], [`Operator`]: literal or deferred numbers
//! - [`Aes`] and [`Style`]: declarative and resolved leaf aesthetics
//! - [`IndexedAes`]: per-property value lists selected by an integer counter
//! - [`Slot`], [`BaseLeaf`], [`ByState`]: the state dimension and its sentinels
//! - [`GroupKey`], [`ByGroup`]: the group dimension

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

mod by_group;
mod by_state;
mod de;
mod deferred;
mod element;
mod indexed;
mod leaf;
mod prop;

pub use by_group::{ByGroup, GroupKey, Target};
pub use by_state::{BaseLeaf, ByState, Slot};
pub use deferred::{DeferredExpr, Numeric, Operator};
pub use element::ElementKind;
pub use indexed::{Indexed, IndexedAes};
pub use leaf::{Aes, Leaf, Style};
pub use prop::Prop;

/// Names every property a leaf aesthetic can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Fill,
    FillOpacity,
    Stroke,
    StrokeWidth,
    StrokeOpacity,
    StrokeDasharray,
    Opacity,
    NonScalingStroke,
}

impl Property {
    /// All properties, in attribute output order.
    pub const ALL: [Self; 8] = [
        Self::Fill,
        Self::FillOpacity,
        Self::Stroke,
        Self::StrokeWidth,
        Self::StrokeOpacity,
        Self::StrokeDasharray,
        Self::Opacity,
        Self::NonScalingStroke,
    ];

    /// Returns the snake_case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::FillOpacity => "fill_opacity",
            Self::Stroke => "stroke",
            Self::StrokeWidth => "stroke_width",
            Self::StrokeOpacity => "stroke_opacity",
            Self::StrokeDasharray => "stroke_dasharray",
            Self::Opacity => "opacity",
            Self::NonScalingStroke => "non_scaling_stroke",
        }
    }

    /// Returns true if deferred expressions may reference this property.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::FillOpacity | Self::StrokeWidth | Self::StrokeOpacity | Self::Opacity
        )
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Property {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|property| property.name() == s)
            .ok_or_else(|| ConfigError::InvalidDeferred {
                input: s.to_string(),
                reason: format!("unknown property `{s}`"),
            })
    }
}

/// The three interaction states of a [`ByState`] container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateName {
    Base,
    Select,
    Hover,
}

impl StateName {
    pub const ALL: [Self; 3] = [Self::Base, Self::Select, Self::Hover];
}

impl fmt::Display for StateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base => "base",
            Self::Select => "select",
            Self::Hover => "hover",
        })
    }
}
