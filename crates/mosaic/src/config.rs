//! Configuration types for Mosaic rendering.
//!
//! All types implement [`serde::Deserialize`] for loading from TOML.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining style and interaction settings.
//! - [`StyleConfig`] - Background color and wash default overrides.
//! - [`IndexMode`] - How per-region counters map onto indexed aesthetics.
//!
//! # Example
//!
//! ```
//! # use mosaic::config::AppConfig;
//! let config: AppConfig = toml::from_str(
//!     r##"
//!     [style]
//!     background_color = "white"
//!
//!     [style.wash]
//!     fill = "#eeeeee"
//!
//!     [interaction]
//!     mode = "cycle"
//!     states = 3
//!     "##,
//! )
//! .unwrap();
//! assert!(config.style().background_color().unwrap().is_some());
//! ```

use serde::Deserialize;

use mosaic_core::{
    aes::{Aes, Style},
    color::Color,
    error::{ConfigError, ResolveError},
};

pub use crate::interaction::IndexMode;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Interaction configuration section.
    #[serde(default)]
    interaction: IndexMode,
}

impl AppConfig {
    pub fn new(style: StyleConfig, interaction: IndexMode) -> Self {
        Self { style, interaction }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns how counters are applied to indexed aesthetics.
    pub fn interaction(&self) -> IndexMode {
        self.interaction
    }
}

/// Visual styling configuration.
///
/// Fields that are not set fall back to library defaults.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleConfig {
    /// Background color of the exported document, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Per-property overrides of the library wash default.
    #[serde(default)]
    wash: Option<Aes>,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>, wash: Option<Aes>) -> Self {
        Self {
            background_color,
            wash,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidColor`] if the configured string is not
    /// a valid color.
    pub fn background_color(&self) -> Result<Option<Color>, ConfigError> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
    }

    /// Returns the wash default every resolution chain falls back to.
    ///
    /// Configured overrides are merged onto [`Style::wash`]; deferred
    /// expressions in them are evaluated against it.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] if a deferred override references a
    /// property the library wash leaves unset.
    pub fn wash(&self) -> Result<Style, ResolveError> {
        let library = Style::wash();
        match &self.wash {
            Some(overrides) => overrides.resolve(&library),
            None => Ok(library),
        }
    }
}
