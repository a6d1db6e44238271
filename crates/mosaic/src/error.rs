//! Error types for Mosaic operations.
//!
//! This module provides the main error type [`MosaicError`] which wraps
//! the error conditions that can occur while loading a scene and rendering
//! it.

use std::{io, ops::Range, path::PathBuf};

use thiserror::Error;

use mosaic_core::{
    error::{ConfigError, ResolveError},
    identifier::Id,
};

/// The main error type for Mosaic operations.
///
/// # Diagnostic Variants
///
/// The `Scene` and `Settings` variants carry the offending source and, when
/// known, the byte range of the bad TOML, so front ends can point at it.
#[derive(Debug, Error)]
pub enum MosaicError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to resolve aesthetics for region `{region}`: {source}")]
    Resolve {
        region: Id,
        #[source]
        source: ResolveError,
    },

    #[error("Invalid wash override: {0}")]
    Wash(#[source] ResolveError),

    #[error("Invalid scene: {message}")]
    Scene {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Invalid settings file `{}`: {message}", path.display())]
    Settings {
        path: PathBuf,
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for MosaicError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl MosaicError {
    /// Create a new `Scene` error with the associated source text.
    pub fn new_scene_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Scene {
            message: message.into(),
            span,
            src: src.into(),
        }
    }

    /// Create a `Settings` error for the settings file at `path`.
    pub fn new_settings_error(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Settings {
            path: path.into(),
            message: message.into(),
            span,
            src: src.into(),
        }
    }

    /// Create a `Resolve` error for `region`.
    ///
    /// Configuration defects found while resolving are reported as
    /// [`MosaicError::Config`] instead.
    pub fn resolve(region: Id, source: ResolveError) -> Self {
        match source {
            ResolveError::Config(err) => Self::Config(err),
            source => Self::Resolve { region, source },
        }
    }
}
