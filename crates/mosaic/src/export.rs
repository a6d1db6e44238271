//! Export of composited scenes.
//!
//! The [`Exporter`] trait is the last stage of the pipeline:
//!
//! ```text
//! Scene (regions, groups, layer lists, aesthetic sheet)
//!     ↓ assign layers
//! LayerAssignment
//!     ↓ composite (resolve + paint groups)
//! Composite
//!     ↓ export (this module)
//! Output file
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgBuilder`] and [`svg::Svg`]
//!
//! [`Error`] converts into [`MosaicError::Export`] at the crate boundary.
//!
//! [`MosaicError::Export`]: crate::MosaicError::Export

/// SVG export backend.
pub mod svg;

use crate::{compose::Composite, region::Regions};

/// Abstraction for export backends.
pub trait Exporter {
    /// Exports a composite, looking up region geometry in `regions`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the composite cannot be converted to the
    /// target format, or [`Error::Io`] if writing the output fails.
    fn export_composite(&mut self, composite: &Composite, regions: &Regions)
    -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
