//! Mosaic - Layered, clickable SVG region maps.
//!
//! Loading, aesthetic resolution, layer assignment and compositing for maps
//! made of named regions. Every region is styled per interaction state
//! (at rest, selected, hovered) from an aesthetic sheet that may define
//! styles per region, per named group, per element kind or globally.
//!
//! # Pipeline
//!
//! ```text
//! Scene source (TOML)
//!     ↓ parse
//! Scene
//!     ↓ assign layers
//! LayerAssignment
//!     ↓ composite (+ InteractionState)
//! Composite
//!     ↓ export
//! SVG
//! ```

pub mod compose;
pub mod config;
pub mod export;
pub mod interaction;
pub mod layers;
pub mod region;
pub mod scene;

mod error;

pub use mosaic_core::{aes, color, draw, identifier, resolve};

pub use error::MosaicError;
pub use mosaic_core::error::{ConfigError, ResolveError};

use std::path::Path;

use log::{debug, info, trace};

use compose::{Composite, Compositor};
use config::AppConfig;
use export::{Exporter, svg::SvgBuilder};
use interaction::InteractionState;
use scene::Scene;

/// Builder for parsing, compositing and rendering Mosaic scenes.
///
/// # Examples
///
/// ```rust
/// use mosaic::{SceneBuilder, config::AppConfig};
/// use mosaic::identifier::Id;
/// use mosaic::interaction::InteractionState;
///
/// let source = r#"
///     [regions.north]
///     elements = [{ kind = "shape", d = "M0 0 H10 V10 H0 Z" }]
/// "#;
///
/// let builder = SceneBuilder::new(AppConfig::default());
/// let scene = builder.parse(source).expect("Failed to parse");
///
/// let state = InteractionState::new().with_selected(Id::new("north"));
/// let svg = builder.render_svg(&scene, &state).expect("Failed to render");
/// assert!(svg.contains(r#"data-layer="selection""#));
/// ```
#[derive(Default)]
pub struct SceneBuilder {
    config: AppConfig,
}

impl SceneBuilder {
    /// Create a new scene builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a TOML scene description.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::Scene`] for malformed scenes and aesthetic
    /// sheets with configuration defects.
    pub fn parse(&self, source: &str) -> Result<Scene, MosaicError> {
        info!("Parsing scene");
        let scene = Scene::from_toml(source)?;
        debug!(regions = scene.regions().len(); "Scene parsed successfully");
        trace!(scene:?; "Parsed scene");
        Ok(scene)
    }

    /// Assign layers and resolve every region for the given interaction
    /// state.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::Wash`] for an unusable wash override, and
    /// [`MosaicError::Config`] or [`MosaicError::Resolve`] when a region's
    /// aesthetics cannot be resolved.
    pub fn composite(
        &self,
        scene: &Scene,
        state: &InteractionState,
    ) -> Result<Composite, MosaicError> {
        info!("Assigning layers");
        let layers = layers::assign_layers(scene.regions(), scene.groups(), scene.layers());

        let wash = self.config.style().wash().map_err(MosaicError::Wash)?;

        Compositor::new(scene.regions(), scene.groups(), scene.aes())
            .with_wash(wash)
            .with_mode(self.config.interaction())
            .composite(&layers, state)
    }

    /// Composite a scene and render it to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError`] for resolution or rendering errors.
    pub fn render_svg(
        &self,
        scene: &Scene,
        state: &InteractionState,
    ) -> Result<String, MosaicError> {
        let composite = self.composite(scene, state)?;

        let document = self.svg_builder(scene)?.build().render(&composite, scene.regions())?;

        info!("SVG rendered successfully");
        Ok(document.to_string())
    }

    /// Composite a scene and write it as an SVG file.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError`] for resolution, rendering or I/O errors.
    pub fn export_svg(
        &self,
        scene: &Scene,
        state: &InteractionState,
        path: impl AsRef<Path>,
    ) -> Result<(), MosaicError> {
        let composite = self.composite(scene, state)?;

        let mut exporter = self
            .svg_builder(scene)?
            .with_file_name(path.as_ref())
            .build();
        exporter.export_composite(&composite, scene.regions())?;
        Ok(())
    }

    fn svg_builder(&self, scene: &Scene) -> Result<SvgBuilder, MosaicError> {
        let background = self.config.style().background_color()?;
        Ok(SvgBuilder::new()
            .with_view_box(scene.view_box())
            .with_background(background))
    }
}
