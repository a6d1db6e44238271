//! SVG export backend.
//!
//! [`SvgBuilder`] configures an [`Svg`] exporter; [`Svg::render`] turns a
//! [`Composite`] into an in-memory document and the [`Exporter`] impl writes
//! it to the configured file.

mod composite;

use std::path::PathBuf;

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use mosaic_core::color::Color;

use super::{Error, Exporter};
use crate::{compose::Composite, region::Regions};

/// A viewBox: min-x, min-y, width, height.
pub type ViewBox = [f32; 4];

/// Builder for [`Svg`].
#[derive(Debug, Default)]
pub struct SvgBuilder {
    file_name: Option<PathBuf>,
    view_box: Option<ViewBox>,
    background: Option<Color>,
}

impl SvgBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the file the [`Exporter`] impl writes to.
    pub fn with_file_name(mut self, file_name: impl Into<PathBuf>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_view_box(mut self, view_box: Option<ViewBox>) -> Self {
        self.view_box = view_box;
        self
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn build(self) -> Svg {
        Svg {
            file_name: self.file_name,
            view_box: self.view_box,
            background: self.background,
        }
    }
}

/// The SVG exporter.
#[derive(Debug)]
pub struct Svg {
    file_name: Option<PathBuf>,
    view_box: Option<ViewBox>,
    background: Option<Color>,
}

impl Svg {
    /// Renders `composite` to an SVG document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the composite paints a region that
    /// `regions` does not contain.
    pub fn render(&self, composite: &Composite, regions: &Regions) -> Result<Document, Error> {
        let mut doc = Document::new();
        if let Some([min_x, min_y, width, height]) = self.view_box {
            doc = doc
                .set("viewBox", format!("{min_x} {min_y} {width} {height}"))
                .set("width", width)
                .set("height", height);
        }

        if let Some(background) = &self.background {
            doc = doc.add(Self::background_rect(background));
        }

        let output = self.render_composite(composite, regions)?;
        Ok(output
            .render()
            .into_iter()
            .fold(doc, |doc, group| doc.add(group)))
    }

    fn background_rect(color: &Color) -> svg_element::Rectangle {
        svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", "100%")
            .set("height", "100%")
            .set("fill", color)
            .set("fill-opacity", color.alpha())
            .set("pointer-events", "none")
    }
}

impl Exporter for Svg {
    fn export_composite(
        &mut self,
        composite: &Composite,
        regions: &Regions,
    ) -> Result<(), Error> {
        let Some(file_name) = &self.file_name else {
            return Err(Error::Render("no output file configured".to_string()));
        };
        let doc = self.render(composite, regions)?;

        debug!(file_name:? = file_name; "Writing SVG");
        svg::save(file_name, &doc).map_err(Error::Io)?;
        info!(file_name:? = file_name; "SVG exported");
        Ok(())
    }
}
