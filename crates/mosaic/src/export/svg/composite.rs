//! SVG rendering of paint groups.

use log::{debug, trace};
use svg::node::element as svg_element;

use mosaic_core::draw::{LayeredOutput, RenderLayer, SvgNode};

use super::Svg;
use crate::{
    compose::{Composite, PaintItem},
    export::Error,
    region::Regions,
};

impl Svg {
    /// Paints every item of every group into a [`LayeredOutput`].
    pub(super) fn render_composite(
        &self,
        composite: &Composite,
        regions: &Regions,
    ) -> Result<LayeredOutput, Error> {
        let mut output = LayeredOutput::new();
        for group in composite.groups() {
            for item in group.items() {
                output.add_to_layer(group.layer(), self.render_item(item, regions)?);
            }
        }
        debug!(
            underlay = output.len_of(RenderLayer::Underlay),
            base = output.len_of(RenderLayer::Base),
            overlay = output.len_of(RenderLayer::Overlay),
            selection = output.len_of(RenderLayer::Selection),
            hover = output.len_of(RenderLayer::Hover);
            "Painted composite"
        );
        Ok(output)
    }

    /// Renders one region as `<g data-region="...">` holding its elements.
    fn render_item(&self, item: &PaintItem, regions: &Regions) -> Result<SvgNode, Error> {
        let region = regions.get(item.region).ok_or_else(|| {
            Error::Render(format!("composite paints unknown region `{}`", item.region))
        })?;
        trace!(region:% = item.region, elements = region.elements().len(); "Rendering region");

        let group = region
            .elements()
            .iter()
            .fold(
                svg_element::Group::new().set("data-region", item.region.to_string()),
                |group, element| group.add(element.paint(&item.style)),
            );
        Ok(Box::new(group))
    }
}
