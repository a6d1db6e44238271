//! Paint-order groups for SVG output.
//!
//! Regions are painted into five fixed groups, bottom to top. Selected and
//! hovered regions are duplicated into the two topmost groups so their
//! borders are never covered by a neighbor that paints later.
//!
//! # Overview
//!
//! - [`RenderLayer`]: the paint groups in order
//! - [`LayeredOutput`]: collects SVG nodes per group and emits them in order
//!
//! # Example
//!
//! ```
//! # use mosaic_core::draw::{RenderLayer, LayeredOutput};
//! # use svg::node::element::Path;
//!
//! let mut output = LayeredOutput::new();
//!
//! let grid = Path::new().set("d", "M0 0 H10");
//! output.add_to_layer(RenderLayer::Underlay, Box::new(grid));
//!
//! let region = Path::new().set("d", "M0 0 H10 V10 Z");
//! output.add_to_layer(RenderLayer::Base, Box::new(region));
//!
//! let svg_nodes = output.render();
//! assert_eq!(svg_nodes.len(), 2);
//! ```

use svg::node::element as svg_element;

/// Type alias for boxed SVG nodes.
pub type SvgNode = Box<dyn svg::Node>;

/// The paint groups, bottom to top.
///
/// The `Ord` derive uses declaration order, so the first variant paints first
/// (bottom) and the last variant paints last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Background regions, never interactive
    Underlay,
    /// Interactive regions; the only group that receives pointer events
    Base,
    /// Annotation regions, never interactive
    Overlay,
    /// Duplicates of selected base regions
    Selection,
    /// Duplicate of the hovered base region
    Hover,
}

impl RenderLayer {
    /// All groups in paint order.
    pub const ALL: [Self; 5] = [
        Self::Underlay,
        Self::Base,
        Self::Overlay,
        Self::Selection,
        Self::Hover,
    ];

    /// Returns the `data-layer` name of this group.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Underlay => "underlay",
            Self::Base => "base",
            Self::Overlay => "overlay",
            Self::Selection => "selection",
            Self::Hover => "hover",
        }
    }

    /// Returns true if pointer events should reach this group.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Self::Base)
    }
}

/// SVG nodes grouped by paint group.
///
/// When rendered, nodes are emitted in group order (bottom to top) and in
/// insertion order within a group. Non-interactive groups carry
/// `pointer-events="none"` so hit-testing always lands on the base group.
///
/// # Example
///
/// ```
/// # use mosaic_core::draw::{RenderLayer, LayeredOutput};
/// # use svg::node::element::Path;
///
/// let mut output = LayeredOutput::new();
///
/// output.add_to_layer(RenderLayer::Hover, Box::new(Path::new()));
/// output.add_to_layer(RenderLayer::Base, Box::new(Path::new()));
/// output.add_to_layer(RenderLayer::Base, Box::new(Path::new()));
///
/// let svg_nodes = output.render();
/// assert_eq!(svg_nodes.len(), 2); // base, then hover
/// ```
#[derive(Debug, Default)]
pub struct LayeredOutput {
    items: Vec<(RenderLayer, SvgNode)>,
}

impl LayeredOutput {
    /// Creates a new empty `LayeredOutput`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single node to the specified group.
    pub fn add_to_layer(&mut self, layer: RenderLayer, node: SvgNode) {
        self.items.push((layer, node));
    }

    /// Returns `true` if there are no nodes in any group.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of nodes in `layer`.
    pub fn len_of(&self, layer: RenderLayer) -> usize {
        self.items.iter().filter(|(l, _)| *l == layer).count()
    }

    /// Renders all groups to SVG `<g>` elements, consuming the output.
    ///
    /// Each non-empty group becomes a `<g data-layer="...">`; empty groups
    /// are skipped.
    pub fn render(mut self) -> Vec<SvgNode> {
        if self.is_empty() {
            return Vec::new();
        }

        // Stable sort keeps insertion order within a group
        self.items.sort_by_key(|(layer, _)| *layer);

        let mut result = Vec::new();
        let mut current_layer = self.items[0].0;
        let mut current_group = group_for(current_layer);

        for (layer, node) in self.items {
            if layer != current_layer {
                result.push(Box::new(current_group) as SvgNode);

                current_layer = layer;
                current_group = group_for(layer);
            }

            current_group = current_group.add(node);
        }

        result.push(Box::new(current_group) as SvgNode);

        result
    }
}

fn group_for(layer: RenderLayer) -> svg_element::Group {
    let group = svg_element::Group::new().set("data-layer", layer.name());
    if layer.is_interactive() {
        group
    } else {
        group.set("pointer-events", "none")
    }
}
