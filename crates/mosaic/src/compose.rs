//! The render compositor.
//!
//! Consumes the layer assignment and the per-region resolved chains and
//! fills five paint groups, bottom to top: underlay, base, overlay,
//! selection and hover. Selected and hovered base regions are painted twice:
//! once in the base group with their at-rest style, and once more in the
//! topmost groups, so their borders are never covered by a neighbor that
//! paints later.
//!
//! Hover styles are resolved here, against the parent that is actually
//! painted beneath them: the select style for a selected region, the base
//! style otherwise.

use indexmap::IndexMap;
use log::{debug, info, trace};

use mosaic_core::{
    aes::{BaseLeaf, ByGroup, ByState, Slot, Style, Target},
    draw::RenderLayer,
    identifier::Id,
    resolve::{Counter, resolve_chain},
};

use crate::{
    error::MosaicError,
    interaction::{IndexMode, InteractionState},
    layers::{Layer, LayerAssignment},
    region::{GroupMetadata, Regions},
};

/// One region painted with a fully concrete style.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintItem {
    pub region: Id,
    pub style: Style,
}

/// The items of one paint group, in region declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintGroup {
    layer: RenderLayer,
    items: Vec<PaintItem>,
}

impl PaintGroup {
    fn new(layer: RenderLayer) -> Self {
        Self {
            layer,
            items: Vec::new(),
        }
    }

    pub fn layer(&self) -> RenderLayer {
        self.layer
    }

    pub fn items(&self) -> &[PaintItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, region: Id) -> bool {
        self.items.iter().any(|item| item.region == region)
    }

    /// The style `region` is painted with in this group.
    pub fn style_of(&self, region: Id) -> Option<&Style> {
        self.items
            .iter()
            .find(|item| item.region == region)
            .map(|item| &item.style)
    }
}

/// Layer membership of a region and whether its overlays are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStatus {
    pub layer: Layer,
    pub selection_overlay: bool,
    pub hover_overlay: bool,
}

/// A pointer event addressed to a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Click(Id),
    Hover(Id),
    Unhover(Id),
}

impl PointerEvent {
    pub fn region(self) -> Id {
        match self {
            Self::Click(region) | Self::Hover(region) | Self::Unhover(region) => region,
        }
    }
}

/// Receives pointer events routed by [`Composite::dispatch`].
///
/// What a click does to the selection is up to the implementor.
pub trait RegionEvents {
    fn on_click(&mut self, _region: Id) {}

    fn on_hover(&mut self, _region: Id) {}

    fn on_unhover(&mut self, _region: Id) {}
}

/// The output of one render: five paint groups and per-region status.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    groups: [PaintGroup; 5],
    status: IndexMap<Id, RegionStatus>,
}

impl Composite {
    fn new() -> Self {
        Self {
            groups: RenderLayer::ALL.map(PaintGroup::new),
            status: IndexMap::new(),
        }
    }

    fn push(&mut self, layer: RenderLayer, region: Id, style: Style) {
        self.group_mut(layer).items.push(PaintItem { region, style });
    }

    fn group_mut(&mut self, layer: RenderLayer) -> &mut PaintGroup {
        let index = RenderLayer::ALL
            .iter()
            .position(|candidate| *candidate == layer)
            .unwrap_or_default();
        &mut self.groups[index]
    }

    /// All five groups, bottom to top.
    pub fn groups(&self) -> &[PaintGroup] {
        &self.groups
    }

    pub fn group(&self, layer: RenderLayer) -> &PaintGroup {
        self.groups
            .iter()
            .find(|group| group.layer == layer)
            .unwrap_or(&self.groups[0])
    }

    pub fn status(&self, region: Id) -> Option<RegionStatus> {
        self.status.get(&region).copied()
    }

    /// The style `region` is painted with in `layer`.
    pub fn style_of(&self, region: Id, layer: RenderLayer) -> Option<&Style> {
        self.group(layer).style_of(region)
    }

    /// Routes `event` to `handler` if its region is interactive.
    ///
    /// Only base-layer regions receive pointer events; events for any other
    /// region, or for unknown regions, are dropped. Returns whether the
    /// event was delivered.
    pub fn dispatch(&self, event: PointerEvent, handler: &mut impl RegionEvents) -> bool {
        let region = event.region();
        let interactive = self
            .status(region)
            .is_some_and(|status| status.layer == Layer::Base);
        if !interactive {
            trace!(region:% = region; "Dropped pointer event for non-interactive region");
            return false;
        }

        match event {
            PointerEvent::Click(region) => handler.on_click(region),
            PointerEvent::Hover(region) => handler.on_hover(region),
            PointerEvent::Unhover(region) => handler.on_unhover(region),
        }
        true
    }
}

/// Resolves and composites every region of a scene.
///
/// The compositor itself holds no interaction state; each call to
/// [`Compositor::composite`] is a full recomputation.
#[derive(Debug)]
pub struct Compositor<'a> {
    regions: &'a Regions,
    aes: &'a ByGroup,
    memberships: IndexMap<Id, Vec<Id>>,
    wash: Style,
    fallback: ByState,
    mode: IndexMode,
}

impl<'a> Compositor<'a> {
    /// Creates a compositor with the library wash, the library default
    /// state container and counting mode.
    pub fn new(regions: &'a Regions, groups: &GroupMetadata, aes: &'a ByGroup) -> Self {
        Self {
            regions,
            aes,
            memberships: groups.membership_index(),
            wash: Style::wash(),
            fallback: ByState::library_default(),
            mode: IndexMode::default(),
        }
    }

    pub fn with_wash(mut self, wash: Style) -> Self {
        self.wash = wash;
        self
    }

    /// Sets the state container used when no sheet entry matches.
    pub fn with_fallback(mut self, fallback: ByState) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_mode(mut self, mode: IndexMode) -> Self {
        self.mode = mode;
        self
    }

    /// Resolves every region and fills the paint groups.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::Config`] for configuration defects and
    /// [`MosaicError::Resolve`] when a deferred expression of some region
    /// cannot be evaluated against its parent. No partial composite is
    /// returned.
    pub fn composite(
        &self,
        layers: &LayerAssignment,
        state: &InteractionState,
    ) -> Result<Composite, MosaicError> {
        info!(regions = self.regions.len(); "Compositing regions");
        let mut composite = Composite::new();

        for region in self.regions.iter() {
            let id = region.id();
            let layer = layers.layer_of(id).unwrap_or(Layer::Base);

            let Some(render_layer) = layer.render_layer() else {
                trace!(region:% = id; "Skipping hidden region");
                composite.status.insert(
                    id,
                    RegionStatus {
                        layer,
                        selection_overlay: false,
                        hover_overlay: false,
                    },
                );
                continue;
            };

            let groups = self
                .memberships
                .get(&id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let target = Target::new(id, groups, region.kind());
            let states = self.aes.resolve(&target, &self.fallback);

            let counter = self.counter(&states, state.count(id))?;
            let chain = resolve_chain(&states, &self.wash, counter)
                .map_err(|err| MosaicError::resolve(id, err))?;

            composite.push(render_layer, id, chain.base.clone());

            let interactive = layer == Layer::Base;
            let selected = interactive && state.is_selected(id);
            let hovered = interactive && state.is_hovered(id);

            let mut selection_overlay = false;
            if selected {
                if let Some(select) = chain.select_style() {
                    composite.push(RenderLayer::Selection, id, select.clone());
                    selection_overlay = true;
                }
            }

            let mut hover_overlay = false;
            if hovered {
                let hover = chain
                    .hover_style(selected)
                    .map_err(|err| MosaicError::resolve(id, err))?;
                if let Some(hover) = hover {
                    composite.push(RenderLayer::Hover, id, hover);
                    hover_overlay = true;
                }
            }

            trace!(
                region:% = id,
                layer:% = layer,
                selection_overlay = selection_overlay,
                hover_overlay = hover_overlay;
                "Region composited"
            );
            composite.status.insert(
                id,
                RegionStatus {
                    layer,
                    selection_overlay,
                    hover_overlay,
                },
            );
        }

        debug!(
            underlay = composite.group(RenderLayer::Underlay).items().len(),
            base = composite.group(RenderLayer::Base).items().len(),
            overlay = composite.group(RenderLayer::Overlay).items().len(),
            selection = composite.group(RenderLayer::Selection).items().len(),
            hover = composite.group(RenderLayer::Hover).items().len();
            "Composite built"
        );
        Ok(composite)
    }

    /// The counter for a region whose base may be indexed.
    fn counter(&self, states: &ByState, count: u32) -> Result<Counter, MosaicError> {
        match states.base() {
            Slot::Defined(BaseLeaf::Indexed(indexed)) => {
                Ok(self.mode.counter(count, indexed.states())?)
            }
            _ => Ok(Counter::default()),
        }
    }
}
