//! Structural layer assignment.
//!
//! Every region lands in exactly one of four layers. The three group-name
//! lists are resolved to region sets, and each region takes the first layer
//! whose set contains it, in the fixed priority
//! hidden > overlay > underlay > base.
//!
//! A region listed for several layers is assigned only once. That is a
//! configuration smell, but it is settled silently by priority rather than
//! reported.

use std::{collections::HashSet, fmt};

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use mosaic_core::{draw::RenderLayer, identifier::Id};

use crate::region::{GroupMetadata, Regions};

/// The structural layer of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Not painted at all.
    Hidden,
    /// Painted above the base, never interactive.
    Overlay,
    /// Painted below the base, never interactive.
    Underlay,
    /// Painted in the interactive base group.
    Base,
}

impl Layer {
    /// Assignment priority, highest first.
    pub const PRIORITY: [Self; 4] = [Self::Hidden, Self::Overlay, Self::Underlay, Self::Base];

    /// The paint group this layer is drawn in; `None` for hidden regions.
    pub fn render_layer(self) -> Option<RenderLayer> {
        match self {
            Self::Hidden => None,
            Self::Overlay => Some(RenderLayer::Overlay),
            Self::Underlay => Some(RenderLayer::Underlay),
            Self::Base => Some(RenderLayer::Base),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hidden => "hidden",
            Self::Overlay => "overlay",
            Self::Underlay => "underlay",
            Self::Base => "base",
        })
    }
}

/// The group-name lists that move regions out of the base layer.
///
/// Each name is a declared group, or failing that a literal region id.
/// Names that match neither are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerLists {
    #[serde(default)]
    pub underlay: Vec<Id>,
    #[serde(default)]
    pub overlay: Vec<Id>,
    #[serde(default)]
    pub hidden: Vec<Id>,
}

impl LayerLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_underlay(mut self, names: impl IntoIterator<Item = Id>) -> Self {
        self.underlay.extend(names);
        self
    }

    pub fn with_overlay(mut self, names: impl IntoIterator<Item = Id>) -> Self {
        self.overlay.extend(names);
        self
    }

    pub fn with_hidden(mut self, names: impl IntoIterator<Item = Id>) -> Self {
        self.hidden.extend(names);
        self
    }
}

/// The per-region layer of every region, in region order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerAssignment {
    layers: IndexMap<Id, Layer>,
}

impl LayerAssignment {
    /// The layer of `region`, or `None` for an unknown region.
    pub fn layer_of(&self, region: Id) -> Option<Layer> {
        self.layers.get(&region).copied()
    }

    /// The regions assigned to `layer`, in region order.
    pub fn members(&self, layer: Layer) -> impl Iterator<Item = Id> + '_ {
        self.layers
            .iter()
            .filter(move |(_, assigned)| **assigned == layer)
            .map(|(region, _)| *region)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, Layer)> + '_ {
        self.layers.iter().map(|(region, layer)| (*region, *layer))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Resolves a list of group names to a set of region ids.
///
/// A declared group contributes its members; any other name is taken as a
/// single region id.
fn resolve_names(names: &[Id], groups: &GroupMetadata) -> HashSet<Id> {
    names
        .iter()
        .flat_map(|name| match groups.members(*name) {
            Some(members) => members.to_vec(),
            None => vec![*name],
        })
        .collect()
}

/// Assigns every region of `regions` to exactly one [`Layer`].
///
/// # Examples
///
/// ```
/// use mosaic::identifier::Id;
/// use mosaic::layers::{Layer, LayerLists, assign_layers};
/// use mosaic::region::{Element, GroupMetadata, Region, Regions};
///
/// let line = || vec![Element::Line { d: "M0 0 H1".to_string() }];
/// let regions: Regions = ["grid_h", "grid_v", "land"]
///     .into_iter()
///     .map(|id| Region::new(id, line()))
///     .collect();
/// let groups = GroupMetadata::new().with_group("grid", [Id::new("grid_h"), Id::new("grid_v")]);
/// let lists = LayerLists::new()
///     .with_underlay([Id::new("grid")])
///     .with_overlay([Id::new("grid_h")]);
///
/// let layers = assign_layers(&regions, &groups, &lists);
/// assert_eq!(layers.layer_of(Id::new("grid_h")), Some(Layer::Overlay));
/// assert_eq!(layers.layer_of(Id::new("grid_v")), Some(Layer::Underlay));
/// assert_eq!(layers.layer_of(Id::new("land")), Some(Layer::Base));
/// ```
pub fn assign_layers(
    regions: &Regions,
    groups: &GroupMetadata,
    lists: &LayerLists,
) -> LayerAssignment {
    let hidden = resolve_names(&lists.hidden, groups);
    let overlay = resolve_names(&lists.overlay, groups);
    let underlay = resolve_names(&lists.underlay, groups);

    let layers: IndexMap<Id, Layer> = regions
        .ids()
        .map(|region| {
            let layer = if hidden.contains(&region) {
                Layer::Hidden
            } else if overlay.contains(&region) {
                Layer::Overlay
            } else if underlay.contains(&region) {
                Layer::Underlay
            } else {
                Layer::Base
            };
            trace!(region:% = region, layer:% = layer; "Assigned layer");
            (region, layer)
        })
        .collect();

    let assignment = LayerAssignment { layers };
    debug!(
        hidden = assignment.members(Layer::Hidden).count(),
        overlay = assignment.members(Layer::Overlay).count(),
        underlay = assignment.members(Layer::Underlay).count(),
        base = assignment.members(Layer::Base).count();
        "Layers assigned"
    );
    assignment
}
