//! Regions, their drawable elements and group metadata.
//!
//! These are the inputs handed over by whatever loads the geometry: an
//! ordered map of region id to elements, and an ordered map of group name to
//! member region ids. Both are immutable for the duration of a render.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use svg::node::element as svg_element;

use mosaic_core::{
    aes::{ElementKind, Style},
    draw::SvgNode,
    identifier::Id,
};

/// A single drawable element of a region.
///
/// Geometry is opaque SVG path data; no geometry is interpreted here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum Element {
    /// A closed, fillable outline.
    Shape { d: String },
    /// An open path; never filled.
    Line { d: String },
    /// A text label anchored at `(x, y)`.
    Text { x: f32, y: f32, content: String },
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Shape { .. } => ElementKind::Shape,
            Self::Line { .. } => ElementKind::Line,
            Self::Text { .. } => ElementKind::Text,
        }
    }

    /// Paints this element with a resolved style.
    pub fn paint(&self, style: &Style) -> SvgNode {
        let kind = self.kind();
        match self {
            Self::Shape { d } | Self::Line { d } => {
                let path = svg_element::Path::new().set("d", d.as_str());
                Box::new(mosaic_core::apply_style!(path, kind, style))
            }
            Self::Text { x, y, content } => {
                let text = svg_element::Text::new(content.as_str())
                    .set("x", *x)
                    .set("y", *y);
                Box::new(mosaic_core::apply_style!(text, kind, style))
            }
        }
    }
}

/// A named, independently stylable and clickable set of elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    id: Id,
    elements: Vec<Element>,
}

impl Region {
    pub fn new(id: impl Into<Id>, elements: Vec<Element>) -> Self {
        Self {
            id: id.into(),
            elements,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The element-type classification used for default lookup.
    ///
    /// A region containing any shape is a shape; otherwise any line makes it
    /// a line; otherwise it is text.
    pub fn kind(&self) -> ElementKind {
        let has = |kind: ElementKind| self.elements.iter().any(|element| element.kind() == kind);
        if has(ElementKind::Shape) {
            ElementKind::Shape
        } else if has(ElementKind::Line) {
            ElementKind::Line
        } else {
            ElementKind::Text
        }
    }
}

/// All regions of a scene, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Regions {
    regions: IndexMap<Id, Region>,
}

impl Regions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a region, replacing any region with the same id.
    pub fn insert(&mut self, region: Region) {
        self.regions.insert(region.id(), region);
    }

    pub fn with_region(mut self, region: Region) -> Self {
        self.insert(region);
        self
    }

    pub fn get(&self, id: Id) -> Option<&Region> {
        self.regions.get(&id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.regions.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.regions.keys().copied()
    }
}

impl FromIterator<Region> for Regions {
    fn from_iter<I: IntoIterator<Item = Region>>(iter: I) -> Self {
        Self {
            regions: iter.into_iter().map(|region| (region.id(), region)).collect(),
        }
    }
}

/// Named groups and their member region ids, in declaration order.
///
/// Members need not exist in [`Regions`]; stale members are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupMetadata {
    groups: IndexMap<Id, Vec<Id>>,
}

impl GroupMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, name: impl Into<Id>, members: impl IntoIterator<Item = Id>) -> Self {
        self.groups.insert(name.into(), members.into_iter().collect());
        self
    }

    pub fn contains(&self, name: Id) -> bool {
        self.groups.contains_key(&name)
    }

    /// Group names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = Id> + '_ {
        self.groups.keys().copied()
    }

    pub fn members(&self, name: Id) -> Option<&[Id]> {
        self.groups.get(&name).map(Vec::as_slice)
    }

    /// Memberships of every region, computed in one pass.
    pub fn membership_index(&self) -> IndexMap<Id, Vec<Id>> {
        let mut index: IndexMap<Id, Vec<Id>> = IndexMap::new();
        for (name, members) in &self.groups {
            for member in members {
                let groups = index.entry(*member).or_default();
                if !groups.contains(name) {
                    groups.push(*name);
                }
            }
        }
        index
    }
}
