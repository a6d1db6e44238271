//! Scene descriptions.
//!
//! A scene bundles everything a render needs besides the interaction state:
//! the regions and their elements, the group metadata, the layer lists, the
//! aesthetic sheet and an optional viewBox. Scenes are written in TOML:
//!
//! ```toml
//! view_box = [0, 0, 100, 50]
//!
//! [regions.north]
//! elements = [{ kind = "shape", d = "M0 0 H100 V25 H0 Z" }]
//!
//! [regions.south]
//! elements = [{ kind = "shape", d = "M0 25 H100 V50 H0 Z" }]
//!
//! [groups]
//! coastal = ["north"]
//!
//! [layers]
//! overlay = []
//!
//! [aes.coastal]
//! fill = "steelblue"
//!
//! [aes.__all]
//! base = { fill = "lightgray" }
//! hover = { stroke_width = "stroke_width + 1" }
//! ```

use indexmap::IndexMap;
use log::{debug, trace};
use serde::Deserialize;

use mosaic_core::{aes::ByGroup, identifier::Id};

use crate::{
    error::MosaicError,
    export::svg::ViewBox,
    layers::LayerLists,
    region::{Element, GroupMetadata, Region, Regions},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawScene {
    #[serde(default)]
    view_box: Option<ViewBox>,
    #[serde(default)]
    regions: IndexMap<Id, RawRegion>,
    #[serde(default)]
    groups: GroupMetadata,
    #[serde(default)]
    layers: LayerLists,
    #[serde(default)]
    aes: ByGroup,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRegion {
    elements: Vec<Element>,
}

/// A loaded scene.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    regions: Regions,
    groups: GroupMetadata,
    layers: LayerLists,
    aes: ByGroup,
    view_box: Option<ViewBox>,
}

impl Scene {
    pub fn new(regions: Regions) -> Self {
        Self {
            regions,
            ..Self::default()
        }
    }

    pub fn with_groups(mut self, groups: GroupMetadata) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_layers(mut self, layers: LayerLists) -> Self {
        self.layers = layers;
        self
    }

    pub fn with_aes(mut self, aes: ByGroup) -> Self {
        self.aes = aes;
        self
    }

    pub fn with_view_box(mut self, view_box: ViewBox) -> Self {
        self.view_box = Some(view_box);
        self
    }

    /// Parses a scene from TOML source.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::Scene`] for malformed TOML, configuration
    /// defects in the aesthetic sheet, regions without elements, and region
    /// or group names using the reserved `__` prefix.
    pub fn from_toml(source: &str) -> Result<Self, MosaicError> {
        let raw: RawScene = toml::from_str(source)
            .map_err(|err| MosaicError::new_scene_error(err.message(), err.span(), source))?;

        for (id, region) in &raw.regions {
            if id.is_reserved() {
                return Err(MosaicError::new_scene_error(
                    format!("region `{id}` uses the reserved `__` prefix"),
                    None,
                    source,
                ));
            }
            if region.elements.is_empty() {
                return Err(MosaicError::new_scene_error(
                    format!("region `{id}` has no elements"),
                    None,
                    source,
                ));
            }
        }
        if let Some(name) = raw.groups.names().find(|name| name.is_reserved()) {
            return Err(MosaicError::new_scene_error(
                format!("group `{name}` uses the reserved `__` prefix"),
                None,
                source,
            ));
        }

        let regions: Regions = raw
            .regions
            .into_iter()
            .map(|(id, region)| Region::new(id, region.elements))
            .collect();
        debug!(
            regions = regions.len(),
            sheet_entries = raw.aes.len();
            "Scene loaded"
        );
        trace!(layers:? = raw.layers; "Layer lists");

        Ok(Self {
            regions,
            groups: raw.groups,
            layers: raw.layers,
            aes: raw.aes,
            view_box: raw.view_box,
        })
    }

    pub fn regions(&self) -> &Regions {
        &self.regions
    }

    pub fn groups(&self) -> &GroupMetadata {
        &self.groups
    }

    pub fn layers(&self) -> &LayerLists {
        &self.layers
    }

    pub fn aes(&self) -> &ByGroup {
        &self.aes
    }

    pub fn view_box(&self) -> Option<ViewBox> {
        self.view_box
    }
}
