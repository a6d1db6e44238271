//! Caller-owned interaction state.
//!
//! [`InteractionState`] is re-supplied on every render; nothing here is
//! retained between renders. How clicks update it (single or multiple
//! selection, counting, cycling) is left to the caller.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use mosaic_core::{error::ConfigError, identifier::Id, resolve::Counter};

/// The hovered region, the selected regions and the per-region counters.
///
/// A region is selected if it is in the explicit selection or its counter is
/// greater than zero.
///
/// # Examples
///
/// ```
/// use mosaic::interaction::InteractionState;
/// use mosaic::identifier::Id;
///
/// let state = InteractionState::new()
///     .with_selected(Id::new("north"))
///     .with_count(Id::new("south"), 2)
///     .with_hovered(Id::new("east"));
///
/// assert!(state.is_selected(Id::new("north")));
/// assert!(state.is_selected(Id::new("south")));
/// assert!(!state.is_selected(Id::new("east")));
/// assert!(state.is_hovered(Id::new("east")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered: Option<Id>,
    selected: IndexSet<Id>,
    counts: IndexMap<Id, u32>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hovered(mut self, region: Id) -> Self {
        self.hovered = Some(region);
        self
    }

    pub fn with_selected(mut self, region: Id) -> Self {
        self.selected.insert(region);
        self
    }

    pub fn with_count(mut self, region: Id, count: u32) -> Self {
        self.set_count(region, count);
        self
    }

    pub fn hovered(&self) -> Option<Id> {
        self.hovered
    }

    /// Makes `region` the single hovered region.
    pub fn set_hovered(&mut self, region: Id) {
        self.hovered = Some(region);
    }

    /// Clears the hover if `region` is the hovered region.
    pub fn clear_hovered(&mut self, region: Id) {
        if self.hovered == Some(region) {
            self.hovered = None;
        }
    }

    pub fn select(&mut self, region: Id) {
        self.selected.insert(region);
    }

    pub fn deselect(&mut self, region: Id) {
        self.selected.shift_remove(&region);
    }

    pub fn set_count(&mut self, region: Id, count: u32) {
        self.counts.insert(region, count);
    }

    pub fn count(&self, region: Id) -> u32 {
        self.counts.get(&region).copied().unwrap_or(0)
    }

    pub fn is_hovered(&self, region: Id) -> bool {
        self.hovered == Some(region)
    }

    pub fn is_selected(&self, region: Id) -> bool {
        self.selected.contains(&region) || self.count(region) > 0
    }
}

/// How a region's counter maps onto an indexed aesthetic.
///
/// ```toml
/// [interaction]
/// mode = "cycle"
/// states = 4
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case", deny_unknown_fields)]
pub enum IndexMode {
    /// Monotonic counting; the counter is clamped to the last entry.
    #[default]
    Count,
    /// Displays a caller-supplied ordinal; clamped like `Count`.
    Display,
    /// Cycling through `states` states; the counter wraps.
    ///
    /// Without `states`, the longest value list of the indexed aesthetic
    /// sets the cycle length.
    Cycle {
        #[serde(default)]
        states: Option<u32>,
    },
}

impl IndexMode {
    /// The counter for a region whose count is `count` and whose indexed
    /// aesthetic has `natural_states` entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWrapModulus`] for `cycle` with zero states.
    pub fn counter(self, count: u32, natural_states: usize) -> Result<Counter, ConfigError> {
        match self {
            Self::Count | Self::Display => Ok(Counter::clamped(count)),
            Self::Cycle { states } => {
                let modulus = states.unwrap_or_else(|| u32::try_from(natural_states).unwrap_or(u32::MAX));
                Counter::cycle(count, modulus)
            }
        }
    }
}
