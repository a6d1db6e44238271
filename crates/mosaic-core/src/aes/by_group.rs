//! The group dimension: which [`ByState`] applies to a region.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use log::trace;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor, value::MapAccessDeserializer},
    ser::SerializeMap,
};

use crate::{
    aes::{
        BaseLeaf, ElementKind, Slot, StateName,
        by_state::{ByState, RawByState},
        de::Peeked,
    },
    error::ConfigError,
    identifier::{Id, RESERVED_PREFIX},
};

const ALL_KEY: &str = "__all";

/// A key of a [`ByGroup`] sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// A region id or a named group.
    Name(Id),
    /// An element-type default (`__shape`, `__line`, `__text`).
    Kind(ElementKind),
    /// The global default (`__all`).
    All,
}

impl FromStr for GroupKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_KEY {
            return Ok(Self::All);
        }
        if let Some(kind) = ElementKind::from_reserved_key(s) {
            return Ok(Self::Kind(kind));
        }
        if s.starts_with(RESERVED_PREFIX) {
            return Err(ConfigError::UnknownReservedKey { key: s.to_string() });
        }
        Ok(Self::Name(Id::new(s)))
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(id) => write!(f, "{id}"),
            Self::Kind(kind) => f.write_str(kind.reserved_key()),
            Self::All => f.write_str(ALL_KEY),
        }
    }
}

impl From<Id> for GroupKey {
    fn from(id: Id) -> Self {
        Self::Name(id)
    }
}

impl From<ElementKind> for GroupKey {
    fn from(kind: ElementKind) -> Self {
        Self::Kind(kind)
    }
}

/// What the group resolver needs to know about one region.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    pub id: Id,
    /// Group memberships in declaration order.
    pub groups: &'a [Id],
    pub kind: ElementKind,
}

impl<'a> Target<'a> {
    pub fn new(id: Id, groups: &'a [Id], kind: ElementKind) -> Self {
        Self { id, groups, kind }
    }

    /// The lookup keys for this target, most specific first.
    fn keys(self) -> impl Iterator<Item = GroupKey> + 'a {
        std::iter::once(GroupKey::Name(self.id))
            .chain(self.groups.iter().copied().map(GroupKey::Name))
            .chain([GroupKey::Kind(self.kind), GroupKey::All])
    }
}

/// An ordered aesthetic sheet keyed by region id, named group, element type
/// or the global key.
///
/// Lookup follows a fixed priority: the region's own id, then each group it
/// belongs to in declaration order, then its element-type key, then `__all`.
/// [`lookup`](Self::lookup) returns the first entry found;
/// [`resolve`](Self::resolve) applies the same priority slot by slot.
///
/// # Examples
///
/// ```
/// use mosaic_core::aes::{Aes, ByGroup, ByState, ElementKind, GroupKey, Target};
/// use mosaic_core::color::Color;
/// use mosaic_core::identifier::Id;
///
/// let sheet = ByGroup::new()
///     .with_entry(
///         GroupKey::All,
///         ByState::base_only(Aes::new().with_fill(Color::new("gray").unwrap())).unwrap(),
///     )
///     .unwrap()
///     .with_entry(
///         Id::new("coastal"),
///         ByState::base_only(Aes::new().with_fill(Color::new("blue").unwrap())).unwrap(),
///     )
///     .unwrap();
///
/// let groups = [Id::new("coastal")];
/// let target = Target::new(Id::new("a"), &groups, ElementKind::Shape);
/// assert_eq!(sheet.lookup(&target), sheet.get(&GroupKey::Name(Id::new("coastal"))));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ByGroup {
    entries: IndexMap<GroupKey, ByState>,
}

impl ByGroup {
    /// Creates an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::GlobalCopyGroup`] if `key` is `__all` and any
    /// slot of `states` is `copy_group`.
    pub fn insert(&mut self, key: impl Into<GroupKey>, states: ByState) -> Result<(), ConfigError> {
        let key = key.into();
        if key == GroupKey::All {
            if let Some(slot) = states.copy_group_states().next() {
                return Err(ConfigError::GlobalCopyGroup { slot });
            }
        }
        self.entries.insert(key, states);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_entry(
        mut self,
        key: impl Into<GroupKey>,
        states: ByState,
    ) -> Result<Self, ConfigError> {
        self.insert(key, states)?;
        Ok(self)
    }

    pub fn get(&self, key: &GroupKey) -> Option<&ByState> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &ByState)> {
        self.entries.iter()
    }

    /// Every entry that applies to `target`, most specific first.
    pub fn candidates<'s>(&'s self, target: Target<'s>) -> impl Iterator<Item = &'s ByState> {
        target.keys().filter_map(move |key| self.entries.get(&key))
    }

    /// Returns the most specific entry for `target`, or `None` on a lookup
    /// miss.
    pub fn lookup(&self, target: &Target<'_>) -> Option<&ByState> {
        let found = target.keys().find_map(|key| {
            self.entries.get(&key).map(|states| {
                trace!(region:% = target.id, key:% = key; "Aesthetic entry matched");
                states
            })
        });
        if found.is_none() {
            trace!(region:% = target.id; "No aesthetic entry matched");
        }
        found
    }

    /// Resolves the effective [`ByState`] for `target`.
    ///
    /// Slots are resolved one at a time, walking the entries that apply to
    /// `target` from most to least specific. A slot takes the first value
    /// that is neither unset nor `copy_group`; leaves are taken whole and
    /// never merged property by property. A slot nobody defines stays unset,
    /// unless some level asked for `copy_group`, in which case it comes from
    /// `fallback`. On a lookup miss the whole of `fallback` is used.
    pub fn resolve(&self, target: &Target<'_>, fallback: &ByState) -> ByState {
        let candidates: Vec<&ByState> = self.candidates(*target).collect();
        if candidates.is_empty() {
            trace!(region:% = target.id; "No aesthetic entry matched, using library default");
            return fallback.clone();
        }

        ByState {
            base: inherit(&candidates, fallback, |states| &states.base),
            select: inherit(&candidates, fallback, |states| &states.select),
            hover: inherit(&candidates, fallback, |states| &states.hover),
        }
    }
}

fn inherit<T: Clone>(
    candidates: &[&ByState],
    fallback: &ByState,
    slot: impl Fn(&ByState) -> &Slot<T>,
) -> Slot<T> {
    let mut copy_requested = false;
    for &states in candidates {
        match slot(states) {
            Slot::Unset => {}
            Slot::CopyGroup => copy_requested = true,
            found => return found.clone(),
        }
    }
    if copy_requested {
        slot(fallback).clone()
    } else {
        Slot::Unset
    }
}

/// A sheet entry: a full state container, or a bare leaf meaning base only.
///
/// A table whose keys are state names (`base`, `select`, `hover`) is a state
/// container; any other table is a leaf. The first key decides, and the
/// chosen form then rejects keys that belong to the other one.
enum GroupEntry {
    States(RawByState),
    Leaf(BaseLeaf),
}

struct GroupEntryVisitor;

impl<'de> Visitor<'de> for GroupEntryVisitor {
    type Value = GroupEntry;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of `base`/`select`/`hover` states, or a table of properties")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let Some(first) = map.next_key::<String>()? else {
            return Ok(GroupEntry::States(RawByState::default()));
        };
        let is_state = StateName::ALL.iter().any(|state| state.to_string() == first);
        let rest = MapAccessDeserializer::new(Peeked::new(first, map));
        if is_state {
            RawByState::deserialize(rest).map(GroupEntry::States)
        } else {
            BaseLeaf::deserialize(rest).map(GroupEntry::Leaf)
        }
    }
}

impl<'de> Deserialize<'de> for GroupEntry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(GroupEntryVisitor)
    }
}

impl TryFrom<IndexMap<String, GroupEntry>> for ByGroup {
    type Error = ConfigError;

    fn try_from(raw: IndexMap<String, GroupEntry>) -> Result<Self, Self::Error> {
        let mut sheet = Self::new();
        for (key, entry) in raw {
            let states = match entry {
                GroupEntry::States(raw) => ByState::try_from(raw)?,
                GroupEntry::Leaf(leaf) => ByState::base_only(leaf)?,
            };
            sheet.insert(key.parse::<GroupKey>()?, states)?;
        }
        Ok(sheet)
    }
}

impl<'de> Deserialize<'de> for ByGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<String, GroupEntry>::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for ByGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, states) in &self.entries {
            map.serialize_entry(&key.to_string(), states)?;
        }
        map.end()
    }
}
