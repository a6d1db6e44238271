//! The state dimension: `base`, `select` and `hover` slots.

use std::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Unexpected, Visitor, value::MapAccessDeserializer},
};

use crate::{
    aes::{Aes, IndexedAes, StateName, de::Peeked},
    color::Color,
    error::ConfigError,
};

/// One slot of a [`ByState`] container.
///
/// Besides a concrete definition, a slot can carry a sentinel:
///
/// | Sentinel | Configuration | Meaning |
/// |----------|---------------|---------|
/// | `Unset` | key omitted | same as the parent state |
/// | `CopyGroup` | `"copy_group"` | take this slot from the next group level down |
/// | `CopyParent` | `"copy_parent"` | paint the parent state's style in this state's layer |
/// | `Disabled` | `"disabled"` | emit no layer for this state |
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    Unset,
    CopyGroup,
    CopyParent,
    Disabled,
    Defined(T),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Slot<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn is_copy_group(&self) -> bool {
        matches!(self, Self::CopyGroup)
    }

    /// The sentinel's configuration keyword, if this slot holds one.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::CopyGroup => Some("copy_group"),
            Self::CopyParent => Some("copy_parent"),
            Self::Disabled => Some("disabled"),
            Self::Unset | Self::Defined(_) => None,
        }
    }
}

impl<T> From<T> for Slot<T> {
    fn from(value: T) -> Self {
        Self::Defined(value)
    }
}

impl<T> Slot<T> {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "copy_group" => Some(Self::CopyGroup),
            "copy_parent" => Some(Self::CopyParent),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }
}

struct SlotVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for SlotVisitor<T> {
    type Value = Slot<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("`copy_group`, `copy_parent`, `disabled` or a table of properties")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Slot::from_keyword(v).ok_or_else(|| E::invalid_value(Unexpected::Str(v), &self))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Self::Value, A::Error> {
        T::deserialize(MapAccessDeserializer::new(map)).map(Slot::Defined)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Slot<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SlotVisitor(PhantomData))
    }
}

impl<T: Serialize> Serialize for Slot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Defined(value) => value.serialize(serializer),
            Self::Unset => serializer.serialize_unit(),
            other => serializer.serialize_str(other.keyword().unwrap_or_default()),
        }
    }
}

/// The definition held by a `base` slot.
///
/// An indexed base is written as `{ indexed = { ... } }`.
#[derive(Debug, Clone, PartialEq)]
pub enum BaseLeaf {
    Plain(Aes),
    Indexed(IndexedAes),
}

impl From<Aes> for BaseLeaf {
    fn from(aes: Aes) -> Self {
        Self::Plain(aes)
    }
}

impl From<IndexedAes> for BaseLeaf {
    fn from(indexed: IndexedAes) -> Self {
        Self::Indexed(indexed)
    }
}

const INDEXED_KEY: &str = "indexed";

#[derive(Serialize)]
struct IndexedRepr<T> {
    indexed: T,
}

struct BaseLeafVisitor;

impl<'de> Visitor<'de> for BaseLeafVisitor {
    type Value = BaseLeaf;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of properties, or `{ indexed = { ... } }`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let Some(first) = map.next_key::<String>()? else {
            return Ok(BaseLeaf::Plain(Aes::new()));
        };
        if first != INDEXED_KEY {
            let rest = Peeked::new(first, map);
            return Aes::deserialize(MapAccessDeserializer::new(rest)).map(BaseLeaf::Plain);
        }

        let indexed = map.next_value::<IndexedAes>()?;
        if let Some(extra) = map.next_key::<String>()? {
            return Err(de::Error::custom(format!(
                "`{INDEXED_KEY}` cannot be combined with `{extra}` in the same base"
            )));
        }
        Ok(BaseLeaf::Indexed(indexed))
    }
}

impl<'de> Deserialize<'de> for BaseLeaf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BaseLeafVisitor)
    }
}

impl Serialize for BaseLeaf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Plain(aes) => aes.serialize(serializer),
            Self::Indexed(indexed) => IndexedRepr { indexed }.serialize(serializer),
        }
    }
}

/// Base, select and hover definitions for one target.
///
/// A `ByState` can only be built through validating constructors, so an
/// un-renderable base (`copy_parent` or `disabled`) is rejected before
/// anything is painted.
///
/// # Examples
///
/// ```
/// use mosaic_core::aes::{Aes, ByState, Numeric, Slot};
/// use mosaic_core::error::ConfigError;
///
/// let states = ByState::new(
///     Slot::Defined(Aes::new().with_stroke_width(Numeric::Literal(1.0)).into()),
///     Slot::Unset,
///     Slot::Defined(Aes::new().with_stroke_width("stroke_width + 1".parse().unwrap())),
/// );
/// assert!(states.is_ok());
///
/// let invalid = ByState::new(Slot::CopyParent, Slot::Unset, Slot::Unset);
/// assert!(matches!(invalid, Err(ConfigError::InvalidBase { .. })));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawByState")]
pub struct ByState {
    #[serde(skip_serializing_if = "Slot::is_unset")]
    pub(crate) base: Slot<BaseLeaf>,
    #[serde(skip_serializing_if = "Slot::is_unset")]
    pub(crate) select: Slot<Aes>,
    #[serde(skip_serializing_if = "Slot::is_unset")]
    pub(crate) hover: Slot<Aes>,
}

impl ByState {
    /// Creates a validated state container.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBase`] if `base` is `copy_parent` or
    /// `disabled`, and [`ConfigError::EmptyIndexedList`] for an indexed base
    /// with an empty value list.
    pub fn new(
        base: Slot<BaseLeaf>,
        select: Slot<Aes>,
        hover: Slot<Aes>,
    ) -> Result<Self, ConfigError> {
        let states = Self {
            base,
            select,
            hover,
        };
        states.validate()?;
        Ok(states)
    }

    /// Shorthand for a container that only defines `base`.
    pub fn base_only(base: impl Into<BaseLeaf>) -> Result<Self, ConfigError> {
        Self::new(Slot::Defined(base.into()), Slot::Unset, Slot::Unset)
    }

    /// The library default, used when no aesthetic entry matches a region.
    ///
    /// - base: unset, so it resolves to whichever wash is in effect
    /// - select: steel blue fill
    /// - hover: black stroke, one unit wider than its parent
    pub fn library_default() -> Self {
        let select = Aes::new().with_fill(Color::new("#4682b4").unwrap_or_default());
        let mut hover = Aes::new().with_stroke(Color::default());
        if let Ok(wider) = "stroke_width + 1".parse() {
            hover = hover.with_stroke_width(wider);
        }

        Self {
            base: Slot::Unset,
            select: Slot::Defined(select),
            hover: Slot::Defined(hover),
        }
    }

    pub fn base(&self) -> &Slot<BaseLeaf> {
        &self.base
    }

    pub fn select(&self) -> &Slot<Aes> {
        &self.select
    }

    pub fn hover(&self) -> &Slot<Aes> {
        &self.hover
    }

    /// The states whose slot is `copy_group`.
    pub fn copy_group_states(&self) -> impl Iterator<Item = StateName> + '_ {
        [
            (StateName::Base, self.base.is_copy_group()),
            (StateName::Select, self.select.is_copy_group()),
            (StateName::Hover, self.hover.is_copy_group()),
        ]
        .into_iter()
        .filter_map(|(state, copies)| copies.then_some(state))
    }

    /// Returns true if the base slot holds an indexed aesthetic.
    pub fn is_indexed(&self) -> bool {
        matches!(self.base, Slot::Defined(BaseLeaf::Indexed(_)))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match &self.base {
            Slot::CopyParent => Err(ConfigError::InvalidBase {
                sentinel: "copy_parent",
            }),
            Slot::Disabled => Err(ConfigError::InvalidBase {
                sentinel: "disabled",
            }),
            Slot::Defined(BaseLeaf::Indexed(indexed)) => indexed.validate(),
            Slot::Unset | Slot::CopyGroup | Slot::Defined(BaseLeaf::Plain(_)) => Ok(()),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawByState {
    #[serde(default)]
    base: Slot<BaseLeaf>,
    #[serde(default)]
    select: Slot<Aes>,
    #[serde(default)]
    hover: Slot<Aes>,
}

impl TryFrom<RawByState> for ByState {
    type Error = ConfigError;

    fn try_from(raw: RawByState) -> Result<Self, Self::Error> {
        Self::new(raw.base, raw.select, raw.hover)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aes::{Indexed, Prop};

    #[test]
    fn test_base_copy_parent_is_rejected() {
        let err = ByState::new(Slot::CopyParent, Slot::Unset, Slot::Unset).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidBase {
                sentinel: "copy_parent"
            }
        );
    }

    #[test]
    fn test_base_disabled_is_rejected() {
        let err = ByState::new(Slot::Disabled, Slot::Unset, Slot::Unset).unwrap_err();
        assert_eq!(err, ConfigError::InvalidBase { sentinel: "disabled" });
    }

    #[test]
    fn test_base_copy_group_is_allowed() {
        assert!(ByState::new(Slot::CopyGroup, Slot::CopyParent, Slot::Disabled).is_ok());
    }

    #[test]
    fn test_indexed_base_is_validated() {
        let empty = IndexedAes {
            fill: Indexed::Many(Vec::new()),
            ..IndexedAes::default()
        };
        assert!(ByState::base_only(empty).is_err());
        assert!(ByState::base_only(IndexedAes::library_default()).unwrap().is_indexed());
    }

    #[test]
    fn test_deserialize_sentinels() {
        let states: ByState = toml::from_str(
            r#"
            base = { fill = "white" }
            select = "copy_parent"
            hover = "disabled"
            "#,
        )
        .unwrap();

        assert!(matches!(states.base(), Slot::Defined(BaseLeaf::Plain(_))));
        assert_eq!(states.select(), &Slot::CopyParent);
        assert_eq!(states.hover(), &Slot::Disabled);
    }

    #[test]
    fn test_deserialize_rejects_invalid_base() {
        let err = toml::from_str::<ByState>(r#"base = "copy_parent""#).unwrap_err();
        assert!(err.to_string().contains("copy_parent"));
    }

    #[test]
    fn test_deserialize_indexed_base() {
        let states: ByState = toml::from_str(
            r#"
            base = { indexed = { fill = ["white", "red"] } }
            "#,
        )
        .unwrap();

        match states.base() {
            Slot::Defined(BaseLeaf::Indexed(indexed)) => {
                assert_eq!(indexed.fill.len(), 2);
            }
            other => panic!("expected indexed base, got {other:?}"),
        }
    }

    #[test]
    fn test_deserialize_reports_inner_errors() {
        let err = toml::from_str::<ByState>(r#"base = { fill = "notacolor" }"#).unwrap_err();
        assert!(err.to_string().contains("invalid color `notacolor`"), "{err}");

        let err = toml::from_str::<ByState>(r#"hover = { stroke_width = "fill + 1" }"#).unwrap_err();
        assert!(err.to_string().contains("`fill` is not numeric"), "{err}");

        let err = toml::from_str::<ByState>(r#"select = "copy_parnet""#).unwrap_err();
        assert!(err.to_string().contains("copy_parnet"), "{err}");

        let err = toml::from_str::<ByState>(
            r#"base = { indexed = { fill = ["white"] }, stroke = "black" }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("cannot be combined with `stroke`"), "{err}");
    }

    #[test]
    fn test_copy_group_states() {
        let states = ByState::new(Slot::CopyGroup, Slot::Unset, Slot::CopyGroup).unwrap();
        let copied: Vec<_> = states.copy_group_states().collect();
        assert_eq!(copied, vec![StateName::Base, StateName::Hover]);
    }

    #[test]
    fn test_library_default_shape() {
        let states = ByState::library_default();
        assert!(matches!(states.select(), Slot::Defined(_)));
        match states.hover() {
            Slot::Defined(hover) => {
                assert!(hover.has_deferred());
                assert_eq!(hover.stroke, Prop::Set(Color::default()));
            }
            other => panic!("expected defined hover, got {other:?}"),
        }
    }
}
