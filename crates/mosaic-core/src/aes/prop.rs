//! Tri-state leaf properties.

use std::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, IntoDeserializer, Visitor},
};

use crate::aes::de::forward_visits;

/// A single leaf property.
///
/// Unset and explicit absence are different things: an unset property is
/// filled from the parent or fallback style, while an explicit `None` paints
/// as `none` and stops inheritance.
///
/// In configuration files an unset property is an omitted key and explicit
/// absence is the string `"none"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Prop<T> {
    /// Not specified; inherit.
    Unset,
    /// Explicitly absent; render as `none`.
    None,
    /// A concrete (or, for numerics, possibly deferred) value.
    Set(T),
}

impl<T> Default for Prop<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Prop<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns the set value, if any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Unset | Self::None => None,
        }
    }

    /// Maps the set value, keeping unset and none as they are.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Prop<U> {
        match self {
            Self::Unset => Prop::Unset,
            Self::None => Prop::None,
            Self::Set(value) => Prop::Set(f(value)),
        }
    }

    /// Like [`Prop::map`] with a fallible mapping.
    pub fn try_map<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<Prop<U>, E> {
        Ok(match self {
            Self::Unset => Prop::Unset,
            Self::None => Prop::None,
            Self::Set(value) => Prop::Set(f(value)?),
        })
    }
}

impl<T: Clone> Prop<T> {
    /// Left-biased merge: keeps `self` unless it is unset.
    pub fn or(&self, fallback: &Self) -> Self {
        match self {
            Self::Unset => fallback.clone(),
            _ => self.clone(),
        }
    }
}

impl<T> From<T> for Prop<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

const NONE_KEYWORD: &str = "none";

struct PropVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for PropVisitor<T> {
    type Value = Prop<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a property value or \"none\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if v == NONE_KEYWORD {
            return Ok(Prop::None);
        }
        T::deserialize(IntoDeserializer::<'de, E>::into_deserializer(v)).map(Prop::Set)
    }

    forward_visits!('de, T => Prop::Set);
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Prop<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PropVisitor(PhantomData))
    }
}

impl<T: Serialize> Serialize for Prop<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Callers skip unset fields; a bare unset serializes as unit.
            Self::Unset => serializer.serialize_unit(),
            Self::None => serializer.serialize_str(NONE_KEYWORD),
            Self::Set(value) => value.serialize(serializer),
        }
    }
}
