//! Indexed aesthetics: per-property value lists driven by a counter.
//!
//! Modes that track an integer per region (click counters, cycling states,
//! ordinal display) style the region by picking one element from each list.
//! Element 0 is the at-rest style and must look identical to the plain base
//! style; [`IndexedAes::library_default`] satisfies this.

use std::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, IntoDeserializer, SeqAccess, Visitor, value::SeqAccessDeserializer},
};

use crate::{
    aes::{Prop, Property, Style, de::forward_visits},
    color::Color,
    draw::StrokeStyle,
    error::ConfigError,
};

/// A single value used at every index, or one value per index.
///
/// In configuration files a list is one value per index; anything else is a
/// single value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Indexed<T> {
    Many(Vec<T>),
    One(T),
}

struct IndexedVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for IndexedVisitor<T> {
    type Value = Indexed<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a value, or a list with one value per index")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        T::deserialize(IntoDeserializer::<'de, E>::into_deserializer(v)).map(Indexed::One)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, seq: A) -> Result<Self::Value, A::Error> {
        Vec::<T>::deserialize(SeqAccessDeserializer::new(seq)).map(Indexed::Many)
    }

    forward_visits!('de, T => Indexed::One);
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Indexed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IndexedVisitor(PhantomData))
    }
}

impl<T: Default> Default for Indexed<T> {
    fn default() -> Self {
        Self::One(T::default())
    }
}

impl<T> Indexed<T> {
    /// Number of distinct entries; a single value counts as one.
    pub fn len(&self) -> usize {
        match self {
            Self::Many(values) => values.len(),
            Self::One(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the entry at `index`, clamped to the last entry.
    ///
    /// Returns `None` only for an empty list.
    pub fn get(&self, index: usize) -> Option<&T> {
        match self {
            Self::One(value) => Some(value),
            Self::Many(values) => values.get(index.min(values.len().saturating_sub(1))),
        }
    }
}

fn is_unset_one<T>(value: &Indexed<Prop<T>>) -> bool {
    matches!(value, Indexed::One(Prop::Unset))
}

/// An aesthetic whose properties are selected by an integer counter.
///
/// Numeric lists hold literals only; deferred expressions are not indexed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IndexedAes {
    #[serde(default, skip_serializing_if = "is_unset_one")]
    pub fill: Indexed<Prop<Color>>,
    #[serde(default, skip_serializing_if = "is_unset_one")]
    pub fill_opacity: Indexed<Prop<f32>>,
    #[serde(default, skip_serializing_if = "is_unset_one")]
    pub stroke: Indexed<Prop<Color>>,
    #[serde(default, skip_serializing_if = "is_unset_one")]
    pub stroke_width: Indexed<Prop<f32>>,
    #[serde(default, skip_serializing_if = "is_unset_one")]
    pub stroke_opacity: Indexed<Prop<f32>>,
    #[serde(default, skip_serializing_if = "is_unset_one")]
    pub stroke_dasharray: Indexed<Prop<StrokeStyle>>,
    #[serde(default, skip_serializing_if = "is_unset_one")]
    pub opacity: Indexed<Prop<f32>>,
    #[serde(default, skip_serializing_if = "is_unset_one")]
    pub non_scaling_stroke: Indexed<Prop<bool>>,
}

impl IndexedAes {
    /// The shipped counter palette: a blue ramp over the wash default.
    ///
    /// Element 0 is the wash fill, so index 0 matches the at-rest style.
    pub fn library_default() -> Self {
        let ramp = ["#d9d9d9", "#9ecae1", "#4292c6", "#08519c"]
            .into_iter()
            .map(|hex| Prop::Set(Color::new(hex).unwrap_or_default()))
            .collect();
        Self {
            fill: Indexed::Many(ramp),
            ..Self::default()
        }
    }

    /// The longest list length; the natural cycle length of this aesthetic.
    pub fn states(&self) -> usize {
        [
            self.fill.len(),
            self.fill_opacity.len(),
            self.stroke.len(),
            self.stroke_width.len(),
            self.stroke_opacity.len(),
            self.stroke_dasharray.len(),
            self.opacity.len(),
            self.non_scaling_stroke.len(),
        ]
        .into_iter()
        .max()
        .unwrap_or(1)
    }

    /// Rejects empty value lists.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            (Property::Fill, self.fill.len()),
            (Property::FillOpacity, self.fill_opacity.len()),
            (Property::Stroke, self.stroke.len()),
            (Property::StrokeWidth, self.stroke_width.len()),
            (Property::StrokeOpacity, self.stroke_opacity.len()),
            (Property::StrokeDasharray, self.stroke_dasharray.len()),
            (Property::Opacity, self.opacity.len()),
            (Property::NonScalingStroke, self.non_scaling_stroke.len()),
        ];
        match lengths.into_iter().find(|(_, len)| *len == 0) {
            Some((property, _)) => Err(ConfigError::EmptyIndexedList { property }),
            None => Ok(()),
        }
    }

    /// Picks entry `index` (clamped per property) from every list.
    ///
    /// Properties whose list is empty come back unset; [`validate`](Self::validate)
    /// rejects such lists up front.
    pub fn at(&self, index: usize) -> Style {
        fn pick<T: Clone>(values: &Indexed<Prop<T>>, index: usize) -> Prop<T> {
            values.get(index).cloned().unwrap_or_default()
        }

        Style {
            fill: pick(&self.fill, index),
            fill_opacity: pick(&self.fill_opacity, index),
            stroke: pick(&self.stroke, index),
            stroke_width: pick(&self.stroke_width, index),
            stroke_opacity: pick(&self.stroke_opacity, index),
            stroke_dasharray: pick(&self.stroke_dasharray, index),
            opacity: pick(&self.opacity, index),
            non_scaling_stroke: pick(&self.non_scaling_stroke, index),
        }
    }
}
