//! Deserialization helpers for the aesthetic sheet.
//!
//! The sheet mixes keywords, literals, expressions and tables in the same
//! positions. Every type here picks its variant from the shape of the input
//! and deserializes exactly one target, so a rejected value reports its own
//! error (an invalid color, a non-numeric deferred expression) instead of a
//! generic "no variant matched".

use serde::de::{DeserializeSeed, IntoDeserializer, MapAccess, value::StringDeserializer};

/// Implements the scalar and table `Visitor` methods by deserializing
/// `$target` from the visited value and wrapping it with `$wrap`.
///
/// Strings and sequences are left to the caller, since that is where the
/// keyword and list forms differ.
macro_rules! forward_visits {
    ($de:lifetime, $target:ty => $wrap:expr) => {
        fn visit_bool<E: serde::de::Error>(self, v: bool) -> Result<Self::Value, E> {
            <$target as serde::Deserialize<$de>>::deserialize(
                serde::de::IntoDeserializer::<$de, E>::into_deserializer(v),
            )
            .map($wrap)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
            <$target as serde::Deserialize<$de>>::deserialize(
                serde::de::IntoDeserializer::<$de, E>::into_deserializer(v),
            )
            .map($wrap)
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
            <$target as serde::Deserialize<$de>>::deserialize(
                serde::de::IntoDeserializer::<$de, E>::into_deserializer(v),
            )
            .map($wrap)
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<Self::Value, E> {
            <$target as serde::Deserialize<$de>>::deserialize(
                serde::de::IntoDeserializer::<$de, E>::into_deserializer(v),
            )
            .map($wrap)
        }

        fn visit_map<A: serde::de::MapAccess<$de>>(self, map: A) -> Result<Self::Value, A::Error> {
            <$target as serde::Deserialize<$de>>::deserialize(
                serde::de::value::MapAccessDeserializer::new(map),
            )
            .map($wrap)
        }
    };
}

pub(crate) use forward_visits;

/// A table whose first key has already been read.
///
/// Lets a visitor look at the first key to choose a target type and then
/// hand the whole table, first key included, to that type.
pub(crate) struct Peeked<A> {
    first: Option<String>,
    rest: A,
}

impl<A> Peeked<A> {
    pub(crate) fn new(first: String, rest: A) -> Self {
        Self {
            first: Some(first),
            rest,
        }
    }
}

impl<'de, A: MapAccess<'de>> MapAccess<'de> for Peeked<A> {
    type Error = A::Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(
        &mut self,
        seed: K,
    ) -> Result<Option<K::Value>, Self::Error> {
        match self.first.take() {
            Some(key) => {
                let key: StringDeserializer<A::Error> = key.into_deserializer();
                seed.deserialize(key).map(Some)
            }
            None => self.rest.next_key_seed(seed),
        }
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, Self::Error> {
        self.rest.next_value_seed(seed)
    }

    fn size_hint(&self) -> Option<usize> {
        self.rest
            .size_hint()
            .map(|rest| rest + usize::from(self.first.is_some()))
    }
}
