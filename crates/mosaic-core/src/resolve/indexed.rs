//! Indexed-state resolution.

use log::trace;

use crate::{
    aes::{IndexedAes, Style},
    error::ConfigError,
};

/// An integer interaction counter, and how it maps onto value lists.
///
/// Without a wrap modulus the counter is clamped to the last list entry
/// (counting and display modes). With one, it wraps first (cycling modes).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    count: u32,
    wrap: Option<u32>,
}

impl Counter {
    /// A clamping counter.
    pub fn clamped(count: u32) -> Self {
        Self { count, wrap: None }
    }

    /// A wrapping counter over `modulus` states.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWrapModulus`] for a zero modulus.
    pub fn cycle(count: u32, modulus: u32) -> Result<Self, ConfigError> {
        if modulus == 0 {
            return Err(ConfigError::ZeroWrapModulus);
        }
        Ok(Self {
            count,
            wrap: Some(modulus),
        })
    }

    pub fn count(self) -> u32 {
        self.count
    }

    pub fn wrap(self) -> Option<u32> {
        self.wrap
    }

    /// The wrapped but unclamped index.
    fn raw_index(self) -> usize {
        let raw = match self.wrap {
            Some(modulus) => self.count % modulus,
            None => self.count,
        };
        raw as usize
    }

    /// The index into a list of `len` entries.
    ///
    /// Wrapping happens before clamping, so a modulus larger than a list
    /// still lands on a valid entry.
    pub fn index(self, len: usize) -> usize {
        self.raw_index().min(len.saturating_sub(1))
    }
}

/// Picks one entry per property of `indexed` for `count`.
///
/// The result is partial: properties the indexed aesthetic leaves unset stay
/// unset, and the caller merges it onto its wash default.
///
/// # Errors
///
/// Returns [`ConfigError::ZeroWrapModulus`] if `wrap` is `Some(0)`.
///
/// # Examples
///
/// ```
/// use mosaic_core::aes::{Indexed, IndexedAes, Prop};
/// use mosaic_core::color::Color;
/// use mosaic_core::resolve::resolve_indexed;
///
/// let fills = ["white", "yellow", "orange", "red"]
///     .map(|name| Prop::Set(Color::new(name).unwrap()));
/// let indexed = IndexedAes {
///     fill: Indexed::Many(fills.to_vec()),
///     ..IndexedAes::default()
/// };
///
/// // 5 % 4 == 1
/// let style = resolve_indexed(&indexed, 5, Some(4)).unwrap();
/// assert_eq!(style.fill, fills[1]);
/// ```
pub fn resolve_indexed(
    indexed: &IndexedAes,
    count: u32,
    wrap: Option<u32>,
) -> Result<Style, ConfigError> {
    let counter = match wrap {
        Some(modulus) => Counter::cycle(count, modulus)?,
        None => Counter::clamped(count),
    };
    Ok(resolve_counter(indexed, counter))
}

pub(crate) fn resolve_counter(indexed: &IndexedAes, counter: Counter) -> Style {
    let index = counter.raw_index();
    trace!(count = counter.count, index = index; "Resolving indexed aesthetic");
    // `IndexedAes::at` clamps each list to its own length.
    indexed.at(index)
}
