//! Aesthetic resolution.
//!
//! Resolution runs along two dimensions:
//!
//! - [`resolve_group`] picks the most specific [`ByState`] for a region from a
//!   [`ByGroup`] sheet.
//! - [`resolve_chain`] resolves that container's `base`, `select` and `hover`
//!   slots into concrete styles, leaving hover's deferred expressions for
//!   paint time. An indexed base goes through [`resolve_indexed`] first.

mod chain;
mod indexed;

pub use chain::{HoverLayer, ResolvedChain, SelectLayer, resolve_chain};
pub use indexed::{Counter, resolve_indexed};

use crate::aes::{ByGroup, ByState, Target};

/// Returns the most specific entry of `by_group` for `target`.
///
/// Priority, highest first: the region id, each group the region belongs to
/// in declaration order, the element-type key, `__all`. The first match wins.
/// `None` is a lookup miss: the caller falls back to
/// [`ByState::library_default`] rather than skipping the region.
pub fn resolve_group<'a>(target: &Target<'_>, by_group: &'a ByGroup) -> Option<&'a ByState> {
    by_group.lookup(target)
}
