//! State-chain resolution: `base`, then `select` against base, then `hover`
//! against whichever of the two is actually painted underneath it.

use log::trace;

use crate::{
    aes::{Aes, BaseLeaf, ByState, Slot, Style},
    error::{ConfigError, ResolveError},
    resolve::indexed::{Counter, resolve_counter},
};

/// The selection overlay of a resolved chain.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectLayer {
    /// `select = "disabled"`: no selection overlay is painted.
    Disabled,
    /// The base is indexed; the counter already provides selection feedback.
    Skipped,
    /// Painted in the selection overlay while the region is selected.
    Active(Style),
}

/// The hover overlay of a resolved chain.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverLayer {
    /// `hover = "disabled"`: no hover overlay is painted.
    Disabled,
    /// The hover aesthetic, still holding its deferred expressions.
    ///
    /// Its parent depends on whether the region is selected when it is
    /// painted, so it stays unresolved until then.
    Pending(Aes),
}

/// The result of resolving one [`ByState`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedChain {
    pub base: Style,
    pub select: SelectLayer,
    pub hover: HoverLayer,
}

impl ResolvedChain {
    /// The style painted in the selection overlay, if any.
    pub fn select_style(&self) -> Option<&Style> {
        match &self.select {
            SelectLayer::Active(style) => Some(style),
            SelectLayer::Disabled | SelectLayer::Skipped => None,
        }
    }

    /// The style the hover overlay is resolved against.
    ///
    /// That is the select style when the region is selected and has an
    /// active selection overlay, and the base style otherwise.
    pub fn hover_parent(&self, selected: bool) -> &Style {
        match self.select_style() {
            Some(select) if selected => select,
            _ => &self.base,
        }
    }

    /// Evaluates the hover overlay against its actual parent.
    ///
    /// Returns `Ok(None)` when hover is disabled.
    ///
    /// # Errors
    ///
    /// Fails if a deferred expression references a property the parent
    /// leaves unset or sets to none.
    pub fn hover_style(&self, selected: bool) -> Result<Option<Style>, ResolveError> {
        match &self.hover {
            HoverLayer::Disabled => Ok(None),
            HoverLayer::Pending(aes) => aes.resolve(self.hover_parent(selected)).map(Some),
        }
    }
}

/// Resolves a state container against the wash default.
///
/// 1. `base` is merged onto `wash`; an unset base is the wash itself. An
///    indexed base picks its entries with `counter` first.
/// 2. `select` is merged onto the resolved base and its deferred expressions
///    are evaluated right away, since the base is its only possible parent.
///    `copy_parent` and unset both reproduce the base in the selection
///    overlay.
/// 3. `hover` is kept unresolved; see [`ResolvedChain::hover_style`].
///
/// A `copy_group` slot that reaches this point had nothing below it and
/// behaves as unset.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBase`] (wrapped) for a `copy_parent` or
/// `disabled` base, and a [`ResolveError`] if a deferred expression in `base`
/// or `select` cannot be evaluated.
///
/// # Examples
///
/// ```
/// use mosaic_core::aes::{Aes, ByState, Numeric, Prop, Slot, Style};
/// use mosaic_core::resolve::{Counter, resolve_chain};
///
/// let states = ByState::new(
///     Slot::Defined(Aes::new().with_stroke_width(Numeric::Literal(1.0)).into()),
///     Slot::Defined(Aes::new().with_stroke_width(Numeric::Literal(3.0))),
///     Slot::Defined(Aes::new().with_stroke_width("stroke_width + 1".parse().unwrap())),
/// )
/// .unwrap();
///
/// let chain = resolve_chain(&states, &Style::wash(), Counter::default()).unwrap();
/// let hover = chain.hover_style(false).unwrap().unwrap();
/// assert_eq!(hover.stroke_width, Prop::Set(2.0));
/// let hover = chain.hover_style(true).unwrap().unwrap();
/// assert_eq!(hover.stroke_width, Prop::Set(4.0));
/// ```
pub fn resolve_chain(
    by_state: &ByState,
    wash: &Style,
    counter: Counter,
) -> Result<ResolvedChain, ResolveError> {
    let (base, indexed) = match by_state.base() {
        Slot::Unset | Slot::CopyGroup => (wash.clone(), false),
        Slot::Defined(BaseLeaf::Plain(aes)) => (aes.resolve(wash)?, false),
        Slot::Defined(BaseLeaf::Indexed(indexed)) => {
            (resolve_counter(indexed, counter).or(wash), true)
        }
        Slot::CopyParent => {
            return Err(ConfigError::InvalidBase {
                sentinel: "copy_parent",
            }
            .into());
        }
        Slot::Disabled => {
            return Err(ConfigError::InvalidBase {
                sentinel: "disabled",
            }
            .into());
        }
    };

    let select = if indexed {
        SelectLayer::Skipped
    } else {
        match by_state.select() {
            Slot::Disabled => SelectLayer::Disabled,
            Slot::Unset | Slot::CopyGroup | Slot::CopyParent => SelectLayer::Active(base.clone()),
            Slot::Defined(aes) => SelectLayer::Active(aes.resolve(&base)?),
        }
    };

    let hover = match by_state.hover() {
        Slot::Disabled => HoverLayer::Disabled,
        Slot::Unset | Slot::CopyGroup | Slot::CopyParent => HoverLayer::Pending(Aes::new()),
        Slot::Defined(aes) => HoverLayer::Pending(aes.clone()),
    };

    trace!(
        indexed = indexed,
        select_disabled = matches!(select, SelectLayer::Disabled),
        hover_disabled = matches!(hover, HoverLayer::Disabled);
        "Resolved state chain"
    );

    Ok(ResolvedChain {
        base,
        select,
        hover,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        aes::{Indexed, IndexedAes, Numeric, Prop},
        color::Color,
    };

    fn width(value: f32) -> Aes {
        Aes::new().with_stroke_width(Numeric::Literal(value))
    }

    fn wider() -> Aes {
        Aes::new().with_stroke_width("stroke_width + 1".parse().unwrap())
    }

    fn resolve(states: &ByState) -> ResolvedChain {
        resolve_chain(states, &Style::wash(), Counter::default()).unwrap()
    }

    #[test]
    fn test_hover_against_base_when_not_selected() {
        let states = ByState::new(
            Slot::Defined(width(1.0).into()),
            Slot::Unset,
            Slot::Defined(wider()),
        )
        .unwrap();

        let hover = resolve(&states).hover_style(false).unwrap().unwrap();
        assert_eq!(hover.stroke_width, Prop::Set(2.0));
    }

    #[test]
    fn test_hover_against_select_when_selected() {
        let states = ByState::new(
            Slot::Defined(width(1.0).into()),
            Slot::Defined(width(3.0)),
            Slot::Defined(wider()),
        )
        .unwrap();

        let chain = resolve(&states);
        assert_eq!(chain.select_style().unwrap().stroke_width, Prop::Set(3.0));
        let hover = chain.hover_style(true).unwrap().unwrap();
        assert_eq!(hover.stroke_width, Prop::Set(4.0));
    }

    #[test]
    fn test_unset_select_and_hover_equal_base() {
        let states = ByState::base_only(
            Aes::new()
                .with_fill(Color::new("tomato").unwrap())
                .with_stroke_width(Numeric::Literal(2.0)),
        )
        .unwrap();

        let chain = resolve(&states);
        assert_eq!(chain.select_style(), Some(&chain.base));
        assert_eq!(chain.hover_style(false).unwrap().as_ref(), Some(&chain.base));
        assert_eq!(chain.hover_style(true).unwrap().as_ref(), Some(&chain.base));
    }

    #[test]
    fn test_copy_parent_reproduces_base() {
        let states = ByState::new(
            Slot::Defined(width(2.5).into()),
            Slot::CopyParent,
            Slot::CopyParent,
        )
        .unwrap();

        let chain = resolve(&states);
        assert_eq!(chain.select, SelectLayer::Active(chain.base.clone()));
        assert_eq!(chain.hover_style(false).unwrap(), Some(chain.base.clone()));
    }

    #[test]
    fn test_disabled_layers() {
        let states = ByState::new(Slot::Unset, Slot::Disabled, Slot::Disabled).unwrap();

        let chain = resolve(&states);
        assert_eq!(chain.base, Style::wash());
        assert_eq!(chain.select, SelectLayer::Disabled);
        assert_eq!(chain.hover_style(true).unwrap(), None);
        // Without a selection overlay, hover sits on the base even when selected.
        assert_eq!(chain.hover_parent(true), &chain.base);
    }

    #[test]
    fn test_base_merges_onto_wash() {
        let states = ByState::base_only(Aes::new().with_fill(Prop::None)).unwrap();
        let chain = resolve(&states);

        assert_eq!(chain.base.fill, Prop::None);
        assert_eq!(chain.base.stroke, Style::wash().stroke);
        assert_eq!(chain.base.stroke_width, Prop::Set(1.0));
    }

    #[test]
    fn test_base_deferred_evaluates_against_wash() {
        let states = ByState::base_only(Aes::new().with_stroke_width("stroke_width * 3".parse().unwrap()))
            .unwrap();
        assert_eq!(resolve(&states).base.stroke_width, Prop::Set(3.0));
    }

    #[test]
    fn test_invalid_base_is_rejected_at_resolution() {
        let states = ByState {
            base: Slot::CopyParent,
            ..ByState::default()
        };
        let err = resolve_chain(&states, &Style::wash(), Counter::default()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::Config(ConfigError::InvalidBase {
                sentinel: "copy_parent"
            })
        );
    }

    #[test]
    fn test_select_deferred_against_absent_parent_fails() {
        let states = ByState::new(
            Slot::Defined(Aes::new().with_stroke_width(Numeric::Literal(1.0)).into()),
            Slot::Defined(Aes::new().with_opacity("opacity * 0.5".parse().unwrap())),
            Slot::Unset,
        )
        .unwrap();
        let wash = Style {
            opacity: Prop::None,
            ..Style::wash()
        };

        let err = resolve_chain(&states, &wash, Counter::default()).unwrap_err();
        assert!(matches!(err, ResolveError::AbsentParentValue { .. }));
    }

    #[test]
    fn test_indexed_base_skips_select() {
        let states = ByState::new(
            Slot::Defined(IndexedAes::library_default().into()),
            Slot::Defined(width(5.0)),
            Slot::Defined(wider()),
        )
        .unwrap();

        let chain = resolve_chain(&states, &Style::wash(), Counter::clamped(2)).unwrap();
        assert_eq!(chain.select, SelectLayer::Skipped);
        assert_eq!(
            chain.base.fill,
            Prop::Set(Color::new("#4292c6").unwrap())
        );
        // Hover layers on the indexed base even when selected.
        let hover = chain.hover_style(true).unwrap().unwrap();
        assert_eq!(hover.stroke_width, Prop::Set(2.0));
        assert_eq!(hover.fill, chain.base.fill);
    }

    #[test]
    fn test_indexed_base_at_zero_equals_plain_base() {
        let indexed = ByState::base_only(IndexedAes::library_default()).unwrap();
        let plain = ByState::base_only(Aes::new()).unwrap();

        let at_zero = resolve_chain(&indexed, &Style::wash(), Counter::clamped(0)).unwrap();
        assert_eq!(at_zero.base, resolve(&plain).base);
    }

    #[test]
    fn test_indexed_base_scalar_and_clamp() {
        let indexed = IndexedAes {
            stroke_width: Indexed::Many(vec![Prop::Set(1.0), Prop::Set(2.0)]),
            ..IndexedAes::default()
        };
        let states = ByState::base_only(indexed).unwrap();
        let chain = resolve_chain(&states, &Style::wash(), Counter::clamped(9)).unwrap();
        assert_eq!(chain.base.stroke_width, Prop::Set(2.0));
        assert_eq!(chain.base.fill, Style::wash().fill);
    }
}
