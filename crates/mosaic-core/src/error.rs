//! Error types for aesthetic configuration and resolution.
//!
//! Two kinds of failure exist:
//!
//! - [`ConfigError`]: the declarative aesthetic sheet is structurally invalid.
//!   Raised when a [`ByState`](crate::aes::ByState) or
//!   [`ByGroup`](crate::aes::ByGroup) is constructed or deserialized, before
//!   anything is painted.
//! - [`ResolveError`]: a deferred expression could not be evaluated against
//!   the parent style that was actually rendered, or a state chain that
//!   bypassed validation reached the resolver.

use thiserror::Error;

use crate::aes::{Property, StateName};

/// A structurally invalid aesthetic configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("the base slot cannot use `{sentinel}`: base has no parent state to copy")]
    InvalidBase { sentinel: &'static str },

    #[error("`__all` cannot use `copy_group` in its `{slot}` slot: nothing sits below it")]
    GlobalCopyGroup { slot: StateName },

    #[error("unknown reserved aesthetic key `{key}`, expected one of `__all`, `__shape`, `__line`, `__text`")]
    UnknownReservedKey { key: String },

    #[error("deferred expressions must reference a numeric property, `{property}` is not numeric")]
    NonNumericDeferred { property: Property },

    #[error("invalid deferred expression `{input}`: {reason}")]
    InvalidDeferred { input: String, reason: String },

    #[error("deferred expression `{input}` divides by zero")]
    DivisionByZero { input: String },

    #[error("invalid color `{value}`: {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("indexed property `{property}` has an empty value list")]
    EmptyIndexedList { property: Property },

    #[error("cycle wrap modulus must be at least 1")]
    ZeroWrapModulus,
}

/// A failure while resolving a state chain or painting a deferred value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("deferred expression `{expression}` references `{property}`, which the parent style leaves unset")]
    MissingParentValue {
        expression: String,
        property: Property,
    },

    #[error("deferred expression `{expression}` references `{property}`, which the parent style sets to none")]
    AbsentParentValue {
        expression: String,
        property: Property,
    },
}
