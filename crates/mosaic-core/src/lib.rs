//! Mosaic Core Types and Resolution
//!
//! This crate provides the aesthetic model and the resolvers behind Mosaic's
//! clickable region maps. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Aesthetics**: Leaf aesthetics, sentinels, deferred expressions and the
//!   ByState / ByGroup containers ([`aes`] module)
//! - **Resolution**: Group hierarchy, state chain and indexed-state resolvers
//!   ([`resolve`] module)
//! - **Draw**: Paint-order groups and SVG style painting ([`draw`] module)

pub mod aes;
pub mod color;
pub mod draw;
pub mod error;
pub mod identifier;
pub mod resolve;
