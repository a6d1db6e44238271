//! Drawing primitives: paint-order groups, dash patterns and style painting.
//!
//! - [`RenderLayer`] and [`LayeredOutput`]: bottom-to-top paint groups
//! - [`StrokeStyle`]: the `stroke_dasharray` value type
//! - [`style_attributes`] and [`apply_style!`](crate::apply_style!): resolved
//!   styles as SVG attributes

mod layer;
mod paint;
mod stroke;

pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use paint::{paint_attributes, style_attributes};
pub use stroke::StrokeStyle;
