//! Painting resolved styles as SVG attributes.
//!
//! [`style_attributes`] is the single place a [`Style`] turns into SVG
//! presentation attributes:
//!
//! | Property | Attribute | Explicit none |
//! |----------|-----------|---------------|
//! | `fill` | `fill` | `none` |
//! | `fill_opacity` | `fill-opacity` | `0` |
//! | `stroke` | `stroke` | `none` |
//! | `stroke_width` | `stroke-width` | `0` |
//! | `stroke_opacity` | `stroke-opacity` | `0` |
//! | `stroke_dasharray` | `stroke-dasharray` | `none` |
//! | `opacity` | `opacity` | `0` |
//! | `non_scaling_stroke` | `vector-effect` | *(omitted)* |
//!
//! Unset properties are never written.

use crate::aes::{ElementKind, Prop, Style};

fn color_value<T: ToString>(prop: &Prop<T>) -> Option<String> {
    match prop {
        Prop::Unset => None,
        Prop::None => Some("none".to_string()),
        Prop::Set(value) => Some(value.to_string()),
    }
}

fn number_value(prop: &Prop<f32>) -> Option<String> {
    match prop {
        Prop::Unset => None,
        Prop::None => Some("0".to_string()),
        Prop::Set(value) => Some(value.to_string()),
    }
}

/// The SVG attributes for `style`, in a stable order.
pub fn style_attributes(style: &Style) -> Vec<(&'static str, String)> {
    let mut attributes = Vec::new();
    let mut push = |name: &'static str, value: Option<String>| {
        if let Some(value) = value {
            attributes.push((name, value));
        }
    };

    push("fill", color_value(&style.fill));
    push("fill-opacity", number_value(&style.fill_opacity));
    push("stroke", color_value(&style.stroke));
    push("stroke-width", number_value(&style.stroke_width));
    push("stroke-opacity", number_value(&style.stroke_opacity));
    push(
        "stroke-dasharray",
        match &style.stroke_dasharray {
            Prop::Unset => None,
            Prop::None => Some("none".to_string()),
            Prop::Set(dash) => dash.to_svg_value(),
        },
    );
    push("opacity", number_value(&style.opacity));
    push(
        "vector-effect",
        matches!(style.non_scaling_stroke, Prop::Set(true)).then(|| "non-scaling-stroke".to_string()),
    );

    attributes
}

/// The SVG attributes for an element of `kind` painted with `style`.
///
/// The style is projected onto the properties that apply to `kind` first.
pub fn paint_attributes(kind: ElementKind, style: &Style) -> Vec<(&'static str, String)> {
    style_attributes(&kind.project(style))
}

/// Applies a resolved style to an SVG element.
///
/// With a kind argument the style is projected onto that element kind first.
///
/// # Examples
///
/// ```
/// use mosaic_core::aes::{ElementKind, Style};
/// use svg::node::element as svg_element;
///
/// let path = svg_element::Path::new().set("d", "M0 0 L10 10");
///
/// let styled = mosaic_core::apply_style!(path, ElementKind::Line, &Style::wash());
/// assert!(styled.to_string().contains(r#"fill="none""#));
/// ```
#[macro_export]
macro_rules! apply_style {
    ($element:expr, $style:expr) => {{
        let mut elem = $element;
        for (name, value) in $crate::draw::style_attributes($style) {
            elem = elem.set(name, value);
        }
        elem
    }};
    ($element:expr, $kind:expr, $style:expr) => {{
        let mut elem = $element;
        for (name, value) in $crate::draw::paint_attributes($kind, $style) {
            elem = elem.set(name, value);
        }
        elem
    }};
}
