//! Leaf aesthetics.

use serde::{Deserialize, Serialize};

use crate::{
    aes::{Numeric, Prop, Property},
    color::Color,
    draw::StrokeStyle,
    error::ResolveError,
};

/// A bag of independently optional visual properties.
///
/// [`Aes`] is the declarative form, whose numeric properties may be deferred.
/// [`Style`] is the resolved form: every numeric property is a literal and
/// nothing is left to evaluate.
///
/// One type covers every element kind; [`ElementKind`](crate::aes::ElementKind)
/// decides which properties are painted for shapes, lines and text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, bound(deserialize = "N: Deserialize<'de>"))]
pub struct Leaf<N> {
    #[serde(default, skip_serializing_if = "Prop::is_unset")]
    pub fill: Prop<Color>,
    #[serde(default, skip_serializing_if = "Prop::is_unset")]
    pub fill_opacity: Prop<N>,
    #[serde(default, skip_serializing_if = "Prop::is_unset")]
    pub stroke: Prop<Color>,
    #[serde(default, skip_serializing_if = "Prop::is_unset")]
    pub stroke_width: Prop<N>,
    #[serde(default, skip_serializing_if = "Prop::is_unset")]
    pub stroke_opacity: Prop<N>,
    #[serde(default, skip_serializing_if = "Prop::is_unset")]
    pub stroke_dasharray: Prop<StrokeStyle>,
    #[serde(default, skip_serializing_if = "Prop::is_unset")]
    pub opacity: Prop<N>,
    #[serde(default, skip_serializing_if = "Prop::is_unset")]
    pub non_scaling_stroke: Prop<bool>,
}

/// A declarative leaf aesthetic; numeric properties may be deferred.
pub type Aes = Leaf<Numeric>;

/// A fully resolved leaf aesthetic, ready to paint.
pub type Style = Leaf<f32>;

impl<N> Default for Leaf<N> {
    fn default() -> Self {
        Self {
            fill: Prop::Unset,
            fill_opacity: Prop::Unset,
            stroke: Prop::Unset,
            stroke_width: Prop::Unset,
            stroke_opacity: Prop::Unset,
            stroke_dasharray: Prop::Unset,
            opacity: Prop::Unset,
            non_scaling_stroke: Prop::Unset,
        }
    }
}

impl<N> Leaf<N> {
    /// Creates an aesthetic with every property unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no property is set.
    pub fn is_empty(&self) -> bool {
        self.fill.is_unset()
            && self.fill_opacity.is_unset()
            && self.stroke.is_unset()
            && self.stroke_width.is_unset()
            && self.stroke_opacity.is_unset()
            && self.stroke_dasharray.is_unset()
            && self.opacity.is_unset()
            && self.non_scaling_stroke.is_unset()
    }

    /// Returns the numeric property named by `property`, or `None` for a
    /// non-numeric one.
    pub fn numeric(&self, property: Property) -> Option<&Prop<N>> {
        match property {
            Property::FillOpacity => Some(&self.fill_opacity),
            Property::StrokeWidth => Some(&self.stroke_width),
            Property::StrokeOpacity => Some(&self.stroke_opacity),
            Property::Opacity => Some(&self.opacity),
            Property::Fill
            | Property::Stroke
            | Property::StrokeDasharray
            | Property::NonScalingStroke => None,
        }
    }

    pub fn with_fill(mut self, fill: impl Into<Prop<Color>>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn with_stroke(mut self, stroke: impl Into<Prop<Color>>) -> Self {
        self.stroke = stroke.into();
        self
    }

    pub fn with_fill_opacity(mut self, value: N) -> Self {
        self.fill_opacity = Prop::Set(value);
        self
    }

    pub fn with_stroke_width(mut self, value: N) -> Self {
        self.stroke_width = Prop::Set(value);
        self
    }

    pub fn with_stroke_opacity(mut self, value: N) -> Self {
        self.stroke_opacity = Prop::Set(value);
        self
    }

    pub fn with_opacity(mut self, value: N) -> Self {
        self.opacity = Prop::Set(value);
        self
    }

    pub fn with_dasharray(mut self, style: StrokeStyle) -> Self {
        self.stroke_dasharray = Prop::Set(style);
        self
    }

    pub fn with_non_scaling_stroke(mut self, enabled: bool) -> Self {
        self.non_scaling_stroke = Prop::Set(enabled);
        self
    }
}

impl<N: Clone> Leaf<N> {
    /// Left-biased merge: every unset property is taken from `fallback`.
    pub fn or(&self, fallback: &Self) -> Self {
        Self {
            fill: self.fill.or(&fallback.fill),
            fill_opacity: self.fill_opacity.or(&fallback.fill_opacity),
            stroke: self.stroke.or(&fallback.stroke),
            stroke_width: self.stroke_width.or(&fallback.stroke_width),
            stroke_opacity: self.stroke_opacity.or(&fallback.stroke_opacity),
            stroke_dasharray: self.stroke_dasharray.or(&fallback.stroke_dasharray),
            opacity: self.opacity.or(&fallback.opacity),
            non_scaling_stroke: self.non_scaling_stroke.or(&fallback.non_scaling_stroke),
        }
    }
}

impl Aes {
    /// Returns true if any numeric property holds a deferred expression.
    pub fn has_deferred(&self) -> bool {
        [
            &self.fill_opacity,
            &self.stroke_width,
            &self.stroke_opacity,
            &self.opacity,
        ]
        .into_iter()
        .any(|prop| prop.value().is_some_and(Numeric::is_deferred))
    }

    /// Resolves this aesthetic against its concrete parent.
    ///
    /// Unset properties are copied from `parent`; deferred expressions are
    /// evaluated against `parent`. The result carries no deferred values.
    ///
    /// # Examples
    ///
    /// ```
    /// use mosaic_core::aes::{Aes, Prop, Style};
    ///
    /// let parent = Style::new().with_stroke_width(3.0);
    /// let hover = Aes::new().with_stroke_width("stroke_width + 1".parse().unwrap());
    ///
    /// let resolved = hover.resolve(&parent).unwrap();
    /// assert_eq!(resolved.stroke_width, Prop::Set(4.0));
    /// ```
    pub fn resolve(&self, parent: &Style) -> Result<Style, ResolveError> {
        let numeric = |own: &Prop<Numeric>, inherited: &Prop<f32>| -> Result<Prop<f32>, ResolveError> {
            match own {
                Prop::Unset => Ok(inherited.clone()),
                other => other.clone().try_map(|value| value.evaluate(parent)),
            }
        };

        Ok(Style {
            fill: self.fill.or(&parent.fill),
            fill_opacity: numeric(&self.fill_opacity, &parent.fill_opacity)?,
            stroke: self.stroke.or(&parent.stroke),
            stroke_width: numeric(&self.stroke_width, &parent.stroke_width)?,
            stroke_opacity: numeric(&self.stroke_opacity, &parent.stroke_opacity)?,
            stroke_dasharray: self.stroke_dasharray.or(&parent.stroke_dasharray),
            opacity: numeric(&self.opacity, &parent.opacity)?,
            non_scaling_stroke: self.non_scaling_stroke.or(&parent.non_scaling_stroke),
        })
    }
}

impl Style {
    /// The library wash default: the baseline every resolution chain falls
    /// back to.
    ///
    /// Every numeric property is concrete, so deferred expressions evaluated
    /// against the wash never miss.
    pub fn wash() -> Self {
        Self {
            fill: Prop::Set(Color::new("#d9d9d9").unwrap_or_default()),
            fill_opacity: Prop::Set(1.0),
            stroke: Prop::Set(Color::new("#ffffff").unwrap_or_default()),
            stroke_width: Prop::Set(1.0),
            stroke_opacity: Prop::Set(1.0),
            stroke_dasharray: Prop::Unset,
            opacity: Prop::Set(1.0),
            non_scaling_stroke: Prop::Set(true),
        }
    }
}
