//! Deferred expressions: "the parent's property, adjusted by a constant".
//!
//! A deferred expression can't be evaluated while the aesthetic sheet is
//! being resolved, because the parent of a hover style depends on whether the
//! region is selected at paint time. [`DeferredExpr::evaluate`] is the only
//! place deferred arithmetic happens.
//!
//! # Syntax
//!
//! ```text
//! [parent.]<property> <op> <operand>
//! ```
//!
//! where `<op>` is one of `+ - * /`, e.g. `"stroke_width + 1"` or
//! `"parent.fill_opacity * 0.5"`.

use std::{fmt, str::FromStr};

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Visitor},
};

use crate::{
    aes::{Prop, Property, Style},
    error::{ConfigError, ResolveError},
};

const PARENT_PREFIX: &str = "parent.";

/// Arithmetic applied to the referenced parent value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    fn apply(self, lhs: f32, rhs: f32) -> f32 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
        }
    }
}

/// A numeric value expressed relative to the parent style.
///
/// # Examples
///
/// ```
/// use mosaic_core::aes::{DeferredExpr, Operator, Property, Style};
///
/// let expr: DeferredExpr = "stroke_width + 1".parse().unwrap();
/// assert_eq!(expr.property(), Property::StrokeWidth);
/// assert_eq!(expr.operator(), Operator::Add);
///
/// let parent = Style::wash();
/// assert_eq!(expr.evaluate(&parent).unwrap(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeferredExpr {
    property: Property,
    operator: Operator,
    operand: f32,
}

impl DeferredExpr {
    /// Creates a deferred expression.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonNumericDeferred`] if `property` is not numeric
    /// and [`ConfigError::DivisionByZero`] for a `/ 0` expression.
    pub fn new(property: Property, operator: Operator, operand: f32) -> Result<Self, ConfigError> {
        if !property.is_numeric() {
            return Err(ConfigError::NonNumericDeferred { property });
        }
        let expr = Self {
            property,
            operator,
            operand,
        };
        if operator == Operator::Div && operand == 0.0 {
            return Err(ConfigError::DivisionByZero {
                input: expr.to_string(),
            });
        }
        Ok(expr)
    }

    pub fn property(&self) -> Property {
        self.property
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operand(&self) -> f32 {
        self.operand
    }

    /// Evaluates this expression against the concrete parent style.
    ///
    /// # Errors
    ///
    /// Fails if the parent leaves the referenced property unset or sets it to
    /// none.
    pub fn evaluate(&self, parent: &Style) -> Result<f32, ResolveError> {
        match parent.numeric(self.property) {
            Some(Prop::Set(value)) => Ok(self.operator.apply(*value, self.operand)),
            Some(Prop::Unset) | None => Err(ResolveError::MissingParentValue {
                expression: self.to_string(),
                property: self.property,
            }),
            Some(Prop::None) => Err(ResolveError::AbsentParentValue {
                expression: self.to_string(),
                property: self.property,
            }),
        }
    }
}

impl fmt::Display for DeferredExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.property,
            self.operator.symbol(),
            self.operand
        )
    }
}

impl FromStr for DeferredExpr {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ConfigError::InvalidDeferred {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let body = trimmed.strip_prefix(PARENT_PREFIX).unwrap_or(trimmed);

        let name_end = body
            .find(|c: char| !(c.is_ascii_lowercase() || c == '_'))
            .ok_or_else(|| invalid("missing operator"))?;
        let (name, rest) = body.split_at(name_end);
        if name.is_empty() {
            return Err(invalid("missing property name"));
        }

        let property = match name.parse::<Property>() {
            Ok(property) => property,
            Err(_) => return Err(invalid(&format!("unknown property `{name}`"))),
        };
        if !property.is_numeric() {
            return Err(ConfigError::NonNumericDeferred { property });
        }

        let rest = rest.trim_start();
        let mut chars = rest.chars();
        let operator = chars
            .next()
            .and_then(Operator::from_symbol)
            .ok_or_else(|| invalid("expected one of `+ - * /`"))?;
        let operand = chars
            .as_str()
            .trim()
            .parse::<f32>()
            .map_err(|_| invalid("operand is not a number"))?;

        Self::new(property, operator, operand).map_err(|err| match err {
            ConfigError::DivisionByZero { .. } => ConfigError::DivisionByZero {
                input: s.to_string(),
            },
            other => other,
        })
    }
}

impl TryFrom<String> for DeferredExpr {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DeferredExpr> for String {
    fn from(expr: DeferredExpr) -> Self {
        expr.to_string()
    }
}

/// A numeric property value: a literal, or a deferred expression.
///
/// In configuration files a number is a literal and a string is parsed as a
/// deferred expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Numeric {
    Literal(f32),
    Deferred(DeferredExpr),
}

struct NumericVisitor;

impl Visitor<'_> for NumericVisitor {
    type Value = Numeric;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a deferred expression such as \"stroke_width + 1\"")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Numeric::Literal(v as f32))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(Numeric::Literal(v as f32))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Numeric::Literal(v as f32))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse::<DeferredExpr>()
            .map(Numeric::Deferred)
            .map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumericVisitor)
    }
}

impl Numeric {
    /// Produces the concrete value, evaluating a deferred expression against
    /// `parent`.
    pub fn evaluate(&self, parent: &Style) -> Result<f32, ResolveError> {
        match self {
            Self::Literal(value) => Ok(*value),
            Self::Deferred(expr) => expr.evaluate(parent),
        }
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Self::Deferred(_))
    }
}

impl FromStr for Numeric {
    type Err = ConfigError;

    /// Parses a number literal, or failing that a deferred expression.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<f32>() {
            Ok(value) => Ok(Self::Literal(value)),
            Err(_) => s.parse().map(Self::Deferred),
        }
    }
}

impl From<f32> for Numeric {
    fn from(value: f32) -> Self {
        Self::Literal(value)
    }
}

impl From<DeferredExpr> for Numeric {
    fn from(expr: DeferredExpr) -> Self {
        Self::Deferred(expr)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn parent_with_width(width: Prop<f32>) -> Style {
        Style {
            stroke_width: width,
            ..Style::default()
        }
    }

    #[test]
    fn test_parse_basic_forms() {
        let expr: DeferredExpr = "stroke_width + 1".parse().unwrap();
        assert_eq!(expr.property(), Property::StrokeWidth);
        assert_eq!(expr.operator(), Operator::Add);
        assert_approx_eq!(f32, expr.operand(), 1.0);

        let expr: DeferredExpr = "parent.fill_opacity*0.5".parse().unwrap();
        assert_eq!(expr.property(), Property::FillOpacity);
        assert_eq!(expr.operator(), Operator::Mul);

        let expr: DeferredExpr = "  opacity - -0.25 ".parse().unwrap();
        assert_eq!(expr.operator(), Operator::Sub);
        assert_approx_eq!(f32, expr.operand(), -0.25);
    }

    #[test]
    fn test_parse_rejects_non_numeric_property() {
        let err = "fill + 1".parse::<DeferredExpr>().unwrap_err();
        assert_eq!(
            err,
            ConfigError::NonNumericDeferred {
                property: Property::Fill
            }
        );

        let err = DeferredExpr::new(Property::StrokeDasharray, Operator::Add, 1.0).unwrap_err();
        assert!(matches!(err, ConfigError::NonNumericDeferred { .. }));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("stroke_width".parse::<DeferredExpr>().is_err());
        assert!("stroke_width % 2".parse::<DeferredExpr>().is_err());
        assert!("stroke_width + wide".parse::<DeferredExpr>().is_err());
        assert!("+ 1".parse::<DeferredExpr>().is_err());
        assert!("line_width + 1".parse::<DeferredExpr>().is_err());
    }

    #[test]
    fn test_division_by_zero_is_config_error() {
        let err = "stroke_width / 0".parse::<DeferredExpr>().unwrap_err();
        assert!(matches!(err, ConfigError::DivisionByZero { .. }));
    }

    #[test]
    fn test_display_round_trip() {
        let expr: DeferredExpr = "parent.stroke_width * 1.5".parse().unwrap();
        assert_eq!(expr.to_string(), "stroke_width * 1.5");
        assert_eq!(expr.to_string().parse::<DeferredExpr>().unwrap(), expr);
    }

    #[test]
    fn test_evaluate_each_operator() {
        let parent = parent_with_width(Prop::Set(4.0));
        let cases = [
            ("stroke_width + 1", 5.0),
            ("stroke_width - 1", 3.0),
            ("stroke_width * 2", 8.0),
            ("stroke_width / 2", 2.0),
        ];
        for (source, expected) in cases {
            let expr: DeferredExpr = source.parse().unwrap();
            assert_approx_eq!(f32, expr.evaluate(&parent).unwrap(), expected);
        }
    }

    #[test]
    fn test_evaluate_missing_parent_value() {
        let expr: DeferredExpr = "stroke_width + 1".parse().unwrap();

        let err = expr.evaluate(&parent_with_width(Prop::Unset)).unwrap_err();
        assert!(matches!(err, ResolveError::MissingParentValue { .. }));

        let err = expr.evaluate(&parent_with_width(Prop::None)).unwrap_err();
        assert!(matches!(err, ResolveError::AbsentParentValue { .. }));
    }

    #[test]
    fn test_numeric_serde() {
        #[derive(Debug, Deserialize)]
        struct Holder {
            value: Numeric,
        }

        let holder: Holder = toml::from_str("value = 2.5").unwrap();
        assert_eq!(holder.value, Numeric::Literal(2.5));

        let holder: Holder = toml::from_str(r#"value = "stroke_width + 1""#).unwrap();
        assert!(holder.value.is_deferred());

        let err = toml::from_str::<Holder>(r#"value = "fill + 1""#).unwrap_err();
        assert!(err.to_string().contains("`fill` is not numeric"), "{err}");

        let err = toml::from_str::<Holder>(r#"value = "stroke_width / 0""#).unwrap_err();
        assert!(err.to_string().contains("divides by zero"), "{err}");
    }

    #[test]
    fn test_numeric_from_str() {
        assert_eq!("2.5".parse::<Numeric>().unwrap(), Numeric::Literal(2.5));
        assert!("opacity * 0.5".parse::<Numeric>().unwrap().is_deferred());
        assert!("wide".parse::<Numeric>().is_err());
    }

    proptest! {
        #[test]
        fn prop_evaluate_is_deterministic(
            width in 0.0f32..100.0,
            operand in 0.1f32..10.0,
            op in prop::sample::select(vec!['+', '-', '*', '/']),
        ) {
            let expr: DeferredExpr = format!("stroke_width {op} {operand}").parse().unwrap();
            let parent = parent_with_width(Prop::Set(width));

            let first = expr.evaluate(&parent).unwrap();
            let second = expr.evaluate(&parent.clone()).unwrap();
            prop_assert_eq!(first.to_bits(), second.to_bits());
        }
    }
}
