//! Validation rules attached to options.
//!
//! Every rule is built through a fallible constructor, so malformed
//! parameters are reported while the script is being configured rather than
//! when a user happens to hit them.
//!
//! Numeric bounds carry their own strictness: a bound written as an integer
//! (`10`, `[2,10]`) only accepts integer values, while a bound written with a
//! fraction (`10.0`, `[2,10.0]`) accepts floats as well.

use std::fmt::{Debug, Formatter};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::ConfigurationError;
use crate::value::{is_numeric_literal, Value};

static INTERVAL_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\[(])(-?[0-9]+(?:\.[0-9]+)?),(-?[0-9]+(?:\.[0-9]+)?)([\])])$")
        .expect("interval literal pattern is valid")
});

type EachPredicate = Box<dyn Fn(&Value) -> bool>;
type ListPredicate = Box<dyn Fn(&[Value]) -> bool>;

/// User supplied predicate.
pub enum Custom {
    /// Called once per bound value.
    Each(EachPredicate),
    /// Called once with the whole value list.
    Multi(ListPredicate),
}

/// A numeric bound and whether it was written as an integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub value: f64,
    pub integral: bool,
}

impl Bound {
    fn parse(literal: &str) -> Option<Self> {
        if !is_numeric_literal(literal) {
            return None;
        }
        Some(Self {
            value: literal.parse().ok()?,
            integral: !literal.contains(['.', 'e', 'E']),
        })
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(_) => Some(Self {
                value: value.as_f64()?,
                integral: true,
            }),
            Value::Float(float) => Some(Self {
                value: *float,
                integral: false,
            }),
            Value::Str(text) => Self::parse(text),
        }
    }
}

/// An interval such as `[2,10]` or `(0,1.5]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub lower: Bound,
    pub lower_inclusive: bool,
    pub upper: Bound,
    pub upper_inclusive: bool,
}

impl Interval {
    /// Parses an interval literal.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::MalformedRange`] when the literal does not match
    /// `[`/`(` lower `,` upper `]`/`)`, and
    /// [`ConfigurationError::InvertedRange`] when lower is not below upper.
    pub fn parse(literal: &str) -> Result<Self, ConfigurationError> {
        let captures = INTERVAL_LITERAL
            .captures(literal)
            .ok_or(ConfigurationError::MalformedRange)?;

        let lower = Bound::parse(&captures[2]).ok_or(ConfigurationError::MalformedRange)?;
        let upper = Bound::parse(&captures[3]).ok_or(ConfigurationError::MalformedRange)?;

        if lower.value >= upper.value {
            return Err(ConfigurationError::InvertedRange);
        }

        Ok(Self {
            lower,
            lower_inclusive: &captures[1] == "[",
            upper,
            upper_inclusive: &captures[4] == "]",
        })
    }

    #[must_use]
    pub fn integral(&self) -> bool {
        self.lower.integral && self.upper.integral
    }

    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        let Some(number) = value.as_f64() else {
            return false;
        };

        if self.integral() && value.is_float() {
            return false;
        }

        let above_lower = if self.lower_inclusive {
            number >= self.lower.value
        } else {
            number > self.lower.value
        };
        let below_upper = if self.upper_inclusive {
            number <= self.upper.value
        } else {
            number < self.upper.value
        };

        above_lower && below_upper
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
}

impl Comparison {
    /// Short name used in configuration error messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::GreaterThan => "GT",
            Self::GreaterOrEqual => "GTE",
            Self::LessThan => "LT",
            Self::LessOrEqual => "LTE",
        }
    }

    fn holds(self, left: f64, right: f64) -> bool {
        match self {
            Self::GreaterThan => left > right,
            Self::GreaterOrEqual => left >= right,
            Self::LessThan => left < right,
            Self::LessOrEqual => left <= right,
        }
    }
}

/// The closed set of validation rules an option can carry.
pub enum Rule {
    Custom(Custom),
    Int,
    Float,
    Number,
    Discrete(Vec<Value>),
    Range(Interval),
    Compare { op: Comparison, bound: Bound },
}

impl Rule {
    /// Validates each value with `predicate`.
    pub fn custom(predicate: impl Fn(&Value) -> bool + 'static) -> Self {
        Self::Custom(Custom::Each(Box::new(predicate)))
    }

    /// Validates the whole value list at once, e.g. to check `--bounds 10 20`
    /// against each other.
    pub fn custom_multi(predicate: impl Fn(&[Value]) -> bool + 'static) -> Self {
        Self::Custom(Custom::Multi(Box::new(predicate)))
    }

    /// Accepts only the listed values. String literals are coerced the same
    /// way argument tokens are, so `"3"` matches a typed `3`.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::EmptyDiscreteSet`] when no value is given.
    pub fn discrete<I, V>(allowed: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let allowed: Vec<Value> = allowed
            .into_iter()
            .map(|value| match value.into() {
                Value::Str(text) => Value::from_token(&text),
                other => other,
            })
            .collect();

        if allowed.is_empty() {
            return Err(ConfigurationError::EmptyDiscreteSet);
        }

        Ok(Self::Discrete(allowed))
    }

    /// # Errors
    ///
    /// See [`Interval::parse`].
    pub fn range(literal: &str) -> Result<Self, ConfigurationError> {
        Interval::parse(literal).map(Self::Range)
    }

    /// # Errors
    ///
    /// [`ConfigurationError::InvalidBound`] when `bound` is not numeric.
    pub fn compare(op: Comparison, bound: impl Into<Value>) -> Result<Self, ConfigurationError> {
        let bound = Bound::from_value(&bound.into())
            .ok_or(ConfigurationError::InvalidBound(op.label()))?;
        Ok(Self::Compare { op, bound })
    }

    /// # Errors
    ///
    /// See [`Rule::compare`].
    pub fn gt(bound: impl Into<Value>) -> Result<Self, ConfigurationError> {
        Self::compare(Comparison::GreaterThan, bound)
    }

    /// # Errors
    ///
    /// See [`Rule::compare`].
    pub fn gte(bound: impl Into<Value>) -> Result<Self, ConfigurationError> {
        Self::compare(Comparison::GreaterOrEqual, bound)
    }

    /// # Errors
    ///
    /// See [`Rule::compare`].
    pub fn lt(bound: impl Into<Value>) -> Result<Self, ConfigurationError> {
        Self::compare(Comparison::LessThan, bound)
    }

    /// # Errors
    ///
    /// See [`Rule::compare`].
    pub fn lte(bound: impl Into<Value>) -> Result<Self, ConfigurationError> {
        Self::compare(Comparison::LessOrEqual, bound)
    }

    /// Whether the rule validates the whole list in one call.
    #[must_use]
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::Custom(Custom::Multi(_)))
    }

    /// Checks a single value. Multi rules see it as a one element list.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Custom(Custom::Each(predicate)) => predicate(value),
            Self::Custom(Custom::Multi(predicate)) => predicate(std::slice::from_ref(value)),
            Self::Int => value.is_int(),
            Self::Float => value.is_float(),
            Self::Number => value.is_number(),
            Self::Discrete(allowed) => allowed.iter().any(|candidate| candidate.loosely_eq(value)),
            Self::Range(interval) => interval.contains(value),
            Self::Compare { op, bound } => {
                let Some(number) = value.as_f64() else {
                    return false;
                };
                if bound.integral && value.is_float() {
                    return false;
                }
                op.holds(number, bound.value)
            }
        }
    }

    /// Checks the bound list. Returns the first rejected value, or `None`
    /// when everything passes. A rejected multi rule reports no value.
    #[must_use]
    pub fn first_rejected<'a>(&self, values: &'a [Value]) -> Option<Rejection<'a>> {
        if let Self::Custom(Custom::Multi(predicate)) = self {
            return (!predicate(values)).then_some(Rejection::List);
        }

        values
            .iter()
            .find(|value| !self.accepts(value))
            .map(Rejection::Value)
    }
}

/// Why [`Rule::first_rejected`] failed.
#[derive(Debug, PartialEq)]
pub enum Rejection<'a> {
    Value(&'a Value),
    List,
}

impl Debug for Rule {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Custom(Custom::Each(_)) => formatter.write_str("Custom"),
            Self::Custom(Custom::Multi(_)) => formatter.write_str("Custom(multi)"),
            Self::Int => formatter.write_str("Int"),
            Self::Float => formatter.write_str("Float"),
            Self::Number => formatter.write_str("Number"),
            Self::Discrete(allowed) => formatter.debug_tuple("Discrete").field(allowed).finish(),
            Self::Range(interval) => formatter.debug_tuple("Range").field(interval).finish(),
            Self::Compare { op, bound } => formatter
                .debug_struct("Compare")
                .field("op", op)
                .field("bound", bound)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_rules() {
        assert!(Rule::Int.accepts(&Value::Int(10)));
        assert!(!Rule::Int.accepts(&Value::Float(10.1)));
        assert!(Rule::Float.accepts(&Value::Float(10.2)));
        assert!(!Rule::Float.accepts(&Value::Int(10)));
        assert!(Rule::Number.accepts(&Value::Int(3)));
        assert!(Rule::Number.accepts(&Value::Float(3.5)));
        assert!(!Rule::Number.accepts(&Value::from("hello")));
    }

    #[test]
    fn test_discrete() {
        let rule = Rule::discrete(["one", "two", "three"]).unwrap();
        assert!(rule.accepts(&Value::from("one")));
        assert!(!rule.accepts(&Value::from("four")));

        let numbers = Rule::discrete(["1", "2"]).unwrap();
        assert!(numbers.accepts(&Value::Int(2)));
        assert!(numbers.accepts(&Value::Float(1.0)));
    }

    #[test]
    fn test_discrete_requires_members() {
        let result = Rule::discrete(Vec::<Value>::new());
        assert_eq!(result.unwrap_err(), ConfigurationError::EmptyDiscreteSet);
    }

    #[test]
    fn test_inclusive_range() {
        let rule = Rule::range("[1,10]").unwrap();
        assert!(!rule.accepts(&Value::Int(15)));
        assert!(rule.accepts(&Value::Int(1)));
        assert!(rule.accepts(&Value::Int(10)));
        assert!(!rule.accepts(&Value::Int(0)));
    }

    #[test]
    fn test_exclusive_bounds() {
        let rule = Rule::range("(1,10]").unwrap();
        assert!(!rule.accepts(&Value::Int(1)));
        assert!(rule.accepts(&Value::Int(10)));

        let rule = Rule::range("[1,10)").unwrap();
        assert!(rule.accepts(&Value::Int(1)));
        assert!(!rule.accepts(&Value::Int(10)));
    }

    #[test]
    fn test_integer_range_rejects_floats() {
        let rule = Rule::range("[1,10]").unwrap();
        assert!(!rule.accepts(&Value::Float(5.5)));

        let rule = Rule::range("[1,10.0]").unwrap();
        assert!(rule.accepts(&Value::Float(5.5)));
    }

    #[test]
    fn test_negative_range() {
        let rule = Rule::range("[-10.0,3)").unwrap();
        assert!(rule.accepts(&Value::Float(-10.0)));
        assert!(rule.accepts(&Value::Int(-2)));
        assert!(!rule.accepts(&Value::Int(3)));
    }

    #[test]
    fn test_range_rejects_non_numbers() {
        let rule = Rule::range("[1,10]").unwrap();
        assert!(!rule.accepts(&Value::from("five")));
    }

    #[test]
    fn test_range_construction_errors() {
        assert_eq!(
            Rule::range("23").unwrap_err(),
            ConfigurationError::MalformedRange
        );
        assert_eq!(
            Rule::range("[1;10]").unwrap_err(),
            ConfigurationError::MalformedRange
        );
        assert_eq!(
            Rule::range("[10,5]").unwrap_err(),
            ConfigurationError::InvertedRange
        );
        assert_eq!(
            Rule::range("[5,5]").unwrap_err(),
            ConfigurationError::InvertedRange
        );
    }

    #[test]
    fn test_gt_integer_bound_rejects_floats() {
        let rule = Rule::gt(100).unwrap();
        assert!(!rule.accepts(&Value::Float(100.5)));
        assert!(!rule.accepts(&Value::Int(10)));
        assert!(!rule.accepts(&Value::Int(100)));
        assert!(!rule.accepts(&Value::from("hello")));
        assert!(rule.accepts(&Value::Int(101)));

        let rule = Rule::gt(100.0).unwrap();
        assert!(rule.accepts(&Value::Float(100.5)));
    }

    #[test]
    fn test_other_comparisons() {
        assert!(Rule::gte(100).unwrap().accepts(&Value::Int(100)));
        assert!(!Rule::gte(100).unwrap().accepts(&Value::Int(99)));
        assert!(Rule::lt(0).unwrap().accepts(&Value::Int(-1)));
        assert!(!Rule::lt(0).unwrap().accepts(&Value::Int(0)));
        assert!(Rule::lte(0).unwrap().accepts(&Value::Int(0)));
        assert!(!Rule::lte(0).unwrap().accepts(&Value::Float(-0.5)));
        assert!(Rule::lte(0.0).unwrap().accepts(&Value::Float(-0.5)));
    }

    #[test]
    fn test_comparison_bound_from_string() {
        let rule = Rule::gt("10.0").unwrap();
        assert!(rule.accepts(&Value::Float(10.5)));

        assert_eq!(
            Rule::gt("ten").unwrap_err(),
            ConfigurationError::InvalidBound("GT")
        );
        assert_eq!(
            Rule::lte("x").unwrap_err().to_string(),
            "LTE Error: Invalid value."
        );
    }

    #[test]
    fn test_custom_each() {
        let rule = Rule::custom(|value| value.as_str().is_some_and(|s| s.len() > 2));
        let values = vec![Value::from("abc"), Value::from("ab")];
        assert_eq!(
            rule.first_rejected(&values),
            Some(Rejection::Value(&values[1]))
        );
    }

    #[test]
    fn test_custom_multi_sees_whole_list() {
        let rule = Rule::custom_multi(|values| {
            matches!(values, [low, high] if low.as_f64() < high.as_f64())
        });
        assert!(rule.is_multi());
        assert_eq!(rule.first_rejected(&[Value::Int(10), Value::Int(20)]), None);
        assert_eq!(
            rule.first_rejected(&[Value::Int(20), Value::Int(10)]),
            Some(Rejection::List)
        );
    }
}
